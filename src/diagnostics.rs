use std::fmt::Display;

use crate::lexer::Pos;

#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Range {
    pub start: Pos,
    pub end: Pos,
}

impl Range {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> Pos {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn join(&self, other: &Range) -> Range {
        Range::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum LexErrorKind {
    BadString,
    UnterminatedString,
    BadUrl,
    BadEscape,
    UnterminatedComment,
    InvalidUtf8,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lex(LexErrorKind),
    UnbalancedBlock { expected: char },
    InvalidDeclaration { message: &'static str },
    InvalidSelector { message: &'static str },
    DepthExceeded { max_depth: usize },
}

impl DiagnosticKind {
    /// Terminal kinds abort the transform instead of being recovered from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::DepthExceeded { .. }
                | DiagnosticKind::Lex(LexErrorKind::UnterminatedString)
        )
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Diagnostic {
    range: Range,
    kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(range: Range, kind: DiagnosticKind) -> Self {
        Self { range, kind }
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    /// 1-based line and column (in chars) of the start of the diagnostic.
    pub fn location(&self, source: &str) -> (u32, u32) {
        let start = (self.range.start as usize).min(source.len());
        let mut line = 1;
        let mut column = 1;
        for (i, c) in source.char_indices() {
            if i >= start {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn to_string_with_location(&self, filename: &str, source: &str) -> String {
        let (line, column) = self.location(source);
        format!("{filename}:{line}:{column}: {self}")
    }
}

impl Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErrorKind::BadString => write!(f, "Unexpected newline inside a string"),
            LexErrorKind::UnterminatedString => write!(f, "Unterminated string at end of input"),
            LexErrorKind::BadUrl => write!(f, "Invalid character in unquoted 'url(...)'"),
            LexErrorKind::BadEscape => write!(f, "Invalid escape sequence"),
            LexErrorKind::UnterminatedComment => write!(f, "Unterminated comment"),
            LexErrorKind::InvalidUtf8 => write!(f, "Input is not valid UTF-8"),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::Lex(kind) => write!(f, "{kind}"),
            DiagnosticKind::UnbalancedBlock { expected } => {
                write!(f, "Unbalanced block, expected '{expected}'")
            }
            DiagnosticKind::InvalidDeclaration { message } => {
                write!(f, "Invalid declaration: {message}")
            }
            DiagnosticKind::InvalidSelector { message } => {
                write!(f, "Invalid selector: {message}")
            }
            DiagnosticKind::DepthExceeded { max_depth } => {
                write!(f, "Maximum nesting depth of {max_depth} exceeded")
            }
        }
    }
}
