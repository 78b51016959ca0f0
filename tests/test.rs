use css_transformer::collect_tokens;
use css_transformer::Diagnostic;
use css_transformer::DiagnosticKind;
use css_transformer::LexErrorKind;
use css_transformer::Lexer;
use css_transformer::Pos;
use css_transformer::Range;
use css_transformer::TokenKind;
use css_transformer::Tokenizer;
use css_transformer::TokenizerOptions;
use indoc::indoc;

fn kind_name(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Ident(_) => "ident",
        TokenKind::Function(_) => "function",
        TokenKind::AtKeyword(_) => "at_keyword",
        TokenKind::Hash { is_id: true, .. } => "id_hash",
        TokenKind::Hash { is_id: false, .. } => "hash",
        TokenKind::String { .. } => "string",
        TokenKind::BadString => "bad_string",
        TokenKind::Url(_) => "url",
        TokenKind::BadUrl => "bad_url",
        TokenKind::Number(_) => "number",
        TokenKind::Percentage(_) => "percentage",
        TokenKind::Dimension(..) => "dimension",
        TokenKind::Delim(_) => "delim",
        TokenKind::Whitespace => "whitespace",
        TokenKind::Comment(_) => "comment",
        TokenKind::Colon => "colon",
        TokenKind::Semicolon => "semicolon",
        TokenKind::Comma => "comma",
        TokenKind::LeftParenthesis => "left_parenthesis",
        TokenKind::RightParenthesis => "right_parenthesis",
        TokenKind::LeftSquare => "left_square",
        TokenKind::RightSquare => "right_square",
        TokenKind::LeftCurly => "left_curly",
        TokenKind::RightCurly => "right_curly",
        TokenKind::Cdo => "cdo",
        TokenKind::Cdc => "cdc",
        TokenKind::Eof => "eof",
    }
}

fn snapshot(tokens: impl IntoIterator<Item = css_transformer::Token<'static>>) -> String {
    tokens
        .into_iter()
        .filter(|token| !matches!(token.kind, TokenKind::Whitespace | TokenKind::Eof))
        .map(|token| format!("{}: {}\n", kind_name(&token.kind), token.raw))
        .collect()
}

fn assert_tokens_snapshot(input: &'static str, expected: &str) {
    let (tokens, _) = collect_tokens(input);
    similar_asserts::assert_eq!(snapshot(tokens), expected);
}

fn lex_error_kinds(input: &str) -> Vec<LexErrorKind> {
    let (_, diagnostics) = collect_tokens(input);
    diagnostics
        .iter()
        .filter_map(|diagnostic| match diagnostic.kind() {
            DiagnosticKind::Lex(kind) => Some(*kind),
            _ => None,
        })
        .collect()
}

fn assert_lexer_state(lexer: &Lexer, cur: (char, Pos), peek: (char, Pos), peek2: (char, Pos)) {
    assert_eq!((lexer.cur(), lexer.cur_pos()), cur);
    assert_eq!((lexer.peek(), lexer.peek_pos()), peek);
    assert_eq!((lexer.peek2(), lexer.peek2_pos()), peek2);
}

#[test]
fn lexer_cursor() {
    let l = Lexer::from("");
    assert!(l.is_eof());
    assert_lexer_state(&l, ('\0', 0), ('\0', 0), ('\0', 0));

    let mut l = Lexer::from("0壹👂삼");
    assert_lexer_state(&l, ('0', 0), ('壹', 1), ('👂', 4));
    assert_eq!(l.consume(), '壹');
    assert_lexer_state(&l, ('壹', 1), ('👂', 4), ('삼', 8));
    l.consume();
    assert_lexer_state(&l, ('👂', 4), ('삼', 8), ('\0', 11));
    l.consume();
    l.consume();
    assert!(l.is_eof());
    assert_lexer_state(&l, ('\0', 11), ('\0', 11), ('\0', 11));
    l.consume();
    assert!(l.is_eof());
}

#[test]
fn lexer_at_offset() {
    let l = Lexer::at("a壹b", 2);
    assert_eq!((l.cur(), l.cur_pos()), ('b', 4));
    assert_eq!(l.slice(0, 4), Some("a壹"));
}

#[test]
fn tokenize_rule() {
    assert_tokens_snapshot(
        indoc! {r#"
            .foo:not(.baz) > a[href^="http"] {
              background-image: url(img.png), url('test.jpg');
              max-height: fit-content(50%);
              // border-top: red dotted 2px;
              margin: -0.5em 10px !important;
            }
        "#},
        indoc! {r#"
            delim: .
            ident: foo
            colon: :
            function: not(
            delim: .
            ident: baz
            right_parenthesis: )
            delim: >
            ident: a
            left_square: [
            ident: href
            delim: ^
            delim: =
            string: "http"
            right_square: ]
            left_curly: {
            ident: background-image
            colon: :
            url: url(img.png)
            comma: ,
            function: url(
            string: 'test.jpg'
            right_parenthesis: )
            semicolon: ;
            ident: max-height
            colon: :
            function: fit-content(
            percentage: 50%
            right_parenthesis: )
            semicolon: ;
            comment: // border-top: red dotted 2px;
            ident: margin
            colon: :
            dimension: -0.5em
            dimension: 10px
            delim: !
            ident: important
            semicolon: ;
            right_curly: }
        "#},
    );
}

#[test]
fn tokenize_numbers() {
    assert_tokens_snapshot(
        "10px 50% 1.5 +.5 -3e2 1e 0.0 -- 7",
        indoc! {r#"
            dimension: 10px
            percentage: 50%
            number: 1.5
            number: +.5
            number: -3e2
            dimension: 1e
            number: 0.0
            ident: --
            number: 7
        "#},
    );

    let (tokens, _) = collect_tokens("-3e2 12");
    let TokenKind::Number(numeric) = tokens[0].kind else {
        panic!("expected a number, got {:?}", tokens[0].kind);
    };
    assert_eq!(numeric.value, -300.0);
    assert!(!numeric.is_integer);
    let TokenKind::Number(numeric) = tokens[2].kind else {
        panic!("expected a number, got {:?}", tokens[2].kind);
    };
    assert_eq!(numeric.value, 12.0);
    assert!(numeric.is_integer);
}

#[test]
fn tokenize_hashes_and_cdo() {
    assert_tokens_snapshot(
        "<!-- @media #fff #1a @ -->",
        indoc! {r#"
            cdo: <!--
            at_keyword: @media
            id_hash: #fff
            hash: #1a
            delim: @
            cdc: -->
        "#},
    );
}

#[test]
fn tokenize_comments() {
    assert_tokens_snapshot(
        "/* block */a// line\nb",
        indoc! {r#"
            comment: /* block */
            ident: a
            comment: // line
            ident: b
        "#},
    );

    let tokenizer = Tokenizer::with_options(
        "/* block */a// line\nb",
        TokenizerOptions {
            line_comments: false,
        },
    );
    similar_asserts::assert_eq!(
        snapshot(tokenizer),
        indoc! {r#"
            comment: /* block */
            ident: a
            delim: /
            delim: /
            ident: line
            ident: b
        "#}
    );
}

#[test]
fn comment_bodies() {
    let (tokens, _) = collect_tokens("/* a */// b");
    assert_eq!(tokens[0].kind, TokenKind::Comment(" a "));
    assert_eq!(tokens[1].kind, TokenKind::Comment(" b"));
}

#[test]
fn tokenize_strings() {
    assert_tokens_snapshot(
        "'ok' \"bad\nnext 'esc\\'aped'",
        indoc! {r#"
            string: 'ok'
            bad_string: "bad
            ident: next
            string: 'esc\'aped'
        "#},
    );
    assert_eq!(
        lex_error_kinds("'ok' \"bad\nnext"),
        vec![LexErrorKind::BadString]
    );

    let (tokens, _) = collect_tokens("\"double\" 'single'");
    assert_eq!(
        tokens[0].kind,
        TokenKind::String {
            value: "double",
            quote: '"'
        }
    );
    assert_eq!(
        tokens[2].kind,
        TokenKind::String {
            value: "single",
            quote: '\''
        }
    );
}

#[test]
fn unterminated_string() {
    let (tokens, diagnostics) = collect_tokens("a { content: \"abc");
    assert_eq!(
        tokens[tokens.len() - 2].kind,
        TokenKind::String {
            value: "abc",
            quote: '"'
        }
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind(),
        &DiagnosticKind::Lex(LexErrorKind::UnterminatedString)
    );
    assert!(diagnostics[0].kind().is_fatal());
    assert_eq!(*diagnostics[0].range(), Range::new(13, 17));
}

#[test]
fn tokenize_urls() {
    assert_tokens_snapshot(
        indoc! {r#"
            url(  plain.png  ) url("quoted.png") url(a b) url(ok.png)
        "#},
        indoc! {r#"
            url: url(  plain.png  )
            function: url(
            string: "quoted.png"
            right_parenthesis: )
            bad_url: url(a b)
            url: url(ok.png)
        "#},
    );

    let (tokens, _) = collect_tokens("url(  plain.png  )");
    assert_eq!(tokens[0].kind, TokenKind::Url("plain.png"));
    assert_eq!(lex_error_kinds("url(a b)"), vec![LexErrorKind::BadUrl]);
}

#[test]
fn bad_escape_and_unterminated_comment() {
    assert_eq!(lex_error_kinds("a \\"), vec![LexErrorKind::BadEscape]);
    assert_eq!(
        lex_error_kinds("a /* never closed"),
        vec![LexErrorKind::UnterminatedComment]
    );
}

#[test]
fn yields_one_eof() {
    let tokens: Vec<_> = Tokenizer::new("").collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);

    let mut tokenizer = Tokenizer::new("a");
    assert_eq!(tokenizer.next().map(|t| t.kind), Some(TokenKind::Ident("a")));
    assert_eq!(tokenizer.next().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn reset_restarts_at_offset() {
    let mut tokenizer = Tokenizer::new("a b c");
    let tokens: Vec<_> = tokenizer.by_ref().collect();
    assert_eq!(tokens.len(), 6);

    tokenizer.reset(2);
    let token = tokenizer.next_token();
    assert_eq!(token.kind, TokenKind::Ident("b"));
    assert_eq!(token.range, Range::new(2, 3));
    assert_eq!(tokenizer.position(), 3);
    assert_eq!(tokenizer.count(), 3);
}

#[test]
fn null_is_replacement_character() {
    let (tokens, diagnostics) = collect_tokens("a\0b");
    assert!(diagnostics.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].raw, "a\0b");
}

#[test]
fn token_ranges_cover_input() {
    let input = "@media (min-width: 10px) { .a { color: red } }";
    let (tokens, _) = collect_tokens(input);
    let mut end = 0;
    for token in &tokens {
        assert_eq!(token.range.start, end);
        assert_eq!(&input[token.range.start as usize..token.range.end as usize], token.raw);
        end = token.range.end;
    }
    assert_eq!(end as usize, input.len());
}

#[test]
fn diagnostic_location() {
    let source = "a {\n  b: \\";
    let diagnostic = Diagnostic::new(
        Range::new(9, 10),
        DiagnosticKind::Lex(LexErrorKind::BadEscape),
    );
    assert_eq!(diagnostic.location(source), (2, 6));
    assert_eq!(
        diagnostic.to_string_with_location("style.css", source),
        "style.css:2:6: Invalid escape sequence"
    );
}
