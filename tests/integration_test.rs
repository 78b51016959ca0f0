use css_transformer::transform;
use css_transformer::DiagnosticKind;
use css_transformer::LexErrorKind;
use css_transformer::Range;
use css_transformer::TransformError;
use css_transformer::TransformOptions;
use indoc::indoc;

const SAMPLE: &str = include_str!("../fixtures/sample.css");

fn options(minify: bool) -> TransformOptions {
    TransformOptions {
        filename: "sample.css".to_string(),
        minify,
        ..TransformOptions::default()
    }
}

fn run(input: &str, minify: bool) -> String {
    let output = transform(input.as_bytes(), &options(minify)).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    String::from_utf8(output.code).unwrap()
}

#[test]
fn sample_pretty() {
    similar_asserts::assert_eq!(
        run(SAMPLE, false),
        indoc! {r#"
            @charset "utf-8";

            @import url("reset.css") screen;

            .foo, .bar > .baz {
              background-image: url(img.png), url(test.jpg);
              max-height: fit-content(50%);
              margin: 0 auto;
              padding: 0.5em 1.25rem;
            }

            .foo:not(.baz) {
              color: #FFFFFF;
              background-color: rgb(255, 0, 0);
              border: 1px solid white;
              font: italic 12px / 1.5 "Helvetica Neue", Arial, sans-serif;
            }

            a[href^="http"]:hover::after {
              content: " (external)";
              text-decoration: underline solid currentcolor;
              text-transform: UPPERCASE;
            }

            :root {
              --accent: #06c;
              --spacing: calc( 1rem + 2px );
            }

            .card {
              color: var(--accent, navy);
              width: calc(100% - 2 * var(--spacing));
              transition: opacity 0.3s ease-in-out, transform 0.3s;
              -webkit-box-orient: vertical;
            }

            @media screen and (min-width: 768px), print {
              .foo {
                max-width: 720px !important;
              }

              @supports (display: grid) {
                .grid {
                  display: grid;
                  grid-template-columns: repeat(3, 1fr);
                }
              }
            }

            @font-face {
              font-family: "Sample";
              src: url(sample.woff2) format("woff2");
            }

            @keyframes spin {
              from {
                transform: rotate(0deg);
              }

              to {
                transform: rotate(360deg);
              }
            }
        "#}
    );
}

#[test]
fn sample_minified() {
    similar_asserts::assert_eq!(
        run(SAMPLE, true),
        concat!(
            r#"@charset "utf-8";@import url("reset.css") screen;"#,
            r#".foo,.bar>.baz{background-image:url(img.png),url(test.jpg);max-height:fit-content(50%);margin:0 auto;padding:.5em 1.25rem}"#,
            r#".foo:not(.baz){color:#fff;background-color:red;border:1px solid #fff;font:italic 12px/1.5 "Helvetica Neue",Arial,sans-serif}"#,
            r#"a[href^="http"]:hover::after{content:" (external)";text-decoration:underline;text-transform:uppercase}"#,
            r#":root{--accent:#06c;--spacing:calc( 1rem + 2px )}"#,
            r#".card{color:var(--accent,navy);width:calc(100% - 2*var(--spacing));transition:opacity .3s ease-in-out,transform .3s;-webkit-box-orient:vertical}"#,
            r#"@media screen and (min-width:768px),print{.foo{max-width:720px!important}@supports (display:grid){.grid{display:grid;grid-template-columns:repeat(3,1fr)}}}"#,
            r#"@font-face{font-family:"Sample";src:url(sample.woff2) format("woff2")}"#,
            r#"@keyframes spin{from{transform:rotate(0deg)}to{transform:rotate(360deg)}}"#,
        )
    );
}

#[test]
fn sample_drops_line_comment() {
    for minify in [false, true] {
        let css = run(SAMPLE, minify);
        assert!(!css.contains("border-top"));
        assert!(!css.contains("dotted"));
        assert!(!css.contains("Layout"));
    }
}

#[test]
fn sample_round_trips() {
    let pretty = run(SAMPLE, false);
    assert_eq!(run(&pretty, false), pretty);
    let minified = run(SAMPLE, true);
    assert_eq!(run(&minified, true), minified);
    assert_eq!(run(&pretty, true), minified);
}

#[test]
fn concurrent_transforms() {
    let expected = run(SAMPLE, true);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| run(SAMPLE, true)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn recoverable_errors_are_reported() {
    let output = transform(b".foo{color:;} .bar{margin:0}", &options(true)).unwrap();
    assert_eq!(String::from_utf8(output.code).unwrap(), ".foo{}.bar{margin:0}");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].kind(),
        &DiagnosticKind::InvalidDeclaration {
            message: "empty value"
        }
    );
}

#[test]
fn invalid_utf8() {
    let output = transform(b"/*\xff*/a{color:red}", &options(false)).unwrap();
    assert_eq!(String::from_utf8(output.code).unwrap(), "a {\n  color: red;\n}\n");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].kind(),
        &DiagnosticKind::Lex(LexErrorKind::InvalidUtf8)
    );
    assert_eq!(*output.diagnostics[0].range(), Range::new(2, 3));
}

#[test]
fn unterminated_string_fails() {
    let error = transform(b"a { content: \"abc", &options(false)).unwrap_err();
    let TransformError::UnterminatedString { offset, .. } = &error else {
        panic!("expected an unterminated string error, got {error:?}");
    };
    assert_eq!(*offset, 13);
    assert!(error
        .diagnostics()
        .iter()
        .any(|diagnostic| diagnostic.kind().is_fatal()));
    assert_eq!(error.to_string(), "Unterminated string starting at offset 13");
}

#[test]
fn nesting_too_deep_fails() {
    let input = "a{".repeat(200);
    let error = transform(input.as_bytes(), &options(false)).unwrap_err();
    assert!(matches!(
        error,
        TransformError::DepthExceeded { max_depth: 128, .. }
    ));
    assert_eq!(error.to_string(), "Maximum nesting depth of 128 exceeded");

    let options = TransformOptions {
        max_nesting_depth: 2,
        ..TransformOptions::default()
    };
    assert!(transform(b"@media print{.a{color:red}}", &options).is_ok());
    let error = transform(b"@media print{@supports (x:y){.a{color:red}}}", &options).unwrap_err();
    assert_eq!(error.diagnostics().len(), 1);
}

#[test]
fn line_comments_can_be_disabled() {
    let options = TransformOptions {
        line_comments: false,
        minify: true,
        ..TransformOptions::default()
    };
    let output = transform(b".a{// b: c;\ncolor:red}", &options).unwrap();
    assert_eq!(String::from_utf8(output.code).unwrap(), ".a{color:red}");
    assert_eq!(
        output.diagnostics[0].kind(),
        &DiagnosticKind::InvalidDeclaration {
            message: "expected a property name"
        }
    );
}
