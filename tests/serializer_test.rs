use css_transformer::serialize_css;
use css_transformer::transform;
use css_transformer::SerializerOptions;
use css_transformer::TransformOptions;
use indoc::indoc;

fn pretty(input: &str) -> String {
    let (css, diagnostics) = serialize_css(input, SerializerOptions::default()).unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    css
}

fn minified(input: &str) -> String {
    let (css, diagnostics) = serialize_css(input, SerializerOptions::minified()).unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    css
}

fn transform_minified(input: &str) -> String {
    let options = TransformOptions {
        minify: true,
        ..TransformOptions::default()
    };
    let output = transform(input.as_bytes(), &options).unwrap();
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    String::from_utf8(output.code).unwrap()
}

const RULES: &str = indoc! {r#"
    @charset "utf-8";
    .a,.b>c{color:red;margin:0 auto}
    @media screen{.a{color:blue}}
    @font-face{font-family:Foo}
"#};

#[test]
fn drops_last_semicolon_when_minified() {
    assert_eq!(transform_minified(".foo{color:blue;}"), ".foo{color:blue}");
    assert_eq!(minified(".foo{color:blue;}"), ".foo{color:blue}");
}

#[test]
fn pretty_output() {
    similar_asserts::assert_eq!(
        pretty(RULES),
        indoc! {r#"
            @charset "utf-8";

            .a, .b > c {
              color: red;
              margin: 0 auto;
            }

            @media screen {
              .a {
                color: blue;
              }
            }

            @font-face {
              font-family: Foo;
            }
        "#}
    );
}

#[test]
fn minified_output() {
    assert_eq!(
        minified(RULES),
        r#"@charset "utf-8";.a,.b>c{color:red;margin:0 auto}@media screen{.a{color:blue}}@font-face{font-family:Foo}"#
    );
}

#[test]
fn indent_width() {
    let options = SerializerOptions {
        minify: false,
        indent_width: 4,
    };
    let (css, _) = serialize_css("@media print{.a{color:red}}", options).unwrap();
    assert_eq!(css, "@media print {\n    .a {\n        color: red;\n    }\n}\n");
}

#[test]
fn empty_blocks() {
    assert_eq!(pretty(".a {}"), ".a {\n}\n");
    assert_eq!(minified(".a {}"), ".a{}");
    assert_eq!(pretty("@media print {}"), "@media print {\n}\n");
    assert_eq!(pretty(""), "");
    assert_eq!(minified("  /* only a comment */ "), "");
}

#[test]
fn numbers() {
    assert_eq!(
        minified("a { opacity: 0.50; margin: -0.5em 0px; width: calc(100% - 10px) }"),
        "a{opacity:.5;margin:-.5em 0px;width:calc(100% - 10px)}"
    );
    assert_eq!(
        pretty("a { opacity: 0.50; margin: -0.5em 0px }"),
        "a {\n  opacity: 0.5;\n  margin: -0.5em 0px;\n}\n"
    );
}

#[test]
fn large_and_precise_numbers() {
    assert_eq!(
        pretty(".a{z-index:2147483647}"),
        ".a {\n  z-index: 2147483647;\n}\n"
    );
    assert_eq!(minified(".a{z-index:2147483647}"), ".a{z-index:2147483647}");
    assert_eq!(
        transform_minified(".a{width:16777217px;line-height:1.23456789;margin:33.333333%}"),
        ".a{width:16777217px;line-height:1.23456789;margin:33.333333%}"
    );
}

#[test]
fn hex_colors() {
    assert_eq!(
        minified("a { color: #FFFFFF; background-color: #aabbcc; border-color: #ff0000 }"),
        "a{color:#fff;background-color:#abc;border-color:red}"
    );
    // Pretty output keeps colors as written.
    assert_eq!(
        pretty("a { color: #FFFFFF }"),
        "a {\n  color: #FFFFFF;\n}\n"
    );
    assert_eq!(minified("a{color:#12345678}"), "a{color:#12345678}");
    assert_eq!(minified("a{color:#aabbccdd}"), "a{color:#abcd}");
}

#[test]
fn color_functions() {
    assert_eq!(
        minified("a{color:rgb(255, 0, 0);background:rgba(0,0,0,0.5)}"),
        "a{color:red;background:rgba(0,0,0,.5)}"
    );
    assert_eq!(
        pretty("a{color:rgb(255, 0, 0)}"),
        "a {\n  color: rgb(255, 0, 0);\n}\n"
    );
    assert_eq!(minified("a{color:rgb(0 0 0 / 0)}"), "a{color:#0000}");
    assert_eq!(minified("a{color:hsl(120, 100%, 50%)}"), "a{color:lime}");
    assert_eq!(minified("a{color:rgb(var(--r), 0, 0)}"), "a{color:rgb(var(--r),0,0)}");
}

#[test]
fn named_colors_are_shortened() {
    assert_eq!(
        transform_minified("a{color:BLUE;border:1px solid white;background:var(--bg, navy)}"),
        "a{color:blue;border:1px solid #fff;background:var(--bg,navy)}"
    );
    assert_eq!(
        transform_minified("a{color:fuchsia;outline-color:#f00}"),
        "a{color:#f0f;outline-color:red}"
    );
    // Only color properties are rewritten.
    assert_eq!(transform_minified("a{font-family:white}"), "a{font-family:white}");
}

#[test]
fn text_properties_are_canonicalized() {
    assert_eq!(
        transform_minified(
            "a{text-transform:FULL-WIDTH UPPERCASE;text-decoration:underline solid currentcolor;white-space:NOWRAP}"
        ),
        "a{text-transform:uppercase full-width;text-decoration:underline;white-space:nowrap}"
    );
    assert_eq!(
        transform_minified(
            "a{text-decoration:none red;letter-spacing:normal;text-indent:2em each-line hanging;text-decoration-line:overline underline}"
        ),
        "a{text-decoration:none;letter-spacing:normal;text-indent:2em hanging each-line;text-decoration-line:underline overline}"
    );
    // Values outside the grammar are left alone.
    assert_eq!(
        transform_minified("a{text-transform:uppercase lowercase}"),
        "a{text-transform:uppercase lowercase}"
    );
}

#[test]
fn media_queries() {
    assert_eq!(
        transform_minified("@media screen and (max-width: 600px) { .a { color: red; } }"),
        "@media screen and (max-width:600px){.a{color:red}}"
    );
    assert_eq!(
        pretty("@media (min-width:1px) and (not (hover)){}"),
        "@media (min-width: 1px) and (not (hover)) {\n}\n"
    );
}

#[test]
fn unknown_values_are_kept_verbatim() {
    let input = ".a { -webkit-foo:  bar   baz ; --x: { a: b }; zoom: 1 }";
    assert_eq!(
        pretty(input),
        ".a {\n  -webkit-foo: bar   baz;\n  --x: { a: b };\n  zoom: 1;\n}\n"
    );
    assert_eq!(minified(input), ".a{-webkit-foo:bar   baz;--x:{ a: b };zoom:1}");
}

#[test]
fn empty_custom_properties() {
    assert_eq!(pretty(":root{--empty:;}"), ":root {\n  --empty:;\n}\n");
    assert_eq!(minified(":root{--empty:;}"), ":root{--empty:}");
    assert_eq!(
        minified("a{color:var(--missing,)}"),
        "a{color:var(--missing,)}"
    );
}

#[test]
fn important() {
    assert_eq!(
        pretty("a{color:red!important}"),
        "a {\n  color: red !important;\n}\n"
    );
    assert_eq!(minified("a{color:red ! important}"), "a{color:red!important}");
}

#[test]
fn urls() {
    assert_eq!(
        minified(r#"a{background:url( "a b.png" );cursor:url(x.cur),auto}"#),
        r#"a{background:url("a b.png");cursor:url(x.cur),auto}"#
    );
    assert_eq!(
        minified(r#"a{background-image:url('say "hi".png')}"#),
        r#"a{background-image:url('say "hi".png')}"#
    );
}

#[test]
fn selectors() {
    assert_eq!(
        minified("ul  >  li:first-child ,  a[target=_blank]::before {}"),
        "ul>li:first-child,a[target=_blank]::before{}"
    );
    assert_eq!(
        pretty(".a:nth-child( 2n + 1 ) {}"),
        ".a:nth-child(2n + 1) {\n}\n"
    );
    assert_eq!(minified(".a:nth-child( 2n + 1 ) {}"), ".a:nth-child(2n + 1){}");
}

#[test]
fn signed_numbers_in_selector_arguments() {
    assert_eq!(
        transform_minified("li:nth-child(2n+1){color:red}"),
        "li:nth-child(2n+1){color:red}"
    );
    assert_eq!(minified("li:nth-child(-n+3){}"), "li:nth-child(-n+3){}");
    assert_eq!(minified("li:nth-of-type(+5){}"), "li:nth-of-type(+5){}");
    assert_eq!(pretty("li:nth-child(2n+1) {}"), "li:nth-child(2n+1) {\n}\n");
    assert_eq!(
        minified("@supports (margin:+0.5em){}"),
        "@supports (margin:+.5em){}"
    );
}

#[test]
fn pretty_output_round_trips() {
    let input = indoc! {r#"
        @import url("x.css") print;
        .a > b:hover, #c { margin: 0 auto; font: italic 12px/1.5 "Helvetica Neue", serif }
        @media (min-width: 10px) { .d { color: rgba(0, 0, 0, 0.5) !important } }
        @keyframes k { 0% { opacity: 0 } 100% { opacity: 1 } }
    "#};
    let once = pretty(input);
    assert_eq!(pretty(&once), once);
    let once = minified(input);
    assert_eq!(minified(&once), once);
}

#[test]
fn minify_is_idempotent() {
    let input = indoc! {r#"
        .a { color: WHITE; border: 1px solid #FF0000; text-transform: FULL-WIDTH; }
        .b { padding: 0.50em; width: calc(100% - 2 * var(--gap, 4px)) }
    "#};
    let once = transform_minified(input);
    assert_eq!(
        once,
        ".a{color:#fff;border:1px solid red;text-transform:full-width}.b{padding:.5em;width:calc(100% - 2*var(--gap,4px))}"
    );
    assert_eq!(transform_minified(&once), once);
}
