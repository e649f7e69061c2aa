use lite_template::encoder::encode;

fn enc(s: &str) -> Option<String> {
    encode(s, "[", "]")
}

fn wrapped(s: &str) -> Option<String> {
    Some(format!("[{s}]"))
}

#[test]
fn whole_placeholders_pass_through() {
    for s in [
        "${a}",
        "${`${a}`}",
        "${`${{}}`}",
        "${`a`}",
        "${'a'}",
        "${\"a\"}",
        "${{}}",
        "${item.foo + `x${item.bar}y`}",
        "${`\\``}",
    ] {
        assert_eq!(enc(s).as_deref(), Some(s), "{s}");
    }
}

#[test]
fn mixed_content_is_wrapped() {
    assert_eq!(enc("a"), wrapped("a"));
    assert_eq!(enc("$"), wrapped("$"));
    assert_eq!(enc("$$"), wrapped("$$"));
    assert_eq!(enc("\\`"), wrapped("\\`"));
    assert_eq!(enc("foo ${item.bar}"), wrapped("foo ${item.bar}"));
    assert_eq!(enc("${item.foo} ${item.bar}"), wrapped("${item.foo} ${item.bar}"));
    assert_eq!(enc("${a}${b}"), wrapped("${a}${b}"));
    assert_eq!(enc(""), wrapped(""));
}

#[test]
fn top_level_backtick_is_escaped() {
    assert_eq!(enc("`"), wrapped("\\`"));
    assert_eq!(enc("a`${b}`"), wrapped("a\\`${b}\\`"));
}

#[test]
fn unbalanced_input_is_rejected() {
    for s in [
        "${", "${a", "${{", "${'a}", "${a'}", "${\"a}", "${a\"}", "${`a}", "${a`}", "${'}",
        "${\"}", "${`}", "\\",
    ] {
        assert_eq!(enc(s), None, "{s}");
    }
}

#[test]
fn quotes_do_not_process_escapes() {
    // a backslash does not keep the quote open
    assert_eq!(enc("${'a\\'}").as_deref(), Some("${'a\\'}"));
    assert_eq!(enc("${\"a\\\"}").as_deref(), Some("${\"a\\\"}"));
    assert_eq!(enc("${'a\\'}'}"), wrapped("${'a\\'}'}"));
}

#[test]
fn trailing_text_after_placeholder_is_wrapped() {
    assert_eq!(enc("${a} tail"), wrapped("${a} tail"));
    assert_eq!(enc("${a}}"), wrapped("${a}}"));
}
