use ticket_core::{Properties, PropertiesError};

#[test]
fn stored_file_roundtrips_awkward_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.properties");

    let mut props = Properties::new();
    props.set("plain", "value");
    props.set("with space", "a=b:c");
    props.set("leading", "  padded");
    props.set("multi", "line one\nline two");
    props.set("slash", r"C:\tickets\");
    props.set("accent", "fracción");
    props.set("#not-a-comment", "!");
    props.store(&path, Some("header line")).unwrap();

    let loaded = Properties::load(&path).unwrap();
    assert_eq!(loaded, props);
}

#[test]
fn parse_handles_java_style_syntax() {
    let text = "\
# comment
   ! another comment
key1=value1
key2 = value2
key3:value3
key4 value4
key5\\
    continued=yes
key6=\\u0041\\tB
empty=
key1=override
";

    let props = Properties::parse(text).unwrap();
    assert_eq!(props.get("key1"), Some("override"));
    assert_eq!(props.get("key2"), Some("value2"));
    assert_eq!(props.get("key3"), Some("value3"));
    assert_eq!(props.get("key4"), Some("value4"));
    assert_eq!(props.get("key5continued"), Some("yes"));
    assert_eq!(props.get("key6"), Some("A\tB"));
    assert_eq!(props.get("empty"), Some(""));
    assert_eq!(props.len(), 7);
}

#[test]
fn parse_reports_line_of_bad_unicode_escape() {
    let err = Properties::parse("ok=1\nbad=\\u12G4\n").unwrap_err();
    match err {
        PropertiesError::Malformed { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("unicode"), "unexpected message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_is_written_as_comment() {
    let mut props = Properties::new();
    props.set("k", "v");
    assert_eq!(
        props.to_string_with_header(Some("first\nsecond")),
        "#first\n#second\nk=v\n"
    );
    assert_eq!(props.to_string_with_header(None), "k=v\n");
}
