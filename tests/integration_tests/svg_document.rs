use assertables::{assert_contains, assert_not_contains};
use pathsplit::{split_str_default, SkipReason, TagStatus};

#[test]
fn test_roundtrip_unchanged() {
    let input = r##"<?xml version="1.0" encoding="UTF-8"?>
<!-- single subpath paths are left alone -->
<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">
  <path d="M10,10 L20,20 Z" fill="#ff0000"/>
  <path d="M 30 30 h 10 v 10 h -10 z"/>
  <rect x="1" y="2" width="3" height="4"/>
</svg>
"##;
    let report = split_str_default(input).unwrap();
    assert_eq!(report.output, None);
    assert_eq!(report.tags.len(), 2);
    assert!(report.tags.iter().all(|t| t.status == TagStatus::Unchanged));
}

#[test]
fn test_split_keeps_other_attributes() {
    let input = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <path id="p1" class="shape" d="M0,0h5v5z m10,0h5v5z" stroke="#000" stroke-width="0.5"/>
</svg>"##;
    let expected = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <path id="p1" class="shape" d="M0,0h5v5z" stroke="#000" stroke-width="0.5"/>
  <path id="p1" class="shape" d="M10,0h5v5z" stroke="#000" stroke-width="0.5"/>
</svg>"##;
    let report = split_str_default(input).unwrap();
    assert_eq!(report.output.as_deref(), Some(expected));
    assert_eq!(report.tags[0].line, 2);
}

#[test]
fn test_split_relative_moves() {
    let input = r#"<path d="m10,10 h5 v5 h-5 z m10,0 h5 v5 h-5 z m10,0 5,5 -5,0 z"/>"#;
    let output = split_str_default(input).unwrap().output.unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        [
            r#"<path d="m10,10 h5 v5 h-5 z"/>"#,
            r#"<path d="M20,10 h5 v5 h-5 z"/>"#,
            r#"<path d="M30,10l5,5 -5,0 z"/>"#,
        ]
    );
}

#[test]
fn test_split_negative_prefix() {
    let input = r#"<path d="M-5,-5h1z m-1,-1h1"/>"#;
    let output = split_str_default(input).unwrap().output.unwrap();
    assert_contains!(output, r#"<path d="M-6-6h1"/>"#);
}

#[test]
fn test_split_exact_decimals() {
    let input = r#"<path d="M0.1,0.2h1zm0.2,0.1h1"/>"#;
    let output = split_str_default(input).unwrap().output.unwrap();
    assert_contains!(output, r#"<path d="M0.3,0.3h1"/>"#);
    assert_not_contains!(output, "0.30000000000000004");
}

#[test]
fn test_nested_and_multiline_elements() {
    let input = "<svg>\n  <g transform=\"scale(2)\">\n    <path\n      d=\"M0,0h1zM2,2h1z\"\n      fill=\"none\"/>\n  </g>\n</svg>";
    let expected = "<svg>\n  <g transform=\"scale(2)\">\n    <path\n      d=\"M0,0h1z\"\n      fill=\"none\"/>\n    <path\n      d=\"M2,2h1z\"\n      fill=\"none\"/>\n  </g>\n</svg>";
    let report = split_str_default(input).unwrap();
    assert_eq!(report.output.as_deref(), Some(expected));
    assert_eq!(report.tags[0].line, 3);
}

#[test]
fn test_comment_and_container_paths_untouched() {
    let input = r#"<svg>
<!-- <path d="M0,0zM1,1z"/> -->
<path d="M0,0zM1,1z"><title>kept</title></path>
<path d="M0,0zM1,1z"/>
</svg>"#;
    let output = split_str_default(input).unwrap().output.unwrap();
    assert_contains!(output, r#"<!-- <path d="M0,0zM1,1z"/> -->"#);
    assert_contains!(output, r#"<path d="M0,0zM1,1z"><title>kept</title></path>"#);
    assert_contains!(output, "<path d=\"M0,0z\"/>\n<path d=\"M1,1z\"/>\n</svg>");
}

#[test]
fn test_fill_rule_skip() {
    let input = r#"<svg><path fill-rule="evenodd" d="M0,0h9v9zM3,3h3v3z"/><path d="M0,0zM1,1z"/></svg>"#;
    let report = split_str_default(input).unwrap();
    assert_eq!(
        report.tags[0].status,
        TagStatus::Skipped(SkipReason::EvenOddFill)
    );
    assert_eq!(report.tags[1].status, TagStatus::Split(2));
    assert_contains!(
        report.output.unwrap(),
        r#"<path fill-rule="evenodd" d="M0,0h9v9zM3,3h3v3z"/>"#
    );
}

#[test]
fn test_malformed_document() {
    assert!(split_str_default("<svg><path d=\"M0,0zM1,1z\"/></g>").is_err());
    assert!(split_str_default("<svg><path d=\"M0,0zM1,1z/></svg>").is_err());
}
