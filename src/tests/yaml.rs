use super::YamlFormat;
use crate::formats::Format;

#[test]
fn test_comment_out_keeps_indentation() {
    assert_eq!(YamlFormat.comment_out("  old: x\n"), "  # old: x\n");
    assert_eq!(YamlFormat.comment_out("    - item\r\n"), "    # - item\r\n");
}

#[test]
fn test_comment_out_blank_line() {
    assert_eq!(YamlFormat.comment_out("\n"), "# \n");
    assert_eq!(YamlFormat.comment_out("   \n"), "#    \n");
}

#[test]
fn test_indented_comment_is_comment() {
    assert!(YamlFormat.is_comment("    # note\n"));
    assert!(YamlFormat.is_comment("# top\n"));
    assert!(!YamlFormat.is_comment("  key: '#'\n"));
}

#[test]
fn test_top_level_detection() {
    assert!(YamlFormat.is_top_level("other:\n"));
    assert!(YamlFormat.is_top_level("last_line_without_newline"));
    assert!(!YamlFormat.is_top_level("  nested: 1\n"));
    assert!(!YamlFormat.is_top_level("\ttabbed: 1\n"));
    // Blank lines never close a section
    assert!(!YamlFormat.is_top_level("\n"));
    assert!(!YamlFormat.is_top_level("\r\n"));
}
