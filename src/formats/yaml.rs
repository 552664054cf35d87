//! YAML-flavoured line rules for `configuration.yaml` style documents.
//!
//! Nothing here parses YAML. The rewriter only needs the `#` comment marker, column-zero
//! detection and a way to comment out a body line in place.

use crate::formats::Format;

/// Line rules for block-style YAML: `#` comments and `key: value` pairs.
pub struct YamlFormat;

impl Format for YamlFormat {
    fn comment_marker(&self) -> &'static str {
        "#"
    }

    fn comment_out(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return format!("# {line}");
        }
        let content = line.trim_start();
        let indentation = &line[..line.len() - content.len()];
        format!("{indentation}# {content}")
    }
}

#[cfg(test)]
#[path = "../tests/yaml.rs"]
mod tests;
