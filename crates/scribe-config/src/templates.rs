//! Configuration templates for `scribe init`.
//!
//! Templates are stored as valid TOML files. The local template is written
//! verbatim; the global template is commented out so it changes nothing until
//! edited.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template.
pub fn local_template() -> String {
    LOCAL_TEMPLATE.to_string()
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn local_template_parses_as_valid_toml() {
        let config = parse_config(LOCAL_TEMPLATE).unwrap();
        assert_eq!(config.root, Some(true));
        let search = config.search.unwrap();
        assert_eq!(search.limit, Some(5));
    }

    #[test]
    fn global_template_parses_as_valid_toml() {
        let result = parse_config(GLOBAL_TEMPLATE);
        assert!(result.is_ok(), "global template failed to parse: {result:?}");
    }

    #[test]
    fn comment_template_preserves_existing_comments() {
        let input = "# This is a comment\nkey = \"value\"\n\n[section]\n";
        let output = comment_template(input);
        assert_eq!(
            output,
            "# This is a comment\n# key = \"value\"\n\n# [section]\n"
        );
    }

    #[test]
    fn commented_global_template_sets_nothing() {
        let config = parse_config(&global_template()).unwrap();
        assert!(config.index.is_none());
        assert!(config.search.is_none());
    }
}
