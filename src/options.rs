use serde::Deserialize;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Reject references to undeclared constants instead of falling back to the symbol's name.
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions { pretty: true }
    }
}

/// Contents of a `cfglang.toml` project file. Every section is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub parse: ParseOptions,
    pub output: OutputOptions,
}

impl ProjectConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("invalid project config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ProjectConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert!(!config.parse.strict);
        assert!(config.output.pretty);
    }

    #[test]
    fn sections_override_defaults() {
        let config = ProjectConfig::from_toml_str("[parse]\nstrict = true\n\n[output]\npretty = false\n").unwrap();
        assert!(config.parse.strict);
        assert!(!config.output.pretty);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = ProjectConfig::from_toml_str("[parse]\nstrict = 'yes'\n").unwrap_err();
        assert!(err.starts_with("invalid project config"));
    }
}
