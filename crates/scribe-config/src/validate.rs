//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use globset::Glob;

use crate::{Config, SUPPORTED_STEMMERS};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// A fuzziness value lies outside `[0, 1]`.
    FuzzinessOutOfRange {
        /// Name of the setting.
        setting: &'static str,
        /// Configured value.
        value: f32,
    },
    /// The fallback tier is stricter than the precise tier.
    FallbackStricterThanPrimary,
    /// The default result limit is zero.
    ZeroLimit,
    /// No source extensions are configured.
    NoSourceExtensions,
    /// No target extensions are configured.
    NoTargetExtensions,
    /// An extension is listed as both source and target.
    OverlappingExtension {
        /// The shared extension.
        extension: String,
    },
    /// The stemmer is not a supported language.
    UnknownStemmer {
        /// Configured stemmer name.
        name: String,
    },
    /// An exclude pattern does not compile.
    InvalidExcludePattern {
        /// The offending pattern.
        pattern: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FuzzinessOutOfRange { setting, value } => {
                write!(f, "search.{setting} = {value} is outside the range 0.0-1.0")
            }
            Self::FallbackStricterThanPrimary => {
                write!(f, "search.fallback_fuzziness is lower than search.fuzziness")
            }
            Self::ZeroLimit => write!(f, "search.limit is 0; queries will return nothing"),
            Self::NoSourceExtensions => write!(f, "index.source_extensions is empty"),
            Self::NoTargetExtensions => write!(f, "index.target_extensions is empty"),
            Self::OverlappingExtension { extension } => {
                write!(
                    f,
                    "extension '{extension}' is listed as both source and target"
                )
            }
            Self::UnknownStemmer { name } => write!(f, "unsupported stemmer language: {name}"),
            Self::InvalidExcludePattern { pattern } => {
                write!(f, "exclude pattern '{pattern}' is not a valid glob")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let search = &config.search;
    let index = &config.index;

    for (setting, value) in [
        ("fuzziness", search.fuzziness),
        ("fallback_fuzziness", search.fallback_fuzziness),
    ] {
        if !(0.0..=1.0).contains(&value) {
            warnings.push(ConfigWarning::FuzzinessOutOfRange { setting, value });
        }
    }
    if search.fallback_fuzziness < search.fuzziness {
        warnings.push(ConfigWarning::FallbackStricterThanPrimary);
    }
    if search.limit == 0 {
        warnings.push(ConfigWarning::ZeroLimit);
    }

    if index.source_extensions.is_empty() {
        warnings.push(ConfigWarning::NoSourceExtensions);
    }
    if index.target_extensions.is_empty() {
        warnings.push(ConfigWarning::NoTargetExtensions);
    }
    for ext in &index.source_extensions {
        if index
            .target_extensions
            .iter()
            .any(|t| t.eq_ignore_ascii_case(ext))
        {
            warnings.push(ConfigWarning::OverlappingExtension {
                extension: ext.clone(),
            });
        }
    }

    if !SUPPORTED_STEMMERS.contains(&index.stemmer.to_lowercase().as_str()) {
        warnings.push(ConfigWarning::UnknownStemmer {
            name: index.stemmer.clone(),
        });
    }

    for pattern in &index.exclude {
        if Glob::new(pattern).is_err() {
            warnings.push(ConfigWarning::InvalidExcludePattern {
                pattern: pattern.clone(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn reports_out_of_range_fuzziness() {
        let mut config = Config::default();
        config.search.fuzziness = 1.5;
        config.search.fallback_fuzziness = 2.0;

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::FuzzinessOutOfRange {
            setting: "fuzziness",
            value: 1.5,
        }));
        assert!(warnings.contains(&ConfigWarning::FuzzinessOutOfRange {
            setting: "fallback_fuzziness",
            value: 2.0,
        }));
    }

    #[test]
    fn reports_inverted_tiers() {
        let mut config = Config::default();
        config.search.fuzziness = 0.4;
        config.search.fallback_fuzziness = 0.1;

        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::FallbackStricterThanPrimary]
        );
    }

    #[test]
    fn reports_extension_problems() {
        let mut config = Config::default();
        config.index.source_extensions = vec!["source".into(), "codex".into()];
        config.index.target_extensions = vec!["CODEX".into()];

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::OverlappingExtension {
            extension: "codex".into()
        }));

        config.index.target_extensions.clear();
        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::NoTargetExtensions));
    }

    #[test]
    fn reports_unknown_stemmer_and_bad_glob() {
        let mut config = Config::default();
        config.index.stemmer = "klingon".into();
        config.index.exclude = vec!["[broken".into()];
        config.search.limit = 0;

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::UnknownStemmer {
            name: "klingon".into()
        }));
        assert!(warnings.contains(&ConfigWarning::InvalidExcludePattern {
            pattern: "[broken".into()
        }));
        assert!(warnings.contains(&ConfigWarning::ZeroLimit));
    }

    #[test]
    fn stemmer_names_are_case_insensitive() {
        let mut config = Config::default();
        config.index.stemmer = "French".into();
        assert!(validate_config(&config).is_empty());
    }
}
