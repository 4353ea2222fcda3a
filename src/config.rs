//! Run configuration.
//!
//! Two sources feed the settings of a bake run:
//!
//! 1. **Build arguments** forwarded from the host build:
//!    `--social:baseurl=<url>` and `-c`/`--configuration <name>`.
//! 2. **`social.toml`** (optional), next to the project or passed with `--config`.
//!
//! Both are resolved once, at the start of the run, into a [`RunConfig`] that
//! is passed down to every stage. Nothing below the driver looks at arguments
//! or files for settings.
//!
//! ## Base URL Resolution
//!
//! ```text
//! --social:baseurl=<url>     → used as given
//! social.toml base_url       → used when the argument is absent
//! neither, release build     → ConfigError::MissingBaseUrl (fatal)
//! neither, any other build   → "/"
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # base_url = "https://example.com"
//!
//! [strip]
//! twitter = false           # Also strip <meta name="twitter:*"> tags
//!
//! [processing]
//! max_processes = 4         # Max parallel writers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::strip::StripOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Prefix of the build argument carrying the base URL.
pub const BASE_URL_ARG: &str = "--social:baseurl=";

/// Configuration assumed when the build passes none.
pub const DEFAULT_CONFIGURATION: &str = "debug";

/// Base URL used outside release builds when none is supplied.
pub const DEFAULT_BASE_URL: &str = "/";

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "social.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error(
        "Base URL is required in release configuration (pass --social:baseurl=<url> or set base_url in social.toml)"
    )]
    MissingBaseUrl,
}

/// Settings loaded from `social.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    /// Fallback base URL when the build arguments carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional tag families to strip.
    pub strip: StripConfig,
    /// Parallel output settings.
    pub processing: ProcessingConfig,
}

impl SocialConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .base_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "base_url must not be empty (remove the key to use the default)".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Optional stripping of tag families the generator does not emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    /// Strip `<meta name="twitter:*">` tags from the shell.
    pub twitter: bool,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of pages written in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load and validate a `social.toml`.
///
/// A missing file yields the defaults; a present but malformed one is an error.
pub fn load_config(path: &Path) -> Result<SocialConfig, ConfigError> {
    if !path.exists() {
        return Ok(SocialConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: SocialConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `social.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# og-bake Configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Base URL of the published site, used for canonical and og:url links.
# The --social:baseurl=<url> build argument takes precedence.
# Required (here or as an argument) for release builds.
# base_url = "https://example.com"

[strip]
# Also remove <meta name="twitter:*"> tags from the shell before baking.
twitter = false

[processing]
# Maximum number of pages written in parallel.
# Omit to use all CPU cores; 1 writes pages one at a time.
# max_processes = 4
"##
}

// =============================================================================
// Build argument parsing
// =============================================================================

/// Value of the first `--social:baseurl=` argument, if non-empty.
pub fn base_url_from_args(args: &[String]) -> Option<String> {
    args.iter()
        .find_map(|arg| arg.strip_prefix(BASE_URL_ARG))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Build configuration named by `-c`/`--configuration`, lowercased.
///
/// Defaults to `debug` when the flag is absent or has no value.
pub fn configuration_from_args(args: &[String]) -> String {
    for (i, arg) in args.iter().enumerate() {
        if arg == "-c" || arg == "--configuration" {
            return args
                .get(i + 1)
                .map(|value| value.to_lowercase())
                .unwrap_or_else(|| DEFAULT_CONFIGURATION.to_string());
        }
        if let Some(value) = arg.strip_prefix("--configuration=") {
            return value.to_lowercase();
        }
    }
    DEFAULT_CONFIGURATION.to_string()
}

/// Fully resolved settings for one bake run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Base URL as supplied (trailing slashes are trimmed where it is used).
    pub base_url: String,
    /// Lowercased build configuration name.
    pub configuration: String,
    pub strip: StripOptions,
    /// Worker count for the per-page loop; 1 means sequential.
    pub threads: usize,
}

impl RunConfig {
    /// Resolve the run settings from build arguments and the config file.
    pub fn resolve(args: &[String], file: &SocialConfig) -> Result<RunConfig, ConfigError> {
        let configuration = configuration_from_args(args);
        let supplied = base_url_from_args(args).or_else(|| file.base_url.clone());

        let base_url = match supplied {
            Some(url) => url,
            None if configuration == "release" => return Err(ConfigError::MissingBaseUrl),
            None => DEFAULT_BASE_URL.to_string(),
        };

        Ok(RunConfig {
            base_url,
            configuration,
            strip: StripOptions {
                twitter: file.strip.twitter,
            },
            threads: effective_threads(&file.processing),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::args;
    use tempfile::TempDir;

    // =========================================================================
    // Argument parsing
    // =========================================================================

    #[test]
    fn base_url_read_from_argument() {
        let a = args(&["build", "--social:baseurl=https://ex.com"]);
        assert_eq!(base_url_from_args(&a).as_deref(), Some("https://ex.com"));
    }

    #[test]
    fn base_url_keeps_query_equals_signs() {
        let a = args(&["--social:baseurl=https://ex.com/?a=b"]);
        assert_eq!(
            base_url_from_args(&a).as_deref(),
            Some("https://ex.com/?a=b")
        );
    }

    #[test]
    fn empty_base_url_argument_is_absent() {
        let a = args(&["--social:baseurl="]);
        assert_eq!(base_url_from_args(&a), None);
    }

    #[test]
    fn configuration_defaults_to_debug() {
        assert_eq!(configuration_from_args(&args(&["build"])), "debug");
    }

    #[test]
    fn configuration_short_flag_lowercased() {
        assert_eq!(configuration_from_args(&args(&["-c", "Release"])), "release");
    }

    #[test]
    fn configuration_long_flag() {
        let a = args(&["build", "--configuration", "RELEASE"]);
        assert_eq!(configuration_from_args(&a), "release");
    }

    #[test]
    fn configuration_long_flag_with_equals() {
        let a = args(&["--configuration=Staging"]);
        assert_eq!(configuration_from_args(&a), "staging");
    }

    #[test]
    fn configuration_flag_without_value_is_debug() {
        assert_eq!(configuration_from_args(&args(&["-c"])), "debug");
    }

    // =========================================================================
    // RunConfig resolution
    // =========================================================================

    #[test]
    fn release_without_base_url_is_error() {
        let result = RunConfig::resolve(&args(&["-c", "release"]), &SocialConfig::default());
        assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn release_with_base_url_resolves() {
        let a = args(&["-c", "release", "--social:baseurl=https://ex.com/"]);
        let config = RunConfig::resolve(&a, &SocialConfig::default()).unwrap();
        assert_eq!(config.base_url, "https://ex.com/");
        assert_eq!(config.configuration, "release");
    }

    #[test]
    fn debug_without_base_url_defaults_to_root() {
        let config = RunConfig::resolve(&args(&[]), &SocialConfig::default()).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.configuration, "debug");
    }

    #[test]
    fn non_release_configuration_defaults_to_root() {
        let a = args(&["-c", "staging"]);
        let config = RunConfig::resolve(&a, &SocialConfig::default()).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.configuration, "staging");
    }

    #[test]
    fn config_file_base_url_satisfies_release() {
        let file = SocialConfig {
            base_url: Some("https://from-file.com".into()),
            ..Default::default()
        };
        let config = RunConfig::resolve(&args(&["-c", "release"]), &file).unwrap();
        assert_eq!(config.base_url, "https://from-file.com");
    }

    #[test]
    fn argument_beats_config_file() {
        let file = SocialConfig {
            base_url: Some("https://from-file.com".into()),
            ..Default::default()
        };
        let a = args(&["--social:baseurl=https://from-arg.com"]);
        let config = RunConfig::resolve(&a, &file).unwrap();
        assert_eq!(config.base_url, "https://from-arg.com");
    }

    #[test]
    fn strip_options_follow_config_file() {
        let file = SocialConfig {
            strip: StripConfig { twitter: true },
            ..Default::default()
        };
        let config = RunConfig::resolve(&args(&[]), &file).unwrap();
        assert!(config.strip.twitter);
        assert!(!RunConfig::resolve(&args(&[]), &SocialConfig::default())
            .unwrap()
            .strip
            .twitter);
    }

    #[test]
    fn threads_clamped_to_request() {
        let file = SocialConfig {
            processing: ProcessingConfig {
                max_processes: Some(1),
            },
            ..Default::default()
        };
        let config = RunConfig::resolve(&args(&[]), &file).unwrap();
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn effective_threads_never_exceeds_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(cores + 10),
        };
        assert_eq!(effective_threads(&config), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    // =========================================================================
    // social.toml loading
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, SocialConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
base_url = "https://ex.com"

[processing]
max_processes = 2
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://ex.com"));
        assert_eq!(config.processing.max_processes, Some(2));
        assert!(!config.strip.twitter);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "baseurl = \"https://typo.com\"\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_base_url_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "base_url = \"\"\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_max_processes_rejected() {
        let config = SocialConfig {
            processing: ProcessingConfig {
                max_processes: Some(0),
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SocialConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SocialConfig::default());
    }
}
