use std::path::{Path, PathBuf};

use rackmap_core::{LayoutConfig, ParseOptions, SourceFormat};
use rackmap_loader::SourceRef;
use serde::Deserialize;

use crate::error::ToolError;

pub const SOURCE_ENV: &str = "RACKMAP_SOURCE";

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default export to load when none is given on the command line.
    pub source: Option<SourceRef>,
    pub log_level: Option<String>,
    pub include_height_zero: bool,
    pub format: SourceFormat,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Command-line values win over the config file.
    pub fn parse_options(&self, format: Option<SourceFormat>, include_height_zero: bool) -> ParseOptions {
        ParseOptions {
            format: format.unwrap_or(self.format),
            include_height_zero: include_height_zero || self.include_height_zero,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rackmap").join("config.toml"))
}

/// Reads the config file.
///
/// An explicitly given path must exist and parse. The default location is
/// optional and falls back to defaults when missing or invalid.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ToolError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|source| ToolError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        return toml::from_str(&content).map_err(|source| ToolError::Config {
            path: path.to_path_buf(),
            source,
        });
    }

    let Some(path) = config_path() else {
        return Ok(Config::default());
    };

    let Ok(content) = std::fs::read_to_string(path) else {
        return Ok(Config::default());
    };

    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Picks the source to load: command line, then environment, then config.
pub fn resolve_source(cli: Option<SourceRef>, config: &Config) -> Option<SourceRef> {
    let env = std::env::var(SOURCE_ENV).ok();
    resolve_source_from(cli, env, config)
}

fn resolve_source_from(
    cli: Option<SourceRef>,
    env: Option<String>,
    config: &Config,
) -> Option<SourceRef> {
    cli.or_else(|| {
        env.filter(|s| !s.trim().is_empty())
            .and_then(|s| s.parse().ok())
    })
    .or_else(|| config.source.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rackmap_core::Axis;
    use std::io::Write;

    #[test]
    fn test_partial_layout_overrides() {
        let config: Config = toml::from_str(
            r#"
            source = "https://example.com/Location.txt"
            format = "materials"

            [layout]
            box_width = 80
            axis = "aisle_rows"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.source,
            Some(SourceRef::Url("https://example.com/Location.txt".to_string()))
        );
        assert_eq!(config.format, SourceFormat::Materials);
        assert_eq!(config.layout.box_width, 80);
        assert_eq!(config.layout.box_height, LayoutConfig::default().box_height);
        assert_eq!(config.layout.axis, Axis::AisleRows);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_options_precedence() {
        let config = Config {
            format: SourceFormat::Codes,
            include_height_zero: true,
            ..Default::default()
        };
        let options = config.parse_options(Some(SourceFormat::Materials), false);
        assert_eq!(options.format, SourceFormat::Materials);
        assert!(options.include_height_zero);

        let options = Config::default().parse_options(None, false);
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn test_source_precedence() {
        let config = Config {
            source: Some(SourceRef::File("from-config.txt".into())),
            ..Default::default()
        };
        let cli = Some(SourceRef::File("from-cli.txt".into()));

        assert_eq!(
            resolve_source_from(cli.clone(), Some("from-env.txt".to_string()), &config),
            cli
        );
        assert_eq!(
            resolve_source_from(None, Some("from-env.txt".to_string()), &config),
            Some(SourceRef::File("from-env.txt".into()))
        );
        assert_eq!(
            resolve_source_from(None, Some("  ".to_string()), &config),
            config.source
        );
        assert_eq!(resolve_source_from(None, None, &Config::default()), None);
    }

    #[test]
    fn test_explicit_config_must_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"layout = 3").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ToolError::Config { .. }));

        let err = load_config(Some(Path::new("/nonexistent/rackmap.toml"))).unwrap_err();
        assert!(matches!(err, ToolError::ReadConfig { .. }));
        assert!(err.to_string().contains("/nonexistent/rackmap.toml"));
    }

    #[test]
    fn test_explicit_config_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"log_level = \"debug\"\ninclude_height_zero = true\n").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert!(config.include_height_zero);
    }
}
