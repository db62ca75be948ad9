//! Optional user configuration, read from `$XDG_CONFIG_HOME/git-tint/config.yaml`.

use std::{collections::BTreeMap, env, fs, io, path::{Path, PathBuf}};

use anyhow::{Context, Result, anyhow};
use colored::Color;
use serde::Deserialize;

use crate::render::DEFAULT_TAG_WIDTH;

/// Environment variable naming a config file to use instead of the XDG one.
pub const CONFIG_ENV: &str = "GIT_TINT_CONFIG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn apply(self) {
        match self {
            ColorMode::Auto => {}
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub color: ColorMode,
    pub status: StatusConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusConfig {
    /// Request ignored entries from git by default.
    pub show_ignored: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Output width; the terminal width when unset.
    pub width: Option<usize>,
    pub tag_width: usize,
    /// Fixed colors for some tags, by color name (e.g. `bright red`).
    pub tags: BTreeMap<String, String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            width: None,
            tag_width: DEFAULT_TAG_WIDTH,
            tags: BTreeMap::new(),
        }
    }
}

impl LogConfig {
    pub fn preset_tags(&self) -> Result<Vec<(String, Color)>> {
        self.tags
            .iter()
            .map(|(tag, name)| {
                let color = name
                    .parse::<Color>()
                    .map_err(|_| anyhow!("unknown color {name:?} for tag {tag:?}"))?;
                Ok((tag.clone(), color))
            })
            .collect()
    }
}

pub fn parse_config(data: &str) -> Result<Config> {
    if data.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(data)?)
}

/// Load the config from `explicit`, then `$GIT_TINT_CONFIG`, then the XDG
/// config directory. Only the XDG file may be missing.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = explicit {
        return read_config(&path);
    }

    let Some(path) = default_config_path() else {
        tracing::debug!("No config directory found, using defaults");
        return Ok(Config::default());
    };
    match read_config(&path) {
        Err(error)
            if error
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::NotFound) =>
        {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
        result => result,
    }
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!("Reading config from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse_config(&data).with_context(|| format!("parsing config file {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    let base_dirs = xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));
    base_dirs.get_config_file("config.yaml")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.color, ColorMode::Auto);
        assert!(!config.status.show_ignored);
        assert_eq!(config.log.tag_width, DEFAULT_TAG_WIDTH);
        assert_eq!(config.log.width, None);
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            "color: never\n\
             status:\n  show_ignored: true\n\
             log:\n  width: 120\n  tag_width: 12\n  tags:\n    BOOT: bright red\n    net: cyan\n",
        )
        .unwrap();
        assert_eq!(config.color, ColorMode::Never);
        assert!(config.status.show_ignored);
        assert_eq!(config.log.width, Some(120));
        assert_eq!(config.log.tag_width, 12);
        assert_eq!(
            config.log.preset_tags().unwrap(),
            vec![
                ("BOOT".to_string(), Color::BrightRed),
                ("net".to_string(), Color::Cyan),
            ]
        );
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("log:\n  width: 80\n").unwrap();
        assert_eq!(config.log.width, Some(80));
        assert_eq!(config.log.tag_width, DEFAULT_TAG_WIDTH);
    }

    #[test]
    fn test_unknown_color_is_an_error() {
        let config = parse_config("log:\n  tags:\n    net: chartreuse\n").unwrap();
        let error = config.log.preset_tags().unwrap_err();
        assert!(error.to_string().contains("chartreuse"), "{error}");
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        assert!(parse_config("colour: always\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "color: always\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().color, ColorMode::Always);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_err());
    }
}
