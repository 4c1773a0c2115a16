// src/config/service.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config/req2uml.toml";
pub const ENV_CONFIG_PATH: &str = "REQ2UML_CONFIG_PATH";
pub const ENV_MAX_REQUIREMENT_CHARS: &str = "REQ2UML_MAX_REQUIREMENT_CHARS";
pub const ENV_CATALOG_PATH: &str = "REQ2UML_CATALOG_PATH";
pub const ENV_LOG_CLASS_NAMES: &str = "REQ2UML_DEV_LOG";

fn default_max_requirement_chars() -> usize {
    20_000
}
fn default_max_feedback_chars() -> usize {
    2_000
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    /// Longest accepted requirement text (chars).
    #[serde(default = "default_max_requirement_chars")]
    pub max_requirement_chars: usize,
    #[serde(default = "default_max_feedback_chars")]
    pub max_feedback_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_requirement_chars: default_max_requirement_chars(),
            max_feedback_chars: default_max_feedback_chars(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSection {
    /// JSON file replacing the built-in member catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    /// Log extracted class names (user-derived) at info. Off unless asked for.
    #[serde(default)]
    pub class_names: bool,
}

impl ServiceConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: ServiceConfig = toml::from_str(s).context("parsing service config")?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading service config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve config using env var + fallbacks:
    /// 1) $REQ2UML_CONFIG_PATH (must exist)
    /// 2) config/req2uml.toml
    /// 3) built-in defaults
    ///
    /// Then apply per-field env overrides.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => Self::load_from(&PathBuf::from(p))?,
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from(&default)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(n) = parse_limit_env(std::env::var(ENV_MAX_REQUIREMENT_CHARS).ok()) {
            cfg.limits.max_requirement_chars = n;
        }
        if let Ok(p) = std::env::var(ENV_CATALOG_PATH) {
            if !p.trim().is_empty() {
                cfg.catalog.path = Some(PathBuf::from(p.trim()));
            }
        }
        if let Some(on) = parse_flag_env(std::env::var(ENV_LOG_CLASS_NAMES).ok()) {
            cfg.logging.class_names = on;
        }
        Ok(cfg)
    }

    fn sanitize(&mut self) {
        if self.limits.max_requirement_chars == 0 {
            self.limits.max_requirement_chars = default_max_requirement_chars();
        }
        if self.limits.max_feedback_chars == 0 {
            self.limits.max_feedback_chars = default_max_feedback_chars();
        }
    }
}

// positive integer env, anything else ignored
fn parse_limit_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

// 1/true/yes/on or 0/false/no/off, anything else ignored
fn parse_flag_env(raw: Option<String>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
