//! Configuration management for permscope
//!
//! Settings are read from environment variables with sensible defaults.
//! Command-line flags override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `PERMSCOPE_COLOR`: `auto|always|never` - default: `auto` (color when
//!   stdout is a terminal)
//! - `PERMSCOPE_LOG_LEVEL`: Logging level - default: `warn`
//! - `PERMSCOPE_LOG_JSON`: JSON log lines (true|false) - default: `false`
//! - `PERMSCOPE_PALETTE`: Path to a TOML file overriding decoration tokens
//! - `PERMSCOPE_RISK_THRESHOLD`: Default `audit` threshold in [0, 1] -
//!   default: `0.5`
//!
//! # Example
//!
//! ```no_run
//! use permscope::PermscopeConfig;
//!
//! let config = PermscopeConfig::default();
//! config.validate().expect("Invalid configuration");
//! let renderer = config.renderer().expect("Unreadable palette");
//! ```

use crate::cli::commands::CliArgs;
use crate::permissions::RISK_MEDIUM;
use crate::render::{Palette, Renderer};
use crate::util::logging::{parse_level, LoggingConfig};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_RISK_THRESHOLD: f64 = RISK_MEDIUM;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid color mode: {0}. Valid options: auto, always, never")]
    InvalidColor(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to read palette {path}: {source}")]
    PaletteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse palette {path}: {source}")]
    PaletteParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// When to emit ANSI color sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => atty::is(atty::Stream::Stdout),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ConfigError::InvalidColor(s.to_string())),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PermscopeConfig {
    pub color: ColorMode,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,

    /// Optional TOML palette overriding the built-in tokens
    pub palette_path: Option<PathBuf>,

    /// Minimum risk score reported by `audit`
    pub risk_threshold: f64,
}

impl Default for PermscopeConfig {
    /// Loads from `PERMSCOPE_*` variables. Unparseable values fall back to
    /// their defaults.
    fn default() -> Self {
        let color = env::var("PERMSCOPE_COLOR")
            .ok()
            .and_then(|v| v.parse::<ColorMode>().ok())
            .unwrap_or_default();

        let log_level = env::var("PERMSCOPE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("PERMSCOPE_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let palette_path = env::var("PERMSCOPE_PALETTE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let risk_threshold = env::var("PERMSCOPE_RISK_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_RISK_THRESHOLD);

        Self {
            color,
            log_level,
            log_json,
            palette_path,
            risk_threshold,
        }
    }
}

impl PermscopeConfig {
    /// Applies global command-line flags on top of the environment.
    /// `--log-level` wins over `-v`/`-q`.
    pub fn with_args(mut self, args: &CliArgs) -> Self {
        if let Some(color) = args.color {
            self.color = color;
        }

        if let Some(level) = &args.log_level {
            self.log_level = level.to_lowercase();
        } else if args.verbose {
            self.log_level = "debug".to_string();
        } else if args.quiet {
            self.log_level = "error".to_string();
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if parse_level(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        if !(0.0..=1.0).contains(&self.risk_threshold) {
            return Err(ConfigError::ValidationFailed(format!(
                "Risk threshold must lie in [0, 1], got {}",
                self.risk_threshold
            )));
        }

        Ok(())
    }

    /// Logging setup for these settings. Trace level adds file and line.
    pub fn logging(&self) -> LoggingConfig {
        let level = parse_level(&self.log_level).unwrap_or(Level::WARN);
        LoggingConfig {
            level,
            use_json: self.log_json,
            include_location: level == Level::TRACE,
            ..Default::default()
        }
    }

    pub fn use_color(&self) -> bool {
        self.color.enabled()
    }

    /// Resolves the palette: the configured TOML file, or the built-in
    /// colored tokens. Color stripping happens later in the renderer.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let Some(path) = &self.palette_path else {
            return Ok(Palette::colored());
        };

        let source = fs::read_to_string(path).map_err(|source| ConfigError::PaletteRead {
            path: path.clone(),
            source,
        })?;
        Palette::from_toml_str(&source).map_err(|source| ConfigError::PaletteParse {
            path: path.clone(),
            source,
        })
    }

    pub fn renderer(&self) -> Result<Renderer, ConfigError> {
        Ok(Renderer::new(self.palette()?, self.use_color()))
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("color".to_string(), self.color.to_string());
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        if let Some(ref path) = self.palette_path {
            map.insert("palette".to_string(), path.display().to_string());
        }
        map.insert(
            "risk_threshold".to_string(),
            self.risk_threshold.to_string(),
        );

        map
    }
}

impl fmt::Display for PermscopeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Permscope Configuration:")?;
        writeln!(f, "  Color: {}", self.color)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        if let Some(ref path) = self.palette_path {
            writeln!(f, "  Palette: {}", path.display())?;
        }
        writeln!(f, "  Risk Threshold: {}", self.risk_threshold)?;
        Ok(())
    }
}
