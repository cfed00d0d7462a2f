use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};

use crate::error::{FingerpickError, FingerpickResult};
use crate::game::{CountdownConfig, GameConfig, RevealConfig};

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time; the base layer under the file.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// fingerpick: everyone holds a finger down, one gets picked
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fingerpick", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log file path (defaults to the local data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Seed for reproducible picks (overrides config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Countdown start value (overrides config file)
    #[arg(long)]
    pub countdown: Option<u32>,

    /// Target FPS for the render loop (overrides config file)
    #[arg(long)]
    pub fps: Option<u16>,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration: parsed from TOML, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSection {
    pub countdown_start: u32,
    pub countdown_interval_ms: u64,
    pub countdown_delay_ms: u64,
    pub reveal_duration_ms: u64,
    pub restart_duration_ms: u64,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Target FPS
    pub fps: u16,

    /// Animate the reveal; when off the disc jumps straight to its target
    pub animations: bool,

    pub show_status_bar: bool,

    /// Player colors, indexed by id modulo length
    #[serde(deserialize_with = "deserialize_palette")]
    pub palette: Vec<Color>,

    #[serde(deserialize_with = "deserialize_color")]
    pub backdrop: Color,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // Parse the embedded TOML
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            countdown_start: 3,
            countdown_interval_ms: 1000,
            countdown_delay_ms: 800,
            reveal_duration_ms: 2500,
            restart_duration_ms: 1000,
            seed: None,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            animations: true,
            show_status_bar: true,
            palette: vec![
                Color::Red,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Magenta,
                Color::Cyan,
            ],
            backdrop: Color::Black,
        }
    }
}

// ─── Color Deserializers ────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

fn deserialize_palette<'de, D>(deserializer: D) -> std::result::Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    names
        .iter()
        .map(|s| {
            parse_color(s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
        })
        .collect()
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        "lightred" | "light_red" => Some(Color::LightRed),
        "lightgreen" | "light_green" => Some(Color::LightGreen),
        "lightyellow" | "light_yellow" => Some(Color::LightYellow),
        "lightblue" | "light_blue" => Some(Color::LightBlue),
        "lightmagenta" | "light_magenta" => Some(Color::LightMagenta),
        "lightcyan" | "light_cyan" => Some(Color::LightCyan),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// Parse a TOML document and check the values the game relies on.
    pub fn from_toml_str(s: &str) -> FingerpickResult<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> FingerpickResult<()> {
        if self.game.countdown_interval_ms == 0 {
            return Err(FingerpickError::Config(
                "game.countdown_interval_ms must be at least 1".into(),
            ));
        }
        if self.appearance.palette.is_empty() {
            return Err(FingerpickError::Config(
                "appearance.palette needs at least one color".into(),
            ));
        }
        if self.game.countdown_start == 0 {
            return Err(FingerpickError::Config(
                "game.countdown_start must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Standard config file path: ~/.config/fingerpick/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fingerpick")
            .join("config.toml")
    }

    /// Log directory: ~/.local/share/fingerpick/
    pub fn log_dir() -> PathBuf {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fingerpick");
        std::fs::create_dir_all(&data_dir).ok();
        data_dir
    }

    /// Convenience: tick interval from FPS, never shorter than 1ms
    pub fn tick_rate(&self) -> Duration {
        let fps = self.appearance.fps.max(1);
        Duration::from_millis((1000 / fps as u64).max(1))
    }

    /// Timings for the game core
    pub fn game(&self) -> GameConfig {
        let g = &self.game;
        GameConfig {
            countdown: CountdownConfig {
                start: g.countdown_start,
                tick_interval: Duration::from_millis(g.countdown_interval_ms),
                initial_delay: Duration::from_millis(g.countdown_delay_ms),
            },
            reveal: RevealConfig {
                reveal_duration: Duration::from_millis(g.reveal_duration_ms),
                restart_duration: Duration::from_millis(g.restart_duration_ms),
            },
        }
    }

    /// Apply CLI flags on top of the file values
    pub fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(ref level) = cli.log_level {
            self.general.log_level = level.clone();
        }
        if let Some(seed) = cli.seed {
            self.game.seed = Some(seed);
        }
        if let Some(start) = cli.countdown {
            self.game.countdown_start = start.max(1);
        }
        if let Some(fps) = cli.fps {
            self.appearance.fps = fps;
        }
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// Result of [`load`].
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    /// Set when the defaults were written out on this run. Logged by the
    /// caller once the subscriber exists.
    pub created: Option<PathBuf>,
}

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If config file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
pub fn load(cli: &CliArgs) -> Result<Loaded> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut created = None;

    // Bootstrap: ensure the file exists on disk
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        created = Some(config_path.clone());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config = Config::from_toml_str(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             fingerpick --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    config.apply_cli(cli);
    Ok(Loaded { config, created })
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}
