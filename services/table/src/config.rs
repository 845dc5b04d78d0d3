use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use soulbet_types::{ConfigError, SessionConfig};
use tracing::Level;

/// Presentation timings in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    #[serde(default = "default_spin_duration_ms")]
    pub spin_duration_ms: u64,
    #[serde(default = "default_spin_frame_ms")]
    pub spin_frame_ms: u64,
    #[serde(default = "default_reenable_padding_ms")]
    pub reenable_padding_ms: u64,
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u64,
    #[serde(default = "default_message_clear_ms")]
    pub message_clear_ms: u64,
    #[serde(default = "default_clock_flash_ms")]
    pub clock_flash_ms: u64,
    #[serde(default = "default_type_speed_ms")]
    pub type_speed_ms: u64,
    #[serde(default = "default_intro_hold_ms")]
    pub intro_hold_ms: u64,
    #[serde(default = "default_money_count_down_ms")]
    pub money_count_down_ms: u64,
    #[serde(default = "default_money_count_up_ms")]
    pub money_count_up_ms: u64,
    #[serde(default = "default_count_frame_ms")]
    pub count_frame_ms: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: default_spin_duration_ms(),
            spin_frame_ms: default_spin_frame_ms(),
            reenable_padding_ms: default_reenable_padding_ms(),
            result_delay_ms: default_result_delay_ms(),
            message_clear_ms: default_message_clear_ms(),
            clock_flash_ms: default_clock_flash_ms(),
            type_speed_ms: default_type_speed_ms(),
            intro_hold_ms: default_intro_hold_ms(),
            money_count_down_ms: default_money_count_down_ms(),
            money_count_up_ms: default_money_count_up_ms(),
            count_frame_ms: default_count_frame_ms(),
        }
    }
}

impl PresentationConfig {
    pub fn validate(&self) -> Result<PresentationTimings, ConfigError> {
        Ok(PresentationTimings {
            spin_duration: nonzero_ms("spin_duration_ms", self.spin_duration_ms)?,
            spin_frame: nonzero_ms("spin_frame_ms", self.spin_frame_ms)?,
            reenable_padding: Duration::from_millis(self.reenable_padding_ms),
            result_delay: Duration::from_millis(self.result_delay_ms),
            message_clear: Duration::from_millis(self.message_clear_ms),
            clock_flash: Duration::from_millis(self.clock_flash_ms),
            type_speed: nonzero_ms("type_speed_ms", self.type_speed_ms)?,
            intro_hold: Duration::from_millis(self.intro_hold_ms),
            money_count_down: Duration::from_millis(self.money_count_down_ms),
            money_count_up: Duration::from_millis(self.money_count_up_ms),
            count_frame: nonzero_ms("count_frame_ms", self.count_frame_ms)?,
        })
    }
}

/// Validated presentation timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentationTimings {
    pub spin_duration: Duration,
    pub spin_frame: Duration,
    pub reenable_padding: Duration,
    pub result_delay: Duration,
    pub message_clear: Duration,
    pub clock_flash: Duration,
    pub type_speed: Duration,
    pub intro_hold: Duration,
    pub money_count_down: Duration,
    pub money_count_up: Duration,
    pub count_frame: Duration,
}

impl Default for PresentationTimings {
    fn default() -> Self {
        Self {
            spin_duration: Duration::from_millis(default_spin_duration_ms()),
            spin_frame: Duration::from_millis(default_spin_frame_ms()),
            reenable_padding: Duration::from_millis(default_reenable_padding_ms()),
            result_delay: Duration::from_millis(default_result_delay_ms()),
            message_clear: Duration::from_millis(default_message_clear_ms()),
            clock_flash: Duration::from_millis(default_clock_flash_ms()),
            type_speed: Duration::from_millis(default_type_speed_ms()),
            intro_hold: Duration::from_millis(default_intro_hold_ms()),
            money_count_down: Duration::from_millis(default_money_count_down_ms()),
            money_count_up: Duration::from_millis(default_money_count_up_ms()),
            count_frame: Duration::from_millis(default_count_frame_ms()),
        }
    }
}

/// Configuration file for the `soulbet` binary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
    /// Master seed. A random one is drawn (and logged) when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            seed: None,
            session: SessionConfig::default(),
            presentation: PresentationConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("could not parse config file {}", path.display()))
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        self.session.validate()?;
        let presentation = self.presentation.validate()?;
        Ok(ValidatedConfig {
            log_level,
            log_json: self.log_json,
            seed: self.seed.unwrap_or_else(rand::random),
            session: self.session,
            presentation,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub log_level: Level,
    pub log_json: bool,
    pub seed: u64,
    pub session: SessionConfig,
    pub presentation: PresentationTimings,
}

fn nonzero_ms(field: &'static str, value: u64) -> Result<Duration, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidPositive {
            field,
            value: value as f64,
        });
    }
    Ok(Duration::from_millis(value))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_spin_duration_ms() -> u64 {
    1_800
}

fn default_spin_frame_ms() -> u64 {
    50
}

fn default_reenable_padding_ms() -> u64 {
    120
}

fn default_result_delay_ms() -> u64 {
    1_500
}

fn default_message_clear_ms() -> u64 {
    1_000
}

fn default_clock_flash_ms() -> u64 {
    300
}

fn default_type_speed_ms() -> u64 {
    40
}

fn default_intro_hold_ms() -> u64 {
    1_000
}

fn default_money_count_down_ms() -> u64 {
    800
}

fn default_money_count_up_ms() -> u64 {
    1_000
}

fn default_count_frame_ms() -> u64 {
    16
}
