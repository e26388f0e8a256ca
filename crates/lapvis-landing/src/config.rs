use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

pub const DEFAULT_DASHBOARD_URL: &str = "http://localhost:8501";

/// Command line for the landing window.
#[derive(Debug, Parser)]
#[command(name = "lapvis-landing", version, about = "Animated landing window for the LapVis dashboard")]
pub struct Cli {
    /// Dashboard opened when the enter button fires.
    #[arg(long, env = "LAPVIS_DASHBOARD_URL", default_value = DEFAULT_DASHBOARD_URL)]
    pub dashboard_url: String,

    /// Initial window width in logical pixels.
    #[arg(long, env = "LAPVIS_WIDTH", default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, env = "LAPVIS_HEIGHT", default_value_t = 720.0)]
    pub height: f64,

    /// Milliseconds between telemetry updates.
    #[arg(long, env = "LAPVIS_TELEMETRY_INTERVAL_MS", default_value_t = 120)]
    pub telemetry_interval_ms: u64,

    /// Milliseconds the loading state is shown before the browser opens.
    #[arg(long, env = "LAPVIS_REDIRECT_DELAY_MS", default_value_t = 1200)]
    pub redirect_delay_ms: u64,

    /// Seed for the telemetry simulator. Random when omitted.
    #[arg(long, env = "LAPVIS_SEED")]
    pub seed: Option<u64>,

    /// `env_logger` filter, e.g. `debug` or `lapvis_engine=trace`.
    #[arg(long, env = "LAPVIS_LOG")]
    pub log_filter: Option<String>,
}

/// Validated settings derived from [`Cli`].
#[derive(Debug, Clone, PartialEq)]
pub struct LandingConfig {
    pub dashboard_url: String,
    pub width: f64,
    pub height: f64,
    pub telemetry_interval: Duration,
    pub redirect_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            width: 1280.0,
            height: 720.0,
            telemetry_interval: Duration::from_millis(120),
            redirect_delay: Duration::from_millis(1200),
            seed: None,
        }
    }
}

impl Cli {
    pub fn into_config(self) -> Result<LandingConfig> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !v.is_finite() || v <= 0.0 {
                bail!("window {name} must be a positive number, got {v}");
            }
        }
        if self.telemetry_interval_ms == 0 {
            bail!("telemetry interval must be at least 1 ms");
        }

        let url = self.dashboard_url.trim();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"));
        if host.is_none_or(str::is_empty) {
            bail!("dashboard url must be an http(s) url, got {url:?}");
        }

        Ok(LandingConfig {
            dashboard_url: url.to_string(),
            width: self.width,
            height: self.height,
            telemetry_interval: Duration::from_millis(self.telemetry_interval_ms),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            seed: self.seed,
        })
    }
}
