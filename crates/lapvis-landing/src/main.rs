mod app;
mod browser;
mod config;
mod enter;
mod hud;
mod telemetry;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use lapvis_engine::device::GpuInit;
use lapvis_engine::logging::{LoggingConfig, init_logging};
use lapvis_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::Landing;
use crate::browser::SystemOpener;
use crate::config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log_filter.clone(),
        ..LoggingConfig::default()
    });

    let config = cli.into_config()?;
    log::info!(
        "lapvis landing {}x{}, dashboard at {}",
        config.width,
        config.height,
        config.dashboard_url
    );

    let runtime_config = RuntimeConfig {
        initial_size: LogicalSize::new(config.width, config.height),
        ..RuntimeConfig::default()
    };
    let landing = Landing::new(config, Box::new(SystemOpener), Instant::now());

    Runtime::run(runtime_config, GpuInit::default(), landing)
}
