use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use tictac_engine::device::GpuInit;
use tictac_engine::logging::{init_logging, LoggingConfig};
use tictac_engine::mesh::load_first_mesh;
use tictac_engine::window::{Runtime, RuntimeConfig};

mod app;
mod board;
mod cli;
mod config;

use app::BoardApp;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let config = cli.to_config();
    config.validate().context("invalid configuration")?;
    log::info!(
        "board: spacing {}, camera distance {}, {:?} color",
        config.layout.tile_spacing,
        config.camera.distance,
        config.color_mode
    );

    let x = load_first_mesh(&config.x_model)
        .with_context(|| format!("failed to load X model from {}", config.x_model.display()))?;
    let o = load_first_mesh(&config.o_model)
        .with_context(|| format!("failed to load O model from {}", config.o_model.display()))?;

    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.window_width, config.window_height),
        resizable: true,
    };

    // Colors are written unencoded, so keep the surface linear.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        present_mode: config.present_mode(),
        ..GpuInit::default()
    };

    Runtime::run(runtime, gpu_init, BoardApp::new(config, x, o))
}
