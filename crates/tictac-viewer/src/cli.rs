//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tictac_engine::render::ColorMode;

use crate::config::{Preset, ViewerConfig};

/// Renders a fixed tic-tac-toe board.
#[derive(Debug, Parser)]
#[command(name = "tictac", version, about)]
pub struct Cli {
    /// Starting configuration; other flags override it.
    #[arg(long, value_enum, default_value_t = Preset::Classic)]
    pub preset: Preset,

    /// Distance between tile centres in world units.
    #[arg(long)]
    pub tile_spacing: Option<f32>,

    /// Camera distance from the board along +Z.
    #[arg(long)]
    pub camera_distance: Option<f32>,

    /// Per-piece uniform colors, or a color fixed in the shader.
    #[arg(long, value_enum)]
    pub color_mode: Option<ColorModeArg>,

    /// OBJ file for the X piece.
    #[arg(long)]
    pub x_model: Option<PathBuf>,

    /// OBJ file for the O piece.
    #[arg(long)]
    pub o_model: Option<PathBuf>,

    /// Present without waiting for vertical sync.
    #[arg(long)]
    pub no_vsync: bool,

    /// Log filter in `env_logger` syntax (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// CLI mirror of `ColorMode`; keeps `clap` out of the engine crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ColorModeArg {
    Uniform,
    Fixed,
}

impl From<ColorModeArg> for ColorMode {
    fn from(arg: ColorModeArg) -> Self {
        match arg {
            ColorModeArg::Uniform => ColorMode::Uniform,
            ColorModeArg::Fixed => ColorMode::Fixed,
        }
    }
}

impl Cli {
    /// Preset values with command-line overrides applied.
    pub fn to_config(&self) -> ViewerConfig {
        let mut cfg = ViewerConfig::from_preset(self.preset);

        if let Some(spacing) = self.tile_spacing {
            cfg.layout.tile_spacing = spacing;
        }
        if let Some(distance) = self.camera_distance {
            cfg.camera.distance = distance;
        }
        if let Some(mode) = self.color_mode {
            cfg.color_mode = mode.into();
        }
        if let Some(path) = &self.x_model {
            cfg.x_model = path.clone();
        }
        if let Some(path) = &self.o_model {
            cfg.o_model = path.clone();
        }
        cfg.vsync = !self.no_vsync;

        cfg
    }
}
