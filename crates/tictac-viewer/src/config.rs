//! Viewer configuration and presets.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use tictac_engine::paint::Color;
use tictac_engine::render::{Camera, ColorMode};

use crate::board::{BoardLayout, Palette};

pub const DEFAULT_X_MODEL: &str = "ASSETS/OBJ_MODELS/x.obj";
pub const DEFAULT_O_MODEL: &str = "ASSETS/OBJ_MODELS/o.obj";

/// Named starting points for the board look.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Preset {
    /// Tight board, close camera, marks colored per piece.
    #[default]
    Classic,
    /// Wider board, camera pulled back, every mark solid red.
    Spread,
}

impl Preset {
    pub fn tile_spacing(self) -> f32 {
        match self {
            Preset::Classic => 1.3,
            Preset::Spread => 2.0,
        }
    }

    pub fn camera_distance(self) -> f32 {
        match self {
            Preset::Classic => 3.5,
            Preset::Spread => 5.5,
        }
    }

    pub fn color_mode(self) -> ColorMode {
        match self {
            Preset::Classic => ColorMode::Uniform,
            Preset::Spread => ColorMode::Fixed,
        }
    }
}

/// Everything needed to open the window and draw the board.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub window_width: f64,
    pub window_height: f64,
    pub clear_color: Color,

    pub layout: BoardLayout,
    pub camera: Camera,
    pub color_mode: ColorMode,
    pub palette: Palette,

    pub x_model: PathBuf,
    pub o_model: PathBuf,

    pub vsync: bool,
}

impl ViewerConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            title: "Tic-Tac-Toe".to_string(),
            window_width: 480.0,
            window_height: 480.0,
            clear_color: Color::rgb(0.5, 0.5, 0.5),
            layout: BoardLayout {
                tile_spacing: preset.tile_spacing(),
            },
            camera: Camera {
                distance: preset.camera_distance(),
                ..Camera::default()
            },
            color_mode: preset.color_mode(),
            palette: Palette::default(),
            x_model: PathBuf::from(DEFAULT_X_MODEL),
            o_model: PathBuf::from(DEFAULT_O_MODEL),
            vsync: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let spacing = self.layout.tile_spacing;
        ensure!(
            spacing.is_finite() && spacing > 0.0,
            "tile spacing must be a positive number, got {spacing}"
        );

        let distance = self.camera.distance;
        ensure!(
            distance.is_finite() && distance > self.camera.near,
            "camera distance must be greater than the near plane ({}), got {distance}",
            self.camera.near
        );
        ensure!(
            distance < self.camera.far,
            "camera distance must be less than the far plane ({}), got {distance}",
            self.camera.far
        );

        ensure!(
            self.window_width >= 1.0 && self.window_height >= 1.0,
            "window size must be at least 1x1"
        );
        Ok(())
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}
