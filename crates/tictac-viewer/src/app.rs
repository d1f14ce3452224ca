//! Board rendering application.

use std::time::Instant;

use tictac_engine::core::{App, AppControl, FrameCtx};
use tictac_engine::mesh::MeshData;
use tictac_engine::render::{GpuMesh, MeshRenderer};

use crate::board::{board_draws, Board};
use crate::config::ViewerConfig;

/// How often frame statistics are logged.
const STATS_INTERVAL_SECS: f32 = 5.0;

/// CPU mesh data waiting for the device, then the uploaded meshes.
enum Meshes {
    Pending { x: MeshData, o: MeshData },
    Uploaded { x: GpuMesh, o: GpuMesh },
}

pub struct BoardApp {
    config: ViewerConfig,
    board: Board,
    meshes: Option<Meshes>,
    renderer: MeshRenderer,
    stats: FrameStats,
}

impl BoardApp {
    pub fn new(config: ViewerConfig, x: MeshData, o: MeshData) -> Self {
        let renderer = MeshRenderer::new(config.color_mode);
        Self {
            config,
            board: Board::diagonal(),
            meshes: Some(Meshes::Pending { x, o }),
            renderer,
            stats: FrameStats::default(),
        }
    }
}

impl App for BoardApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.stats.record(ctx.time.dt, ctx.time.now);

        let aspect = ctx.window.aspect_ratio();
        let camera = self.config.camera.matrices(aspect);

        let Self {
            config,
            board,
            meshes,
            renderer,
            ..
        } = self;

        ctx.render(config.clear_color, |rctx, target| {
            let uploaded = match meshes.take() {
                Some(Meshes::Pending { x, o }) => Meshes::Uploaded {
                    x: GpuMesh::upload(rctx.device, "x mesh", &x),
                    o: GpuMesh::upload(rctx.device, "o mesh", &o),
                },
                Some(ready) => ready,
                None => return,
            };

            if let Meshes::Uploaded { x, o } = &uploaded {
                let draws = board_draws(board, &config.layout, &config.palette, x, o);
                renderer.render(rctx, target, &camera, &draws);
            }

            *meshes = Some(uploaded);
        })
    }
}

/// Rolling frame-rate counter for periodic debug logging.
#[derive(Debug, Default)]
struct FrameStats {
    frames: u32,
    elapsed: f32,
    window_start: Option<Instant>,
}

impl FrameStats {
    /// Returns the average frame time in milliseconds when an interval closes.
    fn record(&mut self, dt: f32, now: Instant) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        self.elapsed += dt;

        if now.saturating_duration_since(start).as_secs_f32() < STATS_INTERVAL_SECS {
            return None;
        }

        let avg_ms = self.elapsed / self.frames as f32 * 1000.0;
        log::debug!("{} frames, avg {avg_ms:.2} ms/frame", self.frames);

        *self = Self {
            window_start: Some(now),
            ..Self::default()
        };
        Some(avg_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn stats_stay_quiet_within_interval() {
        let mut stats = FrameStats::default();
        let t0 = Instant::now();
        assert_eq!(stats.record(0.016, t0), None);
        assert_eq!(stats.record(0.016, t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn stats_report_average_and_reset() {
        let mut stats = FrameStats::default();
        let t0 = Instant::now();
        stats.record(0.010, t0);
        let avg = stats.record(0.030, t0 + Duration::from_secs(6)).unwrap();
        assert!((avg - 20.0).abs() < 1e-3);
        assert_eq!(stats.frames, 0);
        assert_eq!(stats.window_start, Some(t0 + Duration::from_secs(6)));
    }
}
