use glam::{Mat4, Vec3};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;

/// Fixed camera on the +Z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +Z.
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            near: 0.1,
            far: 100.0,
            distance: 3.5,
        }
    }
}

/// Matrices uploaded once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub projection: Mat4,
    pub view: Mat4,
}

impl Camera {
    /// Right-handed perspective projection with `[0, 1]` depth.
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect_ratio, self.near, self.far)
    }

    /// World-to-camera transform: the world is pushed `distance` units down -Z.
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }

    pub fn matrices(&self, aspect_ratio: f32) -> CameraMatrices {
        CameraMatrices {
            projection: self.projection(aspect_ratio),
            view: self.view(),
        }
    }
}

impl CameraMatrices {
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn clip(m: &CameraMatrices, p: Vec3) -> Vec3 {
        let c = m.view_projection() * Vec4::new(p.x, p.y, p.z, 1.0);
        c.truncate() / c.w
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.fov_y_degrees, 60.0);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 100.0);
        assert_eq!(cam.distance, 3.5);
    }

    #[test]
    fn view_moves_origin_in_front_of_camera() {
        let cam = Camera { distance: 3.5, ..Default::default() };
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p.z + 3.5).abs() < 1e-6);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let m = Camera::default().matrices(1.0);
        let ndc = clip(&m, Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn corner_tiles_stay_on_screen() {
        // 3x3 board at spacing 1.3 seen from 3.5 units.
        let m = Camera::default().matrices(1.0);
        for p in [Vec3::new(-1.3, -1.3, 0.0), Vec3::new(1.3, 1.3, 0.0)] {
            let ndc = clip(&m, p);
            assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0, "{p:?} -> {ndc:?}");
        }
    }

    #[test]
    fn near_and_far_planes_map_to_depth_range() {
        let m = Camera { distance: 0.0, ..Default::default() }.matrices(1.0);
        let near = clip(&m, Vec3::new(0.0, 0.0, -0.1));
        let far = clip(&m, Vec3::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn wider_aspect_squeezes_x() {
        let cam = Camera::default();
        let square = clip(&cam.matrices(1.0), Vec3::new(1.0, 0.0, 0.0));
        let wide = clip(&cam.matrices(2.0), Vec3::new(1.0, 0.0, 0.0));
        assert!((wide.x - square.x / 2.0).abs() < 1e-5);
    }
}
