use glam::{Mat4, Vec3};

use crate::scene_core::config::{CameraConfig, PoseConfig};

/// Model-view and model-view-projection for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub mv: Mat4,
    pub mvp: Mat4,
}

/// Fixed camera looking at the origin with +Y up.
#[derive(Debug, Clone, Copy)]
pub struct ViewerCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
}

impl ViewerCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            eye: Vec3::from(config.eye),
            target: Vec3::ZERO,
            fov_y_radians: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, aspect, self.near, self.far)
    }

    pub fn transforms(&self, aspect: f32, pose: &ModelPose) -> Transforms {
        let mv = self.view() * pose.model();
        Transforms {
            mv,
            mvp: self.projection(aspect) * mv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPose {
    pub x: f32,
    pub y: f32,
    /// Rotation about X in radians.
    pub angle: f32,
}

impl From<PoseConfig> for ModelPose {
    fn from(config: PoseConfig) -> Self {
        Self {
            x: config.x,
            y: config.y,
            angle: config.angle,
        }
    }
}

impl ModelPose {
    /// Rotation is applied after the translation.
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_x(self.angle) * Mat4::from_translation(Vec3::new(self.x, self.y, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn default_camera_sits_on_positive_z() {
        let camera = ViewerCamera::new(&CameraConfig::default());
        let origin_in_view = camera.view().transform_point3(Vec3::ZERO);
        assert!((origin_in_view - Vec3::new(0.0, 0.0, -330.0)).length() < 1e-4);
        assert!((camera.fov_y_radians - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn mvp_is_projection_times_mv() {
        let camera = ViewerCamera::new(&CameraConfig::default());
        let pose = ModelPose::from(PoseConfig::default());
        let t = camera.transforms(4.0 / 3.0, &pose);
        assert!(close(t.mv, camera.view() * pose.model()));
        assert!(close(t.mvp, camera.projection(4.0 / 3.0) * camera.view() * pose.model()));
    }

    #[test]
    fn pose_translates_before_rotating() {
        let pose = ModelPose {
            x: 0.0,
            y: 1.0,
            angle: std::f32::consts::FRAC_PI_2,
        };
        // (0,0,0) -> (0,1,0) -> rotated a quarter turn about X -> (0,0,1)
        let p = pose.model().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }
}
