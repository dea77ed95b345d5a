use crate::types::CameraTrait;
use nalgebra_glm as glm;

const NEAR_CLIP_METERS: f32 = 0.01;
const FAR_CLIP_METERS: f32 = 1000.0;

#[derive(Debug, Copy, Clone)]
pub struct Properties {
    pub aspect_ratio: f32,
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    pub position: glm::Vec3,
    pub target: glm::Vec3,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0f32 / 9.0f32,
            fovy: 50.0f32.to_radians(),
            near: NEAR_CLIP_METERS,
            far: FAR_CLIP_METERS,
            position: glm::vec3(0.0f32, 1.0f32, 3.0f32),
            target: glm::vec3(0.0f32, 1.0f32, 0.0f32),
        }
    }
}

/// The projection matrix depends on both fovy and aspect ratio, so both are
/// stored so that a caller can change one without having to know the other.
/// The view matrix depends on both position and target, so both are stored
/// so that a caller can change one without having to know the other.
///
/// Right handed with +Y up, the same convention as glTF.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    aspect_ratio: f32,
    fovy: f32,
    near: f32,
    far: f32,
    position: glm::Vec3,
    target: glm::Vec3,
    view: glm::Mat4,
    proj: glm::Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Properties::default())
    }
}

impl CameraTrait for Camera {
    fn view_matrix(&self) -> glm::Mat4 {
        self.view
    }

    fn proj_matrix(&self) -> glm::Mat4 {
        self.proj
    }
}

impl Camera {
    #[must_use]
    pub fn new(properties: Properties) -> Self {
        Self {
            aspect_ratio: properties.aspect_ratio,
            fovy: properties.fovy,
            near: properties.near,
            far: properties.far,
            position: properties.position,
            target: properties.target,
            view: Self::build_view(&properties.position, &properties.target),
            proj: Self::build_proj(
                properties.aspect_ratio,
                properties.fovy,
                properties.near,
                properties.far,
            ),
        }
    }

    pub fn aspect_ratio(&mut self, aspect_ratio: f32) {
        self.proj =
            Self::build_proj(aspect_ratio, self.fovy, self.near, self.far);
        self.aspect_ratio = aspect_ratio;
    }

    #[must_use]
    pub const fn aspect(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn position(&mut self, position: &glm::Vec3) {
        self.view = Self::build_view(position, &self.target);
        self.position = *position;
    }

    pub fn target(&mut self, target: &glm::Vec3) {
        self.view = Self::build_view(&self.position, target);
        self.target = *target;
    }

    fn build_proj(
        aspect_ratio: f32,
        fovy: f32,
        near: f32,
        far: f32,
    ) -> glm::Mat4 {
        glm::perspective(aspect_ratio, fovy, near, far)
    }

    fn build_view(position: &glm::Vec3, target: &glm::Vec3) -> glm::Mat4 {
        glm::look_at(position, target, &glm::vec3(0.0, 1.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use crate::{types::CameraTrait, util};
    use nalgebra_glm as glm;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn target_is_straight_ahead() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let p = util::transform(&glm::vec3(0.0, 1.0, 0.0), &view);
        let c = glm::equal_eps(&p, &glm::vec3(0.0, 0.0, -3.0), EPSILON);
        assert!(c.x && c.y && c.z);
    }

    #[test]
    fn aspect_changes_projection() {
        let mut camera = Camera::default();
        let before = camera.proj_matrix();
        camera.aspect_ratio(1.25);
        assert!((camera.aspect() - 1.25).abs() < EPSILON);
        assert_ne!(before, camera.proj_matrix());
        // Vertical field of view is unchanged
        let after = camera.proj_matrix();
        assert!((before[(1, 1)] - after[(1, 1)]).abs() < EPSILON);
    }

    #[test]
    fn moving_the_camera() {
        let mut camera = Camera::default();
        camera.position(&glm::vec3(0.0, 1.0, 5.0));
        camera.target(&glm::vec3(0.0, 2.0, 0.0));
        let view = camera.view_matrix();
        let p = util::transform(&glm::vec3(0.0, 2.0, 0.0), &view);
        assert!(p.x.abs() < EPSILON && p.y.abs() < EPSILON && p.z < 0.0);
    }
}
