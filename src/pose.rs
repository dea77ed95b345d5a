//! Global pose of a skeleton, derived from local transforms whenever it is
//! needed and never stored back into the joints
use crate::skeleton::{JointInfo, Skeleton};
use nalgebra_glm as glm;

/// Local transform of a joint: translate, then rotate, then scale
#[must_use]
pub fn local_matrix(joint: &JointInfo) -> glm::Mat4 {
    let t = glm::translate(&glm::Mat4::identity(), &joint.translation);
    let r = glm::quat_to_mat4(&joint.rotation);
    let s = glm::scale(&glm::Mat4::identity(), &joint.scale);
    t * r * s
}

/// World transform of every joint, indexed by `JointHandle::index`. Root
/// joints are placed relative to `model`.
#[must_use]
pub fn world_transforms(
    skeleton: &Skeleton,
    model: &glm::Mat4,
) -> Vec<glm::Mat4> {
    let mut output = Vec::with_capacity(skeleton.len());
    // Joints are stored parent first so each parent is already computed
    for (_, joint) in skeleton.iter() {
        let parent = joint
            .parent
            .and_then(|p| output.get(p.index()))
            .copied()
            .unwrap_or(*model);
        output.push(parent * local_matrix(joint));
    }
    output
}

/// Model transform that turns the character to face the camera. glTF models
/// face +Z and the default camera looks down -Z from +Z, so most models need
/// no turn at all, while Mixamo exports usually want 180 degrees.
#[must_use]
pub fn model_yaw(degrees: f32) -> glm::Mat4 {
    glm::rotate(
        &glm::Mat4::identity(),
        degrees.to_radians(),
        &glm::vec3(0.0, 1.0, 0.0),
    )
}
