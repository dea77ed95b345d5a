//! Writes rotations into joints.
//!
//! Both operations quietly do nothing if the skeleton has not loaded or the
//! joint was not found in it. Input arrives regardless of whether the model
//! is ready, so an unavailable joint is normal and not an error.
use crate::{
    look::LookAngles,
    skeleton::{JointHandle, Skeleton},
    util,
};
use log::trace;
use nalgebra_glm as glm;

/// Roll (Euler Z) of a joint's current rotation. Read once, when the joint
/// starts tracking, and passed back to every `apply_look_rotation`. Reading
/// it from the joint each time would not be stable: past 90 degrees of yaw
/// the decomposition picks the equivalent triple with Z turned by pi.
#[must_use]
pub fn look_roll(skeleton: &Skeleton, joint: JointHandle) -> Option<f32> {
    skeleton
        .rotation(joint)
        .map(|r| util::euler_xyz_from_quat(&r).z)
}

/// Points a tracking joint. The yaw (Euler Y) comes from `angles.dx` and the
/// pitch (Euler X) from `angles.dy`, replacing whatever was there before.
/// Roll (Euler Z) is the joint's roll from `look_roll`. Because this is an
/// absolute assignment the same angles always give the same rotation.
///
/// Returns `true` if a joint was changed.
pub fn apply_look_rotation(
    skeleton: Option<&mut Skeleton>,
    joint: Option<JointHandle>,
    angles: LookAngles,
    roll: f32,
) -> bool {
    let Some(rotation) = rotation_for(skeleton, joint) else {
        return false;
    };
    let (yaw, pitch) = angles.to_radians();
    *rotation = util::quat_from_euler_xyz(pitch, yaw, roll);
    true
}

/// Composes a fixed rotation onto a joint's current rotation. Unlike look
/// rotation this is relative: every call turns the joint a bit further and
/// nothing limits how far it can go.
///
/// Returns `true` if a joint was changed.
pub fn apply_pose_command(
    skeleton: Option<&mut Skeleton>,
    joint: Option<JointHandle>,
    increment: &glm::Quat,
) -> bool {
    let Some(rotation) = rotation_for(skeleton, joint) else {
        return false;
    };
    // Pre-multiply so the increment is applied in the parent's frame
    *rotation = increment * *rotation;
    true
}

fn rotation_for(
    skeleton: Option<&mut Skeleton>,
    joint: Option<JointHandle>,
) -> Option<&mut glm::Quat> {
    let (Some(skeleton), Some(joint)) = (skeleton, joint) else {
        trace!("joint not available");
        return None;
    };
    skeleton.rotation_mut(joint)
}
