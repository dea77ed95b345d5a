//! Key bindings that bend limbs by a fixed amount per press.
//!
//! There is no state here: no repeat suppression and no release handling.
//! Every press, including OS key repeat, applies the increment again, so
//! holding a key keeps turning the limb.
use crate::registry::JointRole;
use ahash::{HashMap, HashMapExt};
use nalgebra_glm as glm;
use winit::event::VirtualKeyCode;

/// About +90 degrees around X, as x, y, z, w
pub const FORWARD: [f32; 4] = [0.707_107, 0.0, 0.0, 0.707_107];
/// About -90 degrees around X
pub const BACK: [f32; 4] = [0.707_107, 0.0, 0.0, -0.707_107];
/// About +90 degrees around Z
pub const INWARD: [f32; 4] = [0.0, 0.0, 0.707_107, 0.707_107];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseBinding {
    pub key: VirtualKeyCode,
    pub name: &'static str,
    pub role: JointRole,
    pub rotation: [f32; 4],
}

impl PoseBinding {
    #[must_use]
    pub fn quaternion(&self) -> glm::Quat {
        let [x, y, z, w] = self.rotation;
        glm::quat(x, y, z, w)
    }
}

const fn bind(
    key: VirtualKeyCode,
    name: &'static str,
    role: JointRole,
    rotation: [f32; 4],
) -> PoseBinding {
    PoseBinding {
        key,
        name,
        role,
        rotation,
    }
}

pub const BINDINGS: [PoseBinding; 14] = [
    bind(VirtualKeyCode::W, "leftUpLeg-forward", JointRole::LeftUpLeg, FORWARD),
    bind(VirtualKeyCode::S, "leftUpLeg-back", JointRole::LeftUpLeg, BACK),
    bind(VirtualKeyCode::A, "leftLeg-forward", JointRole::LeftLeg, FORWARD),
    bind(VirtualKeyCode::D, "leftLeg-back", JointRole::LeftLeg, BACK),
    bind(
        VirtualKeyCode::T,
        "rightUpLeg-forward",
        JointRole::RightUpLeg,
        FORWARD,
    ),
    bind(VirtualKeyCode::G, "rightUpLeg-back", JointRole::RightUpLeg, BACK),
    bind(VirtualKeyCode::F, "rightLeg-forward", JointRole::RightLeg, FORWARD),
    bind(VirtualKeyCode::H, "rightLeg-back", JointRole::RightLeg, BACK),
    bind(VirtualKeyCode::J, "leftArm-forward", JointRole::LeftArm, FORWARD),
    bind(VirtualKeyCode::L, "rightArm-forward", JointRole::RightArm, FORWARD),
    bind(
        VirtualKeyCode::U,
        "leftForeArm-forward",
        JointRole::LeftForeArm,
        FORWARD,
    ),
    bind(
        VirtualKeyCode::O,
        "rightForeArm-forward",
        JointRole::RightForeArm,
        FORWARD,
    ),
    bind(VirtualKeyCode::I, "leftArm-inward", JointRole::LeftArm, INWARD),
    bind(VirtualKeyCode::K, "rightArm-inward", JointRole::RightArm, INWARD),
];

/// Key lookup for `BINDINGS`
#[derive(Clone, Debug)]
pub struct PoseBindings {
    by_key: HashMap<VirtualKeyCode, PoseBinding>,
}

impl Default for PoseBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseBindings {
    #[must_use]
    pub fn new() -> Self {
        let mut by_key = HashMap::with_capacity(BINDINGS.len());
        for binding in BINDINGS {
            by_key.insert(binding.key, binding);
        }
        Self { by_key }
    }

    /// The binding for a key, or `None` for keys that do nothing
    #[must_use]
    pub fn lookup(&self, key: VirtualKeyCode) -> Option<&PoseBinding> {
        self.by_key.get(&key)
    }

    /// The binding with a given name, such as "leftUpLeg-forward"
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&PoseBinding> {
        self.by_key.values().find(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{PoseBindings, BINDINGS, INWARD};
    use crate::registry::JointRole;
    use winit::event::VirtualKeyCode;

    #[test]
    fn keys_are_unique() {
        let bindings = PoseBindings::new();
        assert_eq!(bindings.by_key.len(), BINDINGS.len());
    }

    #[test]
    fn lookup() {
        let bindings = PoseBindings::new();
        let w = bindings.lookup(VirtualKeyCode::W).unwrap();
        assert_eq!(w.name, "leftUpLeg-forward");
        assert_eq!(w.role, JointRole::LeftUpLeg);
        let k = bindings.by_name("rightArm-inward").unwrap();
        assert_eq!(k.key, VirtualKeyCode::K);
        assert_eq!(k.rotation, INWARD);
        assert!(bindings.lookup(VirtualKeyCode::Q).is_none());
        assert!(bindings.lookup(VirtualKeyCode::Escape).is_none());
    }

    #[test]
    fn quaternions_are_nearly_unit() {
        for binding in BINDINGS {
            let q = binding.quaternion();
            assert!((q.norm() - 1.0).abs() < 0.00001, "{}", binding.name);
        }
    }
}
