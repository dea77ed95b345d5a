//! Resolves logical joint roles to joints of a loaded skeleton
use crate::skeleton::{JointHandle, Skeleton};
use ahash::{HashMap, HashMapExt};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The joints this crate knows how to drive
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum JointRole {
    Neck,
    Back,
    LowerBack,
    Waist,
    LeftArm,
    LeftForeArm,
    RightArm,
    RightForeArm,
    LeftUpLeg,
    LeftLeg,
    RightUpLeg,
    RightLeg,
}

impl JointRole {
    pub const ALL: [Self; 12] = [
        Self::Neck,
        Self::Back,
        Self::LowerBack,
        Self::Waist,
        Self::LeftArm,
        Self::LeftForeArm,
        Self::RightArm,
        Self::RightForeArm,
        Self::LeftUpLeg,
        Self::LeftLeg,
        Self::RightUpLeg,
        Self::RightLeg,
    ];

    /// Bone name used by rigs from Mixamo
    #[must_use]
    pub const fn mixamo_name(self) -> &'static str {
        match self {
            Self::Neck => "mixamorigNeck",
            Self::Back => "mixamorigSpine2",
            Self::LowerBack => "mixamorigSpine1",
            Self::Waist => "mixamorigSpine",
            Self::LeftArm => "mixamorigLeftArm",
            Self::LeftForeArm => "mixamorigLeftForeArm",
            Self::RightArm => "mixamorigRightArm",
            Self::RightForeArm => "mixamorigRightForeArm",
            Self::LeftUpLeg => "mixamorigLeftUpLeg",
            Self::LeftLeg => "mixamorigLeftLeg",
            Self::RightUpLeg => "mixamorigRightUpLeg",
            Self::RightLeg => "mixamorigRightLeg",
        }
    }
}

/// Role to bone name for every role, using the Mixamo names
#[must_use]
pub fn mixamo_bone_names() -> BTreeMap<JointRole, String> {
    JointRole::ALL
        .iter()
        .map(|role| (*role, role.mixamo_name().to_string()))
        .collect()
}

/// Handles for the roles that were found in a skeleton. A role with no
/// entry is simply not available; callers skip it.
#[derive(Clone, Debug, Default)]
pub struct JointRegistry {
    entries: HashMap<JointRole, JointHandle>,
}

impl JointRegistry {
    /// Looks up each bone name in `skeleton`. Names that are not found are
    /// logged and left out.
    #[must_use]
    pub fn resolve(
        skeleton: &Skeleton,
        bone_names: &BTreeMap<JointRole, String>,
    ) -> Self {
        let mut entries = HashMap::with_capacity(bone_names.len());
        for (role, name) in bone_names {
            if let Some(handle) = skeleton.find(name) {
                debug!("{role:?} -> {name} (joint {})", handle.index());
                entries.insert(*role, handle);
            } else {
                warn!("{role:?}: no joint named {name} in {}", skeleton.name);
            }
        }
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, role: JointRole) -> Option<JointHandle> {
        self.entries.get(&role).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{mixamo_bone_names, JointRegistry, JointRole};
    use crate::skeleton::{JointInfo, Skeleton};

    #[test]
    fn partial_rig() {
        let mut sk = Skeleton::new("partial");
        let hips = sk.add_joint(JointInfo::new("mixamorigHips"), None);
        let spine = sk.add_joint(JointInfo::new("mixamorigSpine"), Some(hips));
        let neck = sk.add_joint(JointInfo::new("mixamorigNeck"), Some(spine));

        let registry = JointRegistry::resolve(&sk, &mixamo_bone_names());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(JointRole::Neck), Some(neck));
        assert_eq!(registry.get(JointRole::Waist), Some(spine));
        assert_eq!(registry.get(JointRole::LeftArm), None);
    }

    #[test]
    fn names_are_exact() {
        let mut sk = Skeleton::new("case");
        sk.add_joint(JointInfo::new("MixamorigNeck"), None);
        sk.add_joint(JointInfo::new("mixamorig:Neck"), None);
        let registry = JointRegistry::resolve(&sk, &mixamo_bone_names());
        assert!(registry.is_empty());
    }

    #[test]
    fn default_is_empty() {
        assert!(JointRegistry::default().is_empty());
        assert_eq!(mixamo_bone_names().len(), JointRole::ALL.len());
    }
}
