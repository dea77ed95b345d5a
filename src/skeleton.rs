use ahash::HashMap;
use nalgebra_glm as glm;
use smallvec::SmallVec;

/// Index of a joint within its `Skeleton`. Handles are only meaningful for
/// the skeleton that issued them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct JointHandle(usize);

impl JointHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct JointInfo {
    pub name: String,
    pub parent: Option<JointHandle>,
    pub children: SmallVec<[JointHandle; 4]>,
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
    pub is_bone: bool,
}

impl JointInfo {
    /// Creates a joint at rest: no translation, identity rotation, unit scale
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: SmallVec::new(),
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::Quat::identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
            is_bone: false,
        }
    }
}

/// Node hierarchy of a loaded model.
///
/// Once built, only the local rotation of a joint may change, through
/// `rotation_mut`. Joints are stored in depth first pre-order as they are
/// added, so a parent always has a lower index than its children.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    pub name: String,
    joints: Vec<JointInfo>,
    roots: Vec<JointHandle>,
    by_name: HashMap<String, JointHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a joint under `parent`, or as a new root if `parent` is `None`.
    /// The parent and children fields of `info` are overwritten.
    ///
    /// Name lookups return the first joint added with a given name, which
    /// matches a pre-order search when joints are added parent first.
    pub fn add_joint(
        &mut self,
        mut info: JointInfo,
        parent: Option<JointHandle>,
    ) -> JointHandle {
        let handle = JointHandle(self.joints.len());
        let parent = parent.filter(|p| p.0 < self.joints.len());
        match parent {
            Some(p) => self.joints[p.0].children.push(handle),
            None => self.roots.push(handle),
        }
        info.parent = parent;
        info.children.clear();
        self.by_name.entry(info.name.clone()).or_insert(handle);
        self.joints.push(info);
        handle
    }

    /// Exact name match
    #[must_use]
    pub fn find(&self, name: &str) -> Option<JointHandle> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn joint(&self, handle: JointHandle) -> Option<&JointInfo> {
        self.joints.get(handle.0)
    }

    /// The only mutable access to a joint
    pub fn rotation_mut(
        &mut self,
        handle: JointHandle,
    ) -> Option<&mut glm::Quat> {
        self.joints.get_mut(handle.0).map(|j| &mut j.rotation)
    }

    #[must_use]
    pub fn rotation(&self, handle: JointHandle) -> Option<glm::Quat> {
        self.joints.get(handle.0).map(|j| j.rotation)
    }

    #[must_use]
    pub fn roots(&self) -> &[JointHandle] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointHandle, &JointInfo)> {
        self.joints
            .iter()
            .enumerate()
            .map(|(i, j)| (JointHandle(i), j))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{JointInfo, Skeleton};

    #[test]
    fn first_name_wins() {
        let mut sk = Skeleton::new("test");
        let root = sk.add_joint(JointInfo::new("Armature"), None);
        let a = sk.add_joint(JointInfo::new("Bone"), Some(root));
        let b = sk.add_joint(JointInfo::new("Bone"), Some(a));
        assert_eq!(sk.find("Bone"), Some(a));
        assert_ne!(sk.find("Bone"), Some(b));
        assert_eq!(sk.find("bone"), None);
        assert_eq!(sk.joint(b).unwrap().parent, Some(a));
        assert_eq!(sk.joint(root).unwrap().children.as_slice(), &[a]);
        assert_eq!(sk.roots(), &[root]);
        assert_eq!(sk.len(), 3);
    }
}
