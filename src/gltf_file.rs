//! Reads the node hierarchy of a glTF file. Meshes, materials and
//! animations are ignored; only names and local transforms are kept.
use crate::{
    asset::AssetLoader,
    mr_error::MrError,
    skeleton::{JointHandle, JointInfo, Skeleton},
};
use ahash::{HashSet, HashSetExt};
use gltf::{Document, Gltf, Node};
use log::{debug, info, warn};
use nalgebra_glm as glm;
use std::{fs, io, path::Path};

/// Comparison value for approximate equality of two scale vectors
const SCALE_EPSILON: f32 = 0.005;

/// Loads skeletons from `.gltf` and `.glb` files
#[derive(Clone, Copy, Debug, Default)]
pub struct GltfLoader;

impl AssetLoader for GltfLoader {
    fn load(&self, path: &Path) -> Result<Skeleton, MrError> {
        load_skeleton(path)
    }
}

fn load_impl(path: &Path) -> Result<Document, MrError> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    let gltf = Gltf::from_reader(reader)?;
    info!(
        "{:?}, node count={}, skin count={}",
        path,
        gltf.document.nodes().len(),
        gltf.document.skins().len(),
    );
    Ok(gltf.document)
}

/// Recursive node tree traversal, parent before children
fn traverse_tree(
    node: &Node,
    parent: Option<JointHandle>,
    bones: &HashSet<usize>,
    skeleton: &mut Skeleton,
) {
    let name = node
        .name()
        .map_or_else(|| format!("node.{}", node.index()), ToString::to_string);
    let (t, r, s) = node.transform().decomposed();
    let scale: glm::Vec3 = s.into();

    let compare = glm::not_equal_eps(
        &scale,
        &glm::vec3(1.0f32, 1.0f32, 1.0f32),
        SCALE_EPSILON,
    );
    if compare.x || compare.y || compare.z {
        debug!("node {} ({}) has scale {:?}", node.index(), name, s);
    }

    let info = JointInfo {
        translation: t.into(),
        rotation: r.into(),
        scale,
        is_bone: bones.contains(&node.index()),
        ..JointInfo::new(&name)
    };
    let handle = skeleton.add_joint(info, parent);

    for child in node.children() {
        traverse_tree(&child, Some(handle), bones, skeleton);
    }
}

/// Builds a `Skeleton` from the node tree of a parsed document. The default
/// scene is used, or the first scene if there is no default.
///
/// # Errors
/// May return `MrError`
pub fn skeleton_from_document(
    document: &Document,
    name: &str,
) -> Result<Skeleton, MrError> {
    let Some(scene) = document
        .default_scene()
        .or_else(|| document.scenes().next())
    else {
        return Err(MrError::NoScene);
    };
    if document.scenes().len() > 1 {
        warn!(
            "{} scenes in {}, using scene {}",
            document.scenes().len(),
            name,
            scene.index()
        );
    }

    // Nodes used as joints by any skin
    let mut bones = HashSet::new();
    for skin in document.skins() {
        bones.extend(skin.joints().map(|node| node.index()));
    }

    let mut skeleton = Skeleton::new(name);
    for node in scene.nodes() {
        traverse_tree(&node, None, &bones, &mut skeleton);
    }
    if skeleton.is_empty() {
        return Err(MrError::EmptyScene);
    }

    for (handle, joint) in skeleton.iter().filter(|(_, j)| j.is_bone) {
        debug!("bone {} {}", handle.index(), joint.name);
    }
    Ok(skeleton)
}

/// Loads the node hierarchy of a glTF file
///
/// # Errors
/// May return `MrError`
pub fn load_skeleton(path: &Path) -> Result<Skeleton, MrError> {
    let document = load_impl(path)?;
    let name = path.file_stem().map_or_else(
        || "model".to_string(),
        |s| s.to_string_lossy().into_owned(),
    );
    skeleton_from_document(&document, &name)
}
