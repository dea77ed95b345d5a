//! Application settings, read from YAML. Every field has a default so a
//! file only needs the values it changes.
use crate::{
    camera,
    mr_error::MrError,
    registry::{self, JointRole},
};
use log::info;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};

/// The look-tracking limit used for the neck and spine
pub const DEFAULT_DEGREE_LIMIT: f32 = 30.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "marionette".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: glm::Vec3,
    pub target: glm::Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let p = camera::Properties::default();
        Self {
            fovy_degrees: p.fovy.to_degrees(),
            near: p.near,
            far: p.far,
            position: p.position,
            target: p.target,
        }
    }
}

impl CameraConfig {
    #[must_use]
    pub fn properties(&self, aspect_ratio: f32) -> camera::Properties {
        camera::Properties {
            aspect_ratio,
            fovy: self.fovy_degrees.to_radians(),
            near: self.near,
            far: self.far,
            position: self.position,
            target: self.target,
        }
    }
}

/// A joint that follows the pointer and how far it may turn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub role: JointRole,
    pub degree_limit: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model_path: PathBuf,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub model_yaw_degrees: f32,
    /// Linear RGBA
    pub background: [f32; 4],
    pub tracking: Vec<TrackingConfig>,
    pub bones: BTreeMap<JointRole, String>,
}

impl Default for Config {
    fn default() -> Self {
        let tracking = [
            JointRole::Neck,
            JointRole::Back,
            JointRole::LowerBack,
            JointRole::Waist,
        ]
        .into_iter()
        .map(|role| TrackingConfig {
            role,
            degree_limit: DEFAULT_DEGREE_LIMIT,
        })
        .collect();

        Self {
            model_path: PathBuf::from("assets/Soldier.glb"),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            model_yaw_degrees: 180.0,
            // 0xf1f1f1 in linear space
            background: [0.879, 0.879, 0.879, 1.0],
            tracking,
            bones: registry::mixamo_bone_names(),
        }
    }
}

impl Config {
    /// # Errors
    /// May return `MrError`
    pub fn load(path: &Path) -> Result<Self, MrError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        info!("Config loaded from {:?}", path);
        Ok(config)
    }

    /// # Errors
    /// May return `MrError`
    pub fn from_yaml(text: &str) -> Result<Self, MrError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_DEGREE_LIMIT};
    use crate::registry::JointRole;
    use nalgebra_glm as glm;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.tracking.len(), 4);
        assert!(config
            .tracking
            .iter()
            .all(|t| (t.degree_limit - DEFAULT_DEGREE_LIMIT).abs() < 0.001));
        assert_eq!(config.bones[&JointRole::Neck], "mixamorigNeck");
        assert!((config.camera.fovy_degrees - 50.0).abs() < 0.001);
    }

    #[test]
    fn partial_yaml() {
        let yaml = r"
model_path: models/robot.glb
camera:
  position: [0.0, 1.5, 4.0]
tracking:
  - role: neck
    degree_limit: 45.0
bones:
  neck: Head_Neck
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.model_path.to_str(), Some("models/robot.glb"));
        assert_eq!(config.camera.position, glm::vec3(0.0, 1.5, 4.0));
        assert!((config.camera.near - 0.01).abs() < 0.0001);
        assert_eq!(config.tracking.len(), 1);
        assert_eq!(config.tracking[0].role, JointRole::Neck);
        assert_eq!(config.bones.len(), 1);
        assert_eq!(config.bones[&JointRole::Neck], "Head_Neck");
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn bad_yaml() {
        assert!(Config::from_yaml("tracking: 7").is_err());
    }
}
