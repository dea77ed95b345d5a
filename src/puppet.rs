//! Application state: the character, its joints and the camera looking at
//! it. Owned by the event loop and passed to the frame scheduler.
use crate::{
    actuator,
    asset::{AssetState, PendingLoad},
    camera::Camera,
    command::PoseBindings,
    config::{Config, TrackingConfig},
    look::{self, LookAngles},
    mr_error::MrError,
    pose,
    registry::{JointRegistry, JointRole},
    skeleton::{JointHandle, Skeleton},
    types::{KeyboardHandler, PointerHandler, TimeDriven, Viewport},
};
use log::{debug, info, trace, warn};
use nalgebra_glm as glm;
use std::{collections::BTreeMap, time::Duration};
use winit::event::{ElementState, VirtualKeyCode};

/// A joint that follows the pointer, resolved against the loaded skeleton
#[derive(Clone, Copy, Debug)]
struct TrackedJoint {
    handle: JointHandle,
    degree_limit: f32,
    /// Euler Z at load, kept through every look rotation
    roll: f32,
}

pub struct Puppet {
    camera: Camera,
    asset: AssetState,
    skeleton: Option<Skeleton>,
    registry: JointRegistry,
    bone_names: BTreeMap<JointRole, String>,
    bindings: PoseBindings,
    tracking: Vec<TrackingConfig>,
    tracked: Vec<TrackedJoint>,
    model: glm::Mat4,
    background: [f32; 4],
    animator: Option<Box<dyn TimeDriven>>,
}

impl Puppet {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let aspect_ratio =
            config.window.width as f32 / config.window.height.max(1) as f32;
        Self {
            camera: Camera::new(config.camera.properties(aspect_ratio)),
            asset: AssetState::Uninitialized,
            skeleton: None,
            registry: JointRegistry::default(),
            bone_names: config.bones.clone(),
            bindings: PoseBindings::new(),
            tracking: config.tracking.clone(),
            tracked: Vec::new(),
            model: pose::model_yaw(config.model_yaw_degrees),
            background: config.background,
            animator: None,
        }
    }

    /// Starts the one and only model load. Ignored if a load has already
    /// been started.
    pub fn begin_load(&mut self, pending: PendingLoad) {
        if matches!(self.asset, AssetState::Uninitialized) {
            self.asset = AssetState::Loading(pending);
        } else {
            warn!("Model load already started, ignoring another");
        }
    }

    /// Collects the load result if it has arrived. Returns `true` on the
    /// call that completes the load, whether it succeeded or not.
    pub fn poll_asset(&mut self) -> bool {
        match self.asset.poll() {
            Some(result) => {
                self.finish_load(result);
                true
            }
            None => false,
        }
    }

    /// Attaches a loaded skeleton and resolves the joint registry. On
    /// failure the registry stays empty and the error has already been
    /// reported by the asset state.
    fn finish_load(&mut self, result: Result<Skeleton, MrError>) {
        let Ok(skeleton) = result else {
            return;
        };
        self.registry = JointRegistry::resolve(&skeleton, &self.bone_names);
        self.tracked = self
            .tracking
            .iter()
            .filter_map(|tracking| {
                let handle = self.registry.get(tracking.role)?;
                let roll = actuator::look_roll(&skeleton, handle)?;
                Some(TrackedJoint {
                    handle,
                    degree_limit: tracking.degree_limit,
                    roll,
                })
            })
            .collect();
        info!(
            "{} of {} joints resolved in {}",
            self.registry.len(),
            self.bone_names.len(),
            skeleton.name
        );
        self.skeleton = Some(skeleton);
    }

    /// Points every tracking joint at the pointer. All of them get the same
    /// angles, limited by their own degree limit.
    pub fn look_at_pointer(&mut self, x: f32, y: f32, viewport: Viewport) {
        if !viewport.is_valid() {
            debug!("Ignoring pointer with viewport {:?}", viewport);
            return;
        }
        for tracked in &self.tracked {
            let angles: LookAngles =
                look::mouse_degrees(x, y, tracked.degree_limit, viewport);
            actuator::apply_look_rotation(
                self.skeleton.as_mut(),
                Some(tracked.handle),
                angles,
                tracked.roll,
            );
        }
    }

    /// Applies the pose command bound to `key`, if any
    pub fn key_pressed(&mut self, key: VirtualKeyCode) {
        let Some(binding) = self.bindings.lookup(key) else {
            trace!("No binding for {:?}", key);
            return;
        };
        let applied = actuator::apply_pose_command(
            self.skeleton.as_mut(),
            self.registry.get(binding.role),
            &binding.quaternion(),
        );
        trace!("{} applied={}", binding.name, applied);
    }

    /// Installs something driven by wall clock time, such as clip playback
    pub fn set_animator(&mut self, animator: Box<dyn TimeDriven>) {
        self.animator = Some(animator);
    }

    /// Advances the time driven part of the state, if there is one
    pub fn advance(&mut self, delta: Duration) {
        if let Some(animator) = &mut self.animator {
            animator.advance(self.skeleton.as_mut(), delta);
        }
    }

    /// World transforms of every joint, empty if nothing is loaded
    #[must_use]
    pub fn world_pose(&self) -> Vec<glm::Mat4> {
        self.skeleton
            .as_ref()
            .map(|sk| pose::world_transforms(sk, &self.model))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub const fn asset_state(&self) -> &AssetState {
        &self.asset
    }

    #[must_use]
    pub const fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    #[must_use]
    pub const fn registry(&self) -> &JointRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn background(&self) -> [f32; 4] {
        self.background
    }
}

impl KeyboardHandler for Puppet {
    fn input(&mut self, keycode: VirtualKeyCode, state: ElementState) {
        // Only presses do anything. Held keys repeat as further presses.
        if state == ElementState::Pressed {
            self.key_pressed(keycode);
        }
    }
}

impl PointerHandler for Puppet {
    fn pointer_moved(&mut self, x: f32, y: f32, viewport: Viewport) {
        self.look_at_pointer(x, y, viewport);
    }
}
