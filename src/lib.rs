//! Pose control for rigged glTF characters. The head and spine follow the
//! pointer and keys nudge the limbs a quarter turn at a time.
pub mod actuator;
pub mod asset;
pub mod camera;
pub mod command;
pub mod config;
pub mod gltf_file;
pub mod look;
pub mod mr_error;
pub mod pose;
pub mod puppet;
pub mod registry;
pub mod scheduler;
pub mod skeleton;
pub mod types;
pub mod util;
pub mod window;
