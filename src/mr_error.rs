use std::{error, fmt};
use winit::error::OsError;

/// Unified error type
///
/// None of these are expected during steady state operation. Loading the
/// model is the only hard failure path and even that is reported rather
/// than escalated: the application keeps running with an empty joint
/// registry.
///
/// Some error types from other crates are very large so are boxed.
#[derive(Debug)]
pub enum MrError {
    NoScene,
    EmptyScene,
    LoaderDisconnected,
    WinitOsError(OsError),
    SerdeYamlError(Box<serde_yaml::Error>),
    StdIoError(std::io::Error),
    GltfError(Box<gltf::Error>),
}

impl error::Error for MrError {}

impl fmt::Display for MrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoScene => write!(f, "asset does not contain a scene"),
            Self::EmptyScene => write!(f, "asset scene has no nodes"),
            Self::LoaderDisconnected => {
                write!(f, "asset loader stopped without a result")
            }
            Self::WinitOsError(e) => write!(f, "OsError {e}"),
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
            Self::StdIoError(e) => write!(f, "std::io::Error: {e}"),
            Self::GltfError(e) => write!(f, "gltf Error: {e}"),
        }
    }
}

impl From<serde_yaml::Error> for MrError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}

impl From<std::io::Error> for MrError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl From<gltf::Error> for MrError {
    fn from(e: gltf::Error) -> Self {
        Self::GltfError(Box::new(e))
    }
}

impl From<OsError> for MrError {
    fn from(e: OsError) -> Self {
        Self::WinitOsError(e)
    }
}
