use crate::{mr_error::MrError, skeleton::Skeleton};
use nalgebra_glm as glm;
use std::time::Duration;
use winit::event::{ElementState, VirtualKeyCode};

/// Logical (layout) size of the area the pointer moves over
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Angle mapping divides by half of each dimension so both must be
    /// positive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Trait for something that handles keyboard input events
pub trait KeyboardHandler {
    fn input(&mut self, keycode: VirtualKeyCode, state: ElementState);
}

/// Trait for something that handles pointer movement. Positions are in
/// logical pixels relative to the top left of `viewport`.
pub trait PointerHandler {
    fn pointer_moved(&mut self, x: f32, y: f32, viewport: Viewport);
}

/// Trait for camera matrices, needed for rendering
pub trait CameraTrait {
    fn view_matrix(&self) -> glm::Mat4;
    fn proj_matrix(&self) -> glm::Mat4;
}

/// Something that advances with wall clock time rather than frame count,
/// such as clip playback. Called once per frame before rendering.
pub trait TimeDriven {
    fn advance(&mut self, skeleton: Option<&mut Skeleton>, delta: Duration);
}

/// Everything needed to draw one frame
pub struct Frame<'a> {
    pub number: usize,
    pub background: [f32; 4],
    pub view: glm::Mat4,
    pub proj: glm::Mat4,
    /// World transform of every joint, indexed by `JointHandle::index`.
    /// Empty until the model has loaded.
    pub joints: &'a [glm::Mat4],
}

/// The output the frame scheduler draws to.
///
/// The backing store is measured in physical pixels. The logical size is
/// what the surface should currently be, for example a window's client area,
/// and is measured in logical pixels.
pub trait RenderSurface {
    fn backing_size(&self) -> [u32; 2];
    fn scale_factor(&self) -> f64;
    fn logical_size(&self) -> [f64; 2];

    /// Resizes the backing store to `logical` times the scale factor
    fn resize(&mut self, logical: [f64; 2]);

    /// # Errors
    /// May return `MrError`
    fn present(&mut self, frame: &Frame) -> Result<(), MrError>;

    /// Asks for `present` to be called again at the next display refresh
    fn schedule_frame(&self);
}
