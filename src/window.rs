use crate::{
    config::WindowConfig,
    mr_error::MrError,
    types::{Frame, RenderSurface},
};
use log::{info, trace};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoop,
    window::{Window as WinitWindow, WindowBuilder as WinitWindowBuilder},
};

/// A window used as the render surface.
///
/// The backing size is what was last drawn at. It only changes through
/// `resize`, so the frame scheduler can see when the window's client area
/// has moved away from it.
pub struct WindowSurface {
    window: WinitWindow,
    backing: PhysicalSize<u32>,
}

impl WindowSurface {
    /// # Errors
    /// May return `MrError`
    pub fn new(
        event_loop: &EventLoop<()>,
        properties: &WindowConfig,
    ) -> Result<Self, MrError> {
        let window = WinitWindowBuilder::new()
            .with_inner_size(LogicalSize::new(
                properties.width,
                properties.height,
            ))
            .with_title(&properties.title)
            .build(event_loop)?;
        let backing = window.inner_size();
        info!(
            "Window created, backing {}x{}, scale factor {}",
            backing.width,
            backing.height,
            window.scale_factor()
        );
        Ok(Self { window, backing })
    }
}

impl RenderSurface for WindowSurface {
    fn backing_size(&self) -> [u32; 2] {
        [self.backing.width, self.backing.height]
    }

    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    fn logical_size(&self) -> [f64; 2] {
        let size: LogicalSize<f64> =
            self.window.inner_size().to_logical(self.scale_factor());
        [size.width, size.height]
    }

    fn resize(&mut self, logical: [f64; 2]) {
        self.backing = LogicalSize::new(logical[0], logical[1])
            .to_physical(self.scale_factor());
        trace!("backing resized to {:?}", self.backing);
    }

    fn present(&mut self, frame: &Frame) -> Result<(), MrError> {
        trace!(
            "frame {} with {} joints at {}x{}",
            frame.number,
            frame.joints.len(),
            self.backing.width,
            self.backing.height
        );
        Ok(())
    }

    fn schedule_frame(&self) {
        self.window.request_redraw();
    }
}
