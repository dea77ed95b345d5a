//! Drives the per-frame work: resize, pose, present and reschedule
use crate::{
    mr_error::MrError,
    puppet::Puppet,
    types::{
        CameraTrait, Frame, KeyboardHandler, PointerHandler, RenderSurface,
        Viewport,
    },
};
use log::{info, trace};
use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalPosition,
    event::{Event, KeyboardInput, WindowEvent},
    event_loop::ControlFlow,
};

/// What `tick` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Nothing, the scheduler has not been started
    Return,
    /// A frame was presented at the existing size
    Continue,
    /// The backing store was resized to this size before presenting
    Resize([u32; 2]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Uninitialized,
    Running,
}

/// Wall clock time between reads
#[derive(Debug, Default)]
pub struct Clock {
    previous: Option<Instant>,
}

impl Clock {
    /// Time since the previous call, zero on the first call
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta = self
            .previous
            .map_or(Duration::ZERO, |previous| now - previous);
        self.previous = Some(now);
        delta
    }
}

/// True if the backing store no longer matches the logical size. `ratio` is
/// the number of physical pixels per logical pixel.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn needs_resize(backing: [u32; 2], ratio: f64, logical: [f64; 2]) -> bool {
    f64::from(backing[0]) / ratio != logical[0]
        || f64::from(backing[1]) / ratio != logical[1]
}

pub struct FrameScheduler {
    state: State,
    clock: Clock,
    frame_count: usize,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            clock: Clock::default(),
            frame_count: 0,
        }
    }

    /// Starts the loop by asking for the first frame. Later calls do
    /// nothing.
    pub fn start(&mut self, surface: &impl RenderSurface) {
        if self.state == State::Running {
            return;
        }
        info!("Frame scheduler started");
        self.state = State::Running;
        self.clock = Clock::default();
        surface.schedule_frame();
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, State::Running)
    }

    /// Number of frames presented so far
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Does one frame of work using the time since the previous tick
    ///
    /// # Errors
    /// May return `MrError` if presenting fails. The next frame has already
    /// been scheduled in that case.
    pub fn tick(
        &mut self,
        puppet: &mut Puppet,
        surface: &mut impl RenderSurface,
    ) -> Result<Action, MrError> {
        if self.state != State::Running {
            return Ok(Action::Return);
        }
        let delta = self.clock.delta();
        self.advance_frame(delta, puppet, surface)
    }

    /// Does one frame of work for a given time step
    ///
    /// # Errors
    /// May return `MrError` if presenting fails. The next frame has already
    /// been scheduled in that case.
    pub fn advance_frame(
        &mut self,
        delta: Duration,
        puppet: &mut Puppet,
        surface: &mut impl RenderSurface,
    ) -> Result<Action, MrError> {
        if self.state != State::Running {
            return Ok(Action::Return);
        }

        puppet.poll_asset();
        puppet.advance(delta);

        let mut action = Action::Continue;
        let logical = surface.logical_size();
        if logical[0] > 0.0
            && logical[1] > 0.0
            && needs_resize(
                surface.backing_size(),
                surface.scale_factor(),
                logical,
            )
        {
            surface.resize(logical);
            #[allow(clippy::cast_possible_truncation)]
            let aspect_ratio = (logical[0] / logical[1]) as f32;
            puppet.camera_mut().aspect_ratio(aspect_ratio);
            action = Action::Resize(surface.backing_size());
            trace!("resized to {:?}", surface.backing_size());
        }

        let joints = puppet.world_pose();
        let frame = Frame {
            number: self.frame_count,
            background: puppet.background(),
            view: puppet.camera().view_matrix(),
            proj: puppet.camera().proj_matrix(),
            joints: &joints,
        };
        let presented = surface.present(&frame);
        self.frame_count += 1;
        surface.schedule_frame();
        presented.map(|()| action)
    }
}

/// Handles events for the event loop. Returns `true` when a frame should be
/// rendered.
pub fn handle_event<H>(
    event: &Event<()>,
    surface: &impl RenderSurface,
    handler: &mut H,
    control_flow: &mut ControlFlow,
) -> bool
where
    H: KeyboardHandler + PointerHandler,
{
    match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position: LogicalPosition<f64> =
                    position.to_logical(surface.scale_factor());
                let logical = surface.logical_size();
                #[allow(clippy::cast_possible_truncation)]
                let viewport =
                    Viewport::new(logical[0] as f32, logical[1] as f32);
                #[allow(clippy::cast_possible_truncation)]
                let (x, y) = (position.x as f32, position.y as f32);
                handler.pointer_moved(x, y, viewport);
                false
            }

            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(keycode),
                        state,
                        ..
                    },
                ..
            } => {
                handler.input(*keycode, *state);
                false
            }

            WindowEvent::CloseRequested => {
                info!("CloseRequested event");
                control_flow.set_exit();
                false
            }

            _ => false,
        },

        Event::RedrawRequested(_) => true,

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{needs_resize, Clock};
    use std::time::Duration;

    #[test]
    fn resize_check() {
        assert!(!needs_resize([2000, 1600], 2.0, [1000.0, 800.0]));
        assert!(needs_resize([2000, 1600], 2.0, [1000.0, 801.0]));
        assert!(needs_resize([2000, 1600], 1.0, [1000.0, 800.0]));
        assert!(needs_resize([1000, 800], 1.0, [800.0, 800.0]));
        assert!(!needs_resize([1000, 800], 1.0, [1000.0, 800.0]));
    }

    #[test]
    fn fractional_scale() {
        // 1.25 * 800 = 1000 exactly
        assert!(!needs_resize([1000, 750], 1.25, [800.0, 600.0]));
        // 801 * 1.25 rounds to 1001, which maps back to 800.8
        assert!(needs_resize([1001, 750], 1.25, [801.0, 600.0]));
    }

    #[test]
    fn clock_resets_on_read() {
        let mut clock = Clock::default();
        assert_eq!(clock.delta(), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        let first = clock.delta();
        assert!(first >= Duration::from_millis(5));
        let second = clock.delta();
        assert!(second < first);
    }
}
