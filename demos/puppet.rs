//! Demo of pointer and keyboard pose control using marionette
//!
//! Run with an optional YAML config file as the first argument. Move the
//! pointer to turn the head and spine, and use W S A D T G F H J L U O I K
//! to move the limbs.
use log::error;
use marionette::{
    asset::PendingLoad,
    config::Config,
    gltf_file::GltfLoader,
    puppet::Puppet,
    scheduler::{self, FrameScheduler},
    window::WindowSurface,
};
use std::path::Path;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() < 2 {
        Config::default()
    } else {
        Config::load(Path::new(&args[1])).unwrap()
    };

    let event_loop = EventLoop::new();
    let mut surface = WindowSurface::new(&event_loop, &config.window).unwrap();
    let mut puppet = Puppet::new(&config);

    // The model loads in the background while the first frames are drawn
    let pending =
        PendingLoad::spawn(GltfLoader, config.model_path.clone()).unwrap();
    puppet.begin_load(pending);

    let mut frame_scheduler = FrameScheduler::new();
    frame_scheduler.start(&surface);

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_wait();
        let do_render = scheduler::handle_event(
            &event,
            &surface,
            &mut puppet,
            control_flow,
        );
        if do_render {
            if let Err(e) = frame_scheduler.tick(&mut puppet, &mut surface) {
                error!("Frame failed: {e}");
            }
        }
    });
}
