use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use viewer_camera::cli::Cli;
use viewer_camera::core::{Clock, SurfaceRenderer, WinitInput, WinitPointerCapture};
use viewer_camera::traits::PoseSink;
use viewer_camera::transport::JsonLinesSink;
use viewer_camera::{CameraControls, ControlsConfig, LockState, PerspectiveCamera};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.0, 5.0);
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.09,
    b: 0.11,
    a: 1.0,
};

/// Everything that exists once the window is up
struct Viewer {
    window: Arc<Window>,
    renderer: SurfaceRenderer,
    controls: CameraControls,
}

struct App {
    cli: Cli,
    config: ControlsConfig,
    clock: Clock,
    sink: Option<Box<dyn PoseSink>>,
    viewer: Option<Viewer>,
}

impl App {
    fn new(cli: Cli, config: ControlsConfig, sink: Box<dyn PoseSink>) -> Self {
        Self {
            cli,
            config,
            clock: Clock::new(),
            sink: Some(sink),
            viewer: None,
        }
    }

    fn create_viewer(&mut self, event_loop: &ActiveEventLoop) -> Result<Viewer> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("Viewer Camera")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            )
            .map(Arc::new)
            .context("Failed to create window")?;

        let renderer = SurfaceRenderer::new(Arc::clone(&window))?;

        let camera = PerspectiveCamera::new(self.cli.fov, renderer.aspect(), self.cli.near, self.cli.far)
            .with_pose(INITIAL_CAMERA_POSITION, glam::Quat::IDENTITY)
            .into_shared();

        let sink = self.sink.take().context("Pose sink already consumed")?;
        let capture = Box::new(WinitPointerCapture::new(Arc::clone(&window)));
        let controls = CameraControls::new(camera, &self.config, capture, sink)
            .context("Failed to set up camera controls")?;

        Ok(Viewer {
            window,
            renderer,
            controls,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        match self.create_viewer(event_loop) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                log::error!("{e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        let now = self.clock.now();

        match event {
            WindowEvent::CloseRequested => {
                viewer.controls.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                viewer.renderer.resize(size.width, size.height);
                viewer.controls.camera().borrow_mut().aspect = viewer.renderer.aspect();
                viewer.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                viewer.controls.update(now);
                if let Err(e) = viewer.renderer.render(CLEAR_COLOR) {
                    log::error!("Render error: {e:#}");
                }
            }
            event => {
                let locked = viewer.controls.lock_state() == LockState::Locked;
                if let Some(input) = WinitInput::translate_window_event(&event, locked) {
                    viewer.controls.handle_event(input, now);
                }
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        if let Some(input) = WinitInput::translate_device_event(&event) {
            viewer.controls.handle_event(input, self.clock.now());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        viewer.controls.update(self.clock.now());
        match viewer.controls.next_wakeup() {
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.instant_at(at))),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &mut self.viewer {
            viewer.controls.dispose();
            log::info!("Sent {} camera poses", viewer.controls.sent());
        }
    }
}

fn open_sink(cli: &Cli) -> Result<Box<dyn PoseSink>> {
    Ok(match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None => Box::new(JsonLinesSink::new(io::stdout())),
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.controls_config().context("Invalid controls configuration")?;
    let sink = open_sink(&cli)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config, sink);

    log::info!("Viewer camera - click to look, WASD/QE to move, Escape to release the pointer");
    event_loop.run_app(&mut app)?;

    Ok(())
}
