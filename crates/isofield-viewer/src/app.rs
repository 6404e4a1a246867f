use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use isofield_engine::coords::Viewport;
use isofield_engine::field::SaddleWave;
use isofield_engine::grid::DomainBounds;
use isofield_engine::quality::{Command, QualityController};
use isofield_engine::time::FrameClock;
use isofield_engine::{ContourEngine, grid::FitMode};

use crate::gpu::{Gpu, GpuInit, SurfaceErrorAction};
use crate::renderer::Renderer;

/// Single-window interactive viewer.
///
/// Key map:
/// - `0`–`5`: resolution presets (1 / 10 / 100 / 500 / 1000 / 2000)
/// - `=` / `-`: grow / shrink the grid (both axes, debounced)
/// - arrows: adjust width (left/right) and height (up/down) separately
/// - `[` / `]`: fewer / more isolines
/// - `B`: toggle letterbox / overscan fit
/// - `Esc`: quit
pub struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    renderer: Renderer,
    engine: ContourEngine,
    clock: FrameClock,
    /// Delta time of the most recent frame; commands arriving between frames
    /// drain the debounce countdown with it.
    last_dt: f32,
}

impl ViewerApp {
    pub fn new() -> Self {
        let engine = ContourEngine::new(
            Box::new(SaddleWave),
            DomainBounds::default(),
            QualityController::new(100, 100, 10, FitMode::Letterbox),
        );
        Self {
            window: None,
            gpu: None,
            renderer: Renderer::new(),
            engine,
            clock: FrameClock::new(),
            last_dt: 0.0,
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(new_size);
        }
        self.engine
            .set_viewport(Viewport::new(new_size.width as f32, new_size.height as f32));
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, repeat: bool) {
        let cmd = match code {
            KeyCode::Escape => {
                event_loop.exit();
                return;
            }

            KeyCode::Digit0 => Command::SetResolution(1),
            KeyCode::Digit1 => Command::SetResolution(10),
            KeyCode::Digit2 => Command::SetResolution(100),
            KeyCode::Digit3 => Command::SetResolution(500),
            KeyCode::Digit4 => Command::SetResolution(1000),
            KeyCode::Digit5 => Command::SetResolution(2000),

            // Grow/shrink both axes through the preset path so a single
            // debounce check covers them.
            KeyCode::Equal => Command::SetResolution(self.engine.quality().width() + 1),
            KeyCode::Minus => {
                Command::SetResolution(self.engine.quality().width().saturating_sub(1))
            }

            KeyCode::ArrowRight => Command::IncreaseWidth,
            KeyCode::ArrowLeft => Command::DecreaseWidth,
            KeyCode::ArrowUp => Command::IncreaseHeight,
            KeyCode::ArrowDown => Command::DecreaseHeight,

            KeyCode::BracketRight => Command::IncreaseIsolines,
            KeyCode::BracketLeft => Command::DecreaseIsolines,

            KeyCode::KeyB => {
                // Edge-triggered; a held key must not oscillate the fit mode.
                if !repeat {
                    self.engine.apply(Command::ToggleFitMode, self.last_dt);
                }
                return;
            }

            _ => return,
        };
        self.engine.apply(cmd, self.last_dt);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else { return };

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => match gpu.handle_surface_error(err) {
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => return,
                SurfaceErrorAction::Fatal => {
                    log::error!("fatal surface error; exiting");
                    event_loop.exit();
                    return;
                }
            },
        };

        let ft = self.clock.tick();
        self.last_dt = ft.dt;

        match self.engine.tick(ft.dt) {
            Ok(upload) => {
                self.renderer.render(gpu, &mut frame.encoder, &frame.view, &upload);
            }
            Err(e) => {
                log::error!("contour pipeline failed: {e}");
                event_loop.exit();
                return;
            }
        }

        gpu.submit(frame);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("isofield")
            .with_inner_size(LogicalSize::new(900.0, 900.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(Gpu::new(window.clone(), GpuInit::default())) {
            Ok(gpu) => {
                let size = gpu.size();
                self.engine
                    .set_viewport(Viewport::new(size.width as f32, size.height as f32));
                self.gpu = Some(gpu);
            }
            Err(e) => {
                log::error!("GPU initialization failed: {e:#}");
                event_loop.exit();
                return;
            }
        }

        self.clock.reset();
        window.request_redraw();
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // The field is time-varying: keep redrawing continuously.
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(new_size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.resize(new_size);
                    if let Some(window) = self.window.as_ref() {
                        window.request_redraw();
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && let PhysicalKey::Code(code) = event.physical_key
                {
                    self.handle_key(event_loop, code, event.repeat);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
