//! Ringfall entry point
//!
//! The simulation + render + audio process. Physics runs at a fixed 90 Hz
//! timestep behind an accumulator; rendering happens once per redraw; the
//! status snapshot is published after every frame for the companion
//! `ringfall-info` viewer.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use ringfall::audio::AudioFeedback;
use ringfall::consts::*;
use ringfall::renderer::{RenderState, TextDraw, TextSprite, colors, shapes, text};
use ringfall::sim::{self, SimState};
use ringfall::status::{self, StatusSnapshot};

struct App {
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    label: Option<TextSprite>,
    state: SimState,
    audio: Option<AudioFeedback>,
    status_path: PathBuf,
    accumulator: f32,
    last_frame: Option<Instant>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            render_state: None,
            label: None,
            state: SimState::new(),
            audio: AudioFeedback::new(),
            status_path: status::status_path(),
            accumulator: 0.0,
            last_frame: None,
        }
    }

    /// Run pending simulation ticks, then draw and publish one frame
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| (now - last).as_secs_f32().min(0.1))
            .unwrap_or(SIM_DT);
        self.last_frame = Some(now);

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(bounce) = sim::tick(&mut self.state) {
                if let Some(audio) = &mut self.audio {
                    audio.on_bounce(bounce.shrink_ratio);
                }
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.render();

        status::publish(
            &self.status_path,
            &StatusSnapshot {
                bounces: self.state.bounces,
                radius: self.state.boundary.radius,
            },
        );
    }

    fn render(&mut self) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };

        let state = &self.state;
        let camera = state.camera;
        let boundary_screen = state.boundary.center - camera;
        let ball_screen = state.ball.pos - camera;

        let mut vertices = Vec::new();

        // Boundary outline
        vertices.extend(shapes::outline(
            boundary_screen,
            state.boundary.radius,
            BOUNDARY_OUTLINE,
            colors::BOUNDARY,
        ));

        // Fading trail, clipped to the current boundary
        vertices.extend(shapes::trail(
            &state.trail,
            state.boundary.center,
            state.boundary.radius,
            camera,
            state.ball.radius,
        ));

        // Ball with a contrasting border on top of everything
        let [r, g, b] = state.ball_color();
        vertices.extend(shapes::disc(ball_screen, state.ball.radius, [r, g, b, 1.0]));
        vertices.extend(shapes::outline(
            ball_screen,
            state.ball.radius,
            BALL_BORDER,
            colors::BALL_BORDER,
        ));

        // Label riding above the shrinking circle
        let mut texts = Vec::new();
        if let Some(label) = &self.label {
            texts.push(TextDraw {
                sprite: label,
                x: boundary_screen.x - label.width as f32 / 2.0,
                y: boundary_screen.y
                    - state.boundary.radius
                    - LABEL_GAP
                    - label.height as f32 / 2.0,
            });
        }

        match render_state.render(&vertices, &texts) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = render_state.size;
                render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
            }
            Err(err) => log::warn!("Render error: {err:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window: Arc<Window> = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title("Bouncing Ball in Shrinking Circle")
                    .with_inner_size(PhysicalSize::new(WIDTH, HEIGHT))
                    .with_resizable(false),
            )
            .expect("Failed to create window")
            .into();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to get adapter");
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
        ));

        // Static label: rasterized once, drawn every frame
        self.label = text::load_system_font().map(|font| {
            let raster = text::rasterize(&font, LABEL_TEXT, LABEL_SIZE, colors::TEXT);
            render_state.make_sprite(&raster.rgba, raster.width, raster.height)
        });

        self.render_state = Some(render_state);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                log::info!("Escape pressed, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Ringfall starting");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop failed");
}
