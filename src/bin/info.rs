//! Ringfall info viewer
//!
//! A fully independent process: polls the shared status file at ~30 Hz and
//! shows the bounce count and current boundary radius. Read-only; absent
//! or malformed data just displays zeros until the next good poll.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use ringfall::consts::*;
use ringfall::renderer::{RenderState, TextDraw, TextSprite, colors, text};
use ringfall::status;

const LINE_SIZE: f32 = 36.0;
const LINE_X: f32 = 20.0;
const BOUNCES_Y: f32 = 40.0;
const RADIUS_Y: f32 = 100.0;

/// A text line re-rasterized only when its content changes
struct CachedLine {
    content: String,
    sprite: Option<TextSprite>,
}

impl CachedLine {
    fn new() -> Self {
        Self {
            content: String::new(),
            sprite: None,
        }
    }

    fn update(
        &mut self,
        render_state: &RenderState,
        font: Option<&rusttype::Font<'static>>,
        content: String,
    ) {
        if self.content == content && self.sprite.is_some() {
            return;
        }
        self.sprite = font.map(|font| {
            let raster = text::rasterize(font, &content, LINE_SIZE, colors::TEXT);
            render_state.make_sprite(&raster.rgba, raster.width, raster.height)
        });
        self.content = content;
    }
}

struct InfoApp {
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    font: Option<rusttype::Font<'static>>,
    bounces_line: CachedLine,
    radius_line: CachedLine,
    status_path: PathBuf,
    next_poll: Instant,
}

impl InfoApp {
    fn new() -> Self {
        Self {
            window: None,
            render_state: None,
            font: None,
            bounces_line: CachedLine::new(),
            radius_line: CachedLine::new(),
            status_path: status::status_path(),
            next_poll: Instant::now(),
        }
    }

    fn frame(&mut self) {
        let snapshot = status::poll(&self.status_path);

        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };

        self.bounces_line.update(
            render_state,
            self.font.as_ref(),
            format!("Bounces: {}", snapshot.bounces),
        );
        self.radius_line.update(
            render_state,
            self.font.as_ref(),
            format!("Radius: {}", snapshot.radius as i64),
        );

        let mut texts = Vec::new();
        if let Some(sprite) = &self.bounces_line.sprite {
            texts.push(TextDraw {
                sprite,
                x: LINE_X,
                y: BOUNCES_Y,
            });
        }
        if let Some(sprite) = &self.radius_line.sprite {
            texts.push(TextDraw {
                sprite,
                x: LINE_X,
                y: RADIUS_Y,
            });
        }

        match render_state.render(&[], &texts) {
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

impl ApplicationHandler for InfoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window: Arc<Window> = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title("Info - Bounces & Radius")
                    .with_inner_size(PhysicalSize::new(INFO_WIDTH, INFO_HEIGHT))
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

        let size = window.inner_size();
        self.render_state = Some(pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
        )));
        self.font = text::load_system_font();

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Info window closed, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_poll {
            self.next_poll = now + Duration::from_millis(INFO_POLL_MS);
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_poll));
    }
}

fn main() {
    env_logger::init();
    log::info!("Ringfall info viewer starting");

    let event_loop = EventLoop::new().expect("Failed to create event loop");

    let mut app = InfoApp::new();
    event_loop.run_app(&mut app).expect("Event loop failed");
}
