//! Application lifecycle management.
//!
//! Owns the window, the renderer and the viewer session, and drives playback
//! from the redraw loop.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::input::InputHandler;
use crate::renderer::Renderer;
use crate::session::ViewerSession;
use crate::timing::{FpsCounter, TickClock};
use crate::ui::ViewerUi;

/// Window title.
const WINDOW_TITLE: &str = "SpriteSheet Animator";

/// Application state.
struct FlipbookApp {
    /// Viewer configuration
    config: ViewerConfig,
    /// Window handle (created after resume)
    window: Option<Arc<Window>>,
    /// Renderer (initialized after window creation)
    renderer: Option<Renderer>,

    /// Keyboard input
    input: InputHandler,
    /// Playback tick clock
    clock: TickClock,
    /// FPS counter for display
    fps_counter: FpsCounter,

    /// Registry, playback and loaded sheet
    session: ViewerSession,
    /// egui panels
    ui: ViewerUi,
}

impl FlipbookApp {
    /// Creates a new application instance.
    fn new(config: ViewerConfig) -> Self {
        Self {
            window: None,
            renderer: None,
            input: InputHandler::new(),
            clock: TickClock::new(config.target_tick_rate_hz),
            fps_counter: FpsCounter::new(),
            session: ViewerSession::new(&config),
            ui: ViewerUi::new(&config),
            config,
        }
    }

    /// Apply pending input, run due playback ticks and draw.
    fn update_and_render(&mut self) {
        for action in self.input.drain() {
            self.session.handle_key(action);
        }

        for _ in 0..self.clock.poll() {
            self.session.tick();
        }

        let fps = self.fps_counter.tick();
        let fps = self.config.show_fps.then_some(fps);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let result = renderer.render_with_ui(window, |ctx| {
                self.ui.show(ctx, &mut self.session, &self.config, fps);
            });

            if let Err(e) = result {
                warn!("Render error: {e}");
            }
        }
    }

    /// Save settings and stop the event loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        info!("Shutting down...");
        self.config.start_facing = self.ui.facing();
        if let Err(e) = self.config.save() {
            warn!("Failed to save config: {e}");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for FlipbookApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        info!("Application resumed, creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                info!("Window created successfully");

                match pollster::block_on(Renderer::new(Arc::clone(&window), self.config.vsync)) {
                    Ok(renderer) => {
                        self.session.set_max_texture_side(renderer.max_texture_side());
                        self.renderer = Some(renderer);
                    },
                    Err(e) => {
                        warn!("Failed to initialize renderer: {e:#}");
                        event_loop.exit();
                        return;
                    },
                }

                window.request_redraw();
                self.window = Some(window);
                self.clock.reset();

                info!(
                    "Flipbook ready - {}x{} @ {} ticks/s, {} ticks per frame",
                    self.config.window_width,
                    self.config.window_height,
                    self.config.target_tick_rate_hz,
                    self.config.ticks_per_frame
                );
            },
            Err(e) => {
                warn!("Failed to create window: {e}");
                event_loop.exit();
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let text_focus = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => {
                renderer.handle_event(window, &event);
                renderer.wants_keyboard_input()
            },
            _ => false,
        };
        self.input.handle_event(&event, text_focus);

        if self.input.quit_requested() {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            },
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
                self.config.window_width = new_size.width;
                self.config.window_height = new_size.height;
            },
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_scale_factor(scale_factor);
                }
            },
            WindowEvent::RedrawRequested => {
                self.update_and_render();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            },
            _ => {},
        }
    }
}

/// Runs the viewer until the window is closed.
pub fn run() -> Result<()> {
    let mut config = ViewerConfig::load();
    config.validate();

    info!("Configuration loaded:");
    info!("  Window: {}x{}", config.window_width, config.window_height);
    info!("  VSync: {}", config.vsync);
    info!(
        "  Playback: {} Hz, {} ticks per frame",
        config.target_tick_rate_hz, config.ticks_per_frame
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = FlipbookApp::new(config);

    info!("Starting event loop...");
    event_loop.run_app(&mut app)?;

    Ok(())
}
