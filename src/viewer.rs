//! Standalone viewport window backed by winit.
//!
//! ```no_run
//! # use gantry::Viewer;
//! Viewer::builder()
//!     .with_title("gantry")
//!     .with_size(600, 600)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::error::GantryError;
use crate::gpu::{MeshRenderer, RenderContext};
use crate::input::{InputEvent, Modifiers, PointerButtons};
use crate::options::Options;
use crate::viewport::Viewport;

/// Winit line-delta scroll units converted to pixel-ish units.
const LINE_SCROLL_SCALE: f32 = 20.0;

/// One-shot viewport setup hook, run after the window exists.
pub type SetupFn = Box<dyn FnOnce(&mut Viewport)>;
/// Per-frame update hook with the elapsed seconds since the last frame.
pub type FrameFn = Box<dyn FnMut(&mut Viewport, f32)>;
/// Formats the observable camera translation into a window title.
pub type StatusFn = Box<dyn Fn(Vec3) -> String>;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    title: String,
    size: (u32, u32),
    options: Option<Options>,
    setup: Option<SetupFn>,
    frame: Option<FrameFn>,
    status: Option<StatusFn>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            title: "Gantry".into(),
            size: (600, 600),
            options: None,
            setup: None,
            frame: None,
            status: None,
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the viewport size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Run a setup hook once the viewport exists (supply content here).
    #[must_use]
    pub fn on_ready(mut self, setup: impl FnOnce(&mut Viewport) + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Run an update hook every frame (drive animations here).
    #[must_use]
    pub fn on_frame(
        mut self,
        frame: impl FnMut(&mut Viewport, f32) + 'static,
    ) -> Self {
        self.frame = Some(Box::new(frame));
        self
    }

    /// Mirror the observable camera translation into the window title
    /// whenever it changes.
    #[must_use]
    pub fn with_status(mut self, status: impl Fn(Vec3) -> String + 'static) -> Self {
        self.status = Some(Box::new(status));
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer { builder: self }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window hosting a [`Viewport`].
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    builder: ViewerBuilder,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed.
    pub fn run(self) -> Result<(), GantryError> {
        let event_loop =
            EventLoop::new().map_err(|e| GantryError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let b = self.builder;
        let mut app = ViewerApp {
            window: None,
            context: None,
            renderer: None,
            viewport: None,
            last_frame_time: Instant::now(),
            cursor: (0.0, 0.0),
            buttons: PointerButtons::default(),
            modifiers: Modifiers::default(),
            title: b.title,
            size: b.size,
            options: b.options.unwrap_or_default(),
            setup: b.setup,
            frame: b.frame,
            status: b.status,
            moved_to: Rc::new(RefCell::new(None)),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GantryError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    context: Option<RenderContext>,
    renderer: Option<MeshRenderer>,
    viewport: Option<Viewport>,
    last_frame_time: Instant,
    /// Last cursor position in physical pixels.
    cursor: (f32, f32),
    /// Currently held pointer buttons.
    buttons: PointerButtons,
    /// Currently held sensitivity modifiers.
    modifiers: Modifiers,
    title: String,
    size: (u32, u32),
    options: Options,
    setup: Option<SetupFn>,
    frame: Option<FrameFn>,
    status: Option<StatusFn>,
    /// Latest camera translation, set by the viewport's change listener
    /// and drained on redraw to refresh the title.
    moved_to: Rc<RefCell<Option<Vec3>>>,
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.size.0,
                self.size.1,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (inner.width, inner.height),
        )) {
            Ok(c) => c,
            Err(e) => {
                log::error!("failed to initialize GPU context: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = MeshRenderer::new(&context, &self.options.viewport);
        let mut viewport =
            Viewport::with_options(inner.width, inner.height, &self.options);

        if self.status.is_some() {
            let sink = Rc::clone(&self.moved_to);
            viewport.on_camera_moved(Box::new(move |pos| {
                *sink.borrow_mut() = Some(pos);
            }));
        }
        if let Some(setup) = self.setup.take() {
            setup(&mut viewport);
        }
        if let Some(status) = &self.status {
            window.set_title(&status(viewport.camera_position()));
        }

        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
        self.renderer = Some(renderer);
        self.viewport = Some(viewport);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let (Some(context), Some(viewport)) =
                    (&mut self.context, &mut self.viewport)
                {
                    context.resize(size.width, size.height);
                    viewport.resize(size.width, size.height);
                }
                if let (Some(renderer), Some(context)) =
                    (&mut self.renderer, &self.context)
                {
                    renderer.resize(context, &self.options.viewport);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let (Some(frame), Some(viewport)) =
                    (&mut self.frame, &mut self.viewport)
                {
                    frame(viewport, dt);
                }

                if let (Some(renderer), Some(context), Some(viewport)) =
                    (&mut self.renderer, &self.context, &self.viewport)
                {
                    match renderer.render(context, viewport) {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                if let Some(context) = &mut self.context {
                                    context.resize(inner.width, inner.height);
                                }
                            }
                        }
                        Err(e) => log::error!("render error: {e:?}"),
                    }
                }

                self.refresh_status();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    winit::event::MouseButton::Left => {
                        self.buttons.primary = pressed;
                    }
                    winit::event::MouseButton::Right => {
                        self.buttons.secondary = pressed;
                    }
                    winit::event::MouseButton::Middle => {
                        self.buttons.middle = pressed;
                    }
                    _ => {}
                }
                if pressed {
                    let (x, y) = self.cursor;
                    if let Some(viewport) = &mut self.viewport {
                        viewport
                            .handle_event(InputEvent::PointerPressed { x, y });
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                if self.buttons.any() {
                    let (x, y) = self.cursor;
                    let (buttons, modifiers) = (self.buttons, self.modifiers);
                    if let Some(viewport) = &mut self.viewport {
                        viewport.handle_event(InputEvent::PointerDragged {
                            x,
                            y,
                            buttons,
                            modifiers,
                        });
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Wheels arrive as line deltas; trackpads as pixel deltas
                // with two fingers on the surface.
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(x, y) => InputEvent::Scroll {
                        delta_x: x * LINE_SCROLL_SCALE,
                        delta_y: y * LINE_SCROLL_SCALE,
                        touch_points: 0,
                    },
                    MouseScrollDelta::PixelDelta(pos) => InputEvent::Scroll {
                        delta_x: pos.x as f32,
                        delta_y: pos.y as f32,
                        touch_points: 2,
                    },
                };
                if let Some(viewport) = &mut self.viewport {
                    viewport.handle_event(scroll);
                }
            }

            WindowEvent::PinchGesture { delta, .. } => {
                if let Some(viewport) = &mut self.viewport {
                    viewport.handle_event(InputEvent::Zoom {
                        factor: 1.0 + delta as f32,
                    });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state().into();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                if let Some(viewport) = &mut self.viewport {
                    viewport.handle_key(&key);
                }
                self.refresh_status();
            }

            _ => (),
        }
    }
}

impl ViewerApp {
    /// Drain the camera-moved signal into the window title.
    fn refresh_status(&mut self) {
        let Some(status) = &self.status else {
            return;
        };
        if let Some(pos) = self.moved_to.borrow_mut().take() {
            if let Some(window) = &self.window {
                window.set_title(&status(pos));
            }
        }
    }
}
