// app.rs
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey, PhysicalKey},
    window::{Window, WindowId},
};

use crate::renderer::Renderer;
use crate::scene::{Direction, Scene};
use crate::settings::RenderSettings;

pub struct App {
    settings: RenderSettings,
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    scene: Scene,
    cursor: Vec2,
}

impl App {
    pub fn new(settings: RenderSettings) -> Self {
        let scene = Scene::demo(&settings);
        Self {
            settings,
            renderer: None,
            window: None,
            window_id: None,
            scene,
            cursor: Vec2::ZERO,
        }
    }

    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn resize(&mut self, event_loop: &ActiveEventLoop, size: PhysicalSize<u32>) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Err(err) = renderer.resize(size) {
            log::error!("Resize to {}x{} failed: {err}", size.width, size.height);
            if !err.is_frame_local() {
                event_loop.exit();
                return;
            }
        }
        self.scene.set_viewport(size.width, size.height);
        self.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let resolution = &self.settings.resolution;
        let attributes = Window::default_attributes()
            .with_title("shadow cubes")
            .with_inner_size(PhysicalSize::new(resolution.width, resolution.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            &self.settings,
            self.scene.buffer(),
        )) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("Failed to initialize renderer: {err}");
                event_loop.exit();
                return;
            }
        };

        let size = renderer.size();
        self.scene.set_viewport(size.width, size.height);

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if Some(id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(event_loop, size);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.resize(event_loop, size);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.scene.camera.press(self.cursor),
                ElementState::Released => self.scene.camera.release(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                if self.scene.camera.is_dragging() {
                    self.scene.camera.pointer_move(self.cursor);
                    self.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(direction) = Direction::from_key(code) {
                    self.scene.camera.on_key(direction);
                    self.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                let uniforms = self.scene.uniforms();
                if let Err(err) = renderer.render(&uniforms) {
                    if err.is_frame_local() {
                        log::error!("Skipped frame: {err}");
                        self.request_redraw();
                    } else {
                        log::error!("Render failed: {err}");
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}
