//! Rendering backend contract.
//!
//! The simulation draws through the [`Renderer`] trait only. The windowed
//! build plugs in [`RaylibRenderer`](crate::raylib_backend::RaylibRenderer);
//! tests use a recording fake.
//!
//! World-space calls (`render_texture`) are transformed by the camera set
//! with `camera_look_at`; `draw_text` is always in screen space.

use std::ops::{Deref, DerefMut};
use std::path::Path;

use crate::geometry::{Color, Rect, Vec2};

/// Opaque handle to a texture owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

pub trait Renderer {
    /// Load an image file and keep it alive for the rest of the session.
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, String>;
    /// Limit camera movement to this world rectangle.
    fn set_world_bounds(&mut self, bounds: Rect);
    /// Center the camera on a world position.
    fn camera_look_at(&mut self, x: f32, y: f32);
    /// Start a frame, filling the screen with the current draw color.
    fn clear(&mut self);
    fn set_draw_color(&mut self, color: Color);
    /// Finish the frame and show it.
    fn present(&mut self);
    /// Draw the `src` part of a texture into the world-space `dst` rectangle.
    fn render_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect);
    /// Draw text in screen space with the current draw color.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32);
    fn window_size(&self) -> (i32, i32);
    /// Convert a screen position (e.g. a mouse click) to world coordinates.
    fn to_world_coordinates(&self, screen_x: f32, screen_y: f32) -> Vec2;
}

/// `NonSend` resource wrapping the active renderer.
pub struct RendererRes(pub Box<dyn Renderer>);

impl RendererRes {
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        RendererRes(Box::new(renderer))
    }
}

impl Deref for RendererRes {
    type Target = dyn Renderer;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for RendererRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

/// One call recorded by [`HeadlessRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Texture {
        texture: TextureHandle,
        src: Rect,
        dst: Rect,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        font_size: i32,
    },
    CameraLookAt(Vec2),
    Present,
}

/// Renderer without a window: textures are numbered in load order and every
/// draw call is appended to a shared log.
///
/// Used for headless simulation and tests. Clone the handle from
/// [`HeadlessRenderer::log`] before boxing the renderer to inspect frames later.
pub struct HeadlessRenderer {
    textures: Vec<std::path::PathBuf>,
    log: std::rc::Rc<std::cell::RefCell<Vec<DrawCall>>>,
    color: Color,
    window: (i32, i32),
    camera: Vec2,
}

impl HeadlessRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        HeadlessRenderer {
            textures: Vec::new(),
            log: Default::default(),
            color: Color::BLACK,
            window: (width, height),
            camera: Vec2::ZERO,
        }
    }

    /// Shared handle to the recorded draw calls.
    pub fn log(&self) -> std::rc::Rc<std::cell::RefCell<Vec<DrawCall>>> {
        self.log.clone()
    }

    /// Image path a texture handle was loaded from.
    pub fn texture_path(&self, texture: TextureHandle) -> Option<&Path> {
        self.textures.get(texture.0 as usize).map(|p| p.as_path())
    }

    fn record(&self, call: DrawCall) {
        self.log.borrow_mut().push(call);
    }
}

impl Renderer for HeadlessRenderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, String> {
        self.textures.push(path.to_path_buf());
        Ok(TextureHandle(self.textures.len() as u32 - 1))
    }

    /// The headless camera is never clamped.
    fn set_world_bounds(&mut self, _bounds: Rect) {}

    fn camera_look_at(&mut self, x: f32, y: f32) {
        self.camera = Vec2::new(x, y);
        self.record(DrawCall::CameraLookAt(self.camera));
    }

    fn clear(&mut self) {
        self.record(DrawCall::Clear(self.color));
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn present(&mut self) {
        self.record(DrawCall::Present);
    }

    fn render_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect) {
        self.record(DrawCall::Texture { texture, src, dst });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32) {
        self.record(DrawCall::Text {
            text: text.to_owned(),
            x,
            y,
            font_size,
        });
    }

    fn window_size(&self) -> (i32, i32) {
        self.window
    }

    /// The camera keeps its target at the window center.
    fn to_world_coordinates(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        let (w, h) = self.window;
        Vec2::new(
            screen_x - w as f32 * 0.5 + self.camera.x,
            screen_y - h as f32 * 0.5 + self.camera.y,
        )
    }
}
