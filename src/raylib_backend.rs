//! Windowed backend on top of raylib.
//!
//! Both halves share one [`RaylibHandle`] through [`SharedHandle`]: the
//! renderer draws with it, the input source polls it and the main loop asks
//! it whether the window should close.
//!
//! Drawing is deferred: [`RaylibRenderer`] records the frame's calls and
//! replays them inside a single `begin_drawing` / `begin_mode2D` scope when
//! the frame is presented.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use log::{info, warn};
use raylib::prelude::{
    Camera2D, Color as RlColor, KeyboardKey, MouseButton, RaylibDraw, RaylibHandle,
    RaylibMode2DExt, RaylibThread, Rectangle, Texture2D, Vector2 as RlVector2,
};

use crate::events::input::InputAction;
use crate::geometry::{Color, Rect, Vec2};
use crate::resources::inputsource::InputSource;
use crate::resources::renderer::{Renderer, TextureHandle};

pub type SharedHandle = Rc<RefCell<RaylibHandle>>;

/// Open the game window.
pub fn open_window(width: i32, height: i32, title: &str, target_fps: u32) -> (SharedHandle, RaylibThread) {
    let (mut rl, thread) = raylib::init().size(width, height).title(title).build();
    rl.set_target_fps(target_fps);
    rl.set_exit_key(None);
    info!("Window opened: {}x{} @ {} fps", width, height, target_fps);
    (Rc::new(RefCell::new(rl)), thread)
}

fn to_rl_color(color: Color) -> RlColor {
    RlColor::new(color.r, color.g, color.b, color.a)
}

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(rect.x, rect.y, rect.width, rect.height)
}

enum Queued {
    Texture { index: usize, src: Rect, dst: Rect },
    Text {
        text: String,
        x: i32,
        y: i32,
        font_size: i32,
        color: Color,
    },
}

pub struct RaylibRenderer {
    rl: SharedHandle,
    thread: RaylibThread,
    textures: Vec<Texture2D>,
    queue: Vec<Queued>,
    camera: Camera2D,
    bounds: Option<Rect>,
    draw_color: Color,
    clear_color: Color,
}

impl RaylibRenderer {
    pub fn new(rl: SharedHandle, thread: RaylibThread) -> Self {
        let (width, height) = {
            let handle = rl.borrow();
            (handle.get_screen_width(), handle.get_screen_height())
        };
        let camera = Camera2D {
            offset: RlVector2 {
                x: width as f32 * 0.5,
                y: height as f32 * 0.5,
            },
            target: RlVector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
            zoom: 1.0,
        };
        Self {
            rl,
            thread,
            textures: Vec::new(),
            queue: Vec::new(),
            camera,
            bounds: None,
            draw_color: Color::WHITE,
            clear_color: Color::BLACK,
        }
    }

    /// Keep the camera view inside the world bounds on each axis the world
    /// is larger than the screen; center it on the others.
    fn clamp_target(&self, x: f32, y: f32) -> (f32, f32) {
        let Some(bounds) = self.bounds else {
            return (x, y);
        };
        let half_w = self.camera.offset.x / self.camera.zoom;
        let half_h = self.camera.offset.y / self.camera.zoom;
        let clamp_axis = |value: f32, start: f32, size: f32, half: f32| {
            if size <= half * 2.0 {
                start + size * 0.5
            } else {
                value.clamp(start + half, start + size - half)
            }
        };
        (
            clamp_axis(x, bounds.x, bounds.width, half_w),
            clamp_axis(y, bounds.y, bounds.height, half_h),
        )
    }
}

impl Renderer for RaylibRenderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, String> {
        let file = path
            .to_str()
            .ok_or_else(|| format!("non UTF-8 path {:?}", path))?;
        let texture = self
            .rl
            .borrow_mut()
            .load_texture(&self.thread, file)
            .map_err(|e| e.to_string())?;
        self.textures.push(texture);
        Ok(TextureHandle((self.textures.len() - 1) as u32))
    }

    fn set_world_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    fn camera_look_at(&mut self, x: f32, y: f32) {
        let (x, y) = self.clamp_target(x, y);
        self.camera.target = RlVector2 { x, y };
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.clear_color = self.draw_color;
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn present(&mut self) {
        let queue = std::mem::take(&mut self.queue);
        let mut rl = self.rl.borrow_mut();
        let mut d = rl.begin_drawing(&self.thread);
        d.clear_background(to_rl_color(self.clear_color));

        {
            let mut d2 = d.begin_mode2D(self.camera);
            for item in queue.iter() {
                if let Queued::Texture { index, src, dst } = item {
                    match self.textures.get(*index) {
                        Some(texture) => d2.draw_texture_pro(
                            texture,
                            to_rectangle(*src),
                            to_rectangle(*dst),
                            RlVector2 { x: 0.0, y: 0.0 },
                            0.0,
                            RlColor::WHITE,
                        ),
                        None => warn!("Unknown texture handle {}", index),
                    }
                }
            }
        }

        for item in queue.iter() {
            if let Queued::Text {
                text,
                x,
                y,
                font_size,
                color,
            } = item
            {
                d.draw_text(text, *x, *y, *font_size, to_rl_color(*color));
            }
        }
    }

    fn render_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect) {
        self.queue.push(Queued::Texture {
            index: texture.0 as usize,
            src,
            dst,
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32) {
        self.queue.push(Queued::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color: self.draw_color,
        });
    }

    fn window_size(&self) -> (i32, i32) {
        let rl = self.rl.borrow();
        (rl.get_screen_width(), rl.get_screen_height())
    }

    fn to_world_coordinates(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        Vec2::new(
            (screen_x - self.camera.offset.x) / self.camera.zoom + self.camera.target.x,
            (screen_y - self.camera.offset.y) / self.camera.zoom + self.camera.target.y,
        )
    }
}

/// Keyboard and mouse input read from raylib.
pub struct RaylibInput {
    rl: SharedHandle,
}

impl RaylibInput {
    pub fn new(rl: SharedHandle) -> Self {
        Self { rl }
    }

    fn keys(action: InputAction) -> &'static [KeyboardKey] {
        match action {
            InputAction::Up => &[KeyboardKey::KEY_W, KeyboardKey::KEY_UP],
            InputAction::Down => &[KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN],
            InputAction::Left => &[KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT],
            InputAction::Right => &[KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT],
            InputAction::Attack => &[KeyboardKey::KEY_SPACE],
            InputAction::Secondary => &[KeyboardKey::KEY_E],
            InputAction::Retry => &[KeyboardKey::KEY_R],
        }
    }
}

impl InputSource for RaylibInput {
    fn is_down(&self, action: InputAction) -> bool {
        let rl = self.rl.borrow();
        Self::keys(action).iter().any(|key| rl.is_key_down(*key))
    }

    fn poll_clicks(&mut self) -> Vec<Vec2> {
        let rl = self.rl.borrow();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let pos = rl.get_mouse_position();
            vec![Vec2::new(pos.x, pos.y)]
        } else {
            Vec::new()
        }
    }
}
