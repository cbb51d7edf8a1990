//! Seam between wheel elements and the rendering backend
//!
//! Elements never touch GPU resources. They assemble small `#[repr(C)]`
//! payloads and hand them to a [`GraphicsBinding`], which owns the single
//! constant slot shared by every element and issues the actual draws.
//! Because staging takes `&mut self`, only one element payload can be staged
//! at a time and draws are strictly sequential.

use bytemuck::{Pod, Zeroable};

/// Opaque reference to a texture owned by the appearance provider.
///
/// The core only reads the dimensions; `id` is meaningful to the backend alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureHandle {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Height over width; 1.0 for degenerate textures
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.height as f32 / self.width as f32
        }
    }
}

/// Sprite placement in normalized screen space: centre `(x, y)`, size `(w, h)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpriteDimensions {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SpriteDimensions {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.w, self.h]
    }
}

/// Per-element constants
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ElementShaderState {
    pub adjusted_color: [f32; 4],
    pub element_hover_fade_in: f32,
    /// 0 or 1
    pub premultiply_alpha: u32,
    pub _padding: [u32; 2],
}

impl ElementShaderState {
    pub fn new(adjusted_color: [f32; 4], element_hover_fade_in: f32, premultiply_alpha: bool) -> Self {
        Self {
            adjusted_color,
            element_hover_fade_in,
            premultiply_alpha: premultiply_alpha as u32,
            _padding: [0; 2],
        }
    }

    pub fn premultiplied(&self) -> bool {
        self.premultiply_alpha != 0
    }
}

/// Per-sprite constants staged alongside [`ElementShaderState`] for each pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteShaderState {
    pub sprite_dimensions: [f32; 4],
    pub hover_ratio: f32,
    /// 0 or 1
    pub shadow: u32,
    pub _padding: [u32; 2],
}

impl SpriteShaderState {
    pub fn new(sprite: SpriteDimensions, shadow: bool, hover_ratio: f32) -> Self {
        Self {
            sprite_dimensions: sprite.to_array(),
            hover_ratio,
            shadow: shadow as u32,
            _padding: [0; 2],
        }
    }

    pub fn is_shadow(&self) -> bool {
        self.shadow != 0
    }
}

/// Rendering backend used by [`WheelElement::draw`](crate::WheelElement::draw).
///
/// Failures are reported through the backend's own error type and abort only
/// the current element's draw.
pub trait GraphicsBinding {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stage the element constants into the shared slot, replacing whatever
    /// was staged before.
    fn stage_element(&mut self, state: &ElementShaderState) -> Result<(), Self::Error>;

    /// Stage the sprite constants for the next draw.
    fn stage_sprite(&mut self, state: &SpriteShaderState) -> Result<(), Self::Error>;

    /// Draw `texture` with whatever is currently staged.
    fn draw_sprite(&mut self, texture: &TextureHandle) -> Result<(), Self::Error>;
}
