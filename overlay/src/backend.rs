//! Software graphics binding
//!
//! Implements [`GraphicsBinding`] on a `tiny-skia` pixmap. It plays the GPU's
//! part: one staging slot for the element constants, one for the sprite
//! constants, and a "shader" that tints the texture by the staged color.
//!
//! Shading rules:
//! - texture pixels are multiplied by `adjusted_color`
//! - with `premultiply_alpha` unset, the color is straight alpha and its RGB is
//!   scaled by its alpha; when set, RGB is used as given
//! - brightness rises from 80% to 100% with the hover ratio
//! - shadow passes are offset down-right by [`SHADOW_OFFSET`] of the target size

use std::collections::HashMap;
use std::path::Path;

use radial_core::{
    ElementShaderState, GraphicsBinding, Rgba, SpriteShaderState, TextureHandle,
};
use thiserror::Error;
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8,
    Stroke, Transform,
};

/// Shadow displacement as a fraction of the target size
pub const SHADOW_OFFSET: f32 = 0.006;

/// Brightness of an element at zero hover
const UNHOVERED_BRIGHTNESS: f32 = 0.8;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
    #[error("draw issued with nothing staged")]
    NothingStaged,
    #[error("unknown texture id {0}")]
    UnknownTexture(u32),
    #[error("failed to write {path}: {reason}")]
    Encode { path: String, reason: String },
}

/// Software render target plus its texture table
pub struct SoftwareBinding {
    target: Pixmap,
    textures: HashMap<u32, Pixmap>,
    next_texture_id: u32,
    staged_element: Option<ElementShaderState>,
    staged_sprite: Option<SpriteShaderState>,
    draw_calls: usize,
}

impl SoftwareBinding {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let target = Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        Ok(Self {
            target,
            textures: HashMap::new(),
            next_texture_id: 1,
            staged_element: None,
            staged_sprite: None,
            draw_calls: 0,
        })
    }

    /// Take ownership of `pixmap` and return a handle elements can reference
    pub fn register_texture(&mut self, pixmap: Pixmap) -> TextureHandle {
        let id = self.next_texture_id;
        self.next_texture_id += 1;
        let handle = TextureHandle::new(id, pixmap.width(), pixmap.height());
        self.textures.insert(id, pixmap);
        handle
    }

    /// Clear the target and both staging slots
    pub fn begin_frame(&mut self) {
        self.target.fill(Color::TRANSPARENT);
        self.staged_element = None;
        self.staged_sprite = None;
        self.draw_calls = 0;
    }

    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn target(&self) -> &Pixmap {
        &self.target
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.target.save_png(path).map_err(|e| RenderError::Encode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Tinted copy of `texture` according to the staged constants
    fn shade(texture: &Pixmap, element: &ElementShaderState, sprite: &SpriteShaderState) -> Pixmap {
        let [r, g, b, a] = element.adjusted_color.map(|c| c.clamp(0.0, 1.0));
        let brightness = UNHOVERED_BRIGHTNESS
            + (1.0 - UNHOVERED_BRIGHTNESS) * sprite.hover_ratio.clamp(0.0, 1.0);
        let rgb_scale = if element.premultiplied() { 1.0 } else { a };
        let tint = [r * rgb_scale * brightness, g * rgb_scale * brightness, b * rgb_scale * brightness];

        let mut shaded = texture.clone();
        for px in shaded.pixels_mut() {
            let alpha = (px.alpha() as f32 * a).round() as u8;
            let channel = |c: u8, t: f32| ((c as f32 * t).round() as u8).min(alpha);
            let out = PremultipliedColorU8::from_rgba(
                channel(px.red(), tint[0]),
                channel(px.green(), tint[1]),
                channel(px.blue(), tint[2]),
                alpha,
            );
            *px = out.unwrap_or(PremultipliedColorU8::TRANSPARENT);
        }
        shaded
    }
}

impl GraphicsBinding for SoftwareBinding {
    type Error = RenderError;

    fn stage_element(&mut self, state: &ElementShaderState) -> Result<(), Self::Error> {
        self.staged_element = Some(*state);
        Ok(())
    }

    fn stage_sprite(&mut self, state: &SpriteShaderState) -> Result<(), Self::Error> {
        self.staged_sprite = Some(*state);
        Ok(())
    }

    fn draw_sprite(&mut self, texture: &TextureHandle) -> Result<(), Self::Error> {
        let (Some(element), Some(sprite)) = (self.staged_element, self.staged_sprite) else {
            return Err(RenderError::NothingStaged);
        };
        let source = self
            .textures
            .get(&texture.id)
            .ok_or(RenderError::UnknownTexture(texture.id))?;

        let target_w = self.target.width() as f32;
        let target_h = self.target.height() as f32;
        let [cx, cy, w, h] = sprite.sprite_dimensions;
        let (mut left, mut top) = ((cx - w / 2.0) * target_w, (cy - h / 2.0) * target_h);
        if sprite.is_shadow() {
            left += SHADOW_OFFSET * target_w;
            top += SHADOW_OFFSET * target_h;
        }

        let scale_x = w * target_w / source.width() as f32;
        let scale_y = h * target_h / source.height() as f32;
        if scale_x <= 0.0 || scale_y <= 0.0 {
            tracing::trace!(texture = texture.id, "Degenerate sprite, nothing drawn");
            return Ok(());
        }

        let shaded = Self::shade(source, &element, &sprite);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let transform = Transform::from_scale(scale_x, scale_y).post_translate(left, top);
        self.target
            .draw_pixmap(0, 0, shaded.as_ref(), &paint, transform, None);
        self.draw_calls += 1;
        Ok(())
    }
}

/// Procedural element icon: a filled disc with a darker rim
pub fn disc_texture(size: u32, fill: Rgba) -> Result<Pixmap, RenderError> {
    let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::Allocation {
        width: size,
        height: size,
    })?;
    let radius = size as f32 / 2.0;
    let Some(circle) = PathBuilder::from_circle(radius, radius, radius * 0.9) else {
        return Ok(pixmap);
    };

    let [r, g, b, a] = fill.to_rgba8();
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color_rgba8(r, g, b, a);
    pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);

    paint.set_color_rgba8(r / 2, g / 2, b / 2, a);
    let stroke = Stroke {
        width: radius * 0.1,
        ..Stroke::default()
    };
    pixmap.stroke_path(&circle, &paint, &stroke, Transform::identity(), None);
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use radial_core::SpriteDimensions;

    fn centre_pixel(binding: &SoftwareBinding) -> PremultipliedColorU8 {
        let t = binding.target();
        t.pixel(t.width() / 2, t.height() / 2).unwrap()
    }

    fn staged(binding: &mut SoftwareBinding, color: [f32; 4], shadow: bool) {
        binding
            .stage_element(&ElementShaderState::new(color, 1.0, false))
            .unwrap();
        binding
            .stage_sprite(&SpriteShaderState::new(
                SpriteDimensions::new(0.5, 0.5, 0.5, 0.5),
                shadow,
                1.0,
            ))
            .unwrap();
    }

    #[test]
    fn test_draw_requires_staging() {
        let mut binding = SoftwareBinding::new(64, 64).unwrap();
        let tex = binding.register_texture(disc_texture(32, Rgba::WHITE).unwrap());
        assert!(matches!(
            binding.draw_sprite(&tex),
            Err(RenderError::NothingStaged)
        ));
    }

    #[test]
    fn test_unknown_texture() {
        let mut binding = SoftwareBinding::new(64, 64).unwrap();
        staged(&mut binding, [1.0; 4], false);
        let err = binding.draw_sprite(&TextureHandle::new(42, 8, 8)).unwrap_err();
        assert!(matches!(err, RenderError::UnknownTexture(42)));
    }

    #[test]
    fn test_tinted_draw_covers_centre() {
        let mut binding = SoftwareBinding::new(64, 64).unwrap();
        let tex = binding.register_texture(disc_texture(32, Rgba::WHITE).unwrap());
        binding.begin_frame();
        staged(&mut binding, [1.0, 0.0, 0.0, 1.0], false);
        binding.draw_sprite(&tex).unwrap();

        let px = centre_pixel(&binding);
        assert_eq!(binding.draw_calls(), 1);
        assert!(px.alpha() > 200);
        assert!(px.red() > 200);
        assert_eq!(px.green(), 0);
        assert_eq!(px.blue(), 0);
    }

    #[test]
    fn test_shadow_is_black() {
        let mut binding = SoftwareBinding::new(64, 64).unwrap();
        let tex = binding.register_texture(disc_texture(32, Rgba::WHITE).unwrap());
        staged(&mut binding, [0.0, 0.0, 0.0, 0.5], true);
        binding.draw_sprite(&tex).unwrap();

        let px = centre_pixel(&binding);
        assert_eq!((px.red(), px.green(), px.blue()), (0, 0, 0));
        assert!(px.alpha() > 100 && px.alpha() < 140);
    }

    #[test]
    fn test_begin_frame_clears() {
        let mut binding = SoftwareBinding::new(64, 64).unwrap();
        let tex = binding.register_texture(disc_texture(32, Rgba::WHITE).unwrap());
        staged(&mut binding, [1.0; 4], false);
        binding.draw_sprite(&tex).unwrap();
        binding.begin_frame();

        assert_eq!(centre_pixel(&binding).alpha(), 0);
        assert_eq!(binding.draw_calls(), 0);
        assert!(matches!(
            binding.draw_sprite(&tex),
            Err(RenderError::NothingStaged)
        ));
    }
}
