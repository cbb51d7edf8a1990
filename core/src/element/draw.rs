//! Hover animation, shader payloads and the per-element draw call.

use std::f32::consts::TAU;

use radial_types::Rgba;

use super::WheelElement;
use crate::animation::{fade_ratio, lerp, smoothstep, MsTime};
use crate::graphics::{ElementShaderState, GraphicsBinding, SpriteDimensions, SpriteShaderState};
use crate::wheel::WheelContext;

/// Distance of an element's centre from the wheel centre, as a fraction of the
/// wheel sprite size
const ELEMENT_RADIUS: f32 = 0.25;

/// Element sprite size as a fraction of the wheel sprite size
const ELEMENT_BASE_SIZE: f32 = 0.3;

/// Size multiplier for a lone element drawn at the centre
const SINGLE_ELEMENT_SIZE: f32 = 1.6;

/// Size multiplier once the wheel is crowded (8+ elements)
const CROWDED_ELEMENT_SIZE: f32 = 0.75;

/// Size multiplier for `count` elements: 1.6 alone, 1.0 up to four, then
/// shrinking linearly to 0.75 at eight and beyond.
fn element_size_factor(count: usize) -> f32 {
    match count {
        0 | 1 => SINGLE_ELEMENT_SIZE,
        2..=4 => 1.0,
        _ => lerp(1.0, CROWDED_ELEMENT_SIZE, ((count - 4) as f32 / 4.0).min(1.0)),
    }
}

/// Unit offset of slot `n` of `count`, clockwise from the top (y grows downwards)
fn slot_offset(n: usize, count: usize) -> (f32, f32) {
    if count <= 1 {
        return (0.0, 0.0);
    }
    let angle = n as f32 / count as f32 * TAU;
    (angle.sin(), -angle.cos())
}

impl WheelElement {
    /// Hover fade-in progress in `[0, 1]`: 0 when hover began, 1 once the
    /// parent's fade-in duration has elapsed (immediately for a zero duration).
    pub fn hover_fade_in(&self, current_time: MsTime, parent: &impl WheelContext) -> f32 {
        fade_ratio(self.current_hover_time, current_time, parent.fade_in_duration_ms())
    }

    /// `color` blended from neutral white by `colorize_amount`, alpha unchanged
    pub fn adjusted_color(&self) -> Rgba {
        let amount = self.colorize_amount.clamp(0.0, 1.0);
        Rgba::WHITE
            .with_alpha(self.color.a)
            .lerp_rgb(self.color, amount)
    }

    fn shadow_color(&self) -> Rgba {
        Rgba::new(0.0, 0.0, 0.0, self.color.a * self.shadow_strength)
    }

    /// Element payload for the current instant
    pub fn shader_state(&self, current_time: MsTime, parent: &impl WheelContext) -> ElementShaderState {
        ElementShaderState::new(
            self.adjusted_color().to_array(),
            self.hover_fade_in(current_time, parent),
            self.premultiply_alpha,
        )
    }

    /// Stage the element payload for the current instant
    pub fn set_shader_state<B: GraphicsBinding>(
        &self,
        binding: &mut B,
        current_time: MsTime,
        parent: &impl WheelContext,
    ) -> Result<(), B::Error> {
        binding.stage_element(&self.shader_state(current_time, parent))
    }

    /// Stage the element and sprite payloads for one pass over `sprite`
    pub fn set_shader_state_for_sprite<B: GraphicsBinding>(
        &self,
        binding: &mut B,
        sprite: SpriteDimensions,
        shadow: bool,
        hover_ratio: f32,
    ) -> Result<(), B::Error> {
        self.stage_pass(binding, sprite, shadow, hover_ratio, 1.0)
    }

    fn stage_pass<B: GraphicsBinding>(
        &self,
        binding: &mut B,
        sprite: SpriteDimensions,
        shadow: bool,
        hover_ratio: f32,
        alpha_scale: f32,
    ) -> Result<(), B::Error> {
        let color = if shadow {
            self.shadow_color()
        } else {
            self.adjusted_color()
        };
        let color = color.with_alpha(color.a * alpha_scale);

        binding.stage_element(&ElementShaderState::new(
            color.to_array(),
            hover_ratio,
            self.premultiply_alpha,
        ))?;
        binding.stage_sprite(&SpriteShaderState::new(sprite, shadow, hover_ratio))
    }

    /// Sprite for slot `n` of `count` inside the wheel sprite, grown by `hover`
    pub fn layout(
        &self,
        n: usize,
        wheel_sprite: SpriteDimensions,
        count: usize,
        hover: f32,
        parent: &impl WheelContext,
    ) -> SpriteDimensions {
        let (dx, dy) = slot_offset(n, count);
        let size = ELEMENT_BASE_SIZE
            * element_size_factor(count)
            * parent.scale()
            * lerp(1.0, parent.hover_scale(), smoothstep(hover));

        SpriteDimensions {
            x: wheel_sprite.x + dx * ELEMENT_RADIUS * wheel_sprite.w,
            y: wheel_sprite.y + dy * ELEMENT_RADIUS * wheel_sprite.h,
            w: wheel_sprite.w * size,
            h: wheel_sprite.h * size * self.aspect_ratio,
        }
    }

    /// Draw this element as slot `n` of `active_elements_count`.
    ///
    /// The hovered element uses its fade-in as hover ratio; every other element
    /// uses the wheel's exit fade and is dimmed in proportion to the hovered
    /// element's fade-in. A shadow pass precedes the main pass when
    /// `shadow_strength > 0`.
    ///
    /// Returns `Ok(false)` without touching the binding when there is nothing
    /// to draw (no appearance, or an empty wheel).
    pub fn draw<B: GraphicsBinding>(
        &self,
        binding: &mut B,
        n: usize,
        sprite_dimensions: SpriteDimensions,
        active_elements_count: usize,
        current_time: MsTime,
        element_hovered: Option<&WheelElement>,
        parent: &impl WheelContext,
    ) -> Result<bool, B::Error> {
        let Some(texture) = self.appearance.as_ref() else {
            tracing::trace!(element = %self.nickname, "No appearance, skipping draw");
            return Ok(false);
        };
        if active_elements_count == 0 {
            return Ok(false);
        }
        debug_assert!(n < active_elements_count, "slot {n} out of {active_elements_count}");

        let is_hovered = element_hovered.is_some_and(|h| h.element_id == self.element_id);
        let hover = if is_hovered {
            self.hover_fade_in(current_time, parent)
        } else {
            parent.exit_fade(self, current_time)
        };

        let alpha_scale = match element_hovered {
            Some(other) if !is_hovered => {
                lerp(1.0, parent.dim_unhovered(), other.hover_fade_in(current_time, parent))
            }
            _ => 1.0,
        };

        let sprite = self.layout(n, sprite_dimensions, active_elements_count, hover, parent);

        if self.shadow_strength > 0.0 {
            self.stage_pass(binding, sprite, true, hover, alpha_scale)?;
            binding.draw_sprite(texture)?;
        }

        self.stage_pass(binding, sprite, false, hover, alpha_scale)?;
        binding.draw_sprite(texture)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_factor_shrinks_with_count() {
        assert_eq!(element_size_factor(1), 1.6);
        assert_eq!(element_size_factor(3), 1.0);
        assert_eq!(element_size_factor(4), 1.0);
        assert_eq!(element_size_factor(6), 0.875);
        assert_eq!(element_size_factor(8), 0.75);
        assert_eq!(element_size_factor(20), 0.75);
    }

    #[test]
    fn test_slot_offsets_run_clockwise_from_top() {
        assert_eq!(slot_offset(0, 1), (0.0, 0.0));

        let (x, y) = slot_offset(0, 4);
        assert!(x.abs() < 1e-6 && (y + 1.0).abs() < 1e-6);
        let (x, y) = slot_offset(1, 4);
        assert!((x - 1.0).abs() < 1e-6 && y.abs() < 1e-6);
        let (x, y) = slot_offset(2, 4);
        assert!(x.abs() < 1e-6 && (y - 1.0).abs() < 1e-6);
    }
}
