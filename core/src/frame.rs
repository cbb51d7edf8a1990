//! Per-frame pass over a wheel's elements
//!
//! The wheel container calls these once per frame: filter by the current
//! [`ConditionalState`], sort into slot order, then draw. Slot order (where
//! each element sits on the wheel) and draw order (which sprite lands on top)
//! are separate: the hovered element is drawn last without moving slots.

use radial_types::ConditionalState;

use crate::animation::MsTime;
use crate::element::WheelElement;
use crate::graphics::{GraphicsBinding, SpriteDimensions};
use crate::wheel::WheelContext;

/// Elements that may be shown under `state`, in input order
pub fn visible_elements(elements: &[WheelElement], state: ConditionalState) -> Vec<&WheelElement> {
    elements.iter().filter(|e| e.is_visible(state)).collect()
}

/// Elements that may be activated under `state`, in input order
pub fn usable_elements(elements: &[WheelElement], state: ConditionalState) -> Vec<&WheelElement> {
    elements.iter().filter(|e| e.is_usable(state)).collect()
}

/// Sort by [`WheelElement::draw_order_key`], with `extremum` choosing each
/// element's indicator. The result is identical for identical inputs.
pub fn sort_for_draw<F>(elements: &mut [&WheelElement], extremum: F)
where
    F: Fn(&WheelElement) -> i32,
{
    elements.sort_by_key(|e| e.draw_order_key(extremum(e)));
}

/// Outcome of [`draw_wheel`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub drawn: usize,
    /// Nothing to draw (no appearance)
    pub skipped: usize,
    /// Backend error; logged and skipped for this frame only
    pub failed: usize,
}

/// Draw `slots` (already in slot order) with the hovered element on top.
///
/// A backend failure aborts only that element's draw; the remaining elements
/// are still drawn.
pub fn draw_wheel<B: GraphicsBinding>(
    binding: &mut B,
    slots: &[&WheelElement],
    sprite: SpriteDimensions,
    current_time: MsTime,
    hovered: Option<&WheelElement>,
    parent: &impl WheelContext,
) -> FrameReport {
    // A hovered element filtered out this frame neither dims nor reorders
    let hovered = hovered.filter(|h| slots.iter().any(|s| s.element_id() == h.element_id()));
    let hovered_id = hovered.map(WheelElement::element_id);
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&i| {
        let indicator = i32::from(Some(slots[i].element_id()) == hovered_id);
        slots[i].draw_order_key(indicator)
    });

    let mut report = FrameReport::default();
    for n in order {
        let element = slots[n];
        match element.draw(binding, n, sprite, slots.len(), current_time, hovered, parent) {
            Ok(true) => report.drawn += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => {
                tracing::warn!(element = %element.nickname(), error = %e, "Element draw failed");
                report.failed += 1;
            }
        }
    }
    report
}
