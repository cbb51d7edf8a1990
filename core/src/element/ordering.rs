use super::WheelElement;

/// Weight of the extremum selector in [`WheelElement::draw_priority`].
///
/// Exceeds the full `i32` range of sorting priorities, so the selector always
/// dominates.
pub const EXTREMUM_WEIGHT: i64 = 1 << 32;

/// Total order over elements for one draw pass: priority first, id on ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawOrderKey {
    pub priority: i64,
    pub element_id: u32,
}

impl WheelElement {
    /// Sort key for drawing and selection order.
    ///
    /// `extremum_indicator` pushes the element to the end (`> 0`) or the front
    /// (`< 0`) regardless of its configured priority; only its sign matters.
    /// Equal priorities tie, see [`draw_order_key`](Self::draw_order_key).
    pub fn draw_priority(&self, extremum_indicator: i32) -> i64 {
        i64::from(extremum_indicator.signum()) * EXTREMUM_WEIGHT + i64::from(self.sorting_priority())
    }

    /// [`draw_priority`](Self::draw_priority) with the element id as tie-break
    pub fn draw_order_key(&self, extremum_indicator: i32) -> DrawOrderKey {
        DrawOrderKey {
            priority: self.draw_priority(extremum_indicator),
            element_id: self.element_id,
        }
    }
}
