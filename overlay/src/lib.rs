//! Software rendering backend for the radial wheel
//!
//! Draws wheel elements into a `tiny-skia` pixmap through the
//! [`GraphicsBinding`](radial_core::GraphicsBinding) seam. Useful for headless
//! previews and for exercising the draw path without a GPU.

mod backend;

pub use backend::{disc_texture, RenderError, SoftwareBinding, SHADOW_OFFSET};
