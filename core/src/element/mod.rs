//! Wheel elements
//!
//! A [`WheelElement`] is one selectable segment of the wheel. It is built once
//! when the wheel is initialised and lives as long as the wheel does.
//!
//! - **Identity**: id, nickname (config key), category, display name
//! - **Configuration**: shown flag, sorting priority and condition mask, all
//!   backed by the [`ConfigStore`]
//! - **Interaction**: keybind plus the hover/exit timestamps, which only the
//!   owning wheel writes
//! - **Presentation**: tint and the appearance texture handle
//!
//! Eligibility is derived on demand and never cached, so configuration edits
//! between frames take effect on the next pass.

mod draw;
mod ordering;


pub use ordering::{DrawOrderKey, EXTREMUM_WEIGHT};

use radial_types::{is_usable, is_visible, ConditionalProperties, ConditionalState, Rgba};

use crate::animation::MsTime;
use crate::config::{ConfigError, ConfigOption, ConfigStore};
use crate::graphics::TextureHandle;
use crate::keybind::Keybind;

/// Construction-time description of an element
#[derive(Debug, Clone)]
pub struct ElementDefinition {
    pub id: u32,
    pub nickname: String,
    pub category: String,
    pub display_name: String,
    pub color: Rgba,
    pub default_props: ConditionalProperties,
    pub appearance: Option<TextureHandle>,
}

impl ElementDefinition {
    pub fn new(id: u32, nickname: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            category: String::new(),
            display_name: display_name.into(),
            color: Rgba::WHITE,
            default_props: ConditionalProperties::empty(),
            appearance: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn props(mut self, props: ConditionalProperties) -> Self {
        self.default_props = props;
        self
    }

    pub fn appearance(mut self, texture: TextureHandle) -> Self {
        self.appearance = Some(texture);
        self
    }
}

#[derive(Debug, Clone)]
pub struct WheelElement {
    element_id: u32,
    nickname: String,
    category: String,
    display_name: String,

    is_shown: ConfigOption<bool>,
    sorting_priority: ConfigOption<i32>,
    props: ConfigOption<ConditionalProperties>,

    keybind: Keybind,
    appearance: Option<TextureHandle>,
    current_hover_time: MsTime,
    current_exit_time: MsTime,

    aspect_ratio: f32,
    shadow_strength: f32,
    colorize_amount: f32,
    premultiply_alpha: bool,
    color: Rgba,
}

impl WheelElement {
    /// Build an element and bind its settings under `elements.<nickname>`.
    ///
    /// The default sorting priority is the element id, so a fresh config
    /// draws elements in declaration order.
    pub fn new(def: ElementDefinition, store: &ConfigStore) -> Self {
        let prefix = format!("elements.{}", def.nickname);
        let aspect_ratio = def.appearance.map_or(1.0, |t| t.aspect_ratio());
        let default_priority = i32::try_from(def.id).unwrap_or(i32::MAX);

        tracing::debug!(
            element = %def.nickname,
            id = def.id,
            has_appearance = def.appearance.is_some(),
            "Creating wheel element"
        );

        Self {
            is_shown: ConfigOption::bind(store, format!("{prefix}.shown"), true),
            sorting_priority: ConfigOption::bind(
                store,
                format!("{prefix}.sorting_priority"),
                default_priority,
            ),
            props: ConfigOption::bind(store, format!("{prefix}.props"), def.default_props),
            keybind: Keybind::bind(store, format!("{prefix}.keybind"), def.display_name.clone()),
            element_id: def.id,
            nickname: def.nickname,
            category: def.category,
            display_name: def.display_name,
            appearance: def.appearance,
            current_hover_time: 0,
            current_exit_time: 0,
            aspect_ratio,
            shadow_strength: 0.8,
            colorize_amount: 1.0,
            premultiply_alpha: false,
            color: def.color,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────

    pub fn element_id(&self) -> u32 {
        self.element_id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration-backed settings
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_shown(&self) -> bool {
        *self.is_shown.value()
    }

    pub fn set_shown(&mut self, store: &mut ConfigStore, shown: bool) -> Result<(), ConfigError> {
        self.is_shown.set(store, shown)
    }

    pub fn sorting_priority(&self) -> i32 {
        *self.sorting_priority.value()
    }

    pub fn set_sorting_priority(
        &mut self,
        store: &mut ConfigStore,
        priority: i32,
    ) -> Result<(), ConfigError> {
        self.sorting_priority.set(store, priority)
    }

    pub fn props(&self) -> ConditionalProperties {
        *self.props.value()
    }

    pub fn set_props(
        &mut self,
        store: &mut ConfigStore,
        props: ConditionalProperties,
    ) -> Result<(), ConfigError> {
        self.props.set(store, props)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keybind and eligibility
    // ─────────────────────────────────────────────────────────────────────────

    pub fn keybind(&self) -> &Keybind {
        &self.keybind
    }

    /// Exposed for the rebinding UI
    pub fn keybind_mut(&mut self) -> &mut Keybind {
        &mut self.keybind
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.keybind.is_set()
    }

    /// Bound to a key and not hidden in settings
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_bound() && self.is_shown()
    }

    pub fn is_usable(&self, state: ConditionalState) -> bool {
        self.is_active() && is_usable(state, self.props())
    }

    pub fn is_visible(&self, state: ConditionalState) -> bool {
        self.is_active() && is_visible(state, self.props())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hover timestamps (written by the owning wheel)
    // ─────────────────────────────────────────────────────────────────────────

    pub fn current_hover_time(&self) -> MsTime {
        self.current_hover_time
    }

    pub fn set_current_hover_time(&mut self, time: MsTime) {
        self.current_hover_time = time;
    }

    pub fn current_exit_time(&self) -> MsTime {
        self.current_exit_time
    }

    pub fn set_current_exit_time(&mut self, time: MsTime) {
        self.current_exit_time = time;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Presentation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn appearance(&self) -> Option<&TextureHandle> {
        self.appearance.as_ref()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn shadow_strength(&self) -> f32 {
        self.shadow_strength
    }

    pub fn set_shadow_strength(&mut self, strength: f32) {
        self.shadow_strength = strength;
    }

    pub fn colorize_amount(&self) -> f32 {
        self.colorize_amount
    }

    pub fn set_colorize_amount(&mut self, amount: f32) {
        self.colorize_amount = amount;
    }

    pub fn premultiply_alpha(&self) -> bool {
        self.premultiply_alpha
    }

    pub fn set_premultiply_alpha(&mut self, premultiply: bool) {
        self.premultiply_alpha = premultiply;
    }
}
