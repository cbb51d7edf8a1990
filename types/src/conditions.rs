//! Conditional state and per-element eligibility rules.
//!
//! The host environment is summarised once per frame as a [`ConditionalState`].
//! Each wheel element declares a [`ConditionalProperties`] mask saying under
//! which of those conditions it may be shown or used. Eligibility is
//! conjunctive: every active condition must be explicitly permitted.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Snapshot of the host environment for the current frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ConditionalState: u32 {
        const IN_COMBAT  = 1 << 0;
        const IN_WVW     = 1 << 1;
        const UNDERWATER = 1 << 2;
        const ON_WATER   = 1 << 3;
    }
}

bitflags! {
    /// Conditions under which an element may be shown and/or activated.
    ///
    /// Bit values match the layout persisted by earlier releases, so stored
    /// masks keep their meaning.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ConditionalProperties: u32 {
        const VISIBLE_UNDERWATER = 1;
        const VISIBLE_ON_WATER   = 2;

        const USABLE_UNDERWATER  = 4;
        const USABLE_ON_WATER    = 8;

        const VISIBLE_IN_COMBAT  = 16;
        const USABLE_IN_COMBAT   = 32;

        const VISIBLE_WVW        = 64;
        const USABLE_WVW         = 128;

        const VISIBLE_ALL = Self::VISIBLE_UNDERWATER.bits()
            | Self::VISIBLE_ON_WATER.bits()
            | Self::VISIBLE_IN_COMBAT.bits()
            | Self::VISIBLE_WVW.bits();
        const USABLE_ALL = Self::USABLE_UNDERWATER.bits()
            | Self::USABLE_ON_WATER.bits()
            | Self::USABLE_IN_COMBAT.bits()
            | Self::USABLE_WVW.bits();
    }
}

/// Pairing of each state bit with the property bits that permit it.
/// Order is irrelevant: checks are a commutative AND.
const AXES: [(ConditionalState, ConditionalProperties, ConditionalProperties); 4] = [
    (
        ConditionalState::IN_COMBAT,
        ConditionalProperties::VISIBLE_IN_COMBAT,
        ConditionalProperties::USABLE_IN_COMBAT,
    ),
    (
        ConditionalState::IN_WVW,
        ConditionalProperties::VISIBLE_WVW,
        ConditionalProperties::USABLE_WVW,
    ),
    (
        ConditionalState::UNDERWATER,
        ConditionalProperties::VISIBLE_UNDERWATER,
        ConditionalProperties::USABLE_UNDERWATER,
    ),
    (
        ConditionalState::ON_WATER,
        ConditionalProperties::VISIBLE_ON_WATER,
        ConditionalProperties::USABLE_ON_WATER,
    ),
];

impl ConditionalState {
    /// Build a state from raw bits reported by the host.
    ///
    /// Undeclared bits are a caller bug; debug builds assert, release builds
    /// drop them.
    pub fn from_raw(bits: u32) -> Self {
        debug_assert!(
            Self::from_bits(bits).is_some(),
            "undeclared ConditionalState bits: {bits:#x}"
        );
        Self::from_bits_truncate(bits)
    }
}

impl ConditionalProperties {
    /// Build a property mask from raw persisted bits.
    ///
    /// Same contract as [`ConditionalState::from_raw`].
    pub fn from_raw(bits: u32) -> Self {
        debug_assert!(
            Self::from_bits(bits).is_some(),
            "undeclared ConditionalProperties bits: {bits:#x}"
        );
        Self::from_bits_truncate(bits)
    }

    /// Property bits required to be visible under `state`.
    pub fn visibility_required(state: ConditionalState) -> Self {
        AXES.iter()
            .filter(|(cond, _, _)| state.contains(*cond))
            .fold(Self::empty(), |acc, (_, visible, _)| acc | *visible)
    }

    /// Property bits required to be usable under `state`.
    pub fn usability_required(state: ConditionalState) -> Self {
        AXES.iter()
            .filter(|(cond, _, _)| state.contains(*cond))
            .fold(Self::empty(), |acc, (_, _, usable)| acc | *usable)
    }
}

/// Whether an element with `props` may be activated under `state`.
///
/// # Examples
/// ```
/// use radial_types::{is_usable, ConditionalProperties as P, ConditionalState as S};
/// assert!(is_usable(S::empty(), P::empty()));
/// assert!(!is_usable(S::IN_COMBAT, P::VISIBLE_ALL));
/// assert!(is_usable(S::IN_COMBAT | S::IN_WVW, P::USABLE_IN_COMBAT | P::USABLE_WVW));
/// ```
pub fn is_usable(state: ConditionalState, props: ConditionalProperties) -> bool {
    AXES.iter()
        .all(|(cond, _, usable)| !state.contains(*cond) || props.contains(*usable))
}

/// Whether an element with `props` may be shown under `state`.
///
/// # Examples
/// ```
/// use radial_types::{is_visible, ConditionalProperties as P, ConditionalState as S};
/// assert!(is_visible(S::IN_COMBAT, P::VISIBLE_ALL));
/// // Underwater is permitted, combat is not.
/// assert!(!is_visible(S::UNDERWATER | S::IN_COMBAT, P::VISIBLE_UNDERWATER));
/// ```
pub fn is_visible(state: ConditionalState, props: ConditionalProperties) -> bool {
    AXES.iter()
        .all(|(cond, visible, _)| !state.contains(*cond) || props.contains(*visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_states() -> impl Iterator<Item = ConditionalState> {
        (0..=ConditionalState::all().bits()).map(ConditionalState::from_raw)
    }

    fn all_props() -> impl Iterator<Item = ConditionalProperties> {
        (0..=ConditionalProperties::all().bits()).map(ConditionalProperties::from_raw)
    }

    #[test]
    fn test_empty_state_always_passes() {
        for props in all_props() {
            assert!(is_visible(ConditionalState::empty(), props));
            assert!(is_usable(ConditionalState::empty(), props));
        }
    }

    #[test]
    fn test_predicates_follow_required_bits() {
        for state in all_states() {
            for props in all_props() {
                let need_visible = ConditionalProperties::visibility_required(state);
                let need_usable = ConditionalProperties::usability_required(state);
                assert_eq!(is_visible(state, props), props.contains(need_visible));
                assert_eq!(is_usable(state, props), props.contains(need_usable));
            }
        }
    }

    #[test]
    fn test_visible_all_does_not_grant_usability() {
        assert!(is_visible(ConditionalState::IN_COMBAT, ConditionalProperties::VISIBLE_ALL));
        assert!(!is_usable(ConditionalState::IN_COMBAT, ConditionalProperties::VISIBLE_ALL));
    }

    #[test]
    fn test_every_active_condition_must_be_permitted() {
        let state = ConditionalState::UNDERWATER | ConditionalState::IN_COMBAT;
        assert!(!is_visible(state, ConditionalProperties::VISIBLE_UNDERWATER));
        assert!(is_visible(
            state,
            ConditionalProperties::VISIBLE_UNDERWATER | ConditionalProperties::VISIBLE_IN_COMBAT
        ));

        let state = ConditionalState::UNDERWATER | ConditionalState::IN_WVW;
        assert!(!is_usable(state, ConditionalProperties::USABLE_WVW));
        assert!(is_usable(state, ConditionalProperties::USABLE_ALL));
    }

    #[test]
    fn test_negation_stays_within_declared_bits() {
        let inverted = !ConditionalProperties::VISIBLE_ALL;
        assert_eq!(inverted, ConditionalProperties::USABLE_ALL);
        assert_eq!(
            (ConditionalProperties::VISIBLE_ALL | ConditionalProperties::USABLE_ALL).bits(),
            0xFF
        );
    }

    #[test]
    fn test_legacy_bit_layout() {
        assert_eq!(ConditionalProperties::VISIBLE_UNDERWATER.bits(), 1);
        assert_eq!(ConditionalProperties::USABLE_ON_WATER.bits(), 8);
        assert_eq!(ConditionalProperties::VISIBLE_IN_COMBAT.bits(), 16);
        assert_eq!(ConditionalProperties::USABLE_WVW.bits(), 128);
        assert_eq!(ConditionalProperties::VISIBLE_ALL.bits(), 1 | 2 | 16 | 64);
    }

    #[test]
    fn test_props_toml_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            props: ConditionalProperties,
        }

        let toml_str = r#"props = "VISIBLE_IN_COMBAT | USABLE_UNDERWATER""#;
        let holder: Holder = toml::from_str(toml_str).unwrap();
        assert_eq!(
            holder.props,
            ConditionalProperties::VISIBLE_IN_COMBAT | ConditionalProperties::USABLE_UNDERWATER
        );

        let written = toml::to_string(&holder).unwrap();
        let reparsed: Holder = toml::from_str(&written).unwrap();
        assert_eq!(reparsed.props, holder.props);
    }
}
