//! Keybinds attached to wheel elements
//!
//! Capturing keys is the input layer's job. This module only models the
//! resulting binding: a set of modifiers plus a key name, persisted as an
//! accelerator string such as `"Ctrl+Shift+H"`. An empty string means unbound.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

use crate::config::{ConfigError, ConfigOption, ConfigStore};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL  = 1 << 0;
        const ALT   = 1 << 1;
        const SHIFT = 1 << 2;
        const LOGO  = 1 << 3;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeybindError {
    #[error("empty accelerator")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("accelerator '{0}' has no key")]
    MissingKey(String),
}

/// A key plus the modifiers held with it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    /// Lowercase key name (`"h"`, `"f1"`, `"return"`)
    pub key: String,
}

impl KeyCombo {
    pub fn new(modifiers: Modifiers, key: impl Into<String>) -> Self {
        let key = key.into().to_lowercase();
        Self {
            modifiers,
            key: if key == "plus" { PLUS_KEY.to_string() } else { key },
        }
    }
}

const PLUS_KEY: &str = "+";

/// Split an accelerator into its modifier part and key. A trailing `++` (or a
/// lone `+`) names the plus key itself.
fn split_key(s: &str) -> (&str, &str) {
    if s == PLUS_KEY {
        return ("", PLUS_KEY);
    }
    if let Some(mods) = s
        .strip_suffix('+')
        .and_then(|head| head.trim_end().strip_suffix('+'))
    {
        return (mods, PLUS_KEY);
    }
    match s.rsplit_once('+') {
        Some((mods, key)) => (mods, key.trim()),
        None => ("", s),
    }
}

fn parse_modifier(part: &str) -> Option<Modifiers> {
    match part.to_lowercase().as_str() {
        "ctrl" | "control" | "commandorcontrol" => Some(Modifiers::CTRL),
        "alt" | "option" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "super" | "meta" | "command" | "logo" | "win" => Some(Modifiers::LOGO),
        _ => None,
    }
}

impl FromStr for KeyCombo {
    type Err = KeybindError;

    /// Parse `"Ctrl+Shift+H"`. The last `+`-separated part is the key, every
    /// other part must be a modifier. `"Ctrl++"` and `"Ctrl+Plus"` bind the
    /// plus key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeybindError::Empty);
        }

        let (mods, key) = split_key(s);
        if key.is_empty() || parse_modifier(key).is_some() {
            return Err(KeybindError::MissingKey(s.to_string()));
        }

        let mut modifiers = Modifiers::empty();
        let parts = mods.split('+').map(str::trim).filter(|_| !mods.is_empty());
        for part in parts {
            let m = parse_modifier(part)
                .ok_or_else(|| KeybindError::UnknownModifier(part.to_string()))?;
            modifiers |= m;
        }

        Ok(Self::new(modifiers, key))
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::LOGO, "Super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{}+", name)?;
            }
        }

        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// Persisted keybind for one element
#[derive(Debug, Clone)]
pub struct Keybind {
    display_name: String,
    accelerator: ConfigOption<String>,
    combo: Option<KeyCombo>,
}

impl Keybind {
    /// Bind to `key` in `store`. Unparseable stored accelerators are logged and
    /// treated as unbound.
    pub fn bind(store: &ConfigStore, key: impl Into<String>, display_name: impl Into<String>) -> Self {
        let accelerator = ConfigOption::bind(store, key, String::new());
        let combo = Self::parse_stored(accelerator.key(), accelerator.value());
        Self {
            display_name: display_name.into(),
            accelerator,
            combo,
        }
    }

    fn parse_stored(key: &str, accelerator: &str) -> Option<KeyCombo> {
        if accelerator.trim().is_empty() {
            return None;
        }
        match accelerator.parse() {
            Ok(combo) => Some(combo),
            Err(e) => {
                tracing::warn!(key, accelerator, error = %e, "Ignoring invalid keybind");
                None
            }
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.combo.is_some()
    }

    pub fn combo(&self) -> Option<&KeyCombo> {
        self.combo.as_ref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Rebind (or clear with `None`) and persist
    pub fn set(&mut self, store: &mut ConfigStore, combo: Option<KeyCombo>) -> Result<(), ConfigError> {
        let accelerator = combo.as_ref().map(ToString::to_string).unwrap_or_default();
        self.accelerator.set(store, accelerator)?;
        self.combo = combo;
        Ok(())
    }

    pub fn clear(&mut self, store: &mut ConfigStore) -> Result<(), ConfigError> {
        self.set(store, None)
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.combo {
            Some(combo) => write!(f, "{}", combo),
            None => f.write_str("(unbound)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accelerator() {
        let combo: KeyCombo = "Ctrl+Shift+H".parse().unwrap();
        assert_eq!(combo.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(combo.key, "h");
        assert_eq!(combo.to_string(), "Ctrl+Shift+H");

        let combo: KeyCombo = "commandorcontrol + F1".parse().unwrap();
        assert_eq!(combo.modifiers, Modifiers::CTRL);
        assert_eq!(combo.to_string(), "Ctrl+F1");
    }

    #[test]
    fn test_plus_key() {
        let combo: KeyCombo = "Ctrl++".parse().unwrap();
        assert_eq!(combo, KeyCombo::new(Modifiers::CTRL, "+"));
        assert_eq!(combo.to_string(), "Ctrl++");
        assert_eq!(combo.to_string().parse::<KeyCombo>(), Ok(combo.clone()));

        assert_eq!(
            "Ctrl + Shift + +".parse::<KeyCombo>(),
            Ok(KeyCombo::new(Modifiers::CTRL | Modifiers::SHIFT, "+"))
        );
        assert_eq!("Alt+Plus".parse::<KeyCombo>(), Ok(KeyCombo::new(Modifiers::ALT, "+")));
        assert_eq!("+".parse::<KeyCombo>(), Ok(KeyCombo::new(Modifiers::empty(), "+")));
        assert_eq!(
            "Ctrl+".parse::<KeyCombo>(),
            Err(KeybindError::MissingKey("Ctrl+".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyCombo>(), Err(KeybindError::Empty));
        assert_eq!(
            "Ctrl+Shift".parse::<KeyCombo>(),
            Err(KeybindError::MissingKey("Ctrl+Shift".to_string()))
        );
        assert_eq!(
            "Hyper+K".parse::<KeyCombo>(),
            Err(KeybindError::UnknownModifier("Hyper".to_string()))
        );
    }

    #[test]
    fn test_keybind_persistence() {
        let mut store = ConfigStore::in_memory();
        let mut kb = Keybind::bind(&store, "elements.raptor.keybind", "Raptor");
        assert!(!kb.is_set());
        assert_eq!(kb.to_string(), "(unbound)");

        kb.set(&mut store, Some(KeyCombo::new(Modifiers::ALT, "1"))).unwrap();
        assert!(kb.is_set());
        assert_eq!(
            store.get::<String>("elements.raptor.keybind").unwrap().as_deref(),
            Some("Alt+1")
        );

        let reloaded = Keybind::bind(&store, "elements.raptor.keybind", "Raptor");
        assert_eq!(reloaded.combo(), kb.combo());

        kb.clear(&mut store).unwrap();
        assert!(!kb.is_set());
        assert_eq!(store.get::<String>("elements.raptor.keybind").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_invalid_stored_keybind_is_unbound() {
        let store = ConfigStore::from_toml_str("[elements.raptor]\nkeybind = \"Ctrl+\"\n").unwrap();
        let kb = Keybind::bind(&store, "elements.raptor.keybind", "Raptor");
        assert!(!kb.is_set());
    }
}
