//! Key binding table: which key chord triggers which [`Command`].
//!
//! The table is configuration. The dispatcher never owns it; callers resolve a chord
//! to a command here and hand the command to [`dispatch`](crate::dispatcher::dispatch).

use crate::dispatcher::{Command, Digit};
use crate::error::{CommandError, KeymapError};
use crate::machine::BinaryOp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A normalized key plus modifier set, e.g. `shift+escape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn key(key: &str) -> Self {
        Self {
            key: canonical_key(key),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    /// Builds a chord from a browser keyboard event.
    ///
    /// Shift is dropped for single printable non-letter keys, since it is already
    /// reflected in the character (`*` is `shift+8` on most layouts).
    pub fn from_event(key: &str, ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        let key = canonical_key(key);
        let mut chars = key.chars();
        let printable_symbol = matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if !c.is_alphabetic() && !c.is_whitespace()
        );
        Self {
            key,
            ctrl,
            alt,
            shift: shift && !printable_symbol,
            meta,
        }
    }
}

fn canonical_key(key: &str) -> String {
    // Browsers report the space bar as a literal " ".
    if !key.is_empty() && key.trim().is_empty() {
        return " ".to_string();
    }
    let lower = key.trim().to_lowercase();
    match lower.as_str() {
        "plus" => "+".to_string(),
        "minus" => "-".to_string(),
        "esc" => "escape".to_string(),
        "return" => "enter".to_string(),
        "space" | "spacebar" => " ".to_string(),
        _ => lower,
    }
}

impl FromStr for KeyChord {
    type Err = KeymapError;

    fn from_str(combo: &str) -> Result<Self, Self::Err> {
        let combo = combo.trim();
        if combo.is_empty() {
            return Err(KeymapError::EmptyChord);
        }

        // A literal `+` key can only appear last, written as `+` or `...++`.
        let (modifiers, key) = if combo == "+" {
            ("", "+")
        } else if let Some(rest) = combo.strip_suffix("++") {
            (rest, "+")
        } else {
            combo.rsplit_once('+').unwrap_or(("", combo))
        };
        if key.trim().is_empty() {
            return Err(KeymapError::EmptyChord);
        }

        let mut chord = KeyChord::key(key);
        for modifier in modifiers.split('+').filter(|m| !m.trim().is_empty()) {
            match modifier.trim().to_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "alt" | "option" => chord.alt = true,
                "shift" => chord.shift = true,
                "meta" | "cmd" | "command" => chord.meta = true,
                _ => {
                    return Err(KeymapError::UnknownModifier {
                        chord: combo.to_string(),
                        modifier: modifier.trim().to_string(),
                    })
                }
            }
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, name) in [
            (self.ctrl, "ctrl"),
            (self.alt, "alt"),
            (self.shift, "shift"),
            (self.meta, "meta"),
        ] {
            if on {
                write!(f, "{}+", name)?;
            }
        }
        match self.key.as_str() {
            "+" => f.write_str("plus"),
            "-" => f.write_str("minus"),
            " " => f.write_str("space"),
            key => f.write_str(key),
        }
    }
}

/// One row of the binding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub combo: String,
    pub label: String,
    pub command: Command,
}

impl Binding {
    pub fn new(combo: &str, label: &str, command: Command) -> Self {
        Self {
            combo: combo.to_string(),
            label: label.to_string(),
            command,
        }
    }
}

/// A validated binding table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Binding>,
    lookup: HashMap<KeyChord, Command>,
}

impl Keymap {
    /// Validates a binding table: every combo must parse and no chord may repeat.
    pub fn from_bindings(bindings: Vec<Binding>) -> Result<Self, KeymapError> {
        let mut lookup = HashMap::with_capacity(bindings.len());
        for binding in &bindings {
            let chord: KeyChord = binding.combo.parse()?;
            if lookup.insert(chord.clone(), binding.command).is_some() {
                return Err(KeymapError::DuplicateChord(chord.to_string()));
            }
        }
        Ok(Self { bindings, lookup })
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn get(&self, chord: &KeyChord) -> Option<Command> {
        self.lookup.get(chord).copied()
    }

    /// Resolves a chord string to its bound command.
    pub fn resolve(&self, combo: &str) -> Result<Command, CommandError> {
        let chord: KeyChord = combo.parse().map_err(|e: KeymapError| {
            warn!(combo, error = %e, "rejected key chord");
            e
        })?;
        self.resolve_chord(&chord)
    }

    pub fn resolve_chord(&self, chord: &KeyChord) -> Result<Command, CommandError> {
        self.get(chord).ok_or_else(|| {
            warn!(%chord, "no command bound to key chord");
            CommandError::UnboundKey(chord.to_string())
        })
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = vec![
            Binding::new("enter", "Submit", Command::Submit),
            Binding::new("backspace", "Delete", Command::Backspace),
            Binding::new(".", "Dot", Command::Dot),
            Binding::new("plus", "Add Operator", Command::Operator(BinaryOp::Add)),
            Binding::new("minus", "Subtract Operator", Command::Operator(BinaryOp::Sub)),
            Binding::new("*", "Multiply Operator", Command::Operator(BinaryOp::Mul)),
            Binding::new("/", "Division Operator", Command::Operator(BinaryOp::Div)),
            Binding::new("escape", "Clear", Command::Clear),
            Binding::new("shift+escape", "Clear All", Command::ClearAll),
        ];
        bindings.extend((0..=9u8).filter_map(Digit::new).map(|d| {
            Binding::new(
                &d.as_char().to_string(),
                &format!("Digit {}", d.value()),
                Command::Digit(d),
            )
        }));

        Self::from_bindings(bindings).expect("built-in key bindings are unique and well-formed")
    }
}

#[cfg(test)]
mod tests {
    use super::{Binding, KeyChord, Keymap};
    use crate::dispatcher::{Command, Digit};
    use crate::error::{CommandError, KeymapError};
    use crate::machine::BinaryOp;

    #[test]
    fn default_table_matches_page_bindings() {
        let keymap = Keymap::default();
        assert_eq!(keymap.bindings().len(), 19);
        assert_eq!(keymap.resolve("enter"), Ok(Command::Submit));
        assert_eq!(keymap.resolve("backspace"), Ok(Command::Backspace));
        assert_eq!(keymap.resolve("."), Ok(Command::Dot));
        assert_eq!(keymap.resolve("plus"), Ok(Command::Operator(BinaryOp::Add)));
        assert_eq!(keymap.resolve("+"), Ok(Command::Operator(BinaryOp::Add)));
        assert_eq!(keymap.resolve("minus"), Ok(Command::Operator(BinaryOp::Sub)));
        assert_eq!(keymap.resolve("*"), Ok(Command::Operator(BinaryOp::Mul)));
        assert_eq!(keymap.resolve("/"), Ok(Command::Operator(BinaryOp::Div)));
        assert_eq!(keymap.resolve("escape"), Ok(Command::Clear));
        assert_eq!(keymap.resolve("Shift+Escape"), Ok(Command::ClearAll));
        for d in 0..=9u8 {
            let digit = Digit::new(d).unwrap();
            assert_eq!(
                keymap.resolve(&d.to_string()),
                Ok(Command::Digit(digit)),
                "digit {d}"
            );
        }
    }

    #[test]
    fn unbound_chords_are_reported() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.resolve("ctrl+z"),
            Err(CommandError::UnboundKey("ctrl+z".to_string()))
        );
        assert_eq!(
            keymap.resolve("hyper+z"),
            Err(CommandError::Keymap(KeymapError::UnknownModifier {
                chord: "hyper+z".to_string(),
                modifier: "hyper".to_string(),
            }))
        );
        assert_eq!(
            keymap.resolve("  "),
            Err(CommandError::Keymap(KeymapError::EmptyChord))
        );
    }

    #[test]
    fn chord_parsing_normalizes_case_aliases_and_modifier_order() {
        let a: KeyChord = "Shift+Ctrl+Esc".parse().unwrap();
        let b: KeyChord = "ctrl+shift+escape".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "ctrl+shift+escape");

        let plus: KeyChord = "ctrl++".parse().unwrap();
        assert_eq!(plus.key, "+");
        assert!(plus.ctrl);
        assert_eq!(plus.to_string(), "ctrl+plus");

        assert_eq!("shift+".parse::<KeyChord>(), Err(KeymapError::EmptyChord));
    }

    #[test]
    fn event_chords_drop_implied_shift() {
        let keymap = Keymap::default();
        let star = KeyChord::from_event("*", false, false, true, false);
        assert_eq!(keymap.get(&star), Some(Command::Operator(BinaryOp::Mul)));

        let clear_all = KeyChord::from_event("Escape", false, false, true, false);
        assert_eq!(keymap.get(&clear_all), Some(Command::ClearAll));

        let shifted_letter = KeyChord::from_event("A", false, false, true, false);
        assert!(shifted_letter.shift);
    }

    #[test]
    fn space_bar_event_matches_space_binding() {
        let keymap =
            Keymap::from_bindings(vec![Binding::new("space", "Submit", Command::Submit)]).unwrap();
        let chord = KeyChord::from_event(" ", false, false, false, false);
        assert_eq!(chord.key, " ");
        assert_eq!(chord.to_string(), "space");
        assert_eq!(keymap.get(&chord), Some(Command::Submit));
        assert_eq!(keymap.resolve_chord(&chord), Ok(Command::Submit));
    }

    #[test]
    fn duplicate_chords_are_rejected() {
        let result = Keymap::from_bindings(vec![
            Binding::new("enter", "Submit", Command::Submit),
            Binding::new("Return", "Also submit", Command::Submit),
        ]);
        assert_eq!(
            result.map(|_| ()),
            Err(KeymapError::DuplicateChord("enter".to_string()))
        );
    }

    #[test]
    fn custom_table_loads_from_json() {
        let json = r#"[
            {"combo": "=", "label": "Equals", "command": "Submit"},
            {"combo": "x", "label": "Times", "command": "Mul"},
            {"combo": "shift+backspace", "label": "Wipe", "command": "ClearAll"}
        ]"#;
        let bindings: Vec<Binding> = serde_json::from_str(json).unwrap();
        let keymap = Keymap::from_bindings(bindings).unwrap();
        assert_eq!(keymap.resolve("="), Ok(Command::Submit));
        assert_eq!(keymap.resolve("X"), Ok(Command::Operator(BinaryOp::Mul)));
        assert_eq!(keymap.resolve("shift+backspace"), Ok(Command::ClearAll));
        assert!(keymap.resolve("enter").is_err());
    }

    #[test]
    fn unknown_command_in_table_fails_to_load() {
        let json = r#"[{"combo": "^", "label": "Power", "command": "Pow"}]"#;
        let err = serde_json::from_str::<Vec<Binding>>(json).unwrap_err();
        assert!(err.to_string().contains("Unknown command: Pow"), "{err}");
    }
}
