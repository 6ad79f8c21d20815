use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

pub const KEY_SHIFT: &str = "shift";
pub const KEY_CTRL: &str = "ctrl";

/// Modifier names that render differently in a key binding than in an accelerator.
const ABBREVIATIONS: &[(&str, &str)] = &[(KEY_CTRL, "Control")];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("shortcut must have at least one key")]
    NoKeys,
    #[error("shortcut key `{0}` not in accepted set (a-z, shift, ctrl)")]
    UnknownKey(String),
}

/// 由修飾鍵與字母組成的快捷鍵，建立時即驗證。 / Keyboard chord of modifier and letter keys, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    keys: Vec<String>,
}

/// 供比對修飾旗標的工具組使用。 / Structured form of a [`Shortcut`] for toolkits that match on modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub letter: Option<char>,
}

impl Shortcut {
    /// 驗證每個按鍵皆在允許範圍內。 / Validates every key against the accepted set.
    pub fn new<I, S>(keys: I) -> Result<Self, ShortcutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|key| key.as_ref().to_string())
            .collect();
        if keys.is_empty() {
            return Err(ShortcutError::NoKeys);
        }
        if let Some(unknown) = keys.iter().find(|key| !is_accepted(key)) {
            return Err(ShortcutError::UnknownKey(unknown.clone()));
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 選單旁顯示的文字，例如 `Ctrl+Shift+A`。 / Label shown next to a menu entry, e.g. `Ctrl+Shift+A`.
    pub fn accelerator(&self) -> String {
        self.keys
            .iter()
            .map(|key| capitalize(key))
            .collect::<Vec<_>>()
            .join("+")
    }

    /// 按鍵綁定字串，例如 `<Control-A>`。 / Toolkit binding token, e.g. `<Control-A>`.
    ///
    /// `shift` is never emitted; it capitalizes the token that follows it and
    /// is dropped when nothing follows.
    pub fn key_binding(&self) -> String {
        let mut bindings = Vec::with_capacity(self.keys.len());
        let mut capitalize_next = false;
        for key in &self.keys {
            if key == KEY_SHIFT {
                capitalize_next = true;
                continue;
            }
            let mut binding = abbreviate(key).to_string();
            if capitalize_next {
                binding = capitalize(&binding);
                capitalize_next = false;
            }
            bindings.push(binding);
        }
        format!("<{}>", bindings.join("-"))
    }

    pub fn chord(&self) -> KeyChord {
        let mut chord = KeyChord::default();
        for key in &self.keys {
            match key.as_str() {
                KEY_CTRL => chord.ctrl = true,
                KEY_SHIFT => chord.shift = true,
                letter => chord.letter = letter.chars().next(),
            }
        }
        chord
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accelerator())
    }
}

fn is_accepted(key: &str) -> bool {
    if key == KEY_SHIFT || key == KEY_CTRL {
        return true;
    }
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_ascii_lowercase())
}

fn abbreviate(key: &str) -> &str {
    ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == key)
        .map(|(_, long)| *long)
        .unwrap_or(key)
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn shortcut(keys: &[&str]) -> Shortcut {
    Shortcut::new(keys).expect("built-in shortcut")
}

/// 具快捷鍵的選單項目對照表。 / Dispatch key to shortcut for every menu entry that has one.
pub static SHORTCUTS: Lazy<BTreeMap<&'static str, Shortcut>> = Lazy::new(|| {
    BTreeMap::from([
        ("file_new", shortcut(&["ctrl", "n"])),
        ("file_new_window", shortcut(&["ctrl", "shift", "n"])),
        ("file_open", shortcut(&["ctrl", "o"])),
        ("file_save", shortcut(&["ctrl", "s"])),
        ("file_save_as", shortcut(&["ctrl", "shift", "s"])),
        ("file_exit", shortcut(&["ctrl", "q"])),
        ("edit_undo", shortcut(&["ctrl", "z"])),
        ("edit_copy", shortcut(&["ctrl", "c"])),
        ("edit_cut", shortcut(&["ctrl", "x"])),
        ("edit_paste", shortcut(&["ctrl", "v"])),
        ("edit_select_all", shortcut(&["ctrl", "shift", "a"])),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn renders_accelerator_and_binding() {
        let shortcut = Shortcut::new(["ctrl", "shift", "a"]).unwrap();
        assert_eq!(shortcut.keys(), ["ctrl", "shift", "a"]);
        assert_eq!(shortcut.accelerator(), "Ctrl+Shift+A");
        assert_eq!(shortcut.key_binding(), "<Control-A>");
        assert_eq!(shortcut.to_string(), "Ctrl+Shift+A");
    }

    #[test]
    fn rejects_empty_and_unknown_keys() {
        let empty: [&str; 0] = [];
        let err = Shortcut::new(empty).unwrap_err();
        assert_eq!(err, ShortcutError::NoKeys);
        assert!(err.to_string().contains("at least one key"));

        let err = Shortcut::new(["ctrl", "shift", "foo"]).unwrap_err();
        assert_eq!(err, ShortcutError::UnknownKey("foo".into()));
        assert!(err.to_string().contains("`foo` not in"));

        assert!(Shortcut::new(["A"]).is_err());
        assert!(Shortcut::new(["alt", "x"]).is_err());
    }

    #[test]
    fn trailing_shift_is_dropped() {
        let shortcut = Shortcut::new(["ctrl", "shift"]).unwrap();
        assert_eq!(shortcut.key_binding(), "<Control>");
        assert_eq!(shortcut.accelerator(), "Ctrl+Shift");
    }

    #[test]
    fn accelerator_preserves_key_order() {
        let shortcut = Shortcut::new(["q", "ctrl"]).unwrap();
        assert_eq!(shortcut.accelerator(), "Q+Ctrl");
        assert_eq!(shortcut.key_binding(), "<q-Control>");
    }

    #[test]
    fn chord_exposes_modifiers_and_letter() {
        let chord = SHORTCUTS["file_save_as"].chord();
        assert_eq!(
            chord,
            KeyChord {
                ctrl: true,
                shift: true,
                letter: Some('s'),
            }
        );
        assert!(!SHORTCUTS["file_open"].chord().shift);
    }

    #[test]
    fn built_in_bindings_are_unique() {
        let bindings: Vec<String> = SHORTCUTS.values().map(Shortcut::key_binding).collect();
        let unique: HashSet<&String> = bindings.iter().collect();
        assert_eq!(bindings.len(), unique.len());
        assert_eq!(SHORTCUTS.len(), 11);
    }
}
