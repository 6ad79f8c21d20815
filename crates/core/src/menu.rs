//! Binds the static menu layout to actions, shortcuts and toggle variables.
//!
//! Each menu entry is identified by its dispatch key, the lowercase
//! `{menu}_{option}` name with spaces turned into underscores. The same key
//! selects the entry's action in an [`ActionTable`], its shortcut in
//! [`SHORTCUTS`] and its toggle in [`VariableBindings`].

use std::collections::BTreeMap;
use std::fmt;

use rustpad_settings::{MenuSection, Shortcut, SHORTCUTS};
use thiserror::Error;
use tracing::{debug, warn};

use crate::notepad::{Host, NotepadError};

pub type ActionFn<T> = fn(&mut T, &mut dyn Host) -> Result<(), NotepadError>;

pub type ShortcutTable = BTreeMap<&'static str, Shortcut>;

pub fn lookup_key(menu_label: &str, option_label: &str) -> String {
    format!(
        "{}_{}",
        menu_label.to_lowercase(),
        option_label.to_lowercase().replace(' ', "_")
    )
}

/// 由索引鍵對應處理函式的分派表。 / Dispatch table from lookup key to handler.
pub struct ActionTable<T> {
    actions: BTreeMap<String, ActionFn<T>>,
}

impl<T> Default for ActionTable<T> {
    fn default() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }
}

impl<T> ActionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, action: ActionFn<T>) {
        self.actions.insert(key.into(), action);
    }

    pub fn get(&self, key: &str) -> Option<ActionFn<T>> {
        self.actions.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<T> fmt::Debug for ActionTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.actions.keys()).finish()
    }
}

/// 選單項目綁定的處理程序。 / Handler bound to a menu entry.
pub enum Command<T> {
    Action { key: String, action: ActionFn<T> },
    NotImplemented { key: String },
}

impl<T> Command<T> {
    pub fn key(&self) -> &str {
        match self {
            Command::Action { key, .. } | Command::NotImplemented { key } => key,
        }
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, Command::Action { .. })
    }

    pub fn execute(&self, target: &mut T, host: &mut dyn Host) -> Result<(), NotepadError> {
        match self {
            Command::Action { key, action } => {
                debug!(action = %key, "dispatching");
                action(target, host)
            }
            Command::NotImplemented { key } => {
                warn!(action = %key, "menu entry does nothing");
                Ok(())
            }
        }
    }
}

impl<T> Clone for Command<T> {
    fn clone(&self) -> Self {
        match self {
            Command::Action { key, action } => Command::Action {
                key: key.clone(),
                action: *action,
            },
            Command::NotImplemented { key } => Command::NotImplemented { key: key.clone() },
        }
    }
}

impl<T> fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Action { key, .. } => f.debug_tuple("Action").field(key).finish(),
            Command::NotImplemented { key } => f.debug_tuple("NotImplemented").field(key).finish(),
        }
    }
}

/// Boolean session flags that menu entries can render as check boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    StatusBar,
    WrapWords,
}

#[derive(Debug, Clone, Default)]
pub struct VariableBindings {
    bindings: BTreeMap<String, Toggle>,
}

impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: impl Into<String>, toggle: Toggle) {
        self.bindings.insert(key.into(), toggle);
    }

    pub fn get(&self, key: &str) -> Option<Toggle> {
        self.bindings.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("no shortcut bound to '{0}'")]
    NoShortcut(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetFunction {
    AddCommand,
    AddCheckbutton,
}

impl WidgetFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetFunction::AddCommand => "add_command",
            WidgetFunction::AddCheckbutton => "add_checkbutton",
        }
    }
}

/// 建立一個選單項目所需的參數。 / Everything needed to construct one menu item.
#[derive(Debug, Clone)]
pub struct MenuArgs<T> {
    pub label: String,
    pub command: Command<T>,
    pub accelerator: Option<String>,
    pub variable: Option<Toggle>,
    pub onvalue: Option<bool>,
    pub offvalue: Option<bool>,
}

impl<T> MenuArgs<T> {
    /// Names of the arguments that are set.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = vec!["label", "command"];
        if self.accelerator.is_some() {
            keys.push("accelerator");
        }
        if self.variable.is_some() {
            keys.push("variable");
        }
        if self.onvalue.is_some() {
            keys.push("onvalue");
        }
        if self.offvalue.is_some() {
            keys.push("offvalue");
        }
        keys
    }
}

/// 將 `(選單, 選項)` 對應到各綁定表。 / Resolves one `(menu, option)` pair against the binding tables.
pub struct MenuOption<'a, T> {
    menu_label: &'a str,
    option_label: &'a str,
    actions: &'a ActionTable<T>,
    bindings: &'a VariableBindings,
    shortcuts: &'a ShortcutTable,
}

impl<'a, T> MenuOption<'a, T> {
    pub fn new(
        menu_label: &'a str,
        option_label: &'a str,
        actions: &'a ActionTable<T>,
        bindings: &'a VariableBindings,
    ) -> Self {
        Self {
            menu_label,
            option_label,
            actions,
            bindings,
            shortcuts: &SHORTCUTS,
        }
    }

    pub fn with_shortcuts(mut self, shortcuts: &'a ShortcutTable) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn menu_label(&self) -> &str {
        self.menu_label
    }

    pub fn option_label(&self) -> &str {
        self.option_label
    }

    pub fn lookup_key(&self) -> String {
        lookup_key(self.menu_label, self.option_label)
    }

    pub fn command(&self) -> Command<T> {
        let key = self.lookup_key();
        match self.actions.get(&key) {
            Some(action) => Command::Action { key, action },
            None => Command::NotImplemented { key },
        }
    }

    pub fn has_shortcut(&self) -> bool {
        self.shortcuts.contains_key(self.lookup_key().as_str())
    }

    /// Callers should check [`has_shortcut`](Self::has_shortcut) first.
    pub fn shortcut(&self) -> Result<&'a Shortcut, MenuError> {
        let key = self.lookup_key();
        self.shortcuts
            .get(key.as_str())
            .ok_or(MenuError::NoShortcut(key))
    }

    pub fn has_variable_binding(&self) -> bool {
        self.bindings.contains(&self.lookup_key())
    }

    pub fn variable(&self) -> Option<Toggle> {
        self.bindings.get(&self.lookup_key())
    }

    pub fn args(&self) -> MenuArgs<T> {
        let variable = self.variable();
        MenuArgs {
            label: self.option_label.to_string(),
            command: self.command(),
            accelerator: self.shortcut().ok().map(Shortcut::accelerator),
            variable,
            onvalue: variable.map(|_| true),
            offvalue: variable.map(|_| false),
        }
    }

    pub fn widget_function(&self) -> WidgetFunction {
        if self.has_variable_binding() {
            WidgetFunction::AddCheckbutton
        } else {
            WidgetFunction::AddCommand
        }
    }
}

/// A fully resolved menu item; [`MenuOption`] itself is not kept.
#[derive(Debug, Clone)]
pub struct MenuEntry<T> {
    pub lookup_key: String,
    pub widget: WidgetFunction,
    pub args: MenuArgs<T>,
    pub shortcut: Option<Shortcut>,
}

#[derive(Debug, Clone)]
pub struct BuiltMenu<T> {
    pub label: &'static str,
    pub entries: Vec<MenuEntry<T>>,
}

pub fn build_menu<T>(
    layout: &[MenuSection],
    actions: &ActionTable<T>,
    bindings: &VariableBindings,
) -> Vec<BuiltMenu<T>> {
    layout
        .iter()
        .map(|section| {
            let entries = section
                .options
                .iter()
                .map(|option_label| {
                    let option = MenuOption::new(section.label, option_label, actions, bindings);
                    MenuEntry {
                        lookup_key: option.lookup_key(),
                        widget: option.widget_function(),
                        args: option.args(),
                        shortcut: option.shortcut().ok().cloned(),
                    }
                })
                .collect();
            BuiltMenu {
                label: section.label,
                entries,
            }
        })
        .collect()
}

/// 可由全域快捷鍵觸發的項目。 / Entries that are also reachable through a global key press.
pub fn shortcut_bindings<T>(menus: &[BuiltMenu<T>]) -> Vec<(&Shortcut, &Command<T>)> {
    menus
        .iter()
        .flat_map(|menu| menu.entries.iter())
        .filter_map(|entry| {
            entry
                .shortcut
                .as_ref()
                .map(|shortcut| (shortcut, &entry.args.command))
        })
        .collect()
}
