pub mod document;
pub mod editor;
pub mod menu;
pub mod notepad;
pub mod prompt;
pub mod window;

pub use document::{Document, DocumentError};
pub use editor::{EditorBuffer, Selection, MAX_UNDO_DEPTH};
pub use menu::{
    build_menu, lookup_key, shortcut_bindings, ActionFn, ActionTable, BuiltMenu, Command,
    MenuArgs, MenuEntry, MenuError, MenuOption, ShortcutTable, Toggle, VariableBindings,
    WidgetFunction,
};
pub use notepad::{Host, InfoMessage, Notepad, NotepadError, StatusFields};
pub use prompt::{PendingAction, PromptChoice, PromptState, SavePrompt};
pub use window::{get_title, WindowDimension};
