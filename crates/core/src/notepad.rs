//! 單一視窗的編輯工作階段及其選單動作。
//! Per-window editor session and the actions reachable from its menu.

use std::io;
use std::path::{Path, PathBuf};

use rustpad_settings::{
    default_save_name, get_theme, FileFilter, Theme, ThemeError, APP_DESCRIPTION, APP_NAME,
    APP_VERSION, DEFAULT_FILE_EXTENSION, DEFAULT_THEME, DEFAULT_UNNAMED_TITLE, FILE_FILTERS,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::document::{Document, DocumentError};
use crate::editor::{EditorBuffer, Selection};
use crate::menu::{ActionTable, Toggle, VariableBindings};
use crate::prompt::{PendingAction, PromptChoice, PromptState, SavePrompt};
use crate::window::get_title;

pub const STATUS_ZOOM: &str = "100%";
pub const STATUS_ENCODING: &str = "UTF-8";

const HELP_TEXT: &str = "Use the File menu to create, open and save plain text documents.\n\
Edit offers undo and clipboard commands, Format changes the theme and word wrapping, \
and View toggles the status bar.\n\n\
Please see the project repository for additional help or to submit an issue.";

/// 動作所需的視窗系統服務。 / Window-system services an action may need.
pub trait Host {
    /// `None` means the dialog was cancelled.
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
    /// `None` means the dialog was cancelled.
    fn pick_save_path(&mut self, filters: &[FileFilter], default_name: &str) -> Option<PathBuf>;
    /// Starts an independent editor window.
    fn spawn_window(&mut self) -> io::Result<()>;
    fn clipboard_text(&mut self) -> Option<String>;
    fn set_clipboard_text(&mut self, text: String);
}

#[derive(Debug, Error)]
pub enum NotepadError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("could not open a new window: {0}")]
    NewWindow(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFields {
    pub location: String,
    pub zoom: &'static str,
    pub encoding: &'static str,
    pub platform: &'static str,
}

impl Default for StatusFields {
    fn default() -> Self {
        Self {
            location: format_location(1, 1),
            zoom: STATUS_ZOOM,
            encoding: STATUS_ENCODING,
            platform: std::env::consts::OS,
        }
    }
}

fn format_location(line: usize, column: usize) -> String {
    format!("Ln {line}, Col {column}")
}

/// Static text shown in an informational popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoMessage {
    pub title: String,
    pub body: String,
}

/// 單一編輯視窗擁有的狀態。 / State owned by one editor window.
#[derive(Debug, Clone)]
pub struct Notepad {
    document: Document,
    buffer: EditorBuffer,
    status: StatusFields,
    status_bar_visible: bool,
    wrap_words: bool,
    theme_name: String,
    theme: Theme,
    title: String,
    prompt: Option<SavePrompt>,
    theme_picker_open: bool,
    info: Option<InfoMessage>,
    close_requested: bool,
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new()
    }
}

impl Notepad {
    /// 以淺色主題建立未命名工作階段。 / Creates an untitled session with the light theme.
    pub fn new() -> Self {
        let theme = get_theme(DEFAULT_THEME).unwrap_or_else(|_| Theme::new("white", "black"));
        info!("creating editor session");
        Self {
            document: Document::new(),
            buffer: EditorBuffer::default(),
            status: StatusFields::default(),
            status_bar_visible: true,
            wrap_words: true,
            theme_name: DEFAULT_THEME.to_string(),
            theme,
            title: get_title(None),
            prompt: None,
            theme_picker_open: false,
            info: None,
            close_requested: false,
        }
    }

    /// 所有已實作選單項目的分派表。 / Dispatch table for every implemented menu entry.
    pub fn actions() -> ActionTable<Notepad> {
        let mut table = ActionTable::new();
        table.register("file_new", Notepad::file_new);
        table.register("file_new_window", Notepad::file_new_window);
        table.register("file_open", Notepad::file_open);
        table.register("file_save", Notepad::file_save);
        table.register("file_save_as", Notepad::file_save_as);
        table.register("file_exit", Notepad::file_exit);
        table.register("edit_undo", Notepad::edit_undo);
        table.register("edit_cut", Notepad::edit_cut);
        table.register("edit_copy", Notepad::edit_copy);
        table.register("edit_paste", Notepad::edit_paste);
        table.register("edit_delete", Notepad::edit_delete);
        table.register("edit_select_all", Notepad::edit_select_all);
        table.register("format_theme", Notepad::format_theme);
        table.register("format_wrap_words", Notepad::format_wrap_words);
        table.register("view_status_bar", Notepad::view_status_bar);
        table.register("help_view_help", Notepad::help_view_help);
        table.register("help_about", Notepad::help_about);
        table
    }

    pub fn variable_bindings() -> VariableBindings {
        let mut bindings = VariableBindings::new();
        bindings.bind("view_status_bar", Toggle::StatusBar);
        bindings.bind("format_wrap_words", Toggle::WrapWords);
        bindings
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.document.path()
    }

    pub fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.contents()
    }

    pub fn status(&self) -> &StatusFields {
        &self.status
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    pub fn prompt(&self) -> Option<&SavePrompt> {
        self.prompt.as_ref()
    }

    pub fn info(&self) -> Option<&InfoMessage> {
        self.info.as_ref()
    }

    pub fn dismiss_info(&mut self) {
        self.info = None;
    }

    pub fn is_theme_picker_open(&self) -> bool {
        self.theme_picker_open
    }

    pub fn close_theme_picker(&mut self) {
        self.theme_picker_open = false;
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// 緩衝區是否與上次載入或儲存的內容不同。 / Whether the buffer differs from what was last loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.buffer.contents() != self.document.contents()
    }

    pub fn toggle(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::StatusBar => self.status_bar_visible,
            Toggle::WrapWords => self.wrap_words,
        }
    }

    pub fn set_toggle(&mut self, toggle: Toggle, value: bool) {
        debug!(?toggle, value, "toggle changed");
        match toggle {
            Toggle::StatusBar => self.status_bar_visible = value,
            Toggle::WrapWords => self.wrap_words = value,
        }
    }

    /// 記錄文字元件已完成的編輯。 / Records an edit the text widget already applied.
    pub fn update_text(&mut self, text: String, selection: Selection) {
        self.buffer.record_external_edit(text, selection);
        self.refresh_location();
    }

    pub fn update_selection(&mut self, selection: Selection) {
        self.buffer.set_selection(selection);
        self.refresh_location();
    }

    /// 立即套用具名主題。 / Applies a registered theme right away.
    pub fn apply_theme(&mut self, name: &str) -> Result<(), NotepadError> {
        let theme = get_theme(name)?;
        info!(theme = name, "applying theme");
        self.theme_name = name.to_string();
        self.theme = theme;
        Ok(())
    }

    /// 直接開啟 `path` 並取代緩衝區。 / Opens `path` directly, replacing the buffer.
    pub fn open_path(&mut self, path: &Path) -> Result<(), NotepadError> {
        let document = Document::open(path)?;
        self.buffer.reset(document.contents());
        self.document = document;
        info!(path = %path.display(), "opened file");
        self.refresh_title();
        self.refresh_location();
        Ok(())
    }

    /// 回應儲存提示。 / Answers the open save prompt.
    ///
    /// Choosing save but cancelling the save dialog, or a failed write,
    /// abandons the pending action.
    pub fn resolve_prompt(
        &mut self,
        choice: PromptChoice,
        host: &mut dyn Host,
    ) -> Result<(), NotepadError> {
        let Some(mut prompt) = self.prompt.take() else {
            return Ok(());
        };
        match prompt.respond(choice) {
            PromptState::Prompting => {
                self.prompt = Some(prompt);
            }
            PromptState::Cancelled => {}
            PromptState::DiscardedThenProceed => self.perform(prompt.pending()),
            PromptState::SavedThenProceed => {
                self.file_save(host)?;
                if self.is_modified() {
                    debug!("save was cancelled, keeping the document open");
                } else {
                    self.perform(prompt.pending());
                }
            }
        }
        Ok(())
    }

    /// 按下關閉鈕時呼叫，回傳是否可立即關閉。 / Called for the close button; returns whether the window may close now.
    pub fn request_close(&mut self) -> bool {
        if self.close_requested {
            return true;
        }
        if self.prompt.is_some() {
            return false;
        }
        self.guard_unsaved(PendingAction::Exit);
        self.close_requested
    }

    pub fn file_new(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: file new");
        self.guard_unsaved(PendingAction::NewFile);
        Ok(())
    }

    pub fn file_new_window(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: file new window");
        host.spawn_window().map_err(NotepadError::NewWindow)
    }

    pub fn file_open(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: file open");
        let Some(path) = host.pick_open_path(FILE_FILTERS) else {
            debug!("open dialog cancelled");
            return Ok(());
        };
        self.open_path(&path)
    }

    pub fn file_save(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: file save");
        match self.document.path().map(Path::to_path_buf) {
            Some(path) => self.write_to(&path),
            None => self.file_save_as(host),
        }
    }

    pub fn file_save_as(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: file save as");
        let Some(path) = host.pick_save_path(FILE_FILTERS, &default_save_name()) else {
            debug!("save dialog cancelled");
            return Ok(());
        };
        self.write_to(&with_default_extension(path))
    }

    pub fn file_exit(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: file exit");
        self.guard_unsaved(PendingAction::Exit);
        Ok(())
    }

    pub fn edit_undo(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: edit undo");
        if !self.buffer.undo() {
            debug!("nothing to undo");
        }
        self.refresh_location();
        Ok(())
    }

    pub fn edit_cut(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: edit cut");
        if let Some(text) = self.buffer.cut() {
            host.set_clipboard_text(text);
        }
        self.refresh_location();
        Ok(())
    }

    pub fn edit_copy(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: edit copy");
        if let Some(text) = self.buffer.copy() {
            host.set_clipboard_text(text);
        }
        Ok(())
    }

    pub fn edit_paste(&mut self, host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: edit paste");
        if let Some(text) = host.clipboard_text() {
            self.buffer.paste(&text);
        }
        self.refresh_location();
        Ok(())
    }

    pub fn edit_delete(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: edit delete");
        self.buffer.delete_selection();
        self.refresh_location();
        Ok(())
    }

    pub fn edit_select_all(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: edit select all");
        self.buffer.select_all();
        self.refresh_location();
        Ok(())
    }

    pub fn format_theme(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: format theme");
        self.theme_picker_open = true;
        Ok(())
    }

    pub fn format_wrap_words(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: format wrap words");
        self.set_toggle(Toggle::WrapWords, !self.wrap_words);
        Ok(())
    }

    pub fn view_status_bar(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: view status bar");
        self.set_toggle(Toggle::StatusBar, !self.status_bar_visible);
        Ok(())
    }

    pub fn help_view_help(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: help view help");
        self.info = Some(InfoMessage {
            title: APP_NAME.to_string(),
            body: HELP_TEXT.to_string(),
        });
        Ok(())
    }

    pub fn help_about(&mut self, _host: &mut dyn Host) -> Result<(), NotepadError> {
        info!("action: help about");
        self.info = Some(InfoMessage {
            title: APP_NAME.to_string(),
            body: format!("App name: {APP_NAME}\nVersion: {APP_VERSION}\n\n{APP_DESCRIPTION}"),
        });
        Ok(())
    }

    fn guard_unsaved(&mut self, pending: PendingAction) {
        if self.is_modified() {
            let name = self.document.file_name().unwrap_or(DEFAULT_UNNAMED_TITLE);
            debug!(?pending, "unsaved changes, asking first");
            self.prompt = Some(SavePrompt::new(pending, name));
        } else {
            self.perform(pending);
        }
    }

    fn perform(&mut self, pending: PendingAction) {
        match pending {
            PendingAction::NewFile => {
                self.document = Document::new();
                self.buffer.reset(String::new());
                self.refresh_title();
                self.refresh_location();
            }
            PendingAction::Exit => {
                self.close_requested = true;
            }
        }
    }

    fn write_to(&mut self, path: &Path) -> Result<(), NotepadError> {
        self.document.save_as_with(self.buffer.contents(), path)?;
        info!(path = %path.display(), "saved file");
        self.refresh_title();
        Ok(())
    }

    fn refresh_title(&mut self) {
        self.title = get_title(self.document.file_name());
    }

    fn refresh_location(&mut self) {
        let (line, column) = self.buffer.cursor_location();
        self.status.location = format_location(line, column);
    }
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_FILE_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_default_extension_only_when_missing() {
        assert_eq!(
            with_default_extension(PathBuf::from("notes")),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("notes.md")),
            PathBuf::from("notes.md")
        );
    }

    #[test]
    fn every_shortcut_has_an_action() {
        let actions = Notepad::actions();
        assert_eq!(actions.len(), 17);
        for key in rustpad_settings::SHORTCUTS.keys() {
            assert!(actions.contains(key), "shortcut {key} has no action");
        }
    }

    #[test]
    fn location_tracks_selection() {
        let mut notepad = Notepad::new();
        notepad.update_text("ab\ncd".into(), Selection::caret(4));
        assert_eq!(notepad.status().location, "Ln 2, Col 2");
        notepad.update_selection(Selection::caret(0));
        assert_eq!(notepad.status().location, "Ln 1, Col 1");
    }
}
