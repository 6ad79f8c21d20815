use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;

use rustpad_core::{
    build_menu, Host, Notepad, NotepadError, PendingAction, PromptChoice, Selection, Toggle,
    WidgetFunction,
};
use rustpad_settings::{FileFilter, MENU_LAYOUT};
use tempfile::tempdir;

/// Scripted stand-in for the window system.
#[derive(Default)]
struct RecordingHost {
    open_paths: VecDeque<Option<PathBuf>>,
    save_paths: VecDeque<Option<PathBuf>>,
    save_defaults: Vec<String>,
    clipboard: Option<String>,
    spawned: usize,
    fail_spawn: bool,
}

impl Host for RecordingHost {
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        assert_eq!(filters.len(), 2);
        self.open_paths.pop_front().flatten()
    }

    fn pick_save_path(&mut self, _filters: &[FileFilter], default_name: &str) -> Option<PathBuf> {
        self.save_defaults.push(default_name.to_string());
        self.save_paths.pop_front().flatten()
    }

    fn spawn_window(&mut self) -> io::Result<()> {
        if self.fail_spawn {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no executable"));
        }
        self.spawned += 1;
        Ok(())
    }

    fn clipboard_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_clipboard_text(&mut self, text: String) {
        self.clipboard = Some(text);
    }
}

fn type_text(notepad: &mut Notepad, text: &str) {
    let caret = text.chars().count();
    notepad.update_text(text.to_string(), Selection::caret(caret));
}

#[test]
fn fresh_session_is_untitled() {
    let notepad = Notepad::new();
    assert_eq!(notepad.title(), "Untitled - RustPad");
    assert!(notepad.file_path().is_none());
    assert!(notepad.toggle(Toggle::StatusBar));
    assert!(notepad.toggle(Toggle::WrapWords));
    assert_eq!(notepad.theme_name(), "light");
    assert_eq!(notepad.status().zoom, "100%");
    assert_eq!(notepad.status().encoding, "UTF-8");
    assert_eq!(notepad.status().location, "Ln 1, Col 1");
    assert!(!notepad.is_modified());
}

#[test]
fn save_then_open_round_trips_buffer() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("hello.txt");
    let mut host = RecordingHost::default();
    host.save_paths.push_back(Some(path.clone()));
    host.open_paths.push_back(Some(path.clone()));

    let mut writer = Notepad::new();
    type_text(&mut writer, "hello\nworld");
    writer.file_save(&mut host).expect("save");
    assert_eq!(host.save_defaults, ["Untitled.txt"]);
    assert_eq!(writer.title(), "hello.txt - RustPad");
    assert!(!writer.is_modified());
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld");

    let mut reader = Notepad::new();
    reader.file_open(&mut host).expect("open");
    assert_eq!(reader.text(), "hello\nworld");
    assert_eq!(reader.file_path(), Some(path.as_path()));
    assert_eq!(reader.title(), "hello.txt - RustPad");
}

#[test]
fn save_reuses_known_path_without_dialog() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("draft.txt");
    let mut host = RecordingHost::default();
    host.save_paths.push_back(Some(path.clone()));

    let mut notepad = Notepad::new();
    type_text(&mut notepad, "one");
    notepad.file_save(&mut host).unwrap();
    type_text(&mut notepad, "one two");
    notepad.file_save(&mut host).unwrap();

    assert_eq!(host.save_defaults.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "one two");
}

#[test]
fn save_as_appends_default_extension() {
    let dir = tempdir().expect("tempdir");
    let mut host = RecordingHost::default();
    host.save_paths.push_back(Some(dir.path().join("report")));

    let mut notepad = Notepad::new();
    type_text(&mut notepad, "data");
    notepad.file_save_as(&mut host).unwrap();

    assert_eq!(
        notepad.file_path(),
        Some(dir.path().join("report.txt").as_path())
    );
}

#[test]
fn cancelled_dialogs_change_nothing() {
    let mut host = RecordingHost::default();
    host.open_paths.push_back(None);
    host.save_paths.push_back(None);

    let mut notepad = Notepad::new();
    type_text(&mut notepad, "keep me");
    notepad.file_open(&mut host).unwrap();
    notepad.file_save_as(&mut host).unwrap();

    assert_eq!(notepad.text(), "keep me");
    assert!(notepad.file_path().is_none());
    assert_eq!(notepad.title(), "Untitled - RustPad");
    assert!(notepad.is_modified());
}

#[test]
fn opening_missing_file_reports_error() {
    let dir = tempdir().expect("tempdir");
    let mut host = RecordingHost::default();
    host.open_paths
        .push_back(Some(dir.path().join("does-not-exist.txt")));

    let mut notepad = Notepad::new();
    let err = notepad.file_open(&mut host).unwrap_err();
    assert!(matches!(err, NotepadError::Document(_)));
    assert!(notepad.file_path().is_none());
}

#[test]
fn new_file_on_clean_buffer_resets_immediately() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("a.txt");
    fs::write(&path, "saved").unwrap();
    let mut notepad = Notepad::new();
    notepad.open_path(&path).unwrap();

    notepad.file_new(&mut RecordingHost::default()).unwrap();
    assert!(notepad.prompt().is_none());
    assert_eq!(notepad.text(), "");
    assert!(notepad.file_path().is_none());
    assert_eq!(notepad.title(), "Untitled - RustPad");
}

#[test]
fn new_file_with_changes_prompts_and_cancel_keeps_buffer() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();
    type_text(&mut notepad, "unsaved");

    notepad.file_new(&mut host).unwrap();
    let prompt = notepad.prompt().expect("prompt shown");
    assert_eq!(prompt.pending(), PendingAction::NewFile);
    assert_eq!(
        prompt.message(),
        "Would you like to save changes to \"Untitled\"?"
    );

    notepad.resolve_prompt(PromptChoice::Cancel, &mut host).unwrap();
    assert!(notepad.prompt().is_none());
    assert_eq!(notepad.text(), "unsaved");
}

#[test]
fn dont_save_discards_and_proceeds() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();
    type_text(&mut notepad, "scratch");

    notepad.file_new(&mut host).unwrap();
    notepad
        .resolve_prompt(PromptChoice::DontSave, &mut host)
        .unwrap();
    assert_eq!(notepad.text(), "");
    assert!(host.save_defaults.is_empty());
}

#[test]
fn save_choice_writes_before_exit() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("exit.txt");
    let mut host = RecordingHost::default();
    host.save_paths.push_back(Some(path.clone()));

    let mut notepad = Notepad::new();
    type_text(&mut notepad, "bye");
    notepad.file_exit(&mut host).unwrap();
    assert!(!notepad.is_close_requested());

    notepad.resolve_prompt(PromptChoice::Save, &mut host).unwrap();
    assert!(notepad.is_close_requested());
    assert_eq!(fs::read_to_string(&path).unwrap(), "bye");
}

#[test]
fn cancelling_save_dialog_abandons_pending_action() {
    let mut host = RecordingHost::default();
    host.save_paths.push_back(None);

    let mut notepad = Notepad::new();
    type_text(&mut notepad, "precious");
    notepad.file_exit(&mut host).unwrap();
    notepad.resolve_prompt(PromptChoice::Save, &mut host).unwrap();

    assert!(!notepad.is_close_requested());
    assert_eq!(notepad.text(), "precious");
}

#[test]
fn failed_save_keeps_unsaved_changes() {
    let dir = tempdir().expect("tempdir");
    let unwritable = dir.path().join("no_such_dir").join("notes.txt");
    let mut host = RecordingHost::default();
    host.save_paths.push_back(Some(unwritable.clone()));
    host.save_paths.push_back(Some(unwritable));

    let mut notepad = Notepad::new();
    type_text(&mut notepad, "precious");
    assert!(matches!(
        notepad.file_save(&mut host),
        Err(NotepadError::Document(_))
    ));
    assert!(notepad.is_modified());
    assert!(notepad.file_path().is_none());
    assert_eq!(notepad.title(), "Untitled - RustPad");

    notepad.file_exit(&mut host).unwrap();
    assert!(notepad.prompt().is_some());
    assert!(!notepad.is_close_requested());

    assert!(notepad
        .resolve_prompt(PromptChoice::Save, &mut host)
        .is_err());
    assert!(!notepad.is_close_requested());
    assert!(notepad.is_modified());
    assert!(!notepad.request_close());
    assert!(notepad.prompt().is_some());
}

#[test]
fn close_button_follows_exit_rules() {
    let mut host = RecordingHost::default();
    let mut clean = Notepad::new();
    assert!(clean.request_close());

    let mut dirty = Notepad::new();
    type_text(&mut dirty, "x");
    assert!(!dirty.request_close());
    assert!(!dirty.request_close());
    dirty
        .resolve_prompt(PromptChoice::DontSave, &mut host)
        .unwrap();
    assert!(dirty.request_close());
}

#[test]
fn clipboard_actions_use_host() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();
    type_text(&mut notepad, "copy paste");

    notepad.edit_select_all(&mut host).unwrap();
    notepad.edit_copy(&mut host).unwrap();
    assert_eq!(host.clipboard.as_deref(), Some("copy paste"));

    notepad.update_selection(Selection::new(0, 5));
    notepad.edit_cut(&mut host).unwrap();
    assert_eq!(notepad.text(), "paste");
    assert_eq!(host.clipboard.as_deref(), Some("copy "));

    notepad.update_selection(Selection::caret(5));
    notepad.edit_paste(&mut host).unwrap();
    assert_eq!(notepad.text(), "pastecopy ");
    assert_eq!(notepad.status().location, "Ln 1, Col 11");

    notepad.edit_undo(&mut host).unwrap();
    assert_eq!(notepad.text(), "paste");

    notepad.update_selection(Selection::new(0, 2));
    notepad.edit_delete(&mut host).unwrap();
    assert_eq!(notepad.text(), "ste");
}

#[test]
fn toggles_flip_owned_flags() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();

    notepad.view_status_bar(&mut host).unwrap();
    assert!(!notepad.toggle(Toggle::StatusBar));
    notepad.view_status_bar(&mut host).unwrap();
    assert!(notepad.toggle(Toggle::StatusBar));

    notepad.format_wrap_words(&mut host).unwrap();
    assert!(!notepad.toggle(Toggle::WrapWords));
    notepad.set_toggle(Toggle::WrapWords, true);
    assert!(notepad.toggle(Toggle::WrapWords));
}

#[test]
fn theme_picker_applies_registered_themes() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();

    notepad.format_theme(&mut host).unwrap();
    assert!(notepad.is_theme_picker_open());
    notepad.apply_theme("dark").unwrap();
    assert_eq!(notepad.theme().background, "black");
    assert_eq!(notepad.theme_name(), "dark");
    assert!(notepad.apply_theme("nope").is_err());
    assert_eq!(notepad.theme_name(), "dark");
    notepad.close_theme_picker();
    assert!(!notepad.is_theme_picker_open());
}

#[test]
fn help_entries_show_information() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();

    notepad.help_about(&mut host).unwrap();
    let info = notepad.info().expect("about text");
    assert_eq!(info.title, "RustPad");
    assert!(info.body.starts_with("App name: RustPad\nVersion: "));

    notepad.dismiss_info();
    notepad.help_view_help(&mut host).unwrap();
    assert!(notepad.info().unwrap().body.contains("repository"));
}

#[test]
fn new_window_delegates_to_host() {
    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();
    notepad.file_new_window(&mut host).unwrap();
    assert_eq!(host.spawned, 1);

    host.fail_spawn = true;
    let err = notepad.file_new_window(&mut host).unwrap_err();
    assert!(matches!(err, NotepadError::NewWindow(_)));
}

#[test]
fn menu_dispatches_into_session() {
    let actions = Notepad::actions();
    let bindings = Notepad::variable_bindings();
    let menus = build_menu(MENU_LAYOUT, &actions, &bindings);

    let view = menus.iter().find(|menu| menu.label == "View").unwrap();
    let status_bar = &view.entries[0];
    assert_eq!(status_bar.widget, WidgetFunction::AddCheckbutton);
    assert_eq!(status_bar.args.variable, Some(Toggle::StatusBar));

    let mut host = RecordingHost::default();
    let mut notepad = Notepad::new();
    status_bar
        .args
        .command
        .execute(&mut notepad, &mut host)
        .unwrap();
    assert!(!notepad.toggle(Toggle::StatusBar));

    let every_entry_bound = menus
        .iter()
        .flat_map(|menu| menu.entries.iter())
        .all(|entry| entry.args.command.is_implemented());
    assert!(every_entry_bound);
}
