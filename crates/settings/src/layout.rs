//! 視窗、選單與檔案對話框的靜態設定。 / Static window, menu and file-dialog configuration.

pub const DEFAULT_WINDOW_WIDTH: u32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 400;
pub const DEFAULT_UNNAMED_TITLE: &str = "Untitled";
pub const DEFAULT_FILE_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection {
    pub label: &'static str,
    pub options: &'static [&'static str],
}

impl MenuSection {
    const fn new(label: &'static str, options: &'static [&'static str]) -> Self {
        Self { label, options }
    }
}

pub const MENU_LAYOUT: &[MenuSection] = &[
    MenuSection::new(
        "File",
        &["New", "New Window", "Open", "Save", "Save As", "Exit"],
    ),
    MenuSection::new(
        "Edit",
        &["Undo", "Cut", "Copy", "Paste", "Delete", "Select All"],
    ),
    MenuSection::new("View", &["Status Bar"]),
    MenuSection::new("Format", &["Theme", "Wrap Words"]),
    MenuSection::new("Help", &["View Help", "About"]),
];

/// 檔案對話框的篩選條件。 / A named file-dialog filter; `extensions` uses `*` for "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub pattern: &'static str,
    pub extensions: &'static [&'static str],
}

pub const FILE_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "All Files",
        pattern: "*.*",
        extensions: &["*"],
    },
    FileFilter {
        name: "Text Documents",
        pattern: "*.txt",
        extensions: &[DEFAULT_FILE_EXTENSION],
    },
];

/// 未儲存文件的預設檔名。 / File name suggested for a document that was never saved.
pub fn default_save_name() -> String {
    format!("{DEFAULT_UNNAMED_TITLE}.{DEFAULT_FILE_EXTENSION}")
}
