pub mod layout;
pub mod shortcuts;
pub mod theme;

pub use layout::{
    default_save_name, FileFilter, MenuSection, DEFAULT_FILE_EXTENSION, DEFAULT_UNNAMED_TITLE,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, FILE_FILTERS, MENU_LAYOUT,
};
pub use shortcuts::{KeyChord, Shortcut, ShortcutError, SHORTCUTS};
pub use theme::{
    generate_random_color, generate_random_color_with, generate_random_theme,
    generate_random_theme_with, get_theme, parse_color, theme_names, FontSpec, Rgb, Theme,
    ThemeError, ThemeRegistry, ThemeSource, ThemeStyle, DEFAULT_FONT, DEFAULT_THEME, THEMES,
};

pub const APP_NAME: &str = "RustPad";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = "A Windows Notepad clone written in Rust.";
