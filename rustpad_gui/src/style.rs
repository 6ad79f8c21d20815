use std::fs;
use std::path::PathBuf;

use eframe::egui::{self, Color32, FontData, FontDefinitions, FontFamily, FontId};
use rustpad_settings::{parse_color, Rgb, Theme};

/// Editor font size when the theme leaves it unset.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Resolves a theme color, falling back when the name is unknown.
pub fn resolve_color(value: &str, fallback: Color32) -> Color32 {
    parse_color(value).map(color32).unwrap_or(fallback)
}

pub fn background(theme: &Theme) -> Color32 {
    resolve_color(&theme.background, Color32::WHITE)
}

pub fn foreground(theme: &Theme) -> Color32 {
    resolve_color(&theme.foreground, Color32::BLACK)
}

/// Uses the theme's family once it is registered, the bundled monospace otherwise.
pub fn editor_font(theme: &Theme, family_ready: bool) -> FontId {
    let size = theme
        .font_size
        .map(|size| size as f32)
        .unwrap_or(DEFAULT_FONT_SIZE);
    let family = match theme.font_style.as_deref() {
        Some(name) if family_ready => FontFamily::Name(name.into()),
        _ => FontFamily::Monospace,
    };
    FontId::new(size, family)
}

fn font_candidates(family: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if family.eq_ignore_ascii_case("Courier New") {
        candidates.extend(
            [
                "C:\\Windows\\Fonts\\cour.ttf",
                "/System/Library/Fonts/Supplemental/Courier New.ttf",
                "/Library/Fonts/Courier New.ttf",
                "/usr/share/fonts/truetype/msttcorefonts/cour.ttf",
            ]
            .map(PathBuf::from),
        );
    }
    let file_name = format!("{}.ttf", family.replace(' ', "_"));
    candidates.push(PathBuf::from("/usr/share/fonts/truetype/msttcorefonts").join(&file_name));
    candidates.push(PathBuf::from("/usr/share/fonts/TTF").join(file_name));
    candidates
}

/// Reads the first installed file for `family`.
pub fn load_font(family: &str) -> Option<Vec<u8>> {
    font_candidates(family)
        .into_iter()
        .filter(|path| path.exists())
        .find_map(|path| fs::read(path).ok())
}

/// Adds `family` as a named family that falls back to the monospace faces.
pub fn register_font(definitions: &mut FontDefinitions, family: &str, data: Vec<u8>) {
    definitions
        .font_data
        .insert(family.to_owned(), FontData::from_owned(data));
    let mut faces = vec![family.to_owned()];
    if let Some(monospace) = definitions.families.get(&FontFamily::Monospace) {
        faces.extend(monospace.iter().cloned());
    }
    definitions
        .families
        .insert(FontFamily::Name(family.into()), faces);
}

fn is_dark(color: Color32) -> bool {
    let luma = 0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32;
    luma < 128.0
}

pub fn visuals(theme: &Theme) -> egui::Visuals {
    let bg = background(theme);
    let fg = foreground(theme);
    let mut visuals = if is_dark(bg) {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.extreme_bg_color = bg;
    visuals.text_cursor.color = fg;
    visuals
}
