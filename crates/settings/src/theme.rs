use once_cell::sync::Lazy;
use rand::RngCore;
use thiserror::Error;

pub const DEFAULT_FONT: &str = "Courier New";
pub const DEFAULT_THEME: &str = "light";

pub const RANDOM_FONT_SIZE_MIN: u32 = 5;
pub const RANDOM_FONT_SIZE_MAX: u32 = 50;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

/// 文字區的顏色與字型。 / Display colors and optional font applied to the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub foreground: String,
    /// `None` leaves the toolkit default in place.
    pub font_style: Option<String>,
    pub font_size: Option<u32>,
}

impl Theme {
    pub fn new(background: impl Into<String>, foreground: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            foreground: foreground.into(),
            font_style: None,
            font_size: None,
        }
    }

    pub fn with_font_style(mut self, style: impl Into<String>) -> Self {
        self.font_style = Some(style.into());
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// 轉為樣式參數；僅在設定字型時包含 `font`。 / Rendering parameters; `font` is only present when a style or size is set.
    pub fn as_dict(&self) -> ThemeStyle {
        let font = if self.font_style.is_some() || self.font_size.is_some() {
            Some(FontSpec {
                family: self.font_style.clone(),
                size: self.font_size,
            })
        } else {
            None
        };
        ThemeStyle {
            bg: self.background.clone(),
            fg: self.foreground.clone(),
            font,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStyle {
    pub bg: String,
    pub fg: String,
    pub font: Option<FontSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size: Option<u32>,
}

/// 固定主題或每次查詢時產生的主題。 / A fixed theme, or a factory invoked on every lookup.
#[derive(Debug, Clone)]
pub enum ThemeSource {
    Fixed(Theme),
    Generated(fn() -> Theme),
}

impl ThemeSource {
    fn resolve(&self) -> Theme {
        match self {
            ThemeSource::Fixed(theme) => theme.clone(),
            ThemeSource::Generated(factory) => factory(),
        }
    }
}

/// 依顯示順序排列的具名主題。 / Named themes in display order.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    entries: Vec<(String, ThemeSource)>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            "dark",
            ThemeSource::Fixed(Theme::new("black", "green").with_font_style(DEFAULT_FONT)),
        );
        registry.register("light", ThemeSource::Fixed(Theme::new("white", "black")));
        registry.register(
            "im_feeling_lucky",
            ThemeSource::Generated(generate_random_theme),
        );
        registry
    }

    /// Adds or replaces an entry; replacing keeps the original position.
    pub fn register(&mut self, name: impl Into<String>, source: ThemeSource) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = source;
        } else {
            self.entries.push((name, source));
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn get_theme(&self, name: &str) -> Result<Theme, ThemeError> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, source)| source.resolve())
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
    }
}

pub static THEMES: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::builtin);

/// 從內建主題中查詢 `name`。 / Resolves `name` against the built-in registry.
pub fn get_theme(name: &str) -> Result<Theme, ThemeError> {
    THEMES.get_theme(name)
}

pub fn theme_names() -> Vec<&'static str> {
    THEMES.names().collect()
}

/// Uniform draw in `0..bound` by rejecting values of the bound's bit width.
fn sample_below<R: RngCore + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    let bits = u32::BITS - bound.leading_zeros();
    loop {
        let candidate = rng.next_u32() >> (u32::BITS - bits);
        if candidate < bound {
            return candidate;
        }
    }
}

pub fn generate_random_color_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        let digit = sample_below(rng, HEX_DIGITS.len() as u32) as usize;
        color.push(HEX_DIGITS[digit] as char);
    }
    color
}

pub fn generate_random_theme_with<R: RngCore + ?Sized>(rng: &mut R) -> Theme {
    let background = generate_random_color_with(rng);
    let foreground = generate_random_color_with(rng);
    let span = RANDOM_FONT_SIZE_MAX - RANDOM_FONT_SIZE_MIN + 1;
    let size = RANDOM_FONT_SIZE_MIN + sample_below(rng, span);
    Theme::new(background, foreground)
        .with_font_style(DEFAULT_FONT)
        .with_font_size(size)
}

pub fn generate_random_color() -> String {
    generate_random_color_with(&mut rand::thread_rng())
}

pub fn generate_random_theme() -> Theme {
    generate_random_theme_with(&mut rand::thread_rng())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// 解析色名或 `#RRGGBB`。 / Parses a named color or `#RRGGBB`.
pub fn parse_color(input: &str) -> Option<Rgb> {
    let value = input.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }
    let rgb = match value.to_ascii_lowercase().as_str() {
        "black" => Rgb::new(0, 0, 0),
        "white" => Rgb::new(255, 255, 255),
        "green" => Rgb::new(0, 128, 0),
        "red" => Rgb::new(255, 0, 0),
        "yellow" => Rgb::new(255, 255, 0),
        "blue" => Rgb::new(0, 0, 255),
        "gray" | "grey" => Rgb::new(190, 190, 190),
        _ => return None,
    };
    Some(rgb)
}
