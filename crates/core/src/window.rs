use rustpad_settings::{APP_NAME, DEFAULT_UNNAMED_TITLE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

/// 視窗標題：`{檔名或 Untitled} - RustPad`。 / Window title for the given file name.
pub fn get_title(current: Option<&str>) -> String {
    let current = current
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_UNNAMED_TITLE);
    format!("{current} - {APP_NAME}")
}

/// 視窗尺寸與置中計算。 / Desired window size and its centered placement on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimension {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowDimension {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowDimension {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn left_alignment(&self, screen_width: u32) -> f64 {
        f64::from(screen_width) / 2.0 - f64::from(self.width) / 2.0
    }

    pub fn top_alignment(&self, screen_height: u32) -> f64 {
        f64::from(screen_height) / 2.0 - f64::from(self.height) / 2.0
    }

    /// 產生 `寬x高+左+上` 幾何字串，半像素取偶數。 / Geometry descriptor `"{w}x{h}+{left}+{top}"`; half pixels round to even.
    pub fn get_geometry(&self, screen_width: u32, screen_height: u32) -> String {
        let [left, top] = self.offsets(screen_width, screen_height);
        format!("{}x{}+{left:.0}+{top:.0}", self.width, self.height)
    }

    /// egui 使用的內部尺寸。 / Inner size as egui expects it.
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    /// 視窗左上角座標，與 [`Self::get_geometry`] 一致。 / Top-left corner, matching [`Self::get_geometry`].
    pub fn position(&self, screen_width: u32, screen_height: u32) -> [f32; 2] {
        let [left, top] = self.offsets(screen_width, screen_height);
        [left as f32, top as f32]
    }

    fn offsets(&self, screen_width: u32, screen_height: u32) -> [f64; 2] {
        [
            self.left_alignment(screen_width).round_ties_even(),
            self.top_alignment(screen_height).round_ties_even(),
        ]
    }
}
