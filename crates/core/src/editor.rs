use std::collections::VecDeque;

/// 保留的最大復原步數。 / Maximum number of undo snapshots kept.
pub const MAX_UNDO_DEPTH: usize = 100;

/// 定義一段已排序（start <= end）的字元範圍。 / Represents an ordered selection range in characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    /// 建立新的選取範圍，會自動將 start/end 排序。 / Creates a selection with automatically ordered bounds.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// 建立不含選取的游標。 / Creates an empty selection (a plain caret).
    pub fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// 範圍起點。 / Returns the start of the selection.
    pub fn start(&self) -> usize {
        self.start
    }

    /// 範圍終點，也是游標位置。 / Returns the end of the selection, which is also the caret.
    pub fn end(&self) -> usize {
        self.end
    }

    /// 選取長度。 / Returns the length of the selection.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

#[derive(Clone, Debug)]
struct Snapshot {
    contents: String,
    selection: Selection,
}

/// 具備選取、剪貼與復原的文字緩衝。 / Text buffer with a selection, clipboard primitives and undo history.
///
/// `revision` only advances on changes made through this type, so a view can
/// tell when it must pull the selection back into its own widget state.
#[derive(Debug, Clone, Default)]
pub struct EditorBuffer {
    contents: String,
    selection: Selection,
    history: VecDeque<Snapshot>,
    revision: u64,
}

impl EditorBuffer {
    /// 從給定文字建立緩衝區，游標位於開頭。 / Creates a buffer with the caret at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            contents: text.into(),
            ..Self::default()
        }
    }

    /// 取得目前的內容。 / Returns the current buffer contents.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// 以字元數計算的長度。 / Length in characters.
    pub fn char_len(&self) -> usize {
        self.contents.chars().count()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.char_len());
    }

    /// 取得選取的文字；無選取時回傳 `None`。 / Returns the selected text, or `None` when nothing is selected.
    pub fn selected_text(&self) -> Option<&str> {
        if self.selection.is_empty() {
            return None;
        }
        let (start, end) = self.byte_range(self.selection);
        Some(&self.contents[start..end])
    }

    /// 以新內容取代整份緩衝並清除復原紀錄。 / Replaces everything and forgets the undo history.
    pub fn reset(&mut self, text: impl Into<String>) {
        self.contents = text.into();
        self.selection = Selection::default();
        self.history.clear();
        self.revision += 1;
    }

    /// 將選取範圍設定為整份文件。 / Selects the entire document.
    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.char_len());
        self.revision += 1;
    }

    /// 刪除選取文字。 / Deletes the selected text; returns whether anything changed.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.replace_selection("");
        true
    }

    pub fn copy(&self) -> Option<String> {
        self.selected_text().map(str::to_owned)
    }

    pub fn cut(&mut self) -> Option<String> {
        let text = self.copy()?;
        self.replace_selection("");
        Some(text)
    }

    /// 以文字取代選取範圍，游標移至插入文字之後。 / Replaces the selection, leaving the caret after the inserted text.
    pub fn paste(&mut self, text: &str) {
        if text.is_empty() && self.selection.is_empty() {
            return;
        }
        self.replace_selection(text);
    }

    /// 復原上一個變更。 / Reverts the most recent change; returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };
        self.contents = snapshot.contents;
        self.selection = snapshot.selection;
        self.revision += 1;
        true
    }

    /// 記錄由檢視元件直接完成的編輯。 / Records an edit already applied by the view's text widget.
    pub fn record_external_edit(&mut self, contents: String, selection: Selection) {
        if contents != self.contents {
            self.push_history();
            self.contents = contents;
        }
        self.set_selection(selection);
    }

    /// 回傳游標所在的行與欄（皆從 1 起算）。 / Caret line and column, both 1-based.
    pub fn cursor_location(&self) -> (usize, usize) {
        let caret = self.selection.end();
        let mut line = 1;
        let mut column = 1;
        for ch in self.contents.chars().take(caret) {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    fn replace_selection(&mut self, text: &str) {
        self.push_history();
        let (start, end) = self.byte_range(self.selection);
        self.contents.replace_range(start..end, text);
        let caret = self.selection.start() + text.chars().count();
        self.selection = Selection::caret(caret);
        self.revision += 1;
    }

    fn push_history(&mut self) {
        if self.history.len() == MAX_UNDO_DEPTH {
            self.history.pop_front();
        }
        self.history.push_back(Snapshot {
            contents: self.contents.clone(),
            selection: self.selection,
        });
    }

    fn byte_range(&self, selection: Selection) -> (usize, usize) {
        (
            byte_offset(&self.contents, selection.start()),
            byte_offset(&self.contents, selection.end()),
        )
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
