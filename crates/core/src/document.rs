use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// 讀寫純文字檔時的錯誤。 / Failure while reading or writing a text file.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("document has no associated path")]
    NoPath,
}

/// 純文字文件：整份讀入、整份寫出，不做編碼轉換。 / Plain-text document, read and written verbatim as a whole.
#[derive(Debug, Clone, Default)]
pub struct Document {
    path: Option<PathBuf>,
    contents: String,
    is_dirty: bool,
}

impl Document {
    /// 尚未命名的空白文件。 / An empty, untitled document.
    pub fn new() -> Self {
        Self::default()
    }

    /// 讀取 UTF-8 檔案；內容原樣保留（含換行）。 / Reads a UTF-8 file, keeping line endings as they are.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let source = path.as_ref();
        let contents = String::from_utf8(fs::read(source)?)
            .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;
        Ok(Self {
            path: Some(source.to_path_buf()),
            contents,
            is_dirty: false,
        })
    }

    /// 寫回目前的檔案。 / Writes back to the known path, or fails with [`DocumentError::NoPath`].
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let target = self.path.clone().ok_or(DocumentError::NoPath)?;
        self.save_as(target)
    }

    /// 寫入 `path` 並記住它。 / Writes to `path` and adopts it as the document's file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let target = path.as_ref();
        write_replacing(target, &self.contents)?;
        self.path = Some(target.to_path_buf());
        self.is_dirty = false;
        Ok(())
    }

    /// 寫入成功後才採用 `contents`；失敗時文件保持原狀。 / Writes `contents` to `path`; the document only takes them once the write succeeded.
    pub fn save_as_with(
        &mut self,
        contents: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), DocumentError> {
        let target = path.as_ref();
        write_replacing(target, contents)?;
        self.contents = contents.to_string();
        self.path = Some(target.to_path_buf());
        self.is_dirty = false;
        Ok(())
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// 內容有變才標記為已修改。 / Replaces the text; only an actual change marks the document dirty.
    pub fn set_contents(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.contents {
            self.contents = text;
            self.is_dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 取得用於標題列的檔名。 / File name shown in the window title.
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }
}

/// 暫存檔寫完再改名；失敗時暫存檔隨即刪除。 / The target is only replaced by a complete file; a failed write leaves nothing behind.
fn write_replacing(target: &Path, contents: &str) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(dir)?;
    staging.write_all(contents.as_bytes())?;
    staging.as_file().sync_all()?;
    staging.persist(target)?;
    Ok(())
}
