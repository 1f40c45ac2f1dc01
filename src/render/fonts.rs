use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use thiserror::Error;

/// Decorative blackletter face used for the title, column letters, and the
/// free cell.
pub const DISPLAY_FONT_FILE: &str = "OldLondon.ttf";
/// Serif face used for cell text, footers, and the unused-item listing.
pub const SERIF_FONT_FILE: &str = "AppleGaramond.ttf";

#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("font file {path} is missing or unreadable")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("font file {path} is not a usable TrueType font")]
    Invalid { path: PathBuf },
}

/// The two font resources every page render needs.
///
/// Loaded once at process start and passed by reference to render calls;
/// a missing file aborts the run before any card is produced.
#[derive(Debug)]
pub struct FontSet {
    pub display: FontVec,
    pub serif: FontVec,
}

impl FontSet {
    /// Load both faces from `dir` by their fixed file names.
    pub fn load(dir: &Path) -> Result<Self, FontLoadError> {
        Ok(Self {
            display: load_font(&dir.join(DISPLAY_FONT_FILE))?,
            serif: load_font(&dir.join(SERIF_FONT_FILE))?,
        })
    }
}

fn load_font(path: &Path) -> Result<FontVec, FontLoadError> {
    let bytes = fs::read(path).map_err(|source| FontLoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|_| FontLoadError::Invalid {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_reports_unreadable() {
        let err = FontSet::load(Path::new("/nonexistent/font/dir")).unwrap_err();
        assert!(matches!(err, FontLoadError::Unreadable { .. }));
    }

    #[test]
    fn garbage_bytes_report_invalid() {
        let dir = std::env::temp_dir().join("valley_bingo_font_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(DISPLAY_FONT_FILE), b"not a font").unwrap();
        std::fs::write(dir.join(SERIF_FONT_FILE), b"not a font").unwrap();
        let err = FontSet::load(&dir).unwrap_err();
        std::fs::remove_dir_all(&dir).ok();
        assert!(matches!(err, FontLoadError::Invalid { .. }));
    }
}
