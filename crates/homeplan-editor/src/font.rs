//! Label font loading.
//!
//! Labels use the system sans-serif face; no font is bundled with the
//! crate. When no system font can be resolved the renderer simply skips
//! text, so headless environments without fonts still render plans.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{fs, sync::OnceLock};
use tracing::warn;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Returns the label font, resolved once per process. `None` when the
/// system has no usable sans-serif face.
pub fn label_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = load_sans_serif();
        if font.is_none() {
            warn!("no system sans-serif font found; labels will not be drawn");
        }
        font
    })
    .as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let query = Query {
        families: &[Family::SansSerif],
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
