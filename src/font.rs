//! Glyph face resolution and rasterization.
//!
//! Faces are tried in order from [`FONT_CANDIDATES`]; the first file that can be
//! read and parsed wins. When none of them is available the built-in bitmap face
//! is used, so resolving a face never fails.

use rusttype::{point, Font, Scale};
use std::path::Path;

/// Outline fonts tried in order before falling back to the built-in face.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Arial.ttf",
];

/// Built-in face rows, top to bottom, 5 bits wide (MSB = left).
const BUILTIN_WIDTH: u32 = 5;
const BUILTIN_HEIGHT: u32 = 7;

const BUILTIN_M: [u8; 7] = [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11];

/// Where glyphs come from.
pub enum GlyphFace {
    Outline(Font<'static>),
    Builtin,
}

/// A rasterized glyph: row-major coverage in `0.0..=1.0`, sized to its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<f32>,
}

impl GlyphBitmap {
    pub fn coverage_at(&self, x: u32, y: u32) -> f32 {
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Resolve a face from the default candidate list.
pub fn resolve_face() -> GlyphFace {
    resolve_face_from(FONT_CANDIDATES.iter().map(Path::new))
}

/// Resolve a face from an ordered list of font files, falling back to the
/// built-in face when none of them loads.
pub fn resolve_face_from<'a, I>(candidates: I) -> GlyphFace
where
    I: IntoIterator<Item = &'a Path>,
{
    candidates
        .into_iter()
        .find_map(load_font)
        .map(GlyphFace::Outline)
        .unwrap_or(GlyphFace::Builtin)
}

fn load_font(path: &Path) -> Option<Font<'static>> {
    let data = std::fs::read(path).ok()?;
    Font::try_from_vec(data)
}

impl GlyphFace {
    pub fn is_builtin(&self) -> bool {
        matches!(self, GlyphFace::Builtin)
    }

    /// Rasterize `ch` with an em size of `px` pixels. Returns `None` when the
    /// glyph has no ink at that size (e.g. a zero pixel size) or the built-in
    /// face has no bitmap for it.
    pub fn rasterize(&self, ch: char, px: u32) -> Option<GlyphBitmap> {
        if px == 0 {
            return None;
        }

        match self {
            GlyphFace::Outline(font) => rasterize_outline(font, ch, px),
            GlyphFace::Builtin => rasterize_builtin(ch, px),
        }
    }
}

fn rasterize_outline(font: &Font<'static>, ch: char, px: u32) -> Option<GlyphBitmap> {
    let scale = em_scale(font, px);
    let v_metrics = font.v_metrics(scale);
    let glyph = font
        .glyph(ch)
        .scaled(scale)
        .positioned(point(0.0, v_metrics.ascent));

    let bb = glyph.pixel_bounding_box()?;
    let width = bb.width() as u32;
    let height = bb.height() as u32;
    if width == 0 || height == 0 {
        return None;
    }

    let mut coverage = vec![0.0; (width * height) as usize];
    glyph.draw(|x, y, v| {
        if x < width && y < height {
            coverage[(y * width + x) as usize] = v.clamp(0.0, 1.0);
        }
    });

    Some(GlyphBitmap {
        width,
        height,
        coverage,
    })
}

/// rusttype scales by ascent-to-descent height; convert an em size in pixels
/// into that height.
fn em_scale(font: &Font<'static>, px: u32) -> Scale {
    let v_metrics = font.v_metrics_unscaled();
    let units_per_em = font.units_per_em().max(1) as f32;
    Scale::uniform(px as f32 * (v_metrics.ascent - v_metrics.descent) / units_per_em)
}

/// Integer scale that brings the 7-row built-in face close to an outline
/// font's cap height at `px`.
fn builtin_scale(px: u32) -> u32 {
    (px / 10).max(1)
}

fn builtin_rows(ch: char) -> Option<&'static [u8; 7]> {
    match ch.to_ascii_uppercase() {
        'M' => Some(&BUILTIN_M),
        _ => None,
    }
}

fn rasterize_builtin(ch: char, px: u32) -> Option<GlyphBitmap> {
    let rows = builtin_rows(ch)?;
    let scale = builtin_scale(px);
    let width = BUILTIN_WIDTH * scale;
    let height = BUILTIN_HEIGHT * scale;

    let mut coverage = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        let row = rows[(y / scale) as usize];
        for x in 0..width {
            let bit = BUILTIN_WIDTH - 1 - x / scale;
            coverage.push(if row >> bit & 1 == 1 { 1.0 } else { 0.0 });
        }
    }

    Some(GlyphBitmap {
        width,
        height,
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_candidates_fall_back_to_builtin() {
        let face = resolve_face_from([
            Path::new("/nonexistent/fonts/Missing-Bold.ttf"),
            Path::new("/nonexistent/fonts/Missing.ttf"),
        ]);
        assert!(face.is_builtin());
    }

    #[test]
    fn unparsable_candidate_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        let face = resolve_face_from([bogus.as_path()]);
        assert!(face.is_builtin());
    }

    #[test]
    fn builtin_m_has_outer_stems_and_open_bottom_center() {
        let glyph = GlyphFace::Builtin.rasterize('M', 9).unwrap();
        assert_eq!((glyph.width, glyph.height), (5, 7));

        for y in 0..7 {
            assert_eq!(glyph.coverage_at(0, y), 1.0);
            assert_eq!(glyph.coverage_at(4, y), 1.0);
        }
        // Peaks meet in the middle of the third row, bottom middle stays open
        assert_eq!(glyph.coverage_at(2, 2), 1.0);
        assert_eq!(glyph.coverage_at(2, 6), 0.0);
    }

    #[test]
    fn builtin_face_scales_with_pixel_size() {
        let glyph = GlyphFace::Builtin.rasterize('M', 76).unwrap();
        assert_eq!((glyph.width, glyph.height), (35, 49));
        assert_eq!(glyph.coverage.len(), 35 * 49);
    }

    #[test]
    fn builtin_face_only_has_m() {
        assert!(GlyphFace::Builtin.rasterize('m', 9).is_some());
        assert!(GlyphFace::Builtin.rasterize('#', 9).is_none());
    }

    #[test]
    fn zero_pixel_size_has_no_glyph() {
        assert!(GlyphFace::Builtin.rasterize('M', 0).is_none());
    }

    #[test]
    fn system_font_glyph_fits_its_pixel_size() {
        // Only meaningful where one of the candidate fonts is installed
        let face = resolve_face();
        if face.is_builtin() {
            return;
        }

        let glyph = face.rasterize('M', 76).unwrap();
        assert!(glyph.width > 0 && glyph.width <= 76);
        assert!(glyph.height > 0 && glyph.height <= 76);
        assert!(glyph.coverage.iter().any(|&c| c > 0.99));
    }

    #[test]
    fn outline_m_cap_height_tracks_em_size() {
        let face = resolve_face_from([Path::new(FONT_CANDIDATES[0])]);
        if face.is_builtin() {
            return;
        }

        // DejaVu Sans Bold cap height is 1493/2048 em, about 55 px at 76 px
        let glyph = face.rasterize('M', 76).unwrap();
        assert!(
            (54..=57).contains(&glyph.height),
            "glyph height {} is not a 76px-em cap height",
            glyph.height
        );
    }
}
