use crate::font::{resolve_face, GlyphBitmap, GlyphFace};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Opaque accent blue used for the badge disc.
pub const ACCENT_BLUE: Rgba<u8> = Rgba([26, 115, 232, 255]);
pub const GLYPH_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fixed look of every badge icon.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BadgeStyle {
    background: Rgba<u8>,
    foreground: Rgba<u8>,
    /// Inset of the disc from each canvas edge, in pixels.
    margin: u32,
    letter: char,
    /// Font em size as a fraction of the icon size.
    font_ratio: f32,
    /// Vertical nudge applied after geometric centering of the glyph.
    optical_offset: i32,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            background: ACCENT_BLUE,
            foreground: GLYPH_WHITE,
            margin: 1,
            letter: 'M',
            font_ratio: 0.6,
            optical_offset: -2,
        }
    }
}

impl BadgeStyle {
    fn font_px(&self, size: u32) -> u32 {
        (size as f32 * self.font_ratio) as u32
    }
}

/// Render a badge icon of `size` pixels and write it to `path` as PNG.
///
/// The parent directory must already exist.
pub fn render(size: u32, path: &Path) -> Result<()> {
    let image = render_badge(size)?;
    save_png(&image, path)?;
    println!("✓ Created icon: {}", path.display());
    Ok(())
}

/// Render a badge icon in memory using the first available glyph face.
pub fn render_badge(size: u32) -> Result<RgbaImage> {
    render_badge_with_face(size, &resolve_face())
}

pub fn render_badge_with_face(size: u32, face: &GlyphFace) -> Result<RgbaImage> {
    if size == 0 {
        anyhow::bail!("Icon size must be positive");
    }

    let style = BadgeStyle::default();
    let mut canvas = RgbaImage::from_pixel(size, size, TRANSPARENT);

    fill_inscribed_circle(&mut canvas, style.margin, style.background);

    if let Some(glyph) = face.rasterize(style.letter, style.font_px(size)) {
        let (x, y) = glyph_origin(size, &glyph, style.optical_offset);
        draw_glyph(&mut canvas, &glyph, x, y, style.foreground);
    }

    Ok(canvas)
}

/// Fill the ellipse inscribed in the canvas shrunk by `margin` on every side.
/// A pixel is filled when its center falls inside; the edge is not blended.
fn fill_inscribed_circle(canvas: &mut RgbaImage, margin: u32, color: Rgba<u8>) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let inset = margin as f32;

    let rx = (width - 2.0 * inset) / 2.0;
    let ry = (height - 2.0 * inset) / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    let center_x = width / 2.0;
    let center_y = height / 2.0;

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = (x as f32 + 0.5 - center_x) / rx;
        let dy = (y as f32 + 0.5 - center_y) / ry;
        if dx * dx + dy * dy <= 1.0 {
            *pixel = color;
        }
    }
}

/// Top-left corner of the glyph's bounding box, centered with floor division
/// and nudged vertically by `optical_offset`.
fn glyph_origin(size: u32, glyph: &GlyphBitmap, optical_offset: i32) -> (i32, i32) {
    let size = size as i32;
    let x = (size - glyph.width as i32).div_euclid(2);
    let y = (size - glyph.height as i32).div_euclid(2) + optical_offset;
    (x, y)
}

fn draw_glyph(canvas: &mut RgbaImage, glyph: &GlyphBitmap, x0: i32, y0: i32, color: Rgba<u8>) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for gy in 0..glyph.height {
        for gx in 0..glyph.width {
            let x = x0 + gx as i32;
            let y = y0 + gy as i32;
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }

            let coverage = glyph.coverage_at(gx, gy);
            if coverage > 0.0 {
                let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                *pixel = blend_over(*pixel, color, coverage);
            }
        }
    }
}

/// Source-over compositing of `src` at `coverage` onto `dst`.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * coverage;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }

    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).context("Failed to create PNG file")?;
    let mut out_file = BufWriter::new(file);
    write_png(image.as_raw(), &mut out_file, image.width())
        .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
    out_file.flush().context("Failed to flush PNG file")?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
