use anyhow::{Context, Result};
use badge_icons::badge::{ACCENT_BLUE, GLYPH_WHITE};
use image::io::Reader as ImageReader;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "icons/icon128.png".to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open image: {}", path))?
        .decode()
        .context("Failed to decode image")?;

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking badge in: {}", path);
    println!("Image dimensions: {}x{}", width, height);
    if width != height {
        println!("⚠ Icon is not square");
    }

    let corner = rgba_img.get_pixel(0, 0);
    println!("\nCorner pixel alpha: {}", corner[3]);

    // The central half of the canvas holds the disc and the glyph
    let (x_start, x_end) = (width / 4, width - width / 4);
    let (y_start, y_end) = (height / 4, height - height / 4);

    let mut blue_count = 0;
    let mut white_count = 0;
    for y in y_start..y_end {
        for x in x_start..x_end {
            let p = *rgba_img.get_pixel(x, y);
            if p == ACCENT_BLUE {
                blue_count += 1;
            } else if p == GLYPH_WHITE {
                white_count += 1;
            }
        }
    }

    println!("\nCentral region analysis:");
    println!("  {} accent blue pixels", blue_count);
    println!("  {} white glyph pixels", white_count);

    if corner[3] == 0 && blue_count > 0 && white_count > 0 {
        println!("✓ Badge looks right!");
    } else {
        println!("⚠ Badge may not be properly rendered");
    }

    Ok(())
}
