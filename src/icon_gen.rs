use crate::badge;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Output directory, relative to the working directory.
pub const ICONS_DIR: &str = "icons";

/// Icon sizes generated, in order.
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

/// File name of the icon for `size`, e.g. `icon16.png`.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{}.png", size)
}

/// Generate every icon size into `out_dir`, creating the directory if needed.
///
/// Stops at the first failure; icons written before it are left in place.
pub fn generate_icons(out_dir: &Path) -> Result<Vec<PathBuf>> {
    // Ensure the output directory exists
    std::fs::create_dir_all(out_dir).context("Can't create output directory")?;

    let mut written = Vec::with_capacity(ICON_SIZES.len());
    for size in ICON_SIZES {
        let output_path = out_dir.join(icon_file_name(size));
        badge::render(size, &output_path)
            .with_context(|| format!("Failed to generate {}", output_path.display()))?;
        written.push(output_path);
    }

    println!("All icons created successfully!");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_names_follow_size() {
        assert_eq!(icon_file_name(16), "icon16.png");
        assert_eq!(icon_file_name(128), "icon128.png");
    }

    #[test]
    fn creates_nested_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("nested").join("icons");

        let written = generate_icons(&out_dir).unwrap();

        assert!(out_dir.is_dir());
        assert_eq!(written.len(), ICON_SIZES.len());
        for (path, size) in written.iter().zip(ICON_SIZES) {
            assert_eq!(path, &out_dir.join(icon_file_name(size)));
            assert!(path.is_file());
        }
    }

    #[test]
    fn existing_directory_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        generate_icons(temp_dir.path()).unwrap();
        generate_icons(temp_dir.path()).unwrap();
    }

    #[test]
    fn fails_before_rendering_when_directory_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("icons");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = generate_icons(&blocker).unwrap_err();

        assert!(err.downcast_ref::<std::io::Error>().is_some());
        assert_eq!(std::fs::read(&blocker).unwrap(), b"not a directory");
    }
}
