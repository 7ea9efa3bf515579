use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::data::stack::ImageStack;

/// File extensions the open dialog offers.
pub const STACK_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif"];

/// Load one or more image files as the slices of a single stack.
///
/// Files become slices in the given order and must all share one size.
/// The stack takes its title from the first file's name.
pub fn load_stack(paths: &[PathBuf]) -> Result<ImageStack, String> {
    let Some(first) = paths.first() else {
        return Err("no files selected".to_string());
    };

    let title = first
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stack".to_string());

    let mut slices = Vec::with_capacity(paths.len());
    let mut size: Option<(u32, u32)> = None;
    let mut sample_max = 0.0f32;

    for path in paths {
        let slice = load_slice(path)?;
        match size {
            None => size = Some((slice.width, slice.height)),
            Some((w, h)) if (slice.width, slice.height) != (w, h) => {
                return Err(format!(
                    "{}: slice size {}x{} does not match stack size {w}x{h}",
                    path.display(),
                    slice.width,
                    slice.height
                ));
            }
            _ => {}
        }
        sample_max = sample_max.max(slice.sample_max);
        slices.push(slice.samples);
    }

    let Some((width, height)) = size else {
        return Err("no files selected".to_string());
    };

    tracing::info!(
        "loaded {} as {width}x{height} stack with {} slice(s)",
        title,
        slices.len()
    );
    ImageStack::new(title, width, height, slices, sample_max)
}

struct SliceData {
    width: u32,
    height: u32,
    samples: Vec<f32>,
    sample_max: f32,
}

/// Decode one file to grayscale samples, keeping 16-bit sources at their
/// native value range.
fn load_slice(path: &Path) -> Result<SliceData, String> {
    let img = image::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;

    let wide = matches!(
        img,
        DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_)
    );

    if wide {
        let buf = img.to_luma16();
        let (width, height) = buf.dimensions();
        Ok(SliceData {
            width,
            height,
            samples: buf.into_raw().into_iter().map(|v| v as f32).collect(),
            sample_max: 65535.0,
        })
    } else {
        let buf = img.to_luma8();
        let (width, height) = buf.dimensions();
        Ok(SliceData {
            width,
            height,
            samples: buf.into_raw().into_iter().map(|v| v as f32).collect(),
            sample_max: 255.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, size: u32, value: u8) -> PathBuf {
        let path = dir.join(name);
        GrayImage::from_pixel(size, size, Luma([value]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_load_stack_from_files() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 4, 10);
        let b = write_png(dir.path(), "b.png", 4, 200);

        let mut stack = load_stack(&[a, b]).unwrap();

        assert_eq!(stack.title, "a.png");
        assert_eq!(stack.slice_count(), 2);
        assert_eq!(stack.width, 4);
        assert!(stack.current_samples().iter().all(|&v| v == 10.0));
        stack.next_slice();
        assert!(stack.current_samples().iter().all(|&v| v == 200.0));
    }

    #[test]
    fn test_load_stack_rejects_mixed_sizes() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 4, 0);
        let b = write_png(dir.path(), "b.png", 5, 0);

        let err = load_stack(&[a, b]).unwrap_err();
        assert!(err.contains("does not match"));
    }

    #[test]
    fn test_load_stack_without_files() {
        assert!(load_stack(&[]).is_err());
    }

    #[test]
    fn test_load_stack_missing_file() {
        let err = load_stack(&[PathBuf::from("/nonexistent/missing.png")]).unwrap_err();
        assert!(err.contains("cannot open"));
    }
}
