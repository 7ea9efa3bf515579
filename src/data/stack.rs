use crate::state::roi::RoiShape;

/// A grayscale multi-slice image stack.
///
/// Slices are numbered from 1, matching how slice indices appear in
/// measurements and exports. Samples carry the source bit depth's raw
/// values (0..=255 for 8-bit sources, 0..=65535 for 16-bit).
#[derive(Debug)]
pub struct ImageStack {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Nominal white point of the source data, used for display scaling.
    pub sample_max: f32,
    slices: Vec<Vec<f32>>,
    current: u32,
}

impl ImageStack {
    pub fn new(
        title: String,
        width: u32,
        height: u32,
        slices: Vec<Vec<f32>>,
        sample_max: f32,
    ) -> Result<Self, String> {
        if slices.is_empty() {
            return Err("stack has no slices".to_string());
        }
        let expected = (width as usize) * (height as usize);
        if let Some(bad) = slices.iter().position(|s| s.len() != expected) {
            return Err(format!(
                "slice {} has {} samples, expected {expected}",
                bad + 1,
                slices[bad].len()
            ));
        }
        Ok(Self {
            title,
            width,
            height,
            sample_max,
            slices,
            current: 1,
        })
    }

    pub fn slice_count(&self) -> u32 {
        self.slices.len() as u32
    }

    pub fn current_slice(&self) -> u32 {
        self.current
    }

    /// Jump to `slice`, clamped to the valid 1..=count range.
    pub fn set_slice(&mut self, slice: u32) {
        self.current = slice.clamp(1, self.slice_count());
    }

    /// Advance one slice; stays on the last slice at the end of the stack.
    pub fn next_slice(&mut self) {
        self.set_slice(self.current + 1);
    }

    /// Samples of the currently displayed slice, row-major.
    pub fn current_samples(&self) -> &[f32] {
        &self.slices[(self.current - 1) as usize]
    }

    /// Samples of the current slice inside `shape`, clipped to the image.
    /// Empty when the region does not overlap the image.
    pub fn region_samples(&self, shape: &RoiShape) -> Vec<f32> {
        let Some(clipped) = shape.clipped(self.width, self.height) else {
            return Vec::new();
        };
        let samples = self.current_samples();
        let mut out = Vec::with_capacity((clipped.width * clipped.height) as usize);
        for row in clipped.y..clipped.y + clipped.height {
            let start = (row * self.width + clipped.x) as usize;
            out.extend_from_slice(&samples[start..start + clipped.width as usize]);
        }
        out
    }
}
