use thiserror::Error;

use crate::processing::statistics::RegionStats;
use crate::state::roi::Roi;

/// Title and current slice of the front image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub title: String,
    pub slice: u32,
}

/// Access to the front image.
pub trait ImageSource {
    /// The open image, or `None` when nothing is open.
    fn front_image(&self) -> Option<ImageRef>;

    /// Advance the front image one slice. No-op past the last slice or when
    /// no image is open.
    fn next_slice(&mut self);

    /// The selection active on the front image, outside any managed
    /// collection.
    fn active_roi(&self) -> Option<Roi>;
}

/// Access to the managed ROI collection.
pub trait RoiSource {
    /// Every managed ROI; empty when no collection is populated.
    fn rois(&self) -> Vec<Roi>;

    /// Rebind every managed ROI to `slice`.
    fn retag_all(&mut self, slice: u32);
}

/// Intensity statistics over a region of the front image's current slice.
pub trait StatisticsEngine {
    /// `None` when the region does not intersect the image or no image is
    /// open.
    fn measure_region(&self, roi: &Roi) -> Option<RegionStats>;
}

/// Errors the measurement workflow surfaces to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    #[error("no image is open")]
    NoActiveImage,
}
