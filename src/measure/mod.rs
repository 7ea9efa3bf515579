//! The measurement workflow: gather the regions to measure, ask the host
//! for statistics, and record them in the store.
//!
//! Everything here runs against the `host` capability traits so the
//! workflow is exercised in tests without a real image open.

mod host;

pub use host::{ImageRef, ImageSource, MeasureError, RoiSource, StatisticsEngine};

use crate::state::measurement::{MeasurementStore, Statistic};
use crate::state::roi::Roi;

/// The regions a measurement pass covers: all managed ROIs when the
/// collection is non-empty, otherwise the single active selection on the
/// front image, otherwise nothing.
pub fn collect_current_rois<H>(host: &H) -> Vec<Roi>
where
    H: ImageSource + RoiSource,
{
    let managed = host.rois();
    if !managed.is_empty() {
        return managed;
    }
    host.active_roi().into_iter().collect()
}

/// Measure every collected ROI on the front image's current slice and
/// upsert one record per ROI, keyed by (image title, slice, ROI name).
///
/// Returns the number of records written. Regions that do not intersect
/// the image are skipped. Fails without touching the store when no image
/// is open.
pub fn measure<H>(host: &H, store: &mut MeasurementStore) -> Result<usize, MeasureError>
where
    H: ImageSource + RoiSource + StatisticsEngine,
{
    let image = host.front_image().ok_or(MeasureError::NoActiveImage)?;

    let mut recorded = 0;
    for roi in collect_current_rois(host) {
        let Some(stats) = host.measure_region(&roi) else {
            tracing::warn!("{} does not intersect {}, skipped", roi.name, image.title);
            continue;
        };
        let statistic = Statistic {
            image_name: image.title.clone(),
            roi_name: roi.name.clone(),
            slice: image.slice,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        };
        tracing::debug!("measured {}", statistic.id());
        store.upsert(statistic.id(), statistic);
        recorded += 1;
    }
    Ok(recorded)
}

/// Measure, then advance the front image one slice, then rebind every
/// managed ROI to the new current slice so the same shapes follow the
/// stack frame by frame.
pub fn measure_and_advance<H>(host: &mut H, store: &mut MeasurementStore) -> Result<usize, MeasureError>
where
    H: ImageSource + RoiSource + StatisticsEngine,
{
    let recorded = measure(host, store)?;
    host.next_slice();
    retag_rois(host);
    Ok(recorded)
}

/// Rebind every managed ROI to the front image's current slice, without
/// measuring. Does nothing when no image is open.
pub fn retag_rois<H>(host: &mut H)
where
    H: ImageSource + RoiSource,
{
    if let Some(image) = host.front_image() {
        host.retag_all(image.slice);
    }
}
