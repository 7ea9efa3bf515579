//! The in-app stand-in for a host application: the open stack, the
//! managed ROI collection, and the selection being drawn on the viewer.
//! Implements the capability traits the measurement workflow runs against.

use crate::data::stack::ImageStack;
use crate::measure::{ImageRef, ImageSource, RoiSource, StatisticsEngine};
use crate::processing::statistics::RegionStats;
use crate::state::roi::{Roi, RoiManager, RoiShape};

#[derive(Debug, Default)]
pub struct Workspace {
    pub stack: Option<ImageStack>,
    pub rois: RoiManager,
    /// Selection drawn on the viewer but not yet committed to the manager.
    pub active_selection: Option<RoiShape>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the open stack. Managed ROIs survive so a prepared set can
    /// be reused across stacks; the uncommitted selection does not.
    pub fn open_stack(&mut self, stack: ImageStack) {
        self.active_selection = None;
        self.stack = Some(stack);
    }

    /// Move the drawn selection into the manager, bound to the current
    /// slice. Returns the committed ROI's name.
    pub fn commit_selection(&mut self) -> Option<String> {
        let stack = self.stack.as_ref()?;
        let shape = self.active_selection.take()?;
        let roi = self.rois.add(shape, stack.current_slice());
        Some(roi.name.clone())
    }
}

impl ImageSource for Workspace {
    fn front_image(&self) -> Option<ImageRef> {
        self.stack.as_ref().map(|s| ImageRef {
            title: s.title.clone(),
            slice: s.current_slice(),
        })
    }

    fn next_slice(&mut self) {
        if let Some(stack) = self.stack.as_mut() {
            stack.next_slice();
        }
    }

    fn active_roi(&self) -> Option<Roi> {
        let stack = self.stack.as_ref()?;
        self.active_selection.map(|shape| Roi {
            name: "selection".to_string(),
            shape,
            position: stack.current_slice(),
        })
    }
}

impl RoiSource for Workspace {
    fn rois(&self) -> Vec<Roi> {
        self.rois.rois().to_vec()
    }

    fn retag_all(&mut self, slice: u32) {
        self.rois.retag_all(slice);
    }
}

impl StatisticsEngine for Workspace {
    fn measure_region(&self, roi: &Roi) -> Option<RegionStats> {
        let stack = self.stack.as_ref()?;
        RegionStats::compute(&stack.region_samples(&roi.shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure;
    use crate::state::measurement::MeasurementStore;

    fn flat_stack(values: &[f32]) -> ImageStack {
        let slices = values.iter().map(|&v| vec![v; 16]).collect();
        ImageStack::new("flat.tif".to_string(), 4, 4, slices, 255.0).unwrap()
    }

    #[test]
    fn test_workspace_front_image() {
        let mut workspace = Workspace::new();
        assert!(workspace.front_image().is_none());

        workspace.open_stack(flat_stack(&[7.0]));
        let image = workspace.front_image().unwrap();
        assert_eq!(image.title, "flat.tif");
        assert_eq!(image.slice, 1);
    }

    #[test]
    fn test_commit_selection_binds_current_slice() {
        let mut workspace = Workspace::new();
        workspace.open_stack(flat_stack(&[1.0, 2.0]));
        workspace.next_slice();
        workspace.active_selection = Some(RoiShape::new(0, 0, 2, 2));

        let name = workspace.commit_selection().unwrap();

        assert_eq!(name, "ROI 1");
        assert!(workspace.active_selection.is_none());
        assert_eq!(workspace.rois.rois()[0].position, 2);
    }

    #[test]
    fn test_measure_through_workspace() {
        let mut workspace = Workspace::new();
        workspace.open_stack(flat_stack(&[50.0, 90.0]));
        workspace.rois.add(RoiShape::new(1, 1, 2, 2), 1);
        let mut store = MeasurementStore::new();

        measure::measure(&workspace, &mut store).unwrap();
        measure::measure_and_advance(&mut workspace, &mut store).unwrap();

        // Slice 1 was measured twice (overwritten), slice 2 is now current.
        assert_eq!(store.len(), 1);
        let means: Vec<f64> = store.snapshot_ordered().map(|(_, s)| s.mean).collect();
        assert_eq!(means, vec![50.0]);

        measure::measure(&workspace, &mut store).unwrap();
        assert_eq!(store.len(), 2);
        let means: Vec<f64> = store.snapshot_ordered().map(|(_, s)| s.mean).collect();
        assert_eq!(means, vec![50.0, 90.0]);
    }

    #[test]
    fn test_selection_fallback_is_named_selection() {
        let mut workspace = Workspace::new();
        workspace.open_stack(flat_stack(&[10.0]));
        workspace.active_selection = Some(RoiShape::new(0, 0, 4, 4));
        let mut store = MeasurementStore::new();

        measure::measure(&workspace, &mut store).unwrap();

        let (id, stat) = store.snapshot_ordered().next().unwrap();
        assert_eq!(id.roi_name, "selection");
        assert_eq!(stat.mean, 10.0);
        assert_eq!(stat.std_dev, 0.0);
    }
}
