use std::collections::BTreeMap;
use std::fmt;

/// Identity of a single measurement: which image, which slice, which ROI.
///
/// Ordering is by image name, then slice, then ROI name, so iterating a
/// sorted collection walks each image slice by slice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatisticId {
    pub image_name: String,
    pub slice: u32,
    pub roi_name: String,
}

impl StatisticId {
    pub fn new(image_name: impl Into<String>, slice: u32, roi_name: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
            slice,
            roi_name: roi_name.into(),
        }
    }
}

impl fmt::Display for StatisticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} slice {} ({})", self.image_name, self.slice, self.roi_name)
    }
}

/// One measured record: intensity statistics for a ROI on one slice of one
/// image. Constructed once from a statistics computation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    pub image_name: String,
    pub roi_name: String,
    pub slice: u32,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistic {
    /// The identity this record is stored under.
    pub fn id(&self) -> StatisticId {
        StatisticId::new(self.image_name.clone(), self.slice, self.roi_name.clone())
    }
}

/// Sorted collection of measurements, at most one per identity.
///
/// Re-measuring the same (image, slice, ROI) triple replaces the earlier
/// record. Iteration order is the id order, independent of insertion order.
#[derive(Debug, Default, Clone)]
pub struct MeasurementStore {
    records: BTreeMap<StatisticId, Statistic>,
}

impl MeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record at `id`.
    pub fn upsert(&mut self, id: StatisticId, statistic: Statistic) {
        self.records.insert(id, statistic);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in id order. Restartable and side-effect free; backs the
    /// results table.
    pub fn snapshot_ordered(&self) -> impl Iterator<Item = (&StatisticId, &Statistic)> {
        self.records.iter()
    }

    /// Records partitioned by ROI name. Within a group the records keep the
    /// store order, i.e. by image then slice.
    pub fn grouped_by_roi(&self) -> BTreeMap<&str, Vec<&Statistic>> {
        let mut groups: BTreeMap<&str, Vec<&Statistic>> = BTreeMap::new();
        for (id, statistic) in &self.records {
            groups.entry(id.roi_name.as_str()).or_default().push(statistic);
        }
        groups
    }
}
