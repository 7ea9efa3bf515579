//! Grouped TSV export of the measurement store.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::state::measurement::{MeasurementStore, Statistic};

/// A file that could not be written during an export pass.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}

/// What an export pass produced.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub written: Vec<PathBuf>,
    pub failed: Vec<ExportError>,
}

/// Write one `<roi>_measurements.tsv` per ROI name into `dir`.
///
/// Lines within a file follow the store order, i.e. by image then slice.
/// A file that cannot be written is reported in the outcome without
/// aborting the remaining groups. ROI names go into file names verbatim.
pub fn export_grouped_by_roi(store: &MeasurementStore, dir: &Path) -> ExportOutcome {
    let mut outcome = ExportOutcome::default();
    for (roi_name, records) in store.grouped_by_roi() {
        let path = dir.join(format!("{roi_name}_measurements.tsv"));
        match write_roi_file(&path, &records) {
            Ok(()) => {
                tracing::info!("wrote {} record(s) to {}", records.len(), path.display());
                outcome.written.push(path);
            }
            Err(source) => {
                tracing::error!("failed to write {}: {source}", path.display());
                outcome.failed.push(ExportError { path, source });
            }
        }
    }
    outcome
}

fn write_roi_file(path: &Path, records: &[&Statistic]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    writer.write_record(["slice", "mean", "stdDev"])?;
    for statistic in records {
        writer.write_record([
            statistic.slice.to_string(),
            statistic.mean.to_string(),
            statistic.std_dev.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn stat(image: &str, slice: u32, roi: &str, mean: f64, std_dev: f64) -> Statistic {
        Statistic {
            image_name: image.to_string(),
            roi_name: roi.to_string(),
            slice,
            mean,
            std_dev,
            min: 0.0,
            max: 0.0,
        }
    }

    fn store_with(stats: Vec<Statistic>) -> MeasurementStore {
        let mut store = MeasurementStore::new();
        for s in stats {
            store.upsert(s.id(), s);
        }
        store
    }

    #[test]
    fn test_export_single_roi_ordered_by_slice() {
        let store = store_with(vec![
            stat("imgA", 2, "roiX", 20.5, 2.5),
            stat("imgA", 1, "roiX", 10.0, 1.0),
        ]);
        let dir = tempdir().unwrap();

        let outcome = export_grouped_by_roi(&store, dir.path());

        assert_eq!(outcome.written.len(), 1);
        assert!(outcome.failed.is_empty());

        let content = fs::read_to_string(dir.path().join("roiX_measurements.tsv")).unwrap();
        assert_eq!(content, "slice\tmean\tstdDev\n1\t10\t1\n2\t20.5\t2.5\n");
    }

    #[test]
    fn test_export_two_rois_two_files() {
        let store = store_with(vec![
            stat("imgA", 1, "cell", 1.0, 0.1),
            stat("imgA", 1, "background", 2.0, 0.2),
        ]);
        let dir = tempdir().unwrap();

        let outcome = export_grouped_by_roi(&store, dir.path());

        assert_eq!(outcome.written.len(), 2);

        let cell = fs::read_to_string(dir.path().join("cell_measurements.tsv")).unwrap();
        let background =
            fs::read_to_string(dir.path().join("background_measurements.tsv")).unwrap();
        assert!(cell.contains("1\t1\t0.1"));
        assert!(!cell.contains("0.2"));
        assert!(background.contains("1\t2\t0.2"));
        assert!(!background.contains("0.1"));
    }

    #[test]
    fn test_export_groups_records_across_images() {
        let store = store_with(vec![
            stat("imgB", 1, "roiX", 3.0, 0.3),
            stat("imgA", 2, "roiX", 2.0, 0.2),
            stat("imgA", 1, "roiX", 1.0, 0.1),
        ]);
        let dir = tempdir().unwrap();

        export_grouped_by_roi(&store, dir.path());

        // Store order within the group: imgA slice 1, imgA slice 2, imgB slice 1.
        let content = fs::read_to_string(dir.path().join("roiX_measurements.tsv")).unwrap();
        assert_eq!(content, "slice\tmean\tstdDev\n1\t1\t0.1\n2\t2\t0.2\n1\t3\t0.3\n");
    }

    #[test]
    fn test_one_failing_file_does_not_abort_the_rest() {
        let store = store_with(vec![
            stat("imgA", 1, "good", 1.0, 0.1),
            stat("imgA", 1, "bad", 2.0, 0.2),
        ]);
        let dir = tempdir().unwrap();
        // Occupy the "bad" group's target path with a directory so the file
        // cannot be created.
        fs::create_dir(dir.path().join("bad_measurements.tsv")).unwrap();

        let outcome = export_grouped_by_roi(&store, dir.path());

        assert_eq!(outcome.written.len(), 1);
        assert_eq!(outcome.failed.len(), 1);
        assert!(outcome.failed[0].path.ends_with("bad_measurements.tsv"));
        assert!(dir.path().join("good_measurements.tsv").exists());
    }

    #[test]
    fn test_export_empty_store_writes_nothing() {
        let store = MeasurementStore::new();
        let dir = tempdir().unwrap();

        let outcome = export_grouped_by_roi(&store, dir.path());

        assert!(outcome.written.is_empty());
        assert!(outcome.failed.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
