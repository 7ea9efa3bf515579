use egui_extras::{Column, TableBuilder};

use crate::state::measurement::MeasurementStore;

/// Tabular report of every stored measurement, in id order.
pub fn show_results_table(ui: &mut egui::Ui, store: &MeasurementStore) {
    if store.is_empty() {
        ui.label(egui::RichText::new("No measurements yet.").weak());
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder().at_least(70.0))
        .header(20.0, |mut header| {
            for title in ["Image", "ROI", "Slice", "Mean", "StdDev", "Min", "Max"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (_, stat) in store.snapshot_ordered() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&stat.image_name);
                    });
                    row.col(|ui| {
                        ui.label(&stat.roi_name);
                    });
                    row.col(|ui| {
                        ui.label(stat.slice.to_string());
                    });
                    for value in [stat.mean, stat.std_dev, stat.min, stat.max] {
                        row.col(|ui| {
                            ui.label(format!("{value:.3}"));
                        });
                    }
                });
            }
        });
}
