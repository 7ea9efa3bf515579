use crate::state::measurement::MeasurementStore;
use crate::state::workspace::Workspace;

/// Actions the control panel can request from the app.
pub enum ControlAction {
    None,
    Measure,
    MeasureAndAdvance,
    UpdateRois,
    Save,
    Clear,
    CommitSelection,
    RemoveRoi(usize),
}

/// Helper to create a toolbar button with consistent min size.
fn toolbar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(92.0, 26.0)))
}

/// The measurement toolbar and the managed-ROI list. Returns the action
/// the user clicked, if any.
pub fn show_control_panel(
    ui: &mut egui::Ui,
    workspace: &Workspace,
    store: &MeasurementStore,
) -> ControlAction {
    let mut action = ControlAction::None;

    ui.add_space(4.0);
    ui.strong("Measure");
    ui.add_space(2.0);

    if toolbar_btn(ui, "Measure")
        .on_hover_text("Measure every ROI on the current slice")
        .clicked()
    {
        action = ControlAction::Measure;
    }
    if toolbar_btn(ui, "Measure+")
        .on_hover_text("Measure, go to the next slice and move all ROIs there")
        .clicked()
    {
        action = ControlAction::MeasureAndAdvance;
    }
    if toolbar_btn(ui, "Update ROIs")
        .on_hover_text("Move every ROI to the current slice without measuring")
        .clicked()
    {
        action = ControlAction::UpdateRois;
    }

    ui.add_space(8.0);
    ui.strong("Results");
    ui.add_space(2.0);

    let has_results = !store.is_empty();
    if ui
        .add_enabled(
            has_results,
            egui::Button::new("Save...").min_size(egui::vec2(92.0, 26.0)),
        )
        .on_hover_text("Export one TSV file per ROI into a chosen folder")
        .clicked()
    {
        action = ControlAction::Save;
    }
    if ui
        .add_enabled(
            has_results,
            egui::Button::new("Clear").min_size(egui::vec2(92.0, 26.0)),
        )
        .on_hover_text("Erase all measurements")
        .clicked()
    {
        action = ControlAction::Clear;
    }

    ui.add_space(8.0);
    ui.separator();
    ui.strong(format!("ROIs ({})", workspace.rois.len()));
    ui.add_space(2.0);

    if workspace.active_selection.is_some()
        && toolbar_btn(ui, "Add ROI")
            .on_hover_text("Keep the drawn selection as a managed ROI")
            .clicked()
    {
        action = ControlAction::CommitSelection;
    }

    if workspace.rois.is_empty() {
        ui.label(egui::RichText::new("Drag on the image to draw a ROI.").weak());
    }

    let mut remove: Option<usize> = None;
    for (index, roi) in workspace.rois.rois().iter().enumerate() {
        ui.horizontal(|ui| {
            if ui.small_button("x").on_hover_text("Remove this ROI").clicked() {
                remove = Some(index);
            }
            ui.label(format!("{} — slice {}", roi.name, roi.position));
        });
    }
    if let Some(index) = remove {
        action = ControlAction::RemoveRoi(index);
    }

    action
}
