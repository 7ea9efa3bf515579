use eframe::egui;

use crate::data::export::export_grouped_by_roi;
use crate::data::loader;
use crate::measure;
use crate::state::app_state::{AppState, VERSION};
use crate::ui::control_panel::{self, ControlAction};
use crate::ui::results_table;
use crate::ui::stack_view::{self, StackViewState};

/// The main FastROI application.
pub struct FastRoiApp {
    pub state: AppState,
    stack_view: StackViewState,
    /// An error message to display in the footer until dismissed.
    pub error_message: Option<String>,
    /// Outcome of the last action, shown in the footer.
    pub status: Option<String>,
}

impl FastRoiApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();

        // --- Global UI style improvements ---
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.window_margin = egui::Margin::same(12);
        ctx.set_style(style);
        ctx.set_visuals(state.theme.visuals());

        Self {
            state,
            stack_view: StackViewState::default(),
            error_message: None,
            status: None,
        }
    }

    /// Open a native file dialog and load the picked files as a stack.
    fn open_stack_dialog(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", loader::STACK_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_files()
        {
            match loader::load_stack(&paths) {
                Ok(stack) => {
                    self.status = Some(format!(
                        "Opened {} ({} slice(s))",
                        stack.title,
                        stack.slice_count()
                    ));
                    self.state.workspace.open_stack(stack);
                }
                Err(e) => {
                    tracing::error!("failed to load stack: {e}");
                    self.error_message = Some(format!("Failed to load stack: {e}"));
                }
            }
        }
    }

    /// Prompt for a folder and export the store as one TSV per ROI.
    fn save_measurements(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = &self.state.export_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(dir) = dialog.pick_folder() else {
            return; // cancelled
        };
        self.state.export_dir = Some(dir.clone());

        let outcome = export_grouped_by_roi(&self.state.store, &dir);
        if outcome.failed.is_empty() {
            self.status = Some(format!(
                "Wrote {} file(s) to {}",
                outcome.written.len(),
                dir.display()
            ));
        } else {
            let failures: Vec<String> =
                outcome.failed.iter().map(|f| f.to_string()).collect();
            self.error_message = Some(failures.join("; "));
            if !outcome.written.is_empty() {
                self.status = Some(format!("Wrote {} file(s)", outcome.written.len()));
            }
        }
    }

    fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::None => {}
            ControlAction::Measure => {
                match measure::measure(&self.state.workspace, &mut self.state.store) {
                    Ok(recorded) => {
                        self.status = Some(format!("Measured {recorded} ROI(s)"));
                    }
                    Err(e) => self.error_message = Some(e.to_string()),
                }
            }
            ControlAction::MeasureAndAdvance => {
                match measure::measure_and_advance(&mut self.state.workspace, &mut self.state.store)
                {
                    Ok(recorded) => {
                        self.status = Some(format!("Measured {recorded} ROI(s), advanced slice"));
                    }
                    Err(e) => self.error_message = Some(e.to_string()),
                }
            }
            ControlAction::UpdateRois => {
                measure::retag_rois(&mut self.state.workspace);
                self.status = Some("Moved all ROIs to the current slice".to_string());
            }
            ControlAction::Save => self.save_measurements(),
            ControlAction::Clear => {
                self.state.store.clear();
                self.status = Some("Cleared all measurements".to_string());
            }
            ControlAction::CommitSelection => {
                if let Some(name) = self.state.workspace.commit_selection() {
                    self.status = Some(format!("Added {name}"));
                }
            }
            ControlAction::RemoveRoi(index) => {
                self.state.workspace.rois.remove(index);
            }
        }
    }
}

impl eframe::App for FastRoiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // --- Header panel ---
        let mut open_stack = false;
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("FastROI");
                    ui.separator();

                    if ui.button("Open Stack...").clicked() {
                        open_stack = true;
                    }
                    if let Some(stack) = &self.state.workspace.stack {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} — {}x{}, {} slice(s)",
                                stack.title,
                                stack.width,
                                stack.height,
                                stack.slice_count()
                            ))
                            .weak(),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = match self.state.theme {
                            crate::state::theme::Theme::Dark => "Light Mode",
                            crate::state::theme::Theme::Light => "Dark Mode",
                        };
                        if ui.button(theme_label).clicked() {
                            self.state.theme = self.state.theme.toggle();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        if open_stack {
            self.open_stack_dialog();
        }

        // --- Footer panel ---
        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let count = self.state.store.len();
                    let label = if count == 1 {
                        "1 measurement".to_string()
                    } else {
                        format!("{count} measurements")
                    };
                    ui.label(egui::RichText::new(label).weak());

                    if let Some(status) = &self.status {
                        ui.separator();
                        ui.label(status.clone());
                    }

                    if let Some(msg) = &self.error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::from_rgb(255, 80, 80), msg);
                        if ui.small_button("dismiss").clicked() {
                            self.error_message = None;
                        }
                    }
                });
            });

        // --- Control panel ---
        let mut action = ControlAction::None;
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(150.0)
            .show(ctx, |ui| {
                action = control_panel::show_control_panel(
                    ui,
                    &self.state.workspace,
                    &self.state.store,
                );
            });

        // --- Results panel ---
        egui::TopBottomPanel::bottom("results")
            .resizable(true)
            .default_height(200.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.strong("Measurements");
                ui.add_space(2.0);
                egui::ScrollArea::horizontal().show(ui, |ui| {
                    results_table::show_results_table(ui, &self.state.store);
                });
            });

        // --- Central panel: the stack view ---
        egui::CentralPanel::default().show(ctx, |ui| {
            stack_view::show_stack_view(
                ui,
                &mut self.stack_view,
                &mut self.state.workspace,
                &self.state.theme,
            );
        });

        self.handle_action(action);
    }
}
