use crate::data::stack::ImageStack;
use crate::state::roi::RoiShape;
use crate::state::theme::Theme;
use crate::state::workspace::Workspace;

/// Per-frame state of the slice viewer: the cached slice texture and an
/// in-progress selection drag.
#[derive(Default)]
pub struct StackViewState {
    texture: Option<egui::TextureHandle>,
    /// (title, slice) the cached texture was built for.
    textured: Option<(String, u32)>,
    /// Drag origin in image coordinates.
    drag_anchor: Option<(f32, f32)>,
}

/// Render the current slice with its ROIs and handle slice navigation and
/// drag-to-select.
pub fn show_stack_view(
    ui: &mut egui::Ui,
    view: &mut StackViewState,
    workspace: &mut Workspace,
    theme: &Theme,
) {
    if workspace.stack.is_none() {
        ui.add_space(60.0);
        ui.vertical_centered(|ui| {
            ui.heading("No image open");
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "Use \"Open Stack...\" to load one or more image files as a stack.",
                )
                .weak(),
            );
        });
        return;
    }

    // --- Slice slider ---
    if let Some(stack) = workspace.stack.as_mut() {
        let count = stack.slice_count();
        if count > 1 {
            let mut slice = stack.current_slice();
            ui.horizontal(|ui| {
                ui.label("Slice");
                ui.add(egui::Slider::new(&mut slice, 1..=count));
                ui.label(format!("of {count}"));
            });
            stack.set_slice(slice);
            ui.add_space(4.0);
        }
    }

    let Some((title, slice, width, height)) = workspace
        .stack
        .as_ref()
        .map(|s| (s.title.clone(), s.current_slice(), s.width, s.height))
    else {
        return;
    };

    // --- Refresh the texture when the displayed slice changes ---
    let key = (title, slice);
    if view.textured.as_ref() != Some(&key) {
        if let Some(stack) = workspace.stack.as_ref() {
            view.texture = Some(ui.ctx().load_texture(
                "slice",
                slice_color_image(stack),
                egui::TextureOptions::NEAREST,
            ));
            view.textured = Some(key);
        }
    }
    let Some(texture) = view.texture.as_ref() else {
        return;
    };

    // --- Fit the image into the available space ---
    let avail = ui.available_size();
    let scale = (avail.x / width as f32)
        .min(avail.y / height as f32)
        .clamp(0.05, 16.0);
    let size = egui::vec2(width as f32 * scale, height as f32 * scale);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;

    painter.image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    // --- Drag to draw a selection ---
    let to_image = |pos: egui::Pos2| -> (f32, f32) {
        (
            ((pos.x - rect.left()) / scale).clamp(0.0, width as f32),
            ((pos.y - rect.top()) / scale).clamp(0.0, height as f32),
        )
    };

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            view.drag_anchor = Some(to_image(pos));
        }
    }
    if response.dragged() || response.drag_stopped() {
        if let (Some(anchor), Some(pos)) = (view.drag_anchor, response.interact_pointer_pos()) {
            workspace.active_selection = selection_from_corners(anchor, to_image(pos));
        }
    }
    if response.drag_stopped() {
        view.drag_anchor = None;
    }

    // --- Overlays: managed ROIs on this slice, then the live selection ---
    let shape_rect = |shape: &RoiShape| -> egui::Rect {
        egui::Rect::from_min_size(
            rect.left_top() + egui::vec2(shape.x as f32 * scale, shape.y as f32 * scale),
            egui::vec2(shape.width as f32 * scale, shape.height as f32 * scale),
        )
    };

    for roi in workspace.rois.rois() {
        if roi.position != slice {
            continue;
        }
        let roi_rect = shape_rect(&roi.shape);
        painter.rect_stroke(
            roi_rect,
            0.0,
            egui::Stroke::new(1.5, theme.roi_stroke()),
            egui::StrokeKind::Outside,
        );
        painter.text(
            roi_rect.left_top() + egui::vec2(2.0, -2.0),
            egui::Align2::LEFT_BOTTOM,
            &roi.name,
            egui::FontId::proportional(11.0),
            theme.roi_stroke(),
        );
    }

    if let Some(selection) = workspace.active_selection {
        painter.rect_stroke(
            shape_rect(&selection),
            0.0,
            egui::Stroke::new(1.5, theme.selection_stroke()),
            egui::StrokeKind::Outside,
        );
    }
}

/// Build the display image for the current slice, scaled from the source
/// value range down to 8-bit.
fn slice_color_image(stack: &ImageStack) -> egui::ColorImage {
    let scale = if stack.sample_max > 0.0 {
        255.0 / stack.sample_max
    } else {
        1.0
    };
    let pixels = stack
        .current_samples()
        .iter()
        .map(|&v| egui::Color32::from_gray((v * scale).clamp(0.0, 255.0) as u8))
        .collect();
    egui::ColorImage {
        size: [stack.width as usize, stack.height as usize],
        pixels,
    }
}

/// Pixel rectangle spanned by two image-space corners, or `None` when it
/// would not cover a full pixel.
fn selection_from_corners(a: (f32, f32), b: (f32, f32)) -> Option<RoiShape> {
    let x0 = a.0.min(b.0).floor();
    let y0 = a.1.min(b.1).floor();
    let x1 = a.0.max(b.0).ceil();
    let y1 = a.1.max(b.1).ceil();
    let shape = RoiShape::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32);
    shape.is_valid().then_some(shape)
}
