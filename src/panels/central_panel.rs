use crate::ZineApp;
use crate::tool::ToolCategory;
use crate::tool::drawing::PointerSample;

pub fn central_panel(app: &mut ZineApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            if app.active_tool().category() == ToolCategory::Drawing {
                drawing_pad(app, ctx, ui);
            } else {
                page(app, ctx, ui);
            }
        });
    });
}

fn page(app: &mut ZineApp, ctx: &egui::Context, ui: &mut egui::Ui) {
    use crate::canvas::Canvas as _;

    let (response, painter) = ui.allocate_painter(app.canvas.size(), egui::Sense::hover());
    app.renderer.render(ctx, &painter, response.rect.min, &app.canvas);
}

/// Drawing surface; pointer input drives the stroke state machine
fn drawing_pad(app: &mut ZineApp, ctx: &egui::Context, ui: &mut egui::Ui) {
    let size = app.stroke.surface().size();
    let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
    let origin = response.rect.min;

    let sample = response.interact_pointer_pos().map(|pos| {
        let mut sample = PointerSample::at(pos - origin.to_vec2());
        if let Some(force) = touch_force(ctx) {
            sample = sample.with_pressure(force);
        }
        sample
    });

    if response.drag_started() {
        if let Some(sample) = sample {
            app.pointer_down(sample);
        }
    } else if response.dragged() {
        if let Some(sample) = sample {
            app.pointer_move(sample);
        }
    }
    if response.drag_stopped() {
        app.pointer_up();
    } else if app.stroke.is_drawing() && !response.contains_pointer() {
        app.pointer_leave();
    }

    let dirty = std::mem::take(&mut app.surface_dirty);
    painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);
    app.renderer.render_surface(ctx, &painter, origin, app.stroke.surface(), dirty);
    painter.rect_stroke(response.rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(160)));
}

/// Pen pressure, when the platform reports one through touch events
fn touch_force(ctx: &egui::Context) -> Option<f32> {
    ctx.input(|input| {
        input.events.iter().rev().find_map(|event| match event {
            egui::Event::Touch { force, .. } => *force,
            _ => None,
        })
    })
}
