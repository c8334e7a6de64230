use egui::Slider;

use crate::ZineApp;
use crate::app::variants_for;
use crate::canvas::BlendMode;
use crate::components::ToolButton;
use crate::constants::{FONT_FAMILIES, PALETTE, TOOL_PALETTE, parse_hex_color};
use crate::tool::collage::{CollageEffect, CollageKind};
use crate::tool::drawing::BrushKind;
use crate::tool::layout::PageLayout;
use crate::tool::text::{CUTOUT_MAX_ROTATION, TextVariant};
use crate::tool::{ToolCategory, ToolId};

pub fn tools_panel(app: &mut ZineApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");
                palette(app, ui);
                ui.separator();

                let tool = app.active_tool();
                ui.heading("Tool Options");
                ui.label(format!("{} ({})", tool, tool.category()));
                match tool.category() {
                    ToolCategory::Text => text_form(app, ui),
                    ToolCategory::Drawing => drawing_form(app, ui),
                    ToolCategory::Decorative => decorative_form(app, ui),
                    ToolCategory::Collage => collage_form(app, ui),
                    ToolCategory::Layout => layout_form(app, ui),
                    ToolCategory::Select => {
                        ui.label("Pick a tool to start making your zine.");
                    }
                }

                ui.separator();
                if ui.button("Clear page").clicked() {
                    app.clear_page();
                }
                ui.label(format!("Objects on page: {}", app.canvas().len()));
                if app.pending_loads() > 0 {
                    ui.label(format!("Loading {} image(s)...", app.pending_loads()));
                }

                let failures = app.failures();
                if !failures.is_empty() {
                    ui.collapsing(format!("Problems ({})", failures.len()), |ui| {
                        for failure in failures.iter().rev() {
                            ui.small(failure);
                        }
                    });
                }
            });
        });
}

fn palette(app: &mut ZineApp, ui: &mut egui::Ui) {
    let active = app.active_tool();
    for group in TOOL_PALETTE {
        ui.label(group.name);
        ui.horizontal_wrapped(|ui| {
            for entry in group.entries {
                if ToolButton::new(*entry, entry.tool == active).show(ui).clicked() {
                    app.set_active_tool(entry.tool);
                }
            }
        });
    }
}

fn swatches(ui: &mut egui::Ui, color: &mut egui::Color32) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Color:");
        changed |= egui::color_picker::color_edit_button_srgba(ui, color, egui::color_picker::Alpha::Opaque).changed();
        for swatch in PALETTE.iter().filter_map(|hex| parse_hex_color(hex)) {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::click());
            ui.painter().rect_filled(rect, 2.0, swatch);
            if response.clicked() {
                *color = swatch;
                changed = true;
            }
        }
    });
    changed
}

fn text_form(app: &mut ZineApp, ui: &mut egui::Ui) {
    let request = &mut app.forms.text;
    ui.text_edit_multiline(&mut request.text);

    let tool = &mut request.tool;
    egui::ComboBox::from_label("Font")
        .selected_text(tool.font_family.clone())
        .show_ui(ui, |ui| {
            for family in FONT_FAMILIES {
                ui.selectable_value(&mut tool.font_family, family.to_owned(), family);
            }
        });
    ui.horizontal(|ui| {
        ui.label("Size:");
        ui.add(Slider::new(&mut tool.font_size, 8.0..=72.0));
    });
    ui.horizontal(|ui| {
        ui.label("Spacing:");
        ui.add(Slider::new(&mut tool.spacing, 0.5..=2.0));
    });
    swatches(ui, &mut tool.color);

    match request.variant {
        TextVariant::Typewriter => {
            ui.checkbox(&mut tool.effects.uneven, "Uneven letters");
            ui.add(Slider::new(&mut tool.effects.ink_spread, 0.0..=1.0).text("Ink spread"));
        }
        TextVariant::Cutout => {
            ui.add(Slider::new(&mut tool.effects.rotation, 0.0..=CUTOUT_MAX_ROTATION).text("Max rotation"));
            ui.add(Slider::new(&mut tool.effects.roughness, 0.0..=1.0).text("Roughness"));
        }
        TextVariant::Handwriting | TextVariant::Plain => {}
    }

    if ui.button("Add text").clicked() {
        app.add_text();
    }
}

fn drawing_form(app: &mut ZineApp, ui: &mut egui::Ui) {
    let mut changed = false;
    let tool = &mut app.forms.drawing;

    ui.horizontal_wrapped(|ui| {
        for brush in BrushKind::ALL {
            changed |= ui.selectable_value(&mut tool.brush, brush, brush.name()).changed();
        }
    });
    ui.horizontal(|ui| {
        ui.label("Size:");
        changed |= ui.add(Slider::new(&mut tool.size, 1.0..=50.0)).changed();
    });
    ui.horizontal(|ui| {
        ui.label("Opacity:");
        changed |= ui.add(Slider::new(&mut tool.opacity, 0.0..=1.0)).changed();
    });
    changed |= swatches(ui, &mut tool.color);
    changed |= ui.checkbox(&mut tool.pressure, "Pressure").changed();
    changed |= ui.checkbox(&mut tool.tilt, "Tilt").changed();
    if tool.brush == BrushKind::Ballpoint {
        egui::ComboBox::from_label("Blend")
            .selected_text(format!("{:?}", tool.blend_mode))
            .show_ui(ui, |ui| {
                for mode in [BlendMode::Normal, BlendMode::Multiply, BlendMode::Overlay] {
                    changed |= ui.selectable_value(&mut tool.blend_mode, mode, format!("{mode:?}")).changed();
                }
            });
    }
    if changed {
        app.sync_brush();
    }

    ui.horizontal(|ui| {
        if ui.button("Clear drawing").clicked() {
            app.clear_drawing();
        }
        if ui
            .add_enabled(app.last_drawing.is_some(), egui::Button::new("Place on page"))
            .clicked()
        {
            app.place_drawing();
        }
    });
}

fn decorative_form(app: &mut ZineApp, ui: &mut egui::Ui) {
    let element = &mut app.forms.decorative;

    egui::ComboBox::from_label(element.kind.name())
        .selected_text(element.variant.clone())
        .show_ui(ui, |ui| {
            for variant in variants_for(element.kind) {
                ui.selectable_value(&mut element.variant, (*variant).to_owned(), *variant);
            }
        });
    ui.add(Slider::new(&mut element.rotation, -180.0..=180.0).text("Rotation"));
    ui.add(Slider::new(&mut element.scale, 0.1..=3.0).text("Scale"));
    ui.add(Slider::new(&mut element.opacity, 0.0..=1.0).text("Opacity"));

    if element.kind == crate::tool::DecorativeKind::Stamp {
        let mut ink = element.ink_color.unwrap_or(egui::Color32::BLACK);
        if swatches(ui, &mut ink) {
            element.ink_color = Some(ink);
        }
    }

    if ui.button("Add to page").clicked() {
        app.add_decorative();
    }
}

fn collage_form(app: &mut ZineApp, ui: &mut egui::Ui) {
    let forms = &mut app.forms;
    let kind_name = match forms.collage.kind {
        CollageKind::PaperScrap => "Paper scrap",
        CollageKind::PhotoFrame => "Photo frame",
        CollageKind::CutPaste => "Cut & paste",
    };
    ui.label(kind_name);

    ui.horizontal(|ui| {
        ui.label("Image file:");
        ui.text_edit_singleline(&mut forms.upload_path);
    });
    egui::ComboBox::from_label("Effect")
        .selected_text(forms.collage_effect.map_or("none", CollageEffect::name))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut forms.collage_effect, None, "none");
            for effect in CollageEffect::ALL {
                ui.selectable_value(&mut forms.collage_effect, Some(effect), effect.name());
            }
        });

    let transform = &mut forms.collage.transform;
    ui.add(Slider::new(&mut transform.rotation, -180.0..=180.0).text("Rotation"));
    ui.add(Slider::new(&mut transform.scale.x, 0.1..=3.0).text("Scale X"));
    ui.add(Slider::new(&mut transform.scale.y, 0.1..=3.0).text("Scale Y"));

    if ui
        .add_enabled(!forms.upload_path.is_empty(), egui::Button::new("Upload"))
        .clicked()
    {
        app.upload_collage();
    }
}

fn layout_form(app: &mut ZineApp, ui: &mut egui::Ui) {
    let layout = &mut app.forms.layout;
    ui.label(format!("Template: {}", layout.template));

    if layout.template == "custom" {
        ui.horizontal(|ui| {
            ui.label("Inches:");
            ui.add(egui::DragValue::new(&mut layout.dimensions.x).range(1.0..=24.0).speed(0.25));
            ui.label("x");
            ui.add(egui::DragValue::new(&mut layout.dimensions.y).range(1.0..=24.0).speed(0.25));
        });
    } else {
        ui.label(format!("{} x {} in, {} panel(s)", layout.dimensions.x, layout.dimensions.y, layout.panels));
    }
    ui.checkbox(&mut layout.fold_lines, "Fold lines");
    ui.checkbox(&mut layout.bleed, "Bleed guide");

    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            if let Some(page) = PageLayout::from_tool(app.active_tool()) {
                app.forms.layout = page.template();
            }
        }
        if ui.button("Apply layout").clicked() {
            app.apply_layout();
        }
    });
    if app.active_tool() == ToolId::EightPage {
        ui.small("Guides are left out of exports.");
    }
}
