use egui::{Align, Align2, Color32, FontId, RichText, Sense, Stroke};

use super::ImageUploader;
use crate::utils::file_size::FileSizeUtils;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);
const OK_GREEN: Color32 = Color32::from_rgb(0, 180, 0);
const DIM_GRAY: Color32 = Color32::from_rgb(150, 150, 150);

impl ImageUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let hovering_files = ctx.input(|input| !input.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Image Uploader");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Select or drop images, then hand them off for upload")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_drop_zone(ui, hovering_files);
                ui.add_space(15.0);
                self.render_actions(ui);
                ui.add_space(10.0);
                self.render_file_list(ui);
                ui.add_space(20.0);
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui, hovering_files: bool) {
        let desired = egui::vec2(ui.available_width(), 140.0);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        let stroke = if hovering_files {
            Stroke::new(2.0, ACCENT)
        } else {
            Stroke::new(1.0, ui.visuals().widgets.inactive.bg_stroke.color)
        };
        let fill = if hovering_files {
            ui.visuals().extreme_bg_color
        } else {
            ui.visuals().faint_bg_color
        };

        ui.painter().rect(rect, 8.0, fill, stroke);
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "📁 Drag & drop image(s) here or click to browse",
            FontId::proportional(16.0),
            ui.visuals().text_color(),
        );

        if response.clicked() {
            self.open_picker();
        }
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            if self.manager.ready_to_upload() {
                let button = egui::Button::new("📤 Upload Files").min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.confirm_upload();
                }
            } else if let Some(message) = self.manager.blocking_message() {
                ui.colored_label(ERROR_RED, message);
            }

            if let Some(banner) = &self.banner {
                ui.add_space(5.0);
                ui.colored_label(OK_GREEN, format!("✅ {}", banner));
            }
        });
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        if self.manager.valid_deduplicated().is_empty() {
            return;
        }

        ui.label(
            RichText::new(format!(
                "{} selected, {} unique",
                self.manager.entries().len(),
                self.manager.valid_deduplicated().len()
            ))
            .color(DIM_GRAY),
        );

        let mut remove_request: Option<String> = None;

        for entry in self.manager.valid_deduplicated() {
            ui.add_space(4.0);
            egui::Frame::none()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        match self.previews.texture_for(ui.ctx(), entry) {
                            Some(texture) => {
                                ui.image((texture.id(), egui::vec2(40.0, 40.0)));
                            }
                            None => {
                                ui.label(RichText::new("🖼").size(28.0));
                            }
                        }

                        let name_color = if entry.is_valid() {
                            ui.visuals().text_color()
                        } else {
                            ERROR_RED
                        };
                        ui.label(RichText::new(&entry.name).color(name_color));
                        ui.label(
                            RichText::new(format!("({})", FileSizeUtils::format_size(entry.size)))
                                .color(DIM_GRAY),
                        );
                        if let Some(error) = &entry.error {
                            ui.colored_label(ERROR_RED, format!("({})", error));
                        }

                        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("❌").clicked() {
                                remove_request = Some(entry.name.clone());
                            }
                        });
                    });
                });
        }

        if let Some(name) = remove_request {
            self.remove_file(&name);
        }
    }
}
