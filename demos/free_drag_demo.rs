#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui_free_drag::{Document, Element, FreeDragging, FreeDraggingOptions};

struct App {
    document: Document,
    board: Element,
    cards: Vec<(Element, egui::Color32)>,
    drags: Vec<FreeDragging>,
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h))
}

impl Default for App {
    fn default() -> Self {
        let mut document = Document::new(rect(0.0, 0.0, 960.0, 640.0));
        // Offsets are measured from the board's corner, so cards start laid out there.
        let board = Element::new("board", rect(0.0, 0.0, 600.0, 400.0));
        document.body().append_child(&board);
        document.register_selector("#board", &board);

        // Only moves by its title bar.
        let titled = Element::new("drag my title", rect(0.0, 0.0, 220.0, 90.0));
        let title = Element::new("title", rect(0.0, 0.0, 220.0, 24.0));
        titled.append_child(&title);
        title.mark_as_drag_handle();
        board.append_child(&titled);

        // Moves anywhere by its body. Painted on top of the other card.
        let plain = Element::new("drag me", rect(0.0, 0.0, 100.0, 140.0));
        board.append_child(&plain);

        let options = FreeDraggingOptions {
            debug_event_log: true,
            ..FreeDraggingOptions::with_boundary("#board")
        };
        let drags = [&titled, &plain]
            .into_iter()
            .filter_map(|card| {
                FreeDragging::init(&document, card.clone(), options.clone())
                    .map_err(|err| log::error!("{err}"))
                    .ok()
            })
            .collect();

        Self {
            document,
            board,
            cards: vec![
                (titled, egui::Color32::from_rgb(150, 90, 60)),
                (plain, egui::Color32::from_rgb(70, 110, 160)),
            ],
            drags,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui_free_drag::dispatch_egui_input(ctx, &self.document);

        egui::TopBottomPanel::bottom("free_drag_demo_log").show(ctx, |ui| {
            for drag in &self.drags {
                ui.label(format!(
                    "{}: offset {:?} {}",
                    drag.element().name(),
                    drag.offset(),
                    if drag.is_dragging() { "(dragging)" } else { "" }
                ));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let painter = ui.painter();
            painter.rect_stroke(
                self.board.visual_rect(),
                0.0,
                ui.visuals().widgets.noninteractive.bg_stroke,
                egui::StrokeKind::Inside,
            );

            for (card, fill) in &self.cards {
                egui_free_drag::paint_element(painter, card, *fill, "free-dragging");
                if let Some(title) = card.handle_child() {
                    painter.rect_filled(title.visual_rect(), 6.0, fill.gamma_multiply(0.6));
                }
                painter.text(
                    card.visual_rect().center(),
                    egui::Align2::CENTER_CENTER,
                    card.name(),
                    egui::FontId::proportional(14.0),
                    egui::Color32::WHITE,
                );
            }
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for drag in &mut self.drags {
            log::debug!("{}", drag.debug_log_text());
            drag.destroy();
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("egui_free_drag demo"),
        ..Default::default()
    };

    eframe::run_native(
        "egui_free_drag demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
