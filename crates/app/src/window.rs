use std::time::Duration;

use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2,
};
use patterns_demo_core::{
    Color, DemoShell, Item, ItemShape, Point, ProductKind, FACTORY_HEADING, OBSERVER_HEADING,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const OVAL_SEGMENTS: usize = 48;

pub fn run(shell: DemoShell) -> eframe::Result<()> {
    let title = shell.title().to_string();
    let canvas = shell.canvas();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([canvas.width() + 40.0, canvas.height() + 200.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new(shell)))),
    )
}

struct DemoApp {
    shell: DemoShell,
    last_time: Option<f64>,
    /// Sub-millisecond remainder carried to the next frame.
    carry_ms: f64,
}

impl DemoApp {
    fn new(shell: DemoShell) -> Self {
        Self {
            shell,
            last_time: None,
            carry_ms: 0.0,
        }
    }

    fn tick(&mut self, now: f64) {
        let Some(last) = self.last_time.replace(now) else {
            return;
        };
        let elapsed = (now - last).max(0.0) * 1000.0 + self.carry_ms;
        let whole = elapsed.floor();
        self.carry_ms = elapsed - whole;
        self.shell.advance(whole as u64);
    }

    fn create(&mut self, kind: ProductKind) {
        if let Err(err) = self.shell.create_product(kind) {
            tracing::error!(%err, product = %kind, "product creation failed");
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx.input(|i| i.time));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(FACTORY_HEADING);
                for kind in ProductKind::ALL {
                    if ui.button(format!("Create Product {kind}")).clicked() {
                        self.create(kind);
                    }
                }

                let canvas = self.shell.canvas();
                let (response, painter) =
                    ui.allocate_painter(Vec2::new(canvas.width(), canvas.height()), Sense::hover());
                let origin = response.rect.min;
                painter.rect_filled(response.rect, 0.0, color32(canvas.background()));
                let painter = painter.with_clip_rect(response.rect);
                for item in canvas.items() {
                    paint_item(&painter, origin, item);
                }

                ui.label(OBSERVER_HEADING);
                ui.label(self.shell.status());
            });
        });

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

fn paint_item(painter: &Painter, origin: Pos2, item: &Item) {
    let at = |point: &Point| origin + Vec2::new(point.x, point.y);
    let fill = item.style.fill.map(color32).unwrap_or(Color32::TRANSPARENT);
    let stroke = item
        .style
        .outline
        .map(|color| Stroke::new(item.style.width, color32(color)))
        .unwrap_or(Stroke::NONE);

    match &item.shape {
        ItemShape::Rectangle { from, to } => {
            let rect = Rect::from_two_pos(at(from), at(to));
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, stroke);
        }
        ItemShape::Oval { from, to } => {
            let rect = Rect::from_two_pos(at(from), at(to));
            painter.add(Shape::convex_polygon(oval_points(rect), fill, stroke));
        }
        ItemShape::Polygon { points } => {
            let points = points.iter().map(|point| at(point)).collect();
            painter.add(Shape::convex_polygon(points, fill, stroke));
        }
        ItemShape::Line { from, to } => {
            painter.line_segment([at(from), at(to)], stroke);
        }
        ItemShape::Text { at: pos, text, font } => {
            painter.text(
                at(pos),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(font.size),
                fill,
            );
        }
    }
}

fn oval_points(rect: Rect) -> Vec<Pos2> {
    let center = rect.center();
    let radius = rect.size() / 2.0;
    (0..OVAL_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / OVAL_SEGMENTS as f32 * std::f32::consts::TAU;
            center + Vec2::new(radius.x * theta.cos(), radius.y * theta.sin())
        })
        .collect()
}

fn color32(color: Color) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b)
}
