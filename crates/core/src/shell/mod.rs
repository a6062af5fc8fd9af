use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::animation::{GearTask, SlideTask};
use crate::canvas::{Canvas, CanvasSnapshot, Font, ItemId, ItemStyle, Point};
use crate::catalog::{Color, Product, ProductKind, ShapeFactory, ShapeKind};
use crate::notify::{LabelObserver, NotificationChannel, Observer, StatusLabel};
use crate::scheduler::{Scheduler, Task};
use crate::{AppConfig, Result};

pub const FACTORY_HEADING: &str = "Factory Pattern";
pub const OBSERVER_HEADING: &str = "Observer Pattern";

const PRODUCT_FROM: Point = Point::new(150.0, 100.0);
const PRODUCT_TO: Point = Point::new(200.0, 150.0);
const PRODUCT_LABEL_AT: Point = Point::new(175.0, 125.0);

/// Everything the window shows, minus the widgets themselves.
///
/// The shell owns the canvas, the animation loop and the notification
/// channel; the GUI layer forwards button presses and elapsed time and reads
/// back [`DemoShell::canvas`] and [`DemoShell::status`] to paint a frame.
pub struct DemoShell {
    config: AppConfig,
    factory: ShapeFactory,
    canvas: Canvas,
    scheduler: Scheduler,
    channel: NotificationChannel,
    status: StatusLabel,
    observer: Rc<dyn Observer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShellSnapshot {
    pub title: String,
    pub status: String,
    pub now_ms: u64,
    pub canvas: CanvasSnapshot,
}

impl DemoShell {
    pub fn new(config: AppConfig) -> Self {
        let window = &config.window;
        let canvas = Canvas::new(window.canvas_width, window.canvas_height, window.background);
        let status = StatusLabel::new();
        let observer: Rc<dyn Observer> = Rc::new(LabelObserver::new(status.clone()));
        let mut channel = NotificationChannel::new();
        channel.attach(observer.clone());

        let mut shell = Self {
            config,
            factory: ShapeFactory::new(),
            canvas,
            scheduler: Scheduler::new(),
            channel,
            status,
            observer,
        };
        shell.draw_static_scene();
        shell.start_gears();
        tracing::info!(title = %shell.config.window.title, "demo shell ready");
        shell
    }

    pub fn title(&self) -> &str {
        &self.config.window.title
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn status(&self) -> String {
        self.status.text()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// The observer wired to the status label at startup.
    pub fn label_observer(&self) -> Rc<dyn Observer> {
        self.observer.clone()
    }

    pub fn channel_mut(&mut self) -> &mut NotificationChannel {
        &mut self.channel
    }

    /// Button handler: builds the product, draws it, sets it sliding and
    /// announces it.
    pub fn create_product(&mut self, kind: ProductKind) -> Result<ItemId> {
        let product = self.factory.create_kind(kind);
        let shape = self.display_product(&product);
        self.channel.notify(&format!("Product {kind} created"))?;
        Ok(shape)
    }

    /// Textual variant of [`create_product`](Self::create_product). Unknown
    /// identifiers draw nothing, notify nobody and return `Ok(false)`.
    pub fn create_by_id(&mut self, id: &str) -> Result<bool> {
        match id.parse::<ProductKind>() {
            Ok(kind) => self.create_product(kind).map(|_| true),
            Err(_) => {
                tracing::warn!(id, "ignoring unknown product identifier");
                Ok(false)
            }
        }
    }

    /// Advances the animation clock, returning how many ticks ran.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.scheduler.advance(elapsed_ms, &mut self.canvas)
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            title: self.config.window.title.clone(),
            status: self.status(),
            now_ms: self.now_ms(),
            canvas: self.canvas.snapshot(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    fn display_product(&mut self, product: &Product) -> ItemId {
        let (label, color, shape) = product.operation();
        let style = ItemStyle::filled(color);
        let shape_id = match shape {
            ShapeKind::Rectangle => self.canvas.create_rectangle(PRODUCT_FROM, PRODUCT_TO, style),
            ShapeKind::Oval => self.canvas.create_oval(PRODUCT_FROM, PRODUCT_TO, style),
            ShapeKind::Triangle => {
                let points = vec![
                    Point::new(PRODUCT_FROM.x, PRODUCT_TO.y),
                    Point::new(PRODUCT_LABEL_AT.x, PRODUCT_FROM.y),
                    Point::new(PRODUCT_TO.x, PRODUCT_TO.y),
                ];
                self.canvas.create_polygon(points, ItemStyle { outline: None, ..style })
            }
        };
        let label_id = self.canvas.create_text(
            PRODUCT_LABEL_AT,
            label,
            Font::new("Arial", 24.0),
            ItemStyle::filled(Color::Black),
        );
        tracing::info!(product = label, color = color.name(), shape = shape.name(), "product created");

        let animation = &self.config.animation;
        let slide = SlideTask::new(
            shape_id,
            label_id,
            animation.slide_step,
            animation.slide_boundary,
            animation.slide_delay_ms,
        );
        self.scheduler.start(Task::Slide(slide), &mut self.canvas);
        shape_id
    }

    fn draw_static_scene(&mut self) {
        self.canvas.create_rectangle(
            Point::new(50.0, 50.0),
            Point::new(150.0, 250.0),
            ItemStyle::outlined(Color::Black, 2.0),
        );
        self.canvas.create_text(
            Point::new(100.0, 150.0),
            "Factory",
            Font::new("Arial", 16.0),
            ItemStyle::filled(Color::Black),
        );
        let width = self.canvas.width();
        self.canvas.create_line(
            Point::new(150.0, 160.0),
            Point::new(width, 160.0),
            ItemStyle::outlined(Color::Black, 2.0),
        );
    }

    fn start_gears(&mut self) {
        let animation = self.config.animation.clone();
        for index in 0..animation.gear_count {
            let origin = Point::new(
                animation.gear_origin.x + animation.gear_spacing * index as f32,
                animation.gear_origin.y,
            );
            let gear = GearTask::new(
                index,
                origin,
                animation.gear_diameter,
                animation.gear_square_size,
                animation.gear_angle_step,
                animation.gear_delay_ms,
            );
            self.scheduler.start(Task::Gear(gear), &mut self.canvas);
        }
        tracing::debug!(gears = animation.gear_count, "gears spinning");
    }
}

impl fmt::Debug for DemoShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoShell")
            .field("canvas", &self.canvas)
            .field("scheduler", &self.scheduler)
            .field("channel", &self.channel)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for DemoShell {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
