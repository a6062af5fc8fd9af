//! Core library for the Design Patterns Demo application.
//!
//! The crate holds everything the demo window shows except the widgets
//! themselves: a product factory, an observer channel feeding the status
//! label, a retained canvas, and a cooperative scheduler animating sliding
//! products and spinning gears. The app crate only forwards input and elapsed
//! time to [`DemoShell`] and paints what it reports.

pub mod animation;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod scheduler;
pub mod shell;

pub use animation::{gear_tag, next_angle, rotated_square, GearTask, SlideState, SlideTask};
pub use canvas::{Canvas, CanvasSnapshot, Font, Item, ItemId, ItemShape, ItemStyle, Point};
pub use catalog::{Color, Product, ProductKind, ShapeFactory, ShapeKind};
pub use config::{AnimationConfig, AppConfig, WindowConfig};
pub use error::{DemoError, Result};
pub use notify::{LabelObserver, NotificationChannel, Observer, StatusLabel};
pub use scheduler::{Scheduler, Step, Task};
pub use shell::{DemoShell, ShellSnapshot, FACTORY_HEADING, OBSERVER_HEADING};
