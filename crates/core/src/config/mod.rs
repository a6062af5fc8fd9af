use serde::{Deserialize, Serialize};

use crate::canvas::Point;
use crate::catalog::Color;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
}

impl AppConfig {
    pub fn demo_defaults() -> Self {
        Self::default()
    }
}

/// Window chrome and drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Design Patterns Demo".to_string(),
            canvas_width: 600.0,
            canvas_height: 300.0,
            background: Color::White,
        }
    }
}

/// Timing and geometry of the sliding products and the gears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub slide_step: f32,
    pub slide_delay_ms: u64,
    /// Products are erased once their edge reaches this x coordinate.
    pub slide_boundary: f32,
    pub gear_count: usize,
    pub gear_origin: Point,
    pub gear_spacing: f32,
    pub gear_diameter: f32,
    pub gear_square_size: f32,
    pub gear_angle_step: u32,
    pub gear_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            slide_step: 5.0,
            slide_delay_ms: 50,
            slide_boundary: 600.0,
            gear_count: 5,
            gear_origin: Point::new(200.0, 160.0),
            gear_spacing: 100.0,
            gear_diameter: 50.0,
            gear_square_size: 15.0,
            gear_angle_step: 10,
            gear_delay_ms: 100,
        }
    }
}
