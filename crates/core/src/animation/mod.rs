use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, ItemId, ItemStyle, Point};
use crate::catalog::Color;
use crate::scheduler::Step;

/// Lifecycle of a sliding product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideState {
    Sliding,
    Removed,
}

/// Moves a product shape and its caption to the right until the shape
/// reaches the boundary, then erases both.
#[derive(Debug, Clone)]
pub struct SlideTask {
    shape: ItemId,
    label: ItemId,
    dx: f32,
    boundary: f32,
    delay_ms: u64,
    ticks: u32,
    state: SlideState,
}

impl SlideTask {
    pub fn new(shape: ItemId, label: ItemId, dx: f32, boundary: f32, delay_ms: u64) -> Self {
        Self {
            shape,
            label,
            dx,
            boundary,
            delay_ms,
            ticks: 0,
            state: SlideState::Sliding,
        }
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn step(&mut self, canvas: &mut Canvas) -> Step {
        if self.state == SlideState::Removed {
            return Step::Finished;
        }

        self.ticks += 1;
        canvas.move_item(self.shape, self.dx, 0.0);
        canvas.move_item(self.label, self.dx, 0.0);

        match canvas.coords(self.shape).as_deref().and_then(edge_coordinate) {
            Some(edge) if edge < self.boundary => Step::Again(self.delay_ms),
            _ => {
                canvas.delete(self.shape);
                canvas.delete(self.label);
                self.state = SlideState::Removed;
                tracing::info!(shape = self.shape.0, ticks = self.ticks, "product left the canvas");
                Step::Finished
            }
        }
    }
}

/// The third flattened coordinate: the far x of a box, or the x of the
/// second vertex of a polygon.
fn edge_coordinate(coords: &[f32]) -> Option<f32> {
    coords.get(2).copied()
}

pub fn gear_tag(index: usize) -> String {
    format!("gear{index}")
}

/// Decorative gear: an outline circle with a square spinning inside it.
#[derive(Debug, Clone)]
pub struct GearTask {
    index: usize,
    origin: Point,
    diameter: f32,
    square_size: f32,
    angle: u32,
    angle_step: u32,
    delay_ms: u64,
}

impl GearTask {
    pub fn new(
        index: usize,
        origin: Point,
        diameter: f32,
        square_size: f32,
        angle_step: u32,
        delay_ms: u64,
    ) -> Self {
        Self {
            index,
            origin,
            diameter,
            square_size,
            angle: 0,
            angle_step,
            delay_ms,
        }
    }

    /// Angle that the next redraw will use, in degrees.
    pub fn angle(&self) -> u32 {
        self.angle
    }

    pub fn step(&mut self, canvas: &mut Canvas) -> Step {
        let tag = gear_tag(self.index);
        canvas.delete_tag(&tag);

        let far = Point::new(self.origin.x + self.diameter, self.origin.y + self.diameter);
        canvas.create_oval(
            self.origin,
            far,
            ItemStyle::outlined(Color::Black, 2.0).with_tag(tag.clone()),
        );

        let radius = self.diameter / 2.0;
        let square = rotated_square(
            self.origin.x + radius,
            self.origin.y + radius,
            self.square_size,
            self.angle as f32,
        );
        let style = ItemStyle {
            fill: Some(Color::Black),
            outline: None,
            width: 1.0,
            tag: Some(tag),
        };
        canvas.create_polygon(square.to_vec(), style);

        tracing::trace!(gear = self.index, angle = self.angle, "gear redrawn");
        self.angle = next_angle(self.angle, self.angle_step);
        Step::Again(self.delay_ms)
    }
}

pub fn next_angle(angle: u32, step: u32) -> u32 {
    (angle + step) % 360
}

/// Corners of a `size`-wide square centred on `(cx, cy)` rotated by
/// `angle_degrees`, starting at the top-left corner and going clockwise on
/// screen.
pub fn rotated_square(cx: f32, cy: f32, size: f32, angle_degrees: f32) -> [Point; 4] {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let half = size / 2.0;
    let rotate = |dx: f32, dy: f32| Point::new(cx + cos * dx - sin * dy, cy + sin * dx + cos * dy);

    [
        rotate(-half, -half),
        rotate(half, -half),
        rotate(half, half),
        rotate(-half, half),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Font;

    fn blank() -> Canvas {
        Canvas::new(600.0, 300.0, Color::White)
    }

    fn product(canvas: &mut Canvas) -> (ItemId, ItemId) {
        let shape = canvas.create_rectangle(
            Point::new(150.0, 100.0),
            Point::new(200.0, 150.0),
            ItemStyle::filled(Color::LightBlue),
        );
        let label = canvas.create_text(
            Point::new(175.0, 125.0),
            "A",
            Font::new("Arial", 24.0),
            ItemStyle::filled(Color::Black),
        );
        (shape, label)
    }

    #[test]
    fn slide_is_removed_on_tick_eighty() {
        let mut canvas = blank();
        let (shape, label) = product(&mut canvas);
        let mut task = SlideTask::new(shape, label, 5.0, 600.0, 50);

        let mut last_edge = 200.0;
        while task.step(&mut canvas) == Step::Again(50) {
            let edge = canvas.coords(shape).unwrap()[2];
            assert!(edge > last_edge);
            last_edge = edge;
        }

        assert_eq!(task.ticks(), 80);
        assert_eq!(task.state(), SlideState::Removed);
        assert!(canvas.is_empty());
    }

    #[test]
    fn removed_slide_does_nothing() {
        let mut canvas = blank();
        let (shape, label) = product(&mut canvas);
        let mut task = SlideTask::new(shape, label, 5.0, 210.0, 50);

        assert_eq!(task.step(&mut canvas), Step::Again(50));
        assert_eq!(task.step(&mut canvas), Step::Finished);
        assert_eq!(task.step(&mut canvas), Step::Finished);
        assert_eq!(task.ticks(), 2);
    }

    #[test]
    fn caption_moves_with_shape() {
        let mut canvas = blank();
        let (shape, label) = product(&mut canvas);
        let mut task = SlideTask::new(shape, label, 5.0, 600.0, 50);

        for _ in 0..3 {
            task.step(&mut canvas);
        }
        assert_eq!(canvas.coords(label).unwrap(), vec![190.0, 125.0]);
    }

    #[test]
    fn angle_wraps_after_full_turn() {
        let mut angle = 0;
        for k in 1..=36 {
            angle = next_angle(angle, 10);
            assert_eq!(angle, (10 * k) % 360);
        }
        assert_eq!(angle, 0);
    }

    #[test]
    fn unrotated_square_is_axis_aligned() {
        let corners = rotated_square(225.0, 185.0, 15.0, 0.0);
        assert_eq!(
            corners,
            [
                Point::new(217.5, 177.5),
                Point::new(232.5, 177.5),
                Point::new(232.5, 192.5),
                Point::new(217.5, 192.5),
            ]
        );
    }

    #[test]
    fn quarter_turn_swaps_corners() {
        let corners = rotated_square(0.0, 0.0, 2.0, 90.0);
        let expected = [(1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)];
        for (corner, (x, y)) in corners.iter().zip(expected) {
            assert!((corner.x - x).abs() < 1e-5, "{corner:?}");
            assert!((corner.y - y).abs() < 1e-5, "{corner:?}");
        }
    }

    #[test]
    fn gear_redraw_replaces_previous_drawing() {
        let mut canvas = blank();
        let mut gear = GearTask::new(2, Point::new(400.0, 160.0), 50.0, 15.0, 10, 100);

        for _ in 0..5 {
            assert_eq!(gear.step(&mut canvas), Step::Again(100));
        }

        assert_eq!(canvas.with_tag("gear2").count(), 2);
        assert_eq!(canvas.len(), 2);
        assert_eq!(gear.angle(), 50);
    }
}
