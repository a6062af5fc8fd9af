//! Retained drawing surface.
//!
//! Items are kept in stacking order (oldest first) and addressed either by
//! their [`ItemId`] or by a tag shared between several items, the same way a
//! Tk canvas works. The window layer only reads [`Canvas::items`]; every
//! mutation happens through the shell and its animation tasks.

use serde::{Deserialize, Serialize};

use crate::catalog::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemShape {
    /// Axis-aligned box between two corners.
    Rectangle { from: Point, to: Point },
    /// Ellipse inscribed in the box between two corners.
    Oval { from: Point, to: Point },
    Polygon { points: Vec<Point> },
    Line { from: Point, to: Point },
    Text { at: Point, text: String, font: Font },
}

impl ItemShape {
    fn points_mut(&mut self) -> Vec<&mut Point> {
        match self {
            ItemShape::Rectangle { from, to }
            | ItemShape::Oval { from, to }
            | ItemShape::Line { from, to } => vec![from, to],
            ItemShape::Polygon { points } => points.iter_mut().collect(),
            ItemShape::Text { at, .. } => vec![at],
        }
    }

    fn points(&self) -> Vec<Point> {
        match self {
            ItemShape::Rectangle { from, to }
            | ItemShape::Oval { from, to }
            | ItemShape::Line { from, to } => vec![*from, *to],
            ItemShape::Polygon { points } => points.clone(),
            ItemShape::Text { at, .. } => vec![*at],
        }
    }
}

/// Paint attributes shared by every item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    pub width: f32,
    pub tag: Option<String>,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            fill: None,
            outline: Some(Color::Black),
            width: 1.0,
            tag: None,
        }
    }
}

impl ItemStyle {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn outlined(color: Color, width: f32) -> Self {
        Self {
            fill: None,
            outline: Some(color),
            width,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub shape: ItemShape,
    pub style: ItemStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct CanvasSnapshot {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: f32,
    height: f32,
    background: Color,
    items: Vec<Item>,
    next_id: u64,
}

impl Canvas {
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn create_rectangle(&mut self, from: Point, to: Point, style: ItemStyle) -> ItemId {
        self.push(ItemShape::Rectangle { from, to }, style)
    }

    pub fn create_oval(&mut self, from: Point, to: Point, style: ItemStyle) -> ItemId {
        self.push(ItemShape::Oval { from, to }, style)
    }

    pub fn create_polygon(&mut self, points: Vec<Point>, style: ItemStyle) -> ItemId {
        self.push(ItemShape::Polygon { points }, style)
    }

    pub fn create_line(&mut self, from: Point, to: Point, style: ItemStyle) -> ItemId {
        self.push(ItemShape::Line { from, to }, style)
    }

    pub fn create_text(
        &mut self,
        at: Point,
        text: impl Into<String>,
        font: Font,
        style: ItemStyle,
    ) -> ItemId {
        let shape = ItemShape::Text {
            at,
            text: text.into(),
            font,
        };
        self.push(shape, style)
    }

    /// Translates an item. Returns `false` if the item no longer exists.
    pub fn move_item(&mut self, id: ItemId, dx: f32, dy: f32) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        for point in item.shape.points_mut() {
            point.x += dx;
            point.y += dy;
        }
        true
    }

    /// Flattened `x0, y0, x1, y1, ...` coordinates of an item.
    pub fn coords(&self, id: ItemId) -> Option<Vec<f32>> {
        self.item(id).map(|item| {
            item.shape
                .points()
                .into_iter()
                .flat_map(|point| [point.x, point.y])
                .collect()
        })
    }

    pub fn delete(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Deletes every item carrying `tag` and returns how many were removed.
    pub fn delete_tag(&mut self, tag: &str) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| item.style.tag.as_deref() != Some(tag));
        before - self.items.len()
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |item| item.style.tag.as_deref() == Some(tag))
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            width: self.width,
            height: self.height,
            background: self.background,
            items: self.items.clone(),
        }
    }

    fn push(&mut self, shape: ItemShape, style: ItemStyle) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(Item { id, shape, style });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(600.0, 300.0, Color::White)
    }

    #[test]
    fn coords_follow_moves() {
        let mut canvas = canvas();
        let id = canvas.create_rectangle(
            Point::new(150.0, 100.0),
            Point::new(200.0, 150.0),
            ItemStyle::filled(Color::LightBlue),
        );

        assert!(canvas.move_item(id, 5.0, 0.0));
        assert_eq!(canvas.coords(id).unwrap(), vec![155.0, 100.0, 205.0, 150.0]);
    }

    #[test]
    fn delete_by_tag_leaves_other_items() {
        let mut canvas = canvas();
        let style = ItemStyle::outlined(Color::Black, 2.0).with_tag("gear0");
        canvas.create_oval(Point::new(0.0, 0.0), Point::new(50.0, 50.0), style.clone());
        canvas.create_polygon(vec![Point::new(1.0, 1.0); 4], style);
        let keep = canvas.create_line(
            Point::new(150.0, 160.0),
            Point::new(600.0, 160.0),
            ItemStyle::outlined(Color::Black, 2.0),
        );

        assert_eq!(canvas.delete_tag("gear0"), 2);
        assert_eq!(canvas.len(), 1);
        assert!(canvas.item(keep).is_some());
        assert_eq!(canvas.delete_tag("gear0"), 0);
    }

    #[test]
    fn deleted_items_stop_answering() {
        let mut canvas = canvas();
        let id = canvas.create_text(
            Point::new(175.0, 125.0),
            "A",
            Font::new("Arial", 24.0),
            ItemStyle::filled(Color::Black),
        );

        assert!(canvas.delete(id));
        assert!(!canvas.delete(id));
        assert!(canvas.coords(id).is_none());
        assert!(!canvas.move_item(id, 5.0, 0.0));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut canvas = canvas();
        let first = canvas.create_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), ItemStyle::default());
        canvas.delete(first);
        let second = canvas.create_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), ItemStyle::default());
        assert!(second > first);
    }
}
