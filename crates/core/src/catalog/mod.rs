use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DemoError;

/// Identifier of a product the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    A,
    B,
    C,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [ProductKind::A, ProductKind::B, ProductKind::C];

    pub fn id(self) -> &'static str {
        match self {
            ProductKind::A => "A",
            ProductKind::B => "B",
            ProductKind::C => "C",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProductKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ProductKind::A),
            "B" => Ok(ProductKind::B),
            "C" => Ok(ProductKind::C),
            other => Err(DemoError::UnknownProduct(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Triangle,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Triangle => "triangle",
        }
    }
}

/// Named colours used by the demo, spelled the way Tk names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    LightBlue,
    LightGreen,
    LightCoral,
    Black,
    White,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::LightBlue => "lightblue",
            Color::LightGreen => "lightgreen",
            Color::LightCoral => "lightcoral",
            Color::Black => "black",
            Color::White => "white",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::LightBlue => [173, 216, 230],
            Color::LightGreen => [144, 238, 144],
            Color::LightCoral => [240, 128, 128],
            Color::Black => [0, 0, 0],
            Color::White => [255, 255, 255],
        }
    }
}

/// A freshly built product. Carries no identity beyond its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub kind: ProductKind,
    pub color: Color,
    pub shape: ShapeKind,
}

impl Product {
    /// Returns the `(label, colour, shape)` triple describing the product.
    pub fn operation(&self) -> (&'static str, Color, ShapeKind) {
        (self.kind.id(), self.color, self.shape)
    }
}

/// Stateless product factory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapeFactory;

impl ShapeFactory {
    pub fn new() -> Self {
        Self
    }

    /// Looks a product up by its textual identifier. Anything outside the
    /// catalogue yields `None` rather than an error.
    pub fn create(&self, id: &str) -> Option<Product> {
        id.parse::<ProductKind>().ok().map(|kind| self.create_kind(kind))
    }

    pub fn create_kind(&self, kind: ProductKind) -> Product {
        let (color, shape) = match kind {
            ProductKind::A => (Color::LightBlue, ShapeKind::Rectangle),
            ProductKind::B => (Color::LightGreen, ShapeKind::Oval),
            ProductKind::C => (Color::LightCoral, ShapeKind::Triangle),
        };
        Product { kind, color, shape }
    }
}
