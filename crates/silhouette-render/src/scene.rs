//! Backend-agnostic description of a rendered silhouette.

use serde::Serialize;

/// A point in drawing units (canvas pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflect across the vertical line `x = axis`.
    pub fn mirror_x(self, axis: f64) -> Self {
        Self::new(2.0 * axis - self.x, self.y)
    }
}

/// RGBA colour with 8-bit channels and a unit alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

pub mod palette {
    use super::Color;

    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const SKIN: Color = Color::rgb(248, 228, 216);
    pub const NECK: Color = Color::rgb(232, 196, 160);
    pub const INK: Color = Color::rgb(10, 10, 21);
    pub const TORSO: Color = Color::rgb(45, 27, 105);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { ctrl: Point, to: Point },
    Close,
}

/// Ordered path commands; sub-paths are closed explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo {
            to: Point::new(x, y),
        });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo {
            to: Point::new(x, y),
        });
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// End points of every segment (control points excluded).
    pub fn anchors(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => Some(*to),
            PathCommand::QuadTo { to, .. } => Some(*to),
            PathCommand::Close => None,
        })
    }

    pub fn mirror_x(&self, axis: f64) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo { to } => PathCommand::MoveTo {
                    to: to.mirror_x(axis),
                },
                PathCommand::LineTo { to } => PathCommand::LineTo {
                    to: to.mirror_x(axis),
                },
                PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                    ctrl: ctrl.mirror_x(axis),
                    to: to.mirror_x(axis),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    /// `(offset in [0, 1], colour)` pairs in ascending offset order.
    pub stops: Vec<(f64, Color)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Color },
    Linear { gradient: LinearGradient },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid { color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Glow around a shape, drawn with no offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(Paint::solid(color)),
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(Stroke { color, width }),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn with_shadow(mut self, color: Color, blur: f64) -> Self {
        self.shadow = Some(Shadow { color, blur });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: &'static str,
    pub size: f64,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Path {
        path: Path,
        style: Style,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        style: Style,
    },
    Circle {
        center: Point,
        radius: f64,
        style: Style,
    },
    Text {
        text: String,
        at: Point,
        font: Font,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Background,
    Shoulders,
    TorsoSkirt,
    Sleeves,
    Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// Layers in paint order, back to front.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }
}
