use std::f64::consts::TAU;

use crate::scene::{
    Color, Font, Paint, PathCommand, Point, Scene, Shadow, Shape, Stroke, TextAlign, TextBaseline,
};

/// Minimal immediate-mode drawing contract a backend must provide.
///
/// Paths are built with `begin_path` followed by segment calls and are
/// consumed by the next `fill_path` or `stroke_path`.
pub trait DrawingSurface {
    fn begin(&mut self, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, to: Point);
    fn line_to(&mut self, to: Point);
    fn quad_to(&mut self, ctrl: Point, to: Point);
    /// Circular arc from `start` to `end` radians, clockwise in screen space.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    fn close_path(&mut self);
    fn fill_path(&mut self, paint: &Paint, shadow: Option<&Shadow>);
    fn stroke_path(&mut self, stroke: &Stroke, shadow: Option<&Shadow>);
    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: &Paint, shadow: Option<&Shadow>);
    fn stroke_rect(
        &mut self,
        origin: Point,
        width: f64,
        height: f64,
        stroke: &Stroke,
        shadow: Option<&Shadow>,
    );
    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font: &Font,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    );
    fn finish(&mut self);
}

/// Paint every layer of `scene` onto `surface`, back to front.
pub fn replay<S: DrawingSurface + ?Sized>(scene: &Scene, surface: &mut S) {
    surface.begin(scene.width, scene.height);

    for layer in &scene.layers {
        for shape in &layer.shapes {
            match shape {
                Shape::Path { path, style } => {
                    let trace = |surface: &mut S| {
                        surface.begin_path();
                        for command in path.commands() {
                            match *command {
                                PathCommand::MoveTo { to } => surface.move_to(to),
                                PathCommand::LineTo { to } => surface.line_to(to),
                                PathCommand::QuadTo { ctrl, to } => surface.quad_to(ctrl, to),
                                PathCommand::Close => surface.close_path(),
                            }
                        }
                    };
                    if let Some(paint) = &style.fill {
                        trace(surface);
                        surface.fill_path(paint, style.shadow.as_ref());
                    }
                    if let Some(stroke) = &style.stroke {
                        trace(surface);
                        let shadow = style.fill.is_none().then_some(style.shadow.as_ref()).flatten();
                        surface.stroke_path(stroke, shadow);
                    }
                }
                Shape::Rect {
                    origin,
                    width,
                    height,
                    style,
                } => {
                    if let Some(paint) = &style.fill {
                        surface.fill_rect(*origin, *width, *height, paint, style.shadow.as_ref());
                    }
                    if let Some(stroke) = &style.stroke {
                        let shadow = style.fill.is_none().then_some(style.shadow.as_ref()).flatten();
                        surface.stroke_rect(*origin, *width, *height, stroke, shadow);
                    }
                }
                Shape::Circle {
                    center,
                    radius,
                    style,
                } => {
                    if let Some(paint) = &style.fill {
                        surface.begin_path();
                        surface.arc(*center, *radius, 0.0, TAU);
                        surface.close_path();
                        surface.fill_path(paint, style.shadow.as_ref());
                    }
                    if let Some(stroke) = &style.stroke {
                        surface.begin_path();
                        surface.arc(*center, *radius, 0.0, TAU);
                        surface.close_path();
                        surface.stroke_path(stroke, None);
                    }
                }
                Shape::Text {
                    text,
                    at,
                    font,
                    align,
                    baseline,
                    color,
                } => surface.fill_text(text, *at, font, *align, *baseline, *color),
            }
        }
    }

    surface.finish();
}
