//! SVG backend for [`DrawingSurface`].

use std::f64::consts::{PI, TAU};

use crate::scene::{Color, Font, Paint, Point, Scene, Shadow, Stroke, TextAlign, TextBaseline};
use crate::surface::{DrawingSurface, replay};

/// Accumulates drawing calls into a standalone SVG document.
///
/// Gradient and filter ids carry `id_prefix`, so several documents can be
/// inlined into one page without clashing.
#[derive(Debug, Default)]
pub struct SvgSurface {
    id_prefix: String,
    width: f64,
    height: f64,
    defs: String,
    body: String,
    path: String,
    gradients: usize,
    filters: Vec<(String, String)>,
    document: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_prefix(prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// The finished document; empty until [`DrawingSurface::finish`] ran.
    pub fn into_svg(self) -> String {
        self.document
    }

    fn paint_attr(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid { color } => color_attr("fill", color),
            Paint::Linear { gradient } => {
                let id = format!("{}grad{}", self.id_prefix, self.gradients);
                self.gradients += 1;
                self.defs.push_str(&format!(
                    "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\">",
                    gradient.from.x, gradient.from.y, gradient.to.x, gradient.to.y
                ));
                for (offset, color) in &gradient.stops {
                    self.defs.push_str(&format!(
                        "<stop offset=\"{offset:.2}\" stop-color=\"{}\"{}/>",
                        color.hex(),
                        if color.is_opaque() {
                            String::new()
                        } else {
                            format!(" stop-opacity=\"{:.2}\"", color.a)
                        }
                    ));
                }
                self.defs.push_str("</linearGradient>");
                format!(" fill=\"url(#{id})\"")
            }
        }
    }

    fn filter_attr(&mut self, shadow: Option<&Shadow>) -> String {
        let Some(shadow) = shadow else {
            return String::new();
        };
        let key = format!("{}:{:.2}:{:.2}", shadow.color.hex(), shadow.color.a, shadow.blur);
        let id = match self.filters.iter().find(|(existing, _)| *existing == key) {
            Some((_, id)) => id.clone(),
            None => {
                let id = format!("{}glow{}", self.id_prefix, self.filters.len());
                self.defs.push_str(&format!(
                    "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"{:.2}\" flood-color=\"{}\" flood-opacity=\"{:.2}\"/></filter>",
                    shadow.blur / 2.0,
                    shadow.color.hex(),
                    shadow.color.a
                ));
                self.filters.push((key, id.clone()));
                id
            }
        };
        format!(" filter=\"url(#{id})\"")
    }

    fn take_path(&mut self) -> String {
        std::mem::take(&mut self.path).trim().to_string()
    }
}

impl DrawingSurface for SvgSurface {
    fn begin(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.defs.clear();
        self.body.clear();
        self.path.clear();
        self.document.clear();
        self.filters.clear();
        self.gradients = 0;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, to: Point) {
        self.path.push_str(&format!("M{:.2} {:.2} ", to.x, to.y));
    }

    fn line_to(&mut self, to: Point) {
        self.path.push_str(&format!("L{:.2} {:.2} ", to.x, to.y));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.path.push_str(&format!(
            "Q{:.2} {:.2} {:.2} {:.2} ",
            ctrl.x, ctrl.y, to.x, to.y
        ));
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        let sweep = (end - start).clamp(-TAU, TAU);
        let begin = polar(center, radius, start);
        if self.path.is_empty() {
            self.move_to(begin);
        } else {
            self.line_to(begin);
        }

        // SVG arcs cannot describe a full turn; split into halves.
        let steps = if sweep.abs() > PI { 2 } else { 1 };
        let step = sweep / steps as f64;
        for i in 1..=steps {
            let to = polar(center, radius, start + step * i as f64);
            let large = u8::from(step.abs() > PI);
            let clockwise = u8::from(step > 0.0);
            self.path.push_str(&format!(
                "A{radius:.2} {radius:.2} 0 {large} {clockwise} {:.2} {:.2} ",
                to.x, to.y
            ));
        }
    }

    fn close_path(&mut self) {
        self.path.push_str("Z ");
    }

    fn fill_path(&mut self, paint: &Paint, shadow: Option<&Shadow>) {
        let d = self.take_path();
        let fill = self.paint_attr(paint);
        let filter = self.filter_attr(shadow);
        self.body
            .push_str(&format!("<path d=\"{d}\"{fill}{filter}/>"));
    }

    fn stroke_path(&mut self, stroke: &Stroke, shadow: Option<&Shadow>) {
        let d = self.take_path();
        let filter = self.filter_attr(shadow);
        self.body.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\"{}{filter}/>",
            stroke_attrs(stroke)
        ));
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: &Paint, shadow: Option<&Shadow>) {
        let fill = self.paint_attr(paint);
        let filter = self.filter_attr(shadow);
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{height:.2}\"{fill}{filter}/>",
            origin.x, origin.y
        ));
    }

    fn stroke_rect(
        &mut self,
        origin: Point,
        width: f64,
        height: f64,
        stroke: &Stroke,
        shadow: Option<&Shadow>,
    ) {
        let filter = self.filter_attr(shadow);
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"none\"{}{filter}/>",
            origin.x,
            origin.y,
            stroke_attrs(stroke)
        ));
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font: &Font,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    ) {
        let anchor = match align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let baseline = match baseline {
            TextBaseline::Top => "text-before-edge",
            TextBaseline::Middle => "central",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Bottom => "text-after-edge",
        };
        let weight = if font.bold { " font-weight=\"bold\"" } else { "" };
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\" font-family=\"{}\" font-size=\"{:.0}\"{weight}{}>{}</text>",
            at.x,
            at.y,
            escape_xml(font.family),
            font.size,
            color_attr("fill", &color),
            escape_xml(text)
        ));
    }

    fn finish(&mut self) {
        let (width, height) = (self.width, self.height);
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        if !self.defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&self.defs);
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        self.document = svg;
    }
}

/// Render `scene` as a standalone SVG document.
pub fn scene_to_svg(scene: &Scene, id_prefix: &str) -> String {
    let mut surface = SvgSurface::with_id_prefix(id_prefix);
    replay(scene, &mut surface);
    surface.into_svg()
}

fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

fn color_attr(name: &str, color: &Color) -> String {
    if color.is_opaque() {
        format!(" {name}=\"{}\"", color.hex())
    } else {
        format!(" {name}=\"{}\" {name}-opacity=\"{:.2}\"", color.hex(), color.a)
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        "{} stroke-width=\"{:.2}\" stroke-linejoin=\"round\"",
        color_attr("stroke", &stroke.color),
        stroke.width
    )
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Layer, LayerKind, LinearGradient, Path, Shape, Style, palette};

    fn scene(shapes: Vec<Shape>) -> Scene {
        Scene {
            width: 300.0,
            height: 600.0,
            layers: vec![Layer {
                kind: LayerKind::Background,
                shapes,
            }],
        }
    }

    #[test]
    fn writes_paths_with_fixed_precision() {
        let svg = scene_to_svg(
            &scene(vec![Shape::Path {
                path: Path::new()
                    .move_to(1.0, 2.0)
                    .quad_to(3.333, 4.0, 5.0, 6.0)
                    .close(),
                style: Style::fill(palette::GOLD),
            }]),
            "",
        );
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"300\" height=\"600\""));
        assert!(svg.contains("<path d=\"M1.00 2.00 Q3.33 4.00 5.00 6.00 Z\" fill=\"#ffd700\"/>"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn full_circle_uses_two_half_arcs() {
        let svg = scene_to_svg(
            &scene(vec![Shape::Circle {
                center: Point::new(150.0, 55.0),
                radius: 32.0,
                style: Style::fill(palette::SKIN),
            }]),
            "",
        );
        assert_eq!(svg.matches("A32.00 32.00 0 0 1").count(), 2);
        assert!(svg.contains("M182.00 55.00"));
    }

    #[test]
    fn deduplicates_glow_filters_and_prefixes_ids() {
        let glow = Style::fill(palette::GOLD).with_shadow(palette::GOLD, 8.0);
        let svg = scene_to_svg(
            &scene(vec![
                Shape::Rect {
                    origin: Point::new(0.0, 0.0),
                    width: 10.0,
                    height: 10.0,
                    style: glow.clone(),
                },
                Shape::Rect {
                    origin: Point::new(20.0, 0.0),
                    width: 10.0,
                    height: 10.0,
                    style: glow,
                },
                Shape::Rect {
                    origin: Point::new(0.0, 0.0),
                    width: 300.0,
                    height: 600.0,
                    style: Style {
                        fill: Some(Paint::Linear {
                            gradient: LinearGradient {
                                from: Point::new(0.0, 0.0),
                                to: Point::new(0.0, 600.0),
                                stops: vec![(0.0, palette::INK), (1.0, palette::TORSO)],
                            },
                        }),
                        ..Style::default()
                    },
                },
            ]),
            "s3-",
        );
        assert_eq!(svg.matches("<filter id=").count(), 1);
        assert_eq!(svg.matches("filter=\"url(#s3-glow0)\"").count(), 2);
        assert!(svg.contains("fill=\"url(#s3-grad0)\""));
    }

    #[test]
    fn escapes_text_and_maps_alignment() {
        let svg = scene_to_svg(
            &scene(vec![Shape::Text {
                text: "A&B <C>".to_string(),
                at: Point::new(150.0, 585.0),
                font: Font {
                    family: "Georgia, serif",
                    size: 28.0,
                    bold: true,
                },
                align: TextAlign::Center,
                baseline: TextBaseline::Bottom,
                color: Color::rgba(255, 215, 0, 0.8),
            }]),
            "",
        );
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("dominant-baseline=\"text-after-edge\""));
        assert!(svg.contains("fill-opacity=\"0.80\""));
        assert!(svg.contains(">A&amp;B &lt;C&gt;</text>"));
    }

    #[test]
    fn escape_covers_quotes() {
        assert_eq!(escape_xml("it's \"x\""), "it&apos;s &quot;x&quot;");
    }
}
