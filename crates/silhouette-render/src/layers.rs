//! Layer builders for a single silhouette.
//!
//! Layers are computed back to front and each one hands its geometry to the
//! next: the torso starts exactly where the shoulders end, the skirt starts
//! at the waist line and the sleeves hang from the shoulder's outer edge.

use serde::Serialize;

use silhouette_core::{Candidate, Collar, Shoulder, Waist};

use crate::scene::{
    Color, Font, Layer, LayerKind, LinearGradient, Paint, Path, Point, Shape, Style, TextAlign,
    TextBaseline, palette,
};
use crate::variation::{PALETTE_COUNT, VisualVariation};

pub const CANVAS_WIDTH: f64 = 300.0;
pub const CANVAS_HEIGHT: f64 = 600.0;
pub const CENTER_X: f64 = CANVAS_WIDTH / 2.0;
/// Resting y of the shoulder line before collar offsets and jitter.
pub const SHOULDER_LINE_Y: f64 = 108.0;
/// Lowest y a hem may reach; keeps the figure clear of the frame label.
pub const HEM_LIMIT: f64 = CANVAS_HEIGHT - 44.0;
/// Shortest skirt the clamps allow.
pub const MIN_SKIRT_LENGTH: f64 = 40.0;
/// Sleeves never start closer than this to the waist line.
pub const SLEEVE_WAIST_MARGIN: f64 = 12.0;
/// Inner inset of the decorative frame; sleeves stay inside it.
pub const FRAME_INSET: f64 = 12.0;

const HEAD_CENTER: Point = Point::new(CENTER_X, 55.0);
const HEAD_RADIUS: f64 = 32.0;

const BACKGROUNDS: [[Color; 3]; PALETTE_COUNT] = [
    [
        Color::rgb(10, 10, 21),
        Color::rgb(26, 26, 46),
        Color::rgb(22, 33, 62),
    ],
    [
        Color::rgb(26, 10, 10),
        Color::rgb(46, 26, 26),
        Color::rgb(62, 22, 33),
    ],
    [
        Color::rgb(10, 26, 10),
        Color::rgb(26, 46, 26),
        Color::rgb(22, 62, 33),
    ],
    [
        Color::rgb(21, 10, 26),
        Color::rgb(46, 26, 46),
        Color::rgb(62, 22, 62),
    ],
];
const SHOULDER_TONES: [Color; 3] = [
    Color::rgb(26, 26, 46),
    Color::rgb(15, 52, 96),
    Color::rgb(42, 26, 74),
];
const SKIRT_TONES: [Color; 2] = [Color::rgb(74, 42, 106), Color::rgb(58, 26, 90)];
const SHORT_SLEEVE: Color = Color::rgb(34, 48, 79);
const LONG_SLEEVE: Color = Color::rgb(22, 32, 63);
const GUIDE: Color = Color::rgba(255, 215, 0, 0.1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoulderArchetype {
    Angular,
    Cap,
    Drape,
}

impl From<Shoulder> for ShoulderArchetype {
    fn from(value: Shoulder) -> Self {
        match value {
            Shoulder::Sharp => ShoulderArchetype::Angular,
            Shoulder::Volume => ShoulderArchetype::Cap,
            Shoulder::Fluid => ShoulderArchetype::Drape,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkirtArchetype {
    StraightFlare,
    WideFlare,
    AsymmetricDrop,
    NarrowTaper,
}

impl SkirtArchetype {
    pub const ALL: [SkirtArchetype; 4] = [
        SkirtArchetype::StraightFlare,
        SkirtArchetype::WideFlare,
        SkirtArchetype::AsymmetricDrop,
        SkirtArchetype::NarrowTaper,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShoulderGeometry {
    pub archetype: ShoulderArchetype,
    pub width: f64,
    pub height: f64,
    pub top_y: f64,
    pub bottom_y: f64,
    /// Half width of the bottom edge the torso attaches to.
    pub bottom_half_width: f64,
    /// Half width of the widest point, where sleeves attach.
    pub outer_half_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TorsoGeometry {
    pub top_y: f64,
    pub half_width: f64,
    pub waist_y: f64,
    pub waist_half_width: f64,
    /// Belt thickness; present only for waists that carry a belt.
    pub belt: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkirtGeometry {
    pub archetype: SkirtArchetype,
    pub top_y: f64,
    pub half_width: f64,
    pub hem_half_width: f64,
    pub hem_left_y: f64,
    pub hem_right_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleeveGeometry {
    pub anchor_y: f64,
    pub width: f64,
    pub height: f64,
    /// Outer x of the left sleeve.
    pub left_x: f64,
    /// Inner x of the right sleeve.
    pub right_x: f64,
}

/// Gradient backdrop, guide lines, head and neck.
pub fn background(variation: &VisualVariation) -> Layer {
    let mut layer = Layer::new(LayerKind::Background);
    let colors = BACKGROUNDS[variation.palette % PALETTE_COUNT];

    layer.push(Shape::Rect {
        origin: Point::new(0.0, 0.0),
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        style: Style {
            fill: Some(Paint::Linear {
                gradient: LinearGradient {
                    from: Point::new(0.0, 0.0),
                    to: Point::new(0.0, CANVAS_HEIGHT),
                    stops: vec![(0.0, colors[0]), (0.5, colors[1]), (1.0, colors[2])],
                },
            }),
            ..Style::default()
        },
    });

    let mut guides = Path::new();
    let mut y = 40.0;
    while y < CANVAS_HEIGHT {
        guides = guides.move_to(0.0, y).line_to(CANVAS_WIDTH, y);
        y += 40.0;
    }
    layer.push(Shape::Path {
        path: guides,
        style: Style::stroke(GUIDE, 1.0),
    });

    layer.push(Shape::Circle {
        center: HEAD_CENTER,
        radius: HEAD_RADIUS,
        style: Style::fill(palette::SKIN).with_shadow(palette::GOLD, 8.0),
    });
    layer.push(Shape::Rect {
        origin: Point::new(CENTER_X - 10.0, HEAD_CENTER.y + HEAD_RADIUS),
        width: 20.0,
        height: 20.0,
        style: Style::fill(palette::NECK),
    });

    layer
}

pub fn shoulders(candidate: &Candidate, variation: &VisualVariation) -> (ShoulderGeometry, Layer) {
    let rule = candidate.shoulder.rule();
    let collar = candidate.collar.rule();
    let archetype = ShoulderArchetype::from(candidate.shoulder);

    let width = (rule.width + collar.expand.unwrap_or(0.0) + variation.shoulder_width_delta).max(40.0);
    let expand_height = if collar.expand.is_some() { 8.0 } else { 0.0 };
    let height = (rule.height + expand_height + variation.shoulder_height_delta).max(8.0);
    let top = SHOULDER_LINE_Y + collar.offset_y + variation.shoulder_top_delta;
    let half = width / 2.0;
    let cx = CENTER_X;

    let (path, bottom_y, bottom_half_width, outer_half_width) = match archetype {
        ShoulderArchetype::Angular => {
            let inset = variation.shoulder_angle.min(half / 2.0);
            let bottom = top + height;
            let path = Path::new()
                .move_to(cx - half, top)
                .line_to(cx + half, top)
                .line_to(cx + half - inset, bottom)
                .line_to(cx - half + inset, bottom)
                .close();
            (path, bottom, half - inset, half)
        }
        ShoulderArchetype::Cap => {
            let amp = variation.volume_amp;
            let pad = 14.0 * amp;
            let rise = top - 10.0 * amp;
            let bottom = top + height + 22.0;
            let path = Path::new()
                .move_to(cx - half - pad, top + height)
                .quad_to(cx - half - 36.0 * amp, rise, cx, rise)
                .quad_to(cx + half + 36.0 * amp, rise, cx + half + pad, top + height)
                .line_to(cx + half + 18.0, bottom)
                .line_to(cx - half - 18.0, bottom)
                .close();
            (path, bottom, half + 18.0, half + pad.max(18.0))
        }
        ShoulderArchetype::Drape => {
            let depth = height + 24.0 + variation.drape_depth;
            let bottom = top + depth;
            let path = Path::new()
                .move_to(cx - half, top)
                .quad_to(cx, top - 12.0, cx + half, top)
                .quad_to(cx + half + 6.0, top + depth * 0.6, cx + half - 8.0, bottom)
                .line_to(cx - half + 8.0, bottom)
                .quad_to(cx - half - 6.0, top + depth * 0.6, cx - half, top)
                .close();
            (path, bottom, half - 8.0, half)
        }
    };

    let mut layer = Layer::new(LayerKind::Shoulders);
    layer.push(Shape::Path {
        path,
        style: Style::fill(SHOULDER_TONES[variation.fill_tone % SHOULDER_TONES.len()])
            .with_stroke(palette::GOLD, 1.5),
    });

    let geometry = ShoulderGeometry {
        archetype,
        width,
        height,
        top_y: top,
        bottom_y,
        bottom_half_width,
        outer_half_width,
    };
    (geometry, layer)
}

/// Torso, belt, skirt and collar detailing.
pub fn torso_and_skirt(
    candidate: &Candidate,
    shoulder: &ShoulderGeometry,
    variation: &VisualVariation,
) -> (TorsoGeometry, SkirtGeometry, Layer) {
    let torso = torso_geometry(candidate.waist, shoulder, variation);
    let skirt = skirt_geometry(candidate, &torso, variation);
    let cx = CENTER_X;
    let mut layer = Layer::new(LayerKind::TorsoSkirt);

    let skirt_path = {
        let (ctrl_dx, ctrl_ratio) = skirt_side_curve(skirt.archetype);
        let hem_ctrl_y = skirt.hem_left_y.max(skirt.hem_right_y) + 12.0;
        Path::new()
            .move_to(cx - skirt.half_width, skirt.top_y)
            .line_to(cx + skirt.half_width, skirt.top_y)
            .quad_to(
                cx + skirt.half_width + ctrl_dx,
                skirt.top_y + (skirt.hem_right_y - skirt.top_y) * ctrl_ratio,
                cx + skirt.hem_half_width,
                skirt.hem_right_y,
            )
            .quad_to(cx, hem_ctrl_y, cx - skirt.hem_half_width, skirt.hem_left_y)
            .quad_to(
                cx - skirt.half_width - ctrl_dx,
                skirt.top_y + (skirt.hem_left_y - skirt.top_y) * ctrl_ratio,
                cx - skirt.half_width,
                skirt.top_y,
            )
            .close()
    };
    layer.push(Shape::Path {
        path: skirt_path,
        style: Style::fill(SKIRT_TONES[variation.fill_tone % SKIRT_TONES.len()])
            .with_stroke(palette::GOLD, 1.0),
    });

    let cinch = candidate.waist.rule().curve.unwrap_or(0.0);
    let hip = torso.waist_half_width / 0.8;
    let mid_y = (torso.top_y + torso.waist_y) / 2.0;
    layer.push(Shape::Path {
        path: Path::new()
            .move_to(cx - torso.half_width, torso.top_y)
            .line_to(cx + torso.half_width, torso.top_y)
            .quad_to(
                cx + hip * 0.9 - cinch,
                mid_y,
                cx + torso.waist_half_width,
                torso.waist_y,
            )
            .line_to(cx - torso.waist_half_width, torso.waist_y)
            .quad_to(
                cx - hip * 0.9 + cinch,
                mid_y,
                cx - torso.half_width,
                torso.top_y,
            )
            .close(),
        style: Style::fill(palette::TORSO),
    });

    if let Some(thickness) = torso.belt {
        let half = torso.waist_half_width + 4.0;
        layer.push(Shape::Rect {
            origin: Point::new(cx - half, torso.waist_y - thickness / 2.0),
            width: half * 2.0,
            height: thickness,
            style: Style::fill(palette::GOLD).with_shadow(palette::GOLD, 6.0),
        });
    }

    collar_detail(candidate.collar, shoulder, &skirt, variation, &mut layer);

    (torso, skirt, layer)
}

fn torso_geometry(
    waist: Waist,
    shoulder: &ShoulderGeometry,
    variation: &VisualVariation,
) -> TorsoGeometry {
    let rule = waist.rule();
    let top = shoulder.bottom_y;
    let half_width = (shoulder.bottom_half_width * 0.75 + variation.bust_delta).clamp(24.0, 90.0);
    let hip = half_width + 20.0 + variation.hip_flare;
    // Leave room for the shortest skirt above the hem limit.
    let waist_y = (top + rule.drop + variation.waist_delta)
        .max(top + 16.0)
        .min(HEM_LIMIT - MIN_SKIRT_LENGTH);

    TorsoGeometry {
        top_y: top,
        half_width,
        waist_y,
        waist_half_width: hip * 0.8,
        belt: rule.belt.then_some(variation.belt_thickness),
    }
}

fn skirt_geometry(
    candidate: &Candidate,
    torso: &TorsoGeometry,
    variation: &VisualVariation,
) -> SkirtGeometry {
    let archetype = SkirtArchetype::from_index(variation.skirt);
    let top = torso.waist_y;
    let half_width = torso.waist_half_width + 10.0 + variation.skirt_flare;
    let length = (candidate.length.rule().length + variation.length_delta).max(MIN_SKIRT_LENGTH);
    let hem = top + length;

    let (hem_half_width, extra, archetype_split) = match archetype {
        SkirtArchetype::StraightFlare => (half_width - 10.0, 0.0, 0.0),
        SkirtArchetype::WideFlare => (half_width + 15.0, 15.0, 0.0),
        SkirtArchetype::AsymmetricDrop => (half_width, 0.0, 20.0),
        SkirtArchetype::NarrowTaper => (half_width * 0.55, 0.0, 0.0),
    };

    // Right side drops, left side rises; the differential is drop * intensity.
    let collar_split = match candidate.collar {
        Collar::Asym => candidate.collar.rule().drop.unwrap_or(0.0) * variation.asym_intensity / 2.0,
        _ => 0.0,
    };
    let split = collar_split + archetype_split;
    let lowest = (top + MIN_SKIRT_LENGTH).min(HEM_LIMIT);

    SkirtGeometry {
        archetype,
        top_y: top,
        half_width,
        hem_half_width,
        hem_left_y: (hem + extra - split).min(HEM_LIMIT).max(lowest),
        hem_right_y: (hem + extra + split).min(HEM_LIMIT).max(lowest),
    }
}

fn skirt_side_curve(archetype: SkirtArchetype) -> (f64, f64) {
    match archetype {
        SkirtArchetype::StraightFlare => (15.0, 0.55),
        SkirtArchetype::WideFlare => (30.0, 0.6),
        SkirtArchetype::AsymmetricDrop => (20.0, 0.5),
        SkirtArchetype::NarrowTaper => (-6.0, 0.5),
    }
}

fn collar_detail(
    collar: Collar,
    shoulder: &ShoulderGeometry,
    skirt: &SkirtGeometry,
    variation: &VisualVariation,
    layer: &mut Layer,
) {
    let cx = CENTER_X;
    let rule = collar.rule();

    match collar {
        Collar::Asym => {
            let hem_mid = (skirt.hem_left_y + skirt.hem_right_y) / 2.0;
            let slot = [0.25, 0.5, 0.75][variation.accent_slot % 3];
            let y = skirt.top_y + (hem_mid - skirt.top_y) * slot;
            let x = CANVAS_WIDTH - 40.0 - rule.offset_x + variation.accent_shift;
            layer.push(Shape::Path {
                path: Path::new()
                    .move_to(x, y)
                    .line_to(x + 22.0, y + 45.0)
                    .line_to(x + 12.0, y + 90.0)
                    .close(),
                style: Style::fill(Color::rgba(255, 215, 0, 0.85)),
            });
        }
        Collar::VNeck => {
            let depth = rule.depth.unwrap_or(0.0);
            layer.push(Shape::Path {
                path: Path::new()
                    .move_to(cx - 20.0, shoulder.top_y + 4.0)
                    .line_to(cx + 20.0, shoulder.top_y + 4.0)
                    .line_to(cx, shoulder.top_y + depth + 12.0)
                    .close(),
                style: Style::fill(palette::INK).with_stroke(palette::GOLD, 2.0),
            });
        }
        Collar::Oversize => {
            let half = shoulder.outer_half_width + 6.0;
            layer.push(Shape::Rect {
                origin: Point::new(cx - half, shoulder.top_y - 6.0),
                width: half * 2.0,
                height: shoulder.height + 18.0,
                style: Style::fill(Color::rgba(255, 215, 0, 0.15)),
            });
        }
    }
}

/// Mirrored sleeve pair; `None` for sleeveless candidates.
pub fn sleeves(
    candidate: &Candidate,
    shoulder: &ShoulderGeometry,
    torso: &TorsoGeometry,
    variation: &VisualVariation,
) -> Option<(SleeveGeometry, Layer)> {
    let rule = candidate.sleeve.rule()?;

    let height = (rule.height * variation.sleeve_height_factor).clamp(rule.min_height, rule.max_height);
    let width = (rule.width + variation.sleeve_width_delta).max(12.0);
    let anchor_y = (shoulder.top_y + shoulder.height * 0.6)
        .min(torso.waist_y - SLEEVE_WAIST_MARGIN)
        .max(shoulder.top_y);
    let offset = shoulder
        .outer_half_width
        .min(CENTER_X - FRAME_INSET - width);

    let x = CENTER_X + offset;
    let y = anchor_y;
    let right = Path::new()
        .move_to(x, y)
        .line_to(x + width, y)
        .quad_to(x + width + 8.0, y + height * 0.3, x + width * 0.65, y + height)
        .line_to(x + width * 0.15, y + height)
        .quad_to(x - 4.0, y + height * 0.3, x, y)
        .close();
    let left = right.mirror_x(CENTER_X);

    let color = if rule.height > 100.0 { LONG_SLEEVE } else { SHORT_SLEEVE };
    let mut layer = Layer::new(LayerKind::Sleeves);
    for path in [left, right] {
        layer.push(Shape::Path {
            path,
            style: Style::fill(color).with_stroke(palette::GOLD, 1.0),
        });
    }

    let geometry = SleeveGeometry {
        anchor_y,
        width,
        height,
        left_x: CENTER_X - offset - width,
        right_x: x,
    };
    Some((geometry, layer))
}

/// Glowing border, ordinal label and parameter abbreviation.
pub fn frame(candidate: &Candidate, index: usize) -> Layer {
    let mut layer = Layer::new(LayerKind::Frame);
    layer.push(Shape::Rect {
        origin: Point::new(8.0, 8.0),
        width: CANVAS_WIDTH - 16.0,
        height: CANVAS_HEIGHT - 16.0,
        style: Style::stroke(palette::GOLD, 4.0).with_shadow(palette::GOLD, 12.0),
    });
    layer.push(Shape::Text {
        text: format!("#{}", index + 1),
        at: Point::new(CENTER_X, CANVAS_HEIGHT - 15.0),
        font: Font {
            family: "Georgia, serif",
            size: 28.0,
            bold: true,
        },
        align: TextAlign::Center,
        baseline: TextBaseline::Bottom,
        color: palette::GOLD,
    });
    layer.push(Shape::Text {
        text: candidate.abbreviation(),
        at: Point::new(20.0, 30.0),
        font: Font {
            family: "monospace",
            size: 14.0,
            bold: false,
        },
        align: TextAlign::Left,
        baseline: TextBaseline::Alphabetic,
        color: Color::rgba(255, 215, 0, 0.8),
    });
    layer
}

#[cfg(test)]
mod tests {
    use silhouette_core::{Length, Sleeve, all_candidates};

    use super::*;

    fn variations() -> impl Iterator<Item = VisualVariation> {
        (0..12).flat_map(|index| [0_u64, 777, 1_700_000_000_000].map(|seed| VisualVariation::derive(index, seed)))
    }

    #[test]
    fn torso_starts_at_shoulder_bottom() {
        for shoulder in Shoulder::ALL {
            for collar in Collar::ALL {
                let candidate = Candidate {
                    shoulder: *shoulder,
                    collar: *collar,
                    ..Candidate::default()
                };
                for variation in variations() {
                    let (geometry, _) = shoulders(&candidate, &variation);
                    let (torso, skirt, _) = torso_and_skirt(&candidate, &geometry, &variation);
                    assert_eq!(torso.top_y, geometry.bottom_y);
                    assert_eq!(skirt.top_y, torso.waist_y);
                    assert!(torso.waist_y > torso.top_y);
                }
            }
        }
    }

    #[test]
    fn hems_stay_on_canvas() {
        for candidate in all_candidates() {
            for variation in variations() {
                let (shoulder, _) = shoulders(&candidate, &variation);
                let (_, skirt, _) = torso_and_skirt(&candidate, &shoulder, &variation);
                assert!(skirt.hem_left_y <= HEM_LIMIT && skirt.hem_right_y <= HEM_LIMIT);
                assert!(skirt.hem_left_y >= skirt.top_y + MIN_SKIRT_LENGTH);
            }
        }
    }

    #[test]
    fn sleeve_height_is_clamped_to_rule_band() {
        for sleeve_class in [Sleeve::Short, Sleeve::Long] {
            let candidate = Candidate {
                sleeve: sleeve_class,
                ..Candidate::default()
            };
            let rule = sleeve_class.rule().expect("sleeved classes have a rule");

            for factor in [0.0, 0.5, 0.8, 1.0, 1.3, 4.0, 100.0] {
                let variation = VisualVariation {
                    sleeve_height_factor: factor,
                    ..VisualVariation::derive(0, 0)
                };
                let (shoulder, _) = shoulders(&candidate, &variation);
                let (torso, _, _) = torso_and_skirt(&candidate, &shoulder, &variation);
                let (sleeve, _) =
                    sleeves(&candidate, &shoulder, &torso, &variation).expect("sleeves");
                assert!(
                    sleeve.height >= rule.min_height && sleeve.height <= rule.max_height,
                    "{sleeve_class:?} height {} escaped [{}, {}] at factor {factor}",
                    sleeve.height,
                    rule.min_height,
                    rule.max_height
                );
            }
        }
    }

    #[test]
    fn extreme_jitter_keeps_the_skirt_on_canvas() {
        for (waist_delta, length_delta, top_delta) in [
            (1000.0, 0.0, 0.0),
            (1000.0, 1000.0, 0.0),
            (-1000.0, -1000.0, 0.0),
            (0.0, 0.0, 1000.0),
        ] {
            let variation = VisualVariation {
                waist_delta,
                length_delta,
                shoulder_top_delta: top_delta,
                asym_intensity: 50.0,
                ..VisualVariation::derive(0, 0)
            };
            let candidate = Candidate::default();
            let (shoulder, _) = shoulders(&candidate, &variation);
            let (torso, skirt, _) = torso_and_skirt(&candidate, &shoulder, &variation);
            assert!(torso.waist_y <= HEM_LIMIT - MIN_SKIRT_LENGTH);
            assert!(skirt.hem_left_y <= HEM_LIMIT && skirt.hem_right_y <= HEM_LIMIT);
            assert!(skirt.hem_left_y >= skirt.top_y.min(HEM_LIMIT));
        }
    }

    #[test]
    fn sleeves_hang_from_the_shoulder_edge_above_the_waist() {
        for candidate in all_candidates().filter(|c| c.sleeve != Sleeve::Sleeveless) {
            for variation in variations() {
                let (shoulder, _) = shoulders(&candidate, &variation);
                let (torso, _, _) = torso_and_skirt(&candidate, &shoulder, &variation);
                let (sleeve, layer) =
                    sleeves(&candidate, &shoulder, &torso, &variation).expect("sleeves");
                assert!(sleeve.anchor_y <= torso.waist_y - SLEEVE_WAIST_MARGIN || sleeve.anchor_y == shoulder.top_y);
                assert!(sleeve.right_x <= CENTER_X + shoulder.outer_half_width);
                assert!(sleeve.right_x + sleeve.width <= CANVAS_WIDTH - FRAME_INSET + 1e-9);
                assert!((CENTER_X - sleeve.left_x - sleeve.width - (sleeve.right_x - CENTER_X)).abs() < 1e-9);
                assert_eq!(layer.shapes.len(), 2);
            }
        }
    }

    #[test]
    fn sleeveless_has_no_sleeves() {
        let candidate = Candidate::default();
        assert_eq!(candidate.sleeve, Sleeve::Sleeveless);
        let variation = VisualVariation::derive(0, 0);
        let (shoulder, _) = shoulders(&candidate, &variation);
        let (torso, _, _) = torso_and_skirt(&candidate, &shoulder, &variation);
        assert!(sleeves(&candidate, &shoulder, &torso, &variation).is_none());
    }

    #[test]
    fn belt_only_on_marked_waist() {
        for waist in Waist::ALL {
            let candidate = Candidate {
                waist: *waist,
                ..Candidate::default()
            };
            let variation = VisualVariation::derive(2, 9);
            let (shoulder, _) = shoulders(&candidate, &variation);
            let (torso, _, _) = torso_and_skirt(&candidate, &shoulder, &variation);
            assert_eq!(torso.belt.is_some(), *waist == Waist::Marked);
        }
    }

    #[test]
    fn asymmetric_collar_drops_the_right_hem() {
        let base = Candidate {
            length: Length::Mini,
            ..Candidate::default()
        };
        let variation = VisualVariation {
            skirt: 0,
            asym_intensity: 1.5,
            ..VisualVariation::derive(0, 0)
        };

        let (shoulder, _) = shoulders(&base, &variation);
        let (_, skirt, _) = torso_and_skirt(&base, &shoulder, &variation);
        assert_eq!(skirt.archetype, SkirtArchetype::StraightFlare);
        assert!((skirt.hem_right_y - skirt.hem_left_y - 40.0 * 1.5).abs() < 1e-9);

        let straight = Candidate {
            collar: Collar::VNeck,
            ..base
        };
        let (shoulder, _) = shoulders(&straight, &variation);
        let (_, skirt, _) = torso_and_skirt(&straight, &shoulder, &variation);
        assert_eq!(skirt.hem_right_y, skirt.hem_left_y);
    }

    #[test]
    fn expanding_collar_widens_shoulders() {
        let variation = VisualVariation::derive(1, 1);
        let plain = Candidate {
            collar: Collar::VNeck,
            ..Candidate::default()
        };
        let wrapped = Candidate {
            collar: Collar::Oversize,
            ..Candidate::default()
        };
        let (a, _) = shoulders(&plain, &variation);
        let (b, _) = shoulders(&wrapped, &variation);
        assert!((b.width - a.width - 24.0).abs() < 1e-9);
        assert!((b.height - a.height - 8.0).abs() < 1e-9);
    }

    #[test]
    fn frame_labels_are_one_based() {
        let layer = frame(&Candidate::default(), 0);
        let labels: Vec<_> = layer
            .shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["#1", "SA"]);
    }
}
