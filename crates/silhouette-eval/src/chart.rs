//! Doughnut chart of the valid / rejected / remaining split.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::warn;

use crate::errors::DisplayError;
use crate::stats::RunStats;

const WIDTH: f64 = 360.0;
const HEIGHT: f64 = 420.0;
const CENTER: (f64, f64) = (180.0, 200.0);
const OUTER_RADIUS: f64 = 120.0;
const INNER_RADIUS: f64 = 72.0;

const SEGMENTS: [(&str, &str); 3] = [
    ("Valid", "#ffd700"),
    ("Rejected", "#ff8c00"),
    ("Remaining", "#1a1a2e"),
];

/// Chart document plus the strings it displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOutput {
    pub title: String,
    pub caption: String,
    pub svg: String,
}

/// Something that can turn run stats into a chart.
pub trait StatsDisplay {
    fn display(&self, stats: &RunStats) -> Result<ChartOutput, DisplayError>;
}

/// Built-in SVG doughnut chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoughnutChart;

impl StatsDisplay for DoughnutChart {
    fn display(&self, stats: &RunStats) -> Result<ChartOutput, DisplayError> {
        let title = stats.title();
        let caption = stats.caption();
        let svg = doughnut_svg(stats, &title, &caption);
        Ok(ChartOutput {
            title,
            caption,
            svg,
        })
    }
}

/// Display used when charting is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartingDisabled;

impl StatsDisplay for ChartingDisabled {
    fn display(&self, _stats: &RunStats) -> Result<ChartOutput, DisplayError> {
        Err(DisplayError::ChartingUnavailable(
            "charting is disabled for this run".to_string(),
        ))
    }
}

/// Render stats through `display`, degrading to `None` with a warning.
///
/// A missing or failing display never fails the run.
pub fn display_stats(display: Option<&dyn StatsDisplay>, stats: &RunStats) -> Option<ChartOutput> {
    let Some(display) = display else {
        warn!(run_id = %stats.run_id, "no stats display configured; skipping chart");
        return None;
    };
    match display.display(stats) {
        Ok(output) => Some(output),
        Err(err) => {
            warn!(run_id = %stats.run_id, error = %err, "stats chart skipped");
            None
        }
    }
}

fn doughnut_svg(stats: &RunStats, title: &str, caption: &str) -> String {
    let values = [
        stats.summary.valid,
        stats.summary.rejected,
        stats.summary.remaining,
    ];
    let total: u64 = values.iter().sum();
    let (cx, cy) = CENTER;

    let mut segments = String::new();
    if total == 0 {
        segments.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"#444444\" stroke-width=\"{:.2}\"/>",
            (OUTER_RADIUS + INNER_RADIUS) / 2.0,
            OUTER_RADIUS - INNER_RADIUS
        ));
    } else {
        let mut start = -FRAC_PI_2;
        for (value, (label, color)) in values.iter().zip(SEGMENTS) {
            if *value == 0 {
                continue;
            }
            let sweep = TAU * (*value as f64) / (total as f64);
            segments.push_str(&format!(
                "<path d=\"{}\" fill=\"{color}\" stroke=\"#0a0a15\" stroke-width=\"2\"><title>{label}: {value}</title></path>",
                ring_segment(start, sweep)
            ));
            start += sweep;
        }
    }

    let mut legend = String::new();
    for (row, (value, (label, color))) in values.iter().zip(SEGMENTS).enumerate() {
        let y = 350.0 + row as f64 * 18.0;
        legend.push_str(&format!(
            "<rect x=\"110\" y=\"{:.2}\" width=\"12\" height=\"12\" fill=\"{color}\" stroke=\"#ffd700\" stroke-width=\"0.5\"/><text x=\"130\" y=\"{:.2}\" font-family=\"monospace\" font-size=\"12\" fill=\"#e0e0e0\">{label}: {value}</text>",
            y - 10.0,
            y
        ));
    }

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\">\
<rect width=\"100%\" height=\"100%\" fill=\"#0a0a15\"/>\
<text x=\"{cx:.2}\" y=\"40\" text-anchor=\"middle\" font-family=\"Georgia, serif\" font-size=\"16\" font-weight=\"bold\" fill=\"#ffd700\">{}</text>\
{segments}\
<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"Georgia, serif\" font-size=\"28\" fill=\"#ffd700\">{}</text>\
{legend}\
<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"monospace\" font-size=\"11\" fill=\"#c0c0c0\">{}</text>\
</svg>",
        escape_xml(title),
        stats.summary.valid,
        HEIGHT - 12.0,
        escape_xml(caption)
    )
}

/// Annular sector from `start` spanning `sweep` radians, clockwise.
fn ring_segment(start: f64, sweep: f64) -> String {
    // A single arc command cannot close a full ring.
    if sweep >= TAU - 1e-9 {
        return format!(
            "{} {}",
            ring_segment(start, PI),
            ring_segment(start + PI, PI)
        );
    }

    let end = start + sweep;
    let large = u8::from(sweep > PI);
    let (ox0, oy0) = polar(OUTER_RADIUS, start);
    let (ox1, oy1) = polar(OUTER_RADIUS, end);
    let (ix1, iy1) = polar(INNER_RADIUS, end);
    let (ix0, iy0) = polar(INNER_RADIUS, start);
    format!(
        "M{ox0:.2} {oy0:.2} A{OUTER_RADIUS:.2} {OUTER_RADIUS:.2} 0 {large} 1 {ox1:.2} {oy1:.2} L{ix1:.2} {iy1:.2} A{INNER_RADIUS:.2} {INNER_RADIUS:.2} 0 {large} 0 {ix0:.2} {iy0:.2} Z"
    )
}

fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (
        CENTER.0 + radius * angle.cos(),
        CENTER.1 + radius * angle.sin(),
    )
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
