//! Layered drawing of silhouette candidates.
//!
//! A candidate becomes a [`Scene`]: background, shoulders, torso and skirt,
//! sleeves and frame, each layer built from the rule metrics plus a bounded
//! per-silhouette [`VisualVariation`]. Scenes are replayed onto any
//! [`DrawingSurface`]; the crate ships an SVG surface and an HTML lookbook
//! exporter.

pub mod errors;
pub mod export;
pub mod layers;
pub mod render;
pub mod scene;
pub mod surface;
pub mod svg;
pub mod variation;

pub use errors::ExportError;
pub use export::{
    ExportFormat, HtmlLookbook, LookbookExporter, PagePlacement, exporter_for, place_on_page,
};
pub use layers::{
    CANVAS_HEIGHT, CANVAS_WIDTH, ShoulderArchetype, ShoulderGeometry, SkirtArchetype,
    SkirtGeometry, SleeveGeometry, TorsoGeometry,
};
pub use render::{
    DEFAULT_SEED, RenderedSilhouette, SilhouetteGeometry, render, render_batch,
    render_with_variation,
};
pub use scene::{Layer, LayerKind, Scene, Shape};
pub use surface::{DrawingSurface, replay};
pub use svg::{SvgSurface, scene_to_svg};
pub use variation::VisualVariation;
