use serde::Serialize;
use tracing::debug;

use silhouette_core::Candidate;

use crate::layers::{
    self, CANVAS_HEIGHT, CANVAS_WIDTH, ShoulderGeometry, SkirtGeometry, SleeveGeometry,
    TorsoGeometry,
};
use crate::scene::Scene;
use crate::svg::scene_to_svg;
use crate::variation::VisualVariation;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0;

/// Key measurements of a rendered figure, useful for layout checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SilhouetteGeometry {
    pub shoulder: ShoulderGeometry,
    pub torso: TorsoGeometry,
    pub skirt: SkirtGeometry,
    pub sleeves: Option<SleeveGeometry>,
}

/// A candidate drawn as a layered scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSilhouette {
    pub index: usize,
    pub seed: u64,
    pub candidate: Candidate,
    /// `"#n · labels"` with a one-based ordinal.
    pub title: String,
    /// Labels in group order, joined by `" | "`.
    pub description: String,
    pub variation: VisualVariation,
    pub geometry: SilhouetteGeometry,
    pub scene: Scene,
}

impl RenderedSilhouette {
    pub fn to_svg(&self) -> String {
        scene_to_svg(&self.scene, "")
    }

    /// SVG whose internal ids are unique to this silhouette.
    pub fn to_inline_svg(&self) -> String {
        scene_to_svg(&self.scene, &format!("s{}-", self.index))
    }
}

/// Render the `index`-th (zero-based) candidate of a batch.
///
/// Output is a pure function of `(candidate, index, seed)`.
pub fn render(candidate: &Candidate, index: usize, seed: Option<u64>) -> RenderedSilhouette {
    let seed = seed.unwrap_or(DEFAULT_SEED);
    render_with_variation(candidate, index, seed, VisualVariation::derive(index, seed))
}

/// Render with an explicit variation instead of deriving one.
pub fn render_with_variation(
    candidate: &Candidate,
    index: usize,
    seed: u64,
    variation: VisualVariation,
) -> RenderedSilhouette {
    let background = layers::background(&variation);
    let (shoulder, shoulder_layer) = layers::shoulders(candidate, &variation);
    let (torso, skirt, body_layer) = layers::torso_and_skirt(candidate, &shoulder, &variation);
    let sleeves = layers::sleeves(candidate, &shoulder, &torso, &variation);

    let mut scene_layers = vec![background, shoulder_layer, body_layer];
    let sleeve_geometry = sleeves.map(|(geometry, layer)| {
        scene_layers.push(layer);
        geometry
    });
    scene_layers.push(layers::frame(candidate, index));

    debug!(
        index,
        seed,
        candidate = %candidate.key(),
        palette = variation.palette,
        skirt = ?skirt.archetype,
        "silhouette rendered"
    );

    RenderedSilhouette {
        index,
        seed,
        candidate: *candidate,
        title: candidate.describe(index + 1),
        description: candidate.description(),
        variation,
        geometry: SilhouetteGeometry {
            shoulder,
            torso,
            skirt,
            sleeves: sleeve_geometry,
        },
        scene: Scene {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            layers: scene_layers,
        },
    }
}

/// Render a whole batch in order.
pub fn render_batch(candidates: &[Candidate], seed: Option<u64>) -> Vec<RenderedSilhouette> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| render(candidate, index, seed))
        .collect()
}
