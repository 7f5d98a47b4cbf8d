use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Number of background palettes.
pub const PALETTE_COUNT: usize = 4;
/// Number of skirt archetypes.
pub const SKIRT_ARCHETYPE_COUNT: usize = 4;

/// Per-silhouette stylistic parameters derived from `(index, seed)`.
///
/// Every field stays inside a fixed range so that jitter never breaks the
/// geometric continuity of the figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualVariation {
    pub palette: usize,
    pub skirt: usize,
    pub fill_tone: usize,
    /// Added to the shoulder rule width, in `[-25, 25]`.
    pub shoulder_width_delta: f64,
    /// Added to the shoulder rule height, in `[-8, 8]`.
    pub shoulder_height_delta: f64,
    /// Vertical nudge of the shoulder line, one of `-4, 0, 4`.
    pub shoulder_top_delta: f64,
    /// Inset of the angular shoulder base, in `[8, 17]`.
    pub shoulder_angle: f64,
    /// Amplitude of the volume cap, in `[0.8, 1.55]`.
    pub volume_amp: f64,
    /// Extra depth of the draped shoulder curve, in `[0, 18]`.
    pub drape_depth: f64,
    /// Added to the torso half width, in `[-10, 10]`.
    pub bust_delta: f64,
    /// Extra hip width, in `[0, 15]`.
    pub hip_flare: f64,
    /// Added to the waist drop, in `[-10, 10]`.
    pub waist_delta: f64,
    /// Added to the skirt length, in `[-20, 20]`.
    pub length_delta: f64,
    /// Extra skirt flare, in `[0, 12]`.
    pub skirt_flare: f64,
    /// Multiplier of the asymmetric hem drop, one of `1.0, 1.5, 2.0`.
    pub asym_intensity: f64,
    /// Vertical slot of the asymmetric accent, in `0..3`.
    pub accent_slot: usize,
    /// Horizontal shift of the asymmetric accent, in `[-6, 6]`.
    pub accent_shift: f64,
    /// Multiplier of the sleeve height before clamping, in `[0.8, 1.3]`.
    pub sleeve_height_factor: f64,
    /// Added to the sleeve width, one of `-6, 0, 6`.
    pub sleeve_width_delta: f64,
    pub belt_thickness: f64,
}

impl VisualVariation {
    /// Derive the variation of the `index`-th silhouette of a batch.
    ///
    /// Palette and skirt archetype advance with the index and shift with the
    /// seed; the remaining jitter comes from a generator seeded by both.
    pub fn derive(index: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(variation_seed(seed, index));
        let index64 = index as u64;

        Self {
            palette: ((index64 + seed / 1000) % PALETTE_COUNT as u64) as usize,
            skirt: ((index64 + seed / 500) % SKIRT_ARCHETYPE_COUNT as u64) as usize,
            fill_tone: index % 3,
            shoulder_width_delta: rng.random_range(-25.0..=25.0),
            shoulder_height_delta: rng.random_range(-8.0..=8.0),
            shoulder_top_delta: pick(&[-4.0, 0.0, 4.0], &mut rng),
            shoulder_angle: rng.random_range(8.0..=17.0),
            volume_amp: rng.random_range(0.8..=1.55),
            drape_depth: rng.random_range(0.0..=18.0),
            bust_delta: rng.random_range(-10.0..=10.0),
            hip_flare: rng.random_range(0.0..=15.0),
            waist_delta: rng.random_range(-10.0..=10.0),
            length_delta: rng.random_range(-20.0..=20.0),
            skirt_flare: rng.random_range(0.0..=12.0),
            asym_intensity: pick(&[1.0, 1.5, 2.0], &mut rng),
            accent_slot: rng.random_range(0..3),
            accent_shift: rng.random_range(-6.0..=6.0),
            sleeve_height_factor: rng.random_range(0.8..=1.3),
            sleeve_width_delta: pick(&[-6.0, 0.0, 6.0], &mut rng),
            belt_thickness: 10.0 + (index % 3) as f64 * 2.0,
        }
    }
}

fn pick(values: &[f64], rng: &mut ChaCha8Rng) -> f64 {
    values[rng.random_range(0..values.len())]
}

fn variation_seed(seed: u64, index: usize) -> u64 {
    let mut hash = 0xcbf29ce484222325_u64;
    for byte in seed.to_le_bytes().into_iter().chain((index as u64).to_le_bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_variation() {
        assert_eq!(VisualVariation::derive(3, 42), VisualVariation::derive(3, 42));
        assert_ne!(VisualVariation::derive(3, 42), VisualVariation::derive(4, 42));
    }

    #[test]
    fn palette_and_skirt_follow_index_and_seed() {
        let variation = VisualVariation::derive(1, 2_500);
        assert_eq!(variation.palette, (1 + 2) % PALETTE_COUNT);
        assert_eq!(variation.skirt, (1 + 5) % SKIRT_ARCHETYPE_COUNT);
    }

    #[test]
    fn jitter_stays_in_range() {
        for seed in [0_u64, 1, 999, 1_700_000_000_000] {
            for index in 0..32 {
                let v = VisualVariation::derive(index, seed);
                assert!(v.palette < PALETTE_COUNT);
                assert!(v.skirt < SKIRT_ARCHETYPE_COUNT);
                assert!((-25.0..=25.0).contains(&v.shoulder_width_delta));
                assert!((-8.0..=8.0).contains(&v.shoulder_height_delta));
                assert!((8.0..=17.0).contains(&v.shoulder_angle));
                assert!((0.8..=1.55).contains(&v.volume_amp));
                assert!((0.0..=18.0).contains(&v.drape_depth));
                assert!((-10.0..=10.0).contains(&v.waist_delta));
                assert!((-20.0..=20.0).contains(&v.length_delta));
                assert!((0.8..=1.3).contains(&v.sleeve_height_factor));
                assert!(v.accent_slot < 3);
            }
        }
    }
}
