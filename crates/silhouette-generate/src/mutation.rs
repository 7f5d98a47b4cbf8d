use rand::Rng;

use silhouette_core::{Candidate, Collar, Length, ParameterGroup, Shoulder, Sleeve, Waist};

use crate::model::MutationRates;

/// Derive a candidate from `base`, redrawing each group independently.
///
/// A redrawn group takes a uniformly random value from its enumeration, so it
/// may land on the base value again.
pub fn mutate<R: Rng + ?Sized>(
    base: &Candidate,
    attempt: u32,
    max_attempts: u32,
    rates: &MutationRates,
    rng: &mut R,
) -> Candidate {
    let mut candidate = *base;
    let roll = |group: ParameterGroup, rng: &mut R| {
        rng.random_bool(rates.rate_for(group, attempt, max_attempts))
    };

    if roll(ParameterGroup::Shoulder, rng) {
        candidate.shoulder = pick(Shoulder::ALL, rng);
    }
    if roll(ParameterGroup::Collar, rng) {
        candidate.collar = pick(Collar::ALL, rng);
    }
    if roll(ParameterGroup::Waist, rng) {
        candidate.waist = pick(Waist::ALL, rng);
    }
    if roll(ParameterGroup::Length, rng) {
        candidate.length = pick(Length::ALL, rng);
    }
    if roll(ParameterGroup::Sleeve, rng) {
        candidate.sleeve = pick(Sleeve::ALL, rng);
    }

    candidate
}

fn pick<T: Copy, R: Rng + ?Sized>(values: &[T], rng: &mut R) -> T {
    values[rng.random_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn zero_rates_keep_the_base() {
        let rates = MutationRates {
            group_rate: 0.0,
            waist_rate: 0.0,
            waist_ramp: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let base = Candidate::default();
        for attempt in 0..20 {
            assert_eq!(mutate(&base, attempt, 20, &rates, &mut rng), base);
        }
    }

    #[test]
    fn default_rates_explore_the_space() {
        let rates = MutationRates::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let base = Candidate::default();
        let changed = (0..60)
            .map(|attempt| mutate(&base, attempt, 60, &rates, &mut rng))
            .filter(|candidate| *candidate != base)
            .count();
        assert!(changed > 30, "only {changed} of 60 mutations moved away from base");
    }

    #[test]
    fn same_seed_same_mutation() {
        let rates = MutationRates::default();
        let base = Candidate::default();
        let first = mutate(&base, 5, 60, &rates, &mut ChaCha8Rng::seed_from_u64(9));
        let second = mutate(&base, 5, 60, &rates, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
