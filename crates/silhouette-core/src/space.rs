use crate::candidate::Candidate;
use crate::constraints::ConstraintSet;
use crate::params::{Collar, Length, ParameterGroup, Shoulder, Sleeve, Waist};

/// Size of the full cartesian product of all group enumerations.
pub fn space_size() -> usize {
    ParameterGroup::ALL
        .iter()
        .map(|group| group.cardinality())
        .product()
}

/// Every candidate, in fixed group order with the sleeve varying fastest.
pub fn all_candidates() -> impl Iterator<Item = Candidate> {
    Shoulder::ALL.iter().flat_map(|&shoulder| {
        Collar::ALL.iter().flat_map(move |&collar| {
            Waist::ALL.iter().flat_map(move |&waist| {
                Length::ALL.iter().flat_map(move |&length| {
                    Sleeve::ALL.iter().map(move |&sleeve| Candidate {
                        shoulder,
                        collar,
                        waist,
                        length,
                        sleeve,
                    })
                })
            })
        })
    })
}

/// Number of candidates the constraint set leaves valid.
pub fn count_valid(constraints: &ConstraintSet) -> usize {
    all_candidates()
        .filter(|candidate| constraints.is_valid(candidate))
        .count()
}
