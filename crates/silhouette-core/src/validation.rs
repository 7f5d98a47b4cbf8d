use std::collections::BTreeSet;

use crate::constraints::ConstraintSet;
use crate::error::{Error, Result};

/// Validate internal consistency of a forbidden-combination set.
///
/// This checks:
/// - no combination is empty (an empty pattern would forbid every tuple)
/// - no combination is listed twice
pub fn validate_constraints(constraints: &ConstraintSet) -> Result<()> {
    let mut seen = BTreeSet::new();

    for (index, combo) in constraints.combos().iter().enumerate() {
        if combo.is_empty() {
            return Err(Error::InvalidConstraint(format!(
                "forbidden combination #{index} specifies no group"
            )));
        }

        let described = combo.describe();
        if !seen.insert(described.clone()) {
            return Err(Error::InvalidConstraint(format!(
                "duplicate forbidden combination: {described}"
            )));
        }
    }

    Ok(())
}
