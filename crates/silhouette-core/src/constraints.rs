use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::params::{Collar, Length, Shoulder, Sleeve, Waist};

/// Partial pattern over parameter groups; unspecified groups are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ForbiddenCombo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder: Option<Shoulder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collar: Option<Collar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<Waist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<Sleeve>,
}

impl ForbiddenCombo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shoulder(mut self, value: Shoulder) -> Self {
        self.shoulder = Some(value);
        self
    }

    pub fn collar(mut self, value: Collar) -> Self {
        self.collar = Some(value);
        self
    }

    pub fn waist(mut self, value: Waist) -> Self {
        self.waist = Some(value);
        self
    }

    pub fn length(mut self, value: Length) -> Self {
        self.length = Some(value);
        self
    }

    pub fn sleeve(mut self, value: Sleeve) -> Self {
        self.sleeve = Some(value);
        self
    }

    /// True when the candidate agrees on every specified group.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.shoulder.is_none_or(|value| value == candidate.shoulder)
            && self.collar.is_none_or(|value| value == candidate.collar)
            && self.waist.is_none_or(|value| value == candidate.waist)
            && self.length.is_none_or(|value| value == candidate.length)
            && self.sleeve.is_none_or(|value| value == candidate.sleeve)
    }

    /// Number of groups this pattern constrains.
    pub fn arity(&self) -> usize {
        self.parts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.arity() == 0
    }

    fn parts(&self) -> Vec<(&'static str, &'static str)> {
        let mut parts = Vec::new();
        if let Some(value) = self.shoulder {
            parts.push(("shoulder", value.as_str()));
        }
        if let Some(value) = self.collar {
            parts.push(("collar", value.as_str()));
        }
        if let Some(value) = self.waist {
            parts.push(("waist", value.as_str()));
        }
        if let Some(value) = self.length {
            parts.push(("length", value.as_str()));
        }
        if let Some(value) = self.sleeve {
            parts.push(("sleeve", value.as_str()));
        }
        parts
    }

    /// Compact `group=value` listing, e.g. `shoulder=volume, length=mini`.
    pub fn describe(&self) -> String {
        self.parts()
            .iter()
            .map(|(group, value)| format!("{group}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Forbidden combinations shipped with the rule table.
pub static BUILTIN_CONSTRAINTS: LazyLock<ConstraintSet> = LazyLock::new(|| {
    ConstraintSet::new(vec![
        ForbiddenCombo::new()
            .shoulder(Shoulder::Volume)
            .collar(Collar::Oversize)
            .length(Length::Mini),
        ForbiddenCombo::new()
            .shoulder(Shoulder::Fluid)
            .waist(Waist::Low)
            .sleeve(Sleeve::Sleeveless),
    ])
});

/// Set of forbidden combinations acting as the constraint validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ConstraintSet {
    combos: Vec<ForbiddenCombo>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        BUILTIN_CONSTRAINTS.clone()
    }
}

impl ConstraintSet {
    pub fn new(combos: Vec<ForbiddenCombo>) -> Self {
        Self { combos }
    }

    pub fn empty() -> Self {
        Self { combos: Vec::new() }
    }

    pub fn combos(&self) -> &[ForbiddenCombo] {
        &self.combos
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// A candidate is valid iff no forbidden combination fully matches it.
    pub fn is_valid(&self, candidate: &Candidate) -> bool {
        self.first_violation(candidate).is_none()
    }

    /// First matching combination, if any.
    pub fn first_violation(&self, candidate: &Candidate) -> Option<&ForbiddenCombo> {
        self.combos.iter().find(|combo| combo.matches(candidate))
    }
}
