use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{Collar, Length, ParameterGroup, Shoulder, Sleeve, Waist};

/// Complete assignment of one value per parameter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    pub shoulder: Shoulder,
    pub collar: Collar,
    pub waist: Waist,
    pub length: Length,
    pub sleeve: Sleeve,
}

/// Selection used when a group has no explicit value.
pub const DEFAULT_CANDIDATE: Candidate = Candidate {
    shoulder: Shoulder::Sharp,
    collar: Collar::Asym,
    waist: Waist::High,
    length: Length::Midi,
    sleeve: Sleeve::Sleeveless,
};

impl Default for Candidate {
    fn default() -> Self {
        DEFAULT_CANDIDATE
    }
}

impl Candidate {
    /// Build a candidate from raw per-group selections.
    ///
    /// Groups with no selection (or an empty one) keep the default value;
    /// any present value outside its enumeration is an error.
    pub fn from_selection<'a, I>(selection: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ParameterGroup, Option<&'a str>)>,
    {
        let mut candidate = DEFAULT_CANDIDATE;
        for (group, value) in selection {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                candidate.set(group, value)?;
            }
        }
        Ok(candidate)
    }

    /// Raw value name chosen for `group`.
    pub fn value(&self, group: ParameterGroup) -> &'static str {
        match group {
            ParameterGroup::Shoulder => self.shoulder.as_str(),
            ParameterGroup::Collar => self.collar.as_str(),
            ParameterGroup::Waist => self.waist.as_str(),
            ParameterGroup::Length => self.length.as_str(),
            ParameterGroup::Sleeve => self.sleeve.as_str(),
        }
    }

    /// Replace one group's value from its raw name.
    pub fn set(&mut self, group: ParameterGroup, value: &str) -> Result<()> {
        match group {
            ParameterGroup::Shoulder => self.shoulder = value.parse()?,
            ParameterGroup::Collar => self.collar = value.parse()?,
            ParameterGroup::Waist => self.waist = value.parse()?,
            ParameterGroup::Length => self.length = value.parse()?,
            ParameterGroup::Sleeve => self.sleeve = value.parse()?,
        }
        Ok(())
    }

    pub fn key(&self) -> CandidateKey {
        let parts = ParameterGroup::ALL.map(|group| self.value(group));
        CandidateKey(parts.join("|"))
    }

    /// Labels in fixed group order.
    pub fn labels(&self) -> [&'static str; 5] {
        [
            self.shoulder.label(),
            self.collar.label(),
            self.waist.label(),
            self.length.label(),
            self.sleeve.label(),
        ]
    }

    pub fn description(&self) -> String {
        self.labels().join(" | ")
    }

    /// Numbered description, `index` is 1-based.
    pub fn describe(&self, index: usize) -> String {
        format!("#{index} · {}", self.description())
    }

    /// First letters of the shoulder and collar values, upper-cased.
    pub fn abbreviation(&self) -> String {
        [self.shoulder.as_str(), self.collar.as_str()]
            .iter()
            .filter_map(|value| value.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Canonical identity of a candidate, used only for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateKey(String);

impl CandidateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
