//! Static rule table: geometry metrics and display labels per parameter value.
//!
//! Metrics are canonical units on a 300x600 drawing. They are read-only and
//! resolved through the typed enumerations, so an in-domain value always has
//! an entry; the string-keyed `metrics_of` / `label_of` helpers exist for
//! callers that only hold raw selections.

use serde::Serialize;

use crate::error::Result;
use crate::params::{Collar, Length, ParameterGroup, Shoulder, Sleeve, Waist};

/// Shoulder block size before jitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShoulderRule {
    pub width: f64,
    pub height: f64,
}

/// Collar offsets and the optional modifiers some collars carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollarRule {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Hem drop differential applied by asymmetric collars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop: Option<f64>,
    /// Neckline cut depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Extra shoulder width (and a fixed height bonus) for enveloping collars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<f64>,
}

/// Waist line placement, measured down from the torso top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaistRule {
    pub drop: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<f64>,
    pub belt: bool,
}

/// Skirt length measured down from the waist line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthRule {
    pub length: f64,
}

/// Sleeve size plus the plausible height band jitter is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleeveRule {
    pub width: f64,
    pub height: f64,
    pub min_height: f64,
    pub max_height: f64,
}

/// Rule entry for any (group, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum RuleEntry {
    Shoulder(ShoulderRule),
    Collar(CollarRule),
    Waist(WaistRule),
    Length(LengthRule),
    /// `None` for sleeveless.
    Sleeve { rule: Option<SleeveRule> },
}

impl Shoulder {
    pub fn rule(self) -> ShoulderRule {
        match self {
            Shoulder::Sharp => ShoulderRule {
                width: 90.0,
                height: 16.0,
            },
            Shoulder::Volume => ShoulderRule {
                width: 180.0,
                height: 50.0,
            },
            Shoulder::Fluid => ShoulderRule {
                width: 70.0,
                height: 28.0,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shoulder::Sharp => "Sharp shoulders",
            Shoulder::Volume => "Volume shoulders",
            Shoulder::Fluid => "Fluid shoulders",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            Shoulder::Sharp => "Structural tension",
            Shoulder::Volume => "Architectural volume",
            Shoulder::Fluid => "Organic drape",
        }
    }
}

impl Collar {
    pub fn rule(self) -> CollarRule {
        match self {
            Collar::Asym => CollarRule {
                offset_x: 12.0,
                offset_y: 8.0,
                drop: Some(40.0),
                depth: None,
                expand: None,
            },
            Collar::VNeck => CollarRule {
                offset_x: 0.0,
                offset_y: 0.0,
                drop: None,
                depth: Some(40.0),
                expand: None,
            },
            Collar::Oversize => CollarRule {
                offset_x: -8.0,
                offset_y: -8.0,
                drop: None,
                depth: None,
                expand: Some(24.0),
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collar::Asym => "Asymmetric collar",
            Collar::VNeck => "V-neck collar",
            Collar::Oversize => "Oversize collar",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            Collar::Asym => "Bold asymmetry",
            Collar::VNeck => "Clean line",
            Collar::Oversize => "Generous wrap",
        }
    }
}

impl Waist {
    pub fn rule(self) -> WaistRule {
        match self {
            Waist::High => WaistRule {
                drop: 24.0,
                curve: None,
                belt: false,
            },
            Waist::Low => WaistRule {
                drop: 94.0,
                curve: None,
                belt: false,
            },
            Waist::Marked => WaistRule {
                drop: 54.0,
                curve: Some(18.0),
                belt: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Waist::High => "High waist",
            Waist::Low => "Low waist",
            Waist::Marked => "Marked waist",
        }
    }
}

impl Length {
    pub fn rule(self) -> LengthRule {
        match self {
            Length::Mini => LengthRule { length: 140.0 },
            Length::Midi => LengthRule { length: 230.0 },
            Length::Maxi => LengthRule { length: 320.0 },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Length::Mini => "Mini length",
            Length::Midi => "Midi length",
            Length::Maxi => "Maxi length",
        }
    }
}

impl Sleeve {
    pub fn rule(self) -> Option<SleeveRule> {
        match self {
            Sleeve::Sleeveless => None,
            Sleeve::Short => Some(SleeveRule {
                width: 36.0,
                height: 80.0,
                min_height: 70.0,
                max_height: 90.0,
            }),
            Sleeve::Long => Some(SleeveRule {
                width: 30.0,
                height: 230.0,
                min_height: 200.0,
                max_height: 250.0,
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sleeve::Sleeveless => "Sleeveless",
            Sleeve::Short => "Short sleeves",
            Sleeve::Long => "Long sleeves",
        }
    }
}

/// Look up the rule entry for a raw (group, value) pair.
pub fn metrics_of(group: ParameterGroup, value: &str) -> Result<RuleEntry> {
    let entry = match group {
        ParameterGroup::Shoulder => RuleEntry::Shoulder(value.parse::<Shoulder>()?.rule()),
        ParameterGroup::Collar => RuleEntry::Collar(value.parse::<Collar>()?.rule()),
        ParameterGroup::Waist => RuleEntry::Waist(value.parse::<Waist>()?.rule()),
        ParameterGroup::Length => RuleEntry::Length(value.parse::<Length>()?.rule()),
        ParameterGroup::Sleeve => RuleEntry::Sleeve {
            rule: value.parse::<Sleeve>()?.rule(),
        },
    };
    Ok(entry)
}

/// Display label for a raw (group, value) pair; unknown values label themselves.
pub fn label_of(group: ParameterGroup, value: &str) -> &str {
    let label: Option<&str> = match group {
        ParameterGroup::Shoulder => value.parse::<Shoulder>().ok().map(Shoulder::label),
        ParameterGroup::Collar => value.parse::<Collar>().ok().map(Collar::label),
        ParameterGroup::Waist => value.parse::<Waist>().ok().map(Waist::label),
        ParameterGroup::Length => value.parse::<Length>().ok().map(Length::label),
        ParameterGroup::Sleeve => value.parse::<Sleeve>().ok().map(Sleeve::label),
    };
    label.unwrap_or(value)
}

/// Short style statement for a shoulder/collar pairing.
pub fn style_signature(shoulder: Shoulder, collar: Collar) -> String {
    format!(
        "{} + {}: couture signature.",
        shoulder.style(),
        collar.style()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn metrics_resolve_for_raw_values() {
        let entry = metrics_of(ParameterGroup::Waist, "marked").expect("marked waist");
        match entry {
            RuleEntry::Waist(rule) => assert!(rule.belt),
            other => panic!("unexpected entry {other:?}"),
        }

        let sleeve = metrics_of(ParameterGroup::Sleeve, "none").expect("sleeveless");
        assert_eq!(sleeve, RuleEntry::Sleeve { rule: None });
    }

    #[test]
    fn metrics_fail_for_unknown_values() {
        let err = metrics_of(ParameterGroup::Shoulder, "boxy").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownParameterValue {
                group: ParameterGroup::Shoulder,
                ..
            }
        ));
    }

    #[test]
    fn labels_fall_back_to_raw_value() {
        assert_eq!(label_of(ParameterGroup::Collar, "vneck"), "V-neck collar");
        assert_eq!(label_of(ParameterGroup::Collar, "mandarin"), "mandarin");
    }

    #[test]
    fn only_enveloping_collar_expands() {
        assert_eq!(Collar::Oversize.rule().expand, Some(24.0));
        assert!(Collar::Asym.rule().expand.is_none());
        assert!(Collar::Asym.rule().drop.is_some());
    }

    #[test]
    fn sleeve_bands_contain_nominal_height() {
        for sleeve in Sleeve::ALL {
            if let Some(rule) = sleeve.rule() {
                assert!(rule.min_height <= rule.height && rule.height <= rule.max_height);
            }
        }
    }

    #[test]
    fn style_signature_combines_both_phrases() {
        let signature = style_signature(Shoulder::Fluid, Collar::Oversize);
        assert_eq!(signature, "Organic drape + Generous wrap: couture signature.");
    }
}
