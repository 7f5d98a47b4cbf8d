use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the five design axes of a silhouette.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ParameterGroup {
    Shoulder,
    Collar,
    Waist,
    Length,
    Sleeve,
}

impl ParameterGroup {
    /// Fixed group order used for keys, descriptions and enumeration.
    pub const ALL: [ParameterGroup; 5] = [
        ParameterGroup::Shoulder,
        ParameterGroup::Collar,
        ParameterGroup::Waist,
        ParameterGroup::Length,
        ParameterGroup::Sleeve,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParameterGroup::Shoulder => "shoulder",
            ParameterGroup::Collar => "collar",
            ParameterGroup::Waist => "waist",
            ParameterGroup::Length => "length",
            ParameterGroup::Sleeve => "sleeve",
        }
    }

    /// Raw value names of this group's enumeration, in declaration order.
    pub fn values(self) -> Vec<&'static str> {
        match self {
            ParameterGroup::Shoulder => Shoulder::ALL.iter().map(|v| v.as_str()).collect(),
            ParameterGroup::Collar => Collar::ALL.iter().map(|v| v.as_str()).collect(),
            ParameterGroup::Waist => Waist::ALL.iter().map(|v| v.as_str()).collect(),
            ParameterGroup::Length => Length::ALL.iter().map(|v| v.as_str()).collect(),
            ParameterGroup::Sleeve => Sleeve::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }

    pub fn cardinality(self) -> usize {
        match self {
            ParameterGroup::Shoulder => Shoulder::ALL.len(),
            ParameterGroup::Collar => Collar::ALL.len(),
            ParameterGroup::Waist => Waist::ALL.len(),
            ParameterGroup::Length => Length::ALL.len(),
            ParameterGroup::Sleeve => Sleeve::ALL.len(),
        }
    }
}

impl fmt::Display for ParameterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterGroup {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "shoulder" => Ok(ParameterGroup::Shoulder),
            // "col" is the legacy short name of the collar control
            "collar" | "col" => Ok(ParameterGroup::Collar),
            "waist" => Ok(ParameterGroup::Waist),
            "length" => Ok(ParameterGroup::Length),
            "sleeve" => Ok(ParameterGroup::Sleeve),
            other => Err(Error::UnknownGroup(other.to_string())),
        }
    }
}

macro_rules! parameter_enum {
    (
        $(#[$meta:meta])*
        $name:ident in $group:expr => {
            $($variant:ident => $raw:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $raw)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const GROUP: ParameterGroup = $group;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $raw,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($raw => Ok($name::$variant),)+
                    other => Err(Error::UnknownParameterValue {
                        group: $group,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

parameter_enum! {
    /// Shoulder construction.
    Shoulder in ParameterGroup::Shoulder => {
        Sharp => "sharp",
        Volume => "volume",
        Fluid => "fluid",
    }
}

parameter_enum! {
    /// Collar / neckline treatment.
    Collar in ParameterGroup::Collar => {
        Asym => "asym",
        VNeck => "vneck",
        Oversize => "oversize",
    }
}

parameter_enum! {
    /// Waist placement.
    Waist in ParameterGroup::Waist => {
        High => "high",
        Low => "low",
        Marked => "marked",
    }
}

parameter_enum! {
    /// Skirt length.
    Length in ParameterGroup::Length => {
        Mini => "mini",
        Midi => "midi",
        Maxi => "maxi",
    }
}

parameter_enum! {
    /// Sleeve cut.
    Sleeve in ParameterGroup::Sleeve => {
        Sleeveless => "none",
        Short => "short",
        Long => "long",
    }
}
