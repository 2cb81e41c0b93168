//! The six coaching features, each bound to a prompt template and a sampling temperature.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coaching::prompts::{
    INJURY_RECOVERY_PROMPT_TEMPLATE, MENTAL_TRAINING_PROMPT_TEMPLATE, NUTRITION_PROMPT_TEMPLATE,
    SERVE_TRAINING_PROMPT_TEMPLATE, TACTICS_PROMPT_TEMPLATE, WORKOUT_PROMPT_TEMPLATE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Workout,
    #[serde(rename = "Injury Recovery")]
    InjuryRecovery,
    Tactics,
    Nutrition,
    #[serde(rename = "Mental Training")]
    MentalTraining,
    #[serde(rename = "Serve Training")]
    ServeTraining,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown coaching feature: {0}")]
pub struct UnknownFeature(pub String);

impl Feature {
    /// Display order of the feature buttons.
    pub const ALL: [Feature; 6] = [
        Self::Workout,
        Self::InjuryRecovery,
        Self::Tactics,
        Self::Nutrition,
        Self::MentalTraining,
        Self::ServeTraining,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Workout => "Workout",
            Self::InjuryRecovery => "Injury Recovery",
            Self::Tactics => "Tactics",
            Self::Nutrition => "Nutrition",
            Self::MentalTraining => "Mental Training",
            Self::ServeTraining => "Serve Training",
        }
    }

    /// URL-friendly form of the label, used in route paths.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::InjuryRecovery => "injury-recovery",
            Self::Tactics => "tactics",
            Self::Nutrition => "nutrition",
            Self::MentalTraining => "mental-training",
            Self::ServeTraining => "serve-training",
        }
    }

    /// Planning features run cool (0.3); tactics and mental training run warmer (0.7).
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Tactics | Self::MentalTraining => 0.7,
            _ => 0.3,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Workout => WORKOUT_PROMPT_TEMPLATE,
            Self::InjuryRecovery => INJURY_RECOVERY_PROMPT_TEMPLATE,
            Self::Tactics => TACTICS_PROMPT_TEMPLATE,
            Self::Nutrition => NUTRITION_PROMPT_TEMPLATE,
            Self::MentalTraining => MENTAL_TRAINING_PROMPT_TEMPLATE,
            Self::ServeTraining => SERVE_TRAINING_PROMPT_TEMPLATE,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the label ("Injury Recovery") or the slug ("injury-recovery"),
/// ignoring ASCII case.
impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s) || f.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}
