//! Player profile: the attributes collected by the profile form.
//!
//! Enum values serialize as the labels shown in the form ("Serve & Volley",
//! "None - Healthy", ...) so clients can post back exactly what they display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AGE_RANGE: (u32, u32) = (10, 25);
pub const SERVE_PCT_RANGE: (u32, u32) = (30, 85);
pub const DEFAULT_AGE: u32 = 16;
pub const DEFAULT_SERVE_PCT: u32 = 65;
/// Name substituted into prompts when the player leaves the field blank.
pub const DEFAULT_NAME: &str = "Player";

/// A closed set of form choices with human-readable labels.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Choice::label).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayingStyle {
    #[default]
    #[serde(rename = "Baseline Player")]
    BaselinePlayer,
    #[serde(rename = "Serve & Volley")]
    ServeAndVolley,
    #[serde(rename = "All-Court Player")]
    AllCourtPlayer,
    #[serde(rename = "Doubles Specialist")]
    DoublesSpecialist,
}

impl Choice for PlayingStyle {
    const ALL: &'static [Self] = &[
        Self::BaselinePlayer,
        Self::ServeAndVolley,
        Self::AllCourtPlayer,
        Self::DoublesSpecialist,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::BaselinePlayer => "Baseline Player",
            Self::ServeAndVolley => "Serve & Volley",
            Self::AllCourtPlayer => "All-Court Player",
            Self::DoublesSpecialist => "Doubles Specialist",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtSurface {
    #[default]
    Hard,
    Clay,
    Grass,
    Indoor,
}

impl Choice for CourtSurface {
    const ALL: &'static [Self] = &[Self::Hard, Self::Clay, Self::Grass, Self::Indoor];

    fn label(&self) -> &'static str {
        match self {
            Self::Hard => "Hard",
            Self::Clay => "Clay",
            Self::Grass => "Grass",
            Self::Indoor => "Indoor",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Competitive,
    Professional,
}

impl Choice for SkillLevel {
    const ALL: &'static [Self] = &[
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Competitive,
        Self::Professional,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Competitive => "Competitive",
            Self::Professional => "Professional",
        }
    }
}

/// Injury history tags. `Healthy` is the "no injuries" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Injury {
    #[serde(rename = "None - Healthy")]
    Healthy,
    Shoulder,
    Elbow,
    Wrist,
    Back,
    Knee,
    Ankle,
    Hip,
}

impl Choice for Injury {
    const ALL: &'static [Self] = &[
        Self::Healthy,
        Self::Shoulder,
        Self::Elbow,
        Self::Wrist,
        Self::Back,
        Self::Knee,
        Self::Ankle,
        Self::Hip,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "None - Healthy",
            Self::Shoulder => "Shoulder",
            Self::Elbow => "Elbow",
            Self::Wrist => "Wrist",
            Self::Back => "Back",
            Self::Knee => "Knee",
            Self::Ankle => "Ankle",
            Self::Hip => "Hip",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diet {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
    Pescatarian,
}

impl Choice for Diet {
    const ALL: &'static [Self] = &[Self::Omnivore, Self::Vegetarian, Self::Vegan, Self::Pescatarian];

    fn label(&self) -> &'static str {
        match self {
            Self::Omnivore => "Omnivore",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Pescatarian => "Pescatarian",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingGoal {
    #[default]
    Stamina,
    Power,
    Agility,
    Recovery,
    #[serde(rename = "Tournament Prep")]
    TournamentPrep,
    #[serde(rename = "Skill Development")]
    SkillDevelopment,
    #[serde(rename = "Mental Toughness")]
    MentalToughness,
}

impl Choice for TrainingGoal {
    const ALL: &'static [Self] = &[
        Self::Stamina,
        Self::Power,
        Self::Agility,
        Self::Recovery,
        Self::TournamentPrep,
        Self::SkillDevelopment,
        Self::MentalToughness,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Stamina => "Stamina",
            Self::Power => "Power",
            Self::Agility => "Agility",
            Self::Recovery => "Recovery",
            Self::TournamentPrep => "Tournament Prep",
            Self::SkillDevelopment => "Skill Development",
            Self::MentalToughness => "Mental Toughness",
        }
    }
}

/// Profile attributes that prompt templates may reference by placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Age,
    Position,
    Surface,
    Level,
    ServePct,
    Injuries,
    Diet,
    Goal,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        Self::Name,
        Self::Age,
        Self::Position,
        Self::Surface,
        Self::Level,
        Self::ServePct,
        Self::Injuries,
        Self::Diet,
        Self::Goal,
    ];

    /// The placeholder name, identical to the serialized field name.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Position => "position",
            Self::Surface => "surface",
            Self::Level => "level",
            Self::ServePct => "serve_pct",
            Self::Injuries => "injuries",
            Self::Diet => "diet",
            Self::Goal => "goal",
        }
    }

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Age => "Age",
            Self::Position => "Playing Style",
            Self::Surface => "Court Surface",
            Self::Level => "Skill Level",
            Self::ServePct => "First Serve %",
            Self::Injuries => "Injury History",
            Self::Diet => "Diet Type",
            Self::Goal => "Training Goal",
        }
    }

    pub fn from_placeholder(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.placeholder() == name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("age must be between 10 and 25, got {value}")]
    AgeOutOfRange { value: u32 },

    #[error("serve_pct must be between 30 and 85, got {value}")]
    ServePctOutOfRange { value: u32 },

    #[error("injuries must contain at least one entry (use \"None - Healthy\")")]
    NoInjuries,
}

/// The player profile. Missing fields deserialize to the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: Option<String>,
    pub age: u32,
    pub position: PlayingStyle,
    pub surface: CourtSurface,
    pub level: SkillLevel,
    pub serve_pct: u32,
    pub injuries: Vec<Injury>,
    pub diet: Diet,
    pub goal: TrainingGoal,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: None,
            age: DEFAULT_AGE,
            position: PlayingStyle::default(),
            surface: CourtSurface::default(),
            level: SkillLevel::default(),
            serve_pct: DEFAULT_SERVE_PCT,
            injuries: vec![Injury::Healthy],
            diet: Diet::default(),
            goal: TrainingGoal::default(),
        }
    }
}

impl Profile {
    /// Checks range constraints and collapses duplicate injuries, keeping
    /// the first occurrence of each so selection order survives.
    pub fn validated(mut self) -> Result<Self, ProfileError> {
        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&self.age) {
            return Err(ProfileError::AgeOutOfRange { value: self.age });
        }
        if !(SERVE_PCT_RANGE.0..=SERVE_PCT_RANGE.1).contains(&self.serve_pct) {
            return Err(ProfileError::ServePctOutOfRange {
                value: self.serve_pct,
            });
        }
        if self.injuries.is_empty() {
            return Err(ProfileError::NoInjuries);
        }

        let mut seen = Vec::with_capacity(self.injuries.len());
        self.injuries.retain(|injury| {
            if seen.contains(injury) {
                false
            } else {
                seen.push(*injury);
                true
            }
        });

        Ok(self)
    }

    /// The entered name, or "Player" when blank.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_NAME,
        }
    }

    /// Whether the player entered a name at all.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Injury labels joined with ", " in selection order.
    pub fn injuries_joined(&self) -> String {
        self.injuries
            .iter()
            .map(Choice::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The text substituted for `field` when rendering a prompt.
    pub fn field_value(&self, field: ProfileField) -> String {
        match field {
            ProfileField::Name => self.display_name().to_string(),
            ProfileField::Age => self.age.to_string(),
            ProfileField::Position => self.position.label().to_string(),
            ProfileField::Surface => self.surface.label().to_string(),
            ProfileField::Level => self.level.label().to_string(),
            ProfileField::ServePct => self.serve_pct.to_string(),
            ProfileField::Injuries => self.injuries_joined(),
            ProfileField::Diet => self.diet.label().to_string(),
            ProfileField::Goal => self.goal.label().to_string(),
        }
    }
}

/// True only when the injury selection is exactly {"None - Healthy"}.
pub fn is_healthy(injuries: &[Injury]) -> bool {
    injuries == [Injury::Healthy]
}
