//! Axum route handlers for the stateless coaching endpoints: feature
//! catalogue, form options, schedule and info panels.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::coaching::features::Feature;
use crate::coaching::info::{
    ABOUT_TEXT, ABOUT_TITLE, APP_TAGLINE, APP_TITLE, DISCLAIMER_TEXT, DISCLAIMER_TITLE,
};
use crate::coaching::schedule::{build_schedule, ScheduleTable};
use crate::errors::AppError;
use crate::models::profile::{
    Choice, CourtSurface, Diet, Injury, PlayingStyle, Profile, ProfileField, SkillLevel,
    TrainingGoal, AGE_RANGE, SERVE_PCT_RANGE,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FeatureSummary {
    pub feature: Feature,
    pub slug: &'static str,
    pub temperature: f32,
    pub placeholders: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Range,
    Select,
    MultiSelect,
}

#[derive(Debug, Serialize)]
pub struct FieldOptions {
    pub field: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    pub default: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub title: &'static str,
    pub tagline: &'static str,
    pub about: Panel,
    pub disclaimer: Panel,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Comma-separated injury labels, e.g. `Shoulder,Knee`.
    pub injuries: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/features
///
/// The six coaching features in button order, with the profile fields each one uses.
pub async fn handle_list_features(State(state): State<AppState>) -> Json<Vec<FeatureSummary>> {
    let registry = state.dispatcher.registry();
    let features = Feature::ALL
        .into_iter()
        .map(|feature| FeatureSummary {
            feature,
            slug: feature.slug(),
            temperature: feature.temperature(),
            placeholders: registry
                .get(feature)
                .fields()
                .iter()
                .map(ProfileField::placeholder)
                .collect(),
        })
        .collect();
    Json(features)
}

/// GET /api/v1/profile/options
///
/// Everything a client needs to draw the profile form.
pub async fn handle_profile_options() -> Json<Vec<FieldOptions>> {
    Json(profile_form())
}

/// GET /api/v1/schedule?injuries=Shoulder,Knee
///
/// Missing or empty `injuries` means healthy.
pub async fn handle_schedule(
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleTable>, AppError> {
    let injuries = parse_injuries(query.injuries.as_deref().unwrap_or_default())?;
    Ok(Json(build_schedule(&injuries)))
}

/// GET /api/v1/info
pub async fn handle_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        title: APP_TITLE,
        tagline: APP_TAGLINE,
        about: Panel {
            title: ABOUT_TITLE,
            text: ABOUT_TEXT,
        },
        disclaimer: Panel {
            title: DISCLAIMER_TITLE,
            text: DISCLAIMER_TEXT,
        },
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_injuries(raw: &str) -> Result<Vec<Injury>, AppError> {
    let mut injuries = Vec::new();
    for label in raw.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        let injury = Injury::from_label(label)
            .ok_or_else(|| AppError::Validation(format!("Unknown injury: {label}")))?;
        if !injuries.contains(&injury) {
            injuries.push(injury);
        }
    }
    if injuries.is_empty() {
        injuries.push(Injury::Healthy);
    }
    Ok(injuries)
}

fn select<C: Choice + Serialize>(field: ProfileField, default: C) -> FieldOptions {
    FieldOptions {
        field: field.placeholder(),
        label: field.label(),
        input: InputKind::Select,
        min: None,
        max: None,
        options: C::labels(),
        default: serde_json::json!(default),
    }
}

fn range(field: ProfileField, (min, max): (u32, u32), default: u32) -> FieldOptions {
    FieldOptions {
        field: field.placeholder(),
        label: field.label(),
        input: InputKind::Range,
        min: Some(min),
        max: Some(max),
        options: Vec::new(),
        default: serde_json::json!(default),
    }
}

fn profile_form() -> Vec<FieldOptions> {
    let defaults = Profile::default();
    vec![
        FieldOptions {
            field: ProfileField::Name.placeholder(),
            label: ProfileField::Name.label(),
            input: InputKind::Text,
            min: None,
            max: None,
            options: Vec::new(),
            default: serde_json::Value::Null,
        },
        range(ProfileField::Age, AGE_RANGE, defaults.age),
        select::<PlayingStyle>(ProfileField::Position, defaults.position),
        select::<CourtSurface>(ProfileField::Surface, defaults.surface),
        select::<SkillLevel>(ProfileField::Level, defaults.level),
        range(ProfileField::ServePct, SERVE_PCT_RANGE, defaults.serve_pct),
        FieldOptions {
            field: ProfileField::Injuries.placeholder(),
            label: ProfileField::Injuries.label(),
            input: InputKind::MultiSelect,
            min: None,
            max: None,
            options: Injury::labels(),
            default: serde_json::json!(defaults.injuries),
        },
        select::<Diet>(ProfileField::Diet, defaults.diet),
        select::<TrainingGoal>(ProfileField::Goal, defaults.goal),
    ]
}
