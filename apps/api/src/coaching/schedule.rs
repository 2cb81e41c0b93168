//! Weekly training plan shown under every result.
//!
//! The table is fixed. The only input is the injury selection: anything other
//! than exactly {"None - Healthy"} adds a Notes column.

use serde::Serialize;

use crate::models::profile::{is_healthy, Injury};

pub const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MORNING: [&str; 7] = [
    "Groundstrokes",
    "Agility",
    "Match Play",
    "Strength",
    "Technique",
    "Tournament Sim",
    "Recovery",
];

const EVENING: [&str; 7] = [
    "Serve",
    "Tactics",
    "Video",
    "Yoga",
    "Hitting",
    "Competition",
    "Stretching",
];

const HOURS: [f32; 7] = [2.5, 2.5, 3.0, 2.0, 2.5, 3.5, 1.5];

const INTENSITY: [Intensity; 7] = [
    Intensity::High,
    Intensity::Medium,
    Intensity::High,
    Intensity::High,
    Intensity::Medium,
    Intensity::High,
    Intensity::Low,
];

const INJURY_NOTES: [&str; 7] = [
    "Low impact",
    "Light cardio",
    "Reduced load",
    "Safe strength",
    "Technique only",
    "Monitor pain",
    "Extra rest",
];

const BASE_COLUMNS: [&str; 5] = ["Day", "Morning", "Evening", "Hours", "Intensity"];
const NOTES_COLUMN: &str = "Notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intensity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub day: &'static str,
    pub morning: &'static str,
    pub evening: &'static str,
    pub hours: f32,
    pub intensity: Intensity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<ScheduleRow>,
}

pub fn build_schedule(injuries: &[Injury]) -> ScheduleTable {
    let with_notes = !is_healthy(injuries);

    let mut columns = BASE_COLUMNS.to_vec();
    if with_notes {
        columns.push(NOTES_COLUMN);
    }

    let rows = (0..DAYS.len())
        .map(|i| ScheduleRow {
            day: DAYS[i],
            morning: MORNING[i],
            evening: EVENING[i],
            hours: HOURS[i],
            intensity: INTENSITY[i],
            notes: with_notes.then_some(INJURY_NOTES[i]),
        })
        .collect();

    ScheduleTable { columns, rows }
}
