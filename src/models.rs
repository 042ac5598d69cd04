use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekScores {
    pub week: u32,
    pub avg_judge_score: Option<f64>,
    pub total_judge_score: Option<f64>,
    /// Indexed by judge number minus one.
    pub judge_scores: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct RawRecord {
    pub name: String,
    pub season: Option<u32>,
    pub partner: String,
    pub placement: Option<u32>,
    pub results: String,
    pub weeks: Vec<WeekScores>,
}

#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub season: Option<u32>,
    pub partner: String,
    pub placement: Option<u32>,
    pub results: String,
    pub weeks: Vec<WeekScores>,
    pub average_score: f64,
    pub highest_score: f64,
    /// `None` only when the season itself is unusable.
    pub should_have_placed: Option<u32>,
}

impl Record {
    pub fn placement_diff(&self) -> Option<i64> {
        match (self.placement, self.should_have_placed) {
            (Some(actual), Some(deserved)) => Some(i64::from(actual) - i64::from(deserved)),
            _ => None,
        }
    }

    pub fn week(&self, week: u32) -> Option<&WeekScores> {
        self.weeks.iter().find(|w| w.week == week)
    }
}

/// A value that may be missing from the source data, serialized as `"N/A"` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reported<T> {
    Value(T),
    NotAvailable,
}

impl<T> From<Option<T>> for Reported<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Reported::Value(v),
            None => Reported::NotAvailable,
        }
    }
}

impl<T: Serialize> Serialize for Reported<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reported::Value(v) => v.serialize(serializer),
            Reported::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Reported<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reported::Value(v) => fmt::Display::fmt(v, f),
            Reported::NotAvailable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dance {
    pub week: u32,
    pub total_score: f64,
    pub judges_scores: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContestantDetail {
    pub name: String,
    pub season: Reported<u32>,
    pub partner: String,
    pub average_score: f64,
    pub highest_score: f64,
    pub actual_placement: Reported<u32>,
    pub should_have_placed: Reported<u32>,
    pub dances: Vec<Dance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProSummary {
    pub name: String,
    pub wins: usize,
    pub average_placement: f64,
    pub should_have_won: usize,
    pub seasons_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProSeason {
    pub season: Reported<u32>,
    pub partner: String,
    pub average_score: f64,
    pub placement: Reported<u32>,
    pub placement_text: String,
    pub should_have_placed: Reported<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProDetail {
    #[serde(flatten)]
    pub summary: ProSummary,
    pub seasons: Vec<ProSeason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementDelta {
    pub name: String,
    pub season: Reported<u32>,
    pub partner: String,
    pub actual_placement: Reported<u32>,
    pub should_have_placed: Reported<u32>,
    pub diff: Reported<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonStat {
    pub season: u32,
    pub average_score: f64,
    pub winner: String,
    pub top_star: String,
    pub top_star_avg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HallOfFameEntry {
    pub name: String,
    pub season: Reported<u32>,
    pub average_score: f64,
    pub placement: Reported<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticsSummary {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub robbed: Vec<PlacementDelta>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overachievers: Vec<PlacementDelta>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub season_stats: Vec<SeasonStat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hall_of_fame: Vec<HallOfFameEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FullSeasonEntry {
    pub name: String,
    pub season: u32,
    pub average_score: f64,
    pub weeks_completed: u32,
    pub placement: Reported<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekAverage {
    pub week: u32,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonWeekAverages {
    pub season: u32,
    pub weeks: Vec<WeekAverage>,
}
