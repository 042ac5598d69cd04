use crate::models::WeekScores;

/// Weeks with a zero or missing average were not danced and are skipped.
pub fn average_score(weeks: &[WeekScores]) -> f64 {
    mean(
        weeks
            .iter()
            .filter_map(|w| w.avg_judge_score)
            .filter(|score| *score > 0.0),
    )
    .unwrap_or(0.0)
}

/// Largest weekly total. Zero-scored weeks take part in the maximum.
pub fn highest_score(weeks: &[WeekScores]) -> f64 {
    weeks
        .iter()
        .map(|w| w.total_judge_score.unwrap_or(0.0))
        .fold(0.0, f64::max)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Running mean, so large finite inputs never overflow to infinity.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut average: Option<f64> = None;
    for (count, value) in values.into_iter().enumerate() {
        let current = average.unwrap_or(0.0);
        average = Some(current + (value - current) / (count + 1) as f64);
    }
    average
}
