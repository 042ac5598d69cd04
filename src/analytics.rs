use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{
    AnalyticsSummary, FullSeasonEntry, HallOfFameEntry, PlacementDelta, Record, SeasonStat,
    SeasonWeekAverages, WeekAverage,
};
use crate::scoring::{mean, round2};
use crate::table::Table;

pub const LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsCategory {
    All,
    Robbed,
    Overachievers,
    Seasons,
    HallOfFame,
}

impl AnalyticsCategory {
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "robbed" => Self::Robbed,
            "overachievers" => Self::Overachievers,
            "seasons" | "season-stats" => Self::Seasons,
            "hall-of-fame" | "hof" => Self::HallOfFame,
            _ => Self::All,
        }
    }

    fn includes(self, section: Self) -> bool {
        self == Self::All || self == section
    }
}

pub fn summary(table: Option<&Table>, category: AnalyticsCategory) -> AnalyticsSummary {
    let Some(table) = table.filter(|t| !t.is_empty()) else {
        return AnalyticsSummary::default();
    };

    let mut summary = AnalyticsSummary::default();
    if category.includes(AnalyticsCategory::Robbed) {
        summary.robbed = robbed(table);
    }
    if category.includes(AnalyticsCategory::Overachievers) {
        summary.overachievers = overachievers(table);
    }
    if category.includes(AnalyticsCategory::Seasons) {
        summary.season_stats = season_stats(table);
    }
    if category.includes(AnalyticsCategory::HallOfFame) {
        summary.hall_of_fame = hall_of_fame(table);
    }
    summary
}

/// Known differences first, ordered by `order`; unknown ones trail in row order.
fn by_placement_diff(table: &Table, order: fn(i64, i64) -> Ordering) -> Vec<PlacementDelta> {
    let mut records: Vec<&Record> = table.records().iter().collect();
    records.sort_by(|a, b| match (a.placement_diff(), b.placement_diff()) {
        (Some(x), Some(y)) => order(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    records
        .into_iter()
        .take(LIST_LIMIT)
        .map(|r| PlacementDelta {
            name: r.name.clone(),
            season: r.season.into(),
            partner: r.partner.clone(),
            actual_placement: r.placement.into(),
            should_have_placed: r.should_have_placed.into(),
            diff: r.placement_diff().into(),
        })
        .collect()
}

pub fn robbed(table: &Table) -> Vec<PlacementDelta> {
    by_placement_diff(table, |x, y| y.cmp(&x))
}

pub fn overachievers(table: &Table) -> Vec<PlacementDelta> {
    by_placement_diff(table, |x, y| x.cmp(&y))
}

fn by_season(table: &Table) -> BTreeMap<u32, Vec<&Record>> {
    let mut seasons: BTreeMap<u32, Vec<&Record>> = BTreeMap::new();
    for record in table.records() {
        if let Some(season) = record.season {
            seasons.entry(season).or_default().push(record);
        }
    }
    seasons
}

pub fn season_stats(table: &Table) -> Vec<SeasonStat> {
    let mut stats: Vec<SeasonStat> = by_season(table)
        .into_iter()
        .filter_map(|(season, records)| {
            let average = mean(records.iter().map(|r| r.average_score))?;
            let winner = records
                .iter()
                .find(|r| r.placement == Some(1))
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());

            // First record wins a tie for the top average.
            let top = records.iter().copied().reduce(|best, r| {
                if r.average_score > best.average_score {
                    r
                } else {
                    best
                }
            })?;

            Some(SeasonStat {
                season,
                average_score: round2(average),
                winner,
                top_star: top.name.clone(),
                top_star_avg: round2(top.average_score),
            })
        })
        .collect();

    stats.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
    stats
}

pub fn hall_of_fame(table: &Table) -> Vec<HallOfFameEntry> {
    let mut records: Vec<&Record> = table.records().iter().collect();
    records.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));

    records
        .into_iter()
        .take(LIST_LIMIT)
        .map(|r| HallOfFameEntry {
            name: r.name.clone(),
            season: r.season.into(),
            average_score: round2(r.average_score),
            placement: r.placement.into(),
        })
        .collect()
}

fn positive_average(record: &Record, week: u32) -> Option<f64> {
    record
        .week(week)
        .and_then(|w| w.avg_judge_score)
        .filter(|score| *score > 0.0)
}

/// A season lasts until the last week in which anyone in it was scored.
pub fn full_season_leaders(table: &Table, limit: usize) -> Vec<FullSeasonEntry> {
    let mut entries: Vec<(f64, FullSeasonEntry)> = Vec::new();

    for (season, records) in by_season(table) {
        let length = records
            .iter()
            .flat_map(|r| r.weeks.iter())
            .filter(|w| w.avg_judge_score.is_some_and(|score| score > 0.0))
            .map(|w| w.week)
            .max();
        let Some(length) = length else {
            continue;
        };

        for record in records {
            let scores: Option<Vec<f64>> = (1..=length)
                .map(|week| positive_average(record, week))
                .collect();
            let Some(average) = scores.and_then(mean) else {
                continue;
            };
            entries.push((
                average,
                FullSeasonEntry {
                    name: record.name.clone(),
                    season,
                    average_score: round2(average),
                    weeks_completed: length,
                    placement: record.placement.into(),
                },
            ));
        }
    }

    entries.sort_by(|a, b| b.0.total_cmp(&a.0));
    entries
        .into_iter()
        .take(limit)
        .map(|(_, entry)| entry)
        .collect()
}

pub fn season_week_averages(table: &Table) -> Vec<SeasonWeekAverages> {
    let last_week = table
        .records()
        .iter()
        .flat_map(|r| r.weeks.iter().map(|w| w.week))
        .max()
        .unwrap_or(0);

    by_season(table)
        .into_iter()
        .map(|(season, records)| SeasonWeekAverages {
            season,
            weeks: (1..=last_week)
                .map(|week| WeekAverage {
                    week,
                    average: mean(records.iter().filter_map(|r| positive_average(r, week))),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reported;
    use crate::table::fixtures::row;

    fn sample_table() -> Table {
        Table::build(vec![
            // Season 1: Alice 1st by score but placed 3rd.
            row("Alice", Some(1), "P1", Some(3), &[(10.0, 30.0), (10.0, 30.0)]),
            row("Bob", Some(1), "P2", Some(1), &[(8.0, 24.0), (8.0, 24.0)]),
            row("Charlie", Some(1), "P3", Some(2), &[(9.0, 27.0), (8.0, 24.0)]),
            // Season 2: tie at the top, no winner recorded.
            row("Dana", Some(2), "P1", None, &[(7.0, 21.0), (7.0, 21.0)]),
            row("Eli", Some(2), "P2", Some(2), &[(7.0, 21.0), (0.0, 0.0)]),
        ])
    }

    #[test]
    fn robbed_puts_largest_shortfall_first() {
        let table = sample_table();
        let robbed = robbed(&table);
        assert_eq!(robbed.len(), 5);
        assert_eq!(robbed[0].name, "Alice");
        assert_eq!(robbed[0].diff, Reported::Value(2));
        assert_eq!(robbed[0].actual_placement, Reported::Value(3));
        assert_eq!(robbed[0].should_have_placed, Reported::Value(1));
        // Unknown difference trails the list.
        assert_eq!(robbed[4].name, "Dana");
        assert_eq!(robbed[4].diff, Reported::NotAvailable);
    }

    #[test]
    fn overachievers_put_largest_surplus_first() {
        let table = sample_table();
        let list = overachievers(&table);
        assert_eq!(list[0].name, "Bob");
        assert_eq!(list[0].diff, Reported::Value(-2));
        let diffs: Vec<Reported<i64>> = list.iter().map(|d| d.diff).collect();
        assert_eq!(
            diffs,
            vec![
                Reported::Value(-2),
                Reported::Value(0),
                Reported::Value(1),
                Reported::Value(2),
                Reported::NotAvailable,
            ]
        );
    }

    #[test]
    fn season_stats_report_winner_and_top_star() {
        let table = sample_table();
        let stats = season_stats(&table);
        assert_eq!(stats.len(), 2);

        let first = &stats[0];
        assert_eq!(first.season, 1);
        assert_eq!(first.average_score, 8.83);
        assert_eq!(first.winner, "Bob");
        assert_eq!(first.top_star, "Alice");
        assert_eq!(first.top_star_avg, 10.0);

        let second = &stats[1];
        assert_eq!(second.season, 2);
        assert_eq!(second.winner, "Unknown");
        assert_eq!(second.top_star, "Dana");
        assert_eq!(second.average_score, 7.0);
    }

    #[test]
    fn hall_of_fame_is_capped_and_ordered() {
        let rows = (0..14)
            .map(|i| {
                let avg = f64::from(i % 7) + 3.0;
                row(&format!("Star {i}"), Some(i / 5 + 1), "P", Some(1), &[(avg, avg * 3.0)])
            })
            .collect();
        let table = Table::build(rows);
        let fame = hall_of_fame(&table);
        assert_eq!(fame.len(), LIST_LIMIT);
        assert!(fame
            .windows(2)
            .all(|pair| pair[0].average_score >= pair[1].average_score));
        assert_eq!(fame[0].name, "Star 6");
        assert_eq!(fame[1].name, "Star 13");
        assert!(robbed(&table).len() <= LIST_LIMIT);
        assert!(overachievers(&table).len() <= LIST_LIMIT);
    }

    #[test]
    fn short_tables_list_every_record() {
        let table = sample_table();
        assert_eq!(hall_of_fame(&table).len(), 5);
        assert_eq!(overachievers(&table).len(), 5);
    }

    #[test]
    fn category_filters_sections() {
        let table = sample_table();
        let only_robbed = summary(Some(&table), AnalyticsCategory::Robbed);
        assert!(!only_robbed.robbed.is_empty());
        assert!(only_robbed.overachievers.is_empty());
        assert!(only_robbed.season_stats.is_empty());
        assert!(only_robbed.hall_of_fame.is_empty());

        let all = summary(Some(&table), AnalyticsCategory::All);
        let json = serde_json::to_value(&all).unwrap();
        for section in ["robbed", "overachievers", "season_stats", "hall_of_fame"] {
            assert!(json.get(section).is_some(), "missing {section}");
        }
    }

    #[test]
    fn unknown_category_falls_back_to_all() {
        assert_eq!(AnalyticsCategory::parse("bogus"), AnalyticsCategory::All);
        assert_eq!(AnalyticsCategory::parse(""), AnalyticsCategory::All);
        assert_eq!(AnalyticsCategory::parse("Robbed"), AnalyticsCategory::Robbed);
        assert_eq!(
            AnalyticsCategory::parse("hall_of_fame"),
            AnalyticsCategory::HallOfFame
        );
        assert_eq!(
            AnalyticsCategory::parse("season_stats"),
            AnalyticsCategory::Seasons
        );
    }

    #[test]
    fn empty_table_yields_empty_summary() {
        let table = Table::build(Vec::new());
        let json = serde_json::to_string(&summary(Some(&table), AnalyticsCategory::All)).unwrap();
        assert_eq!(json, "{}");
        assert_eq!(serde_json::to_string(&summary(None, AnalyticsCategory::All)).unwrap(), "{}");
    }

    #[test]
    fn full_season_leaders_need_every_week() {
        let table = sample_table();
        let leaders = full_season_leaders(&table, 10);
        let names: Vec<&str> = leaders.iter().map(|e| e.name.as_str()).collect();
        // Eli sat out week 2 of season 2.
        assert_eq!(names, vec!["Alice", "Charlie", "Bob", "Dana"]);
        assert_eq!(leaders[0].weeks_completed, 2);
        assert_eq!(leaders[1].average_score, 8.5);
        assert_eq!(leaders[3].placement, Reported::NotAvailable);

        assert_eq!(full_season_leaders(&table, 2).len(), 2);
    }

    #[test]
    fn full_season_order_uses_unrounded_means() {
        let table = Table::build(vec![
            row("Lower", Some(5), "P1", Some(1), &[(8.496, 25.0), (8.496, 25.0)]),
            row("Higher", Some(5), "P2", Some(2), &[(8.504, 25.5), (8.504, 25.5)]),
        ]);
        let names: Vec<String> = full_season_leaders(&table, 10)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Higher", "Lower"]);

        let top = full_season_leaders(&table, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Higher");
        assert_eq!(top[0].average_score, 8.5);
    }

    #[test]
    fn week_averages_skip_weeks_not_danced() {
        let table = sample_table();
        let averages = season_week_averages(&table);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].season, 1);
        assert_eq!(averages[0].weeks[0].average, Some(9.0));
        let week_two = averages[0].weeks[1].average.unwrap();
        assert!((week_two - 26.0 / 3.0).abs() < 1e-9);
        assert_eq!(averages[1].weeks[1].week, 2);
        assert_eq!(averages[1].weeks[1].average, Some(7.0));
    }
}
