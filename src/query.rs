use std::collections::HashMap;

use crate::models::{ContestantDetail, Dance, ProDetail, ProSeason, ProSummary, Record};
use crate::scoring::{mean, round2};
use crate::table::Table;

/// Weeks at or beyond this number are left out of the dance breakdown.
pub const DANCE_WEEK_LIMIT: u32 = 12;

// An empty query matches nothing.
fn matches(haystack: &str, query: &str) -> bool {
    !query.is_empty() && haystack.to_lowercase().contains(&query.to_lowercase())
}

pub fn contestant_names(table: &Table, query: &str) -> Vec<String> {
    table
        .records()
        .iter()
        .filter(|r| matches(&r.name, query))
        .map(|r| r.name.clone())
        .collect()
}

pub fn search_contestants(table: &Table, query: &str) -> Vec<ContestantDetail> {
    table
        .records()
        .iter()
        .filter(|r| matches(&r.name, query))
        .map(contestant_detail)
        .collect()
}

fn contestant_detail(record: &Record) -> ContestantDetail {
    let dances = record
        .weeks
        .iter()
        .filter(|w| w.week < DANCE_WEEK_LIMIT)
        .filter_map(|w| {
            let total = w.total_judge_score.filter(|t| *t > 0.0)?;
            Some(Dance {
                week: w.week,
                total_score: total,
                judges_scores: w.judge_scores.iter().flatten().copied().collect(),
            })
        })
        .collect();

    ContestantDetail {
        name: record.name.clone(),
        season: record.season.into(),
        partner: record.partner.clone(),
        average_score: round2(record.average_score),
        highest_score: record.highest_score,
        actual_placement: record.placement.into(),
        should_have_placed: record.should_have_placed.into(),
        dances,
    }
}

fn by_partner(table: &Table) -> Vec<(&str, Vec<&Record>)> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Record>> = HashMap::new();
    for record in table.records() {
        let partner = record.partner.as_str();
        groups
            .entry(partner)
            .or_insert_with(|| {
                order.push(partner);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .map(|partner| (partner, groups.remove(partner).unwrap_or_default()))
        .collect()
}

fn pro_summary(partner: &str, records: &[&Record]) -> ProSummary {
    let average_placement = mean(
        records
            .iter()
            .filter_map(|r| r.placement)
            .map(f64::from),
    )
    .map(round2)
    .unwrap_or(0.0);

    ProSummary {
        name: partner.to_string(),
        wins: records.iter().filter(|r| r.placement == Some(1)).count(),
        average_placement,
        should_have_won: records
            .iter()
            .filter(|r| r.should_have_placed == Some(1))
            .count(),
        seasons_count: records.len(),
    }
}

pub fn pro_leaderboard(table: &Table) -> Vec<ProSummary> {
    let mut pros: Vec<ProSummary> = by_partner(table)
        .iter()
        .map(|(partner, records)| pro_summary(partner, records))
        .collect();

    pros.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.average_placement.total_cmp(&b.average_placement))
    });
    pros
}

pub fn pro_names(table: &Table, query: &str) -> Vec<String> {
    by_partner(table)
        .into_iter()
        .filter(|(partner, _)| matches(partner, query))
        .map(|(partner, _)| partner.to_string())
        .collect()
}

pub fn pro_details(table: &Table, query: &str) -> Vec<ProDetail> {
    by_partner(table)
        .into_iter()
        .filter(|(partner, _)| matches(partner, query))
        .map(|(partner, records)| {
            let mut seasons: Vec<ProSeason> = records
                .iter()
                .map(|r| ProSeason {
                    season: r.season.into(),
                    partner: r.name.clone(),
                    average_score: round2(r.average_score),
                    placement: r.placement.into(),
                    placement_text: r.results.clone(),
                    should_have_placed: r.should_have_placed.into(),
                })
                .collect();
            seasons.sort_by_key(|s| s.season);

            ProDetail {
                summary: pro_summary(partner, &records),
                seasons,
            }
        })
        .collect()
}
