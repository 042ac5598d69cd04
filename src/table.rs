use std::path::Path;
use std::sync::Arc;

use crate::analytics::{self, AnalyticsCategory};
use crate::ingest;
use crate::models::{
    AnalyticsSummary, ContestantDetail, FullSeasonEntry, ProDetail, ProSummary, RawRecord,
    Record, SeasonWeekAverages,
};
use crate::query;
use crate::rank;
use crate::scoring;

#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn build(rows: Vec<RawRecord>) -> Self {
        let mut records: Vec<Record> = rows
            .into_iter()
            .map(|row| Record {
                average_score: scoring::average_score(&row.weeks),
                highest_score: scoring::highest_score(&row.weeks),
                should_have_placed: None,
                name: row.name,
                season: row.season,
                partner: row.partner,
                placement: row.placement,
                results: row.results,
                weeks: row.weeks,
            })
            .collect();

        let keys: Vec<(Option<u32>, f64)> = records
            .iter()
            .map(|r| (r.season, r.average_score))
            .collect();
        for (record, rank) in records.iter_mut().zip(rank::season_ranks(&keys)) {
            record.should_have_placed = rank;
        }

        log::debug!(
            "Built table of {} records ({} without a usable season)",
            records.len(),
            records.iter().filter(|r| r.season.is_none()).count()
        );

        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every query reads the same snapshot. A reload swaps in a new catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    table: Option<Arc<Table>>,
}

impl Catalog {
    pub fn new(table: Option<Table>) -> Self {
        Self {
            table: table.map(Arc::new),
        }
    }

    pub fn load(path: &Path) -> Self {
        Self::new(ingest::load_table(path))
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_deref()
    }

    pub fn search(&self, query: &str) -> Vec<ContestantDetail> {
        self.table()
            .map(|t| query::search_contestants(t, query))
            .unwrap_or_default()
    }

    pub fn names(&self, query: &str) -> Vec<String> {
        self.table()
            .map(|t| query::contestant_names(t, query))
            .unwrap_or_default()
    }

    pub fn pros(&self) -> Vec<ProSummary> {
        self.table().map(query::pro_leaderboard).unwrap_or_default()
    }

    pub fn pro_names(&self, query: &str) -> Vec<String> {
        self.table()
            .map(|t| query::pro_names(t, query))
            .unwrap_or_default()
    }

    pub fn pro_details(&self, query: &str) -> Vec<ProDetail> {
        self.table()
            .map(|t| query::pro_details(t, query))
            .unwrap_or_default()
    }

    pub fn analytics(&self, category: AnalyticsCategory) -> AnalyticsSummary {
        analytics::summary(self.table(), category)
    }

    pub fn full_season_leaders(&self, limit: usize) -> Vec<FullSeasonEntry> {
        self.table()
            .map(|t| analytics::full_season_leaders(t, limit))
            .unwrap_or_default()
    }

    pub fn week_averages(&self) -> Vec<SeasonWeekAverages> {
        self.table()
            .map(analytics::season_week_averages)
            .unwrap_or_default()
    }
}
