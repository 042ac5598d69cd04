use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use csv::StringRecord;

use crate::models::{RawRecord, WeekScores};
use crate::table::Table;

const NAME_COLUMN: &str = "celebrity_name";
const PARTNER_COLUMN: &str = "ballroom_partner";
const SEASON_COLUMN: &str = "season";
const PLACEMENT_COLUMN: &str = "placement";
const RESULTS_COLUMN: &str = "results";
const MAX_JUDGES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeekField {
    Average,
    Total,
    Judge(u32),
}

struct Layout {
    name: usize,
    partner: usize,
    season: usize,
    placement: usize,
    results: Option<usize>,
    weeks: BTreeMap<u32, Vec<(WeekField, usize)>>,
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> anyhow::Result<Self> {
        let find = |column: &str| headers.iter().position(|h| h.trim() == column);
        let require = |column: &str| -> anyhow::Result<usize> {
            match find(column) {
                Some(index) => Ok(index),
                None => bail!("dataset is missing the `{column}` column"),
            }
        };

        let mut weeks: BTreeMap<u32, Vec<(WeekField, usize)>> = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some((week, field)) = parse_week_column(header.trim()) {
                weeks.entry(week).or_default().push((field, index));
            }
        }

        Ok(Self {
            name: require(NAME_COLUMN)?,
            partner: require(PARTNER_COLUMN)?,
            season: require(SEASON_COLUMN)?,
            placement: require(PLACEMENT_COLUMN)?,
            results: find(RESULTS_COLUMN),
            weeks,
        })
    }

    fn week_scores(&self, row: &StringRecord) -> Vec<WeekScores> {
        self.weeks
            .iter()
            .map(|(week, fields)| {
                let mut scores = WeekScores {
                    week: *week,
                    avg_judge_score: None,
                    total_judge_score: None,
                    judge_scores: Vec::new(),
                };
                let mut judges: BTreeMap<u32, Option<f64>> = BTreeMap::new();
                for (field, index) in fields {
                    let value = row.get(*index).and_then(parse_score);
                    match field {
                        WeekField::Average => scores.avg_judge_score = value,
                        WeekField::Total => scores.total_judge_score = value,
                        WeekField::Judge(judge) => {
                            judges.insert(*judge, value);
                        }
                    }
                }
                let last_judge = judges.keys().next_back().copied();
                if let Some(last) = last_judge {
                    scores.judge_scores = vec![None; last as usize];
                    for (judge, value) in judges {
                        scores.judge_scores[judge as usize - 1] = value;
                    }
                }
                scores
            })
            .collect()
    }
}

// `week{N}_avg_judge_score`, `week{N}_total_judge_score` and
// `week{N}_judge{J}_score`, with judges 1 to MAX_JUDGES.
fn parse_week_column(header: &str) -> Option<(u32, WeekField)> {
    let rest = header.strip_prefix("week")?;
    let (week, field) = rest.split_once('_')?;
    let week: u32 = week.parse().ok().filter(|w| *w > 0)?;

    let field = match field {
        "avg_judge_score" => WeekField::Average,
        "total_judge_score" => WeekField::Total,
        other => {
            let judge: u32 = other
                .strip_prefix("judge")?
                .strip_suffix("_score")?
                .parse()
                .ok()
                .filter(|j| (1..=MAX_JUDGES).contains(j))?;
            WeekField::Judge(judge)
        }
    };
    Some((week, field))
}

pub fn parse_score(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Season numbers and placements must be whole and positive, e.g. "3" or "3.00".
pub fn parse_ordinal(cell: &str) -> Option<u32> {
    parse_score(cell)
        .filter(|value| *value >= 1.0 && value.fract() == 0.0 && *value <= f64::from(u32::MAX))
        .map(|value| value as u32)
}

pub fn read_rows<R: Read>(source: R) -> anyhow::Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers().context("failed to read CSV header")?.clone();
    let layout = Layout::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("malformed CSV row {}", line + 1))?;
        let cell = |index: usize| record.get(index).unwrap_or("").trim();

        let name = cell(layout.name);
        if name.is_empty() {
            log::warn!("Row {}: no contestant name, skipping", line + 1);
            continue;
        }

        rows.push(RawRecord {
            name: name.to_string(),
            season: parse_ordinal(cell(layout.season)),
            partner: cell(layout.partner).to_string(),
            placement: parse_ordinal(cell(layout.placement)),
            results: layout.results.map(|i| cell(i).to_string()).unwrap_or_default(),
            weeks: layout.week_scores(&record),
        });
    }

    let seasons: BTreeSet<u32> = rows.iter().filter_map(|r| r.season).collect();
    log::info!(
        "Read {} contestant rows across {} seasons and {} weeks",
        rows.len(),
        seasons.len(),
        layout.weeks.len()
    );
    Ok(rows)
}

pub fn load_rows(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
    read_rows(file).with_context(|| format!("failed to read dataset {}", path.display()))
}

pub fn load_table(path: &Path) -> Option<Table> {
    match load_rows(path) {
        Ok(rows) => Some(Table::build(rows)),
        Err(err) => {
            log::warn!("Dataset unavailable, serving empty results: {err:#}");
            None
        }
    }
}
