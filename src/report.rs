use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::AnalyticsSummary;

pub fn build_report(summary: &AnalyticsSummary, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Ballroom Scoring Report");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Robbed");

    if summary.robbed.is_empty() {
        let _ = writeln!(output, "No placement data available.");
    } else {
        for entry in summary.robbed.iter() {
            let _ = writeln!(
                output,
                "- {} (season {}, with {}) placed {} but scored like {} ({:+})",
                entry.name,
                entry.season,
                entry.partner,
                entry.actual_placement,
                entry.should_have_placed,
                entry.diff
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Overachievers");

    if summary.overachievers.is_empty() {
        let _ = writeln!(output, "No placement data available.");
    } else {
        for entry in summary.overachievers.iter() {
            let _ = writeln!(
                output,
                "- {} (season {}, with {}) placed {} but scored like {} ({:+})",
                entry.name,
                entry.season,
                entry.partner,
                entry.actual_placement,
                entry.should_have_placed,
                entry.diff
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Seasons");

    if summary.season_stats.is_empty() {
        let _ = writeln!(output, "No seasons recorded.");
    } else {
        for season in summary.season_stats.iter() {
            let _ = writeln!(
                output,
                "- Season {}: avg {:.2}, won by {}, top scorer {} ({:.2})",
                season.season,
                season.average_score,
                season.winner,
                season.top_star,
                season.top_star_avg
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Hall of Fame");

    if summary.hall_of_fame.is_empty() {
        let _ = writeln!(output, "No scores recorded.");
    } else {
        for (position, entry) in summary.hall_of_fame.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. {} (season {}) avg {:.2}, placed {}",
                position + 1,
                entry.name,
                entry.season,
                entry.average_score,
                entry.placement
            );
        }
    }

    output
}
