use std::collections::HashMap;

/// Min competition rank of each average within its season, highest average first.
///
/// Input is one `(season, average_score)` pair per record; output lines up
/// with it. Equal averages share a rank and the next distinct average skips
/// ahead by the size of the tie. Records without a usable season get `None`.
pub fn season_ranks(entries: &[(Option<u32>, f64)]) -> Vec<Option<u32>> {
    let mut by_season: HashMap<u32, Vec<f64>> = HashMap::new();
    for (season, average) in entries {
        if let Some(season) = season {
            by_season.entry(*season).or_default().push(*average);
        }
    }

    for averages in by_season.values_mut() {
        averages.sort_by(|a, b| b.total_cmp(a));
    }

    entries
        .iter()
        .map(|(season, average)| {
            let averages = by_season.get(&(*season)?)?;
            let ahead = averages.partition_point(|other| other > average);
            Some(ahead as u32 + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_average_descending() {
        let entries = vec![(Some(1), 10.0), (Some(1), 8.0), (Some(1), 8.5)];
        assert_eq!(season_ranks(&entries), vec![Some(1), Some(3), Some(2)]);
    }

    #[test]
    fn ties_share_rank_and_skip_the_next() {
        let entries = vec![
            (Some(4), 9.0),
            (Some(4), 7.5),
            (Some(4), 9.0),
            (Some(4), 6.0),
        ];
        assert_eq!(
            season_ranks(&entries),
            vec![Some(1), Some(3), Some(1), Some(4)]
        );
    }

    #[test]
    fn seasons_rank_independently() {
        let entries = vec![(Some(1), 5.0), (Some(2), 9.0), (Some(1), 6.0), (Some(2), 1.0)];
        assert_eq!(
            season_ranks(&entries),
            vec![Some(2), Some(1), Some(1), Some(2)]
        );
    }

    #[test]
    fn zero_average_still_ranks() {
        let entries = vec![(Some(3), 0.0), (Some(3), 7.0), (Some(3), 0.0)];
        assert_eq!(season_ranks(&entries), vec![Some(2), Some(1), Some(2)]);
    }

    #[test]
    fn missing_season_is_unranked() {
        let entries = vec![(None, 9.0), (Some(1), 8.0)];
        assert_eq!(season_ranks(&entries), vec![None, Some(1)]);
    }

    #[test]
    fn higher_average_always_ranks_better() {
        let entries: Vec<(Option<u32>, f64)> = [7.0, 9.5, 7.0, 3.25, 9.5, 8.0, 0.0]
            .iter()
            .map(|avg| (Some(11), *avg))
            .collect();
        let ranks = season_ranks(&entries);
        for (i, (_, a)) in entries.iter().enumerate() {
            for (j, (_, b)) in entries.iter().enumerate() {
                if a > b {
                    assert!(ranks[i] < ranks[j]);
                } else if a == b {
                    assert_eq!(ranks[i], ranks[j]);
                }
            }
        }
    }
}
