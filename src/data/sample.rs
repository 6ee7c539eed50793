use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::error::SampleError;
use super::model::TradeRecord;

/// Number of rows drawn for the dashboard.
pub const DEFAULT_SAMPLE_SIZE: usize = 3001;

/// Seed of the fixed sample.
pub const DEFAULT_SEED: u64 = 55031;

/// Draw `size` distinct rows without replacement.
///
/// The draw depends only on `(rows, size, seed)`, so the same table and seed
/// always give the same rows in the same order.
pub fn sample_rows(
    rows: &[TradeRecord],
    size: usize,
    seed: u64,
) -> Result<Vec<TradeRecord>, SampleError> {
    if size > rows.len() {
        return Err(SampleError::NotEnoughRows {
            requested: size,
            available: rows.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = index::sample(&mut rng, rows.len(), size);
    log::debug!("sampled {size} of {} rows with seed {seed}", rows.len());

    Ok(picked.into_iter().map(|i| rows[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::Flow;

    fn table(n: usize) -> Vec<TradeRecord> {
        (0..n)
            .map(|i| record(i, "Chile", "Toys", Flow::Import, i as f64, 1))
            .collect()
    }

    #[test]
    fn same_seed_gives_same_rows() {
        let rows = table(500);
        let a = sample_rows(&rows, 120, 7).unwrap();
        let b = sample_rows(&rows, 120, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sample_has_exactly_k_distinct_rows() {
        let rows = table(200);
        let s = sample_rows(&rows, 150, DEFAULT_SEED).unwrap();
        let ids: BTreeSet<usize> = s.iter().map(|r| r.row).collect();
        assert_eq!(s.len(), 150);
        assert_eq!(ids.len(), 150);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let rows = table(1000);
        let a = sample_rows(&rows, 10, 1).unwrap();
        let b = sample_rows(&rows, 10, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn whole_table_is_allowed() {
        let rows = table(30);
        let s = sample_rows(&rows, 30, 3).unwrap();
        let ids: BTreeSet<usize> = s.iter().map(|r| r.row).collect();
        assert_eq!(ids, (0..30).collect());
    }

    #[test]
    fn too_few_rows_is_an_error() {
        let rows = table(10);
        assert_eq!(
            sample_rows(&rows, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED).unwrap_err(),
            SampleError::NotEnoughRows {
                requested: DEFAULT_SAMPLE_SIZE,
                available: 10
            }
        );
    }
}
