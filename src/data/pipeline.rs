use super::error::SampleError;
use super::filter::{FilterOptions, FilterSelection, filter_rows};
use super::model::{TradeRecord, TradeTable};
use super::sample::{DEFAULT_SAMPLE_SIZE, DEFAULT_SEED, sample_rows};
use super::views::{DEFAULT_TOP_N, DashboardViews};
use crate::geo::{self, MapLayer};

/// Fixed inputs of the pipeline besides the table and the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineParams {
    pub sample_size: usize,
    pub seed: u64,
    pub top_n: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// The sampled dataset with the selector options derived from it.
#[derive(Debug, Clone)]
pub struct Sample {
    pub rows: Vec<TradeRecord>,
    pub options: FilterOptions,
}

impl Sample {
    pub fn draw(table: &TradeTable, params: &PipelineParams) -> Result<Self, SampleError> {
        let rows = sample_rows(&table.records, params.sample_size, params.seed)?;
        let options = FilterOptions::from_rows(&rows);
        log::info!(
            "Sampled {} of {} rows (seed {}): {} categories",
            rows.len(),
            table.len(),
            params.seed,
            options.categories.len()
        );
        Ok(Sample { rows, options })
    }

    /// Filter the sample and compute every view.
    pub fn views(&self, selection: &FilterSelection, top_n: usize) -> Derived {
        let filtered = filter_rows(&self.rows, selection);
        log::debug!("recomputing views over {} of {} rows", filtered.len(), self.rows.len());
        let views = DashboardViews::compute(&filtered, top_n);
        Derived {
            visible_rows: filtered.len(),
            map: geo::map_layer(&views.country_totals),
            views,
        }
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub visible_rows: usize,
    pub views: DashboardViews,
    /// Country totals placed on the map, built once per run.
    pub map: MapLayer,
}

/// `(table, params, selection) -> views` in one call. `None` selects every
/// value of the sample.
pub fn run(
    table: &TradeTable,
    params: &PipelineParams,
    selection: Option<&FilterSelection>,
) -> Result<Derived, SampleError> {
    let sample = Sample::draw(table, params)?;
    let derived = match selection {
        Some(sel) => sample.views(sel, params.top_n),
        None => sample.views(&FilterSelection::all(&sample.options), params.top_n),
    };
    Ok(derived)
}
