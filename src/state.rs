use std::path::Path;

use crate::data::filter::FilterSelection;
use crate::data::loader;
use crate::data::model::{Flow, TradeTable};
use crate::data::pipeline::{Derived, PipelineParams, Sample};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The loaded table, the sample and the selection are inputs; `derived` is
/// always the pipeline output for the current inputs and is replaced, never
/// edited, when an input changes.
pub struct AppState {
    pub params: PipelineParams,

    /// Loaded table (None until a file loads).
    pub table: Option<TradeTable>,

    /// Seeded sample of `table` with its selector options.
    pub sample: Option<Sample>,

    /// Current Import/Export and Category selection.
    pub selection: FilterSelection,

    /// Views for the current selection (cached).
    pub derived: Option<Derived>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            params,
            table: None,
            sample: None,
            selection: FilterSelection::default(),
            derived: None,
            status_message: None,
        }
    }

    /// Load a file and ingest it, reporting failures in the status line.
    pub fn open(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table: draw the sample, select everything.
    pub fn set_table(&mut self, table: TradeTable) {
        if table.is_empty() {
            log::warn!("Loaded table has no rows");
        }
        match Sample::draw(&table, &self.params) {
            Ok(sample) => {
                self.selection = FilterSelection::all(&sample.options);
                self.sample = Some(sample);
                self.table = Some(table);
                self.status_message = None;
                self.recompute();
            }
            Err(e) => {
                log::error!("Cannot sample loaded table: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.table = None;
                self.sample = None;
                self.derived = None;
            }
        }
    }

    /// Recompute every view after a selection change.
    pub fn recompute(&mut self) {
        self.derived = self
            .sample
            .as_ref()
            .map(|s| s.views(&self.selection, self.params.top_n));
    }

    pub fn toggle_flow(&mut self, flow: Flow) {
        self.selection.toggle_flow(flow);
        self.recompute();
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.selection.toggle_category(category);
        self.recompute();
    }

    /// Restore both selectors to every value.
    pub fn reset_filters(&mut self) {
        if let Some(sample) = &self.sample {
            self.selection = FilterSelection::all(&sample.options);
            self.recompute();
        }
    }

    /// Rows in the table, in the sample, and passing the filters.
    pub fn counts(&self) -> Option<(usize, usize, usize)> {
        let table = self.table.as_ref()?;
        let sample = self.sample.as_ref()?;
        let visible = self.derived.as_ref().map_or(0, |d| d.visible_rows);
        Some((table.len(), sample.rows.len(), visible))
    }
}
