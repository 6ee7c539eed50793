//! Headless JSON export of the dashboard views.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::pipeline::{Derived, PipelineParams};
use crate::data::views::{
    CountryTotal, FlowTotal, GroupCount, GroupTotal, MonthlyAverage, PaymentTermsPivot,
};

/// Serialized form of one pipeline run.
#[derive(Debug, Serialize)]
pub struct ViewsReport<'a> {
    pub sample_size: usize,
    pub seed: u64,
    pub visible_rows: usize,
    pub top_countries: &'a [GroupTotal],
    pub category_distribution: &'a [GroupCount],
    pub flow_totals: &'a [FlowTotal],
    pub shipping_methods: &'a [GroupCount],
    pub payment_terms: &'a PaymentTermsPivot,
    /// `None` when the monthly view failed; see `errors`.
    pub monthly_average: Option<&'a [MonthlyAverage]>,
    pub country_totals: &'a [CountryTotal],
    /// Countries left off the map.
    pub unmapped_countries: &'a [String],
    pub errors: Vec<String>,
}

impl<'a> ViewsReport<'a> {
    pub fn new(params: &PipelineParams, derived: &'a Derived) -> Self {
        let views = &derived.views;
        let mut errors = Vec::new();
        let monthly_average = match &views.monthly_average {
            Ok(m) => Some(m.as_slice()),
            Err(e) => {
                errors.push(format!("monthly_average: {e}"));
                None
            }
        };
        ViewsReport {
            sample_size: params.sample_size,
            seed: params.seed,
            visible_rows: derived.visible_rows,
            top_countries: &views.top_countries,
            category_distribution: &views.category_distribution,
            flow_totals: &views.flow_totals,
            shipping_methods: &views.shipping_methods,
            payment_terms: &views.payment_terms,
            monthly_average,
            country_totals: &views.country_totals,
            unmapped_countries: &derived.map.unmatched,
            errors,
        }
    }
}

/// Write the report as pretty JSON.
pub fn write_json<W: Write>(writer: W, report: &ViewsReport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(writer, report).context("serializing views")
}

/// Write the report to `path`.
pub fn export_to_path(path: &Path, params: &PipelineParams, derived: &Derived) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, &ViewsReport::new(params, derived))?;
    writer.flush().context("flushing export")?;
    log::info!("Wrote views to {}", path.display());
    Ok(())
}
