use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DataError;

/// Day-month-year layout used by the `Date` column.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Label for text cells that were empty or null in the source table.
pub const MISSING_LABEL: &str = "(missing)";

/// Column names, matched literally against the source header.
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const CATEGORY: &str = "Category";
    pub const IMPORT_EXPORT: &str = "Import_Export";
    pub const VALUE: &str = "Value";
    pub const DATE: &str = "Date";
    pub const SHIPPING_METHOD: &str = "Shipping_Method";
    pub const PAYMENT_TERMS: &str = "Payment_Terms";

    pub const REQUIRED: [&str; 7] = [
        COUNTRY,
        CATEGORY,
        IMPORT_EXPORT,
        VALUE,
        DATE,
        SHIPPING_METHOD,
        PAYMENT_TERMS,
    ];
}

// ---------------------------------------------------------------------------
// Flow – the Import_Export column
// ---------------------------------------------------------------------------

/// Direction of a transaction. Ordered so `Import` sorts before `Export`,
/// which is the fixed order used by every flow-keyed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Flow {
    Import,
    Export,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Import => "Import",
            Flow::Export => "Export",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Import" => Ok(Flow::Import),
            "Export" => Ok(Flow::Export),
            other => Err(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTradeRow – what the loaders deserialize before validation
// ---------------------------------------------------------------------------

/// One source row as read from disk, before validation. Extra columns in the
/// file are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTradeRow {
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Import_Export")]
    pub import_export: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<f64>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Shipping_Method")]
    pub shipping_method: Option<String>,
    #[serde(rename = "Payment_Terms")]
    pub payment_terms: Option<String>,
}

// ---------------------------------------------------------------------------
// TradeRecord – one validated row
// ---------------------------------------------------------------------------

/// A single validated transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// Position of the row in the source table.
    pub row: usize,
    pub country: String,
    pub category: String,
    pub flow: Flow,
    pub value: f64,
    /// Parsed date, `None` when `date_text` did not match [`DATE_FORMAT`].
    pub date: Option<NaiveDate>,
    pub date_text: String,
    pub shipping_method: String,
    pub payment_terms: String,
}

impl TradeRecord {
    /// Validate a raw row. `Value` and `Import_Export` are mandatory; text
    /// cells fall back to [`MISSING_LABEL`] and a bad date is kept as text.
    pub fn from_raw(row: usize, raw: RawTradeRow) -> Result<Self, DataError> {
        let flow_text = raw.import_export.unwrap_or_default();
        let flow = flow_text
            .parse::<Flow>()
            .map_err(|value| DataError::InvalidFlow { row, value })?;

        let value = match raw.value {
            Some(v) if v.is_finite() => v,
            Some(v) => {
                return Err(DataError::InvalidValue {
                    row,
                    column: columns::VALUE,
                    value: v.to_string(),
                });
            }
            None => {
                return Err(DataError::InvalidValue {
                    row,
                    column: columns::VALUE,
                    value: String::new(),
                });
            }
        };

        let date_text = raw.date.unwrap_or_default();
        let date = parse_date(&date_text);

        Ok(TradeRecord {
            row,
            country: text_or_missing(raw.country),
            category: text_or_missing(raw.category),
            flow,
            value,
            date,
            date_text,
            shipping_method: text_or_missing(raw.shipping_method),
            payment_terms: text_or_missing(raw.payment_terms),
        })
    }
}

/// Parse a `Date` cell in day-month-year form.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

fn text_or_missing(cell: Option<String>) -> String {
    match cell {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => MISSING_LABEL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// TradeTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full validated table, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct TradeTable {
    pub records: Vec<TradeRecord>,
}

impl TradeTable {
    /// Validate raw rows in source order. The first invalid row aborts.
    pub fn from_raw_rows<I>(rows: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = RawTradeRow>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| TradeRecord::from_raw(i, raw))
            .collect::<Result<Vec<_>, _>>()?;

        let bad_dates = records.iter().filter(|r| r.date.is_none()).count();
        if bad_dates > 0 {
            log::warn!("{bad_dates} rows have a Date that is not in {DATE_FORMAT} form");
        }
        Ok(TradeTable { records })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record for tests; the date is `15-<month>-2023`.
    pub(crate) fn record(
        row: usize,
        country: &str,
        category: &str,
        flow: Flow,
        value: f64,
        month: u32,
    ) -> TradeRecord {
        let date_text = format!("15-{month:02}-2023");
        TradeRecord {
            row,
            country: country.to_string(),
            category: category.to_string(),
            flow,
            value,
            date: parse_date(&date_text),
            date_text,
            shipping_method: "Sea".to_string(),
            payment_terms: "Net 30".to_string(),
        }
    }

    fn raw(flow: &str, value: Option<f64>, date: &str) -> RawTradeRow {
        RawTradeRow {
            country: Some("Peru".into()),
            category: Some("Toys".into()),
            import_export: Some(flow.into()),
            value,
            date: Some(date.into()),
            shipping_method: Some("Air".into()),
            payment_terms: Some("Prepaid".into()),
        }
    }

    #[test]
    fn from_raw_parses_day_month_year() {
        let rec = TradeRecord::from_raw(3, raw("Export", Some(12.5), "07-11-2021")).unwrap();
        assert_eq!(rec.row, 3);
        assert_eq!(rec.flow, Flow::Export);
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2021, 11, 7));
    }

    #[test]
    fn from_raw_keeps_unparsed_date_as_text() {
        let rec = TradeRecord::from_raw(0, raw("Import", Some(1.0), "2021/11/07")).unwrap();
        assert_eq!(rec.date, None);
        assert_eq!(rec.date_text, "2021/11/07");
    }

    #[test]
    fn from_raw_rejects_unknown_flow() {
        let err = TradeRecord::from_raw(9, raw("Transit", Some(1.0), "01-01-2020")).unwrap_err();
        assert!(matches!(err, DataError::InvalidFlow { row: 9, .. }));
    }

    #[test]
    fn from_raw_rejects_missing_value() {
        let err = TradeRecord::from_raw(2, raw("Import", None, "01-01-2020")).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { row: 2, .. }));
    }

    #[test]
    fn empty_text_cells_become_their_own_group() {
        let mut r = raw("Import", Some(1.0), "01-01-2020");
        r.country = Some("  ".into());
        r.payment_terms = None;
        let rec = TradeRecord::from_raw(0, r).unwrap();
        assert_eq!(rec.country, MISSING_LABEL);
        assert_eq!(rec.payment_terms, MISSING_LABEL);
    }

    #[test]
    fn flow_orders_import_first() {
        let mut flows = vec![Flow::Export, Flow::Import];
        flows.sort();
        assert_eq!(flows, vec![Flow::Import, Flow::Export]);
        assert_eq!(Flow::Export.to_string(), "Export");
    }
}
