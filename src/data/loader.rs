use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::DataError;
use super::model::{DATE_FORMAT, RawTradeRow, TradeTable, columns};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a trade table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the trade columns (extra columns ignored)
/// * `.json`    – `[{ "Country": "...", "Value": 12.5, ... }, ...]`
/// * `.parquet` – one column per trade field
pub fn load_file(path: &Path) -> Result<TradeTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} transactions from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names matched literally.
/// `Date` is day-month-year text, e.g. `07-11-2021`.
fn load_csv(path: &Path) -> Result<TradeTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    require_columns(headers.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawTradeRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(raw);
    }

    Ok(TradeTable::from_raw_rows(rows)?)
}

fn require_columns<'a, I>(present: I) -> Result<(), DataError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = present.into_iter().collect();
    match columns::REQUIRED.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(DataError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<TradeTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: serde_json::Value = serde_json::from_str(&text).context("parsing JSON")?;
    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    if let Some(first) = records.first().and_then(|r| r.as_object()) {
        require_columns(first.keys().map(String::as_str))?;
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, rec)| RawTradeRow::deserialize(rec).with_context(|| format!("JSON row {i}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(TradeTable::from_raw_rows(rows)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per trade field.
///
/// Text columns are Utf8 / LargeUtf8 or dictionaries of them (pandas
/// `category`, polars `Categorical`), `Value` is any float or integer type,
/// `Date` is either day-month-year text or Date32.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<TradeTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;
    rows_from_batches(reader)
}

/// Collect the trade columns of every batch into one table.
fn rows_from_batches<I>(batches: I) -> Result<TradeTable>
where
    I: IntoIterator<Item = Result<RecordBatch, ArrowError>>,
{
    let mut rows = Vec::new();

    for batch_result in batches {
        let batch = batch_result.context("reading parquet record batch")?;
        let country = text_column(&batch, columns::COUNTRY)?;
        let category = text_column(&batch, columns::CATEGORY)?;
        let flow = text_column(&batch, columns::IMPORT_EXPORT)?;
        let value = decode_dictionary(columns::VALUE, column(&batch, columns::VALUE)?)?;
        let date = date_column(&batch)?;
        let shipping = text_column(&batch, columns::SHIPPING_METHOD)?;
        let payment = text_column(&batch, columns::PAYMENT_TERMS)?;

        // Row numbers count across batches.
        let offset = rows.len();
        for row in 0..batch.num_rows() {
            rows.push(RawTradeRow {
                country: extract_text(&country, row),
                category: extract_text(&category, row),
                import_export: extract_text(&flow, row),
                value: extract_f64(&value, row)
                    .with_context(|| format!("Row {}: failed to read 'Value'", offset + row))?,
                date: extract_date_text(&date, row),
                shipping_method: extract_text(&shipping, row),
                payment_terms: extract_text(&payment, row),
            });
        }
        log::debug!("parquet batch of {} rows", batch.num_rows());
    }

    Ok(TradeTable::from_raw_rows(rows)?)
}

// -- Parquet / Arrow helpers --

/// Look up a column by its literal name.
fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, DataError> {
    let idx = batch
        .schema_ref()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

/// Replace a dictionary column by its decoded values.
fn decode_dictionary(name: &str, col: &ArrayRef) -> Result<ArrayRef, DataError> {
    match col.data_type() {
        DataType::Dictionary(_, values) => {
            cast(col, values).map_err(|_| unsupported(name, col.data_type()))
        }
        _ => Ok(col.clone()),
    }
}

/// A text column, decoded when dictionary-encoded.
fn text_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef, DataError> {
    let col = decode_dictionary(name, column(batch, name)?)?;
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => Ok(col),
        other => Err(unsupported(name, other)),
    }
}

/// The `Date` column: Date32 or text.
fn date_column(batch: &RecordBatch) -> Result<ArrayRef, DataError> {
    let name = columns::DATE;
    let col = decode_dictionary(name, column(batch, name)?)?;
    match col.data_type() {
        DataType::Date32 | DataType::Utf8 | DataType::LargeUtf8 => Ok(col),
        other => Err(unsupported(name, other)),
    }
}

fn unsupported(name: &str, data_type: &DataType) -> DataError {
    DataError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: data_type.to_string(),
    }
}

/// Extract a text cell from a Utf8 / LargeUtf8 column, `None` for nulls.
fn extract_text(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|s| s.value(row).to_string()),
        _ => col.as_string_opt::<i32>().map(|s| s.value(row).to_string()),
    }
}

/// Extract a numeric cell as `f64`, `None` for nulls.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Utf8 | DataType::LargeUtf8 => match extract_text(col, row) {
            Some(s) => Some(
                s.trim()
                    .parse::<f64>()
                    .with_context(|| format!("'{s}' is not a number"))?,
            ),
            None => None,
        },
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

/// Extract a date cell as day-month-year text so it goes through the same
/// parsing as the text formats.
fn extract_date_text(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Date32 => col
            .as_any()
            .downcast_ref::<Date32Array>()
            .and_then(|a| a.value_as_date(row))
            .map(|d| d.format(DATE_FORMAT).to_string()),
        _ => extract_text(col, row),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{
        BooleanArray, Date32Array, DictionaryArray, Float64Array, Int32Array, Int64Array,
        StringArray,
    };
    use arrow::datatypes::{Field, Int32Type, Schema, SchemaRef};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::{Flow, MISSING_LABEL};

    const HEADER: &str = "Transaction_ID,Country,Product,Import_Export,Value,Date,Category,\
                          Shipping_Method,Payment_Terms";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}\n\
             a1,Peru,widget,Import,120.5,07-11-2021,Toys,Air,Prepaid\n\
             a2,,gadget,Export,80,31-01-2022,Electronics,Sea,\n"
        );
        let file = write_file(".csv", &csv);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records[0];
        assert_eq!(first.country, "Peru");
        assert_eq!(first.flow, Flow::Import);
        assert_eq!(first.value, 120.5);
        assert!(first.date.is_some());

        let second = &table.records[1];
        assert_eq!(second.row, 1);
        assert_eq!(second.country, MISSING_LABEL);
        assert_eq!(second.payment_terms, MISSING_LABEL);
    }

    #[test]
    fn csv_without_a_required_column_fails() {
        let file = write_file(".csv", "Country,Import_Export,Value\nPeru,Import,1\n");
        let err = load_file(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("missing required column 'Category'"), "{msg}");
    }

    #[test]
    fn csv_with_non_numeric_value_fails() {
        let csv = format!("{HEADER}\na1,Peru,w,Import,lots,07-11-2021,Toys,Air,Prepaid\n");
        let file = write_file(".csv", &csv);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("/nonexistent/trades.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_file(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported file extension"));
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[
            {"Country": "Chile", "Category": "Toys", "Import_Export": "Export",
             "Value": 10.0, "Date": "01-02-2023", "Shipping_Method": "Land",
             "Payment_Terms": "Net 60", "Customer": "ignored"},
            {"Country": null, "Category": "Toys", "Import_Export": "Import",
             "Value": 4, "Date": "bad", "Shipping_Method": "Land",
             "Payment_Terms": "Net 60"}
        ]"#;
        let file = write_file(".json", json);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].flow, Flow::Export);
        assert_eq!(table.records[1].country, MISSING_LABEL);
        assert_eq!(table.records[1].date, None);
    }

    fn text(values: &[Option<&str>]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    fn dictionary(values: &[&str]) -> ArrayRef {
        Arc::new(values.iter().copied().collect::<DictionaryArray<Int32Type>>())
    }

    /// Schema with the seven trade columns; `Value` and `Date` types vary.
    fn trade_schema(country: DataType, value: DataType, date: DataType) -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("Country", country, true),
            Field::new("Category", DataType::Utf8, true),
            Field::new("Import_Export", DataType::Utf8, true),
            Field::new("Value", value, true),
            Field::new("Date", date, true),
            Field::new("Shipping_Method", DataType::Utf8, true),
            Field::new("Payment_Terms", DataType::Utf8, true),
        ]))
    }

    /// Write one record batch per entry of `batches`.
    fn write_parquet(schema: SchemaRef, batches: Vec<Vec<ArrayRef>>) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let sink = file.as_file().try_clone().unwrap();
        let mut writer = ArrowWriter::try_new(sink, schema.clone(), None).unwrap();
        for columns in batches {
            writer
                .write(&RecordBatch::try_new(schema.clone(), columns).unwrap())
                .unwrap();
        }
        writer.close().unwrap();
        file
    }

    fn two_rows(country: ArrayRef, value: ArrayRef, date: ArrayRef) -> Vec<ArrayRef> {
        vec![
            country,
            text(&[Some("Toys"), Some("Furniture")]),
            text(&[Some("Import"), Some("Export")]),
            value,
            date,
            text(&[Some("Air"), Some("Sea")]),
            text(&[Some("Prepaid"), Some("Net 30")]),
        ]
    }

    #[test]
    fn loads_parquet_columns() {
        let schema = trade_schema(DataType::Utf8, DataType::Float64, DataType::Utf8);
        let file = write_parquet(
            schema,
            vec![two_rows(
                text(&[Some("Peru"), Some("Ghana")]),
                Arc::new(Float64Array::from(vec![1.5, 2.5])),
                text(&[Some("01-03-2022"), Some("15-12-2022")]),
            )],
        );

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].country, "Ghana");
        assert_eq!(table.records[1].flow, Flow::Export);
        assert_eq!(table.records[1].value, 2.5);
    }

    #[test]
    fn parquet_date32_integer_value_and_null_text() {
        let schema = trade_schema(DataType::Utf8, DataType::Int64, DataType::Date32);
        // 19000 days after the epoch is 2022-01-08.
        let file = write_parquet(
            schema,
            vec![two_rows(
                text(&[Some("Peru"), None]),
                Arc::new(Int64Array::from(vec![120, 7])),
                Arc::new(Date32Array::from(vec![Some(19_000), None])),
            )],
        );

        let table = load_file(file.path()).unwrap();
        let (first, second) = (&table.records[0], &table.records[1]);
        assert_eq!(first.value, 120.0);
        assert_eq!(first.date_text, "08-01-2022");
        assert_eq!(first.date, chrono::NaiveDate::from_ymd_opt(2022, 1, 8));
        assert_eq!(second.country, MISSING_LABEL);
        assert_eq!(second.value, 7.0);
        assert_eq!(second.date, None);
    }

    #[test]
    fn parquet_int32_and_text_values() {
        let dates = || text(&[Some("01-03-2022"), Some("15-12-2022")]);
        let countries = || text(&[Some("Peru"), Some("Ghana")]);

        let ints = write_parquet(
            trade_schema(DataType::Utf8, DataType::Int32, DataType::Utf8),
            vec![two_rows(countries(), Arc::new(Int32Array::from(vec![3, 4])), dates())],
        );
        let table = load_file(ints.path()).unwrap();
        assert_eq!(table.records[1].value, 4.0);

        let texts = write_parquet(
            trade_schema(DataType::Utf8, DataType::Utf8, DataType::Utf8),
            vec![two_rows(countries(), text(&[Some(" 12.25"), Some("80")]), dates())],
        );
        let table = load_file(texts.path()).unwrap();
        assert_eq!(table.records[0].value, 12.25);
        assert_eq!(table.records[1].value, 80.0);
    }

    #[test]
    fn parquet_dictionary_text_columns_are_decoded() {
        let dict = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        let schema = trade_schema(dict, DataType::Float64, DataType::Utf8);
        let file = write_parquet(
            schema,
            vec![two_rows(
                dictionary(&["Peru", "Ghana"]),
                Arc::new(Float64Array::from(vec![1.0, 2.0])),
                text(&[Some("01-03-2022"), Some("15-12-2022")]),
            )],
        );

        let table = load_file(file.path()).unwrap();
        let countries: Vec<&str> = table.records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Peru", "Ghana"]);
    }

    #[test]
    fn parquet_non_text_country_is_rejected() {
        let schema = trade_schema(DataType::Boolean, DataType::Float64, DataType::Utf8);
        let file = write_parquet(
            schema,
            vec![two_rows(
                Arc::new(BooleanArray::from(vec![true, false])),
                Arc::new(Float64Array::from(vec![1.0, 2.0])),
                text(&[Some("01-03-2022"), Some("15-12-2022")]),
            )],
        );

        let msg = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(msg.contains("column 'Country' has unsupported type"), "{msg}");
    }

    #[test]
    fn parquet_value_errors_count_rows_across_batches() {
        let schema = trade_schema(DataType::Utf8, DataType::Utf8, DataType::Utf8);
        let batch = |values: &[Option<&str>]| {
            let columns = two_rows(
                text(&[Some("Peru"), Some("Ghana")]),
                text(values),
                text(&[Some("01-03-2022"), Some("15-12-2022")]),
            );
            RecordBatch::try_new(schema.clone(), columns)
        };

        let batches = vec![
            batch(&[Some("1"), Some("2")]),
            batch(&[Some("3"), Some("lots")]),
        ];
        let err = rows_from_batches(batches).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 3: failed to read 'Value'"), "{msg}");
    }
}
