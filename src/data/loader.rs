use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{GroupKey, SaleRecord, SalesDataset, ValueField, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors surfaced to the user
// ---------------------------------------------------------------------------

/// Why a sales extract could not be loaded. Messages are shown verbatim in the UI.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Arquivo '{0}' não encontrado. Certifique-se de que o arquivo existe e o caminho está correto.")]
    NotFound(String),

    #[error("O arquivo '{0}' está vazio.")]
    Empty(String),

    #[error("Erro ao analisar o arquivo '{file}'. Verifique o formato do arquivo. ({detail})")]
    Parse { file: String, detail: String },

    #[error("Formato de arquivo não suportado: .{0}")]
    UnsupportedFormat(String),

    #[error("Ocorreu um erro inesperado ao carregar o arquivo: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

/// Raised by the readers when the file has bytes but no header / no content.
#[derive(Debug, Error)]
#[error("no header row")]
struct NoHeader;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales extract from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the sales columns (recommended)
/// * `.json`    – `[{ "NF": 1, "Vendedor": "Ana", ... }, ...]`
/// * `.parquet` – flat columns, text or numeric
///
/// Extra columns are ignored; a missing column is a parse error.
pub fn load_file(path: &Path) -> Result<SalesDataset, LoadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let reader: fn(File) -> Result<Vec<SaleRecord>> = match ext.as_str() {
        "csv" => read_csv,
        "json" => read_json,
        "parquet" | "pq" => read_parquet,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(name.clone()),
        _ => LoadError::Unexpected(anyhow::Error::new(e).context(format!("opening {name}"))),
    })?;

    let size = file
        .metadata()
        .with_context(|| format!("reading metadata of {name}"))?
        .len();
    if size == 0 {
        return Err(LoadError::Empty(name));
    }

    let records = reader(file).map_err(|e| {
        if e.is::<NoHeader>() {
            LoadError::Empty(name.clone())
        } else {
            LoadError::Parse {
                file: name.clone(),
                detail: format!("{e:#}"),
            }
        }
    })?;

    Ok(SalesDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(file: File) -> Result<Vec<SaleRecord>> {
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers().context("reading CSV headers")?.clone();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(NoHeader.into());
    }
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    reader
        .deserialize::<SaleRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {}", row_no + 1)))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient="records")`.
fn read_json(file: File) -> Result<Vec<SaleRecord>> {
    let root: JsonValue =
        serde_json::from_reader(BufReader::new(file)).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            build_record(|col| json_text(obj, col), |col| json_number(obj, col))
                .with_context(|| format!("Row {i}"))
        })
        .collect()
}

fn json_text(obj: &Map<String, JsonValue>, col: &str) -> Result<String> {
    match obj.get(col) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(JsonValue::Bool(b)) => Ok(b.to_string()),
        Some(other) => bail!("'{col}': unexpected value {other}"),
        None => bail!("missing '{col}'"),
    }
}

fn json_number(obj: &Map<String, JsonValue>, col: &str) -> Result<f64> {
    match obj.get(col) {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .with_context(|| format!("'{col}': {n} is not representable")),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .with_context(|| format!("'{col}': '{s}' is not a number")),
        Some(other) => bail!("'{col}': {other} is not a number"),
        None => bail!("missing '{col}'"),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Dictionary-encoded columns (pandas
/// `category`) are decoded to plain strings.
fn read_parquet(file: File) -> Result<Vec<SaleRecord>> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    for col in REQUIRED_COLUMNS {
        if builder.schema().index_of(col).is_err() {
            bail!("Parquet file missing '{col}' column");
        }
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = sales_columns(&batch)?;

        for row in 0..batch.num_rows() {
            let record = build_record(
                |col| arrow_text(lookup(&columns, col)?, row).with_context(|| format!("'{col}'")),
                |col| {
                    arrow_number(lookup(&columns, col)?, row).with_context(|| format!("'{col}'"))
                },
            )
            .with_context(|| format!("Row {}", records.len()))?;
            records.push(record);
        }
    }

    Ok(records)
}

// -- Arrow helpers --

/// The sales columns of `batch`, dictionary columns decoded to `Utf8`.
fn sales_columns(batch: &RecordBatch) -> Result<Vec<(&'static str, ArrayRef)>> {
    REQUIRED_COLUMNS
        .iter()
        .map(|&name| {
            let idx = batch
                .schema()
                .index_of(name)
                .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
            let col = batch.column(idx);
            let col = match col.data_type() {
                DataType::Dictionary(_, _) => cast(col, &DataType::Utf8)
                    .with_context(|| format!("decoding dictionary column '{name}'"))?,
                _ => col.clone(),
            };
            Ok((name, col))
        })
        .collect()
}

fn lookup<'a>(columns: &'a [(&'static str, ArrayRef)], name: &str) -> Result<&'a ArrayRef> {
    columns
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, col)| col)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

fn downcast<T: 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array for {:?}", col.data_type()))
}

fn arrow_text(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    let text = match col.data_type() {
        DataType::Utf8 => downcast::<StringArray>(col)?.value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row).to_string(),
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row).to_string(),
        DataType::Float32 | DataType::Float64 => arrow_number(col, row)?.to_string(),
        other => bail!("unsupported text column type {other:?}"),
    };
    Ok(text)
}

fn arrow_number(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let value = match col.data_type() {
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

// ---------------------------------------------------------------------------
// Shared row assembly
// ---------------------------------------------------------------------------

fn build_record(
    text: impl Fn(&str) -> Result<String>,
    number: impl Fn(&str) -> Result<f64>,
) -> Result<SaleRecord> {
    Ok(SaleRecord {
        invoice: text("NF")?,
        product: text(GroupKey::Product.column())?,
        product_line: text(GroupKey::ProductLine.column())?,
        salesperson: text(GroupKey::Salesperson.column())?,
        month: text(GroupKey::Month.column())?,
        year: text(GroupKey::Year.column())?,
        status: text(GroupKey::Status.column())?,
        quantity: number(ValueField::Quantity.column())?,
        value: number(ValueField::Value.column())?,
        cost: number(ValueField::Cost.column())?,
        profit: number(ValueField::Profit.column())?,
    })
}
