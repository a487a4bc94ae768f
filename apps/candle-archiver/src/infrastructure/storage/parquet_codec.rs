//! Parquet encoding of candle series.
//!
//! Column names and types follow the layout the archive has always used, so
//! files written before this service existed stay readable:
//!
//! | column                         | written as               | accepted on read               |
//! |--------------------------------|--------------------------|--------------------------------|
//! | `Open Time`                    | `timestamp[ns]`, no zone | `timestamp[s/ms/us/ns]`, int ms |
//! | `Close Time`                   | `int64` ms               | int ms, `timestamp[*]`         |
//! | price / volume columns         | `utf8` decimal           | anything castable to `utf8`    |
//! | `Number of Trades`             | `int64`                  | any integer                    |
//! | `Ignore`                       | `utf8`                   | anything castable to `utf8`    |
//!
//! Extra columns (such as a serialized dataframe index) are ignored.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Int64Array, StringArray, TimestampNanosecondArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Int64Type, Schema, SchemaRef, TimeUnit};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::candle_history::{Candle, CandleSeries};
use crate::domain::shared::Timestamp;

/// `Open Time` column.
pub const OPEN_TIME: &str = "Open Time";
/// `Open` column.
pub const OPEN: &str = "Open";
/// `High` column.
pub const HIGH: &str = "High";
/// `Low` column.
pub const LOW: &str = "Low";
/// `Close` column.
pub const CLOSE: &str = "Close";
/// `Volume` column.
pub const VOLUME: &str = "Volume";
/// `Close Time` column.
pub const CLOSE_TIME: &str = "Close Time";
/// `Quote Asset Volume` column.
pub const QUOTE_ASSET_VOLUME: &str = "Quote Asset Volume";
/// `Number of Trades` column.
pub const NUMBER_OF_TRADES: &str = "Number of Trades";
/// `Taker Buy Base Asset Volume` column.
pub const TAKER_BUY_BASE: &str = "Taker Buy Base Asset Volume";
/// `Taker Buy Quote Asset Volume` column.
pub const TAKER_BUY_QUOTE: &str = "Taker Buy Quote Asset Volume";
/// `Ignore` column.
pub const IGNORE: &str = "Ignore";

/// Errors from encoding or decoding a series file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File could not be opened or created.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// A required column is absent.
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),

    /// A column has a type that cannot be decoded.
    #[error("Column '{column}' has unsupported type {data_type}")]
    UnsupportedType {
        /// Column name.
        column: &'static str,
        /// Arrow type found.
        data_type: String,
    },

    /// A cell is null or out of range.
    #[error("Column '{column}' row {row}: {message}")]
    InvalidValue {
        /// Column name.
        column: &'static str,
        /// Row index within the batch.
        row: usize,
        /// What was wrong.
        message: String,
    },
}

/// Arrow schema written for every series file.
#[must_use]
pub fn series_schema() -> SchemaRef {
    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    Arc::new(Schema::new(vec![
        Field::new(
            OPEN_TIME,
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            false,
        ),
        text(OPEN),
        text(HIGH),
        text(LOW),
        text(CLOSE),
        text(VOLUME),
        Field::new(CLOSE_TIME, DataType::Int64, false),
        text(QUOTE_ASSET_VOLUME),
        Field::new(NUMBER_OF_TRADES, DataType::Int64, false),
        text(TAKER_BUY_BASE),
        text(TAKER_BUY_QUOTE),
        text(IGNORE),
    ]))
}

/// Write `series` to `path` as a Snappy-compressed Parquet file.
pub fn write_series_file(path: &Path, series: &CandleSeries) -> Result<(), CodecError> {
    let batch = encode_batch(series)?;
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Read the series stored in the Parquet file at `path`.
pub fn read_series_file(path: &Path) -> Result<CandleSeries, CodecError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut candles = Vec::new();
    for batch in reader {
        candles.extend(decode_batch(&batch?)?);
    }
    Ok(CandleSeries::new(candles))
}

/// Build a record batch from `series`.
pub fn encode_batch(series: &CandleSeries) -> Result<RecordBatch, CodecError> {
    let rows = series.candles();

    let open_time = rows
        .iter()
        .enumerate()
        .map(|(row, c)| {
            c.open_time.unix_nanos().ok_or_else(|| CodecError::InvalidValue {
                column: OPEN_TIME,
                row,
                message: format!("{} not representable in nanoseconds", c.open_time),
            })
        })
        .collect::<Result<Vec<i64>, _>>()?;
    let trades = rows
        .iter()
        .enumerate()
        .map(|(row, c)| {
            i64::try_from(c.number_of_trades).map_err(|e| CodecError::InvalidValue {
                column: NUMBER_OF_TRADES,
                row,
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<i64>, _>>()?;

    let text = |f: fn(&Candle) -> String| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(TimestampNanosecondArray::from(open_time)),
        text(|c| c.open.to_string()),
        text(|c| c.high.to_string()),
        text(|c| c.low.to_string()),
        text(|c| c.close.to_string()),
        text(|c| c.volume.to_string()),
        Arc::new(Int64Array::from(
            rows.iter()
                .map(|c| c.close_time.unix_millis())
                .collect::<Vec<_>>(),
        )),
        text(|c| c.quote_asset_volume.to_string()),
        Arc::new(Int64Array::from(trades)),
        text(|c| c.taker_buy_base_asset_volume.to_string()),
        text(|c| c.taker_buy_quote_asset_volume.to_string()),
        text(|c| c.ignore.clone()),
    ];

    Ok(RecordBatch::try_new(series_schema(), arrays)?)
}

/// Decode the candle rows of one record batch.
pub fn decode_batch(batch: &RecordBatch) -> Result<Vec<Candle>, CodecError> {
    let open_time = timestamps(batch, OPEN_TIME)?;
    let open = decimals(batch, OPEN)?;
    let high = decimals(batch, HIGH)?;
    let low = decimals(batch, LOW)?;
    let close = decimals(batch, CLOSE)?;
    let volume = decimals(batch, VOLUME)?;
    let close_time = timestamps(batch, CLOSE_TIME)?;
    let quote_volume = decimals(batch, QUOTE_ASSET_VOLUME)?;
    let trades = integers(batch, NUMBER_OF_TRADES)?;
    let taker_base = decimals(batch, TAKER_BUY_BASE)?;
    let taker_quote = decimals(batch, TAKER_BUY_QUOTE)?;
    let ignore = strings(batch, IGNORE)?;

    (0..batch.num_rows())
        .map(|row| {
            let number_of_trades =
                u64::try_from(trades[row]).map_err(|e| CodecError::InvalidValue {
                    column: NUMBER_OF_TRADES,
                    row,
                    message: e.to_string(),
                })?;
            Ok(Candle {
                open_time: open_time[row],
                open: open[row],
                high: high[row],
                low: low[row],
                close: close[row],
                volume: volume[row],
                close_time: close_time[row],
                quote_asset_volume: quote_volume[row],
                number_of_trades,
                taker_buy_base_asset_volume: taker_base[row],
                taker_buy_quote_asset_volume: taker_quote[row],
                ignore: ignore[row].clone(),
            })
        })
        .collect()
}

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef, CodecError> {
    batch
        .column_by_name(name)
        .ok_or(CodecError::MissingColumn(name))
}

fn null_at(column: &'static str, row: usize) -> CodecError {
    CodecError::InvalidValue {
        column,
        row,
        message: "null value".to_string(),
    }
}

fn strings(batch: &RecordBatch, name: &'static str) -> Result<Vec<String>, CodecError> {
    let source = column(batch, name)?;
    let utf8 = cast(source, &DataType::Utf8)?;
    let values = utf8
        .as_string_opt::<i32>()
        .ok_or_else(|| CodecError::UnsupportedType {
            column: name,
            data_type: source.data_type().to_string(),
        })?;

    values
        .iter()
        .enumerate()
        .map(|(row, v)| v.map(str::to_string).ok_or_else(|| null_at(name, row)))
        .collect()
}

fn decimals(batch: &RecordBatch, name: &'static str) -> Result<Vec<Decimal>, CodecError> {
    strings(batch, name)?
        .iter()
        .enumerate()
        .map(|(row, s)| {
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .map_err(|e| CodecError::InvalidValue {
                    column: name,
                    row,
                    message: format!("'{s}' is not a decimal: {e}"),
                })
        })
        .collect()
}

fn integers(batch: &RecordBatch, name: &'static str) -> Result<Vec<i64>, CodecError> {
    let source = column(batch, name)?;
    if !source.data_type().is_integer() {
        return Err(CodecError::UnsupportedType {
            column: name,
            data_type: source.data_type().to_string(),
        });
    }
    raw_i64(source, name)
}

fn timestamps(batch: &RecordBatch, name: &'static str) -> Result<Vec<Timestamp>, CodecError> {
    let source = column(batch, name)?;
    let unit = match source.data_type() {
        DataType::Timestamp(unit, _) => *unit,
        t if t.is_integer() => TimeUnit::Millisecond,
        other => {
            return Err(CodecError::UnsupportedType {
                column: name,
                data_type: other.to_string(),
            });
        }
    };

    raw_i64(source, name)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            to_timestamp(v, unit).ok_or_else(|| CodecError::InvalidValue {
                column: name,
                row,
                message: format!("{v} out of range for {unit:?}"),
            })
        })
        .collect()
}

fn raw_i64(source: &ArrayRef, name: &'static str) -> Result<Vec<i64>, CodecError> {
    let int64 = cast(source, &DataType::Int64)?;
    let values = int64
        .as_primitive_opt::<Int64Type>()
        .ok_or_else(|| CodecError::UnsupportedType {
            column: name,
            data_type: source.data_type().to_string(),
        })?;

    values
        .iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| null_at(name, row)))
        .collect()
}

fn to_timestamp(value: i64, unit: TimeUnit) -> Option<Timestamp> {
    match unit {
        TimeUnit::Second => value.checked_mul(1000).and_then(Timestamp::from_unix_millis),
        TimeUnit::Millisecond => Timestamp::from_unix_millis(value),
        TimeUnit::Microsecond => Timestamp::from_unix_micros(value),
        TimeUnit::Nanosecond => Some(Timestamp::from_unix_nanos(value)),
    }
}
