//! CSV snapshot parsing and DataFrame <-> record conversion.
//!
//! Snapshots are fetched as raw bytes, read into a polars DataFrame, then
//! converted to typed records. Records are rebuilt from named columns only,
//! so the synthetic unnamed index column every snapshot carries never
//! survives normalization. The reverse conversions produce the canonical
//! column sets consumed by chart and table renderers, and always emit the
//! full schema even for an empty table.

use std::io::Cursor;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use polars::prelude::*;

use crate::error::{Error, Result};
use crate::models::{HistoryRecord, MessageKind, MessageRecord, OccurrenceRecord};
use crate::parsing::species;

/// Timestamp formats the device has been observed to write.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse raw snapshot bytes into a DataFrame.
pub fn parse_snapshot_csv(bytes: Vec<u8>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| Error::Schema(format!("failed to parse snapshot CSV: {}", e)))?;
    Ok(df)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(ts);
        }
    }
    Err(Error::Schema(format!("unparseable timestamp '{}'", raw)))
}

fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    df.column(name)
        .map_err(|_| Error::Schema(format!("missing required column '{}'", name)))?
        .str()
        .map_err(|_| Error::Schema(format!("column '{}' is not a string column", name)))
}

fn int_column(df: &DataFrame, name: &str) -> Result<Int64Chunked> {
    let column = df
        .column(name)
        .map_err(|_| Error::Schema(format!("missing required column '{}'", name)))?
        .cast(&DataType::Int64)
        .map_err(|_| Error::Schema(format!("column '{}' is not numeric", name)))?;
    let values = column
        .i64()
        .map_err(|_| Error::Schema(format!("column '{}' is not numeric", name)))?;
    Ok(values.clone())
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| Error::Schema(format!("missing '{}' at row {}", column, row)))
}

/// Fractional hour of day: whole hours plus minutes as a fraction, so events
/// thirty minutes apart separate visually inside one clock hour.
fn fractional_hour(ts: &NaiveDateTime) -> f64 {
    ts.hour() as f64 + ts.minute() as f64 / 60.0
}

/// Fractional day key for multi-day trend plotting.
fn fractional_day_hour(ts: &NaiveDateTime) -> f64 {
    ts.day() as f64 + ts.hour() as f64 / 100.0 + ts.minute() as f64 / 100.0 / 60.0
}

/// Convert an occurrence snapshot DataFrame into normalized records.
pub fn dataframe_to_occurrences(df: &DataFrame) -> Result<Vec<OccurrenceRecord>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let feeders = str_column(df, "Feeder Name")?;
    let species_labels = str_column(df, "Species")?;
    let stamps = str_column(df, "Date Time")?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let feeder = required(feeders.get(i), "Feeder Name", i)?;
        let label = required(species_labels.get(i), "Species", i)?;
        let stamp = required(stamps.get(i), "Date Time", i)?;
        let timestamp = parse_timestamp(stamp)?;

        records.push(OccurrenceRecord {
            feeder_name: feeder.to_string(),
            species: label.to_string(),
            timestamp,
            hour: fractional_hour(&timestamp),
            day_hour: fractional_day_hour(&timestamp),
            common_name: species::common_name(label),
        });
    }
    Ok(records)
}

/// Convert a message snapshot DataFrame into normalized records.
///
/// Heartbeat rows (event number zero) are preserved here; the aggregator
/// drops them before the merged table is published.
pub fn dataframe_to_messages(df: &DataFrame) -> Result<Vec<MessageRecord>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let feeders = str_column(df, "Feeder Name")?;
    let event_nums = int_column(df, "Event Num")?;
    let kinds = str_column(df, "Message Type")?;
    let stamps = str_column(df, "Date Time")?;
    let messages = str_column(df, "Message")?;
    let image_names = str_column(df, "Image Name")?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let feeder = required(feeders.get(i), "Feeder Name", i)?;
        let event_num = required(event_nums.get(i), "Event Num", i)?;
        let kind = MessageKind::from_snapshot_value(required(kinds.get(i), "Message Type", i)?)?;
        let stamp = required(stamps.get(i), "Date Time", i)?;
        let timestamp = parse_timestamp(stamp)?;
        let message = messages.get(i).unwrap_or("").to_string();
        let image_name = image_names.get(i).unwrap_or("").to_string();

        records.push(MessageRecord {
            feeder_name: feeder.to_string(),
            event_num,
            kind,
            timestamp,
            common_name: species::common_name(&message),
            message,
            image_name,
        });
    }
    Ok(records)
}

/// Convert the cumulative daily-history DataFrame into records.
pub fn dataframe_to_history(df: &DataFrame) -> Result<Vec<HistoryRecord>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let years = int_column(df, "Year")?;
    let months = int_column(df, "Month")?;
    let days = int_column(df, "Day")?;
    let names = str_column(df, "Common Name")?;
    let counts = int_column(df, "counts")?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let year = required(years.get(i), "Year", i)? as i32;
        let month = required(months.get(i), "Month", i)? as u32;
        let day = required(days.get(i), "Day", i)? as u32;
        let common_name = required(names.get(i), "Common Name", i)?.to_string();
        let count = required(counts.get(i), "counts", i)?;

        let day_key = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::Schema(format!("invalid date {}-{}-{} at row {}", year, month, day, i))
        })?;

        records.push(HistoryRecord {
            year,
            month,
            day,
            common_name,
            count,
            day_key,
        });
    }
    Ok(records)
}

/// Project occurrence records onto the canonical DataFrame column set.
pub fn occurrences_to_dataframe(records: &[OccurrenceRecord]) -> Result<DataFrame> {
    let n = records.len();
    let mut feeders = Vec::with_capacity(n);
    let mut species_labels = Vec::with_capacity(n);
    let mut stamps = Vec::with_capacity(n);
    let mut hours = Vec::with_capacity(n);
    let mut day_hours = Vec::with_capacity(n);
    let mut commons = Vec::with_capacity(n);

    for record in records {
        feeders.push(record.feeder_name.clone());
        species_labels.push(record.species.clone());
        stamps.push(record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
        hours.push(record.hour);
        day_hours.push(record.day_hour);
        commons.push(record.common_name.clone());
    }

    let df = df!(
        "Feeder Name" => feeders,
        "Species" => species_labels,
        "Date Time" => stamps,
        "Hour" => hours,
        "Day.Hour" => day_hours,
        "Common Name" => commons,
    )?;
    Ok(df)
}

/// Project message records onto the canonical DataFrame column set.
pub fn messages_to_dataframe(records: &[MessageRecord]) -> Result<DataFrame> {
    let n = records.len();
    let mut stamps = Vec::with_capacity(n);
    let mut messages = Vec::with_capacity(n);
    let mut feeders = Vec::with_capacity(n);
    let mut event_nums = Vec::with_capacity(n);
    let mut kinds = Vec::with_capacity(n);
    let mut image_names = Vec::with_capacity(n);
    let mut commons = Vec::with_capacity(n);

    for record in records {
        stamps.push(record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
        messages.push(record.message.clone());
        feeders.push(record.feeder_name.clone());
        event_nums.push(record.event_num);
        kinds.push(record.kind.as_str());
        image_names.push(record.image_name.clone());
        commons.push(record.common_name.clone());
    }

    let df = df!(
        "Date Time" => stamps,
        "Message" => messages,
        "Feeder Name" => feeders,
        "Event Num" => event_nums,
        "Message Type" => kinds,
        "Image Name" => image_names,
        "Common Name" => commons,
    )?;
    Ok(df)
}

/// Project history records onto the canonical DataFrame column set.
pub fn history_to_dataframe(records: &[HistoryRecord]) -> Result<DataFrame> {
    let n = records.len();
    let mut years = Vec::with_capacity(n);
    let mut months = Vec::with_capacity(n);
    let mut days = Vec::with_capacity(n);
    let mut names = Vec::with_capacity(n);
    let mut counts = Vec::with_capacity(n);
    let mut day_keys = Vec::with_capacity(n);

    for record in records {
        years.push(record.year as i64);
        months.push(record.month as i64);
        days.push(record.day as i64);
        names.push(record.common_name.clone());
        counts.push(record.count);
        day_keys.push(record.day_key.format("%Y-%m-%d").to_string());
    }

    let df = df!(
        "Year" => years,
        "Month" => months,
        "Day" => days,
        "Common Name" => names,
        "counts" => counts,
        "Day Key" => day_keys,
    )?;
    Ok(df)
}
