//! Conversion of driver rows into JSON objects.
//!
//! Column names are kept exactly as the server reports them (`now` for
//! `SELECT NOW()`). Timestamps are rendered in UTC with millisecond precision
//! and a `Z` suffix.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo};
use tracing::trace;

/// A result row keyed by column name.
pub type Row = Map<String, Value>;

/// Convert a Postgres row into a JSON object.
///
/// Columns whose type has no JSON mapping (or fail to decode) become `null`.
pub fn to_json(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .map(|column| {
            let type_name = column.type_info().name();
            let value = decode_column(row, column.ordinal(), type_name).unwrap_or_else(|e| {
                trace!(
                    column = column.name(),
                    type_name,
                    error = %e,
                    "column not representable as JSON"
                );
                Value::Null
            });
            (column.name().to_owned(), value)
        })
        .collect()
}

fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map(|ts| Value::String(format_timestamp(ts))),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map(|ts| Value::String(format_timestamp(ts.and_utc()))),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)?
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(idx)?
            .map(|t| Value::String(t.format("%H:%M:%S%.3f").to_string())),
        "BOOL" => row.try_get::<Option<bool>, _>(idx)?.map(Value::Bool),
        "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)?
            .map(|f| float_value(f64::from(f))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.map(float_value),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CHAR" => {
            row.try_get::<Option<String>, _>(idx)?.map(Value::String)
        }
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(idx)?,
        _ => None,
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
