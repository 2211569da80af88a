//! Column conversions shared by the query modules.
//!
//! Dates are stored as `YYYY-MM-DD` text, timestamps as RFC 3339 text and
//! enums by their `as_str` names.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

/// Parses a text column with `FromStr`, reporting failures as conversion
/// errors on that column.
pub(crate) fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid value '{text}': {e}").into(),
        )
    })
}

/// Like [`parse_column`] for a nullable column.
pub(crate) fn parse_optional_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text: Option<String> = row.get(idx)?;
    text.map(|text| {
        text.parse::<T>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("Invalid value '{text}': {e}").into(),
            )
        })
    })
    .transpose()
}

pub(crate) fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Date> {
    parse_column(row, idx)
}

pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    parse_column(row, idx)
}

/// Reads an integer ID column.
pub(crate) fn id_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

pub(crate) fn optional_id_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<u64>> {
    Ok(row.get::<_, Option<i64>>(idx)?.map(|id| id as u64))
}
