use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{types::Type, Row};

pub struct Utils {}

impl Utils {
    /// Storage format for timestamp columns.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn get_timestamp(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
        let text: String = row.get(idx)?;
        Self::parse_timestamp(&text, idx)
    }

    pub fn get_opt_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveDateTime>> {
        let text: Option<String> = row.get(idx)?;
        text.map(|t| Self::parse_timestamp(&t, idx)).transpose()
    }

    fn parse_timestamp(text: &str, idx: usize) -> rusqlite::Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, Self::TIMESTAMP_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    /// Reads a text column holding the string form of a closed enum.
    pub fn get_enum<E>(row: &Row, idx: usize) -> rusqlite::Result<E>
    where
        E: FromStr,
        E::Err: std::error::Error + Send + Sync + 'static,
    {
        let text: String = row.get(idx)?;
        text.parse::<E>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }
}
