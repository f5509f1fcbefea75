//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies keep every field optional so a missing value is reported
//! with its field name rather than as an opaque serde failure. Ids arrive
//! either as JSON numbers or numeric strings; both are accepted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidNumber,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

struct ValidationError {
    field: &'static str,
    reason: String,
}

impl ValidationError {
    fn new(field: FieldName, reason: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            reason: reason.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.reason).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.reason).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Identifier as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

/// Float as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be an integer id"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Unwrap a required field or report it by name.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse an id supplied in a body or query string.
pub(crate) fn parse_id(value: RawId, field: FieldName) -> Result<i64, Error> {
    match value {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| invalid_id_error(field, &text)),
    }
}

/// Parse an id that must be present.
pub(crate) fn parse_required_id(value: Option<RawId>, field: FieldName) -> Result<i64, Error> {
    parse_id(require(value, field)?, field)
}

/// Parse an id that may be absent.
pub(crate) fn parse_optional_id(
    value: Option<RawId>,
    field: FieldName,
) -> Result<Option<i64>, Error> {
    value.map(|raw| parse_id(raw, field)).transpose()
}

/// Parse a nullable id where absence and `null` mean different things.
pub(crate) fn parse_nullable_id(
    value: Option<Option<RawId>>,
    field: FieldName,
) -> Result<Option<Option<i64>>, Error> {
    value
        .map(|inner| inner.map(|raw| parse_id(raw, field)).transpose())
        .transpose()
}

/// Parse a query-string id filter; blank values are ignored.
pub(crate) fn parse_id_filter(value: Option<&str>, field: FieldName) -> Result<Option<i64>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| invalid_id_error(field, text)),
    }
}

fn parse_number(value: RawNumber, field: FieldName) -> Result<f64, Error> {
    match value {
        RawNumber::Number(number) => Ok(number),
        RawNumber::Text(text) => text.trim().parse().map_err(|_| {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} must be a number"))
                .with_value(ErrorCode::InvalidNumber, text.as_str())
        }),
    }
}

/// Parse a required float.
pub(crate) fn parse_required_number(
    value: Option<RawNumber>,
    field: FieldName,
) -> Result<f64, Error> {
    parse_number(require(value, field)?, field)
}

/// Parse a float that may be absent; presence is checked by the service.
pub(crate) fn parse_optional_number(
    value: Option<RawNumber>,
    field: FieldName,
) -> Result<Option<f64>, Error> {
    value.map(|raw| parse_number(raw, field)).transpose()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(
        field,
        format!("{name} must be an RFC 3339 timestamp or a YYYY-MM-DD date"),
    )
    .with_value(ErrorCode::InvalidTimestamp, value)
}

/// Parse an RFC 3339 timestamp or a bare date, read as midnight UTC.
pub(crate) fn parse_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| invalid_timestamp_error(field, value))
}

/// Parse a required timestamp field.
pub(crate) fn parse_required_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    parse_timestamp(&require(value, field)?, field)
}

/// Parse a timestamp that may be absent.
pub(crate) fn parse_optional_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value.map(|text| parse_timestamp(&text, field)).transpose()
}

/// Deserialize a present field, including `null`, as `Some`.
///
/// Paired with `#[serde(default)]` this separates an absent key (`None`)
/// from an explicit `null` (`Some(None)`).
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
