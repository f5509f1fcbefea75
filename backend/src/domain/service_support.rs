//! Internal helpers shared by the domain services.

use serde_json::json;

use crate::domain::ports::LookupRepository;
use crate::domain::{Error, Lookup, LookupId, LookupKind};

/// Reject `value` when it is longer than `max` characters.
pub(crate) fn ensure_max_chars(field: &'static str, value: &str, max: usize) -> Result<(), Error> {
    if value.chars().count() > max {
        return Err(
            Error::invalid_request(format!("{field} must be at most {max} characters"))
                .with_details(json!({ "field": field, "max": max })),
        );
    }
    Ok(())
}

/// Unwrap a field that must be present, or report it by name.
pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, Error> {
    value.ok_or_else(|| {
        Error::invalid_request(format!("missing required field: {field}"))
            .with_details(json!({ "field": field, "code": "missing_field" }))
    })
}

/// A stored row pointed at something that no longer exists.
pub(crate) fn referenced_but_missing(what: &str, id: impl std::fmt::Display) -> Error {
    Error::internal(format!("{what} {id} referenced but missing"))
}

/// Resolve a client-supplied lookup id, failing with `reason` as not found.
pub(crate) async fn require_lookup(
    lookups: &dyn LookupRepository,
    kind: LookupKind,
    id: LookupId,
    reason: &str,
) -> Result<Lookup, Error> {
    lookups
        .find(kind, id)
        .await?
        .ok_or_else(|| Error::not_found(reason))
}

/// Resolve a lookup id already stored on a row.
pub(crate) async fn stored_lookup(
    lookups: &dyn LookupRepository,
    kind: LookupKind,
    id: LookupId,
) -> Result<Lookup, Error> {
    lookups
        .find(kind, id)
        .await?
        .ok_or_else(|| referenced_but_missing(kind.label(), id))
}
