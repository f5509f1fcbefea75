//! Read-only lookup service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LookupQuery, LookupRepository};
use crate::domain::{Error, Lookup, LookupId, LookupKind};

/// Lookup service implementing [`LookupQuery`].
#[derive(Clone)]
pub struct Lookups {
    lookups: Arc<dyn LookupRepository>,
}

impl Lookups {
    /// Create the service over the lookup repository.
    pub fn new(lookups: Arc<dyn LookupRepository>) -> Self {
        Self { lookups }
    }
}

fn capitalise(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[async_trait]
impl LookupQuery for Lookups {
    async fn list(&self, kind: LookupKind) -> Result<Vec<Lookup>, Error> {
        Ok(self.lookups.list(kind).await?)
    }

    async fn get(&self, kind: LookupKind, id: LookupId) -> Result<Lookup, Error> {
        self.lookups
            .find(kind, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("{} not found", capitalise(kind.label()))))
    }
}
