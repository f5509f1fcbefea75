//! Capsule and capsule content domain services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use crate::domain::ports::{
    CapsuleContentRepository, CapsuleContentService, CapsuleRepository, CapsuleService,
    CreateCapsuleContentRequest, CreateCapsuleRequest, LookupRepository,
    UpdateCapsuleContentRequest, UpdateCapsuleRequest,
};
use crate::domain::service_support::{
    ensure_max_chars, referenced_but_missing, require_lookup, required, stored_lookup,
};
use crate::domain::{
    CAPSULE_TITLE_MAX_CHARS, CapsuleContent, CapsuleContentDetail, CapsuleContentFilter,
    CapsuleContentId, CapsuleId, Error, LookupKind, MEDIA_URL_MAX_CHARS, NewCapsule,
    NewCapsuleContent, TimeCapsule,
};

const INVALID_STATUS: &str = "Invalid capsule status id sent";
const INVALID_TYPE: &str = "Invalid capsule type id sent";
const INVALID_CAPSULE: &str = "Invalid capsule id sent";
const INVALID_CONTENT_TYPE: &str = "Invalid content type id sent";

fn capsule_not_found() -> Error {
    Error::not_found("Time capsule not found")
}

fn content_not_found() -> Error {
    Error::not_found("Capsule content not found")
}

/// Capsule service implementing [`CapsuleService`].
#[derive(Clone)]
pub struct Capsules {
    capsules: Arc<dyn CapsuleRepository>,
    lookups: Arc<dyn LookupRepository>,
    clock: Arc<dyn Clock>,
}

impl Capsules {
    /// Create the service over its repositories and clock.
    pub fn new(
        capsules: Arc<dyn CapsuleRepository>,
        lookups: Arc<dyn LookupRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            capsules,
            lookups,
            clock,
        }
    }
}

#[async_trait]
impl CapsuleService for Capsules {
    async fn list(&self) -> Result<Vec<TimeCapsule>, Error> {
        Ok(self.capsules.list().await?)
    }

    async fn get(&self, id: CapsuleId) -> Result<TimeCapsule, Error> {
        self.capsules.find(id).await?.ok_or_else(capsule_not_found)
    }

    async fn create(&self, request: CreateCapsuleRequest) -> Result<TimeCapsule, Error> {
        ensure_max_chars("title", &request.title, CAPSULE_TITLE_MAX_CHARS)?;
        require_lookup(
            self.lookups.as_ref(),
            LookupKind::CapsuleStatus,
            request.status,
            INVALID_STATUS,
        )
        .await?;
        require_lookup(
            self.lookups.as_ref(),
            LookupKind::CapsuleType,
            request.capsule_type,
            INVALID_TYPE,
        )
        .await?;

        let capsule = self
            .capsules
            .insert(&NewCapsule {
                creator: request.creator,
                status: request.status,
                capsule_type: request.capsule_type,
                title: request.title,
                descriptions: request.descriptions,
                opening_date: request.opening_date,
                location_x: request.location_x,
                location_y: request.location_y,
                created_at: self.clock.utc(),
            })
            .await?;
        Ok(capsule)
    }

    async fn update(&self, request: UpdateCapsuleRequest) -> Result<(), Error> {
        let mut capsule = self.get(request.id).await?;
        let title = required("title", request.title)?;
        let descriptions = required("descriptions", request.descriptions)?;
        let opening_date = required("opening_date", request.opening_date)?;
        let location_x = required("location_x", request.location_x)?;
        let location_y = required("location_y", request.location_y)?;
        ensure_max_chars("title", &title, CAPSULE_TITLE_MAX_CHARS)?;

        if let Some(status) = request.status {
            require_lookup(
                self.lookups.as_ref(),
                LookupKind::CapsuleStatus,
                status,
                INVALID_STATUS,
            )
            .await?;
            capsule.status = status;
        }
        if let Some(capsule_type) = request.capsule_type {
            require_lookup(
                self.lookups.as_ref(),
                LookupKind::CapsuleType,
                capsule_type,
                INVALID_TYPE,
            )
            .await?;
            capsule.capsule_type = capsule_type;
        }

        capsule.title = title;
        capsule.descriptions = descriptions;
        capsule.opening_date = opening_date;
        capsule.location_x = location_x;
        capsule.location_y = location_y;

        let updated = self.capsules.update(&capsule).await.map_err(|err| {
            error!(capsule_id = %capsule.id, error = %err, "error updating capsule");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(capsule_not_found())
        }
    }

    async fn delete(&self, id: CapsuleId) -> Result<(), Error> {
        if self.capsules.delete(id).await? {
            Ok(())
        } else {
            Err(capsule_not_found())
        }
    }
}

/// Capsule content service implementing [`CapsuleContentService`].
#[derive(Clone)]
pub struct CapsuleContents {
    contents: Arc<dyn CapsuleContentRepository>,
    capsules: Arc<dyn CapsuleRepository>,
    lookups: Arc<dyn LookupRepository>,
    clock: Arc<dyn Clock>,
}

impl CapsuleContents {
    /// Create the service over its repositories and clock.
    pub fn new(
        contents: Arc<dyn CapsuleContentRepository>,
        capsules: Arc<dyn CapsuleRepository>,
        lookups: Arc<dyn LookupRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contents,
            capsules,
            lookups,
            clock,
        }
    }

    async fn require_capsule(&self, id: CapsuleId) -> Result<(), Error> {
        match self.capsules.find(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(INVALID_CAPSULE)),
        }
    }

    async fn detail(&self, content: CapsuleContent) -> Result<CapsuleContentDetail, Error> {
        let capsule = self
            .capsules
            .find(content.capsule)
            .await?
            .ok_or_else(|| referenced_but_missing("capsule", content.capsule))?;
        let content_type = stored_lookup(
            self.lookups.as_ref(),
            LookupKind::ContentType,
            content.content_type,
        )
        .await?;
        Ok(CapsuleContentDetail {
            content,
            capsule,
            content_type,
        })
    }
}

fn check_media_url(media_url: Option<&str>) -> Result<(), Error> {
    media_url.map_or(Ok(()), |url| {
        ensure_max_chars("media_url", url, MEDIA_URL_MAX_CHARS)
    })
}

#[async_trait]
impl CapsuleContentService for CapsuleContents {
    async fn list(
        &self,
        filter: CapsuleContentFilter,
    ) -> Result<Vec<CapsuleContentDetail>, Error> {
        let rows = self.contents.list(&filter).await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.detail(row).await?);
        }
        Ok(details)
    }

    async fn get(&self, id: CapsuleContentId) -> Result<CapsuleContentDetail, Error> {
        let content = self.contents.find(id).await?.ok_or_else(content_not_found)?;
        self.detail(content).await
    }

    async fn create(
        &self,
        request: CreateCapsuleContentRequest,
    ) -> Result<CapsuleContentDetail, Error> {
        check_media_url(request.media_url.as_deref())?;
        self.require_capsule(request.capsule).await?;
        require_lookup(
            self.lookups.as_ref(),
            LookupKind::ContentType,
            request.content_type,
            INVALID_CONTENT_TYPE,
        )
        .await?;

        let content = self
            .contents
            .insert(&NewCapsuleContent {
                capsule: request.capsule,
                content_type: request.content_type,
                content: request.content,
                media_url: request.media_url,
                created_at: self.clock.utc(),
            })
            .await?;
        self.detail(content).await
    }

    async fn update(&self, request: UpdateCapsuleContentRequest) -> Result<(), Error> {
        let mut content = self
            .contents
            .find(request.id)
            .await?
            .ok_or_else(content_not_found)?;
        let body = required("content", request.content)?;
        if let Some(media_url) = &request.media_url {
            check_media_url(media_url.as_deref())?;
        }

        if let Some(capsule) = request.capsule {
            self.require_capsule(capsule).await?;
            content.capsule = capsule;
        }
        if let Some(content_type) = request.content_type {
            require_lookup(
                self.lookups.as_ref(),
                LookupKind::ContentType,
                content_type,
                INVALID_CONTENT_TYPE,
            )
            .await?;
            content.content_type = content_type;
        }
        if let Some(media_url) = request.media_url {
            content.media_url = media_url;
        }
        content.content = body;

        let updated = self.contents.update(&content).await.map_err(|err| {
            error!(capsule_content_id = %content.id, error = %err, "error updating capsule content");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(content_not_found())
        }
    }

    async fn delete(&self, id: CapsuleContentId) -> Result<(), Error> {
        if self.contents.delete(id).await? {
            Ok(())
        } else {
            Err(content_not_found())
        }
    }
}

#[cfg(test)]
#[path = "capsule_service_tests.rs"]
mod tests;
