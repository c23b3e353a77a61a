//! Short link creation, resolution and management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewShortLink, Principal, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::clock::Clock;
use crate::utils::code_generator::{CodeGenerator, max_code_length};
use crate::utils::url_normalizer::{normalize_url, validate_target_url};

/// How many times an insert is retried after the store reports a code collision.
pub const MAX_INSERT_ATTEMPTS: usize = 5;

/// Service owning the short link lifecycle.
///
/// Handles URL normalization, code generation, redirect counting and the
/// owner-or-administrator policy for edits and deletions.
pub struct LinkService<L: ShortLinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: CodeGenerator,
    clock: Arc<dyn Clock>,
    display_prefix: String,
}

impl<L: ShortLinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `repository` - short link storage
    /// - `display_prefix` - domain string shown in front of codes (e.g. `short.com/`)
    /// - `short_url_max_length` - total length budget for prefix plus code
    /// - `clock` - time source for creation dates and code generation
    pub fn new(
        repository: Arc<L>,
        display_prefix: impl Into<String>,
        short_url_max_length: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let display_prefix = display_prefix.into();
        let code_length = max_code_length(short_url_max_length, display_prefix.chars().count());

        Self {
            repository,
            generator: CodeGenerator::new(code_length, clock.clone()),
            clock,
            display_prefix,
        }
    }

    /// Replaces the code generator.
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Length of every generated code.
    pub fn code_length(&self) -> usize {
        self.generator.code_length()
    }

    pub fn display_prefix(&self) -> &str {
        &self.display_prefix
    }

    /// Builds the user-facing short URL for a link.
    pub fn short_url(&self, link: &ShortLink) -> String {
        format!("{}{}", self.display_prefix, link.short_code)
    }

    /// Creates a short link owned by `actor`.
    ///
    /// # Code Generation
    ///
    /// The normalized URL seeds the generator. The generator's existence check only
    /// narrows the odds of a collision; the insert itself relies on the store's
    /// uniqueness constraint. When the store reports [`AppError::CodeTaken`] a fresh
    /// code is generated, up to [`MAX_INSERT_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is blank or malformed.
    /// Returns [`AppError::GenerationExhausted`] if no free code was found.
    /// Returns [`AppError::Conflict`] if every insert attempt lost a race.
    pub async fn create_short_link(
        &self,
        original_url: &str,
        actor: &Principal,
    ) -> Result<ShortLink, AppError> {
        let normalized_url = prepare_url(original_url)?;

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let repository = Arc::clone(&self.repository);
            let code = self
                .generator
                .generate(&normalized_url, move |candidate| {
                    let repository = Arc::clone(&repository);
                    async move { repository.exists_by_code(&candidate).await }
                })
                .await?;

            let new_link = NewShortLink {
                original_url: normalized_url.clone(),
                short_code: code,
                created_by: actor.name().to_string(),
                created_date: self.clock.now(),
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    metrics::counter!("short_links_created_total").increment(1);
                    tracing::info!(
                        id = link.id,
                        code = %link.short_code,
                        created_by = %link.created_by,
                        attempt,
                        "Short link created"
                    );
                    return Ok(link);
                }
                Err(AppError::CodeTaken { code }) => {
                    metrics::counter!("short_code_collisions_total").increment(1);
                    tracing::warn!(%code, attempt, "Short code taken by a concurrent insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(
            "Failed to store a unique short code",
            json!({ "attempts": MAX_INSERT_ATTEMPTS }),
        ))
    }

    /// Resolves a bare code or a full short URL to its original URL.
    ///
    /// The code is the trailing path segment of the input, matched case-sensitively.
    /// Each successful call increments the link's redirect counter exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no code can be extracted.
    /// Returns [`AppError::NotFound`] if no link uses the code.
    pub async fn resolve(&self, code_or_url: &str) -> Result<String, AppError> {
        let code = extract_code(code_or_url);

        if code.is_empty() {
            return Err(AppError::bad_request(
                "Short code is required",
                json!({ "field": "shortUrl" }),
            ));
        }

        let link = self
            .repository
            .record_redirect(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        metrics::counter!("short_link_redirects_total").increment(1);
        tracing::debug!(code, redirect_count = link.redirect_count, "Short link resolved");

        Ok(normalize_url(&link.original_url))
    }

    /// Finds the link behind a bare code or a full short URL without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no code can be extracted.
    /// Returns [`AppError::NotFound`] if no link uses the code.
    pub async fn lookup(&self, code_or_url: &str) -> Result<ShortLink, AppError> {
        let code = extract_code(code_or_url);

        if code.is_empty() {
            return Err(AppError::bad_request(
                "Short code is required",
                json!({ "field": "shortUrl" }),
            ));
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Lists links newest first, together with the total count.
    pub async fn list_links(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<ShortLink>, i64), AppError> {
        let links = self.repository.list(page, page_size).await?;
        let total = self.repository.count().await?;

        Ok((links, total))
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Changes the original URL of a link.
    ///
    /// The short code is never editable. `expected_version` must match the stored
    /// version; a mismatch means someone else edited the link first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist (or vanished mid-update).
    /// Returns [`AppError::Forbidden`] if `actor` is neither owner nor administrator.
    /// Returns [`AppError::Validation`] if the new URL is blank or malformed.
    /// Returns [`AppError::Conflict`] if the link was modified concurrently.
    pub async fn update_link(
        &self,
        id: i64,
        original_url: &str,
        expected_version: i64,
        actor: &Principal,
    ) -> Result<ShortLink, AppError> {
        let link = self.get_link(id).await?;
        authorize_owner_or_admin(&link, actor, "edit")?;

        let normalized_url = prepare_url(original_url)?;

        if let Some(updated) = self
            .repository
            .update_original_url(id, &normalized_url, expected_version)
            .await?
        {
            tracing::info!(id, user = %actor.name(), "Short link updated");
            return Ok(updated);
        }

        match self.repository.find_by_id(id).await? {
            Some(current) => Err(AppError::conflict(
                "Short link was modified by another request",
                json!({
                    "id": id,
                    "expected_version": expected_version,
                    "current_version": current.version,
                }),
            )),
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            )),
        }
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Forbidden`] if `actor` is neither owner nor administrator.
    pub async fn delete_link(&self, id: i64, actor: &Principal) -> Result<(), AppError> {
        let link = self.get_link(id).await?;
        authorize_owner_or_admin(&link, actor, "delete")?;

        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ));
        }

        tracing::info!(id, code = %link.short_code, user = %actor.name(), "Short link deleted");
        Ok(())
    }
}

/// Trims, normalizes and validates a submitted URL.
fn prepare_url(original_url: &str) -> Result<String, AppError> {
    let trimmed = original_url.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "Original URL is required",
            json!({ "field": "original_url" }),
        ));
    }

    let normalized = normalize_url(trimmed);

    validate_target_url(&normalized).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "original_url", "reason": e.to_string() }),
        )
    })?;

    Ok(normalized)
}

/// Extracts the code from a bare code or a string ending in `/<code>`.
///
/// Query strings and fragments are ignored.
pub fn extract_code(code_or_url: &str) -> &str {
    let without_suffix = code_or_url
        .trim()
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    without_suffix
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Allows the link's creator or any administrator.
fn authorize_owner_or_admin(
    link: &ShortLink,
    actor: &Principal,
    action: &str,
) -> Result<(), AppError> {
    if link.is_owned_by(actor.name()) || actor.is_admin() {
        return Ok(());
    }

    tracing::warn!(id = link.id, user = %actor.name(), action, "Forbidden short link access");

    Err(AppError::forbidden(
        "Only the owner or an administrator may change this link",
        json!({ "id": link.id, "action": action }),
    ))
}
