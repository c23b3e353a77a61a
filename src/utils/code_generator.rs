//! Short code generation.
//!
//! Codes are derived from a SHA-256 hash of the seed (normally the normalized target URL),
//! the attempt counter and a nanosecond timestamp. Each attempt therefore hashes a
//! different input, even for identical seeds. The hash is Base64-encoded, reduced to its
//! alphanumeric characters, padded with `'A'` when short and truncated to the configured
//! length.
//!
//! Uniqueness is checked through a caller-supplied async predicate, so the generator has
//! no dependency on a particular store and can be exercised with fakes.

use std::future::Future;
use std::sync::Arc;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::utils::clock::Clock;

/// Number of candidates tried before giving up.
pub const MAX_ATTEMPTS: u32 = 1000;

/// Lower bound for the code length, whatever the display prefix.
pub const MIN_CODE_LENGTH: usize = 4;

/// Character used to right-pad candidates that come out short.
const FILLER: char = 'A';

/// Random bytes used as a seed when the caller supplies none.
const RANDOM_SEED_BYTES: usize = 16;

/// Computes the code length that fits the total length budget.
///
/// `max(4, total_max_length - display_prefix_len)`, saturating at zero before the
/// lower bound is applied.
pub fn max_code_length(total_max_length: usize, display_prefix_len: usize) -> usize {
    total_max_length
        .saturating_sub(display_prefix_len)
        .max(MIN_CODE_LENGTH)
}

/// Builds the candidate code for one attempt.
///
/// Pure function of its inputs: the same `(seed, attempt, timestamp, length)` always
/// yields the same code. The result is exactly `length` ASCII alphanumeric characters.
pub fn candidate_code(seed: &str, attempt: u32, timestamp: DateTime<Utc>, length: usize) -> String {
    let nanos = timestamp
        .timestamp_nanos_opt()
        .unwrap_or_else(|| timestamp.timestamp_micros());
    let input = format!("{seed}|{attempt}|{nanos}");

    let digest = Sha256::digest(input.as_bytes());
    let encoded = base64::engine::general_purpose::STANDARD.encode(digest);

    // Dropping non-alphanumerics removes '+', '/' and '=' from the Base64 alphabet.
    let mut code: String = encoded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(length)
        .collect();

    while code.len() < length {
        code.push(FILLER);
    }

    code
}

/// Produces a random hex seed for callers that have no input string.
fn random_seed() -> Result<String, AppError> {
    let mut buffer = [0u8; RANDOM_SEED_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        tracing::error!(error = %e, "Failed to gather random seed");
        AppError::internal("Failed to generate short code", json!({}))
    })?;

    Ok(hex::encode(buffer))
}

/// Generates short codes that are not yet in use.
#[derive(Clone)]
pub struct CodeGenerator {
    code_length: usize,
    max_attempts: u32,
    clock: Arc<dyn Clock>,
}

impl CodeGenerator {
    /// Creates a generator producing codes of exactly `code_length` characters.
    pub fn new(code_length: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            code_length: code_length.max(MIN_CODE_LENGTH),
            max_attempts: MAX_ATTEMPTS,
            clock,
        }
    }

    /// Overrides the attempt ceiling.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Returns the first candidate for which `exists` reports `false`.
    ///
    /// An empty (or blank) seed is replaced by a random one. `exists` is awaited once per
    /// candidate, in order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationExhausted`] when every attempt collided, and
    /// propagates any error returned by `exists`.
    pub async fn generate<F, Fut>(&self, seed: &str, mut exists: F) -> Result<String, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<bool, AppError>>,
    {
        let seed = if seed.trim().is_empty() {
            random_seed()?
        } else {
            seed.to_string()
        };

        for attempt in 0..self.max_attempts {
            let candidate = candidate_code(&seed, attempt, self.clock.now(), self.code_length);

            if !exists(candidate.clone()).await? {
                if attempt > 0 {
                    tracing::debug!(attempt, code = %candidate, "Found free short code after collisions");
                }
                return Ok(candidate);
            }

            metrics::counter!("short_code_collisions_total").increment(1);
        }

        metrics::counter!("short_code_generation_exhausted_total").increment(1);
        tracing::error!(
            attempts = self.max_attempts,
            "Failed to generate a unique short code"
        );

        Err(AppError::exhausted(
            "Failed to generate unique short code",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}
