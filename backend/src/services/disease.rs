//! Disease detection over uploaded images
//!
//! Images arrive base64 encoded (optionally as a data URL). Decoding and
//! classification are CPU bound, so they run on the blocking pool under a
//! timeout.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use std::time::Duration;

use shared::{AdvisoryEngine, DecodeError, DiseaseAssessment, RandomSource};

use crate::error::{AppError, AppResult};

/// Strip an optional data-URL header and decode the base64 body
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let body = match payload.split_once(',') {
        Some((_, body)) => body,
        None => payload,
    };
    let body = body.trim();
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }

    STANDARD
        .decode(body)
        .map_err(|e| DecodeError::Encoding(e.to_string()))
}

#[derive(Clone)]
pub struct DiseaseService {
    engine: Arc<AdvisoryEngine>,
    max_image_bytes: usize,
    timeout: Duration,
}

impl DiseaseService {
    pub fn new(engine: Arc<AdvisoryEngine>, max_image_bytes: usize, timeout: Duration) -> Self {
        Self {
            engine,
            max_image_bytes,
            timeout,
        }
    }

    /// Decode, classify and describe one image
    ///
    /// The timeout only bounds how long the request waits. A timed-out
    /// decode keeps running on the blocking pool until it finishes.
    pub async fn assess<R>(&self, payload: &str, mut rng: R) -> AppResult<DiseaseAssessment>
    where
        R: RandomSource + Send + 'static,
    {
        let bytes = decode_image_payload(payload)?;
        if bytes.len() > self.max_image_bytes {
            return Err(AppError::PayloadTooLarge {
                size: bytes.len(),
                limit: self.max_image_bytes,
            });
        }

        let engine = self.engine.clone();
        let task = tokio::task::spawn_blocking(move || engine.assess_disease_image(&bytes, &mut rng));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => Ok(result?),
            Ok(Err(e)) => Err(AppError::Internal(format!("classification task failed: {}", e))),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Image decoding timed out; the blocking task runs on to completion"
                );
                Err(AppError::DecodeTimeout)
            }
        }
    }
}
