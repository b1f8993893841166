//! Per-record forwarding: validate, synthesize, submit, classify

use std::sync::Arc;

use shared::{ContactRecord, MediaAcceptance, MediaProcessingRequest};
use shared::{contact_error, contact_info, contact_warn};

use crate::core::builder::RequestBuilder;
use crate::error::{ForwarderError, ForwarderResult};
use crate::traits::MediaClient;

/// Synthesize the request for a record that is known to carry a contact id
pub fn prepare_request(
    builder: &RequestBuilder,
    record: &ContactRecord,
) -> ForwarderResult<MediaProcessingRequest> {
    if record.correlation_id().is_none() {
        return Err(ForwarderError::MissingContactId);
    }
    Ok(builder.build(record))
}

/// Forwards contact records to the media API
pub struct Forwarder<C>
where
    C: MediaClient + 'static,
{
    builder: RequestBuilder,
    client: Arc<C>,
}

impl<C> Forwarder<C>
where
    C: MediaClient + 'static,
{
    pub fn new(builder: RequestBuilder, client: C) -> Self {
        Self {
            builder,
            client: Arc::new(client),
        }
    }

    /// Synthesize the request without submitting it
    pub fn prepare(&self, record: &ContactRecord) -> ForwarderResult<MediaProcessingRequest> {
        prepare_request(&self.builder, record)
    }

    /// Synthesize and submit one record.
    ///
    /// Submission failures come back as `ForwarderError::Submission`; whether
    /// to resubmit is up to the caller, see [`ForwarderError::is_retryable`].
    pub async fn forward(&self, record: &ContactRecord) -> ForwarderResult<MediaAcceptance> {
        let request = self.prepare(record)?;
        let contact_id = request.external_id().to_string();

        match self.client.submit(&request).await {
            Ok(acceptance) => {
                contact_info!(
                    contact_id,
                    media_id = %acceptance.media_id,
                    "📨 Media accepted"
                );
                Ok(acceptance)
            }
            Err(failure) => {
                if failure.is_retryable() {
                    contact_warn!(contact_id, "⚠️ Submission failed, retryable: {}", failure);
                } else {
                    contact_error!(contact_id, "❌ Submission rejected: {}", failure);
                }
                Err(ForwarderError::Submission { contact_id, failure })
            }
        }
    }
}
