/// Submission service - hands finalized drafts to the booking-creation collaborator
use super::booking_session::BookingSession;
use crate::application::dto::BookingSubmission;
use crate::domain::base::DomainError;
use crate::domain::services::Clock;
use crate::domain::value_objects::{DraftId, ValidationErrors};
use serde::Serialize;
use std::future::Future;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Booking rejected: {} field(s) need attention", .0.len())]
    Rejected(ValidationErrors),

    #[error("Booking gateway error: {0}")]
    Gateway(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Receipt returned by the gateway for a created booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub draft_id: DraftId,
}

/// External collaborator that turns a submission into a real booking
pub trait BookingGateway {
    fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> impl Future<Output = SubmissionResult<BookingConfirmation>> + Send;
}

/// Gateway that keeps accepted submissions in memory
#[derive(Debug, Default)]
pub struct InMemoryBookingGateway {
    accepted: Mutex<Vec<BookingSubmission>>,
    failure: Option<String>,
}

impl InMemoryBookingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that refuses every booking with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        InMemoryBookingGateway {
            accepted: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    pub async fn accepted(&self) -> Vec<BookingSubmission> {
        self.accepted.lock().await.clone()
    }
}

impl BookingGateway for InMemoryBookingGateway {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> SubmissionResult<BookingConfirmation> {
        if let Some(message) = &self.failure {
            return Err(SubmissionError::Gateway(message.clone()));
        }

        let mut accepted = self.accepted.lock().await;
        accepted.push(submission.clone());
        Ok(BookingConfirmation {
            booking_id: format!("BK-{:05}", accepted.len()),
            draft_id: submission.draft_id,
        })
    }
}

/// Use case for submitting a session's draft
///
/// The draft is marked submitted only after the gateway accepts it, so a
/// gateway failure leaves the session editable for a retry by the user.
pub struct SubmitBooking<'a, G: BookingGateway> {
    gateway: &'a G,
}

impl<'a, G: BookingGateway> SubmitBooking<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub async fn execute<C: Clock>(
        &self,
        session: &mut BookingSession<C>,
    ) -> SubmissionResult<BookingConfirmation> {
        let submission = session.finalize()?;

        tracing::info!(
            "Submitting draft {} for venue {} ({} guests, total {:.2} {})",
            submission.draft_id,
            submission.venue_id,
            submission.guest_count,
            submission.price.total,
            submission.price.currency
        );

        let confirmation = match self.gateway.create_booking(&submission).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                tracing::error!("Booking gateway refused draft {}: {}", submission.draft_id, e);
                return Err(e);
            }
        };

        session.mark_submitted()?;
        tracing::info!(
            "Draft {} confirmed as booking {}",
            confirmation.draft_id,
            confirmation.booking_id
        );
        Ok(confirmation)
    }
}
