//! Lead form controller
//!
//! [`LeadForm`] owns one contact form: its values, its validation errors and
//! the `submitted` / `submitting` flags. Front ends forward edits through
//! [`LeadForm::update_field`] and the submit action through
//! [`LeadForm::submit`], then render from [`LeadForm::snapshot`].
//!
//! At most one webhook request is in flight per form. After a successful
//! submission the form stays in its "submitted" state for the configured
//! delay and then clears itself. The clearing task only holds a weak
//! reference, and dropping the form cancels it.

use serde::Serialize;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::{SubmitError, WebhookClient, WebhookReceipt};
use crate::config::FormConfig;
use crate::error::Result;
use crate::form::{
    is_bot, validate, FieldErrors, FormField, FormState, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
    SUCCESS_MESSAGE,
};
use crate::telemetry::FormMetrics;

/// What a call to [`LeadForm::submit`] did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The webhook accepted the lead; the form clears after the reset delay
    Submitted(WebhookReceipt),

    /// Validation failed; the errors are also stored on the form
    Rejected(FieldErrors),

    /// The webhook request failed; field values are kept for a retry
    Failed(SubmitError),

    /// Nothing was sent and nothing changed
    Ignored,
}

impl SubmitOutcome {
    /// Metric/log label
    pub fn label(&self) -> &'static str {
        match self {
            SubmitOutcome::Submitted(_) => "submitted",
            SubmitOutcome::Rejected(_) => "rejected",
            SubmitOutcome::Failed(_) => "failed",
            SubmitOutcome::Ignored => "ignored",
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Read-only view of the form for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub state: FormState,
    pub errors: FieldErrors,
    pub submitted: bool,
    pub submitting: bool,
    pub notice: Option<String>,
}

impl FormSnapshot {
    /// Message to show above the submit button, if any
    pub fn banner(&self) -> Option<&str> {
        if self.submitted {
            Some(SUCCESS_MESSAGE)
        } else {
            self.notice.as_deref()
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }
}

#[derive(Default)]
struct FormInner {
    state: FormState,
    errors: FieldErrors,
    submitted: bool,
    submitting: bool,
    notice: Option<String>,
    // Bumped on every dispatch
    attempt: u64,
    pending_reset: Option<JoinHandle<()>>,
}

impl FormInner {
    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            state: self.state.clone(),
            errors: self.errors.clone(),
            submitted: self.submitted,
            submitting: self.submitting,
            notice: self.notice.clone(),
        }
    }

    fn cancel_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }

    fn release(&mut self, attempt: u64) {
        if self.attempt == attempt && !self.submitted {
            self.submitting = false;
        }
    }

    // Called from the reset task itself, so the handle is dropped, not aborted.
    fn clear(&mut self) {
        self.pending_reset = None;
        self.state = FormState::default();
        self.errors = FieldErrors::new();
        self.submitted = false;
        self.submitting = false;
        self.notice = None;
    }
}

/// One contact form instance
pub struct LeadForm {
    inner: Arc<Mutex<FormInner>>,
    client: WebhookClient,
    reset_delay: Duration,
    metrics: Option<Arc<FormMetrics>>,
}

impl LeadForm {
    /// Create an empty form posting to the configured webhook
    pub fn new(config: &FormConfig) -> Result<Self> {
        let client = WebhookClient::new(config)?;
        Ok(Self::with_client(client, config.reset_delay()))
    }

    /// Create an empty form around an existing client
    pub fn with_client(client: WebhookClient, reset_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FormInner::default())),
            client,
            reset_delay,
            metrics: None,
        }
    }

    /// Record submit attempts in the given metrics
    pub fn with_metrics(mut self, metrics: Arc<FormMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Store a new value; clears that field's error, leaves the others
    pub async fn update_field(&self, field: FormField, value: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.state.set(field, value);
        if inner.errors.clear(field).is_some() {
            tracing::debug!(field = %field, "Cleared validation error on edit");
        }
    }

    /// Run the submit flow
    ///
    /// Order matters: an outstanding request makes this a no-op, then the
    /// honeypot is checked, then validation runs, and only then is the
    /// webhook called. A tripped honeypot returns [`SubmitOutcome::Ignored`],
    /// same as a duplicate click, so callers cannot tell the two apart.
    ///
    /// Dropping the returned future while the request is in flight ends the
    /// attempt: `submitting` goes back to `false` and the form accepts the
    /// next submit.
    pub async fn submit(&self) -> SubmitOutcome {
        let span = tracing::info_span!("submit", attempt_id = %Uuid::new_v4());
        self.run_submit().instrument(span).await
    }

    async fn run_submit(&self) -> SubmitOutcome {
        let (payload, attempt) = {
            let mut inner = self.inner.lock().await;

            if inner.submitting {
                tracing::debug!("Submission already in progress");
                return self.finish(SubmitOutcome::Ignored);
            }

            if is_bot(&inner.state) {
                tracing::debug!("Honeypot filled, dropping submission");
                return self.finish(SubmitOutcome::Ignored);
            }

            let errors = validate(&inner.state);
            if !errors.is_empty() {
                tracing::debug!(fields = ?errors.fields(), "Form failed validation");
                if let Some(metrics) = &self.metrics {
                    metrics.record_validation_failures(&errors);
                }
                inner.errors = errors.clone();
                return self.finish(SubmitOutcome::Rejected(errors));
            }

            inner.notice = None;
            inner.submitting = true;
            inner.attempt += 1;
            (inner.state.clone(), inner.attempt)
        };
        let in_flight = InFlight::start(Arc::downgrade(&self.inner), attempt, self.metrics.clone());

        tracing::info!(url = %self.client.url(), "Posting lead to webhook");

        let started = Instant::now();
        let result = self.client.post_lead(&payload).await;
        if let Some(metrics) = &self.metrics {
            metrics.observe_webhook_duration(started.elapsed().as_secs_f64());
        }

        let mut inner = self.inner.lock().await;
        in_flight.conclude();

        let outcome = match result {
            Ok(receipt) => {
                tracing::info!(status = receipt.status, "Webhook accepted lead");
                inner.submitted = true;
                inner.cancel_reset();
                inner.pending_reset = Some(schedule_reset(
                    Arc::downgrade(&self.inner),
                    self.reset_delay,
                ));
                SubmitOutcome::Submitted(receipt)
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "Webhook submission failed");
                inner.submitting = false;
                inner.notice = Some(err.user_notice().to_string());
                SubmitOutcome::Failed(err)
            }
        };

        self.finish(outcome)
    }

    /// Current values, errors and flags
    pub async fn snapshot(&self) -> FormSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn is_submitting(&self) -> bool {
        self.inner.lock().await.submitting
    }

    pub async fn submit_label(&self) -> &'static str {
        self.snapshot().await.submit_label()
    }

    /// Clear everything now, cancelling any scheduled reset
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.cancel_reset();
        inner.clear();
    }

    /// Cancel a scheduled reset and leave the state as it is
    pub async fn close(&self) {
        self.inner.lock().await.cancel_reset();
    }

    /// Whether a reset is scheduled and has not run yet
    pub async fn has_pending_reset(&self) -> bool {
        self.inner
            .lock()
            .await
            .pending_reset
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn client(&self) -> &WebhookClient {
        &self.client
    }

    fn finish(&self, outcome: SubmitOutcome) -> SubmitOutcome {
        if let Some(metrics) = &self.metrics {
            metrics.record_outcome(outcome.label());
        }
        outcome
    }
}

impl Drop for LeadForm {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_lock() {
            inner.cancel_reset();
        }
    }
}

/// One webhook request in flight
///
/// Balances the in-flight gauge however the request ends. Unless concluded,
/// dropping it also releases `submitting`, so a caller that abandons
/// [`LeadForm::submit`] mid-request does not wedge the form.
struct InFlight {
    form: Weak<Mutex<FormInner>>,
    attempt: u64,
    metrics: Option<Arc<FormMetrics>>,
    concluded: bool,
}

impl InFlight {
    fn start(form: Weak<Mutex<FormInner>>, attempt: u64, metrics: Option<Arc<FormMetrics>>) -> Self {
        if let Some(metrics) = &metrics {
            metrics.request_started();
        }
        Self {
            form,
            attempt,
            metrics,
            concluded: false,
        }
    }

    /// The caller holds the form lock and records the result itself
    fn conclude(mut self) {
        self.concluded = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(metrics) = &self.metrics {
            metrics.request_finished();
        }
        if self.concluded {
            return;
        }

        tracing::debug!("Submission abandoned before the webhook answered");
        let Some(inner) = self.form.upgrade() else {
            return;
        };
        let attempt = self.attempt;
        if let Ok(mut guard) = inner.try_lock() {
            guard.release(attempt);
            return;
        }
        // Someone else holds the lock; release once they are done.
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                inner.lock().await.release(attempt);
            });
        }
    }
}

fn schedule_reset(form: Weak<Mutex<FormInner>>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(inner) = form.upgrade() {
            inner.lock().await.clear();
            tracing::debug!("Form cleared after successful submission");
        }
    })
}
