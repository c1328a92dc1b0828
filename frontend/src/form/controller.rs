use log::{debug, info, warn};
use thiserror::Error;

use crate::form::draft::{ApplicationDraft, FieldUpdate, Interest};
use crate::form::submit::{ApplicationClient, SubmissionError};
use crate::form::validation::{validate, ValidationError};

pub const STEP_LABELS: [&str; 3] = ["Basic", "Experience", "Confirm"];
pub const LAST_STEP: usize = STEP_LABELS.len() - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Why `begin_submit` refused to start a request. No state changes and no
/// request is made in any of these cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("submitting is only possible from the last step (currently on step {step})")]
    NotOnLastStep { step: usize },
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the application has already been received")]
    AlreadySubmitted,
    #[error("the application has {} problem(s) to fix", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// Three-step application wizard: the draft, the current step and the
/// lifecycle of the one request the draft ends up in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormController {
    draft: ApplicationDraft,
    step: usize,
    status: SubmissionStatus,
    last_error: Option<String>,
    validation_errors: Vec<ValidationError>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: ApplicationDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_label(&self) -> &'static str {
        STEP_LABELS[self.step]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Set only while the status is `Failed`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    /// The draft can't change while its request is in flight or after it
    /// has been received.
    pub fn is_locked(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Submitting | SubmissionStatus::Succeeded
        )
    }

    /// Moves one step forward, never past the last one. Leaving the first
    /// step requires the contact details to be valid.
    pub fn advance(&mut self) -> Result<usize, Vec<ValidationError>> {
        if self.step == 0 {
            let errors = validate(&self.draft);
            if !errors.is_empty() {
                debug!("Staying on step 0, {} field(s) need attention", errors.len());
                self.validation_errors = errors.clone();
                return Err(errors);
            }
        }
        self.validation_errors.clear();
        self.step = (self.step + 1).min(LAST_STEP);
        Ok(self.step)
    }

    pub fn retreat(&mut self) -> usize {
        self.validation_errors.clear();
        self.step = self.step.saturating_sub(1);
        self.step
    }

    /// Returns false when the form is locked and the update was dropped.
    pub fn update_field(&mut self, update: FieldUpdate) -> bool {
        if self.is_locked() {
            return false;
        }
        let field = update.field();
        self.validation_errors.retain(|error| error.field() != field);
        self.draft.apply(update);
        true
    }

    pub fn toggle_interest(&mut self, tag: Interest) -> bool {
        if self.is_locked() {
            return false;
        }
        self.draft.toggle_interest(tag);
        true
    }

    /// First half of a submission. On success the status is `Submitting` and
    /// the returned draft is the exact request body to send; the caller must
    /// report the outcome through [`FormController::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<ApplicationDraft, SubmitRejected> {
        match self.status {
            SubmissionStatus::Submitting => return Err(SubmitRejected::InFlight),
            SubmissionStatus::Succeeded => return Err(SubmitRejected::AlreadySubmitted),
            SubmissionStatus::Idle | SubmissionStatus::Failed => {}
        }
        if !self.is_last_step() {
            return Err(SubmitRejected::NotOnLastStep { step: self.step });
        }

        if self.draft.email.trim().len() != self.draft.email.len() {
            self.draft.email = self.draft.email.trim().to_string();
        }
        let errors = validate(&self.draft);
        if !errors.is_empty() {
            self.validation_errors = errors.clone();
            return Err(SubmitRejected::Invalid(errors));
        }

        info!("Submitting application for {}", self.draft.email);
        self.validation_errors.clear();
        self.last_error = None;
        self.status = SubmissionStatus::Submitting;
        Ok(self.draft.clone())
    }

    /// Second half of a submission. Ignored unless a submission is in flight.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmissionError>) {
        if self.status != SubmissionStatus::Submitting {
            warn!("Dropping submission outcome, nothing in flight (status {:?})", self.status);
            return;
        }
        match outcome {
            Ok(()) => {
                info!("Application received");
                self.step = LAST_STEP;
                self.status = SubmissionStatus::Succeeded;
            }
            Err(e) => {
                warn!("Application submission failed: {}", e);
                self.last_error = Some(e.to_string());
                self.status = SubmissionStatus::Failed;
            }
        }
    }

    /// Runs a whole submission against `client`.
    pub async fn submit_with<C: ApplicationClient>(
        &mut self,
        client: &C,
    ) -> Result<SubmissionStatus, SubmitRejected> {
        let body = self.begin_submit()?;
        let outcome = client.send(&body).await;
        self.finish_submit(outcome);
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::draft::Field;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct RecordingClient {
        sent: RefCell<Vec<ApplicationDraft>>,
        outcome: Result<(), SubmissionError>,
    }

    impl RecordingClient {
        fn answering(outcome: Result<(), SubmissionError>) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                outcome,
            }
        }

        fn calls(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    impl ApplicationClient for RecordingClient {
        async fn send(&self, draft: &ApplicationDraft) -> Result<(), SubmissionError> {
            self.sent.borrow_mut().push(draft.clone());
            self.outcome.clone()
        }
    }

    fn ada() -> ApplicationDraft {
        ApplicationDraft {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            experience_years: 5,
            interests: vec![Interest::Plc, Interest::Vision],
            message: String::new(),
            consent: true,
        }
    }

    fn on_confirm_step(draft: ApplicationDraft) -> FormController {
        let mut form = FormController::with_draft(draft);
        form.advance().unwrap();
        form.advance().unwrap();
        assert_eq!(form.step(), LAST_STEP);
        form
    }

    #[test]
    fn step_stays_in_bounds() {
        let mut form = FormController::with_draft(ada());
        for _ in 0..5 {
            form.retreat();
            assert_eq!(form.step(), 0);
        }
        for _ in 0..5 {
            form.advance().unwrap();
            assert!(form.step() <= LAST_STEP);
        }
        assert_eq!(form.step(), LAST_STEP);
        assert_eq!(form.step_label(), "Confirm");

        let moves = [true, false, false, true, true, true, false, true, false, false, false];
        for forward in moves {
            if forward {
                form.advance().unwrap();
            } else {
                form.retreat();
            }
            assert!(form.step() <= LAST_STEP);
        }
    }

    #[test]
    fn advance_does_not_touch_the_draft() {
        let mut form = FormController::with_draft(ada());
        form.advance().unwrap();
        form.retreat();
        assert_eq!(form.draft(), &ada());
    }

    #[test]
    fn first_step_requires_contact_details() {
        let mut form = FormController::new();
        let errors = form.advance().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(form.step(), 0);
        assert_eq!(form.validation_errors().len(), 3);

        form.update_field(FieldUpdate::FirstName("Ada".to_string()));
        form.update_field(FieldUpdate::LastName("Lovelace".to_string()));
        assert_eq!(
            form.validation_errors(),
            &[ValidationError::Required(Field::Email)]
        );

        form.update_field(FieldUpdate::Email("ada@example.com".to_string()));
        assert_eq!(form.advance(), Ok(1));
        assert!(form.validation_errors().is_empty());
    }

    #[test]
    fn double_toggle_is_a_no_op() {
        let mut form = FormController::with_draft(ada());
        for tag in Interest::ALL {
            let before = form.draft().interests.clone();
            form.toggle_interest(tag);
            form.toggle_interest(tag);
            assert_eq!(form.draft().interests, before);
        }
    }

    #[test]
    fn submit_off_the_last_step_is_rejected() {
        let mut form = FormController::with_draft(ada());
        form.advance().unwrap();
        let client = RecordingClient::answering(Ok(()));

        let rejected = block_on(form.submit_with(&client)).unwrap_err();
        assert_eq!(rejected, SubmitRejected::NotOnLastStep { step: 1 });
        assert_eq!(client.calls(), 0);
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(form.step(), 1);
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut form = on_confirm_step(ada());
        let body = form.begin_submit().unwrap();
        assert_eq!(body, ada());
        assert_eq!(form.status(), SubmissionStatus::Submitting);

        let client = RecordingClient::answering(Ok(()));
        assert_eq!(form.begin_submit(), Err(SubmitRejected::InFlight));
        assert_eq!(block_on(form.submit_with(&client)), Err(SubmitRejected::InFlight));
        assert_eq!(client.calls(), 0);
        assert_eq!(form.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn successful_submit_sends_draft_verbatim_and_locks() {
        let mut form = on_confirm_step(ada());
        let client = RecordingClient::answering(Ok(()));

        let status = block_on(form.submit_with(&client)).unwrap();
        assert_eq!(status, SubmissionStatus::Succeeded);
        assert_eq!(client.sent.borrow().as_slice(), &[ada()]);
        assert_eq!(form.step(), LAST_STEP);
        assert_eq!(form.last_error(), None);

        assert!(form.is_locked());
        assert!(!form.update_field(FieldUpdate::FirstName("Charles".to_string())));
        assert!(!form.toggle_interest(Interest::Robotics));
        assert_eq!(form.draft(), &ada());
        assert_eq!(form.begin_submit(), Err(SubmitRejected::AlreadySubmitted));
    }

    #[test]
    fn server_error_fails_and_allows_identical_retry() {
        let mut form = on_confirm_step(ada());
        let failing = RecordingClient::answering(Err(SubmissionError::Status {
            status: 500,
            body: "server error".to_string(),
        }));

        let status = block_on(form.submit_with(&failing)).unwrap();
        assert_eq!(status, SubmissionStatus::Failed);
        assert!(form.last_error().unwrap().contains("server error"));
        assert_eq!(form.draft(), &ada());
        assert_eq!(form.step(), LAST_STEP);

        let working = RecordingClient::answering(Ok(()));
        let status = block_on(form.submit_with(&working)).unwrap();
        assert_eq!(status, SubmissionStatus::Succeeded);
        assert_eq!(failing.sent.borrow()[0], working.sent.borrow()[0]);
        assert_eq!(form.last_error(), None);
    }

    #[test]
    fn network_failure_never_sticks_in_submitting() {
        let mut form = on_confirm_step(ada());
        let client = RecordingClient::answering(Err(SubmissionError::Network(
            "connection refused".to_string(),
        )));

        block_on(form.submit_with(&client)).unwrap();
        assert_eq!(form.status(), SubmissionStatus::Failed);
        assert!(!form.last_error().unwrap_or_default().is_empty());
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn retry_clears_the_previous_error() {
        let mut form = on_confirm_step(ada());
        form.begin_submit().unwrap();
        form.finish_submit(Err(SubmissionError::Timeout(15)));
        assert!(form.last_error().is_some());

        form.begin_submit().unwrap();
        assert_eq!(form.status(), SubmissionStatus::Submitting);
        assert_eq!(form.last_error(), None);
    }

    #[test]
    fn edits_are_dropped_while_request_is_in_flight() {
        let mut form = on_confirm_step(ada());
        let body = form.begin_submit().unwrap();
        assert!(form.is_locked());

        form.retreat();
        form.retreat();
        assert!(!form.update_field(FieldUpdate::FirstName("Charles".to_string())));
        assert!(!form.toggle_interest(Interest::Robotics));
        form.finish_submit(Ok(()));

        assert_eq!(form.status(), SubmissionStatus::Succeeded);
        assert_eq!(form.step(), LAST_STEP);
        assert_eq!(form.draft(), &body);
    }

    #[test]
    fn edits_resume_after_a_failed_request() {
        let mut form = on_confirm_step(ada());
        form.begin_submit().unwrap();
        form.finish_submit(Err(SubmissionError::Network("offline".to_string())));

        assert!(!form.is_locked());
        assert!(form.update_field(FieldUpdate::Phone("555 0100".to_string())));
        assert_eq!(form.draft().phone, "555 0100");
    }

    #[test]
    fn padded_email_is_sent_trimmed() {
        let mut form = on_confirm_step(ada());
        form.update_field(FieldUpdate::Email("  ada@example.com ".to_string()));
        let client = RecordingClient::answering(Ok(()));

        block_on(form.submit_with(&client)).unwrap();
        assert_eq!(client.sent.borrow()[0].email, "ada@example.com");
        assert_eq!(form.draft().email, "ada@example.com");
    }

    #[test]
    fn stray_outcome_is_ignored() {
        let mut form = on_confirm_step(ada());
        form.finish_submit(Ok(()));
        assert_eq!(form.status(), SubmissionStatus::Idle);
        form.finish_submit(Err(SubmissionError::Network("late".to_string())));
        assert_eq!(form.last_error(), None);
    }

    #[test]
    fn invalid_draft_is_not_sent() {
        let mut form = on_confirm_step(ada());
        form.update_field(FieldUpdate::Email("not-an-email".to_string()));
        let client = RecordingClient::answering(Ok(()));

        let rejected = block_on(form.submit_with(&client)).unwrap_err();
        assert_eq!(
            rejected,
            SubmitRejected::Invalid(vec![ValidationError::Malformed(Field::Email)])
        );
        assert_eq!(client.calls(), 0);
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(form.validation_errors().len(), 1);
    }

    #[test]
    fn consent_is_not_required() {
        let mut form = on_confirm_step(ApplicationDraft {
            consent: false,
            ..ada()
        });
        assert!(form.begin_submit().is_ok());
    }
}
