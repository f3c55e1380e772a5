//! # Multi-step forms
//!
//! One step machine, [`Wizard`], drives every multi-page form. Each form is a
//! [`Flow`]: a static list of steps, a draft type that accumulates input, a
//! per-step guard checked before moving forward, and a whole-draft validation
//! checked before the single submit request.
//!
//! | Flow | Steps | Submit |
//! |------|-------|--------|
//! | [`CreateTripFlow`] | Route, Fare, Preferences, Carpool, Summary | `POST /v1/trip/` |
//! | [`DriverApplicationFlow`] | Basic info, Vehicle, Review | `POST /v1/driver/apply` |
//! | [`RideRequestFlow`] | Route, Preferences, Review | `POST /v1/trip/rider/request` |
//!
//! The wizard never talks to the network itself. Screens call
//! [`Wizard::begin_submit`], send the request, then either drop the wizard on
//! success or hand the error back through [`Wizard::submission_failed`].

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::error::{ApiError, ValidationError};

mod create_trip;
mod driver_apply;
mod ride_request;
mod terms;

pub use create_trip::{
    ControlPreference, CreateTripDraft, CreateTripFlow, CreateTripStep, DraftFare, RiderRequirementsDraft,
    TalkingLevel, TalkingPreference, TripEndpoint, CAMPUS, CAMPUS_LABEL, FARE_TERMS_REQUIRED,
};
pub(crate) use create_trip::CreateTripRequest;
pub use driver_apply::{
    DriverApplicationDraft, DriverApplicationFlow, DriverApplicationRequest, DriverApplicationStep, CERTIFICATION,
};
pub use ride_request::{RideRequestDraft, RideRequestFlow, RideRequestStep};
pub use terms::{
    DriverOffer, OfferFare, TermsConfirmation, DRIVER_TERMS, OFFER_TERMS_REQUIRED, RIDER_TERMS, TERMS_REQUIRED,
};

pub trait Flow {
    type Draft: Default + Clone;
    type Step: Copy + PartialEq + Debug + 'static;

    const STEPS: &'static [Self::Step];

    /// Checked when leaving `step` forwards. The default lets every step through.
    fn guard(_step: Self::Step, _draft: &Self::Draft) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Checked once, right before submission.
    fn validate(draft: &Self::Draft) -> Result<(), ValidationError>;

    fn title(step: Self::Step) -> &'static str;
}

pub struct Wizard<F: Flow> {
    page: usize,
    draft: F::Draft,
    error: Option<String>,
    submitting: bool,
    _flow: PhantomData<F>,
}

impl<F: Flow> Clone for Wizard<F> {
    fn clone(&self) -> Self {
        Self {
            page: self.page,
            draft: self.draft.clone(),
            error: self.error.clone(),
            submitting: self.submitting,
            _flow: PhantomData,
        }
    }
}

impl<F: Flow> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flow> Wizard<F> {
    pub fn new() -> Self {
        Self::with_draft(F::Draft::default())
    }

    pub fn with_draft(draft: F::Draft) -> Self {
        Self {
            page: 0,
            draft,
            error: None,
            submitting: false,
            _flow: PhantomData,
        }
    }

    pub fn step(&self) -> F::Step {
        F::STEPS[self.page]
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn title(&self) -> &'static str {
        F::title(self.step())
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page + 1 == F::STEPS.len()
    }

    pub fn draft(&self) -> &F::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut F::Draft {
        &mut self.draft
    }

    /// Edit the draft and drop any stale inline error.
    pub fn update(&mut self, edit: impl FnOnce(&mut F::Draft)) {
        edit(&mut self.draft);
        self.error = None;
    }

    /// Move forward one page if the current step's guard passes. On failure
    /// the page stays put and the guard's message becomes the inline error.
    /// Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        if let Err(e) = F::guard(self.step(), &self.draft) {
            tracing::debug!("{:?} blocked: {}", self.step(), e);
            self.error = Some(e.message);
            return false;
        }
        self.error = None;
        self.page += 1;
        tracing::debug!("wizard moved to {:?}", self.step());
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.error = None;
        self.page -= 1;
        true
    }

    pub fn progress_percent(&self) -> u8 {
        (((self.page + 1) * 100) / F::STEPS.len()) as u8
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Gate the submit request. Only the last page submits, and only once at
    /// a time. Returns the draft to send when everything checks out.
    pub fn begin_submit(&mut self) -> Result<F::Draft, ValidationError> {
        if !self.is_last() {
            return Err(ValidationError::new("page", "Finish the remaining steps first."));
        }
        if self.submitting {
            return Err(ValidationError::new("page", "Already submitting."));
        }
        let checked = F::guard(self.step(), &self.draft).and_then(|_| F::validate(&self.draft));
        if let Err(e) = checked {
            self.error = Some(e.message.clone());
            return Err(e);
        }
        self.error = None;
        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// The submit request failed; stay on the last page so the user can retry.
    pub fn submission_failed(&mut self, error: &ApiError) {
        tracing::warn!("wizard submit failed: {}", error);
        self.submitting = false;
        self.error = Some(error.user_message());
    }
}

pub(crate) fn require(field: &'static str, value: &str, label: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, format!("{} is required.", label)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Step {
        One,
        Two,
        Three,
    }

    #[derive(Debug, Clone, Default)]
    struct Draft {
        ready: bool,
        name: String,
    }

    struct Demo;

    impl Flow for Demo {
        type Draft = Draft;
        type Step = Step;
        const STEPS: &'static [Step] = &[Step::One, Step::Two, Step::Three];

        fn guard(step: Step, draft: &Draft) -> Result<(), ValidationError> {
            match step {
                Step::Two if !draft.ready => Err(ValidationError::new("ready", "not ready")),
                _ => Ok(()),
            }
        }

        fn validate(draft: &Draft) -> Result<(), ValidationError> {
            require("name", &draft.name, "Name")
        }

        fn title(step: Step) -> &'static str {
            match step {
                Step::One => "One",
                Step::Two => "Two",
                Step::Three => "Three",
            }
        }
    }

    #[test]
    fn test_next_blocked_by_guard() {
        let mut wizard = Wizard::<Demo>::new();
        assert!(wizard.next());
        assert_eq!(wizard.step(), Step::Two);

        assert!(!wizard.next());
        assert_eq!(wizard.step(), Step::Two);
        assert_eq!(wizard.error(), Some("not ready"));

        wizard.update(|d| d.ready = true);
        assert_eq!(wizard.error(), None);
        assert!(wizard.next());
        assert!(wizard.is_last());
        assert!(!wizard.next());
    }

    fn step_titles<F: Flow>() -> Vec<&'static str> {
        F::STEPS.iter().map(|step| F::title(*step)).collect()
    }

    #[test]
    fn test_flow_step_tables() {
        assert_eq!(step_titles::<Demo>(), vec!["One", "Two", "Three"]);
        assert_eq!(step_titles::<CreateTripFlow>().len(), 5);
        assert_eq!(step_titles::<DriverApplicationFlow>().len(), 3);
        assert_eq!(step_titles::<RideRequestFlow>().len(), 3);
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut wizard = Wizard::<Demo>::new();
        assert!(!wizard.previous());
        wizard.next();
        assert!(wizard.previous());
        assert!(wizard.is_first());
    }

    #[test]
    fn test_progress() {
        let mut wizard = Wizard::<Demo>::new();
        assert_eq!(wizard.progress_percent(), 33);
        wizard.next();
        assert_eq!(wizard.progress_percent(), 66);
        wizard.update(|d| d.ready = true);
        wizard.next();
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[test]
    fn test_submit_only_from_last_page_and_validates() {
        let mut wizard = Wizard::<Demo>::new();
        assert!(wizard.begin_submit().is_err());
        assert!(!wizard.is_submitting());

        wizard.update(|d| d.ready = true);
        wizard.next();
        wizard.next();
        let err = wizard.begin_submit().unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(wizard.error(), Some("Name is required."));

        wizard.update(|d| d.name = "Albert".into());
        let draft = wizard.begin_submit().unwrap();
        assert_eq!(draft.name, "Albert");
        assert!(wizard.is_submitting());
        assert!(wizard.begin_submit().is_err());
    }

    #[test]
    fn test_failed_submit_stays_on_last_page() {
        let mut wizard = Wizard::<Demo>::with_draft(Draft {
            ready: true,
            name: "Albert".into(),
        });
        wizard.next();
        wizard.next();
        wizard.begin_submit().unwrap();

        wizard.submission_failed(&ApiError::Backend("driver not found".into()));
        assert!(wizard.is_last());
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.error(), Some("driver not found"));

        wizard.submission_failed(&ApiError::Transport("connection reset".into()));
        assert_eq!(wizard.error(), Some(crate::error::GENERIC_ERROR));
    }
}
