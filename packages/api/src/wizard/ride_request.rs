//! Rider "request a ride" wizard, reached from an empty search.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Flow, TripEndpoint, TERMS_REQUIRED};
use crate::endpoints::RideSearch;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideRequestStep {
    Route,
    Preferences,
    Review,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideRequestDraft {
    pub from: TripEndpoint,
    pub to: TripEndpoint,
    pub datetime: Option<DateTime<Utc>>,
    pub flexible_dates: bool,
    pub females_only: bool,
    pub pay_for_gas: bool,
    pub pay_for_food: bool,
    pub accepted_terms: bool,
}

impl RideRequestDraft {
    /// Carry a search that found nothing over into a request.
    pub fn from_search(search: &RideSearch) -> Self {
        Self {
            from: TripEndpoint::from_place(&search.from),
            to: TripEndpoint::from_place(&search.to),
            datetime: Some(search.datetime),
            flexible_dates: search.flexible_dates,
            females_only: search.females_only,
            ..Default::default()
        }
    }

    pub(crate) fn to_request(&self) -> Result<RideRequestBody, ValidationError> {
        let datetime = self
            .datetime
            .ok_or_else(|| ValidationError::new("datetime", "Pick a date and time for the ride."))?;
        Ok(RideRequestBody {
            body: RideRequestDetails {
                from: Endpoint::of(&self.from),
                to: Endpoint::of(&self.to),
                datetime,
                females_only: self.females_only,
                flexible_dates: self.flexible_dates,
            },
            pay_for_gas: self.pay_for_gas,
            pay_for_food: self.pay_for_food,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Endpoint {
    lat: f64,
    lng: f64,
    text: String,
}

impl Endpoint {
    fn of(endpoint: &TripEndpoint) -> Self {
        Self {
            lat: endpoint.lat,
            lng: endpoint.lng,
            text: endpoint.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RideRequestDetails {
    from: Endpoint,
    to: Endpoint,
    datetime: DateTime<Utc>,
    females_only: bool,
    flexible_dates: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RideRequestBody {
    body: RideRequestDetails,
    pay_for_gas: bool,
    pay_for_food: bool,
}

pub struct RideRequestFlow;

impl Flow for RideRequestFlow {
    type Draft = RideRequestDraft;
    type Step = RideRequestStep;

    const STEPS: &'static [RideRequestStep] = &[
        RideRequestStep::Route,
        RideRequestStep::Preferences,
        RideRequestStep::Review,
    ];

    fn guard(step: RideRequestStep, draft: &RideRequestDraft) -> Result<(), ValidationError> {
        match step {
            RideRequestStep::Route => {
                if !draft.from.is_resolved() {
                    Err(ValidationError::new("from", "Choose a pickup location from the suggestions."))
                } else if !draft.to.is_resolved() {
                    Err(ValidationError::new("to", "Choose a destination from the suggestions."))
                } else {
                    Ok(())
                }
            }
            RideRequestStep::Review if !draft.accepted_terms => {
                Err(ValidationError::new("accepted_terms", TERMS_REQUIRED))
            }
            _ => Ok(()),
        }
    }

    fn validate(draft: &RideRequestDraft) -> Result<(), ValidationError> {
        Self::guard(RideRequestStep::Route, draft)?;
        draft.to_request().map(|_| ())
    }

    fn title(step: RideRequestStep) -> &'static str {
        match step {
            RideRequestStep::Route => "Request a Ride",
            RideRequestStep::Preferences => "Preferences",
            RideRequestStep::Review => "Review",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LatLng, Place};
    use crate::wizard::Wizard;
    use chrono::TimeZone;

    fn search() -> RideSearch {
        RideSearch {
            from: Place {
                text: "Reitz Union".into(),
                position: LatLng::new(29.6465, -82.3479),
                ..Default::default()
            },
            to: Place {
                text: "Orlando International Airport".into(),
                position: LatLng::new(28.4312, -81.3081),
                ..Default::default()
            },
            datetime: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
            flexible_dates: true,
            females_only: false,
        }
    }

    #[test]
    fn test_route_guard_needs_both_endpoints() {
        let mut wizard = Wizard::<RideRequestFlow>::new();
        assert!(!wizard.next());
        assert_eq!(wizard.error(), Some("Choose a pickup location from the suggestions."));

        let mut wizard = Wizard::<RideRequestFlow>::with_draft(RideRequestDraft::from_search(&search()));
        assert!(wizard.next());
        assert_eq!(wizard.step(), RideRequestStep::Preferences);
    }

    #[test]
    fn test_review_needs_terms() {
        let mut wizard = Wizard::<RideRequestFlow>::with_draft(RideRequestDraft::from_search(&search()));
        wizard.next();
        wizard.next();
        assert_eq!(wizard.begin_submit().unwrap_err().message, TERMS_REQUIRED);

        wizard.update(|d| d.accepted_terms = true);
        assert!(wizard.begin_submit().is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let mut draft = RideRequestDraft::from_search(&search());
        draft.pay_for_gas = true;
        let body = serde_json::to_value(draft.to_request().unwrap()).unwrap();
        assert_eq!(body["body"]["from"]["text"], "Reitz Union");
        assert_eq!(body["body"]["to"]["lng"], -81.3081);
        assert_eq!(body["body"]["flexible_dates"], true);
        assert_eq!(body["body"]["datetime"], "2025-04-01T09:00:00Z");
        assert_eq!(body["pay_for_gas"], true);
        assert_eq!(body["pay_for_food"], false);
    }
}
