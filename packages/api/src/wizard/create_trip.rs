//! Driver "create a trip" wizard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Flow;
use crate::error::ValidationError;
use crate::geo::{LatLng, Place, RouteEstimate};

pub const FARE_TERMS_REQUIRED: &str = "You must agree to the payment terms to continue.";

/// Default pickup: the university campus.
pub const CAMPUS: LatLng = LatLng::new(29.644906, -82.350441);
pub const CAMPUS_LABEL: &str = "University of Florida";
pub const DEFAULT_RADIUS_MILES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTripStep {
    Route,
    Fare,
    Preferences,
    Carpool,
    Summary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripEndpoint {
    pub lat: f64,
    pub lng: f64,
    /// Expected time at this point, epoch milliseconds.
    pub expected: Option<i64>,
    pub text: String,
}

impl TripEndpoint {
    pub fn from_place(place: &Place) -> Self {
        Self {
            lat: place.position.lat,
            lng: place.position.lng,
            expected: None,
            text: place.text.clone(),
        }
    }

    /// Free text that has not been matched to a place yet.
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn is_resolved(&self) -> bool {
        !self.text.trim().is_empty() && (self.lat != 0.0 || self.lng != 0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPreference {
    pub can_be_controlled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TalkingPreference {
    pub minimal: bool,
    pub silent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalkingLevel {
    Open,
    Minimal,
    Silent,
}

impl TalkingLevel {
    pub const ALL: [TalkingLevel; 3] = [TalkingLevel::Open, TalkingLevel::Minimal, TalkingLevel::Silent];

    pub fn label(self) -> &'static str {
        match self {
            TalkingLevel::Open => "Open",
            TalkingLevel::Minimal => "Minimal",
            TalkingLevel::Silent => "Silent",
        }
    }
}

impl TalkingPreference {
    pub fn level(&self) -> TalkingLevel {
        if self.silent {
            TalkingLevel::Silent
        } else if self.minimal {
            TalkingLevel::Minimal
        } else {
            TalkingLevel::Open
        }
    }

    pub fn set_level(&mut self, level: TalkingLevel) {
        self.silent = level == TalkingLevel::Silent;
        self.minimal = level == TalkingLevel::Minimal;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftFare {
    pub gas: Option<f64>,
    pub trip: Option<f64>,
    pub food: Option<f64>,
    pub accepted_terms: bool,
}

impl DraftFare {
    pub fn total(&self) -> f64 {
        [self.gas, self.trip, self.food].iter().flatten().sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiderRequirementsDraft {
    pub females_only: bool,
}

/// Sent as `{"tripOptions": draft}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTripDraft {
    pub from: TripEndpoint,
    pub to: TripEndpoint,
    /// Drop-off radius in whole miles.
    pub radius: Option<i64>,
    pub datetime: Option<DateTime<Utc>>,
    pub ac_preferences: ControlPreference,
    pub music_preferences: ControlPreference,
    pub talking_preferences: TalkingPreference,
    pub carpool: bool,
    pub fare: DraftFare,
    pub rider_requirements: RiderRequirementsDraft,
    #[serde(skip)]
    route_secs: Option<f64>,
}

impl Default for CreateTripDraft {
    fn default() -> Self {
        Self {
            from: TripEndpoint {
                lat: CAMPUS.lat,
                lng: CAMPUS.lng,
                expected: None,
                text: CAMPUS_LABEL.to_string(),
            },
            to: TripEndpoint::default(),
            radius: Some(DEFAULT_RADIUS_MILES),
            datetime: None,
            ac_preferences: ControlPreference::default(),
            music_preferences: ControlPreference::default(),
            talking_preferences: TalkingPreference::default(),
            carpool: false,
            fare: DraftFare::default(),
            rider_requirements: RiderRequirementsDraft::default(),
            route_secs: None,
        }
    }
}

impl CreateTripDraft {
    /// Only accounts that report `female` may restrict riders by gender.
    pub fn offers_females_only(gender: &str) -> bool {
        gender.eq_ignore_ascii_case("female")
    }

    pub fn set_origin(&mut self, place: &Place) {
        self.from = TripEndpoint::from_place(place);
        self.route_secs = None;
        self.refresh_expected();
    }

    /// Fix the destination. `route` is the driving estimate from the origin,
    /// when the lookup succeeded.
    pub fn set_destination(&mut self, place: &Place, route: Option<&RouteEstimate>) {
        self.to = TripEndpoint::from_place(place);
        self.route_secs = route.map(|r| r.duration_secs);
        self.refresh_expected();
    }

    /// Attach a driving estimate that was looked up for `origin` → `place`.
    /// Ignored when either endpoint has changed since the lookup started.
    /// Returns whether it was applied.
    pub fn apply_route(&mut self, origin: LatLng, place: &Place, route: Option<&RouteEstimate>) -> bool {
        let picked = TripEndpoint::from_place(place);
        let same_to = self.to.text == picked.text && self.to.position() == picked.position();
        if !same_to || self.from.position() != origin {
            tracing::debug!("dropping route for {}: endpoints changed", place.text);
            return false;
        }
        self.route_secs = route.map(|r| r.duration_secs);
        self.refresh_expected();
        true
    }

    pub fn set_datetime(&mut self, datetime: DateTime<Utc>) {
        self.datetime = Some(datetime);
        self.refresh_expected();
    }

    /// Radius input, parsed the way a number field reads.
    pub fn set_radius_text(&mut self, text: &str) {
        self.radius = text.trim().parse().ok();
    }

    pub fn route_secs(&self) -> Option<f64> {
        self.route_secs
    }

    fn refresh_expected(&mut self) {
        let Some(departure) = self.datetime else {
            self.from.expected = None;
            self.to.expected = None;
            return;
        };
        self.from.expected = Some(departure.timestamp_millis());
        self.to.expected = self.route_secs.map(|secs| {
            RouteEstimate {
                duration_secs: secs,
                path: Vec::new(),
            }
            .arrival(departure)
            .timestamp_millis()
        });
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTripRequest<'a> {
    #[serde(rename = "tripOptions")]
    pub trip_options: &'a CreateTripDraft,
}

pub struct CreateTripFlow;

impl Flow for CreateTripFlow {
    type Draft = CreateTripDraft;
    type Step = CreateTripStep;

    const STEPS: &'static [CreateTripStep] = &[
        CreateTripStep::Route,
        CreateTripStep::Fare,
        CreateTripStep::Preferences,
        CreateTripStep::Carpool,
        CreateTripStep::Summary,
    ];

    fn guard(step: CreateTripStep, draft: &CreateTripDraft) -> Result<(), ValidationError> {
        match step {
            CreateTripStep::Fare if !draft.fare.accepted_terms => {
                Err(ValidationError::new("fare.accepted_terms", FARE_TERMS_REQUIRED))
            }
            _ => Ok(()),
        }
    }

    fn validate(draft: &CreateTripDraft) -> Result<(), ValidationError> {
        if !draft.from.is_resolved() {
            return Err(ValidationError::new("from", "Choose a pickup location from the suggestions."));
        }
        if !draft.to.is_resolved() {
            return Err(ValidationError::new("to", "Choose a destination from the suggestions."));
        }
        if draft.datetime.is_none() {
            return Err(ValidationError::new("datetime", "Pick a date and time for the trip."));
        }
        match draft.radius {
            Some(r) if r > 0 => {}
            _ => return Err(ValidationError::new("radius", "Enter a drop-off radius in miles.")),
        }
        let fare = &draft.fare;
        if [fare.gas, fare.trip, fare.food]
            .iter()
            .any(|v| !matches!(v, Some(x) if x.is_finite() && *x >= 0.0))
        {
            return Err(ValidationError::new("fare", "Enter an amount for each fare field."));
        }
        if !fare.accepted_terms {
            return Err(ValidationError::new("fare.accepted_terms", FARE_TERMS_REQUIRED));
        }
        Ok(())
    }

    fn title(step: CreateTripStep) -> &'static str {
        match step {
            CreateTripStep::Route => "Create a Trip",
            CreateTripStep::Fare => "Fare",
            CreateTripStep::Preferences => "Preferences",
            CreateTripStep::Carpool => "Carpool",
            CreateTripStep::Summary => "Summary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;
    use chrono::TimeZone;

    fn miami() -> Place {
        Place {
            text: "Wynwood, Miami, Florida".into(),
            position: LatLng::new(25.8005, -80.1990),
            ..Default::default()
        }
    }

    fn filled() -> CreateTripDraft {
        let mut draft = CreateTripDraft::default();
        draft.set_datetime(Utc.with_ymd_and_hms(2025, 3, 19, 18, 45, 0).unwrap());
        draft.set_destination(
            &miami(),
            Some(&RouteEstimate {
                duration_secs: 5.0 * 3600.0,
                path: Vec::new(),
            }),
        );
        draft.fare = DraftFare {
            gas: Some(20.0),
            trip: Some(30.0),
            food: Some(0.0),
            accepted_terms: true,
        };
        draft
    }

    #[test]
    fn test_fare_page_needs_terms() {
        let mut wizard = Wizard::<CreateTripFlow>::new();
        assert!(wizard.next());
        assert_eq!(wizard.step(), CreateTripStep::Fare);
        assert_eq!(wizard.progress_percent(), 40);

        assert!(!wizard.next());
        assert_eq!(wizard.step(), CreateTripStep::Fare);
        assert_eq!(wizard.error(), Some(FARE_TERMS_REQUIRED));

        wizard.update(|d| d.fare.accepted_terms = true);
        assert!(wizard.next());
        assert_eq!(wizard.step(), CreateTripStep::Preferences);
    }

    #[test]
    fn test_request_body_keys() {
        let draft = filled();
        let body = serde_json::to_value(CreateTripRequest { trip_options: &draft }).unwrap();
        let top: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(top, vec!["tripOptions"]);

        let mut keys: Vec<&str> = body["tripOptions"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "ac_preferences",
                "carpool",
                "datetime",
                "fare",
                "from",
                "music_preferences",
                "radius",
                "rider_requirements",
                "talking_preferences",
                "to",
            ]
        );
        assert_eq!(body["tripOptions"]["radius"], 15);
        assert_eq!(body["tripOptions"]["from"]["text"], CAMPUS_LABEL);
    }

    #[test]
    fn test_destination_arrival_follows_route() {
        let draft = filled();
        let departure = Utc.with_ymd_and_hms(2025, 3, 19, 18, 45, 0).unwrap();
        assert_eq!(draft.from.expected, Some(departure.timestamp_millis()));
        assert_eq!(
            draft.to.expected,
            Some(departure.timestamp_millis() + 5 * 3600 * 1000)
        );

        let mut later = draft.clone();
        later.set_datetime(departure + chrono::Duration::hours(1));
        assert_eq!(
            later.to.expected,
            Some(departure.timestamp_millis() + 6 * 3600 * 1000)
        );
    }

    #[test]
    fn test_late_route_ignored_after_destination_edit() {
        let departure = Utc.with_ymd_and_hms(2025, 3, 19, 18, 45, 0).unwrap();
        let estimate = RouteEstimate {
            duration_secs: 3600.0,
            path: Vec::new(),
        };
        let mut draft = CreateTripDraft::default();
        draft.set_datetime(departure);
        let origin = draft.from.position();
        draft.set_destination(&miami(), None);

        // The user retypes the destination before the lookup answers.
        draft.to = TripEndpoint::typed("Orlando");
        assert!(!draft.apply_route(origin, &miami(), Some(&estimate)));
        assert_eq!(draft.to.text, "Orlando");
        assert_eq!(draft.route_secs(), None);
        assert_eq!(draft.to.expected, None);

        // A lookup for the current endpoints still lands.
        draft.set_destination(&miami(), None);
        assert!(draft.apply_route(origin, &miami(), Some(&estimate)));
        assert_eq!(draft.route_secs(), Some(3600.0));
        assert_eq!(draft.to.expected, Some(departure.timestamp_millis() + 3600 * 1000));
    }

    #[test]
    fn test_late_route_ignored_after_origin_change() {
        let mut draft = CreateTripDraft::default();
        let origin = draft.from.position();
        draft.set_destination(&miami(), None);
        draft.set_origin(&Place {
            text: "Tampa, Florida".into(),
            position: LatLng::new(27.9506, -82.4572),
            ..Default::default()
        });
        let estimate = RouteEstimate {
            duration_secs: 900.0,
            path: Vec::new(),
        };
        assert!(!draft.apply_route(origin, &miami(), Some(&estimate)));
        assert_eq!(draft.route_secs(), None);
    }

    #[test]
    fn test_validate_on_summary() {
        assert!(CreateTripFlow::validate(&filled()).is_ok());

        let mut draft = filled();
        draft.to = TripEndpoint::typed("Wynw");
        assert_eq!(CreateTripFlow::validate(&draft).unwrap_err().field, "to");

        let mut draft = filled();
        draft.set_radius_text("abc");
        assert_eq!(draft.radius, None);
        assert_eq!(CreateTripFlow::validate(&draft).unwrap_err().field, "radius");

        let mut draft = filled();
        draft.fare.food = None;
        assert_eq!(CreateTripFlow::validate(&draft).unwrap_err().field, "fare");
    }

    #[test]
    fn test_talking_level_round_trip() {
        let mut pref = TalkingPreference::default();
        assert_eq!(pref.level(), TalkingLevel::Open);
        pref.set_level(TalkingLevel::Silent);
        assert!(pref.silent && !pref.minimal);
        pref.set_level(TalkingLevel::Minimal);
        assert_eq!(pref.level(), TalkingLevel::Minimal);
    }

    #[test]
    fn test_females_only_option_visibility() {
        assert!(CreateTripDraft::offers_females_only("female"));
        assert!(!CreateTripDraft::offers_females_only("male"));
        assert!(!CreateTripDraft::offers_females_only(""));
    }
}
