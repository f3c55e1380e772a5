//! # Route table
//!
//! A [`Page`] is where the visitor asked to go; a [`Screen`] is what actually
//! renders there. Most pages map one to one, but the driver pages depend on
//! the account: an unverified account is shown the application form (or the
//! status of its pending application) instead of the driver tools.
//!
//! [`resolve`] walks [`RULES`] in order and takes the first rule whose page
//! kind and account predicate both match. It runs once per navigation, after
//! the session gate has let the visitor through.

use api::endpoints::RiderTripsTab;
use api::Account;

/// Every place the app can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    SignIn,
    SignUp,
    CheckInbox,
    FinishSignup,
    Dashboard,
    Profile,
    FindRide,
    RideRequest,
    RiderTrips { tab: RiderTripsTab },
    RiderTrip { tab: RiderTripsTab, uuid: String },
    CreateTrip,
    DriverApplication { uuid: Option<String> },
    FindRiders { tab: RidersTab },
    DriverTrips,
    DriverTrip { uuid: String },
}

/// Tabs on the driver's "find riders" page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RidersTab {
    /// Rider requests near the driver's route.
    #[default]
    Feed,
    /// Requests this driver already offered to drive.
    Requested,
}

impl RidersTab {
    pub fn as_str(self) -> &'static str {
        match self {
            RidersTab::Feed => "feed",
            RidersTab::Requested => "requested",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "requested" => RidersTab::Requested,
            _ => RidersTab::Feed,
        }
    }
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Page::SignIn => "/auth/signin".into(),
            Page::SignUp => "/auth/signup".into(),
            Page::CheckInbox => "/auth/check-inbox".into(),
            Page::FinishSignup => "/auth/finish".into(),
            Page::Dashboard => "/dashboard".into(),
            Page::Profile => "/profile".into(),
            Page::FindRide => "/find-ride".into(),
            Page::RideRequest => "/ride-request".into(),
            Page::RiderTrips { tab } => format!("/rider-flow/trips?tab={}", tab.as_str()),
            Page::RiderTrip { tab, uuid } => format!("/ridertrip/{}/{}", tab.as_str(), uuid),
            Page::CreateTrip => "/create-trip".into(),
            Page::DriverApplication { uuid: Some(uuid) } => format!("/driver-application?uuid={}", uuid),
            Page::DriverApplication { uuid: None } => "/driver-application".into(),
            Page::FindRiders { tab } => format!("/find-riders?tab={}", tab.as_str()),
            Page::DriverTrips => "/my-trips".into(),
            Page::DriverTrip { uuid } => format!("/drivertrip/{}", uuid),
        }
    }

    /// Pages behind the session gate.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Page::SignIn | Page::SignUp | Page::CheckInbox | Page::FinishSignup
        )
    }

    fn kind(&self) -> PageKind {
        match self {
            Page::SignIn | Page::SignUp | Page::CheckInbox | Page::FinishSignup => PageKind::Public,
            Page::Dashboard => PageKind::Dashboard,
            Page::Profile => PageKind::Profile,
            Page::FindRide => PageKind::FindRide,
            Page::RideRequest => PageKind::RideRequest,
            Page::RiderTrips { .. } => PageKind::RiderTrips,
            Page::RiderTrip { .. } => PageKind::RiderTrip,
            Page::CreateTrip => PageKind::CreateTrip,
            Page::DriverApplication { .. } => PageKind::DriverApplication,
            Page::FindRiders { .. } => PageKind::FindRiders,
            Page::DriverTrips => PageKind::DriverTrips,
            Page::DriverTrip { .. } => PageKind::DriverTrip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Public,
    Dashboard,
    Profile,
    FindRide,
    RideRequest,
    RiderTrips,
    RiderTrip,
    CreateTrip,
    DriverApplication,
    FindRiders,
    DriverTrips,
    DriverTrip,
}

/// The screen component to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Profile,
    FindRide,
    RideRequest,
    RiderTrips { tab: RiderTripsTab },
    RiderTrip { tab: RiderTripsTab, uuid: String },
    CreateTrip,
    DriverApply,
    ApplicationStatus { uuid: String },
    FindRiders { tab: RidersTab },
    DriverTrips,
    DriverTrip { uuid: String },
    NotFound,
}

/// The parts of the account the table branches on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFacts {
    pub driver_verified: bool,
    pub pending_application: Option<String>,
}

impl AccountFacts {
    pub fn of(account: &Account) -> Self {
        Self {
            driver_verified: account.driver_verified,
            pending_application: account
                .pending_application()
                .and_then(|a| a.application_uuid.clone()),
        }
    }
}

pub struct Rule {
    kind: PageKind,
    when: fn(&Page, &AccountFacts) -> bool,
    screen: fn(&Page, &AccountFacts) -> Screen,
}

fn always(_: &Page, _: &AccountFacts) -> bool {
    true
}

fn verified_driver(_: &Page, facts: &AccountFacts) -> bool {
    facts.driver_verified
}

fn applied(_: &Page, facts: &AccountFacts) -> bool {
    facts.pending_application.is_some()
}

fn names_application(page: &Page, _: &AccountFacts) -> bool {
    matches!(page, Page::DriverApplication { uuid: Some(_) })
}

fn application_status(page: &Page, facts: &AccountFacts) -> Screen {
    let uuid = match page {
        Page::DriverApplication { uuid: Some(uuid) } => uuid.clone(),
        _ => facts.pending_application.clone().unwrap_or_default(),
    };
    Screen::ApplicationStatus { uuid }
}

fn driver_apply(_: &Page, _: &AccountFacts) -> Screen {
    Screen::DriverApply
}

pub const RULES: &[Rule] = &[
    Rule { kind: PageKind::Dashboard, when: always, screen: |_, _| Screen::Dashboard },
    Rule { kind: PageKind::Profile, when: always, screen: |_, _| Screen::Profile },
    Rule { kind: PageKind::FindRide, when: always, screen: |_, _| Screen::FindRide },
    Rule { kind: PageKind::RideRequest, when: always, screen: |_, _| Screen::RideRequest },
    Rule {
        kind: PageKind::RiderTrips,
        when: always,
        screen: |page, _| match page {
            Page::RiderTrips { tab } => Screen::RiderTrips { tab: *tab },
            _ => Screen::NotFound,
        },
    },
    Rule {
        kind: PageKind::RiderTrip,
        when: always,
        screen: |page, _| match page {
            Page::RiderTrip { tab, uuid } => Screen::RiderTrip { tab: *tab, uuid: uuid.clone() },
            _ => Screen::NotFound,
        },
    },
    Rule { kind: PageKind::DriverApplication, when: names_application, screen: application_status },
    Rule { kind: PageKind::DriverApplication, when: verified_driver, screen: |_, _| Screen::CreateTrip },
    Rule { kind: PageKind::DriverApplication, when: applied, screen: application_status },
    Rule { kind: PageKind::DriverApplication, when: always, screen: driver_apply },
    Rule { kind: PageKind::CreateTrip, when: verified_driver, screen: |_, _| Screen::CreateTrip },
    Rule {
        kind: PageKind::FindRiders,
        when: verified_driver,
        screen: |page, _| match page {
            Page::FindRiders { tab } => Screen::FindRiders { tab: *tab },
            _ => Screen::NotFound,
        },
    },
    Rule { kind: PageKind::DriverTrips, when: verified_driver, screen: |_, _| Screen::DriverTrips },
    Rule {
        kind: PageKind::DriverTrip,
        when: verified_driver,
        screen: |page, _| match page {
            Page::DriverTrip { uuid } => Screen::DriverTrip { uuid: uuid.clone() },
            _ => Screen::NotFound,
        },
    },
    // Driver tools reached by an account that is not a verified driver yet.
    Rule { kind: PageKind::CreateTrip, when: applied, screen: application_status },
    Rule { kind: PageKind::FindRiders, when: applied, screen: application_status },
    Rule { kind: PageKind::DriverTrips, when: applied, screen: application_status },
    Rule { kind: PageKind::DriverTrip, when: applied, screen: application_status },
    Rule { kind: PageKind::CreateTrip, when: always, screen: driver_apply },
    Rule { kind: PageKind::FindRiders, when: always, screen: driver_apply },
    Rule { kind: PageKind::DriverTrips, when: always, screen: driver_apply },
    Rule { kind: PageKind::DriverTrip, when: always, screen: driver_apply },
];

/// Pick the screen for `page`: the first rule matching both the page and
/// the account wins.
pub fn resolve(page: &Page, facts: &AccountFacts) -> Screen {
    let kind = page.kind();
    RULES
        .iter()
        .find(|rule| rule.kind == kind && (rule.when)(page, facts))
        .map(|rule| (rule.screen)(page, facts))
        .unwrap_or_else(|| {
            tracing::debug!("no screen for {:?}", page);
            Screen::NotFound
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rider() -> AccountFacts {
        AccountFacts::default()
    }

    fn applicant() -> AccountFacts {
        AccountFacts {
            driver_verified: false,
            pending_application: Some("app-1".into()),
        }
    }

    fn driver() -> AccountFacts {
        AccountFacts {
            driver_verified: true,
            pending_application: None,
        }
    }

    #[test]
    fn test_rider_pages_ignore_account_state() {
        for facts in [rider(), applicant(), driver()] {
            assert_eq!(resolve(&Page::FindRide, &facts), Screen::FindRide);
            assert_eq!(resolve(&Page::Dashboard, &facts), Screen::Dashboard);
            assert_eq!(
                resolve(&Page::RiderTrips { tab: RiderTripsTab::Requested }, &facts),
                Screen::RiderTrips { tab: RiderTripsTab::Requested }
            );
        }
    }

    #[test]
    fn test_driver_tools_need_verification() {
        let page = Page::FindRiders { tab: RidersTab::Requested };
        assert_eq!(resolve(&page, &driver()), Screen::FindRiders { tab: RidersTab::Requested });
        assert_eq!(resolve(&page, &rider()), Screen::DriverApply);
        assert_eq!(
            resolve(&page, &applicant()),
            Screen::ApplicationStatus { uuid: "app-1".into() }
        );
        assert_eq!(resolve(&Page::CreateTrip, &rider()), Screen::DriverApply);
        assert_eq!(resolve(&Page::CreateTrip, &driver()), Screen::CreateTrip);
    }

    #[test]
    fn test_driver_application_page() {
        let named = Page::DriverApplication { uuid: Some("app-9".into()) };
        assert_eq!(resolve(&named, &rider()), Screen::ApplicationStatus { uuid: "app-9".into() });
        assert_eq!(resolve(&named, &driver()), Screen::ApplicationStatus { uuid: "app-9".into() });

        let bare = Page::DriverApplication { uuid: None };
        assert_eq!(resolve(&bare, &rider()), Screen::DriverApply);
        assert_eq!(resolve(&bare, &applicant()), Screen::ApplicationStatus { uuid: "app-1".into() });
        assert_eq!(resolve(&bare, &driver()), Screen::CreateTrip);
    }

    #[test]
    fn test_public_pages_have_no_screen() {
        assert_eq!(resolve(&Page::SignIn, &driver()), Screen::NotFound);
        assert!(!Page::SignUp.is_protected());
        assert!(Page::DriverTrips.is_protected());
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            Page::RiderTrips { tab: RiderTripsTab::Created }.path(),
            "/rider-flow/trips?tab=created"
        );
        assert_eq!(
            Page::FindRiders { tab: RidersTab::Requested }.path(),
            "/find-riders?tab=requested"
        );
        assert_eq!(
            Page::DriverApplication { uuid: Some("a".into()) }.path(),
            "/driver-application?uuid=a"
        );
        assert_eq!(RidersTab::parse("bogus"), RidersTab::Feed);
    }

    #[test]
    fn test_account_facts() {
        let account = Account {
            driver_verified: false,
            driver_applications: vec![api::DriverApplication {
                application_uuid: Some("app-3".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(AccountFacts::of(&account), AccountFacts {
            driver_verified: false,
            pending_application: Some("app-3".into()),
        });
    }
}
