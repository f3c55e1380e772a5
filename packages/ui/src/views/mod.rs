mod modal_overlay;
pub use modal_overlay::{Drawer, ModalOverlay};

mod protected;
pub use protected::{ProtectedLayout, ScreenView};

mod sign_in;
pub use sign_in::SignInView;

mod sign_up;
pub use sign_up::{CheckInboxView, SignUpView};

mod verify_email;
pub use verify_email::VerifyEmailView;

mod finish_signup;
pub use finish_signup::FinishSignupView;

mod dashboard;
pub use dashboard::DashboardView;

mod profile;
pub use profile::ProfileView;

mod find_ride;
pub use find_ride::FindRideView;

mod ride_request;
pub use ride_request::{RideRequestView, REQUEST_HANDOFF};

mod rider_trips;
pub use rider_trips::{RiderTripView, RiderTripsView};

mod create_trip;
pub use create_trip::CreateTripView;

mod driver_apply;
pub use driver_apply::{ApplicationStatusView, DriverApplyView};

mod find_riders;
pub use find_riders::FindRidersView;

mod driver_trips;
pub use driver_trips::{DriverTripView, DriverTripsView};
