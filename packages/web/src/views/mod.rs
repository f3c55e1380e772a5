mod layout;
pub use layout::{NotFound, Pages, Protected, Root};

mod auth;
pub use auth::{CheckInbox, FinishSignup, SignIn, SignUp, VerifyEmail};

mod screens;
pub use screens::{
    CreateTrip, Dashboard, DriverApplication, DriverTrip, DriverTrips, FindRide, FindRiders, Profile,
    RideRequest, RiderTrip, RiderTrips,
};
