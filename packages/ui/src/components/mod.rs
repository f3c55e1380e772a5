//! Small building blocks shared by every view.

mod address_input;
mod button;
mod input;
mod loading;
mod password_checklist;
mod progress;
mod static_map;
mod trip_card;

pub use address_input::AddressInput;
pub use button::{Button, ButtonVariant};
pub use input::{Checkbox, Field, Input, Label};
pub use loading::LoadingScreen;
pub use password_checklist::PasswordChecklist;
pub use progress::WizardProgress;
pub use static_map::StaticMapImage;
pub use trip_card::TripCard;
