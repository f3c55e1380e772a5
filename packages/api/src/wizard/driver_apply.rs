//! Driver application wizard.

use serde::Serialize;

use super::{require, Flow};
use crate::error::ValidationError;
use crate::models::Account;

pub const CERTIFICATION: &str = "By submitting this application, I certify that all information provided \
is accurate and truthful to the best of my knowledge. I understand that applying to become a driver does \
not guarantee acceptance, and my eligibility will be reviewed based on the platform's requirements. I agree \
to abide by all local, state, and federal laws while using this ridesharing platform and acknowledge that \
any false information or violation of terms may result in the rejection or termination of my application. \
Additionally, I consent to background and vehicle checks as part of the approval process.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverApplicationStep {
    BasicInfo,
    Vehicle,
    Review,
}

/// Everything is kept as typed text; `seats` and `lugroom` are parsed when
/// the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`.
    pub dob: String,
    pub address: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub license_plate: String,
    pub license_state: String,
    pub seats: String,
    pub lugroom: String,
    pub certified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverApplicationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub address: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub license_plate: String,
    pub license_state: String,
    pub seats: i64,
    pub lugroom: i64,
}

impl DriverApplicationDraft {
    /// Start from what the account already knows.
    pub fn for_account(account: &Account) -> Self {
        Self {
            first_name: account.first_name.clone().unwrap_or_default(),
            last_name: account.last_name.clone().unwrap_or_default(),
            email: account.email.clone().unwrap_or_default(),
            address: account.address.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn to_request(&self) -> Result<DriverApplicationRequest, ValidationError> {
        Ok(DriverApplicationRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            dob: self.dob.trim().to_string(),
            address: self.address.trim().to_string(),
            address_line2: self.address_line2.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip: self.zip.trim().to_string(),
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year.trim().to_string(),
            color: self.color.trim().to_string(),
            license_plate: self.license_plate.trim().to_string(),
            license_state: self.license_state.trim().to_string(),
            seats: whole_number("seats", &self.seats, "Seats")?,
            lugroom: whole_number("lugroom", &self.lugroom, "Luggage room")?,
        })
    }
}

fn whole_number(field: &'static str, text: &str, label: &str) -> Result<i64, ValidationError> {
    match text.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(ValidationError::new(field, format!("{} must be a whole number.", label))),
    }
}

pub struct DriverApplicationFlow;

impl Flow for DriverApplicationFlow {
    type Draft = DriverApplicationDraft;
    type Step = DriverApplicationStep;

    const STEPS: &'static [DriverApplicationStep] = &[
        DriverApplicationStep::BasicInfo,
        DriverApplicationStep::Vehicle,
        DriverApplicationStep::Review,
    ];

    fn validate(draft: &DriverApplicationDraft) -> Result<(), ValidationError> {
        let required = [
            ("first_name", draft.first_name.as_str(), "First name"),
            ("last_name", draft.last_name.as_str(), "Last name"),
            ("email", draft.email.as_str(), "Email"),
            ("phone", draft.phone.as_str(), "Phone number"),
            ("dob", draft.dob.as_str(), "Date of birth"),
            ("address", draft.address.as_str(), "Address"),
            ("city", draft.city.as_str(), "City"),
            ("state", draft.state.as_str(), "State"),
            ("zip", draft.zip.as_str(), "Zip"),
            ("make", draft.make.as_str(), "Make"),
            ("model", draft.model.as_str(), "Model"),
            ("year", draft.year.as_str(), "Year"),
            ("color", draft.color.as_str(), "Color"),
            ("license_plate", draft.license_plate.as_str(), "License plate"),
            ("license_state", draft.license_state.as_str(), "License state"),
        ];
        for (field, value, label) in required {
            require(field, value, label)?;
        }
        draft.to_request()?;
        if !draft.certified {
            return Err(ValidationError::new(
                "certified",
                "You must agree to the certification to submit your application.",
            ));
        }
        Ok(())
    }

    fn title(step: DriverApplicationStep) -> &'static str {
        match step {
            DriverApplicationStep::BasicInfo => "Basic Information",
            DriverApplicationStep::Vehicle => "Vehicle Information",
            DriverApplicationStep::Review => "Agreement",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    fn complete() -> DriverApplicationDraft {
        DriverApplicationDraft {
            first_name: "Albert".into(),
            last_name: "Gator".into(),
            email: "albert@ufl.edu".into(),
            phone: "352-555-0100".into(),
            dob: "2003-04-04".into(),
            address: "1 Stadium Rd".into(),
            address_line2: String::new(),
            city: "Gainesville".into(),
            state: "FL".into(),
            zip: "32611".into(),
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: "2019".into(),
            color: "Blue".into(),
            license_plate: "GTR123".into(),
            license_state: "FL".into(),
            seats: " 4".into(),
            lugroom: "2".into(),
            certified: true,
        }
    }

    #[test]
    fn test_steps_advance_without_guards() {
        let mut wizard = Wizard::<DriverApplicationFlow>::new();
        assert!(wizard.next());
        assert!(wizard.next());
        assert_eq!(wizard.step(), DriverApplicationStep::Review);
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[test]
    fn test_numbers_checked_only_at_submit() {
        let mut draft = complete();
        draft.seats = "four".into();
        let mut wizard = Wizard::<DriverApplicationFlow>::with_draft(draft);
        wizard.next();
        wizard.next();
        let err = wizard.begin_submit().unwrap_err();
        assert_eq!(err.field, "seats");
        assert_eq!(wizard.error(), Some("Seats must be a whole number."));
    }

    #[test]
    fn test_request_body() {
        let request = complete().to_request().unwrap();
        assert_eq!(request.seats, 4);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["address_line2"], "");
        assert_eq!(body["year"], "2019");
        assert_eq!(body["lugroom"], 2);
        assert!(body.get("certified").is_none());
    }

    #[test]
    fn test_certification_required() {
        let mut draft = complete();
        draft.certified = false;
        let err = DriverApplicationFlow::validate(&draft).unwrap_err();
        assert_eq!(err.field, "certified");

        draft.certified = true;
        draft.city = "  ".into();
        assert_eq!(DriverApplicationFlow::validate(&draft).unwrap_err().field, "city");
    }

    #[test]
    fn test_prefill_from_account() {
        let account = Account {
            first_name: Some("Albert".into()),
            email: Some("albert@ufl.edu".into()),
            ..Default::default()
        };
        let draft = DriverApplicationDraft::for_account(&account);
        assert_eq!(draft.first_name, "Albert");
        assert_eq!(draft.email, "albert@ufl.edu");
        assert!(draft.last_name.is_empty());
    }
}
