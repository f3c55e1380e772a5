//! One-shot confirmation dialogs that gate a single request behind a terms
//! checkbox.

use serde::Serialize;

use crate::error::ValidationError;

pub const TERMS_REQUIRED: &str = "You must accept the terms and conditions to request a ride.";
pub const OFFER_TERMS_REQUIRED: &str = "Please accept the terms and conditions.";

pub const RIDER_TERMS: &str = "I agree that payment will be handled solely between the driver and I. \
I accept that GatorPool is not liable for any issues that may arise, but offers safety features to ensure \
the trip is safe. I accept that my ride request may be denied by the driver.";
pub const DRIVER_TERMS: &str = "I accept the terms and conditions. I accept that my request might be rejected.";

/// "Request this trip" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermsConfirmation {
    pub accepted: bool,
}

impl TermsConfirmation {
    pub fn confirm(&self) -> Result<(), ValidationError> {
        if self.accepted {
            Ok(())
        } else {
            Err(ValidationError::new("accepted", TERMS_REQUIRED))
        }
    }
}

/// "Offer to drive" dialog. Amounts are typed text; blanks count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverOffer {
    pub food: String,
    pub gas: String,
    pub trip: String,
    pub accepted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OfferFare {
    pub food: f64,
    pub gas: f64,
    pub trip: f64,
    pub total: f64,
}

impl DriverOffer {
    /// Running total shown under the inputs; unparsable amounts add nothing.
    pub fn total(&self) -> f64 {
        [&self.food, &self.gas, &self.trip]
            .iter()
            .filter_map(|t| amount(t))
            .sum()
    }

    pub fn confirm(&self) -> Result<OfferFare, ValidationError> {
        if !self.accepted {
            return Err(ValidationError::new("accepted", OFFER_TERMS_REQUIRED));
        }
        let food = amount(&self.food).ok_or_else(|| invalid("food"))?;
        let gas = amount(&self.gas).ok_or_else(|| invalid("gas"))?;
        let trip = amount(&self.trip).ok_or_else(|| invalid("trip"))?;
        Ok(OfferFare {
            food,
            gas,
            trip,
            total: food + gas + trip,
        })
    }
}

fn amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn invalid(field: &'static str) -> ValidationError {
    ValidationError::new(field, "Enter a valid dollar amount.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_needs_terms() {
        let mut dialog = TermsConfirmation::default();
        assert_eq!(dialog.confirm().unwrap_err().message, TERMS_REQUIRED);
        dialog.accepted = true;
        assert!(dialog.confirm().is_ok());
    }

    #[test]
    fn test_offer_totals() {
        let offer = DriverOffer {
            food: "".into(),
            gas: "12.50".into(),
            trip: "30".into(),
            accepted: true,
        };
        assert_eq!(offer.total(), 42.5);
        let fare = offer.confirm().unwrap();
        assert_eq!(fare.food, 0.0);
        assert_eq!(fare.total, 42.5);
    }

    #[test]
    fn test_offer_rejects_bad_input() {
        let mut offer = DriverOffer {
            gas: "ten".into(),
            ..Default::default()
        };
        assert_eq!(offer.confirm().unwrap_err().message, OFFER_TERMS_REQUIRED);
        offer.accepted = true;
        assert_eq!(offer.confirm().unwrap_err().field, "gas");
        assert_eq!(offer.total(), 0.0);
    }
}
