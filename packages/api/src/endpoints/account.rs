//! Account service: sign-up, email verification, load-in, dashboard drawers
//! and the announcement banner.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use store::SessionInfo;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Account, Announcement};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinishSignup {
    pub first_name: String,
    pub last_name: String,
    pub ufid: String,
    /// `male`, `female` or `other`.
    pub gender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeAddress {
    pub address: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BannerBody {
    announcement: Option<Announcement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenderBody {
    gender: String,
}

impl ApiClient {
    /// Create an account. The email travels as the username header.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let client = self.with_identity(SessionInfo {
            device_id: self.identity().device_id.clone(),
            username: email.trim().to_string(),
        });
        let _: Value = client
            .post("/v1/account/auth/signup", &json!({ "password": password }))
            .await?;
        Ok(())
    }

    /// Confirm the emailed link. Only HTTP 200 counts as verified.
    pub async fn verify_email(&self, id: &str, signature: &str) -> Result<bool, ApiError> {
        let builder = self
            .request(Method::PUT, "/v1/account/auth/verify")
            .query(&[("id", id), ("signature", signature)]);
        let (status, _) = self.send_raw(builder).await?;
        Ok(status == 200)
    }

    pub async fn finish_signup(&self, details: &FinishSignup) -> Result<(), ApiError> {
        let _: Value = self.post("/v1/account/auth/finish", details).await?;
        Ok(())
    }

    /// Rehydrate the account. `hydrate_dashboard` adds status cards, bottom
    /// actions and dashboard stats.
    pub async fn load_in(&self, hydrate_dashboard: bool) -> Result<Account, ApiError> {
        self.post(
            "/v1/account/loadin",
            &json!({ "hydrate_dashboard": hydrate_dashboard }),
        )
        .await
    }

    pub async fn enable_two_factor(&self) -> Result<(), ApiError> {
        let _: Value = self.post("/v1/account/auth/2fa", &json!({})).await?;
        Ok(())
    }

    pub async fn save_home_address(&self, address: &HomeAddress) -> Result<(), ApiError> {
        let _: Value = self.post("/v1/rider/address/save", address).await?;
        Ok(())
    }

    pub async fn save_ride_preferences(&self, pay_for_food: bool, pay_for_gas: bool) -> Result<(), ApiError> {
        let _: Value = self
            .post(
                "/v1/rider/preferences/save",
                &json!({ "pay_for_food": pay_for_food, "pay_for_gas": pay_for_gas }),
            )
            .await?;
        Ok(())
    }

    /// Current announcement, if any and not yet dismissed.
    pub async fn banner(&self) -> Result<Option<Announcement>, ApiError> {
        let body: BannerBody = self.get("/v1/config/banner").await?;
        Ok(body
            .announcement
            .filter(|a| a.announcement.as_deref().is_some_and(|t| !t.is_empty())))
    }

    pub async fn close_banner(&self) -> Result<(), ApiError> {
        let _: Value = self.get("/v1/config/banner/close").await?;
        Ok(())
    }

    /// Gender on the driver record; gates the females-only requirement.
    pub async fn driver_gender(&self) -> Result<String, ApiError> {
        let body: GenderBody = self.get("/v1/driver/gender").await?;
        Ok(body.gender)
    }
}

impl HomeAddress {
    /// Fill the structured address from a picked place.
    pub fn from_place(place: &crate::geo::Place, line2: &str) -> Self {
        Self {
            address: place.text.clone(),
            address_line1: place.parts.line1.clone().unwrap_or_default(),
            address_line2: line2.trim().to_string(),
            city: place.parts.city.clone().unwrap_or_default(),
            state: place.parts.state.clone().unwrap_or_default(),
            zip: place.parts.zip.clone().unwrap_or_default(),
            latitude: place.position.lat,
            longitude: place.position.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{AddressParts, LatLng, Place};

    #[test]
    fn test_home_address_from_place() {
        let place = Place {
            text: "1545 W University Ave, Gainesville, Florida 32603".into(),
            position: LatLng::new(29.65, -82.34),
            parts: AddressParts {
                line1: Some("1545 W University Ave".into()),
                city: Some("Gainesville".into()),
                state: Some("Florida".into()),
                zip: Some("32603".into()),
            },
        };
        let address = HomeAddress::from_place(&place, " Apt 4 ");
        let body = serde_json::to_value(&address).unwrap();
        assert_eq!(body["address_line2"], "Apt 4");
        assert_eq!(body["zip"], "32603");
        assert_eq!(body["latitude"], 29.65);
        assert_eq!(body.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_banner_body_tolerates_null() {
        let body: BannerBody = serde_json::from_value(json!({"success": true, "announcement": null})).unwrap();
        assert!(body.announcement.is_none());
    }
}
