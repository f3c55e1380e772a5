use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub vehicle_uuid: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub color: Option<String>,
    pub license_plate: Option<String>,
    pub state: Option<String>,
    pub seats: Option<i64>,
    pub lugroom: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// "2019 Honda Civic (Blue)" with missing parts skipped.
    pub fn describe(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        let mut text = [year.as_deref(), self.make.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(color) = &self.color {
            text.push_str(&format!(" ({color})"));
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Open,
    Accepted,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverApplication {
    pub application_uuid: Option<String>,
    pub user_uuid: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub vehicle: Option<Vehicle>,
    pub address: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub accepted: Option<bool>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub closed: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DriverApplication {
    /// Lifecycle is server-controlled: open until accepted or closed.
    pub fn status(&self) -> ApplicationStatus {
        if self.accepted.unwrap_or(false) {
            ApplicationStatus::Accepted
        } else if self.closed.unwrap_or(false) {
            ApplicationStatus::Closed
        } else {
            ApplicationStatus::Open
        }
    }
}

/// Public driver card attached to rider-facing results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverProfile {
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub rating: Option<f64>,
    pub vehicle: Option<Vehicle>,
    pub trip_uuid: String,
    pub user_uuid: String,
}

/// Public rider card attached to driver-facing results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderProfile {
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub trip_uuid: String,
    pub user_uuid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status() {
        let mut app = DriverApplication::default();
        assert_eq!(app.status(), ApplicationStatus::Open);
        app.closed = Some(true);
        assert_eq!(app.status(), ApplicationStatus::Closed);
        app.accepted = Some(true);
        assert_eq!(app.status(), ApplicationStatus::Accepted);
    }

    #[test]
    fn test_vehicle_describe() {
        let vehicle = Vehicle {
            year: Some(2019),
            make: Some("Honda".into()),
            model: Some("Civic".into()),
            color: Some("Blue".into()),
            ..Default::default()
        };
        assert_eq!(vehicle.describe(), "2019 Honda Civic (Blue)");
        assert_eq!(Vehicle::default().describe(), "");
    }
}
