//! Display helpers for dates and money, plus parsing of `datetime-local` input.

use api::models::Fare;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// The value format of `<input type="datetime-local">`.
const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// "Apr 1, 2025 9:00 AM" in the viewer's time zone.
pub fn datetime(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%b %-d, %Y %-I:%M %p").to_string()
}

pub fn maybe_datetime(value: Option<DateTime<Utc>>) -> String {
    value.map(datetime).unwrap_or_else(|| "Not set".to_string())
}

/// Read a `datetime-local` value as local wall-clock time.
pub fn parse_datetime_local(text: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), DATETIME_LOCAL).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Inverse of [`parse_datetime_local`], for prefilling the input.
pub fn datetime_local_value(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.with_timezone(&Local).format(DATETIME_LOCAL).to_string())
        .unwrap_or_default()
}

pub fn dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// "Trip: $20.00 | Food: $5.00 | Gas: $10.00"
pub fn fare_breakdown(fare: &Fare) -> String {
    format!(
        "Trip: {} | Food: {} | Gas: {}",
        dollars(fare.trip.unwrap_or(0.0)),
        dollars(fare.food.unwrap_or(0.0)),
        dollars(fare.gas.unwrap_or(0.0))
    )
}

/// Blank input reads as "not entered yet".
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_local_round_trip() {
        let parsed = parse_datetime_local("2025-04-01T09:30").unwrap();
        assert_eq!(datetime_local_value(Some(parsed)), "2025-04-01T09:30");
        assert!(parse_datetime_local("").is_none());
        assert!(parse_datetime_local("April 1st").is_none());
    }

    #[test]
    fn test_fare_breakdown() {
        let fare = Fare {
            trip: Some(20.0),
            food: None,
            gas: Some(7.5),
            aggregated: None,
        };
        assert_eq!(fare_breakdown(&fare), "Trip: $20.00 | Food: $0.00 | Gas: $7.50");
    }

    #[test]
    fn test_amounts() {
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(dollars(3.0), "$3.00");
    }
}
