//! Presence and range checks for incoming requests.
//!
//! Every check runs, so a rejected request reports all of its bad fields at once.

use core_types::{GeoPoint, LATITUDE_RANGE, LONGITUDE_RANGE, NewSchool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;

/// Where the offending value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub location: Location,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, location: Location, message: &str) -> Self {
        Self {
            field: field.to_string(),
            location,
            message: message.to_string(),
        }
    }
}

/// The body of `POST /addSchool` before validation. Fields are loosely typed so
/// that a wrong type is reported against its field rather than failing the parse.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSchoolPayload {
    pub name: Option<Value>,
    pub address: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

/// The query string of `GET /listSchools` before validation.
#[derive(Debug, Default, Deserialize)]
pub struct ListSchoolsQuery {
    #[serde(rename = "userLat")]
    pub user_lat: Option<String>,
    #[serde(rename = "userLon")]
    pub user_lon: Option<String>,
}

impl CreateSchoolPayload {
    pub fn validate(self) -> Result<NewSchool, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = required_text(self.name.as_ref());
        if name.is_none() {
            errors.push(FieldError::new("name", Location::Body, "School name is required."));
        }
        let address = required_text(self.address.as_ref());
        if address.is_none() {
            errors.push(FieldError::new("address", Location::Body, "Address is required."));
        }
        let latitude = number_in(self.latitude.as_ref(), &LATITUDE_RANGE);
        if latitude.is_none() {
            errors.push(FieldError::new(
                "latitude",
                Location::Body,
                "A valid latitude (-90 to 90) is required.",
            ));
        }
        let longitude = number_in(self.longitude.as_ref(), &LONGITUDE_RANGE);
        if longitude.is_none() {
            errors.push(FieldError::new(
                "longitude",
                Location::Body,
                "A valid longitude (-180 to 180) is required.",
            ));
        }

        match (name, address, latitude, longitude) {
            (Some(name), Some(address), Some(latitude), Some(longitude)) => Ok(NewSchool {
                name,
                address,
                latitude,
                longitude,
            }),
            _ => Err(errors),
        }
    }
}

impl ListSchoolsQuery {
    pub fn validate(self) -> Result<GeoPoint, Vec<FieldError>> {
        let mut errors = Vec::new();

        let latitude = self
            .user_lat
            .as_deref()
            .and_then(|v| parse_in(v, &LATITUDE_RANGE));
        if latitude.is_none() {
            errors.push(FieldError::new(
                "userLat",
                Location::Query,
                "A valid user latitude (userLat) is required.",
            ));
        }
        let longitude = self
            .user_lon
            .as_deref()
            .and_then(|v| parse_in(v, &LONGITUDE_RANGE));
        if longitude.is_none() {
            errors.push(FieldError::new(
                "userLon",
                Location::Query,
                "A valid user longitude (userLon) is required.",
            ));
        }

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Ok(GeoPoint::new(latitude, longitude)),
            _ => Err(errors),
        }
    }
}

fn required_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Accepts a JSON number or a numeric string.
fn number_in(value: Option<&Value>, range: &RangeInclusive<f64>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| range.contains(v)),
        Value::String(s) => parse_in(s, range),
        _ => None,
    }
}

// `contains` is false for NaN, so non-finite input never passes.
fn parse_in(raw: &str, range: &RangeInclusive<f64>) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| range.contains(v))
}
