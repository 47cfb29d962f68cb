use crate::geo::GeoPoint;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier the store assigns to a school row.
///
/// Opaque to the rest of the system: integer identity columns and text or uuid
/// keys are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchoolId {
    Int(i64),
    Text(String),
}

impl From<i64> for SchoolId {
    fn from(id: i64) -> Self {
        SchoolId::Int(id)
    }
}

impl From<String> for SchoolId {
    fn from(id: String) -> Self {
        SchoolId::Text(id)
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchoolId::Int(id) => write!(f, "{}", id),
            SchoolId::Text(id) => f.write_str(id),
        }
    }
}

/// A timestamp column as the store returned it.
///
/// `timestamptz` values carry an offset, `timestamp` values do not; anything
/// else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreTimestamp {
    Zoned(DateTime<Utc>),
    Naive(NaiveDateTime),
    Raw(serde_json::Value),
}

impl From<DateTime<Utc>> for StoreTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        StoreTimestamp::Zoned(at)
    }
}

/// A school as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Set by the store's column default. Some stores do not return it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<StoreTimestamp>,
}

impl School {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// The client-supplied fields of a school that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}
