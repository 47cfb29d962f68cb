use crate::error::LocatorError;
use core_types::{GeoPoint, School};
use database::SchoolStore;
use serde::Serialize;

pub mod error;

/// A school together with its distance from the caller's reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    pub distance_km: f64,
}

/// Great-circle distance in kilometres between two points.
pub type DistanceFn = fn(&GeoPoint, &GeoPoint) -> f64;

/// Ranks every stored school by distance from a reference point.
pub struct Locator {
    origin: GeoPoint,
    distance: DistanceFn,
}

impl Locator {
    pub fn new(origin: GeoPoint) -> Self {
        Self::with_distance(origin, GeoPoint::distance_km)
    }

    /// Uses `distance` instead of the haversine formula to score schools.
    pub fn with_distance(origin: GeoPoint, distance: DistanceFn) -> Self {
        Self { origin, distance }
    }

    /// Fetches all schools and returns them nearest first.
    pub async fn run(&self, store: &dyn SchoolStore) -> Result<Vec<RankedSchool>, LocatorError> {
        // 1. Fetch
        let schools = store.list_all().await?;
        if schools.is_empty() {
            return Ok(vec![]);
        }
        tracing::debug!(count = schools.len(), origin = ?self.origin, "Ranking schools.");

        Ok(self.rank(schools))
    }

    /// Annotates each school with its distance and sorts ascending.
    ///
    /// The sort is stable; equal distances keep the order the store returned them in.
    pub fn rank(&self, schools: Vec<School>) -> Vec<RankedSchool> {
        // 2. Score
        let mut ranked: Vec<RankedSchool> = schools
            .into_iter()
            .map(|school| RankedSchool {
                distance_km: (self.distance)(&self.origin, &school.location()),
                school,
            })
            .collect();

        // 3. Rank
        ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        ranked
    }
}
