pub mod geo;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use geo::{EARTH_RADIUS_KM, GeoPoint, LATITUDE_RANGE, LONGITUDE_RANGE, haversine_km};
pub use structs::{NewSchool, School, SchoolId, StoreTimestamp};
