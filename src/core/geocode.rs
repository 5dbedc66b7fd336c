//! Reverse geocoding seam. Lookups are best effort: `None` simply leaves
//! the drawing's address unrecorded.

use crate::models::GeoPoint;

pub trait Geocoder {
    fn reverse(&self, point: GeoPoint) -> Option<String>;
}

/// Geocoder used when no lookup service is configured.
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    fn reverse(&self, _point: GeoPoint) -> Option<String> {
        None
    }
}
