use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// A WGS84 coordinate picked on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Serialize a point list into the `points` column format: `lat,lon;lat,lon`.
    pub fn join(points: &[GeoPoint]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", p.lat, p.lon))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Parse the `points` column format back into coordinates.
    ///
    /// Empty segments are skipped, so a trailing `;` is tolerated.
    pub fn parse_list(s: &str) -> AppResult<Vec<GeoPoint>> {
        let mut out = Vec::new();

        for raw in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (lat_raw, lon_raw) = raw
                .split_once(',')
                .ok_or_else(|| AppError::InvalidPoints(format!("missing ',' in '{raw}'")))?;

            let lat: f64 = lat_raw
                .trim()
                .parse()
                .map_err(|_| AppError::InvalidPoints(format!("invalid latitude '{lat_raw}'")))?;
            let lon: f64 = lon_raw
                .trim()
                .parse()
                .map_err(|_| AppError::InvalidPoints(format!("invalid longitude '{lon_raw}'")))?;

            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(AppError::InvalidPoints(format!(
                    "coordinate out of range: {lat},{lon}"
                )));
            }

            out.push(GeoPoint { lat, lon });
        }

        Ok(out)
    }
}
