// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Radius of Earth used for all distance computations, in kilometers.
pub const EARTH_RADIUS: f64 = 6371.0;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in kilometers.
///
/// The result is zero for identical positions and does not depend on argument order.
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let sin_dlat_half = ((lat2 - lat1).to_radians() * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1).to_radians() * 0.5).sin();

    let a = sin_dlat_half * sin_dlat_half
        + lat1.to_radians().cos() * lat2.to_radians().cos() * sin_dlon_half * sin_dlon_half;
    let a = a.clamp(0.0, 1.0); // rounding may push near-antipodal points past 1

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS * c
}
