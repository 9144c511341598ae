use geojson::{Feature, Value as GeoJsonValue};
use serde::Deserialize;
use serde_json::Value;

use crate::optimizer_result::Route;

pub fn route_from_json(value: Value) -> Route {
    Route::deserialize(&value).unwrap()
}

/// Flattened coordinates of a point feature, `[lon, lat]`.
pub fn feature_coordinates(feature: &Feature) -> Vec<f64> {
    match feature.geometry.as_ref().map(|geometry| &geometry.value) {
        Some(GeoJsonValue::Point(position)) => position.clone(),
        other => panic!("expected a point geometry, got {other:?}"),
    }
}

pub fn line_coordinates(feature: &Feature) -> Vec<Vec<f64>> {
    match feature.geometry.as_ref().map(|geometry| &geometry.value) {
        Some(GeoJsonValue::LineString(positions)) => positions.clone(),
        other => panic!("expected a line geometry, got {other:?}"),
    }
}

pub fn property<'a>(feature: &'a Feature, name: &str) -> &'a Value {
    &feature.properties.as_ref().unwrap()[name]
}
