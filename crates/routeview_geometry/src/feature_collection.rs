use geo_types::LineString;
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::json;

use crate::{
    optimizer_result::{OptimizerResponse, Route},
    route_geometry::{
        GeometrySource, PrecisionPolicy, RouteGeometry, build_route_geometry, into_properties,
    },
};

fn line_feature(
    route: &Route,
    route_index: usize,
    line: &LineString<f64>,
    source: GeometrySource,
) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::from(line)),
        id: None,
        properties: into_properties(json!({
            "route_index": route_index,
            "vehicle": route.vehicle,
            "cost": route.cost,
            "distance": route.distance,
            "duration": route.duration,
            "setup": route.setup,
            "geometry_source": source.to_string(),
        })),
        foreign_members: None,
    }
}

/// Converts an optimizer response into map features.
///
/// Each route contributes its line (when one could be built) followed by its
/// step points, routes in input order.
pub fn to_feature_collection(
    response: &OptimizerResponse,
    policy: &PrecisionPolicy,
) -> FeatureCollection {
    let mut features = Vec::new();

    for (route_index, route) in response.routes().iter().enumerate() {
        let RouteGeometry {
            line,
            source,
            points,
            ..
        } = build_route_geometry(route, route_index, policy);

        if let Some(line) = line {
            features.push(line_feature(route, route_index, &line, source));
        }

        features.extend(points);
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
