use geojson::{Feature, FeatureCollection};
use serde_json::{Value, json};

use crate::{
    optimizer_request::{OptimizerRequest, PointReference},
    route_geometry::point_feature,
};

fn request_point(
    request: &OptimizerRequest,
    reference: PointReference<'_>,
    role: &str,
    id: &Option<Value>,
) -> Option<Feature> {
    request
        .resolve(reference)
        .map(|coordinate| point_feature(coordinate, json!({ "role": role, "id": id })))
}

/// Point features for everything a request places on the map.
///
/// Vehicle start and end points come first, then jobs, then shipment pickups
/// and deliveries. Points whose position cannot be resolved are left out.
pub fn extract_request_points(request: &OptimizerRequest) -> FeatureCollection {
    let vehicles = request.vehicles.iter().flat_map(|vehicle| {
        [
            request_point(request, vehicle.start_reference(), "start", &vehicle.id),
            request_point(request, vehicle.end_reference(), "end", &vehicle.id),
        ]
    });

    let jobs = request
        .jobs
        .iter()
        .map(|job| request_point(request, job.reference(), "job", &job.id));

    let shipments = request.shipments.iter().flat_map(|shipment| {
        [
            shipment
                .pickup
                .as_ref()
                .and_then(|pickup| request_point(request, pickup.reference(), "pickup", &pickup.id)),
            shipment.delivery.as_ref().and_then(|delivery| {
                request_point(request, delivery.reference(), "delivery", &delivery.id)
            }),
        ]
    });

    FeatureCollection {
        bbox: None,
        features: vehicles.chain(jobs).chain(shipments).flatten().collect(),
        foreign_members: None,
    }
}
