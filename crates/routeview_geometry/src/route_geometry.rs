use std::{fmt::Display, str::FromStr};

use geo_types::{Coord, LineString, Point};
use geojson::{Feature, Geometry, JsonObject};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    optimizer_result::{Route, RouteStep},
    polyline,
    validation::is_valid_coords,
};

const MAX_PRECISION: u32 = 10;

/// Ordered list of precisions an undeclared polyline is decoded with.
///
/// Some backends emit precision 6 without saying so; decoding those at
/// precision 5 yields out of range coordinates, which moves on to the next
/// precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionPolicy {
    precisions: Vec<u32>,
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        PrecisionPolicy {
            precisions: vec![5, 6],
        }
    }
}

impl PrecisionPolicy {
    pub fn new(precisions: Vec<u32>) -> Result<Self, PrecisionPolicyError> {
        if precisions.is_empty() {
            return Err(PrecisionPolicyError::Empty);
        }

        if let Some(&precision) = precisions.iter().find(|&&p| p > MAX_PRECISION) {
            return Err(PrecisionPolicyError::OutOfRange(precision));
        }

        Ok(PrecisionPolicy { precisions })
    }

    pub fn precisions(&self) -> &[u32] {
        &self.precisions
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrecisionPolicyError {
    #[error("precision list is empty")]
    Empty,

    #[error("precision {0} is out of range")]
    OutOfRange(u32),

    #[error("invalid precision value: {0}")]
    Invalid(String),
}

impl FromStr for PrecisionPolicy {
    type Err = PrecisionPolicyError;

    /// Parses a comma separated list such as `5,6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let precisions = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| PrecisionPolicyError::Invalid(part.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        PrecisionPolicy::new(precisions)
    }
}

/// Which attempt produced a route's line geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    Polyline { precision: u32 },
    StepLocations,
    None,
}

impl Display for GeometrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometrySource::Polyline { precision } => write!(f, "polyline{precision}"),
            GeometrySource::StepLocations => write!(f, "step_locations"),
            GeometrySource::None => write!(f, "none"),
        }
    }
}

#[derive(Debug)]
enum GeometryAttempt<'a> {
    Polyline { encoded: &'a str, precision: u32 },
    StepLocations,
}

impl GeometryAttempt<'_> {
    fn coordinates(&self, route: &Route) -> Vec<Coord<f64>> {
        match self {
            GeometryAttempt::Polyline { encoded, precision } => {
                polyline::decode(encoded, *precision)
            }
            GeometryAttempt::StepLocations => {
                route.steps.iter().filter_map(RouteStep::raw_coordinate).collect()
            }
        }
    }

    fn source(&self) -> GeometrySource {
        match self {
            GeometryAttempt::Polyline { precision, .. } => GeometrySource::Polyline {
                precision: *precision,
            },
            GeometryAttempt::StepLocations => GeometrySource::StepLocations,
        }
    }
}

fn geometry_attempts<'a>(route: &'a Route, policy: &PrecisionPolicy) -> Vec<GeometryAttempt<'a>> {
    let mut attempts = Vec::with_capacity(policy.precisions().len() + 1);

    if let Some(encoded) = route.encoded_geometry() {
        attempts.extend(
            policy
                .precisions()
                .iter()
                .map(|&precision| GeometryAttempt::Polyline { encoded, precision }),
        );
    }

    attempts.push(GeometryAttempt::StepLocations);
    attempts
}

#[derive(Debug)]
pub struct RouteGeometry {
    pub line: Option<LineString<f64>>,
    pub source: GeometrySource,
    /// The route carried an encoded geometry but its first decode attempt
    /// was rejected.
    pub needed_fallback: bool,
    pub points: Vec<Feature>,
}

pub(crate) fn into_properties(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(properties) => Some(properties),
        _ => None,
    }
}

pub(crate) fn point_feature(coordinate: Coord<f64>, properties: Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::from(&Point::from(coordinate))),
        id: None,
        properties: into_properties(properties),
        foreign_members: None,
    }
}

fn step_feature(step: &RouteStep, coordinate: Coord<f64>, route_index: usize) -> Feature {
    point_feature(
        coordinate,
        json!({
            "step_type": step.step_type,
            "id": step.id,
            "arrival": step.arrival,
            "duration": step.duration,
            "service": step.service,
            "waiting_time": step.waiting_time,
            "load": step.load,
            "location_index": step.location_index,
            "route_index": route_index,
        }),
    )
}

/// Builds the line geometry and the step points of one route.
///
/// Line and points are independent: a route without usable line geometry
/// still yields a point for every located step.
pub fn build_route_geometry(
    route: &Route,
    route_index: usize,
    policy: &PrecisionPolicy,
) -> RouteGeometry {
    let attempts = geometry_attempts(route, policy);

    let winner = attempts.iter().enumerate().find_map(|(position, attempt)| {
        let coordinates = attempt.coordinates(route);
        is_valid_coords(&coordinates).then(|| (position, attempt.source(), coordinates))
    });

    let needed_fallback =
        route.encoded_geometry().is_some() && !matches!(winner, Some((0, _, _)));

    let (line, source) = match winner {
        Some((_, source, coordinates)) => (Some(LineString::new(coordinates)), source),
        None => (None, GeometrySource::None),
    };

    if needed_fallback {
        warn!(
            route_index,
            vehicle = ?route.vehicle,
            %source,
            "encoded route geometry rejected at first precision"
        );
    } else if line.is_none() {
        debug!(route_index, "route has no usable line geometry");
    }

    let points = route
        .steps
        .iter()
        .filter_map(|step| {
            step.coordinate()
                .map(|coordinate| step_feature(step, coordinate, route_index))
        })
        .collect();

    RouteGeometry {
        line,
        source,
        needed_fallback,
        points,
    }
}
