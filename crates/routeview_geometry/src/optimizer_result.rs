//! Optimizer response documents (NextBillion-style `result.routes[].steps[]`).

use geo_types::Coord;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{
    coordinates::{parse_lat_lon, read_lat_lon},
    lenient,
};

#[derive(Debug, Default, Deserialize)]
pub struct OptimizerResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub result: Option<OptimizerResult>,
}

impl OptimizerResponse {
    /// Reads a parsed document. Anything that is not an object yields an
    /// empty response.
    pub fn from_document(document: &Value) -> Self {
        OptimizerResponse::deserialize(document).unwrap_or_default()
    }

    pub fn routes(&self) -> &[Route] {
        self.result
            .as_ref()
            .map(|result| result.routes.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimizerResult {
    pub code: Option<Value>,
    pub summary: Option<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Route {
    pub vehicle: Option<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub steps: Vec<RouteStep>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub cost: Option<Number>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub distance: Option<Number>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub duration: Option<Number>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub setup: Option<Number>,
    /// Encoded polyline of the road geometry, precision undeclared.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub geometry: Option<String>,
}

impl Route {
    pub fn encoded_geometry(&self) -> Option<&str> {
        self.geometry.as_deref().filter(|geometry| !geometry.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteStep {
    #[serde(rename = "type", default, deserialize_with = "lenient::optional")]
    pub step_type: Option<String>,
    pub id: Option<Value>,
    /// `[lat, lon]` as emitted by the optimizer.
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub location_index: Option<usize>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub arrival: Option<Number>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub duration: Option<Number>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub service: Option<Number>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub waiting_time: Option<Number>,
    pub load: Option<Value>,
}

impl RouteStep {
    /// Position of the step, `None` when missing or out of range.
    pub fn coordinate(&self) -> Option<Coord<f64>> {
        self.location.as_ref().and_then(parse_lat_lon)
    }

    /// Position of the step as written, range unchecked.
    pub fn raw_coordinate(&self) -> Option<Coord<f64>> {
        self.location.as_ref().and_then(read_lat_lon)
    }
}
