//! Optimizer request documents: vehicles, jobs, shipments, depots and the
//! shared location table they may point into.

use geo_types::Coord;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    coordinates::{id_key, parse_lat_lon},
    lenient,
};

#[derive(Debug, Default, Deserialize)]
pub struct OptimizerRequest {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub locations: Option<LocationTable>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub depots: Vec<RequestDepot>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub vehicles: Vec<RequestVehicle>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub jobs: Vec<RequestJob>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub shipments: Vec<RequestShipment>,
}

/// Either `{"location": [...]}` or a bare list, entries as `"lat,lon"`
/// strings or `[lat, lon]` arrays.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationTable {
    Keyed { location: Vec<Value> },
    List(Vec<Value>),
}

impl LocationTable {
    pub fn get(&self, index: usize) -> Option<Coord<f64>> {
        let entries = match self {
            LocationTable::Keyed { location } => location,
            LocationTable::List(entries) => entries,
        };

        entries.get(index).and_then(parse_lat_lon)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestDepot {
    pub id: Option<Value>,
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub location_index: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestVehicle {
    pub id: Option<Value>,
    pub start: Option<Value>,
    pub end: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub start_index: Option<usize>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub end_index: Option<usize>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub start_depot_ids: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub end_depot_ids: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestJob {
    pub id: Option<Value>,
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub location_index: Option<usize>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub depot_ids: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestShipment {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub pickup: Option<RequestJob>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub delivery: Option<RequestJob>,
}

/// The ways a single request point may carry its position.
#[derive(Debug, Clone, Copy)]
pub struct PointReference<'a> {
    pub direct: Option<&'a Value>,
    pub depot_ids: &'a [Value],
    pub location_index: Option<usize>,
}

impl OptimizerRequest {
    pub fn from_document(document: &Value) -> Self {
        OptimizerRequest::deserialize(document).unwrap_or_default()
    }

    pub fn location(&self, index: usize) -> Option<Coord<f64>> {
        self.locations.as_ref().and_then(|table| table.get(index))
    }

    pub fn depot(&self, id: &Value) -> Option<&RequestDepot> {
        let key = id_key(id)?;
        self.depots
            .iter()
            .find(|depot| depot.id.as_ref().and_then(id_key).as_deref() == Some(key.as_str()))
    }

    fn depot_coordinate(&self, depot: &RequestDepot) -> Option<Coord<f64>> {
        depot
            .location
            .as_ref()
            .and_then(parse_lat_lon)
            .or_else(|| depot.location_index.and_then(|index| self.location(index)))
    }

    /// Direct coordinates first, then the first listed depot, then the
    /// location table.
    pub fn resolve(&self, reference: PointReference<'_>) -> Option<Coord<f64>> {
        reference
            .direct
            .and_then(parse_lat_lon)
            .or_else(|| {
                reference
                    .depot_ids
                    .first()
                    .and_then(|id| self.depot(id))
                    .and_then(|depot| self.depot_coordinate(depot))
            })
            .or_else(|| reference.location_index.and_then(|index| self.location(index)))
    }
}

impl RequestVehicle {
    pub fn start_reference(&self) -> PointReference<'_> {
        PointReference {
            direct: self.start.as_ref(),
            depot_ids: &self.start_depot_ids,
            location_index: self.start_index,
        }
    }

    pub fn end_reference(&self) -> PointReference<'_> {
        PointReference {
            direct: self.end.as_ref(),
            depot_ids: &self.end_depot_ids,
            location_index: self.end_index,
        }
    }
}

impl RequestJob {
    pub fn reference(&self) -> PointReference<'_> {
        PointReference {
            direct: self.location.as_ref(),
            depot_ids: &self.depot_ids,
            location_index: self.location_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_location_table_shapes() {
        let keyed = OptimizerRequest::from_document(&json!({
            "locations": {"id": 1, "location": ["50.85,4.35", [51.0, 4.0]]}
        }));
        assert_eq!(keyed.location(0), Some(Coord { x: 4.35, y: 50.85 }));
        assert_eq!(keyed.location(1), Some(Coord { x: 4.0, y: 51.0 }));
        assert_eq!(keyed.location(2), None);

        let list = OptimizerRequest::from_document(&json!({
            "locations": ["50.85,4.35"]
        }));
        assert_eq!(list.location(0), Some(Coord { x: 4.35, y: 50.85 }));
    }

    #[test]
    fn test_resolution_order() {
        let request = OptimizerRequest::from_document(&json!({
            "locations": {"location": ["1.0,1.0", "2.0,2.0"]},
            "depots": [
                {"id": "d1", "location_index": 0},
                {"id": 7, "location": [3.0, 3.0]}
            ]
        }));
        let depot_ids = vec![json!(7), json!("d1")];
        let direct = json!([5.0, 5.0]);

        let all = PointReference {
            direct: Some(&direct),
            depot_ids: &depot_ids,
            location_index: Some(1),
        };
        assert_eq!(request.resolve(all), Some(Coord { x: 5.0, y: 5.0 }));

        let via_depot = PointReference { direct: None, ..all };
        assert_eq!(request.resolve(via_depot), Some(Coord { x: 3.0, y: 3.0 }));

        let via_index = PointReference {
            direct: None,
            depot_ids: &[],
            location_index: Some(1),
        };
        assert_eq!(request.resolve(via_index), Some(Coord { x: 2.0, y: 2.0 }));

        let unknown_depot = vec![json!("missing"), json!("d1")];
        let only_first_depot = PointReference {
            direct: None,
            depot_ids: &unknown_depot,
            location_index: None,
        };
        assert_eq!(request.resolve(only_first_depot), None);
    }

    #[test]
    fn test_depot_resolves_through_location_table() {
        let request = OptimizerRequest::from_document(&json!({
            "locations": {"location": ["1.0,1.5"]},
            "depots": [{"id": "d1", "location_index": 0}]
        }));
        let depot_ids = vec![json!("d1")];

        let reference = PointReference {
            direct: None,
            depot_ids: &depot_ids,
            location_index: None,
        };

        assert_eq!(request.resolve(reference), Some(Coord { x: 1.5, y: 1.0 }));
    }
}
