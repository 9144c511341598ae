use geo_types::Coord;
use serde_json::Value;

use crate::validation::is_in_range;

/// Reads an optimizer location, either a `[lat, lon]` array or a `"lat,lon"`
/// string, into a `(lon, lat)` coordinate without checking its range.
pub(crate) fn read_lat_lon(value: &Value) -> Option<Coord<f64>> {
    let (lat, lon) = match value {
        Value::Array(items) if items.len() == 2 => (items[0].as_f64()?, items[1].as_f64()?),
        Value::String(text) => {
            let (lat, lon) = text.split_once(',')?;
            (lat.trim().parse().ok()?, lon.trim().parse().ok()?)
        }
        _ => return None,
    };

    Some(Coord { x: lon, y: lat })
}

/// Like [`read_lat_lon`], but values that are not a valid geographic position
/// are treated as missing.
pub(crate) fn parse_lat_lon(value: &Value) -> Option<Coord<f64>> {
    read_lat_lon(value).filter(is_in_range)
}

/// Identifiers show up as strings or numbers depending on the backend.
pub(crate) fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
