use geo_types::Coord;

/// Only the head of a sequence is inspected. A polyline decoded at the wrong
/// precision goes out of range from its first points on.
const SAMPLE_SIZE: usize = 10;

pub fn is_in_range(coordinate: &Coord<f64>) -> bool {
    coordinate.x.is_finite()
        && coordinate.y.is_finite()
        && (-180.0..=180.0).contains(&coordinate.x)
        && (-90.0..=90.0).contains(&coordinate.y)
}

/// Whether a coordinate sequence can be trusted as line geometry.
pub fn is_valid_coords(coordinates: &[Coord<f64>]) -> bool {
    coordinates.len() >= 2 && coordinates.iter().take(SAMPLE_SIZE).all(is_in_range)
}
