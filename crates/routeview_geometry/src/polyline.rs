//! Encoded polyline codec (Google / OSRM / NextBillion flavour).
//!
//! Coordinates are `geo_types::Coord` with `x = longitude` and `y = latitude`,
//! while the wire format stores latitude first.

use geo_types::Coord;

const CHAR_OFFSET: i32 = 63;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION_BIT: u64 = 0x20;

fn precision_factor(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

/// Reads one variable-length group from the input.
///
/// Returns `None` when the input runs out before a terminal chunk, so a
/// truncated trailing value is dropped instead of being half-applied.
fn next_delta(bytes: &mut impl Iterator<Item = u8>) -> Option<i64> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let chunk = i32::from(bytes.next()?) - CHAR_OFFSET;
        let bits = (chunk as u64) & CHUNK_MASK;

        if shift < u64::BITS {
            result |= bits << shift;
        }
        shift += CHUNK_BITS;

        // characters below the offset can only end a group
        if chunk < 0 || (chunk as u64) & CONTINUATION_BIT == 0 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Some(if result & 1 == 1 { !value } else { value })
}

/// Decodes `encoded` at the given precision (number of decimal digits).
///
/// Never fails: malformed or truncated input yields the points that could be
/// read before the input ran out.
pub fn decode(encoded: &str, precision: u32) -> Vec<Coord<f64>> {
    let factor = precision_factor(precision);
    let mut bytes = encoded.bytes();
    let mut coordinates = Vec::new();

    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while let Some(delta_lat) = next_delta(&mut bytes) {
        let Some(delta_lon) = next_delta(&mut bytes) else {
            break;
        };

        lat = lat.wrapping_add(delta_lat);
        lon = lon.wrapping_add(delta_lon);

        coordinates.push(Coord {
            x: lon as f64 / factor,
            y: lat as f64 / factor,
        });
    }

    coordinates
}

fn push_value(delta: i64, output: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= CONTINUATION_BIT {
        let chunk = (CONTINUATION_BIT | (value & CHUNK_MASK)) as i32 + CHAR_OFFSET;
        output.push(char::from(chunk as u8));
        value >>= CHUNK_BITS;
    }

    output.push(char::from((value as i32 + CHAR_OFFSET) as u8));
}

/// Encodes coordinates at the given precision, rounding each value.
pub fn encode(coordinates: &[Coord<f64>], precision: u32) -> String {
    let factor = precision_factor(precision);
    let mut output = String::new();

    let mut previous_lat: i64 = 0;
    let mut previous_lon: i64 = 0;

    for coordinate in coordinates {
        let lat = (coordinate.y * factor).round() as i64;
        let lon = (coordinate.x * factor).round() as i64;

        push_value(lat - previous_lat, &mut output);
        push_value(lon - previous_lon, &mut output);

        previous_lat = lat;
        previous_lon = lon;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE_SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn assert_close(actual: &[Coord<f64>], expected: &[(f64, f64)], tolerance: f64) {
        assert_eq!(actual.len(), expected.len());
        for (coord, &(lon, lat)) in actual.iter().zip(expected) {
            assert!((coord.x - lon).abs() < tolerance, "{} != {}", coord.x, lon);
            assert!((coord.y - lat).abs() < tolerance, "{} != {}", coord.y, lat);
        }
    }

    #[test]
    fn test_decode_reference_polyline() {
        let coordinates = decode(GOOGLE_SAMPLE, 5);

        assert_close(
            &coordinates,
            &[(-120.2, 38.5), (-120.95, 40.7), (-126.453, 43.252)],
            1e-9,
        );
    }

    #[test]
    fn test_decode_precision_scales_values() {
        let coordinates = decode(GOOGLE_SAMPLE, 6);

        assert_close(
            &coordinates,
            &[(-12.02, 3.85), (-12.095, 4.07), (-12.6453, 4.3252)],
            1e-9,
        );
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("", 5).is_empty());
    }

    #[test]
    fn test_decode_truncated_input_drops_partial_point() {
        // cut inside the longitude group of the last point
        let truncated = &GOOGLE_SAMPLE[..GOOGLE_SAMPLE.len() - 2];
        let coordinates = decode(truncated, 5);

        assert_close(&coordinates, &[(-120.2, 38.5), (-120.95, 40.7)], 1e-9);
    }

    #[test]
    fn test_decode_never_panics_on_garbage() {
        assert!(decode("\u{1}\u{2}", 5).len() <= 1);
        let long_group = "~".repeat(40);
        assert!(decode(&long_group, 5).is_empty());
        let _ = decode("héllo wörld", 6);
    }

    #[test]
    fn test_decode_is_deterministic() {
        assert_eq!(decode(GOOGLE_SAMPLE, 5), decode(GOOGLE_SAMPLE, 5));
    }

    #[test]
    fn test_encode_reference_polyline() {
        let coordinates = vec![
            Coord { x: -120.2, y: 38.5 },
            Coord { x: -120.95, y: 40.7 },
            Coord { x: -126.453, y: 43.252 },
        ];

        assert_eq!(encode(&coordinates, 5), GOOGLE_SAMPLE);
    }

    #[test]
    fn test_round_trip_small_deltas() {
        for precision in [5, 6] {
            let step = 1.0 / precision_factor(precision);
            let mut lon = 4.35;
            let mut lat = 50.85;
            let mut coordinates = Vec::new();
            for i in 0..50i32 {
                lon += f64::from(i % 7 - 3) * 13.0 * step;
                lat += f64::from(i % 5 - 2) * 29.0 * step;
                coordinates.push(Coord { x: lon, y: lat });
            }

            let decoded = decode(&encode(&coordinates, precision), precision);

            assert_eq!(decoded.len(), coordinates.len());
            for (a, b) in decoded.iter().zip(&coordinates) {
                assert!((a.x - b.x).abs() <= step);
                assert!((a.y - b.y).abs() <= step);
            }
        }
    }
}
