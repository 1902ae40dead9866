//! Google encoded polyline format (precision 1e5).
//!
//! Each coordinate delta is zig-zag encoded, split into 5-bit chunks
//! (least significant first) with `0x20` as the continuation bit, offset
//! by 63 into printable ASCII. Latitude and longitude deltas alternate.

use crate::domain::GeoPoint;

const SCALE: f64 = 1e5;

/// Chunks beyond this shift cannot come from a valid coordinate delta.
const MAX_SHIFT: u32 = 30;

/// Error from decoding a malformed polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// A value was cut off mid-chunk, or a latitude had no longitude
    #[error("polyline truncated at byte {offset}")]
    Truncated { offset: usize },

    /// Byte outside the encoding alphabet (63..=126)
    #[error("invalid polyline byte {byte:#04x} at {offset}")]
    InvalidByte { byte: u8, offset: usize },

    /// Too many continuation chunks for one value
    #[error("polyline value too long at byte {offset}")]
    Overflow { offset: usize },
}

/// Decodes an encoded polyline into points.
///
/// # Examples
///
/// ```
/// use refuel_server::domain::GeoPoint;
/// use refuel_server::geometry::decode_polyline;
///
/// // Example from the format documentation
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(
///     points,
///     vec![
///         GeoPoint::new(38.5, -120.2),
///         GeoPoint::new(40.7, -120.95),
///         GeoPoint::new(43.252, -126.453),
///     ]
/// );
/// ```
pub fn decode_polyline(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat += read_value(bytes, &mut index)?;
        lng += read_value(bytes, &mut index)?;
        points.push(GeoPoint::new(lat as f64 / SCALE, lng as f64 / SCALE));
    }

    Ok(points)
}

fn read_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let offset = *index;
        let byte = *bytes.get(offset).ok_or(PolylineError::Truncated { offset })?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte { byte, offset });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { offset });
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Encodes points as a polyline, rounding to 1e-5 degrees.
pub fn encode_polyline(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat * SCALE).round() as i64;
        let lng = (point.lng * SCALE).round() as i64;
        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn write_value(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}
