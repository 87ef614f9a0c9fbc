//! Loading recorded traces from GPX 1.1 files.
//!
//! Rider apps and support tooling export finished deliveries as GPX.
//! Track points become [`Fix`]es with their `<time>` carried as RFC 3339
//! text; routes, waypoints and elevations are ignored.

use std::io::Read;

use serde_json::Value;

use crate::error::Result;
use crate::fix::Fix;

/// Read every track point of every track, in document order.
///
/// Multiple tracks and segments are flattened into one trace.
pub fn read_fixes<R: Read>(reader: R) -> Result<Vec<Fix>> {
    let gpx = gpx::read(reader)?;

    gpx.tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .flat_map(|seg| seg.points.iter())
        .map(|wp| {
            let recorded_at = wp
                .time
                .as_ref()
                .map(|t| t.format().map(Value::String))
                .transpose()?;

            Ok(Fix {
                latitude: wp.point().y(),
                longitude: wp.point().x(),
                recorded_at,
            })
        })
        .collect()
}

/// Read fixes from a byte slice. Convenience wrapper for JNI.
pub fn read_fixes_bytes(data: &[u8]) -> Result<Vec<Fix>> {
    read_fixes(data)
}
