//! Converts the recorded floor polygon into the vertical-wall vertex list
//! SteamVR's chaperone_info format stores under `collision_bounds`.

use std::fmt::Write;

use crate::types::{BoundaryPoint, WallSegment};

/// Default play-space ceiling height in meters, per the chaperone_info
/// format (https://developer.valvesoftware.com/wiki/SteamVR/chaperone_info.vrchap).
pub const CHAPERONE_HEIGHT: f32 = 2.43;

/// A boundary polygon needs at least this many corners.
pub const MIN_BOUNDARY_POINTS: usize = 3;

/// Build one wall segment per consecutive point pair.
///
/// Each segment stands on the current point's x, spans the previous and
/// current z, and rises from the floor to [`CHAPERONE_HEIGHT`], with the
/// vertex order fixed as (floor/prev.z, ceiling/prev.z, floor/curr.z,
/// ceiling/curr.z). The first point only ever serves as a "previous"
/// point, and no closing segment joins the last point back to the first:
/// the polygon stays open, as the chaperone_info emitter this mirrors
/// leaves it.
///
/// Callers enforce the [`MIN_BOUNDARY_POINTS`] minimum; shorter inputs
/// just produce fewer (or zero) segments.
pub fn collision_bounds(points: &[BoundaryPoint]) -> Vec<WallSegment> {
    points
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            WallSegment {
                vertices: [
                    [curr.x, 0.0, prev.z],
                    [curr.x, CHAPERONE_HEIGHT, prev.z],
                    [curr.x, 0.0, curr.z],
                    [curr.x, CHAPERONE_HEIGHT, curr.z],
                ],
            }
        })
        .collect()
}

/// Render segments as the textual `collision_bounds` fragment, ready for
/// an external writer to splice into a chaperone_info document. Nothing
/// here touches the filesystem.
pub fn render_collision_bounds(walls: &[WallSegment]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\"collision_bounds\": [");
    for (i, wall) in walls.iter().enumerate() {
        let _ = writeln!(out, "    [");
        for (j, v) in wall.vertices.iter().enumerate() {
            let comma = if j + 1 < wall.vertices.len() { "," } else { "" };
            let _ = writeln!(out, "        [ {}, {}, {} ]{}", v[0], v[1], v[2], comma);
        }
        let comma = if i + 1 < walls.len() { "," } else { "" };
        let _ = writeln!(out, "    ]{}", comma);
    }
    let _ = writeln!(out, "]");
    out
}
