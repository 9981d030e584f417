//! The hand-authored colour cube.
//!
//! 24 vertices (four per face, so each face carries its own colour) and 12
//! triangles. Every face is wound counter-clockwise when seen from outside.

use crate::data_structures::model::ColourVertex;

pub const HALF_EXTENT: f32 = 10.0;

const H: f32 = HALF_EXTENT;

#[rustfmt::skip]
pub const CORNERS: [[f32; 3]; 24] = [
    // front (+z)
    [-H, -H,  H], [ H, -H,  H], [-H,  H,  H], [ H,  H,  H],
    // back (-z)
    [-H, -H, -H], [ H, -H, -H], [-H,  H, -H], [ H,  H, -H],
    // left (-x)
    [-H, -H,  H], [-H,  H,  H], [-H, -H, -H], [-H,  H, -H],
    // right (+x)
    [ H, -H,  H], [ H,  H,  H], [ H, -H, -H], [ H,  H, -H],
    // top (+y)
    [-H,  H,  H], [ H,  H,  H], [-H,  H, -H], [ H,  H, -H],
    // bottom (-y)
    [-H, -H,  H], [ H, -H,  H], [-H, -H, -H], [ H, -H, -H],
];

/// One colour per face, in the same face order as [`CORNERS`].
pub const FACE_COLOURS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.5, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0],
];

#[rustfmt::skip]
pub const INDICES: [u32; 36] = [
    0, 1, 2,    1, 3, 2,     // front
    6, 5, 4,    7, 5, 6,     // back
    8, 9, 10,   9, 11, 10,   // left
    12, 14, 13, 13, 14, 15,  // right
    17, 18, 16, 19, 18, 17,  // top
    22, 21, 20, 23, 21, 22,  // bottom
];

pub fn vertices() -> Vec<ColourVertex> {
    CORNERS
        .iter()
        .enumerate()
        .map(|(i, position)| ColourVertex {
            position: *position,
            colour: FACE_COLOURS[i / 4],
        })
        .collect()
}
