//! Per-vertex normals from a triangle list.
//!
//! Each triangle adds its un-normalised face cross product to all three of
//! its vertices, so larger faces pull harder. Accumulators are normalised at
//! the end; a vertex no triangle touches keeps the zero vector.

use cgmath::{InnerSpace, Vector3, Zero};

pub fn synthesize(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vector3::<f32>::zero(); positions.len()];

    for c in indices.chunks_exact(3) {
        let (i0, i1, i2) = (c[0] as usize, c[1] as usize, c[2] as usize);
        let (Some(p0), Some(p1), Some(p2)) = (positions.get(i0), positions.get(i1), positions.get(i2))
        else {
            log::warn!("Skipping triangle {:?}: index out of range", c);
            continue;
        };
        let pos0: Vector3<_> = (*p0).into();
        let pos1: Vector3<_> = (*p1).into();
        let pos2: Vector3<_> = (*p2).into();

        let face = (pos1 - pos0).cross(pos2 - pos0);
        accumulated[i0] += face;
        accumulated[i1] += face;
        accumulated[i2] += face;
    }

    accumulated
        .into_iter()
        .map(|n| {
            if n.magnitude2() > 0.0 {
                n.normalize().into()
            } else {
                [0.0; 3]
            }
        })
        .collect()
}
