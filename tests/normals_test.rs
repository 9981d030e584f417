use heightfield_scene::data_structures::normals::synthesize;

use crate::common::test_utils::approx_vec;

mod common;

#[test]
fn should_follow_counter_clockwise_winding() {
    let positions = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
    let normals = synthesize(&positions, &[0, 1, 2]);

    assert!(normals.iter().all(|n| approx_vec(*n, [0.0, 1.0, 0.0])));

    let flipped = synthesize(&positions, &[0, 2, 1]);
    assert!(flipped.iter().all(|n| approx_vec(*n, [0.0, -1.0, 0.0])));
}

#[test]
fn should_average_shared_vertices() {
    // A floor triangle and a wall triangle sharing the edge 0-1.
    let positions = [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    let normals = synthesize(&positions, &[0, 1, 2, 1, 0, 3]);
    let diagonal = 1.0 / 2f32.sqrt();

    assert!(approx_vec(normals[0], [diagonal, diagonal, 0.0]));
    assert!(approx_vec(normals[1], [diagonal, diagonal, 0.0]));
    assert!(approx_vec(normals[2], [0.0, 1.0, 0.0]));
    assert!(approx_vec(normals[3], [1.0, 0.0, 0.0]));
}

#[test]
fn should_weight_by_face_area() {
    // Both triangles share vertex 0; the +y one is four times larger than the -x one.
    let positions = [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 2.0],
        [2.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, -1.0],
    ];
    let normals = synthesize(&positions, &[0, 1, 2, 0, 3, 4]);
    let length = 17f32.sqrt();

    assert!(approx_vec(normals[0], [-1.0 / length, 4.0 / length, 0.0]));
}

#[test]
fn should_leave_unreferenced_vertices_zero() {
    let positions = [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [5.0, 5.0, 5.0],
    ];
    let normals = synthesize(&positions, &[0, 1, 2]);

    assert_eq!(normals.len(), 4);
    assert_eq!(normals[3], [0.0, 0.0, 0.0]);
}

#[test]
fn should_zero_degenerate_triangles() {
    let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
    let normals = synthesize(&positions, &[0, 1, 2]);

    assert!(normals.iter().all(|n| *n == [0.0, 0.0, 0.0]));
}

#[test]
fn should_skip_out_of_range_and_partial_triangles() {
    let positions = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
    let normals = synthesize(&positions, &[0, 1, 7, 0, 1, 2, 0]);

    assert_eq!(normals.len(), 3);
    assert!(normals.iter().all(|n| approx_vec(*n, [0.0, 1.0, 0.0])));
}
