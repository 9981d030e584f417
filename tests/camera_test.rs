use cgmath::{Deg, Point3, Rad};
use heightfield_scene::camera::{Camera, CameraController};
use instant::Duration;
use winit::{event::ElementState, keyboard::KeyCode};

use crate::common::test_utils::approx_eq;

mod common;

fn camera() -> Camera {
    Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0))
}

#[test]
fn should_sum_mouse_motion_within_one_frame() {
    let mut split = camera();
    let mut controller = CameraController::new(1.0, 1.0);
    controller.handle_mouse(0.25, 0.0);
    controller.handle_mouse(0.5, 0.0);
    controller.handle_mouse(0.25, 0.0);
    controller.update(&mut split, Duration::from_secs(1));

    let mut single = camera();
    let mut controller = CameraController::new(1.0, 1.0);
    controller.handle_mouse(1.0, 0.0);
    controller.update(&mut single, Duration::from_secs(1));

    assert!(approx_eq(split.yaw.0, 1.0));
    assert!(approx_eq(split.yaw.0, single.yaw.0));
}

#[test]
fn should_consume_mouse_motion_once() {
    let mut camera = camera();
    let mut controller = CameraController::new(1.0, 1.0);
    controller.handle_mouse(0.5, 0.0);
    controller.update(&mut camera, Duration::from_secs(1));
    controller.update(&mut camera, Duration::from_secs(1));

    assert!(approx_eq(camera.yaw.0, 0.5));
}

#[test]
fn should_clamp_pitch_short_of_vertical() {
    let mut camera = camera();
    let mut controller = CameraController::new(1.0, 1.0);
    controller.handle_mouse(0.0, -100.0);
    controller.update(&mut camera, Duration::from_secs(1));

    assert!(camera.pitch < Rad(std::f32::consts::FRAC_PI_2));
    assert!(camera.pitch > Rad(1.5));
}

#[test]
fn should_move_forward_along_yaw() {
    let mut camera = camera();
    let mut controller = CameraController::new(10.0, 1.0);
    assert!(controller.handle_key(KeyCode::KeyW, ElementState::Pressed));
    controller.update(&mut camera, Duration::from_secs(1));

    assert!(approx_eq(camera.position.x, 10.0));
    assert!(approx_eq(camera.position.z, 0.0));
    assert!(!controller.handle_key(KeyCode::KeyQ, ElementState::Pressed));
}
