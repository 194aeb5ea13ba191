use approx::assert_relative_eq;
use phys_bridge::bridge::{HostArray, NULL_HANDLE};
use phys_bridge::error::PhysicsError;
use phys_bridge::{Bridge, BridgeConfig, RawHandle};
use rand::Rng;
use std::f32::consts::PI;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn create_body(bridge: &mut Bridge, world: RawHandle, body_type: i32) -> RawHandle {
    bridge
        .world_create_body(
            world, body_type, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, true, true, false, false, true, 1.0,
        )
        .unwrap()
}

fn dynamic_body(bridge: &mut Bridge) -> (RawHandle, RawHandle) {
    let world = bridge.world_new(0.0, -10.0, true);
    let body = create_body(bridge, world, 2);
    (world, body)
}

/// Host array that counts pin and unpin calls
struct PinnedArray {
    data: Vec<f32>,
    locks: usize,
    unlocks: usize,
}

impl PinnedArray {
    fn new(data: Vec<f32>) -> Self {
        Self { data, locks: 0, unlocks: 0 }
    }
}

impl HostArray<f32> for PinnedArray {
    fn lock(&mut self) {
        self.locks += 1;
    }

    fn unlock(&mut self) {
        self.unlocks += 1;
    }

    fn as_slice(&self) -> &[f32] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[test]
fn test_world_properties() {
    init_logger();
    let mut bridge = Bridge::new();
    let world = bridge.world_new(1.5, -9.8, false);

    let mut gravity = [0.0f32; 2];
    bridge.world_get_gravity(world, &mut gravity).unwrap();
    assert_eq!(gravity, [1.5, -9.8]);

    bridge.world_set_gravity(world, 0.0, -20.0).unwrap();
    bridge.world_get_gravity(world, &mut gravity).unwrap();
    assert_eq!(gravity, [0.0, -20.0]);

    assert!(!bridge.world_get_allow_sleep(world).unwrap());
    bridge.world_set_allow_sleep(world, true).unwrap();
    assert!(bridge.world_get_allow_sleep(world).unwrap());

    assert!(bridge.world_get_auto_clear_forces(world).unwrap());
    bridge.world_set_auto_clear_forces(world, false).unwrap();
    assert!(!bridge.world_get_auto_clear_forces(world).unwrap());

    assert_eq!(bridge.world_get_body_count(world).unwrap(), 0);
    let a = create_body(&mut bridge, world, 0);
    let b = create_body(&mut bridge, world, 2);
    assert_eq!(bridge.world_get_body_count(world).unwrap(), 2);

    bridge.world_destroy_body(world, a).unwrap();
    assert_eq!(bridge.world_get_body_count(world).unwrap(), 1);
    assert_eq!(bridge.body_get_type(b).unwrap(), 2);
}

#[test]
fn test_create_body_reads_back_definition() {
    let mut bridge = Bridge::new();
    let world = bridge.world_new(0.0, -10.0, true);
    let body = bridge
        .world_create_body(world, 1, 3.0, 4.0, 0.25, 1.0, -1.0, 0.5, 0.1, 0.2, false, true, true, true, false, 0.5)
        .unwrap();

    let mut position = [0.0f32; 2];
    bridge.body_get_position(body, &mut position).unwrap();
    assert_eq!(position, [3.0, 4.0]);
    assert_relative_eq!(bridge.body_get_angle(body).unwrap(), 0.25);

    let mut velocity = [0.0f32; 2];
    bridge.body_get_linear_velocity(body, &mut velocity).unwrap();
    assert_eq!(velocity, [1.0, -1.0]);
    assert_eq!(bridge.body_get_angular_velocity(body).unwrap(), 0.5);

    assert_eq!(bridge.body_get_linear_damping(body).unwrap(), 0.1);
    assert_eq!(bridge.body_get_angular_damping(body).unwrap(), 0.2);
    assert_eq!(bridge.body_get_gravity_scale(body).unwrap(), 0.5);
    assert_eq!(bridge.body_get_type(body).unwrap(), 1);

    assert!(!bridge.body_is_sleeping_allowed(body).unwrap());
    assert!(bridge.body_is_awake(body).unwrap());
    assert!(bridge.body_is_fixed_rotation(body).unwrap());
    assert!(bridge.body_is_bullet(body).unwrap());
    assert!(!bridge.body_is_active(body).unwrap());

    // kinematic bodies carry no mass
    assert_eq!(bridge.body_get_mass(body).unwrap(), 0.0);
}

#[test]
fn test_transform_round_trip() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let x = rng.gen_range(-100.0..100.0);
        let y = rng.gen_range(-100.0..100.0);
        let angle = rng.gen_range(-PI..PI);
        bridge.body_set_transform(body, x, y, angle).unwrap();

        let mut transform = [0.0f32; 4];
        bridge.body_get_transform(body, &mut transform).unwrap();
        assert_eq!(transform[0], x);
        assert_eq!(transform[1], y);
        assert_relative_eq!(transform[2], angle.cos(), epsilon = 1e-6);
        assert_relative_eq!(transform[3], angle.sin(), epsilon = 1e-6);
        assert_eq!(bridge.body_get_angle(body).unwrap(), angle);
    }
}

#[test]
fn test_point_and_vector_conversion() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    bridge.body_set_transform(body, 1.0, 2.0, PI / 2.0).unwrap();

    let mut out = [0.0f32; 2];
    bridge.body_get_world_point(body, 1.0, 0.0, &mut out).unwrap();
    assert_relative_eq!(out[0], 1.0, epsilon = 1e-6);
    assert_relative_eq!(out[1], 3.0, epsilon = 1e-6);

    bridge.body_get_world_vector(body, 1.0, 0.0, &mut out).unwrap();
    assert_relative_eq!(out[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(out[1], 1.0, epsilon = 1e-6);

    bridge.body_get_local_point(body, 1.0, 3.0, &mut out).unwrap();
    assert_relative_eq!(out[0], 1.0, epsilon = 1e-6);
    assert_relative_eq!(out[1], 0.0, epsilon = 1e-6);

    bridge.body_get_local_vector(body, 0.0, 1.0, &mut out).unwrap();
    assert_relative_eq!(out[0], 1.0, epsilon = 1e-6);
    assert_relative_eq!(out[1], 0.0, epsilon = 1e-6);

    let mut center = [9.0f32; 2];
    bridge.body_get_world_center(body, &mut center).unwrap();
    assert_eq!(center, [1.0, 2.0]);
    bridge.body_get_local_center(body, &mut center).unwrap();
    assert_eq!(center, [0.0, 0.0]);
}

#[test]
fn test_velocity_of_points() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    bridge.body_set_linear_velocity(body, 1.0, 0.0).unwrap();
    bridge.body_set_angular_velocity(body, 2.0).unwrap();

    // w x r adds (-w * r.y, w * r.x)
    let mut out = [0.0f32; 2];
    bridge.body_get_linear_velocity_from_world_point(body, 0.0, 1.0, &mut out).unwrap();
    assert_relative_eq!(out[0], -1.0);
    assert_relative_eq!(out[1], 0.0);

    bridge.body_get_linear_velocity_from_local_point(body, 1.0, 0.0, &mut out).unwrap();
    assert_relative_eq!(out[0], 1.0);
    assert_relative_eq!(out[1], 2.0);
}

#[test]
fn test_static_body_ignores_velocity() {
    let mut bridge = Bridge::new();
    let world = bridge.world_new(0.0, -10.0, true);
    let body = create_body(&mut bridge, world, 0);

    bridge.body_set_linear_velocity(body, 5.0, 5.0).unwrap();
    bridge.body_set_angular_velocity(body, 1.0).unwrap();

    let mut velocity = [1.0f32; 2];
    bridge.body_get_linear_velocity(body, &mut velocity).unwrap();
    assert_eq!(velocity, [0.0, 0.0]);
    assert_eq!(bridge.body_get_angular_velocity(body).unwrap(), 0.0);
}

#[test]
fn test_forces_and_impulses() {
    let mut bridge = Bridge::new();
    let (world, body) = dynamic_body(&mut bridge);
    let shape = bridge.polygon_shape_new();
    bridge.polygon_shape_set_as_box(shape, 1.0, 1.0).unwrap();
    bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();
    let mass = bridge.body_get_mass(body).unwrap();
    assert_relative_eq!(mass, 4.0, epsilon = 1e-5);

    bridge.body_apply_force(body, 0.0, 10.0, 1.0, 0.0, true).unwrap();
    bridge.body_apply_force_to_center(body, 1.0, 0.0, true).unwrap();
    bridge.body_apply_torque(body, 0.5, true).unwrap();
    let forces = bridge.context().body(phys_bridge::bridge::decode("body", body).unwrap()).unwrap();
    assert_eq!(forces.force(), phys_bridge::Vector2::new(1.0, 10.0));
    assert_relative_eq!(forces.torque(), 10.5);

    bridge.world_clear_forces(world).unwrap();
    let cleared = bridge.context().body(phys_bridge::bridge::decode("body", body).unwrap()).unwrap();
    assert!(cleared.force().is_zero());
    assert_eq!(cleared.torque(), 0.0);

    bridge.body_apply_linear_impulse(body, 4.0, 0.0, 0.0, 0.0, true).unwrap();
    let mut velocity = [0.0f32; 2];
    bridge.body_get_linear_velocity(body, &mut velocity).unwrap();
    assert_relative_eq!(velocity[0], 1.0, epsilon = 1e-5);

    let inertia = bridge.body_get_inertia(body).unwrap();
    bridge.body_apply_angular_impulse(body, inertia, true).unwrap();
    assert_relative_eq!(bridge.body_get_angular_velocity(body).unwrap(), 1.0, epsilon = 1e-5);

    // a sleeping body ignores forces unless asked to wake
    bridge.body_set_awake(body, false).unwrap();
    bridge.body_apply_force_to_center(body, 1.0, 1.0, false).unwrap();
    assert!(!bridge.body_is_awake(body).unwrap());
    bridge.body_apply_force_to_center(body, 1.0, 1.0, true).unwrap();
    assert!(bridge.body_is_awake(body).unwrap());
}

#[test]
fn test_polygon_vertices_keep_caller_order() {
    let mut bridge = Bridge::new();
    let shape = bridge.polygon_shape_new();
    let mut verts: Vec<f32> = vec![1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0];
    bridge.polygon_shape_set(shape, &mut verts, 0, 8).unwrap();

    assert_eq!(bridge.polygon_shape_get_vertex_count(shape).unwrap(), 4);
    for i in 0..4 {
        let mut out = [0.0f32; 2];
        bridge.polygon_shape_get_vertex(shape, i, &mut out).unwrap();
        assert_eq!(out[0], verts[2 * i as usize]);
        assert_eq!(out[1], verts[2 * i as usize + 1]);
    }

    let mut out = [0.0f32; 2];
    assert!(matches!(
        bridge.polygon_shape_get_vertex(shape, 4, &mut out),
        Err(PhysicsError::InvalidParameter(_))
    ));
    assert!(matches!(
        bridge.polygon_shape_get_vertex(shape, -1, &mut out),
        Err(PhysicsError::InvalidParameter(_))
    ));
}

#[test]
fn test_vertex_offset_and_length_are_honored() {
    let mut bridge = Bridge::new();
    let shape = bridge.polygon_shape_new();
    let mut verts: Vec<f32> = vec![
        99.0, 99.0, 99.0, 99.0, // skipped
        0.0, 0.0, 2.0, 0.0, 0.0, 2.0, // triangle
        99.0, 99.0,
    ];
    bridge.polygon_shape_set(shape, &mut verts, 4, 6).unwrap();

    assert_eq!(bridge.polygon_shape_get_vertex_count(shape).unwrap(), 3);
    let mut out = [0.0f32; 2];
    bridge.polygon_shape_get_vertex(shape, 2, &mut out).unwrap();
    assert_eq!(out, [0.0, 2.0]);

    // an odd length drops the trailing coordinate
    bridge.polygon_shape_set(shape, &mut verts, 4, 7).unwrap();
    assert_eq!(bridge.polygon_shape_get_vertex_count(shape).unwrap(), 3);

    let result = bridge.polygon_shape_set(shape, &mut verts, 8, 6);
    assert_eq!(
        result,
        Err(PhysicsError::BufferOutOfRange { offset: 8, len: 6, capacity: 12 })
    );
}

#[test]
fn test_array_locks_are_released() {
    let mut bridge = Bridge::new();
    let shape = bridge.polygon_shape_new();

    let mut verts = PinnedArray::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    bridge.polygon_shape_set(shape, &mut verts, 0, 6).unwrap();
    assert_eq!((verts.locks, verts.unlocks), (1, 1));

    assert!(bridge.polygon_shape_set(shape, &mut verts, 2, 6).is_err());
    assert_eq!((verts.locks, verts.unlocks), (2, 2));

    // the engine rejects a clockwise triangle after the array was read
    let mut clockwise = PinnedArray::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    assert!(bridge.polygon_shape_set(shape, &mut clockwise, 0, 6).is_err());
    assert_eq!((clockwise.locks, clockwise.unlocks), (1, 1));

    let mut out = PinnedArray::new(vec![0.0; 1]);
    assert!(matches!(
        bridge.polygon_shape_get_vertex(shape, 0, &mut out),
        Err(PhysicsError::BufferTooSmall { required: 2, actual: 1 })
    ));
    assert_eq!((out.locks, out.unlocks), (1, 1));
    assert_eq!(out.data, vec![0.0]);
}

#[test]
fn test_mass_data_round_trip() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);

    bridge.body_set_mass_data(body, 2.0, 0.5, -0.25, 3.0).unwrap();
    let mut data = [0.0f32; 4];
    bridge.body_get_mass_data(body, &mut data).unwrap();

    assert_relative_eq!(data[0], 2.0);
    assert_relative_eq!(data[1], 0.5);
    assert_relative_eq!(data[2], -0.25);
    assert_relative_eq!(data[3], 3.0, epsilon = 1e-5);
    assert_relative_eq!(bridge.body_get_mass(body).unwrap(), 2.0);
    assert_relative_eq!(bridge.body_get_inertia(body).unwrap(), 3.0, epsilon = 1e-5);

    // non-positive mass falls back to one
    bridge.body_set_mass_data(body, 0.0, 0.0, 0.0, 0.0).unwrap();
    assert_eq!(bridge.body_get_mass(body).unwrap(), 1.0);

    let mut short = [0.0f32; 3];
    assert!(matches!(
        bridge.body_get_mass_data(body, &mut short),
        Err(PhysicsError::BufferTooSmall { required: 4, actual: 3 })
    ));
}

#[test]
fn test_mass_reset_matches_analytic_values() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);

    let (hx, hy, box_density) = (1.0f32, 0.5f32, 2.0f32);
    let rect = bridge.polygon_shape_new();
    bridge.polygon_shape_set_as_box(rect, hx, hy).unwrap();
    bridge.body_create_fixture_with_density(body, rect, box_density).unwrap();

    let box_mass = box_density * 4.0 * hx * hy;
    let box_inertia = box_mass * (hx * hx + hy * hy) / 3.0;
    assert_relative_eq!(bridge.body_get_mass(body).unwrap(), box_mass, epsilon = 1e-5);
    assert_relative_eq!(bridge.body_get_inertia(body).unwrap(), box_inertia, epsilon = 1e-5);

    let (radius, cx) = (0.5f32, 2.0f32);
    let circle = bridge.circle_shape_new();
    bridge.shape_set_radius(circle, radius).unwrap();
    bridge.circle_shape_set_position(circle, cx, 0.0).unwrap();
    let disk = bridge.body_create_fixture_with_density(body, circle, 1.0).unwrap();

    let disk_mass = PI * radius * radius;
    let disk_inertia = disk_mass * (0.5 * radius * radius + cx * cx);
    let total = box_mass + disk_mass;

    let mut data = [0.0f32; 4];
    bridge.body_get_mass_data(body, &mut data).unwrap();
    assert_relative_eq!(data[0], total, epsilon = 1e-5);
    assert_relative_eq!(data[1], disk_mass * cx / total, epsilon = 1e-5);
    assert_relative_eq!(data[2], 0.0, epsilon = 1e-6);
    assert_relative_eq!(data[3], box_inertia + disk_inertia, epsilon = 1e-4);

    // removing the disk restores the box alone
    bridge.body_destroy_fixture(body, disk).unwrap();
    assert_relative_eq!(bridge.body_get_mass(body).unwrap(), box_mass, epsilon = 1e-5);
    let mut center = [1.0f32; 2];
    bridge.body_get_local_center(body, &mut center).unwrap();
    assert_relative_eq!(center[0], 0.0, epsilon = 1e-6);

    bridge.body_set_mass_data(body, 10.0, 0.0, 0.0, 1.0).unwrap();
    bridge.body_reset_mass_data(body).unwrap();
    assert_relative_eq!(bridge.body_get_mass(body).unwrap(), box_mass, epsilon = 1e-5);
}

#[test]
fn test_unknown_body_type_defaults_to_static() {
    init_logger();
    let mut bridge = Bridge::new();
    let world = bridge.world_new(0.0, -10.0, true);

    let body = create_body(&mut bridge, world, 7);
    assert_eq!(bridge.body_get_type(body).unwrap(), 0);

    bridge.body_set_type(body, 2).unwrap();
    assert_eq!(bridge.body_get_type(body).unwrap(), 2);
    assert_eq!(bridge.body_get_mass(body).unwrap(), 1.0);

    bridge.body_set_type(body, -4).unwrap();
    assert_eq!(bridge.body_get_type(body).unwrap(), 0);
    assert_eq!(bridge.body_get_mass(body).unwrap(), 0.0);
}

#[test]
fn test_strict_mode_rejects_unknown_body_type() {
    let mut bridge = Bridge::with_config(BridgeConfig {
        strict_body_type: true,
        ..BridgeConfig::default()
    });
    let world = bridge.world_new(0.0, -10.0, true);

    let result = bridge.world_create_body(
        world, 7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, true, true, false, false, true, 1.0,
    );
    assert_eq!(result, Err(PhysicsError::InvalidBodyType(7)));
    assert_eq!(bridge.world_get_body_count(world).unwrap(), 0);

    let body = create_body(&mut bridge, world, 1);
    assert_eq!(bridge.body_set_type(body, 3), Err(PhysicsError::InvalidBodyType(3)));
    assert_eq!(bridge.body_get_type(body).unwrap(), 1);
}

#[test]
fn test_filter_bits_round_trip() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    let shape = bridge.circle_shape_new();
    bridge.shape_set_radius(shape, 1.0).unwrap();

    let fixture = bridge
        .body_create_fixture(body, shape, 0.3, 0.1, 1.0, false, i16::MIN, -1, -3)
        .unwrap();

    let mut filter = [0i16; 3];
    bridge.fixture_get_filter_data(fixture, &mut filter).unwrap();
    assert_eq!(filter, [i16::MIN, -1, -3]);

    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let raw: [i16; 3] = [rng.gen(), rng.gen(), rng.gen()];
        bridge.fixture_set_filter_data(fixture, raw[0], raw[1], raw[2]).unwrap();
        bridge.fixture_get_filter_data(fixture, &mut filter).unwrap();
        assert_eq!(filter, raw);
    }
}

#[test]
fn test_fixture_properties() {
    let mut bridge = Bridge::new();
    let (world, body) = dynamic_body(&mut bridge);
    let shape = bridge.polygon_shape_new();
    bridge.polygon_shape_set_as_box(shape, 0.5, 0.5).unwrap();
    let fixture = bridge
        .body_create_fixture(body, shape, 0.4, 0.6, 3.0, true, 1, -1, 0)
        .unwrap();

    assert_eq!(bridge.fixture_get_type(fixture).unwrap(), 2);
    assert_eq!(bridge.fixture_get_friction(fixture).unwrap(), 0.4);
    assert_eq!(bridge.fixture_get_restitution(fixture).unwrap(), 0.6);
    assert_eq!(bridge.fixture_get_density(fixture).unwrap(), 3.0);
    assert!(bridge.fixture_is_sensor(fixture).unwrap());

    bridge.fixture_set_friction(fixture, 0.9).unwrap();
    bridge.fixture_set_restitution(fixture, 0.0).unwrap();
    bridge.fixture_set_density(fixture, 1.0).unwrap();
    assert_eq!(bridge.fixture_get_friction(fixture).unwrap(), 0.9);
    assert_eq!(bridge.fixture_get_restitution(fixture).unwrap(), 0.0);
    assert_eq!(bridge.fixture_get_density(fixture).unwrap(), 1.0);

    // flipping the sensor flag wakes the body
    bridge.body_set_awake(body, false).unwrap();
    bridge.fixture_set_sensor(fixture, false).unwrap();
    assert!(!bridge.fixture_is_sensor(fixture).unwrap());
    assert!(bridge.body_is_awake(body).unwrap());

    bridge.fixture_refilter(fixture).unwrap();
    let world_key = phys_bridge::bridge::decode("world", world).unwrap();
    assert_eq!(bridge.context().world(world_key).unwrap().pending_refilter().len(), 1);

    bridge.body_set_transform(body, 10.0, 0.0, 0.0).unwrap();
    assert!(bridge.fixture_test_point(fixture, 10.25, 0.25).unwrap());
    assert!(!bridge.fixture_test_point(fixture, 0.0, 0.0).unwrap());
}

#[test]
fn test_destroyed_body_leaves_refilter_queue() {
    init_logger();
    let mut bridge = Bridge::new();
    let (world, body) = dynamic_body(&mut bridge);
    let other = create_body(&mut bridge, world, 2);
    let shape = bridge.circle_shape_new();
    let doomed = bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();
    let kept = bridge.body_create_fixture_with_density(other, shape, 1.0).unwrap();

    bridge.fixture_refilter(doomed).unwrap();
    bridge.fixture_refilter(kept).unwrap();
    bridge.world_destroy_body(world, body).unwrap();

    let world_key = phys_bridge::bridge::decode("world", world).unwrap();
    let kept_key = phys_bridge::bridge::decode("fixture", kept).unwrap();
    let pending = bridge.context_mut().world_mut(world_key).unwrap().take_pending_refilter();
    assert_eq!(pending, vec![kept_key]);
}

#[test]
fn test_degenerate_box_keeps_mass_finite() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    let shape = bridge.polygon_shape_new();
    bridge.polygon_shape_set_as_box(shape, 1.0, 0.5).unwrap();

    assert!(matches!(
        bridge.polygon_shape_set_as_box(shape, 0.0, 0.0),
        Err(PhysicsError::InvalidParameter(_))
    ));
    assert!(matches!(
        bridge.polygon_shape_set_as_box_oriented(shape, -1.0, 1.0, 0.0, 0.0, 0.0),
        Err(PhysicsError::InvalidParameter(_))
    ));

    bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();
    let mut mass = [0.0f32; 4];
    bridge.body_get_mass_data(body, &mut mass).unwrap();
    assert!(mass.iter().all(|v| v.is_finite()));
    assert_relative_eq!(mass[0], 2.0, epsilon = 1e-5);
}

#[test]
fn test_fixture_shape_is_a_private_copy() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    let shape = bridge.circle_shape_new();
    bridge.shape_set_radius(shape, 1.0).unwrap();
    let fixture = bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();

    let owned = bridge.fixture_get_shape(fixture).unwrap();
    assert_ne!(owned, shape);
    assert_eq!(bridge.shape_get_radius(owned).unwrap(), 1.0);

    // the caller's shape stays independent
    bridge.shape_set_radius(shape, 3.0).unwrap();
    assert_eq!(bridge.shape_get_radius(owned).unwrap(), 1.0);
    bridge.shape_dispose(shape).unwrap();
    assert_eq!(bridge.shape_get_radius(owned).unwrap(), 1.0);

    assert!(matches!(bridge.shape_dispose(owned), Err(PhysicsError::ShapeInUse { .. })));

    bridge.body_destroy_fixture(body, fixture).unwrap();
    assert!(matches!(bridge.shape_get_type(owned), Err(PhysicsError::InvalidHandle { .. })));
}

#[test]
fn test_stale_handles_are_rejected() {
    let mut bridge = Bridge::new();
    let (world, body) = dynamic_body(&mut bridge);
    let shape = bridge.polygon_shape_new();
    bridge.polygon_shape_set_as_box(shape, 1.0, 1.0).unwrap();
    let fixture = bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();

    bridge.body_destroy_fixture(body, fixture).unwrap();
    assert!(matches!(
        bridge.fixture_get_density(fixture),
        Err(PhysicsError::InvalidHandle { kind: "fixture", .. })
    ));
    assert!(bridge.body_destroy_fixture(body, fixture).is_err());

    bridge.world_destroy_body(world, body).unwrap();
    assert!(matches!(
        bridge.body_get_angle(body),
        Err(PhysicsError::InvalidHandle { kind: "body", .. })
    ));
    assert!(bridge.world_destroy_body(world, body).is_err());

    bridge.shape_dispose(shape).unwrap();
    assert!(bridge.shape_dispose(shape).is_err());

    bridge.world_dispose(world).unwrap();
    assert!(bridge.world_get_body_count(world).is_err());
    assert!(bridge.world_dispose(world).is_err());

    assert!(bridge.body_get_mass(NULL_HANDLE).is_err());
    assert!(bridge.body_get_mass(0xdead_beef_0000_0001).is_err());
}

#[test]
fn test_world_dispose_releases_children() {
    let mut bridge = Bridge::new();
    let (world, body) = dynamic_body(&mut bridge);
    let shape = bridge.circle_shape_new();
    let fixture = bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();
    let owned = bridge.fixture_get_shape(fixture).unwrap();

    bridge.world_dispose(world).unwrap();
    assert!(bridge.body_get_mass(body).is_err());
    assert!(bridge.fixture_get_density(fixture).is_err());
    assert!(bridge.shape_get_radius(owned).is_err());

    // standalone shapes survive their world
    assert_eq!(bridge.shape_get_type(shape).unwrap(), 0);
    assert_eq!(bridge.context().shape_count(), 1);
}

#[test]
fn test_body_from_another_world_is_not_destroyed() {
    let mut bridge = Bridge::new();
    let (_world, body) = dynamic_body(&mut bridge);
    let other = bridge.world_new(0.0, 0.0, true);

    assert!(matches!(
        bridge.world_destroy_body(other, body),
        Err(PhysicsError::NotOwned { kind: "body", .. })
    ));
    assert!(bridge.body_get_mass(body).is_ok());

    let (_, second) = dynamic_body(&mut bridge);
    let shape = bridge.circle_shape_new();
    let fixture = bridge.body_create_fixture_with_density(body, shape, 1.0).unwrap();
    assert!(matches!(
        bridge.body_destroy_fixture(second, fixture),
        Err(PhysicsError::NotOwned { kind: "fixture", .. })
    ));
}

#[test]
fn test_body_flags() {
    let mut bridge = Bridge::new();
    let (world, body) = dynamic_body(&mut bridge);

    bridge.body_set_bullet(body, true).unwrap();
    assert!(bridge.body_is_bullet(body).unwrap());

    bridge.body_set_active(body, false).unwrap();
    assert!(!bridge.body_is_active(body).unwrap());

    bridge.body_set_awake(body, false).unwrap();
    bridge.body_set_sleeping_allowed(body, false).unwrap();
    assert!(!bridge.body_is_sleeping_allowed(body).unwrap());
    assert!(bridge.body_is_awake(body).unwrap());

    bridge.body_set_angular_velocity(body, 3.0).unwrap();
    bridge.body_set_fixed_rotation(body, true).unwrap();
    assert!(bridge.body_is_fixed_rotation(body).unwrap());
    assert_eq!(bridge.body_get_angular_velocity(body).unwrap(), 0.0);
    assert_eq!(bridge.body_get_inertia(body).unwrap(), 0.0);

    // disallowing sleep on the world wakes every body
    bridge.body_set_sleeping_allowed(body, true).unwrap();
    bridge.body_set_awake(body, false).unwrap();
    bridge.world_set_allow_sleep(world, false).unwrap();
    assert!(bridge.body_is_awake(body).unwrap());

    bridge.body_set_linear_damping(body, 0.3).unwrap();
    bridge.body_set_angular_damping(body, 0.7).unwrap();
    bridge.body_set_gravity_scale(body, -1.0).unwrap();
    assert_eq!(bridge.body_get_linear_damping(body).unwrap(), 0.3);
    assert_eq!(bridge.body_get_angular_damping(body).unwrap(), 0.7);
    assert_eq!(bridge.body_get_gravity_scale(body).unwrap(), -1.0);
}

#[test]
fn test_shape_kinds() {
    let mut bridge = Bridge::new();

    let circle = bridge.circle_shape_new();
    let edge = bridge.edge_shape_new();
    let polygon = bridge.polygon_shape_new();
    let chain = bridge.chain_shape_new();
    assert_eq!(bridge.shape_get_type(circle).unwrap(), 0);
    assert_eq!(bridge.shape_get_type(edge).unwrap(), 1);
    assert_eq!(bridge.shape_get_type(polygon).unwrap(), 2);
    assert_eq!(bridge.shape_get_type(chain).unwrap(), 3);
    assert_relative_eq!(bridge.shape_get_radius(polygon).unwrap(), 0.01);

    let mut out = [0.0f32; 2];
    bridge.circle_shape_set_position(circle, 1.0, -2.0).unwrap();
    bridge.circle_shape_get_position(circle, &mut out).unwrap();
    assert_eq!(out, [1.0, -2.0]);

    bridge.edge_shape_set(edge, 0.0, 1.0, 2.0, 3.0).unwrap();
    bridge.edge_shape_get_vertex1(edge, &mut out).unwrap();
    assert_eq!(out, [0.0, 1.0]);
    bridge.edge_shape_get_vertex2(edge, &mut out).unwrap();
    assert_eq!(out, [2.0, 3.0]);

    assert!(matches!(
        bridge.polygon_shape_set_as_box(circle, 1.0, 1.0),
        Err(PhysicsError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        bridge.edge_shape_get_vertex1(polygon, &mut out),
        Err(PhysicsError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_oriented_box() {
    let mut bridge = Bridge::new();
    let shape = bridge.polygon_shape_new();
    bridge
        .polygon_shape_set_as_box_oriented(shape, 1.0, 0.5, 2.0, 0.0, PI / 2.0)
        .unwrap();
    assert_eq!(bridge.polygon_shape_get_vertex_count(shape).unwrap(), 4);

    // (-1, -0.5) rotated a quarter turn and moved to (2, 0)
    let mut out = [0.0f32; 2];
    bridge.polygon_shape_get_vertex(shape, 0, &mut out).unwrap();
    assert_relative_eq!(out[0], 2.5, epsilon = 1e-6);
    assert_relative_eq!(out[1], -1.0, epsilon = 1e-6);
}

#[test]
fn test_chain_shapes() {
    let mut bridge = Bridge::new();

    let chain = bridge.chain_shape_new();
    let mut verts: Vec<f32> = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0];
    bridge.chain_shape_create_chain(chain, &mut verts, 0, 6).unwrap();
    assert_eq!(bridge.chain_shape_get_vertex_count(chain).unwrap(), 3);

    let looped = bridge.chain_shape_new();
    bridge.chain_shape_create_loop(looped, &mut verts, 0, 6).unwrap();
    assert_eq!(bridge.chain_shape_get_vertex_count(looped).unwrap(), 4);
    let mut out = [9.0f32; 2];
    bridge.chain_shape_get_vertex(looped, 3, &mut out).unwrap();
    assert_eq!(out, [0.0, 0.0]);
    assert!(bridge.chain_shape_get_vertex(looped, 4, &mut out).is_err());

    // a chain is built once
    assert!(matches!(
        bridge.chain_shape_create_chain(chain, &mut verts, 0, 6),
        Err(PhysicsError::InvalidParameter(_))
    ));

    let short = bridge.chain_shape_new();
    assert!(bridge.chain_shape_create_loop(short, &mut verts, 0, 4).is_err());
}
