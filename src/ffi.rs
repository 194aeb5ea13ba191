//! C ABI exports of the bridge call table.
//!
//! The caller owns a `*mut Bridge` obtained from [`phys_bridge_new`] and
//! passes it as the first argument of every call. Operations return `0` on
//! success or a negative [`PhysicsError::code`]; values come back through
//! out-pointers. Factories return the new handle directly, or `0` on
//! failure. Host arrays are passed as a pointer and an element count.
//!
//! # Safety
//!
//! Every pointer argument must be null or valid for the stated number of
//! elements for the duration of the call, and a bridge pointer must come
//! from [`phys_bridge_new`] and not yet have been freed.

#![allow(clippy::missing_safety_doc)]

use crate::bridge::{Bridge, BridgeConfig, RawHandle, NULL_HANDLE};
use crate::error::PhysicsError;
use crate::Result;

macro_rules! return_if_null {
    ($ret:expr, $($ptr:expr),+ $(,)?) => {
        if $( $ptr.is_null() )||* {
            return $ret;
        }
    };
}

/// Runs `f` against the bridge behind `bridge`
unsafe fn with_bridge<R>(bridge: *mut Bridge, f: impl FnOnce(&mut Bridge) -> Result<R>) -> Result<R> {
    match bridge.as_mut() {
        Some(bridge) => f(bridge),
        None => Err(PhysicsError::NullPointer("bridge")),
    }
}

/// Borrows a host array; a null pointer is only accepted for an empty array
unsafe fn host_slice<'a, T>(ptr: *mut T, len: usize, what: &'static str) -> Result<&'a mut [T]> {
    if ptr.is_null() {
        if len == 0 {
            return Ok(&mut []);
        }
        return Err(PhysicsError::NullPointer(what));
    }
    Ok(std::slice::from_raw_parts_mut(ptr, len))
}

fn status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            log::debug!("bridge call failed: {}", err);
            err.code()
        }
    }
}

/// Stores a scalar result through `out`
unsafe fn store<T>(out: *mut T, result: Result<T>) -> i32 {
    return_if_null!(PhysicsError::NullPointer("out").code(), out);
    status(result.map(|value| *out = value))
}

fn handle(result: Result<RawHandle>) -> RawHandle {
    match result {
        Ok(handle) => handle,
        Err(err) => {
            log::debug!("bridge factory failed: {}", err);
            NULL_HANDLE
        }
    }
}

/// Exports `Result<()>` operations as status-returning symbols
macro_rules! export_status {
    ($(fn $name:ident => $method:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $name(bridge: *mut Bridge, $($arg: $ty),*) -> i32 {
                status(with_bridge(bridge, |b| b.$method($($arg),*)))
            }
        )*
    };
}

/// Exports scalar getters, storing the value through a trailing out-pointer
macro_rules! export_get {
    ($(fn $name:ident => $method:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $name(bridge: *mut Bridge, $($arg: $ty,)* out: *mut $ret) -> i32 {
                store(out, with_bridge(bridge, |b| b.$method($($arg),*)))
            }
        )*
    };
}

/// Exports bulk getters writing into a caller array of `out_len` elements
macro_rules! export_write {
    ($(fn $name:ident => $method:ident($($arg:ident: $ty:ty),*) -> [$elem:ty];)*) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $name(bridge: *mut Bridge, $($arg: $ty,)* out: *mut $elem, out_len: usize) -> i32 {
                status(with_bridge(bridge, |b| {
                    let out = host_slice(out, out_len, "out")?;
                    b.$method($($arg,)* out)
                }))
            }
        )*
    };
}

/// Exports factories returning a handle, `0` on failure
macro_rules! export_handle {
    ($(fn $name:ident => $method:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $name(bridge: *mut Bridge, $($arg: $ty),*) -> RawHandle {
                handle(with_bridge(bridge, |b| b.$method($($arg),*)))
            }
        )*
    };
}

/// Exports vertex setters reading `verts[offset .. offset + len]`
macro_rules! export_vertices {
    ($(fn $name:ident => $method:ident;)*) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $name(
                bridge: *mut Bridge,
                shape: RawHandle,
                verts: *mut f32,
                verts_len: usize,
                offset: i32,
                len: i32,
            ) -> i32 {
                status(with_bridge(bridge, |b| {
                    let verts = host_slice(verts, verts_len, "verts")?;
                    b.$method(shape, verts, offset, len)
                }))
            }
        )*
    };
}

// --- bridge lifetime -----------------------------------------------------

/// Creates a bridge; `strict_body_type` rejects unknown body-type codes
#[no_mangle]
pub extern "C" fn phys_bridge_new(strict_body_type: bool) -> *mut Bridge {
    let config = BridgeConfig {
        strict_body_type,
        ..BridgeConfig::default()
    };
    Box::into_raw(Box::new(Bridge::with_config(config)))
}

/// Frees a bridge and every object it owns
#[no_mangle]
pub unsafe extern "C" fn phys_bridge_free(bridge: *mut Bridge) {
    return_if_null!((), bridge);
    drop(Box::from_raw(bridge));
}

// --- world ---------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn phys_world_new(bridge: *mut Bridge, gravity_x: f32, gravity_y: f32, do_sleep: bool) -> RawHandle {
    handle(with_bridge(bridge, |b| Ok(b.world_new(gravity_x, gravity_y, do_sleep))))
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn phys_world_create_body(
    bridge: *mut Bridge,
    world: RawHandle,
    body_type: i32,
    position_x: f32,
    position_y: f32,
    angle: f32,
    linear_velocity_x: f32,
    linear_velocity_y: f32,
    angular_velocity: f32,
    linear_damping: f32,
    angular_damping: f32,
    allow_sleep: bool,
    awake: bool,
    fixed_rotation: bool,
    bullet: bool,
    active: bool,
    gravity_scale: f32,
) -> RawHandle {
    handle(with_bridge(bridge, |b| {
        b.world_create_body(
            world,
            body_type,
            position_x,
            position_y,
            angle,
            linear_velocity_x,
            linear_velocity_y,
            angular_velocity,
            linear_damping,
            angular_damping,
            allow_sleep,
            awake,
            fixed_rotation,
            bullet,
            active,
            gravity_scale,
        )
    }))
}

export_status! {
    fn phys_world_dispose => world_dispose(world: RawHandle);
    fn phys_world_set_gravity => world_set_gravity(world: RawHandle, x: f32, y: f32);
    fn phys_world_destroy_body => world_destroy_body(world: RawHandle, body: RawHandle);
    fn phys_world_clear_forces => world_clear_forces(world: RawHandle);
    fn phys_world_set_auto_clear_forces => world_set_auto_clear_forces(world: RawHandle, flag: bool);
    fn phys_world_set_allow_sleep => world_set_allow_sleep(world: RawHandle, flag: bool);
}

export_get! {
    fn phys_world_get_body_count => world_get_body_count(world: RawHandle) -> i32;
    fn phys_world_get_auto_clear_forces => world_get_auto_clear_forces(world: RawHandle) -> bool;
    fn phys_world_get_allow_sleep => world_get_allow_sleep(world: RawHandle) -> bool;
}

export_write! {
    fn phys_world_get_gravity => world_get_gravity(world: RawHandle) -> [f32];
}

// --- body ----------------------------------------------------------------

export_handle! {
    fn phys_body_create_fixture => body_create_fixture(
        body: RawHandle,
        shape: RawHandle,
        friction: f32,
        restitution: f32,
        density: f32,
        is_sensor: bool,
        category_bits: i16,
        mask_bits: i16,
        group_index: i16
    );
    fn phys_body_create_fixture_with_density => body_create_fixture_with_density(body: RawHandle, shape: RawHandle, density: f32);
}

export_status! {
    fn phys_body_destroy_fixture => body_destroy_fixture(body: RawHandle, fixture: RawHandle);
    fn phys_body_set_transform => body_set_transform(body: RawHandle, x: f32, y: f32, angle: f32);
    fn phys_body_set_linear_velocity => body_set_linear_velocity(body: RawHandle, x: f32, y: f32);
    fn phys_body_set_angular_velocity => body_set_angular_velocity(body: RawHandle, omega: f32);
    fn phys_body_apply_force => body_apply_force(body: RawHandle, fx: f32, fy: f32, px: f32, py: f32, wake: bool);
    fn phys_body_apply_force_to_center => body_apply_force_to_center(body: RawHandle, fx: f32, fy: f32, wake: bool);
    fn phys_body_apply_torque => body_apply_torque(body: RawHandle, torque: f32, wake: bool);
    fn phys_body_apply_linear_impulse => body_apply_linear_impulse(body: RawHandle, ix: f32, iy: f32, px: f32, py: f32, wake: bool);
    fn phys_body_apply_angular_impulse => body_apply_angular_impulse(body: RawHandle, impulse: f32, wake: bool);
    fn phys_body_set_mass_data => body_set_mass_data(body: RawHandle, mass: f32, center_x: f32, center_y: f32, inertia: f32);
    fn phys_body_reset_mass_data => body_reset_mass_data(body: RawHandle);
    fn phys_body_set_linear_damping => body_set_linear_damping(body: RawHandle, damping: f32);
    fn phys_body_set_angular_damping => body_set_angular_damping(body: RawHandle, damping: f32);
    fn phys_body_set_gravity_scale => body_set_gravity_scale(body: RawHandle, scale: f32);
    fn phys_body_set_type => body_set_type(body: RawHandle, code: i32);
    fn phys_body_set_bullet => body_set_bullet(body: RawHandle, flag: bool);
    fn phys_body_set_sleeping_allowed => body_set_sleeping_allowed(body: RawHandle, flag: bool);
    fn phys_body_set_awake => body_set_awake(body: RawHandle, flag: bool);
    fn phys_body_set_active => body_set_active(body: RawHandle, flag: bool);
    fn phys_body_set_fixed_rotation => body_set_fixed_rotation(body: RawHandle, flag: bool);
}

export_get! {
    fn phys_body_get_angle => body_get_angle(body: RawHandle) -> f32;
    fn phys_body_get_angular_velocity => body_get_angular_velocity(body: RawHandle) -> f32;
    fn phys_body_get_mass => body_get_mass(body: RawHandle) -> f32;
    fn phys_body_get_inertia => body_get_inertia(body: RawHandle) -> f32;
    fn phys_body_get_linear_damping => body_get_linear_damping(body: RawHandle) -> f32;
    fn phys_body_get_angular_damping => body_get_angular_damping(body: RawHandle) -> f32;
    fn phys_body_get_gravity_scale => body_get_gravity_scale(body: RawHandle) -> f32;
    fn phys_body_get_type => body_get_type(body: RawHandle) -> i32;
    fn phys_body_is_bullet => body_is_bullet(body: RawHandle) -> bool;
    fn phys_body_is_sleeping_allowed => body_is_sleeping_allowed(body: RawHandle) -> bool;
    fn phys_body_is_awake => body_is_awake(body: RawHandle) -> bool;
    fn phys_body_is_active => body_is_active(body: RawHandle) -> bool;
    fn phys_body_is_fixed_rotation => body_is_fixed_rotation(body: RawHandle) -> bool;
}

export_write! {
    fn phys_body_get_transform => body_get_transform(body: RawHandle) -> [f32];
    fn phys_body_get_position => body_get_position(body: RawHandle) -> [f32];
    fn phys_body_get_world_center => body_get_world_center(body: RawHandle) -> [f32];
    fn phys_body_get_local_center => body_get_local_center(body: RawHandle) -> [f32];
    fn phys_body_get_linear_velocity => body_get_linear_velocity(body: RawHandle) -> [f32];
    fn phys_body_get_mass_data => body_get_mass_data(body: RawHandle) -> [f32];
    fn phys_body_get_world_point => body_get_world_point(body: RawHandle, x: f32, y: f32) -> [f32];
    fn phys_body_get_world_vector => body_get_world_vector(body: RawHandle, x: f32, y: f32) -> [f32];
    fn phys_body_get_local_point => body_get_local_point(body: RawHandle, x: f32, y: f32) -> [f32];
    fn phys_body_get_local_vector => body_get_local_vector(body: RawHandle, x: f32, y: f32) -> [f32];
    fn phys_body_get_linear_velocity_from_world_point =>
        body_get_linear_velocity_from_world_point(body: RawHandle, x: f32, y: f32) -> [f32];
    fn phys_body_get_linear_velocity_from_local_point =>
        body_get_linear_velocity_from_local_point(body: RawHandle, x: f32, y: f32) -> [f32];
}

// --- fixture -------------------------------------------------------------

export_handle! {
    fn phys_fixture_get_shape => fixture_get_shape(fixture: RawHandle);
}

export_status! {
    fn phys_fixture_set_sensor => fixture_set_sensor(fixture: RawHandle, flag: bool);
    fn phys_fixture_set_filter_data => fixture_set_filter_data(fixture: RawHandle, category_bits: i16, mask_bits: i16, group_index: i16);
    fn phys_fixture_refilter => fixture_refilter(fixture: RawHandle);
    fn phys_fixture_set_density => fixture_set_density(fixture: RawHandle, density: f32);
    fn phys_fixture_set_friction => fixture_set_friction(fixture: RawHandle, friction: f32);
    fn phys_fixture_set_restitution => fixture_set_restitution(fixture: RawHandle, restitution: f32);
}

export_get! {
    fn phys_fixture_get_type => fixture_get_type(fixture: RawHandle) -> i32;
    fn phys_fixture_is_sensor => fixture_is_sensor(fixture: RawHandle) -> bool;
    fn phys_fixture_test_point => fixture_test_point(fixture: RawHandle, x: f32, y: f32) -> bool;
    fn phys_fixture_get_density => fixture_get_density(fixture: RawHandle) -> f32;
    fn phys_fixture_get_friction => fixture_get_friction(fixture: RawHandle) -> f32;
    fn phys_fixture_get_restitution => fixture_get_restitution(fixture: RawHandle) -> f32;
}

export_write! {
    fn phys_fixture_get_filter_data => fixture_get_filter_data(fixture: RawHandle) -> [i16];
}

// --- shapes --------------------------------------------------------------

#[no_mangle]
pub unsafe extern "C" fn phys_polygon_shape_new(bridge: *mut Bridge) -> RawHandle {
    handle(with_bridge(bridge, |b| Ok(b.polygon_shape_new())))
}

#[no_mangle]
pub unsafe extern "C" fn phys_circle_shape_new(bridge: *mut Bridge) -> RawHandle {
    handle(with_bridge(bridge, |b| Ok(b.circle_shape_new())))
}

#[no_mangle]
pub unsafe extern "C" fn phys_edge_shape_new(bridge: *mut Bridge) -> RawHandle {
    handle(with_bridge(bridge, |b| Ok(b.edge_shape_new())))
}

#[no_mangle]
pub unsafe extern "C" fn phys_chain_shape_new(bridge: *mut Bridge) -> RawHandle {
    handle(with_bridge(bridge, |b| Ok(b.chain_shape_new())))
}

export_status! {
    fn phys_shape_set_radius => shape_set_radius(shape: RawHandle, radius: f32);
    fn phys_shape_dispose => shape_dispose(shape: RawHandle);
    fn phys_polygon_shape_set_as_box => polygon_shape_set_as_box(shape: RawHandle, hx: f32, hy: f32);
    fn phys_polygon_shape_set_as_box_oriented =>
        polygon_shape_set_as_box_oriented(shape: RawHandle, hx: f32, hy: f32, center_x: f32, center_y: f32, angle: f32);
    fn phys_circle_shape_set_position => circle_shape_set_position(shape: RawHandle, x: f32, y: f32);
    fn phys_edge_shape_set => edge_shape_set(shape: RawHandle, v1x: f32, v1y: f32, v2x: f32, v2y: f32);
}

export_get! {
    fn phys_shape_get_type => shape_get_type(shape: RawHandle) -> i32;
    fn phys_shape_get_radius => shape_get_radius(shape: RawHandle) -> f32;
    fn phys_polygon_shape_get_vertex_count => polygon_shape_get_vertex_count(shape: RawHandle) -> i32;
    fn phys_chain_shape_get_vertex_count => chain_shape_get_vertex_count(shape: RawHandle) -> i32;
}

export_write! {
    fn phys_polygon_shape_get_vertex => polygon_shape_get_vertex(shape: RawHandle, index: i32) -> [f32];
    fn phys_circle_shape_get_position => circle_shape_get_position(shape: RawHandle) -> [f32];
    fn phys_edge_shape_get_vertex1 => edge_shape_get_vertex1(shape: RawHandle) -> [f32];
    fn phys_edge_shape_get_vertex2 => edge_shape_get_vertex2(shape: RawHandle) -> [f32];
    fn phys_chain_shape_get_vertex => chain_shape_get_vertex(shape: RawHandle, index: i32) -> [f32];
}

export_vertices! {
    fn phys_polygon_shape_set => polygon_shape_set;
    fn phys_chain_shape_create_loop => chain_shape_create_loop;
    fn phys_chain_shape_create_chain => chain_shape_create_chain;
}
