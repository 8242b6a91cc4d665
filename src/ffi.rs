//! C ABI for embedding the engine in a libretro core.
//!
//! Every function accepts a null context and treats it as a no-op, returning
//! the neutral value for queries.

use std::ffi::{c_float, c_int, c_uint, c_void};
use std::ptr;

use crate::engine::{InputQuery, StylusEngine};
use crate::guard::GuardSettings;
use crate::mapping::{Action, HoverBehavior, MappingConfig};
use crate::state::{DeviceState, ToolType};

/// Opaque handle handed to C callers.
pub type SpenContext = StylusEngine;

/// Underlying input API: `(port, device, index, id) -> state`.
pub type RetroInputStateFn =
    unsafe extern "C" fn(port: c_uint, device: c_uint, index: c_uint, id: c_uint) -> i16;

/// Writes the transformed position of `(in_x, in_y)` to `out_x`/`out_y`.
pub type SpenCoordinateTransformFn = unsafe extern "C" fn(
    in_x: c_float,
    in_y: c_float,
    out_x: *mut c_int,
    out_y: *mut c_int,
    user_data: *mut c_void,
);

/// # Safety
/// `ctx` must be null or a pointer returned by [`spen_init`] that has not been cleaned up.
unsafe fn context<'a>(ctx: *mut SpenContext) -> Option<&'a mut SpenContext> {
    ctx.as_mut()
}

/// Create an engine with default configuration. Release it with [`spen_cleanup`].
#[no_mangle]
pub extern "C" fn spen_init() -> *mut SpenContext {
    Box::into_raw(Box::new(StylusEngine::new()))
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`]; it is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn spen_cleanup(ctx: *mut SpenContext) {
    if !ctx.is_null() {
        drop(Box::from_raw(ctx));
    }
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_on_hover(ctx: *mut SpenContext, x: c_float, y: c_float, pressure: c_float) {
    if let Some(engine) = context(ctx) {
        engine.on_hover(x, y, pressure);
    }
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_on_contact(ctx: *mut SpenContext, x: c_float, y: c_float, pressure: c_float) {
    if let Some(engine) = context(ctx) {
        engine.on_contact(x, y, pressure);
    }
}

/// Negative and out-of-range buttons are ignored.
///
/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_on_button(ctx: *mut SpenContext, button: c_int, pressed: bool) {
    let Some(engine) = context(ctx) else { return };
    if let Ok(index) = u32::try_from(button) {
        engine.on_button(index, pressed);
    }
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_on_tool_type(ctx: *mut SpenContext, tool_type: c_uint) {
    if let Some(engine) = context(ctx) {
        engine.on_tool_type(ToolType::from_raw(tool_type));
    }
}

/// Borrowed view of the current state, valid until the next call on `ctx`.
///
/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_get_state(ctx: *mut SpenContext) -> *const DeviceState {
    context(ctx).map_or(ptr::null(), |engine| engine.state() as *const DeviceState)
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_get_previous_state(ctx: *mut SpenContext) -> *const DeviceState {
    context(ctx).map_or(ptr::null(), |engine| engine.previous_state() as *const DeviceState)
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_is_active(ctx: *mut SpenContext) -> bool {
    context(ctx).is_some_and(|engine| engine.is_active())
}

/// A null context reports the default policy (contact required).
///
/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_require_contact(ctx: *mut SpenContext) -> bool {
    context(ctx).map_or(true, |engine| engine.requires_contact_for_click())
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_set_require_contact(ctx: *mut SpenContext, required: bool) {
    if let Some(engine) = context(ctx) {
        engine.set_require_contact_for_click(required);
    }
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`]. `input_state_cb`, if
/// set, must be safe to call with any arguments.
#[no_mangle]
pub unsafe extern "C" fn spen_emit_libretro_pointer(
    ctx: *mut SpenContext,
    input_state_cb: Option<RetroInputStateFn>,
    port: c_uint,
    device: c_uint,
    index: c_uint,
    id: c_uint,
) -> i16 {
    let Some(engine) = context(ctx) else { return 0 };
    let query = InputQuery::new(port, device, index, id);

    match input_state_cb {
        Some(cb) => {
            // SAFETY: the caller vouches for the callback.
            let mut fallback = |q: InputQuery| unsafe { cb(q.port, q.device, q.index, q.id) };
            engine.emit_pointer(Some(&mut fallback), query)
        }
        None => engine.emit_pointer(None, query),
    }
}

/// Register (or with a null function, remove) the coordinate transform.
/// `user_data` is passed through to every call unchanged.
///
/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`]. `transform_func`
/// must stay callable with `user_data` for as long as it is registered.
#[no_mangle]
pub unsafe extern "C" fn spen_set_coordinate_transform(
    ctx: *mut SpenContext,
    transform_func: Option<SpenCoordinateTransformFn>,
    user_data: *mut c_void,
) {
    let Some(engine) = context(ctx) else { return };
    let Some(transform) = transform_func else {
        engine.clear_coordinate_transform();
        return;
    };

    engine.set_coordinate_transform(move |x, y| {
        let mut out_x: c_int = 0;
        let mut out_y: c_int = 0;
        // SAFETY: the registrant guarantees the function accepts its own user_data.
        unsafe { transform(x, y, &mut out_x, &mut out_y, user_data) };
        (out_x, out_y)
    });
}

/// Negative durations and radii are treated as zero.
///
/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_configure_hover_guard(
    ctx: *mut SpenContext,
    guard_time_ms: c_int,
    guard_radius_px: c_float,
) {
    if let Some(engine) = context(ctx) {
        engine.configure_hover_guard(GuardSettings {
            duration_ms: guard_time_ms.max(0) as u64,
            radius_px: guard_radius_px.max(0.0),
        });
    }
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_configure_mapping(
    ctx: *mut SpenContext,
    tap_action: c_uint,
    barrel_action: c_uint,
    hover_behavior: c_uint,
    pressure_threshold: c_float,
) {
    if let Some(engine) = context(ctx) {
        engine.configure_mapping(MappingConfig {
            tap_action: Action::from_raw(tap_action),
            barrel_action: Action::from_raw(barrel_action),
            hover_behavior: HoverBehavior::from_raw(hover_behavior),
            pressure_threshold,
        });
    }
}

/// # Safety
/// `ctx` must be null or a live handle from [`spen_init`].
#[no_mangle]
pub unsafe extern "C" fn spen_get_mapped_button(ctx: *mut SpenContext, device_type: c_int, button_id: c_int) -> bool {
    let Some(engine) = context(ctx) else { return false };
    match (u32::try_from(device_type), u32::try_from(button_id)) {
        (Ok(device), Ok(button)) => engine.mapped_button(device, button),
        _ => false,
    }
}
