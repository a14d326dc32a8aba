use std::os::raw::c_char;
use tracing::debug;
use weather_gen_core::{GeneratorState, PersistenceError};

use crate::error::{DefaultWeatherGenError, WeatherGenErrorCode};
use crate::helpers::{path_from_c_str, track_error, track_result};
use crate::instance::{publish_instance, WeatherGenInstance};

/// Save the generator's state to a JSON file at `path`.
///
/// A generator loaded from the file with `weather_gen_load_state` continues
/// with exactly the episodes this one would have produced.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if `instance` or `path` is null
/// - `InvalidParameter` if `path` is not valid UTF-8
/// - `PersistenceFailed` if the file cannot be written
///
/// # Safety
/// `instance` must be a live instance; `path` must be a null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn weather_gen_save_state(
    instance: *const WeatherGenInstance,
    path: *const c_char,
) -> WeatherGenErrorCode {
    if instance.is_null() {
        return track_error(&DefaultWeatherGenError::null_pointer("instance"));
    }

    // SAFETY: non-null checked above; validity is the caller's contract.
    let instance = unsafe { &*instance };
    let result = unsafe { path_from_c_str(path, "path") }.and_then(|path| {
        let state = instance.lock()?.snapshot();
        state.save(&path)?;
        debug!("Weather generator state saved to {}", path.display());
        Ok(())
    });

    match track_result(result) {
        Ok(()) => WeatherGenErrorCode::Ok,
        Err(code) => code,
    }
}

/// Create a generator from a state file written by `weather_gen_save_state`.
///
/// No warm-up runs; the generator resumes exactly where the saved one stopped.
///
/// Returns
/// - `Ok` (0) with a valid pointer in `out_instance`
/// - `NullPointer` if `path` or `out_instance` is null
/// - `InvalidParameter` if `path` is not valid UTF-8
/// - `PersistenceFailed` if the file is missing, malformed or describes an
///   invalid generator; `out_instance` is set to null
///
/// # Safety
/// `path` must be a null-terminated string; `out_instance` must be non-null
/// and writable. The caller owns the instance and MUST call
/// `weather_gen_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn weather_gen_load_state(
    path: *const c_char,
    out_instance: *mut *mut WeatherGenInstance,
) -> WeatherGenErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWeatherGenError::null_pointer("out_instance"));
    }

    let result = unsafe { path_from_c_str(path, "path") }.and_then(|path| {
        let state = GeneratorState::load(&path)?;
        state.validate().map_err(PersistenceError::from)?;
        debug!("Weather generator state loaded from {}", path.display());
        WeatherGenInstance::from_state(&state)
    });

    unsafe { publish_instance(result, out_instance) }
}
