use std::ptr;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use weather_gen_core::{GeneratorConfig, GeneratorState, WeatherGenerator};

use crate::error::{DefaultWeatherGenError, WeatherGenErrorCode};
use crate::helpers::{track_error, track_result};

/// Opaque handle to a weather generator.
///
/// # Thread Safety
/// The generator sits behind a `Mutex`, so a handle may be shared across host
/// threads. Each call takes the lock for one episode; calls are serialized,
/// which keeps the episode stream deterministic for a given call order.
///
/// # Usage
/// ```c
/// WeatherGenInstance* gen = NULL;
/// if (weather_gen_new(12354, 3600.0f, &gen) != Ok) {
///     fprintf(stderr, "%s\n", weather_gen_get_last_error());
///     return;
/// }
///
/// WeatherEpisode episode;
/// weather_gen_next_episode(gen, &episode);
/// // arm a timer for episode.duration ...
///
/// weather_gen_destroy(gen);
/// ```
pub struct WeatherGenInstance {
    pub(crate) generator: Mutex<WeatherGenerator>,
}

impl WeatherGenInstance {
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `mean_duration` is not finite and positive.
    pub(crate) fn new(
        seed: u64,
        mean_duration: f32,
    ) -> Result<Box<Self>, DefaultWeatherGenError> {
        let config = GeneratorConfig::new(seed, mean_duration);
        Ok(Box::new(Self::wrap(WeatherGenerator::from_config(&config)?)))
    }

    /// # Errors
    ///
    /// Returns `InvalidParameter` when the snapshot is invalid.
    pub(crate) fn from_state(
        state: &GeneratorState,
    ) -> Result<Box<Self>, DefaultWeatherGenError> {
        Ok(Box::new(Self::wrap(WeatherGenerator::restore(state)?)))
    }

    fn wrap(generator: WeatherGenerator) -> Self {
        Self {
            generator: Mutex::new(generator),
        }
    }

    /// Lock the generator for one operation.
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if a previous holder panicked.
    pub(crate) fn lock(
        &self,
    ) -> Result<MutexGuard<'_, WeatherGenerator>, DefaultWeatherGenError> {
        self.generator
            .lock()
            .map_err(|_| DefaultWeatherGenError::lock_poisoned())
    }
}

/// Hand a freshly built instance to C through `out_instance`.
///
/// # Safety
/// `out_instance` must be non-null and writable.
pub(crate) unsafe fn publish_instance(
    result: Result<Box<WeatherGenInstance>, DefaultWeatherGenError>,
    out_instance: *mut *mut WeatherGenInstance,
) -> WeatherGenErrorCode {
    match track_result(result) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            WeatherGenErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Create a weather generator and return it via out-parameter.
///
/// The generator runs its warm-up before this returns, so the first call to
/// `weather_gen_next_episode` already yields a settled episode.
///
/// Returns
/// - `Ok` (0) with a valid pointer in `out_instance`
/// - `NullPointer` if `out_instance` is null
/// - `InvalidParameter` if `mean_duration` is not finite and positive;
///   `out_instance` is set to null
///
/// # Safety
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned instance and MUST call `weather_gen_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn weather_gen_new(
    seed: u64,
    mean_duration: f32,
    out_instance: *mut *mut WeatherGenInstance,
) -> WeatherGenErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWeatherGenError::null_pointer("out_instance"));
    }

    debug!(
        "Creating weather generator: seed={}, mean_duration={}",
        seed, mean_duration
    );

    unsafe { publish_instance(WeatherGenInstance::new(seed, mean_duration), out_instance) }
}

/// Destroy an instance previously created by `weather_gen_new` or
/// `weather_gen_load_state`.
///
/// A null pointer is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by this library and not freed already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn weather_gen_destroy(ptr: *mut WeatherGenInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `publish_instance` and not yet freed.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
