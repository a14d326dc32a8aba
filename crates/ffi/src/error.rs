use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use weather_gen_core::{PersistenceError, WeatherError};

/// Common interface for FFI error types.
///
/// - `code()` - the code returned across the FFI boundary
/// - `msg()` - the diagnostic message stored for `weather_gen_get_last_error`
pub(crate) trait WeatherGenError {
    fn code(&self) -> WeatherGenErrorCode;

    fn msg(&self) -> &str;
}

/// Default implementation of `WeatherGenError`.
///
/// Wraps a `WeatherGenErrorCode` with a message; one constructor per failure
/// the FFI layer can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultWeatherGenError {
    code: WeatherGenErrorCode,
    msg: String,
}

impl DefaultWeatherGenError {
    /// Null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: WeatherGenErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// The generator mutex was poisoned by a panic on another thread.
    pub fn lock_poisoned() -> Self {
        Self {
            code: WeatherGenErrorCode::LockPoisoned,
            msg: "Generator lock was poisoned by a panic in another thread".to_string(),
        }
    }

    /// Out-of-range or malformed argument.
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        Self {
            code: WeatherGenErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}': {message}"),
        }
    }
}

impl From<WeatherError> for DefaultWeatherGenError {
    fn from(error: WeatherError) -> Self {
        let code = match error {
            WeatherError::InvalidCombination { .. } => WeatherGenErrorCode::InvalidCombination,
            WeatherError::DegenerateDistribution { .. } => {
                WeatherGenErrorCode::DegenerateDistribution
            }
            WeatherError::InvalidConstruction { .. } => WeatherGenErrorCode::InvalidParameter,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl From<PersistenceError> for DefaultWeatherGenError {
    fn from(error: PersistenceError) -> Self {
        Self {
            code: WeatherGenErrorCode::PersistenceFailed,
            msg: error.to_string(),
        }
    }
}

impl WeatherGenError for DefaultWeatherGenError {
    fn code(&self) -> WeatherGenErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by weather generator functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherGenErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Internal lock was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter, e.g. a non-positive mean duration or an unknown severity.
    InvalidParameter = 3,

    /// Severity, kind and thunder do not form a legal downfall.
    InvalidCombination = 4,

    /// A transition left no candidate state. Indicates a bug in the generator.
    DegenerateDistribution = 5,

    /// Reading, writing or parsing a state snapshot failed.
    PersistenceFailed = 6,
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` is owned here so pointers handed to C stay valid until the next error.
    static LAST_ERROR: RefCell<(Option<CString>, WeatherGenErrorCode)> = const { RefCell::new((None, WeatherGenErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, WeatherGenErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, WeatherGenErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns null if no error has occurred on this thread.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error. **DO NOT FREE THIS POINTER.**
///
/// Example:
/// ```c
/// WeatherGenInstance* gen = NULL;
/// if (weather_gen_new(12354, 3600.0f, &gen) != Ok) {
///     const char* error = weather_gen_get_last_error();
///     if (error) {
///         printf("Weather generator creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn weather_gen_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `Ok` (0) if no error has occurred.
#[no_mangle]
pub extern "C" fn weather_gen_get_last_error_code() -> WeatherGenErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{clear_last_error, track_error, track_result};
    use std::ffi::CStr;

    fn last_message() -> Option<String> {
        let ptr = weather_gen_get_last_error();
        if ptr.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    #[test]
    fn test_tracked_error_is_retrievable() {
        let code = track_error(&DefaultWeatherGenError::null_pointer("out_episode"));
        assert_eq!(code, WeatherGenErrorCode::NullPointer);
        assert_eq!(weather_gen_get_last_error_code(), WeatherGenErrorCode::NullPointer);
        assert_eq!(
            last_message().as_deref(),
            Some("Parameter 'out_episode' cannot be null")
        );
    }

    #[test]
    fn test_success_clears_last_error() {
        track_error(&DefaultWeatherGenError::lock_poisoned());
        let result: Result<u32, DefaultWeatherGenError> = Ok(3);
        assert_eq!(track_result(result), Ok(3));
        assert_eq!(weather_gen_get_last_error_code(), WeatherGenErrorCode::Ok);
        assert!(last_message().is_none());

        clear_last_error();
        assert!(last_message().is_none());
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err =
            DefaultWeatherGenError::from(WeatherError::DegenerateDistribution { candidates: 4 });
        assert_eq!(err.code(), WeatherGenErrorCode::DegenerateDistribution);
        assert!(err.msg().contains('4'));

        let err = DefaultWeatherGenError::from(WeatherError::InvalidConstruction {
            parameter: "mean_duration",
            reason: "must be finite and positive, got 0".to_string(),
        });
        assert_eq!(err.code(), WeatherGenErrorCode::InvalidParameter);
    }
}
