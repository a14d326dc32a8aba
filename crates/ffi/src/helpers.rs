use crate::error::{
    with_last_error_mut, DefaultWeatherGenError, WeatherGenError, WeatherGenErrorCode,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl WeatherGenError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &impl WeatherGenError) -> WeatherGenErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T, E: WeatherGenError>(
    result: Result<T, E>,
) -> Result<T, WeatherGenErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WeatherGenErrorCode::Ok;
    });
}

/// Borrow a C path string as a `PathBuf`.
///
/// # Safety
/// `path` must be null or point to a valid null-terminated string.
pub(crate) unsafe fn path_from_c_str(
    path: *const c_char,
    param_name: &str,
) -> Result<PathBuf, DefaultWeatherGenError> {
    if path.is_null() {
        return Err(DefaultWeatherGenError::null_pointer(param_name));
    }

    // SAFETY: non-null checked above; validity is the caller's contract.
    let path = unsafe { CStr::from_ptr(path) };
    path.to_str()
        .map(PathBuf::from)
        .map_err(|e| DefaultWeatherGenError::invalid_parameter(param_name, &e.to_string()))
}
