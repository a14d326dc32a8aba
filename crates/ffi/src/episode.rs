use weather_gen_core::{DownfallCondition, DownfallKind, DownfallKindPolicy, Episode, Severity};

use crate::error::{DefaultWeatherGenError, WeatherGenErrorCode};
use crate::helpers::{track_error, track_result};
use crate::instance::WeatherGenInstance;

/// Intensity level, shared by cloud cover and downfall.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherGenSeverity {
    Absent = 0,
    Light = 1,
    Moderate = 2,
    Heavy = 3,
}

impl From<Severity> for WeatherGenSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Absent => WeatherGenSeverity::Absent,
            Severity::Light => WeatherGenSeverity::Light,
            Severity::Moderate => WeatherGenSeverity::Moderate,
            Severity::Heavy => WeatherGenSeverity::Heavy,
        }
    }
}

/// What falls from the sky.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherGenDownfallKind {
    None = 0,
    Rain = 1,
    Hail = 2,
    Snow = 3,
}

impl From<DownfallKind> for WeatherGenDownfallKind {
    fn from(kind: DownfallKind) -> Self {
        match kind {
            DownfallKind::None => WeatherGenDownfallKind::None,
            DownfallKind::Rain => WeatherGenDownfallKind::Rain,
            DownfallKind::Hail => WeatherGenDownfallKind::Hail,
            DownfallKind::Snow => WeatherGenDownfallKind::Snow,
        }
    }
}

/// C-compatible weather episode
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherEpisode {
    pub cloudiness: WeatherGenSeverity,
    pub downfall_severity: WeatherGenSeverity,
    pub downfall_kind: WeatherGenDownfallKind,
    pub thunder: bool,
    /// Horizontal wind, x component
    pub wind_x: f32,
    /// Horizontal wind, y component
    pub wind_y: f32,
    /// How long the episode lasts, in the unit of the generator's mean duration
    pub duration: f32,
}

impl From<&Episode> for WeatherEpisode {
    fn from(episode: &Episode) -> Self {
        let condition = episode.condition();
        let downfall = condition.downfall();
        let wind = condition.wind();
        Self {
            cloudiness: condition.cloudiness().into(),
            downfall_severity: downfall.severity().into(),
            downfall_kind: downfall.kind().into(),
            thunder: downfall.has_thunder(),
            wind_x: wind.x,
            wind_y: wind.y,
            duration: episode.duration(),
        }
    }
}

fn severity_from_rank(rank: u8) -> Result<Severity, DefaultWeatherGenError> {
    Severity::from_rank(usize::from(rank)).ok_or_else(|| {
        DefaultWeatherGenError::invalid_parameter("severity", &format!("must be 0-3, got {rank}"))
    })
}

/// Advance the generator and write the next episode to `out_episode`.
///
/// Returns
/// - `Ok` (0) with `out_episode` filled
/// - `NullPointer` if either pointer is null
/// - `LockPoisoned` if another thread panicked while holding the generator
/// - `DegenerateDistribution` on an internal sampling failure; the generator
///   state is unchanged
///
/// # Safety
/// `instance` must come from `weather_gen_new` or `weather_gen_load_state` and
/// not be destroyed; `out_episode` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn weather_gen_next_episode(
    instance: *const WeatherGenInstance,
    out_episode: *mut WeatherEpisode,
) -> WeatherGenErrorCode {
    if instance.is_null() {
        return track_error(&DefaultWeatherGenError::null_pointer("instance"));
    }
    if out_episode.is_null() {
        return track_error(&DefaultWeatherGenError::null_pointer("out_episode"));
    }

    // SAFETY: non-null checked above; validity is the caller's contract.
    let instance = unsafe { &*instance };
    let result = instance.lock().and_then(|mut generator| {
        generator
            .next_episode()
            .map_err(DefaultWeatherGenError::from)
    });

    match track_result(result) {
        Ok(episode) => {
            unsafe {
                *out_episode = WeatherEpisode::from(&episode);
            }
            WeatherGenErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Pick the downfall kind for a severity at an air temperature (°C).
///
/// Uses the default temperature policy: snow at or below 0 °C, hail for heavy
/// downfall at or below 4 °C, rain otherwise. Severity 0 yields `None`.
///
/// # Parameters
/// - `severity`: downfall severity rank, 0 (absent) to 3 (heavy)
/// - `thunder`: whether the downfall comes with thunder; must be false for severity 0
///
/// Returns
/// - `Ok` (0) with `out_kind` set
/// - `NullPointer` if `out_kind` is null
/// - `InvalidParameter` if `severity` is above 3
/// - `InvalidCombination` if thunder is requested without downfall
///
/// # Safety
/// `out_kind` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn weather_gen_classify_downfall(
    severity: u8,
    thunder: bool,
    temperature: f32,
    out_kind: *mut WeatherGenDownfallKind,
) -> WeatherGenErrorCode {
    if out_kind.is_null() {
        return track_error(&DefaultWeatherGenError::null_pointer("out_kind"));
    }

    let result = severity_from_rank(severity).and_then(|severity| {
        let kind = if severity.is_absent() {
            DownfallKind::None
        } else {
            DownfallKind::Rain
        };
        let downfall = DownfallCondition::new(severity, kind, thunder)?;
        DownfallKindPolicy::temperature()
            .classify(downfall, temperature)
            .map_err(DefaultWeatherGenError::from)
    });

    match track_result(result) {
        Ok(downfall) => {
            unsafe {
                *out_kind = downfall.kind().into();
            }
            WeatherGenErrorCode::Ok
        }
        Err(code) => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{weather_gen_destroy, weather_gen_new};
    use std::ptr;
    use weather_gen_core::WeatherGenerator;

    fn create(seed: u64, mean_duration: f32) -> *mut WeatherGenInstance {
        let mut instance = ptr::null_mut();
        let code = unsafe { weather_gen_new(seed, mean_duration, &mut instance) };
        assert_eq!(code, WeatherGenErrorCode::Ok);
        instance
    }

    fn next(instance: *const WeatherGenInstance) -> WeatherEpisode {
        let mut episode = WeatherEpisode {
            cloudiness: WeatherGenSeverity::Absent,
            downfall_severity: WeatherGenSeverity::Absent,
            downfall_kind: WeatherGenDownfallKind::None,
            thunder: false,
            wind_x: 0.0,
            wind_y: 0.0,
            duration: 0.0,
        };
        let code = unsafe { weather_gen_next_episode(instance, &mut episode) };
        assert_eq!(code, WeatherGenErrorCode::Ok);
        episode
    }

    #[test]
    fn test_next_episode_matches_core_generator() {
        let instance = create(12354, 3600.0);
        let mut reference = WeatherGenerator::new(12354, 3600.0).unwrap();

        for _ in 0..50 {
            let expected = WeatherEpisode::from(&reference.next_episode().unwrap());
            assert_eq!(next(instance), expected);
        }

        unsafe {

            weather_gen_destroy(instance);

        }
    }

    #[test]
    fn test_clear_sky_never_rains() {
        let instance = create(7, 10.0);
        for _ in 0..500 {
            let episode = next(instance);
            assert!(episode.duration > 0.0);
            if episode.cloudiness == WeatherGenSeverity::Absent {
                assert_eq!(episode.downfall_kind, WeatherGenDownfallKind::None);
            }
        }
        unsafe {
            weather_gen_destroy(instance);
        }
    }

    #[test]
    fn test_next_episode_null_pointers() {
        let mut episode = WeatherEpisode::from(
            &WeatherGenerator::new(1, 1.0).unwrap().next_episode().unwrap(),
        );
        let code = unsafe { weather_gen_next_episode(ptr::null(), &mut episode) };
        assert_eq!(code, WeatherGenErrorCode::NullPointer);

        let instance = create(1, 1.0);
        let code = unsafe { weather_gen_next_episode(instance, ptr::null_mut()) };
        assert_eq!(code, WeatherGenErrorCode::NullPointer);
        unsafe {
            weather_gen_destroy(instance);
        }
    }

    #[test]
    fn test_classify_downfall() {
        let mut kind = WeatherGenDownfallKind::None;

        let code = unsafe { weather_gen_classify_downfall(1, false, -2.0, &mut kind) };
        assert_eq!(code, WeatherGenErrorCode::Ok);
        assert_eq!(kind, WeatherGenDownfallKind::Snow);

        let code = unsafe { weather_gen_classify_downfall(3, true, 3.0, &mut kind) };
        assert_eq!(code, WeatherGenErrorCode::Ok);
        assert_eq!(kind, WeatherGenDownfallKind::Hail);

        let code = unsafe { weather_gen_classify_downfall(0, false, 20.0, &mut kind) };
        assert_eq!(code, WeatherGenErrorCode::Ok);
        assert_eq!(kind, WeatherGenDownfallKind::None);
    }

    #[test]
    fn test_classify_downfall_rejects_bad_input() {
        let mut kind = WeatherGenDownfallKind::None;
        let code = unsafe { weather_gen_classify_downfall(4, false, 0.0, &mut kind) };
        assert_eq!(code, WeatherGenErrorCode::InvalidParameter);

        let code = unsafe { weather_gen_classify_downfall(0, true, 0.0, &mut kind) };
        assert_eq!(code, WeatherGenErrorCode::InvalidCombination);
    }
}
