//! C ABI for the weather generator.
//!
//! Hosts create an opaque [`WeatherGenInstance`], poll it for
//! [`WeatherEpisode`]s and destroy it when done. Every fallible function
//! returns a [`WeatherGenErrorCode`]; the matching message is available from
//! `weather_gen_get_last_error` on the same thread.
//!
//! The header `WeatherGenFFI.h` is generated by `cbindgen` at build time.

mod episode;
mod error;
mod helpers;
mod instance;
mod persistence;

pub use episode::{
    weather_gen_classify_downfall, weather_gen_next_episode, WeatherEpisode,
    WeatherGenDownfallKind, WeatherGenSeverity,
};
pub use error::{weather_gen_get_last_error, weather_gen_get_last_error_code, WeatherGenErrorCode};
pub use instance::{weather_gen_destroy, weather_gen_new, WeatherGenInstance};
pub use persistence::{weather_gen_load_state, weather_gen_save_state};
