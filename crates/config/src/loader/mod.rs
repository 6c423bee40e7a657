//! Settings loader: reads the YAML file, overlays it onto the defaults and
//! validates the result.
//!
//! ```text
//! CONFIG_FILE / explicit path
//!     → read bytes                     (ConfigError::Read)
//!     → parse YAML + merge on defaults (ConfigError::Parse)
//!     → validation::validate_settings  (ConfigError::Validation)
//!     → Settings (read-only from here on)
//! ```

mod core;
mod merge;


pub use self::core::{parse_settings, SettingsLoader, CONFIG_FILE_ENV};
pub use self::merge::overlay;
