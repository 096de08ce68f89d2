//! # Pressure/Temperature Data
//!
//! Typed storage for the two logger channels the analysis consumes, and the
//! CSV loader that fills it.
//!
//! - [`SensorChannels`] names which pressure and temperature sensors to read
//!   and maps them to CSV columns; [`SensorChannels::resolve`] validates the
//!   mapping against the header before any row is parsed.
//! - [`CsvLoader`] skips the units row, parses both columns as `f64` and
//!   rescales temperature.
//! - [`PtSeries`] holds the result immutably; [`Window`] addresses a clipped
//!   sub-range of it.
//!
//! ```rust,no_run
//! use hlv::data::{CsvLoader, SensorChannels};
//!
//! let series = CsvLoader::new(SensorChannels::new(1, 2)).load_path("run_07.csv")?;
//! let window = series.window(500, 100);
//! println!("{} samples, window {}..{}", series.len(), window.start(), window.end());
//! # Ok::<(), hlv::data::DataError>(())
//! ```

mod error;
mod layout;
mod loader;
mod series;

pub use error::DataError;
pub use layout::{
    ChannelLayout, Column, SensorChannels, PRESSURE_COLUMN_OFFSET, TEMPERATURE_COLUMN_OFFSET,
};
pub use loader::{CsvLoader, DEFAULT_SKIP_ROWS, DEFAULT_TEMPERATURE_SCALE};
pub use series::{PtSeries, Sample, Window};
