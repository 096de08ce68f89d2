use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use super::layout::{ChannelLayout, Column, SensorChannels};
use super::{DataError, PtSeries};

/// Raw temperatures are logged at ten times the real value.
pub const DEFAULT_TEMPERATURE_SCALE: f64 = 10.0;

/// Rows skipped after the header (the units row).
pub const DEFAULT_SKIP_ROWS: usize = 1;

/// Reads pressure/temperature series out of logger CSV exports.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    channels: SensorChannels,
    temperature_scale: f64,
    skip_rows: usize,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new(SensorChannels::default())
    }
}

impl CsvLoader {
    /// Loader for the given sensor channels with the default scale and skip.
    pub fn new(channels: SensorChannels) -> Self {
        Self {
            channels,
            temperature_scale: DEFAULT_TEMPERATURE_SCALE,
            skip_rows: DEFAULT_SKIP_ROWS,
        }
    }

    /// Divide raw temperatures by `scale`.
    pub fn with_temperature_scale(mut self, scale: f64) -> Self {
        self.temperature_scale = scale;
        self
    }

    /// Skip `rows` data rows after the header.
    pub fn with_skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Load a series from a CSV file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<PtSeries, DataError> {
        let path = path.as_ref();
        debug!("Loading {}", path.display());
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    /// Load a series from any CSV reader.
    ///
    /// Header cells are decoded lossily, so exports written in a legacy
    /// code page still resolve; numeric cells must be ASCII.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<PtSeries, DataError> {
        if !self.temperature_scale.is_finite() || self.temperature_scale == 0.0 {
            return Err(DataError::InvalidScale(self.temperature_scale));
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        let layout = self.channels.resolve(&headers)?;
        debug!(
            "Pressure column {} ('{}'), temperature column {} ('{}')",
            layout.pressure.index, layout.pressure.name, layout.temperature.index, layout.temperature.name
        );

        let mut pressure = Vec::new();
        let mut temperature = Vec::new();

        for record in csv_reader.byte_records().skip(self.skip_rows) {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            pressure.push(parse_cell(&record, &layout.pressure, line)?);
            temperature.push(parse_cell(&record, &layout.temperature, line)? / self.temperature_scale);
        }

        let ChannelLayout {
            pressure: pressure_column,
            temperature: temperature_column,
        } = layout;

        debug!("Loaded {} samples", pressure.len());
        Ok(PtSeries::new(pressure, temperature)?.with_labels(pressure_column.name, temperature_column.name))
    }
}

fn parse_cell(record: &csv::ByteRecord, column: &Column, line: u64) -> Result<f64, DataError> {
    let raw = record.get(column.index).ok_or_else(|| DataError::MissingValue {
        column: column.name.clone(),
        line,
    })?;
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    if text.is_empty() {
        return Err(DataError::MissingValue {
            column: column.name.clone(),
            line,
        });
    }
    text.parse::<f64>().map_err(|_| DataError::NonNumeric {
        column: column.name.clone(),
        line,
        value: text.to_string(),
    })
}
