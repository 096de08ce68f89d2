//! Sensor-channel to CSV-column mapping.
//!
//! Logger exports place a time stamp and an auxiliary column first, then the
//! pressure transducers, then the thermocouples:
//!
//! ```text
//! col 0   col 1   col 2  col 3  col 4  col 5  col 6  col 7
//! time    step    P1     P2     T1     T2     T3     T4
//! ```
//!
//! so pressure sensor `p` lives at column `p + 1` and temperature sensor `t`
//! at column `t + 3`.

use super::DataError;

/// Column offset added to the pressure sensor number.
pub const PRESSURE_COLUMN_OFFSET: usize = 1;

/// Column offset added to the temperature sensor number.
pub const TEMPERATURE_COLUMN_OFFSET: usize = 3;

/// Which sensors to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorChannels {
    /// Pressure sensor number (1 or 2 on the reference rig)
    pub pressure: usize,
    /// Temperature sensor number (1 to 4 on the reference rig)
    pub temperature: usize,
}

impl Default for SensorChannels {
    fn default() -> Self {
        Self {
            pressure: 1,
            temperature: 1,
        }
    }
}

impl SensorChannels {
    /// Create a channel selection.
    pub fn new(pressure: usize, temperature: usize) -> Self {
        Self {
            pressure,
            temperature,
        }
    }

    /// Zero-based CSV column of the pressure channel.
    pub fn pressure_column(&self) -> usize {
        self.pressure + PRESSURE_COLUMN_OFFSET
    }

    /// Zero-based CSV column of the temperature channel.
    pub fn temperature_column(&self) -> usize {
        self.temperature + TEMPERATURE_COLUMN_OFFSET
    }

    /// Check both channels against a header row and capture their names.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ChannelLayout, DataError> {
        let pressure = Column::resolve(
            headers,
            self.pressure_column(),
            format!("pressure sensor {}", self.pressure),
        )?;
        let temperature = Column::resolve(
            headers,
            self.temperature_column(),
            format!("temperature sensor {}", self.temperature),
        )?;
        Ok(ChannelLayout {
            pressure,
            temperature,
        })
    }
}

/// A header column validated to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Zero-based position in each record
    pub index: usize,
    /// Header text, or a placeholder when the header cell is blank
    pub name: String,
}

impl Column {
    fn resolve<S: AsRef<str>>(headers: &[S], index: usize, channel: String) -> Result<Self, DataError> {
        let header = headers.get(index).ok_or_else(|| DataError::MissingColumn {
            channel: channel.clone(),
            index,
            width: headers.len(),
        })?;
        let name = header.as_ref().trim();
        Ok(Self {
            index,
            name: if name.is_empty() {
                channel
            } else {
                name.to_string()
            },
        })
    }
}

/// Pressure and temperature columns resolved against a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    /// Pressure column
    pub pressure: Column,
    /// Temperature column
    pub temperature: Column,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 8] = ["Time", "Step", "P1", "P2", "T1", "T2", "T3", "T4"];

    #[test]
    fn test_default_channels_map_to_first_sensors() {
        let layout = SensorChannels::default().resolve(&HEADERS).unwrap();
        assert_eq!(layout.pressure.index, 2);
        assert_eq!(layout.pressure.name, "P1");
        assert_eq!(layout.temperature.index, 4);
        assert_eq!(layout.temperature.name, "T1");
    }

    #[test]
    fn test_last_sensors() {
        let layout = SensorChannels::new(2, 4).resolve(&HEADERS).unwrap();
        assert_eq!(layout.pressure.name, "P2");
        assert_eq!(layout.temperature.name, "T4");
    }

    #[test]
    fn test_channel_past_header_is_rejected() {
        let err = SensorChannels::new(1, 5).resolve(&HEADERS).unwrap_err();
        match err {
            DataError::MissingColumn {
                channel,
                index,
                width,
            } => {
                assert_eq!(channel, "temperature sensor 5");
                assert_eq!(index, 8);
                assert_eq!(width, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_header_gets_channel_name() {
        let headers = ["", "", " ", "", "", ""];
        let layout = SensorChannels::new(1, 2).resolve(&headers).unwrap();
        assert_eq!(layout.pressure.name, "pressure sensor 1");
        assert_eq!(layout.temperature.name, "temperature sensor 2");
    }
}
