//! Sensor configuration loading
//!
//! A single-sensor file is a flat table:
//!
//! ```toml
//! address = 0x0A
//! model = "d6t32l01a"
//!
//! [acquisition]
//! max_attempts = 10
//! backoff_ms = 20
//! max_chunk = 256
//! ```
//!
//! A board file lists several sensors as `[[sensor]]` tables with the
//! same keys. Missing keys take their defaults.

use heapless::Vec;
use serde::Deserialize;

use thermopile_core::config::{ConfigError, SensorConfig};
use thermopile_core::log::warn;

/// Maximum sensors in one board file
pub const MAX_SENSORS: usize = 4;

/// Sensors declared in a board file
pub type SensorList = Vec<SensorConfig, MAX_SENSORS>;

#[derive(Deserialize)]
struct BoardFile {
    #[serde(default)]
    sensor: SensorList,
}

/// Parse and validate a single-sensor config
pub fn parse_sensor(input: &str) -> Result<SensorConfig, ConfigError> {
    let config: SensorConfig = toml::from_str(input).map_err(|_| {
        warn!("config: parse failed");
        ConfigError::Parse
    })?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a board file with `[[sensor]]` tables
///
/// Two sensors may not share an address.
pub fn parse_config(input: &str) -> Result<SensorList, ConfigError> {
    let board: BoardFile = toml::from_str(input).map_err(|_| {
        warn!("config: parse failed");
        ConfigError::Parse
    })?;

    for (i, sensor) in board.sensor.iter().enumerate() {
        sensor.validate()?;
        if board.sensor[..i].iter().any(|s| s.address == sensor.address) {
            warn!("config: duplicate address {:#x}", sensor.address);
            return Err(ConfigError::InvalidAddress);
        }
    }
    Ok(board.sensor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sensor() {
        let config = parse_sensor(
            r#"
            address = 0x0B
            model = "d6t32l01a"

            [acquisition]
            max_attempts = 5
            backoff_ms = 50
            max_chunk = 128
            ready_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.address, 0x0B);
        assert_eq!(config.model.as_deref(), Some("d6t32l01a"));
        assert_eq!(config.acquisition.max_attempts, 5);
        assert_eq!(config.acquisition.backoff_ms, 50);
        assert_eq!(config.acquisition.chunk_len(), 128);
        assert_eq!(config.acquisition.ready_ms, Some(250));
    }

    #[test]
    fn test_defaults() {
        let config = parse_sensor("").unwrap();
        assert_eq!(config, SensorConfig::default());

        let config = parse_sensor("model = \"d6t01a\"").unwrap();
        assert_eq!(config.address, 0x0A);
        assert_eq!(config.acquisition.max_attempts, 10);
        assert_eq!(config.acquisition.ready_ms, None);
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(parse_sensor("model = \"d6t99\""), Err(ConfigError::UnknownModel));
        assert_eq!(parse_sensor("address = 0x80"), Err(ConfigError::InvalidAddress));
        assert_eq!(
            parse_sensor("[acquisition]\nmax_attempts = 0"),
            Err(ConfigError::NoAttempts)
        );
        assert_eq!(
            parse_sensor("[acquisition]\nmax_chunk = 300"),
            Err(ConfigError::InvalidChunk)
        );
        assert_eq!(parse_sensor("address = "), Err(ConfigError::Parse));
        assert_eq!(parse_sensor("address = \"ten\""), Err(ConfigError::Parse));
    }

    #[test]
    fn test_board_file() {
        let sensors = parse_config(
            r#"
            [[sensor]]
            address = 0x0A
            model = "d6t32l01a"

            [[sensor]]
            address = 0x0B
            model = "d6t44l06"
            [sensor.acquisition]
            max_attempts = 3
            "#,
        )
        .unwrap();

        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[0].model.as_deref(), Some("d6t32l01a"));
        assert_eq!(sensors[1].address, 0x0B);
        assert_eq!(sensors[1].acquisition.max_attempts, 3);
    }

    #[test]
    fn test_board_file_duplicate_address() {
        let result = parse_config(
            r#"
            [[sensor]]
            model = "d6t01a"

            [[sensor]]
            model = "d6t8l09"
            "#,
        );
        assert_eq!(result, Err(ConfigError::InvalidAddress));
    }

    #[test]
    fn test_board_file_empty() {
        assert!(parse_config("").unwrap().is_empty());
    }
}
