/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub motion: MotionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorConfig {
    pub n_floors: u8,
    pub avg_weight: f64,
    pub max_load: f64,
    #[serde(default = "default_load_epsilon")]
    pub load_epsilon: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub shaft_height: f64,
    pub cab_speed: f64,
    pub tick_interval: u64,
    pub return_dwell: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            elevator: ElevatorConfig {
                n_floors: 6,
                avg_weight: 70.0,
                max_load: 600.0,
                load_epsilon: default_load_epsilon(),
            },
            motion: MotionConfig {
                shaft_height: 600.0,
                cab_speed: 3.0,
                tick_interval: 40,
                return_dwell: 5000,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

fn default_load_epsilon() -> f64 {
    1e-3
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let elevator = &self.elevator;
        let motion = &self.motion;

        if elevator.n_floors < 2 {
            return Err(ConfigError::Invalid(format!(
                "n_floors must be at least 2, got {}",
                elevator.n_floors
            )));
        }
        if !(elevator.avg_weight > 0.0) || !(elevator.max_load > 0.0) {
            return Err(ConfigError::Invalid(
                "avg_weight and max_load must be positive".to_string(),
            ));
        }
        if !(elevator.load_epsilon >= 0.0) {
            return Err(ConfigError::Invalid(
                "load_epsilon must not be negative".to_string(),
            ));
        }
        if !(motion.shaft_height > 0.0) || !(motion.cab_speed > 0.0) {
            return Err(ConfigError::Invalid(
                "shaft_height and cab_speed must be positive".to_string(),
            ));
        }
        if motion.tick_interval == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
