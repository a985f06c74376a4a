use std::{path::PathBuf, time::Duration};

use crate::error::{MazeError, Result};

/// Everything needed to build a [`crate::Maze`] and run the terminal front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    /// Screen position of the top-left corner of cell (0, 0)
    pub origin_x: f64,
    pub origin_y: f64,
    pub num_rows: u16,
    pub num_cols: u16,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Fixed seed for reproducible mazes. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Let the user walk the maze instead of solving it automatically
    pub manual_mode: bool,
    /// Pause between replayed events in the terminal front-end
    pub animation_delay: Duration,
    /// Directory the front-end writes its log file to
    pub log_dir: PathBuf,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            num_rows: 12,
            num_cols: 16,
            cell_width: 50.0,
            cell_height: 50.0,
            seed: None,
            manual_mode: false,
            animation_delay: Duration::from_millis(30),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl MazeConfig {
    /// Parses command line flags on top of the defaults.
    /// The iterator must not include the executable name.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut config = MazeConfig::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cols" => config.num_cols = parse_value(&arg, args.next())?,
                "--rows" => config.num_rows = parse_value(&arg, args.next())?,
                "--seed" => config.seed = Some(parse_value(&arg, args.next())?),
                "--delay-ms" => {
                    config.animation_delay = Duration::from_millis(parse_value(&arg, args.next())?)
                }
                "--log-dir" => {
                    let dir = args
                        .next()
                        .ok_or_else(|| MazeError::Config(format!("{} expects a value", arg)))?;
                    config.log_dir = PathBuf::from(dir);
                }
                "--manual" => config.manual_mode = true,
                other => return Err(MazeError::Config(format!("unknown argument '{}'", other))),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_cols == 0 || self.num_rows == 0 {
            return Err(MazeError::InvalidDimension {
                num_cols: self.num_cols,
                num_rows: self.num_rows,
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value = value.ok_or_else(|| MazeError::Config(format!("{} expects a value", flag)))?;
    value
        .parse::<T>()
        .map_err(|_| MazeError::Config(format!("invalid value '{}' for {}", value, flag)))
}
