/*
 * Error Module
 *
 * Errors that can surface from the particle flow simulation. The simulation
 * itself never fails on numeric input; the only fallible operations are
 * mounting onto a host, parsing colours and loading config files.
 */

use std::fmt;

use crate::driver::LoopState;

#[derive(Debug)]
pub enum FlowError {
    /// The host could not provide a drawable surface.
    SurfaceUnavailable,
    /// A lifecycle action was requested in a state that does not allow it.
    InvalidTransition { state: LoopState, action: &'static str },
    /// A colour string was not `#rgb` or `#rrggbb`.
    InvalidColor(String),
    /// A config file could not be read.
    ConfigRead(std::io::Error),
    /// A config file was not valid JSON for `SimulationConfig`.
    ConfigParse(serde_json::Error),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::SurfaceUnavailable => write!(f, "No drawable surface available; the animation loop was not started"),
            FlowError::InvalidTransition { state, action } => {
                write!(f, "Cannot {} while the loop is {:?}", action, state)
            }
            FlowError::InvalidColor(value) => write!(f, "Invalid colour '{}': expected #rgb or #rrggbb", value),
            FlowError::ConfigRead(e) => write!(f, "Failed to read config file: {}", e),
            FlowError::ConfigParse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for FlowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlowError::ConfigRead(e) => Some(e),
            FlowError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlowError {
    fn from(e: std::io::Error) -> Self {
        FlowError::ConfigRead(e)
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(e: serde_json::Error) -> Self {
        FlowError::ConfigParse(e)
    }
}
