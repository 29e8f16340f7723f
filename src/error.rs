//! Error types for simulation setup.
//!
//! Only construction and configuration can fail. A running tick degrades
//! numerically (clamps, skips) instead of returning an error.

use alloc::string::String;
use core::fmt;

/// Errors raised while building a simulation or editing its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Rest distance must be positive and finite.
    InvalidRestDistance,
    /// Sail width and height must be positive and finite.
    InvalidDimensions,
    /// Mass must be positive and finite.
    InvalidMass,
    /// Timestep must be positive and finite.
    InvalidTimestep,
    /// Hull radius and length must be positive and finite.
    InvalidHull,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// No configuration parameter has this name.
    UnknownParameter(String),
    /// The parameter exists but expects a different kind of value.
    ParameterType { name: &'static str, expected: &'static str },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRestDistance => write!(f, "rest distance must be positive and finite"),
            SimError::InvalidDimensions => write!(f, "sail dimensions must be positive and finite"),
            SimError::InvalidMass => write!(f, "mass must be positive and finite"),
            SimError::InvalidTimestep => write!(f, "timestep must be positive and finite"),
            SimError::InvalidHull => write!(f, "hull radius and length must be positive and finite"),
            SimError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            SimError::UnknownParameter(name) => write!(f, "unknown parameter `{}`", name),
            SimError::ParameterType { name, expected } => {
                write!(f, "parameter `{}` expects a {} value", name, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SimError {}
