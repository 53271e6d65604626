use std::fmt;

/// Errors raised while assembling a [`crate::Dataset`]
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// `treatment` must be 0 or 1
    InvalidTreatment { row: usize, value: u8 },
    /// Only the 2014 and 2016 vintages exist
    InvalidYear(u16),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::InvalidTreatment { row, value } => {
                write!(f, "row {row}: treatment must be 0 or 1, got {value}")
            }
            DatasetError::InvalidYear(year) => {
                write!(f, "survey year must be 2014 or 2016, got {year}")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Precondition failures at the projection boundary.
///
/// Projections refuse to compute on invalid input rather than returning
/// nonsensical numbers; fallbacks for unmapped categories never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    UnknownIntervention(String),
    /// `program_cost * headcount` is zero, so ROI is undefined
    ZeroCostBasis,
    InvalidPolicy {
        constant: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => write!(f, "{parameter} = {value} is outside [{min}, {max}]"),
            ParameterError::UnknownIntervention(name) => {
                write!(f, "unknown intervention {name:?}")
            }
            ParameterError::ZeroCostBasis => {
                write!(f, "program cost basis is zero; ROI is undefined")
            }
            ParameterError::InvalidPolicy {
                constant,
                value,
                reason,
            } => write!(f, "invalid policy constant {constant} = {value}: {reason}"),
        }
    }
}

impl std::error::Error for ParameterError {}

pub type Result<T> = std::result::Result<T, ParameterError>;
