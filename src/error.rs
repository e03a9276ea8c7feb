//! Crate error types

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The d*Q == P post-condition failed (or d was not invertible).
    /// Indicates a broken arithmetic provider, not a user error.
    BackdoorConstruction(String),
    /// An x-coordinate was requested from the point at infinity.
    PointAtInfinity,
    /// No candidate in the full hidden-bits range produced a verified
    /// prediction.
    SearchExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackdoorConstruction(s) => {
                write!(f, "Backdoor construction failed: {}", s)
            }
            Error::PointAtInfinity => {
                write!(f, "Point at infinity has no x-coordinate")
            }
            Error::SearchExhausted => {
                write!(f, "State recovery failed: no candidate verified")
            }
        }
    }
}

impl std::error::Error for Error {}
