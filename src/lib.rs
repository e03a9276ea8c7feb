//! Dual-EC Kleptographic Backdoor Demonstration
//!
//! This library implements the classic state-recovery attack on the Dual
//! Elliptic Curve pseudo-random generator: whoever chooses the generator's
//! two public points P and Q with a hidden relationship P = d*Q can, from a
//! 34-byte observation spanning two consecutive outputs, recover the
//! generator's internal state and predict all remaining output.

/// Backdoored parameter construction (P = d*Q)
pub mod backdoor;
/// The Dual-EC generator state machine and its truncation rules
pub mod dualec;
/// Elliptic curve groups over prime fields
pub mod elliptic_curve;
/// Crate error types
pub mod error;
/// Modular arithmetic helpers (inverse, square root)
pub mod modular;
/// State recovery and output prediction from a partial observation
pub mod predictor;

pub use backdoor::BackdoorParameters;
pub use dualec::{step, DualEc, Truncation};
pub use elliptic_curve::{Point, PrimeCurve};
pub use error::Error;
pub use predictor::{predict, Observation};
