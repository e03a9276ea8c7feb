//! Dual-EC Generator State Machine
//!
//! One generation step advances the hidden seed through two scalar
//! multiplications: s = (seed·P).x becomes the new seed, and the visible
//! output is the truncation of (s·Q).x. The truncation widths live in
//! [`Truncation`] and are derived from the curve's field width rather than
//! hard-coded, so the same machinery runs on curves of other sizes.
//!
//! The state transition is also exposed as the pure function [`step`], so
//! the machine can be tested without hidden mutable state.

use num_bigint::BigUint;
use num_traits::One;

use crate::elliptic_curve::{Point, PrimeCurve};
use crate::error::Error;

/// Byte widths governing output truncation and the observation split
///
/// For P-256 this is (32, 30, 4): the generator reveals the low 30 bytes of
/// each 32-byte x-coordinate, an observer sees the top 4 bytes of the second
/// output, and the remaining 26 bytes are what the attack predicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation {
    /// Width of a field element in bytes
    pub field_bytes: usize,
    /// Bytes of each x-coordinate the generator reveals
    pub output_bytes: usize,
    /// Observed top bytes of the second output, used as the verification
    /// checksum during state recovery
    pub verify_bytes: usize,
}

impl Truncation {
    /// Derive truncation widths from a curve's field width
    ///
    /// The generator discards the top two bytes of each x-coordinate, so the
    /// hidden portion the attack must search is always 16 bits.
    pub fn for_curve(curve: &PrimeCurve, verify_bytes: usize) -> Self {
        let field_bytes = curve.field_bytes();
        assert!(field_bytes > 2, "field too narrow to truncate");
        let output_bytes = field_bytes - 2;
        assert!(
            verify_bytes < output_bytes,
            "verification bytes must leave something to predict"
        );
        Self {
            field_bytes,
            output_bytes,
            verify_bytes,
        }
    }

    /// Bytes of the second output the attack predicts
    pub fn predict_bytes(&self) -> usize {
        self.output_bytes - self.verify_bytes
    }

    /// Width of the discarded high portion of each x-coordinate
    pub fn hidden_bits(&self) -> usize {
        8 * (self.field_bytes - self.output_bytes)
    }

    /// Low `output_bytes` bytes of a field element: the visible output
    pub fn take_output(&self, r: &BigUint) -> BigUint {
        r & &mask(8 * self.output_bytes)
    }

    /// Top `verify_bytes` bytes of an output
    pub fn take_high(&self, output: &BigUint) -> BigUint {
        output >> (8 * self.predict_bytes())
    }

    /// Low `predict_bytes` bytes of an output
    pub fn take_low(&self, output: &BigUint) -> BigUint {
        output & &mask(8 * self.predict_bytes())
    }
}

fn mask(bits: usize) -> BigUint {
    (BigUint::one() << bits) - 1u32
}

/// One Dual-EC generation step as a pure state transition
///
/// Returns the new seed and the truncated output. The seed ranges the
/// generator visits never land on infinity for honest parameters; if a
/// degenerate seed does, the error is surfaced instead of panicking.
pub fn step(
    curve: &PrimeCurve,
    p: &Point,
    q: &Point,
    trunc: &Truncation,
    seed: &BigUint,
) -> Result<(BigUint, BigUint), Error> {
    let s = curve
        .scalar_mul(p, seed)
        .x()
        .cloned()
        .ok_or(Error::PointAtInfinity)?;
    let r = curve
        .scalar_mul(q, &s)
        .x()
        .cloned()
        .ok_or(Error::PointAtInfinity)?;
    let output = trunc.take_output(&r);
    Ok((s, output))
}

/// The Dual-EC generator: owns the mutable seed, advances it on every call
pub struct DualEc<'a> {
    curve: &'a PrimeCurve,
    p: &'a Point,
    q: &'a Point,
    trunc: Truncation,
    seed: BigUint,
}

impl<'a> DualEc<'a> {
    pub fn new(
        curve: &'a PrimeCurve,
        p: &'a Point,
        q: &'a Point,
        trunc: Truncation,
        seed: BigUint,
    ) -> Self {
        Self {
            curve,
            p,
            q,
            trunc,
            seed,
        }
    }

    /// Produce the next pseudo-random output and advance the seed
    pub fn generate(&mut self) -> Result<BigUint, Error> {
        let (next_seed, output) = step(self.curve, self.p, self.q, &self.trunc, &self.seed)?;
        self.seed = next_seed;
        Ok(output)
    }
}
