//! State Recovery and Output Prediction
//!
//! Given the trapdoor scalar d and 34 observed bytes spanning two
//! consecutive generator outputs (the full first output plus the top bytes
//! of the second), recover the generator's hidden intermediate state and
//! predict the unobserved remainder of the second output.
//!
//! The first output is the low bytes of r₁ = (s₁·Q).x, so its discarded
//! high bits are unknown. The search enumerates every value of that hidden
//! field, reconstructs the candidate r₁, and prunes with the curve
//! membership test: only x-coordinates that lift to a point can be s₁·Q.
//! For a surviving candidate, d·(s₁·Q) = s₁·(d·Q) = s₁·P, whose
//! x-coordinate is exactly the seed the generator derives next. Running one
//! more half-step forward gives the full second output; its top bytes are
//! checked against the observation, and on a match the low bytes are the
//! prediction.
//!
//! Each guess is independent and side-effect-free, so the search fans out
//! across a rayon pool; `find_map_first` keeps the deterministic
//! lowest-candidate tie-break of a sequential scan.

use num_bigint::BigUint;
use rayon::prelude::*;

use crate::backdoor::BackdoorParameters;
use crate::dualec::Truncation;
use crate::elliptic_curve::PrimeCurve;
use crate::error::Error;

/// The 34 observed bytes: one full output and the top of the next
#[derive(Clone, Debug)]
pub struct Observation {
    /// The complete first output (low `output_bytes` bytes of r₁)
    pub first: BigUint,
    /// The top `verify_bytes` bytes of the second output
    pub second_high: BigUint,
}

impl Observation {
    /// Build an observation from two consecutive raw generator outputs,
    /// keeping only the part of the second an eavesdropper saw
    pub fn from_outputs(trunc: &Truncation, first: &BigUint, second: &BigUint) -> Self {
        Self {
            first: first.clone(),
            second_high: trunc.take_high(second),
        }
    }
}

/// Recover the hidden state and predict the unobserved low bytes of the
/// second output
///
/// Exhausts the full hidden-bits range (65536 candidates for the 16-bit
/// field) and returns the prediction from the lowest verified candidate, or
/// [`Error::SearchExhausted`] if none verifies. Exhaustion essentially never
/// happens with a genuine observation and matching (P, Q, d); it is the
/// expected outcome when d does not actually relate P and Q.
pub fn predict(
    curve: &PrimeCurve,
    params: &BackdoorParameters,
    trunc: &Truncation,
    observation: &Observation,
) -> Result<BigUint, Error> {
    let candidates = 1u64 << trunc.hidden_bits();
    (0..candidates)
        .into_par_iter()
        .find_map_first(|high_bits| check_candidate(curve, params, trunc, observation, high_bits))
        .ok_or(Error::SearchExhausted)
}

/// Test one value of the hidden high bits; `Some` carries the prediction
fn check_candidate(
    curve: &PrimeCurve,
    params: &BackdoorParameters,
    trunc: &Truncation,
    observation: &Observation,
    high_bits: u64,
) -> Option<BigUint> {
    // Candidate full-width r₁: guessed high bits above the observed bytes
    let guess = (BigUint::from(high_bits) << (8 * trunc.output_bytes)) | &observation.first;

    // Membership test: wrong guesses mostly fail to lift to a curve point
    let point = curve.lift_x(&guess)?;

    // d·(s₁·Q) = s₁·P, so this x-coordinate is the generator's next seed
    let state = curve.scalar_mul(&point, &params.d).x().cloned()?;

    // Forward half-step: the full second output under this candidate
    let r = curve.scalar_mul(&params.q, &state).x().cloned()?;
    let next_output = trunc.take_output(&r);

    if trunc.take_high(&next_output) == observation.second_high {
        Some(trunc.take_low(&next_output))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dualec::DualEc;

    #[test]
    fn test_round_trip_recovers_dropped_bytes() {
        let curve = PrimeCurve::p61();
        let params = BackdoorParameters::from_secret(&curve, BigUint::from(3u32)).unwrap();
        let trunc = Truncation::for_curve(&curve, 3);

        let seed = BigUint::from(0x0123_4567_89abu64);
        let mut generator = DualEc::new(&curve, &params.p, &params.q, trunc, seed);
        let bits1 = generator.generate().unwrap();
        let bits2 = generator.generate().unwrap();

        let observation = Observation::from_outputs(&trunc, &bits1, &bits2);
        let predicted = predict(&curve, &params, &trunc, &observation).unwrap();
        assert_eq!(predicted, trunc.take_low(&bits2));
    }

    #[test]
    fn test_true_high_bits_candidate_verifies() {
        // Bypass the search: recompute the genuine r1 and feed its actual
        // high bits straight into the candidate check.
        let curve = PrimeCurve::p61();
        let params = BackdoorParameters::from_secret(&curve, BigUint::from(7u32)).unwrap();
        let trunc = Truncation::for_curve(&curve, 3);

        let seed = BigUint::from(424_242u64);
        let (s1, bits1) = crate::dualec::step(&curve, &params.p, &params.q, &trunc, &seed).unwrap();
        let (_, bits2) = crate::dualec::step(&curve, &params.p, &params.q, &trunc, &s1).unwrap();

        let r1 = curve
            .scalar_mul(&params.q, &s1)
            .x()
            .cloned()
            .unwrap();
        let true_high = u64::try_from(&r1 >> (8 * trunc.output_bytes)).unwrap();

        let observation = Observation::from_outputs(&trunc, &bits1, &bits2);
        let prediction = check_candidate(&curve, &params, &trunc, &observation, true_high);
        assert_eq!(prediction, Some(trunc.take_low(&bits2)));
    }

    #[test]
    fn test_wrong_secret_exhausts_search() {
        let curve = PrimeCurve::p61();
        let params = BackdoorParameters::from_secret(&curve, BigUint::from(3u32)).unwrap();
        let trunc = Truncation::for_curve(&curve, 3);

        let seed = BigUint::from(0xdead_beefu64);
        let mut generator = DualEc::new(&curve, &params.p, &params.q, trunc, seed);
        let bits1 = generator.generate().unwrap();
        let bits2 = generator.generate().unwrap();
        let observation = Observation::from_outputs(&trunc, &bits1, &bits2);

        // Same P and Q, but a d that does not relate them
        let wrong = BackdoorParameters {
            p: params.p.clone(),
            q: params.q.clone(),
            d: BigUint::from(11u32),
        };
        assert_eq!(
            predict(&curve, &wrong, &trunc, &observation),
            Err(Error::SearchExhausted)
        );
    }
}
