//! Backdoored Dual-EC Parameter Construction
//!
//! Produces the generator's two public points with a hidden relationship:
//! P is the curve's base point, d is a secret scalar, and Q = d⁻¹·P with the
//! inverse taken modulo the group order, so that P = d·Q. Whoever knows d
//! can run the state-recovery attack in [`crate::predictor`].

use num_bigint::BigUint;
use rand::RngCore;

use crate::elliptic_curve::{Point, PrimeCurve};
use crate::error::Error;
use crate::modular::mod_inverse;

/// The trapdoor triple (P, Q, d) with P = d·Q
#[derive(Clone, Debug)]
pub struct BackdoorParameters {
    pub p: Point,
    pub q: Point,
    pub d: BigUint,
}

impl BackdoorParameters {
    /// Construct backdoored parameters with a freshly sampled secret scalar
    pub fn generate<R: RngCore>(curve: &PrimeCurve, rng: &mut R) -> Result<Self, Error> {
        let d = random_scalar(rng, &curve.n);
        Self::from_secret(curve, d)
    }

    /// Construct backdoored parameters from a caller-chosen secret scalar
    ///
    /// The scalar must be coprime to the group order. The d·Q == P
    /// post-condition is checked once; a violation means the modular-inverse
    /// or curve arithmetic is broken, and the construction aborts.
    pub fn from_secret(curve: &PrimeCurve, d: BigUint) -> Result<Self, Error> {
        let e = mod_inverse(&d, &curve.n).ok_or_else(|| {
            Error::BackdoorConstruction(
                "secret scalar is not invertible modulo the group order".to_string(),
            )
        })?;
        let p = curve.g.clone();
        let q = curve.scalar_mul(&p, &e);
        if curve.scalar_mul(&q, &d) != p {
            return Err(Error::BackdoorConstruction(
                "d*Q != P after construction".to_string(),
            ));
        }
        Ok(Self { p, q, d })
    }
}

/// Sample a uniform scalar in [2, n) by masked rejection sampling
fn random_scalar<R: RngCore>(rng: &mut R, n: &BigUint) -> BigUint {
    let two = BigUint::from(2u32);
    let bit_len = n.bits();
    let byte_len = bit_len.div_ceil(8) as usize;
    let top_bits = bit_len % 8;
    let top_mask: u8 = if top_bits == 0 {
        0xFF
    } else {
        (1u8 << top_bits) - 1
    };

    let mut bytes = vec![0u8; byte_len];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= top_mask;
        let candidate = BigUint::from_bytes_be(&bytes);
        if candidate >= two && candidate < *n {
            return candidate;
        }
    }
}
