//! Modular Arithmetic Helpers
//!
//! Small helpers over `num_bigint::BigUint`: underflow-safe modular
//! add/sub/mul, modular inverse via the Extended Euclidean Algorithm, and
//! the closed-form modular square root for primes p ≡ 3 (mod 4).

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;

pub fn mod_add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// Modular subtraction that avoids BigUint underflow
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a_mod = a % m;
    let b_mod = b % m;
    if a_mod >= b_mod {
        a_mod - b_mod
    } else {
        m - (b_mod - a_mod)
    }
}

pub fn mod_mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// Modular inverse: a^(-1) mod m, or `None` when gcd(a, m) != 1
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let a_int = BigInt::from(a % m);
    let m_int = BigInt::from(m.clone());
    let ext = a_int.extended_gcd(&m_int);
    if !ext.gcd.is_one() {
        return None;
    }
    // Shift the Bezout coefficient into [0, m)
    ext.x.mod_floor(&m_int).to_biguint()
}

/// Candidate square root of `a` modulo a prime p ≡ 3 (mod 4)
///
/// Returns a^((p+1)/4) mod p. When `a` is a quadratic residue this is a
/// square root of `a`; when it is not, the returned value satisfies no
/// equation at all. The caller must verify the result by squaring.
pub fn mod_sqrt(a: &BigUint, p: &BigUint) -> BigUint {
    debug_assert_eq!((p % 4u32), BigUint::from(3u32));
    let exponent = (p + 1u32) >> 2;
    a.modpow(&exponent, p)
}
