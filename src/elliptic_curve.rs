//! Elliptic Curve Groups over Prime Fields
//!
//! Affine short Weierstrass arithmetic (y² = x³ + ax + b over F_p) with the
//! operations the backdoor demonstration needs: point addition, double-and-add
//! scalar multiplication, on-curve membership, and `lift_x` (recovering a
//! point from an x-coordinate, or reporting that none exists).
//!
//! `PrimeCurve` is parameter-driven: the fixed P-256 instance is just one
//! constructor, and tests instantiate small curves the same way.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;

use crate::modular::{mod_add, mod_inverse, mod_mul, mod_sqrt, mod_sub};

/// A point on an elliptic curve
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Point {
    /// The point at infinity (identity element)
    Infinity,
    /// A point with affine coordinates (x, y)
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "O (point at infinity)"),
            Point::Affine { x, y } => write!(f, "({:x}, {:x})", x, y),
        }
    }
}

/// An elliptic curve y² = x³ + ax + b over F_p with a distinguished base
/// point of known group order
#[derive(Clone, Debug)]
pub struct PrimeCurve {
    /// Field prime
    pub p: BigUint,
    /// Curve coefficient a
    pub a: BigUint,
    /// Curve coefficient b
    pub b: BigUint,
    /// Base point (generator)
    pub g: Point,
    /// Group order
    pub n: BigUint,
}

fn hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("valid hex constant")
}

impl PrimeCurve {
    pub fn new(p: BigUint, a: BigUint, b: BigUint, g: Point, n: BigUint) -> Self {
        // 4a³ + 27b² must be non-zero mod p, otherwise the curve is singular
        let a_cubed = mod_mul(&a, &mod_mul(&a, &a, &p), &p);
        let b_squared = mod_mul(&b, &b, &p);
        let discriminant = mod_add(
            &mod_mul(&BigUint::from(4u32), &a_cubed, &p),
            &mod_mul(&BigUint::from(27u32), &b_squared, &p),
            &p,
        );
        assert!(
            !discriminant.is_zero(),
            "Curve is singular (discriminant is zero)"
        );
        let curve = Self { p, a, b, g, n };
        assert!(
            curve.is_on_curve(&curve.g),
            "Base point is not on the curve"
        );
        curve
    }

    /// NIST P-256 (secp256r1) with its standard base point
    pub fn p256() -> Self {
        let p = hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
        let a = &p - 3u32;
        let b = hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
        let g = Point::Affine {
            x: hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
            y: hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        };
        let n = hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
        Self::new(p, a, b, g, n)
    }

    /// A 61-bit demonstration curve: y² = x³ + x over F_(2^61 − 1)
    ///
    /// Supersingular since p = 3 mod 4, so the group order is exactly
    /// p + 1 = 2^61 without any point counting. The group is cyclic of
    /// 2-power order, so the base point is chosen by lifting ascending
    /// x-coordinates until one verifiably has order above 2^57; a
    /// small-order base point would let scalars annihilate intermediate
    /// states. Useful wherever the full-size curve is too slow.
    pub fn p61() -> Self {
        let p = (BigUint::one() << 61u32) - 1u32;
        let a = BigUint::one();
        let b = BigUint::zero();
        let n = BigUint::one() << 61u32;
        let stub = Self {
            p: p.clone(),
            a: a.clone(),
            b: b.clone(),
            g: Point::Infinity,
            n: n.clone(),
        };
        let mut x = BigUint::one();
        let g = loop {
            if let Some(point) = stub.lift_x(&x) {
                if !stub.scalar_mul(&point, &(BigUint::one() << 57u32)).is_infinity() {
                    break point;
                }
            }
            x += 1u32;
        };
        Self::new(p, a, b, g, n)
    }

    /// Number of bytes needed to represent a field element
    pub fn field_bytes(&self) -> usize {
        self.p.bits().div_ceil(8) as usize
    }

    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                let lhs = mod_mul(y, y, &self.p);
                lhs == self.rhs_of_equation(x)
            }
        }
    }

    /// x³ + ax + b mod p
    fn rhs_of_equation(&self, x: &BigUint) -> BigUint {
        let x_cubed = mod_mul(x, &mod_mul(x, x, &self.p), &self.p);
        mod_add(&mod_add(&x_cubed, &mod_mul(&self.a, x, &self.p), &self.p), &self.b, &self.p)
    }

    /// The point with x-coordinate `x`, if the curve has one
    ///
    /// Computes y² = x³ + ax + b, takes the candidate square root, and
    /// accepts only if squaring the candidate reproduces y² (the square
    /// root routine returns garbage for non-residues). Which of the two
    /// roots comes back is unspecified; both share the x-coordinate.
    pub fn lift_x(&self, x: &BigUint) -> Option<Point> {
        if *x >= self.p {
            return None;
        }
        let y_squared = self.rhs_of_equation(x);
        let y = mod_sqrt(&y_squared, &self.p);
        if mod_mul(&y, &y, &self.p) == y_squared {
            Some(Point::Affine { x: x.clone(), y })
        } else {
            None
        }
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: mod_sub(&BigUint::zero(), y, &self.p),
            },
        }
    }

    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        match (lhs, rhs) {
            (Point::Infinity, _) => rhs.clone(),
            (_, Point::Infinity) => lhs.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                // P + (-P) = O; also covers doubling a point with y = 0
                if x1 == x2 && *y1 == mod_sub(&BigUint::zero(), y2, &self.p) {
                    return Point::Infinity;
                }
                let lambda = if x1 == x2 && y1 == y2 {
                    // Tangent slope (3x² + a) / 2y
                    let numerator = mod_add(
                        &mod_mul(&BigUint::from(3u32), &mod_mul(x1, x1, &self.p), &self.p),
                        &self.a,
                        &self.p,
                    );
                    let denominator = mod_mul(&BigUint::from(2u32), y1, &self.p);
                    let inv = mod_inverse(&denominator, &self.p)
                        .expect("tangent denominator invertible modulo a prime");
                    mod_mul(&numerator, &inv, &self.p)
                } else {
                    // Chord slope (y2 - y1) / (x2 - x1)
                    let numerator = mod_sub(y2, y1, &self.p);
                    let denominator = mod_sub(x2, x1, &self.p);
                    let inv = mod_inverse(&denominator, &self.p)
                        .expect("chord denominator invertible modulo a prime");
                    mod_mul(&numerator, &inv, &self.p)
                };
                let lambda_squared = mod_mul(&lambda, &lambda, &self.p);
                let x3 = mod_sub(&mod_sub(&lambda_squared, x1, &self.p), x2, &self.p);
                let y3 = mod_sub(
                    &mod_mul(&lambda, &mod_sub(x1, &x3, &self.p), &self.p),
                    y1,
                    &self.p,
                );
                Point::Affine { x: x3, y: y3 }
            }
        }
    }

    pub fn double(&self, point: &Point) -> Point {
        self.add(point, point)
    }

    /// Scalar multiplication using double-and-add
    ///
    /// Processes the scalar's bits from most significant to least
    /// significant; works for any non-negative integer scalar without
    /// reduction (multiples of the group order simply land on infinity).
    pub fn scalar_mul(&self, point: &Point, k: &BigUint) -> Point {
        let mut result = Point::Infinity;
        for i in (0..k.bits()).rev() {
            result = self.double(&result);
            if k.bit(i) {
                result = self.add(&result, point);
            }
        }
        result
    }
}
