//! Dual-EC Backdoor Demonstration
//!
//! Builds backdoored P-256 parameters, runs the generator twice, observes
//! 34 of the 60 output bytes, and recovers the remaining 26 bytes with the
//! trapdoor secret.
//!
//! Run with: cargo run --release

use num_bigint::BigUint;
use rand::RngCore;
use std::process;
use std::time::Instant;

use dualec_attack::{predict, BackdoorParameters, DualEc, Observation, PrimeCurve, Truncation};

fn main() {
    println!("=== Dual-EC kleptographic backdoor demonstration ===\n");

    let curve = PrimeCurve::p256();
    let trunc = Truncation::for_curve(&curve, 4);
    let mut rng = rand::rng();

    let params = match BackdoorParameters::generate(&curve, &mut rng) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("FAILED: {}", e);
            process::exit(1);
        }
    };
    println!("Backdoored parameters (P = d*Q):");
    println!("P = {}", params.p);
    println!("Q = {}", params.q);
    println!("d = {:x}\n", params.d);

    // Any seed works; the victim picks it, the attacker never sees it
    let seed = BigUint::from(rng.next_u64() | 1);
    let mut generator = DualEc::new(&curve, &params.p, &params.q, trunc, seed);
    let (bits1, bits2) = match (generator.generate(), generator.generate()) {
        (Ok(bits1), Ok(bits2)) => (bits1, bits2),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("FAILED: {}", e);
            process::exit(1);
        }
    };

    let observation = Observation::from_outputs(&trunc, &bits1, &bits2);
    println!("Observed 34 bytes:");
    println!("({:x}, {:x})\n", observation.first, observation.second_high);

    let start = Instant::now();
    let predicted = match predict(&curve, &params, &trunc, &observation) {
        Ok(predicted) => predicted,
        Err(e) => {
            eprintln!("FAILED: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    let actual = trunc.take_low(&bits2);
    println!("Predicted 26 bytes:\n{:x}", predicted);
    println!("Actual 26 bytes:\n{:x}", actual);
    println!("\nState recovery took {:.2}s", elapsed.as_secs_f64());
    println!("Actual matches prediction: {}", actual == predicted);

    if actual != predicted {
        process::exit(1);
    }
}
