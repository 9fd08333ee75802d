//! Synthetic request generation. Everything in here is pure: requests and
//! rows are derived from a caller-owned PRNG, so a seeded worker produces a
//! repeatable sequence.

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, RngCore};

pub mod fieldgen;

mod oltp;

pub use fieldgen::random_string;
pub use oltp::*;
