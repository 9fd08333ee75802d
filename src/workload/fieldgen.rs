use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

/// The 52 upper and lower case ASCII letters.
pub const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns a string of exactly `len` letters drawn uniformly, with
/// replacement, from [`LETTERS`].
pub fn random_string(rng: &mut dyn RngCore, len: usize) -> String {
    let dist = Uniform::new(0, LETTERS.len());
    (0..len)
        .map(|_| LETTERS[dist.sample(&mut *rng)] as char)
        .collect()
}
