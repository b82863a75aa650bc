//! Auxiliary randomness for Schnorr signing.
//!
//! BIP-340 derives the nonce deterministically from the secret key and the
//! message, then mixes in 32 bytes of auxiliary randomness. The randomness is
//! supplied through [`Entropy`] so production code draws from the OS while
//! tests can pin it.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Size of the auxiliary randomness mixed into each signature.
pub const AUX_RAND_LEN: usize = 32;

/// A source of auxiliary randomness.
///
/// Called once per signature. Implementations must return fresh bytes on
/// every call, or an error; never a silent fallback.
pub trait Entropy {
    fn fill_aux(&mut self) -> Result<[u8; AUX_RAND_LEN]>;
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn fill_aux(&mut self) -> Result<[u8; AUX_RAND_LEN]> {
        (**self).fill_aux()
    }
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill_aux(&mut self) -> Result<[u8; AUX_RAND_LEN]> {
        let mut aux = [0u8; AUX_RAND_LEN];
        OsRng
            .try_fill_bytes(&mut aux)
            .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
        Ok(aux)
    }
}

/// Any cryptographically secure RNG, e.g. a seeded `StdRng` in tests.
#[derive(Debug, Clone)]
pub struct RngEntropy<R>(pub R);

impl<R: RngCore + CryptoRng> Entropy for RngEntropy<R> {
    fn fill_aux(&mut self) -> Result<[u8; AUX_RAND_LEN]> {
        let mut aux = [0u8; AUX_RAND_LEN];
        self.0
            .try_fill_bytes(&mut aux)
            .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
        Ok(aux)
    }
}

/// Returns the same bytes on every call.
///
/// For reproducible signatures in tests and golden vectors only.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub [u8; AUX_RAND_LEN]);

impl Entropy for FixedEntropy {
    fn fill_aux(&mut self) -> Result<[u8; AUX_RAND_LEN]> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_os_entropy_is_fresh() {
        let mut source = OsEntropy;
        let a = source.fill_aux().unwrap();
        let b = source.fill_aux().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_entropy_repeats() {
        let mut source = FixedEntropy([7; AUX_RAND_LEN]);
        assert_eq!(source.fill_aux().unwrap(), [7; AUX_RAND_LEN]);
        assert_eq!(source.fill_aux().unwrap(), [7; AUX_RAND_LEN]);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = RngEntropy(StdRng::seed_from_u64(9));
        let mut b = RngEntropy(StdRng::seed_from_u64(9));
        let first = a.fill_aux().unwrap();
        assert_eq!(first, b.fill_aux().unwrap());
        assert_ne!(first, a.fill_aux().unwrap());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw(mut e: impl Entropy) -> [u8; AUX_RAND_LEN] {
            e.fill_aux().unwrap()
        }
        let mut source = FixedEntropy([3; AUX_RAND_LEN]);
        assert_eq!(draw(&mut source), [3; AUX_RAND_LEN]);
    }
}
