//! Cryptographic primitives: BIP-340 Schnorr signatures over secp256k1.
//!
//! Keys and signatures travel as lower-case hex. Parsing is strict and every
//! failure names the field at fault; a well-formed signature that does not
//! verify is a `false` result, not an error.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{schnorr, Keypair, Message, SecretKey, XOnlyPublicKey, SECP256K1};
use std::fmt;

use crate::entropy::Entropy;
use crate::error::{Error, Result};
use crate::types::EventId;

/// Length of an x-only public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of a secret scalar in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of a Schnorr signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// A 32-byte x-only secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(XOnlyPublicKey);

impl PublicKey {
    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::parse("public_key", s)
    }

    /// Parse from hex, reporting failures against `field`.
    pub(crate) fn parse(field: &'static str, s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::public_key(field, format!("not valid hex: {e}")))?;
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(Error::public_key(
                field,
                format!("expected {} bytes, got {}", PUBLIC_KEY_LEN, bytes.len()),
            ));
        }
        Self::from_slice(field, &bytes)
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LEN]) -> Result<Self> {
        Self::from_slice("public_key", bytes)
    }

    fn from_slice(field: &'static str, bytes: &[u8]) -> Result<Self> {
        XOnlyPublicKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| Error::public_key(field, "not the x-coordinate of a curve point"))
    }

    /// Get the raw bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.serialize()
    }

    /// Convert to lower-case hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Check a signature over a 32-byte digest.
    pub fn verify(&self, digest: &EventId, signature: &Signature) -> bool {
        let msg = Message::from_digest(digest.0);
        match schnorr::Signature::from_slice(signature.as_bytes()) {
            Ok(sig) => SECP256K1.verify_schnorr(&sig, &msg, &self.0).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 64-byte BIP-340 Schnorr signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to lower-case hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string. Anything other than exactly 64 bytes is rejected.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| Error::InvalidSignatureEncoding(format!("not valid hex: {e}")))?;
        if bytes.len() != SIGNATURE_LEN {
            return Err(Error::InvalidSignatureEncoding(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; SIGNATURE_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

/// A secp256k1 keypair for signing events.
#[derive(Clone)]
pub struct Keys {
    keypair: Keypair,
}

impl Keys {
    /// Generate a new random keypair from the OS CSPRNG.
    ///
    /// # Panics
    ///
    /// Panics if the OS random source fails; see [`Keys::try_generate`].
    pub fn generate() -> Self {
        match Self::try_generate() {
            Ok(keys) => keys,
            Err(e) => panic!("{e}"),
        }
    }

    /// Generate a new random keypair, reporting an OS random source failure
    /// as `RandomnessUnavailable`.
    pub fn try_generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        loop {
            rng.try_fill_bytes(&mut bytes)
                .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
            // out-of-range scalars are astronomically rare; draw again
            if let Ok(secret) = SecretKey::from_slice(&bytes) {
                return Ok(Self::from_secret(&secret));
            }
        }
    }

    /// Parse a secret key from 64 hex characters.
    pub fn from_secret_hex(s: &str) -> Result<Self> {
        if s.len() != SECRET_KEY_LEN * 2 {
            return Err(Error::InvalidPrivateKey(format!(
                "expected {} hex characters, got {}",
                SECRET_KEY_LEN * 2,
                s.len()
            )));
        }
        let mut bytes = [0u8; SECRET_KEY_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| Error::InvalidPrivateKey("not valid hex".into()))?;
        Self::from_secret_bytes(&bytes)
    }

    /// Create from a 32-byte scalar in `[1, n-1]`.
    pub fn from_secret_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Result<Self> {
        let secret = SecretKey::from_slice(bytes)
            .map_err(|_| Error::InvalidPrivateKey("scalar is zero or not below the curve order".into()))?;
        Ok(Self::from_secret(&secret))
    }

    fn from_secret(secret: &SecretKey) -> Self {
        Self {
            keypair: Keypair::from_secret_key(SECP256K1, secret),
        }
    }

    /// Get the x-only public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.keypair.x_only_public_key().0)
    }

    /// Get the secret key as hex (secret key material).
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.keypair.secret_bytes())
    }

    /// Sign a 32-byte digest, mixing in fresh auxiliary randomness.
    pub fn sign<E: Entropy + ?Sized>(&self, digest: &EventId, entropy: &mut E) -> Result<Signature> {
        let aux = entropy.fill_aux()?;
        let msg = Message::from_digest(digest.0);
        let sig = SECP256K1.sign_schnorr_with_aux_rand(&msg, &self.keypair, &aux);

        let bytes: &[u8; SIGNATURE_LEN] = sig.as_ref();
        tracing::trace!(digest = %digest, "produced schnorr signature");
        Ok(Signature(*bytes))
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keys({:?})", self.public_key())
    }
}

/// Sign a digest with a hex-encoded secret key.
pub fn sign_digest<E: Entropy + ?Sized>(
    secret_key_hex: &str,
    digest: &EventId,
    entropy: &mut E,
) -> Result<Signature> {
    Keys::from_secret_hex(secret_key_hex)?.sign(digest, entropy)
}

/// Verify a hex-encoded signature over a digest against a hex-encoded
/// x-only public key.
///
/// Malformed key or signature encodings are errors; a signature that simply
/// does not verify yields `Ok(false)`.
pub fn verify_digest(public_key_hex: &str, digest: &EventId, signature_hex: &str) -> Result<bool> {
    let public_key = PublicKey::from_hex(public_key_hex)?;
    let signature = Signature::from_hex(signature_hex)?;
    Ok(public_key.verify(digest, &signature))
}
