//! Kyber768 (round 3) key-encapsulation mechanism.
//!
//! ```
//! use kyber768::{decapsulate, encapsulate, generate_key};
//!
//! let mut rng = rand::thread_rng();
//! let sk = generate_key(&mut rng);
//! let (ct, ss) = encapsulate(sk.public_key(), &mut rng);
//! assert_eq!(decapsulate(&sk, &ct), ss);
//! ```
#![deny(unsafe_code)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod macros;

pub(crate) mod utils;

internal_mods! {
    field,
    poly,
    polyvec,
    polymat,
    encoding,
    symmetric,
    pke,
}

pub mod ciphertext;
pub mod error;
pub mod kem;
pub mod marshal;
pub mod params;

pub use ciphertext::Ciphertext;
pub use error::{KyberError, Result};
pub use kem::{
    decapsulate, encapsulate, encapsulate_from_entropy, generate_key, generate_key_from_entropy,
    public_from_private, PrivateKey, PublicKey, SharedSecret, ENCAP_ENTROPY_BYTES,
    GENERATE_KEY_ENTROPY_BYTES,
};
#[cfg(feature = "alloc")]
pub use marshal::{marshal_private_key, marshal_public_key};
pub use marshal::{parse_private_key, parse_public_key};
pub use params::{CIPHERTEXT_BYTES, PRIVATE_KEY_BYTES, PUBLIC_KEY_BYTES};
