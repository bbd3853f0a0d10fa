use static_assertions::const_assert_eq;

/// Number of coefficients of a polynomial.
pub const KYBER_N: usize = 256;
/// Number of polynomials in a vector (Kyber768).
pub const KYBER_K: usize = 3;

pub const KYBER_ETA1: usize = 2;
pub const KYBER_ETA2: usize = 2;

/// Bits per coefficient of the compressed vector `u`
pub const KYBER_DU: usize = 10;
/// Bits per coefficient of the compressed polynomial `v`
pub const KYBER_DV: usize = 4;

pub const KYBER_SYMBYTES: usize = 32;
pub const KYBER_SSBYTES: usize = 32;
pub const MSG_BYTES: usize = KYBER_SYMBYTES;

/// Bytes of one polynomial encoded with 12 bits per coefficient
pub const POLYBYTES: usize = KYBER_N * 12 / 8;
pub const POLYVEC_BYTES: usize = KYBER_K * POLYBYTES;

pub const fn poly_compressed_bytes(d: usize) -> usize {
    KYBER_N * d / 8
}

pub const POLY_COMPRESSED_BYTES: usize = poly_compressed_bytes(KYBER_DV);
pub const POLYVEC_COMPRESSED_BYTES: usize = KYBER_K * poly_compressed_bytes(KYBER_DU);

pub const PUBLIC_KEY_BYTES: usize = POLYVEC_BYTES + KYBER_SYMBYTES;
pub const PRIVATE_KEY_BYTES: usize =
    POLYVEC_BYTES + PUBLIC_KEY_BYTES + KYBER_SYMBYTES + KYBER_SYMBYTES;
pub const CIPHERTEXT_BYTES: usize = POLYVEC_COMPRESSED_BYTES + POLY_COMPRESSED_BYTES;

// noise sampling is only implemented for the centered binomial distribution with eta = 2
const_assert_eq!(KYBER_ETA1, 2);
const_assert_eq!(KYBER_ETA2, 2);

const_assert_eq!(POLYBYTES, 384);
const_assert_eq!(PUBLIC_KEY_BYTES, 1184);
const_assert_eq!(PRIVATE_KEY_BYTES, 2400);
const_assert_eq!(POLYVEC_COMPRESSED_BYTES, 960);
const_assert_eq!(POLY_COMPRESSED_BYTES, 128);
const_assert_eq!(CIPHERTEXT_BYTES, 1088);
const_assert_eq!(MSG_BYTES * 8, KYBER_N);
