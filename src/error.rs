/// Errors returned by the marshal/parse boundary.
///
/// Key generation, encapsulation and decapsulation never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum KyberError {
    /// The output buffer could not be grown to hold the encoding.
    #[cfg_attr(
        feature = "std",
        error("could not allocate {requested} bytes for the encoding")
    )]
    AllocationFailure { requested: usize },

    /// The input is not a valid encoding: wrong length, trailing bytes, a
    /// coefficient that is not reduced modulo q, or an inconsistent key hash.
    #[cfg_attr(feature = "std", error("malformed {what}: {reason}"))]
    MalformedInput {
        what: &'static str,
        reason: &'static str,
    },
}

impl KyberError {
    pub(crate) const fn malformed(what: &'static str, reason: &'static str) -> Self {
        KyberError::MalformedInput { what, reason }
    }
}

pub type Result<T> = core::result::Result<T, KyberError>;
