use thiserror::Error;

/// Errors raised while configuring hash families or load simulations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter lies outside the range the construction supports.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `2^exponent - 1` is not prime.
    #[error("2^{exponent} - 1 is not a Mersenne prime")]
    NotMersennePrime { exponent: u32 },

    /// The exponent does not fit the 128-bit working width of the reducer.
    #[error("Mersenne exponent {exponent} exceeds the supported maximum of {max}")]
    ExponentTooLarge { exponent: u32, max: u32 },
}

/// Result type for hashing and simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_configuration(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}
