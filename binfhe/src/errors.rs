use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that the security level name is not part of the registry.
    #[error("Unknown security level: {0}")]
    UnknownSecurityLevel(String),

    /// Indicates that the blind rotation method name is not recognized.
    #[error("Unknown blind rotation method: {0}")]
    UnknownMethod(String),

    /// Indicates that the gate name is not recognized.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Indicates a parameter error.
    #[error("{0}")]
    ParametersError(ParametersError),

    /// Indicates that a bootstrapping operation was requested before the
    /// bootstrapping keys were generated.
    #[error("Bootstrapping keys have not been generated")]
    MissingBootstrappingKey,

    /// Indicates that a binary gate received the same ciphertext twice.
    #[error("Input ciphertexts should be independent")]
    IdenticalInputs,

    /// Indicates a serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ParametersError> for Error {
    fn from(e: ParametersError) -> Self {
        Error::ParametersError(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates that the ring dimension is invalid.
    #[error("Invalid ring dimension: {0} is not a power of 2 larger than 4")]
    InvalidRingDimension(usize),

    /// Indicates that a modulus is invalid.
    #[error("Invalid modulus: {0}")]
    InvalidModulus(String),

    /// Indicates that a decomposition base is invalid.
    #[error("Invalid base: {0}")]
    InvalidBase(String),

    /// Indicates that the noise parameter is invalid.
    #[error("Invalid noise: {0}")]
    InvalidNoise(String),

    /// Indicates that the LWE dimension is invalid.
    #[error("Invalid LWE dimension: {0}")]
    InvalidDimension(usize),
}
