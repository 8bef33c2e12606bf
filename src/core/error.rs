//! Error types for option pricing and analysis

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricerError {
    #[error("Invalid option kind: '{0}' (expected 'call' or 'put')")]
    InvalidOptionKind(String),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Floating point error: {0}")]
    FloatingPoint(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type PricerResult<T> = Result<T, PricerError>;

impl PricerError {
    pub fn invalid_option_kind(kind: impl Into<String>) -> Self {
        Self::InvalidOptionKind(kind.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        Self::DivisionByZero(msg.into())
    }

    pub fn floating_point(msg: impl Into<String>) -> Self {
        Self::FloatingPoint(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
