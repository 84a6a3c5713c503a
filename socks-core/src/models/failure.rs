use thiserror::Error;

/// The ways an inventory operation can fail for domain reasons.
///
/// Repositories report these separately from their own infrastructure
/// errors, typically as the inner value of
/// `Result<Result<T, StockFailure>, Self::Error>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockFailure {
    /// The filter parameters do not form a valid combination
    #[error("invalid filter parameters")]
    InvalidParameters,

    /// The submitted item data failed validation
    #[error("invalid item: {0}")]
    InvalidItem(&'static str),

    /// Applying the income would exceed the representable quantity
    #[error("quantity overflow")]
    QuantityOverflow,

    /// No item matches the request
    #[error("socks not found")]
    ItemNotFound,

    /// An outcome requested more socks than are in stock
    #[error("not enough socks in stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// The quantity currently in stock
        available: u32,
        /// The quantity that was requested
        requested: u32,
    },

    /// The CSV batch could not be read
    #[error("invalid csv file: {0}")]
    InvalidCsvFile(String),
}
