pub mod error;
pub mod fx;
pub mod tax;
pub mod types;

#[cfg(feature = "channel")]
pub mod channel;

#[cfg(feature = "imports")]
pub mod imports;

pub use error::SellerFinanceError;
pub use types::*;

/// Standard result type for all seller-finance operations
pub type SellerFinanceResult<T> = Result<T, SellerFinanceError>;
