use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SellerFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Turnover {turnover} is above the regime ceiling of {ceiling}")]
    OutOfRange { turnover: Decimal, ceiling: Decimal },

    #[error("Unsupported sales channel: {channel}")]
    UnsupportedChannel { channel: String },

    #[error("Infeasible channel: percentage fees total {fee_load}% of price, break-even is undefined")]
    InfeasibleChannel { fee_load: Decimal },

    #[error("Empty shipment: {0}")]
    EmptyShipment(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SellerFinanceError {
    fn from(e: serde_json::Error) -> Self {
        SellerFinanceError::SerializationError(e.to_string())
    }
}
