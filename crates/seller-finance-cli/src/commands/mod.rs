pub mod channel;
pub mod imports;
pub mod tax;
