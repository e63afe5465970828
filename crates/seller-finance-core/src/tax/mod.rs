pub mod regime;

pub use regime::{
    st_reduction_factor, TaxBracket, TaxRegimeTable, TaxTierResolution,
};
