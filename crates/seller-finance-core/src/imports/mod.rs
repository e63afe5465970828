pub mod allocation;
pub mod simulation;

pub use allocation::{allocate, AllocationBasis, ProductLine};
pub use simulation::{
    calculate_import, AdditionalExpense, ImportCalculationResult, ImportSimulation, ImportTax,
    LineCost, TaxBasis,
};
