pub mod annuity;
pub mod error;
pub mod loan;
pub mod schedule;
pub mod types;

pub use error::LoanEngineError;
pub use types::*;

/// Standard result type for all loan-engine operations
pub type LoanEngineResult<T> = Result<T, LoanEngineError>;
