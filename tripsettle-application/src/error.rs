use thiserror::Error;
use tripsettle_domain::{Money, SplitReconciliationError};

#[derive(Debug, Error)]
pub enum TripSourceError {
    #[error("failed to read trip data: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed trip data: {0}")]
    Malformed(String),
    #[error("invalid trip data: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SettlementBuildError {
    #[error(transparent)]
    Source(#[from] TripSourceError),
    #[error("splits of expense '{expense_id}' sum to {actual}, expected {expected}")]
    UnreconciledSplits {
        expense_id: String,
        expected: Money,
        actual: Money,
    },
}

impl From<SplitReconciliationError> for SettlementBuildError {
    fn from(err: SplitReconciliationError) -> Self {
        match err {
            SplitReconciliationError::Mismatch {
                expense_id,
                expected,
                actual,
            } => SettlementBuildError::UnreconciledSplits {
                expense_id,
                expected,
                actual,
            },
        }
    }
}
