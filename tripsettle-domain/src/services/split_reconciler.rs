use crate::model::{Expense, Money};
use thiserror::Error;

/// An expense whose split amounts do not add up to its total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitMismatch {
    pub expense_id: String,
    pub expected: Money,
    pub actual: Money,
}

impl SplitMismatch {
    /// Split total minus expense amount. Positive when the splits overshoot.
    pub fn difference(&self) -> Money {
        self.actual - self.expected
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SplitReconciliationError {
    #[error("splits of expense '{expense_id}' sum to {actual}, expected {expected}")]
    Mismatch {
        expense_id: String,
        expected: Money,
        actual: Money,
    },
}

impl From<SplitMismatch> for SplitReconciliationError {
    fn from(mismatch: SplitMismatch) -> Self {
        SplitReconciliationError::Mismatch {
            expense_id: mismatch.expense_id,
            expected: mismatch.expected,
            actual: mismatch.actual,
        }
    }
}

/// Checks that each expense's splits reconcile with its amount.
///
/// The balance calculator trusts split amounts as given; this service is
/// how callers find out when they should not.
pub struct SplitReconciler;

impl SplitReconciler {
    pub fn reconcile(&self, expenses: &[Expense]) -> Vec<SplitMismatch> {
        expenses
            .iter()
            .filter_map(|expense| {
                let actual = expense.split_total();
                if (actual - expense.amount).is_settled() {
                    None
                } else {
                    Some(SplitMismatch {
                        expense_id: expense.id.clone(),
                        expected: expense.amount,
                        actual,
                    })
                }
            })
            .collect()
    }

    pub fn ensure_reconciled(&self, expenses: &[Expense]) -> Result<(), SplitReconciliationError> {
        match self.reconcile(expenses).into_iter().next() {
            Some(mismatch) => Err(mismatch.into()),
            None => Ok(()),
        }
    }
}
