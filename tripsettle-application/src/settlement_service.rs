use crate::{
    error::SettlementBuildError,
    model::{SettlementResult, SplitPolicy, TripSnapshot},
    ports::TripSource,
};
use tripsettle_domain::{
    Balance, BalanceCalculator, SettlementPlanner, SplitReconciler, TripSummarizer, apply_debts,
};

/// Computes balances and transfer plans for a trip.
///
/// Every call recomputes from a fresh snapshot; nothing is cached between
/// calls, so the result always reflects the current trip data.
#[derive(Clone, Copy)]
pub struct SettlementService<'a> {
    source: &'a dyn TripSource,
    split_policy: SplitPolicy,
}

impl<'a> SettlementService<'a> {
    pub fn new(source: &'a dyn TripSource, split_policy: SplitPolicy) -> Self {
        Self {
            source,
            split_policy,
        }
    }

    pub fn load_snapshot(&self) -> Result<TripSnapshot, SettlementBuildError> {
        Ok(self.source.load()?)
    }

    /// Loads the trip from the configured source and settles it.
    pub fn build_settlement_result(&self) -> Result<SettlementResult, SettlementBuildError> {
        let snapshot = self.load_snapshot()?;
        self.settle_snapshot(&snapshot)
    }

    pub fn calculate_balances(&self, snapshot: &TripSnapshot) -> Vec<Balance> {
        BalanceCalculator.compute(&snapshot.expenses, &snapshot.participants)
    }

    pub fn settle_snapshot(
        &self,
        snapshot: &TripSnapshot,
    ) -> Result<SettlementResult, SettlementBuildError> {
        let reconciler = SplitReconciler;
        let split_mismatches = match self.split_policy {
            SplitPolicy::Strict => {
                reconciler.ensure_reconciled(&snapshot.expenses)?;
                Vec::new()
            }
            SplitPolicy::PassThrough => reconciler.reconcile(&snapshot.expenses),
        };

        for mismatch in &split_mismatches {
            tracing::warn!(
                expense_id = %mismatch.expense_id,
                expected = %mismatch.expected,
                actual = %mismatch.actual,
                "Expense splits do not reconcile with the expense amount"
            );
        }

        let balances = self.calculate_balances(snapshot);
        let debts = SettlementPlanner.plan(&balances);
        let residual_balances = apply_debts(&balances, &debts);
        let summary = TripSummarizer.summarize(&snapshot.expenses, &debts);

        tracing::debug!(
            trip = snapshot.name.as_deref().unwrap_or_default(),
            participant_count = balances.len(),
            expense_count = snapshot.expenses.len(),
            transfer_count = debts.len(),
            total_spent = %summary.total_spent,
            total_to_settle = %summary.total_to_settle,
            "Trip settlement computed"
        );

        Ok(SettlementResult {
            balances,
            debts,
            residual_balances,
            summary,
            split_mismatches,
        })
    }
}
