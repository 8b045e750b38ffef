use crate::model::{Balance, Debt, Money, ParticipantId, SETTLED_EPSILON};

/// Greedy transfer planner.
///
/// Matches the largest debtor with the largest creditor until one side runs
/// out. This keeps the transfer count low for typical trips but is not
/// guaranteed to be minimal for every balance distribution; the matching
/// order below is the contract callers observe.
pub struct SettlementPlanner;

struct Position<'a> {
    id: &'a ParticipantId,
    balance: Money,
}

impl SettlementPlanner {
    /// Produces the transfers that bring every balance back within
    /// [`SETTLED_EPSILON`] of zero.
    ///
    /// Transfer amounts are rounded to cents when emitted, while the working
    /// balances are reduced by the unrounded amount so rounding never
    /// accumulates across iterations.
    pub fn plan(&self, balances: &[Balance]) -> Vec<Debt> {
        let mut debtors: Vec<Position<'_>> = balances
            .iter()
            .filter(|b| b.is_debtor())
            .map(Position::from)
            .collect();
        let mut creditors: Vec<Position<'_>> = balances
            .iter()
            .filter(|b| b.is_creditor())
            .map(Position::from)
            .collect();

        // Stable sorts: equal balances keep their input order.
        debtors.sort_by(|a, b| a.balance.cmp(&b.balance));
        creditors.sort_by(|a, b| b.balance.cmp(&a.balance));

        let mut debts = Vec::with_capacity(debtors.len() + creditors.len());
        let mut debtor_idx = 0;
        let mut creditor_idx = 0;

        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let debtor = &mut debtors[debtor_idx];
            let creditor = &mut creditors[creditor_idx];

            let amount = debtor.balance.abs().min(creditor.balance);
            let rounded = amount.round_cents();
            debug_assert!(rounded > Money::ZERO);
            debts.push(Debt {
                from: debtor.id.clone(),
                to: creditor.id.clone(),
                amount: rounded,
            });

            debtor.balance += amount;
            creditor.balance -= amount;

            if debtor.balance.abs() < SETTLED_EPSILON {
                debtor_idx += 1;
            }
            if creditor.balance < SETTLED_EPSILON {
                creditor_idx += 1;
            }
        }

        tracing::debug!(
            debtor_count = debtors.len(),
            creditor_count = creditors.len(),
            transfer_count = debts.len(),
            "Settlement plan computed"
        );

        debts
    }
}

impl<'a> From<&'a Balance> for Position<'a> {
    fn from(balance: &'a Balance) -> Self {
        Self {
            id: &balance.participant_id,
            balance: balance.balance,
        }
    }
}
