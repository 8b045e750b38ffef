use crate::model::{Balance, Expense, Money, Participant, ParticipantId};
use indexmap::IndexMap;

/// Reduces expenses into one net balance per roster participant.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Computes `paid - consumed` for every participant.
    ///
    /// The result follows roster order. Payers and split participants that are
    /// not on the roster contribute nothing; a roster listing the same id twice
    /// yields a single entry at the first position.
    pub fn compute(&self, expenses: &[Expense], participants: &[Participant]) -> Vec<Balance> {
        let mut balances: IndexMap<&ParticipantId, Balance> =
            IndexMap::with_capacity(participants.len());
        for participant in participants {
            balances
                .entry(&participant.id)
                .or_insert_with(|| Balance::new(participant.id.clone()));
        }

        let mut dropped_references = 0usize;
        for expense in expenses {
            match balances.get_mut(&expense.payer_id) {
                Some(balance) => balance.paid += expense.amount,
                None => {
                    dropped_references += 1;
                    tracing::debug!(
                        expense_id = %expense.id,
                        payer_id = %expense.payer_id,
                        "Ignoring payer outside the roster"
                    );
                }
            }

            for split in &expense.splits {
                match balances.get_mut(&split.participant_id) {
                    Some(balance) => balance.consumed += split.amount,
                    None => {
                        dropped_references += 1;
                        tracing::debug!(
                            expense_id = %expense.id,
                            participant_id = %split.participant_id,
                            "Ignoring split participant outside the roster"
                        );
                    }
                }
            }
        }

        if dropped_references > 0 {
            tracing::debug!(
                dropped_references,
                expense_count = expenses.len(),
                participant_count = balances.len(),
                "Balances computed with unknown participant references"
            );
        }

        balances
            .into_values()
            .map(|mut balance| {
                balance.balance = balance.paid - balance.consumed;
                balance
            })
            .collect()
    }

    /// Sum of every expense amount, regardless of roster membership.
    pub fn total_spent(&self, expenses: &[Expense]) -> Money {
        expenses.iter().map(|expense| expense.amount).sum()
    }
}
