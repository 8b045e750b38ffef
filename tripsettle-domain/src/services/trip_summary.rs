use crate::{
    model::{Debt, Expense, Money, ParticipantId},
    services::BalanceCalculator,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Category assigned to expenses recorded without one.
pub const DEFAULT_CATEGORY: &str = "other";

/// Spending totals of a trip, next to its settlement plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripSummary {
    pub total_spent: Money,
    pub expense_count: usize,
    /// Zero when the trip has no expenses.
    pub average_per_expense: Money,
    /// Totals per category, in order of first appearance.
    pub by_category: IndexMap<String, Money>,
    /// Totals per payer, in order of first appearance. Payers outside the
    /// roster are listed too; they still spent the money.
    pub by_payer: IndexMap<ParticipantId, Money>,
    /// Sum of the planned transfers.
    pub total_to_settle: Money,
}

pub struct TripSummarizer;

impl TripSummarizer {
    pub fn summarize(&self, expenses: &[Expense], debts: &[Debt]) -> TripSummary {
        let total_spent = BalanceCalculator.total_spent(expenses);
        let average_per_expense = if expenses.is_empty() {
            Money::ZERO
        } else {
            Money::from_decimal(total_spent.as_decimal() / Decimal::from(expenses.len() as u64))
        };

        let mut by_category: IndexMap<String, Money> = IndexMap::new();
        let mut by_payer: IndexMap<ParticipantId, Money> = IndexMap::new();
        for expense in expenses {
            let category = expense
                .category
                .as_deref()
                .filter(|category| !category.is_empty())
                .unwrap_or(DEFAULT_CATEGORY);
            match by_category.get_mut(category) {
                Some(total) => *total += expense.amount,
                None => {
                    by_category.insert(category.to_string(), expense.amount);
                }
            }
            *by_payer.entry(expense.payer_id.clone()).or_default() += expense.amount;
        }

        TripSummary {
            total_spent,
            expense_count: expenses.len(),
            average_per_expense,
            by_category,
            by_payer,
            total_to_settle: debts.iter().map(|debt| debt.amount).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn summarizer() -> TripSummarizer {
        TripSummarizer
    }

    fn expense(id: &str, payer: &str, cents: i64, category: Option<&str>) -> Expense {
        let mut expense = Expense::new(id, payer, Money::new(cents, 2), Vec::new());
        if let Some(category) = category {
            expense = expense.with_category(category);
        }
        expense
    }

    fn debt(from: &str, to: &str, cents: i64) -> Debt {
        Debt {
            from: from.into(),
            to: to.into(),
            amount: Money::new(cents, 2),
        }
    }

    #[rstest]
    fn empty_trip_has_zero_totals(summarizer: TripSummarizer) {
        let summary = summarizer.summarize(&[], &[]);

        assert_eq!(summary, TripSummary::default());
        assert_eq!(summary.average_per_expense, Money::ZERO);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::blank(Some(""))]
    fn uncategorized_expenses_fall_into_default(
        summarizer: TripSummarizer,
        #[case] category: Option<&str>,
    ) {
        let expenses = vec![
            expense("e1", "a", 1000, category),
            expense("e2", "a", 500, Some(DEFAULT_CATEGORY)),
        ];

        let summary = summarizer.summarize(&expenses, &[]);

        assert_eq!(
            summary.by_category.into_iter().collect::<Vec<_>>(),
            vec![(DEFAULT_CATEGORY.to_string(), Money::new(1500, 2))]
        );
    }

    #[rstest]
    fn groups_by_category_and_payer_in_first_seen_order(summarizer: TripSummarizer) {
        let expenses = vec![
            expense("e1", "b", 3000, Some("food")),
            expense("e2", "a", 9000, Some("lodging")),
            expense("e3", "b", 1500, Some("food")),
            expense("e4", "ghost", 500, None),
        ];
        let debts = vec![debt("c", "a", 4000), debt("b", "a", 1000)];

        let summary = summarizer.summarize(&expenses, &debts);

        assert_eq!(summary.total_spent, Money::from_i64(140));
        assert_eq!(summary.expense_count, 4);
        assert_eq!(summary.average_per_expense, Money::from_i64(35));
        assert_eq!(
            summary.by_category.into_iter().collect::<Vec<_>>(),
            vec![
                ("food".to_string(), Money::from_i64(45)),
                ("lodging".to_string(), Money::from_i64(90)),
                (DEFAULT_CATEGORY.to_string(), Money::from_i64(5)),
            ]
        );
        assert_eq!(
            summary.by_payer.into_iter().collect::<Vec<_>>(),
            vec![
                (ParticipantId::from("b"), Money::from_i64(45)),
                (ParticipantId::from("a"), Money::from_i64(90)),
                (ParticipantId::from("ghost"), Money::from_i64(5)),
            ]
        );
        assert_eq!(summary.total_to_settle, Money::from_i64(50));
    }

    #[rstest]
    fn average_keeps_full_precision(summarizer: TripSummarizer) {
        let expenses = vec![
            expense("e1", "a", 10000, None),
            expense("e2", "a", 0, None),
            expense("e3", "a", 0, None),
        ];

        let summary = summarizer.summarize(&expenses, &[]);

        assert_eq!(summary.average_per_expense.round_cents(), Money::new(3333, 2));
    }
}
