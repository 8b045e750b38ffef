#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Balance, Debt, Expense, ExpenseSplit, Money, Participant, ParticipantId, SETTLED_EPSILON,
    SplitType, TRANSFER_SCALE, apply_debts,
};
pub use services::{
    BalanceCalculator, DEFAULT_CATEGORY, SettlementPlanner, SplitMismatch, SplitReconciler,
    SplitReconciliationError, TripSummarizer, TripSummary,
};
