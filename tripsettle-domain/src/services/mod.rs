pub mod balance_calculator;
pub mod settlement_planner;
pub mod split_reconciler;
pub mod trip_summary;

pub use balance_calculator::BalanceCalculator;
pub use settlement_planner::SettlementPlanner;
pub use split_reconciler::{SplitMismatch, SplitReconciler, SplitReconciliationError};
pub use trip_summary::{DEFAULT_CATEGORY, TripSummarizer, TripSummary};
