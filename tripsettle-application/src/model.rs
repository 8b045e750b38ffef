use tripsettle_domain::{Balance, Debt, Expense, Participant, SplitMismatch, TripSummary};

/// Roster and expenses of one trip, captured at a single point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripSnapshot {
    pub name: Option<String>,
    /// Opaque display label; all amounts are assumed to share it.
    pub currency: Option<String>,
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
}

impl TripSnapshot {
    pub fn new(participants: Vec<Participant>, expenses: Vec<Expense>) -> Self {
        Self {
            participants,
            expenses,
            ..Self::default()
        }
    }
}

/// What to do with expenses whose splits do not add up to their amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Compute anyway and report the mismatches alongside the result.
    #[default]
    PassThrough,
    /// Refuse to compute.
    Strict,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementResult {
    pub balances: Vec<Balance>,
    pub debts: Vec<Debt>,
    /// Balances after every debt is paid. They are within the settled epsilon
    /// only when every expense's splits reconcile with its amount.
    pub residual_balances: Vec<Balance>,
    pub summary: TripSummary,
    pub split_mismatches: Vec<SplitMismatch>,
}

impl SettlementResult {
    pub fn is_settled(&self) -> bool {
        self.debts.is_empty()
    }
}
