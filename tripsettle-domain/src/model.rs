use fxhash::FxHashMap;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    sync::Arc,
};

/// Tolerance below which a balance is considered settled.
///
/// Shared by every component that classifies balances so that the calculator
/// and the planner never disagree about who still owes money.
pub const SETTLED_EPSILON: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

/// Number of decimal places kept on emitted transfer amounts.
pub const TRANSFER_SCALE: u32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds an amount from an integer mantissa and a decimal scale,
    /// e.g. `Money::new(1250, 2)` is `12.50`.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// True when the amount lies within [`SETTLED_EPSILON`] of zero.
    pub fn is_settled(self) -> bool {
        self.abs() <= SETTLED_EPSILON
    }

    /// Rounds to cents, half away from zero.
    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(TRANSFER_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<usize> for Money {
    type Output = Self;

    fn mul(self, rhs: usize) -> Self::Output {
        Self(self.0 * Decimal::from(rhs as u64))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Opaque participant identity supplied by the roster owner.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(Arc<str>);

impl ParticipantId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// How the collaborator layer resolved an expense into splits.
///
/// Informational only: splits always arrive as concrete amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitType {
    Equal,
    Percentage,
    #[default]
    Exact,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseSplit {
    pub participant_id: ParticipantId,
    pub amount: Money,
}

impl ExpenseSplit {
    pub fn new(participant_id: impl Into<ParticipantId>, amount: Money) -> Self {
        Self {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub payer_id: ParticipantId,
    pub amount: Money,
    pub split_type: SplitType,
    pub splits: Vec<ExpenseSplit>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        payer_id: impl Into<ParticipantId>,
        amount: Money,
        splits: Vec<ExpenseSplit>,
    ) -> Self {
        Self {
            id: id.into(),
            payer_id: payer_id.into(),
            amount,
            split_type: SplitType::default(),
            splits,
            description: None,
            category: None,
        }
    }

    /// Splits `amount` evenly between `participants`, assigning leftover
    /// cents to the first participants in order.
    pub fn even(
        id: impl Into<String>,
        payer_id: impl Into<ParticipantId>,
        amount: Money,
        participants: &[ParticipantId],
    ) -> Self {
        let splits = distribute_evenly(amount, participants);
        Self {
            split_type: SplitType::Equal,
            ..Self::new(id, payer_id, amount, splits)
        }
    }

    pub fn with_split_type(mut self, split_type: SplitType) -> Self {
        self.split_type = split_type;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn split_total(&self) -> Money {
        self.splits.iter().map(|split| split.amount).sum()
    }
}

/// Net position of one participant.
///
/// Positive `balance` means the participant is owed money, negative means
/// they owe money.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub participant_id: ParticipantId,
    pub paid: Money,
    pub consumed: Money,
    pub balance: Money,
}

impl Balance {
    pub fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            paid: Money::ZERO,
            consumed: Money::ZERO,
            balance: Money::ZERO,
        }
    }

    pub fn is_creditor(&self) -> bool {
        self.balance > SETTLED_EPSILON
    }

    pub fn is_debtor(&self) -> bool {
        self.balance < -SETTLED_EPSILON
    }

    pub fn is_settled(&self) -> bool {
        self.balance.is_settled()
    }
}

/// A single recommended transfer from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debt {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// Returns the balances that remain once every debt has been paid.
///
/// `paid` and `consumed` are left untouched; only the net `balance` moves.
/// Debts naming participants absent from `balances` are ignored.
pub fn apply_debts(balances: &[Balance], debts: &[Debt]) -> Vec<Balance> {
    let mut residual = balances.to_vec();
    let mut index: FxHashMap<ParticipantId, usize> = FxHashMap::default();
    for (idx, balance) in balances.iter().enumerate() {
        index.entry(balance.participant_id.clone()).or_insert(idx);
    }

    for debt in debts {
        if let Some(&idx) = index.get(&debt.from) {
            residual[idx].balance += debt.amount;
        }
        if let Some(&idx) = index.get(&debt.to) {
            residual[idx].balance -= debt.amount;
        }
    }
    residual
}

fn distribute_evenly(amount: Money, participants: &[ParticipantId]) -> Vec<ExpenseSplit> {
    if participants.is_empty() {
        return Vec::new();
    }

    let cent = Money::new(1, TRANSFER_SCALE);
    let count = Decimal::from(participants.len() as u64);
    let base = Money::from_decimal(
        (amount.as_decimal() / count)
            .round_dp_with_strategy(TRANSFER_SCALE, RoundingStrategy::ToZero),
    );
    let mut remainder = amount - base * participants.len();

    participants
        .iter()
        .map(|participant| {
            let mut share = base;
            if remainder >= cent {
                share += cent;
                remainder -= cent;
            }
            ExpenseSplit::new(participant.clone(), share)
        })
        .collect()
}
