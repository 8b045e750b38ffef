#[cfg(all(feature = "pt", feature = "en"))]
compile_error!("Cannot enable both 'pt' and 'en' features at the same time");

#[cfg(feature = "pt")]
pub mod strings {
    pub const PARTICIPANT: &str = "Participante";
    pub const PAID: &str = "Pagou";
    pub const CONSUMED: &str = "Consumiu";
    pub const BALANCE: &str = "Saldo";
    pub const FROM: &str = "De";
    pub const TO: &str = "Para";
    pub const AMOUNT: &str = "Valor";
    pub const BALANCES_HEADING: &str = "Saldos";
    pub const TRANSFERS_HEADING: &str = "Acertos";
    pub const WARNINGS_HEADING: &str = "Avisos";
    pub const TOTAL_SPENT: &str = "Total gasto";
    pub const EXPENSE_COUNT: &str = "Despesas";
    pub const AVERAGE_PER_EXPENSE: &str = "Média por despesa";
    pub const SPENDING_HEADING: &str = "Gastos";
    pub const CATEGORY: &str = "Categoria";
    pub const PAYER: &str = "Pagador";
    pub const TOTAL_TO_SETTLE: &str = "Total a acertar";
    pub const ALL_SETTLED: &str = "Tudo acertado! Ninguém deve nada.";
}

#[cfg(not(feature = "pt"))]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const PAID: &str = "Paid";
    pub const CONSUMED: &str = "Consumed";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const BALANCES_HEADING: &str = "Balances";
    pub const TRANSFERS_HEADING: &str = "Transfers";
    pub const WARNINGS_HEADING: &str = "Warnings";
    pub const TOTAL_SPENT: &str = "Total spent";
    pub const EXPENSE_COUNT: &str = "Expenses";
    pub const AVERAGE_PER_EXPENSE: &str = "Average per expense";
    pub const SPENDING_HEADING: &str = "Spending";
    pub const CATEGORY: &str = "Category";
    pub const PAYER: &str = "Payer";
    pub const TOTAL_TO_SETTLE: &str = "Total to settle";
    pub const ALL_SETTLED: &str = "All settled up! Nobody owes anything.";
}

pub use strings::*;

pub struct SplitMismatchMessage<'a> {
    expense_id: &'a str,
    expected: String,
    actual: String,
}

pub fn split_mismatch(
    expense_id: &str,
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
) -> SplitMismatchMessage<'_> {
    SplitMismatchMessage {
        expense_id,
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

#[cfg(feature = "pt")]
impl std::fmt::Display for SplitMismatchMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A divisão da despesa '{}' soma {}, mas o valor é {}",
            self.expense_id, self.actual, self.expected
        )
    }
}

#[cfg(not(feature = "pt"))]
impl std::fmt::Display for SplitMismatchMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Splits of expense '{}' add up to {}, but the expense is {}",
            self.expense_id, self.actual, self.expected
        )
    }
}
