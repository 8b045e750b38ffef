use crate::text_table::{Alignment, TextTableBuilder};
use serde::Serialize;
use std::{borrow::Cow, fmt::Write};
use tripsettle_application::{ParticipantDirectory, SettlementResult};
use tripsettle_domain::{Money, ParticipantId, TripSummary};
use tripsettle_i18n as i18n;

pub struct SettlementPresenter<'a> {
    directory: &'a dyn ParticipantDirectory,
    currency: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementView<'a> {
    pub currency: Option<&'a str>,
    pub summary: SummaryView<'a>,
    pub balances: Vec<BalanceView<'a>>,
    pub transfers: Vec<TransferView<'a>>,
    pub split_warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView<'a> {
    pub total_spent: String,
    pub expense_count: usize,
    pub average_per_expense: String,
    pub total_to_settle: String,
    pub by_category: Vec<CategoryTotalView<'a>>,
    pub by_payer: Vec<PayerTotalView<'a>>,
}

#[derive(Serialize)]
pub struct CategoryTotalView<'a> {
    pub category: &'a str,
    pub amount: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerTotalView<'a> {
    pub participant_id: &'a str,
    pub name: Cow<'a, str>,
    pub amount: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceView<'a> {
    pub participant_id: &'a str,
    pub name: Cow<'a, str>,
    pub paid: String,
    pub consumed: String,
    pub balance: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferView<'a> {
    pub from: &'a str,
    pub from_name: Cow<'a, str>,
    pub to: &'a str,
    pub to_name: Cow<'a, str>,
    pub amount: String,
}

impl<'a> SettlementPresenter<'a> {
    pub fn new(directory: &'a dyn ParticipantDirectory, currency: Option<&'a str>) -> Self {
        Self {
            directory,
            currency,
        }
    }

    pub fn view<'r>(&self, result: &'r SettlementResult) -> SettlementView<'r>
    where
        'a: 'r,
    {
        SettlementView {
            currency: self.currency,
            summary: self.summary_view(&result.summary),
            balances: result
                .balances
                .iter()
                .map(|balance| BalanceView {
                    participant_id: balance.participant_id.as_str(),
                    name: self.label(&balance.participant_id),
                    paid: format_amount(balance.paid),
                    consumed: format_amount(balance.consumed),
                    balance: format_amount(balance.balance),
                })
                .collect(),
            transfers: result
                .debts
                .iter()
                .map(|debt| TransferView {
                    from: debt.from.as_str(),
                    from_name: self.label(&debt.from),
                    to: debt.to.as_str(),
                    to_name: self.label(&debt.to),
                    amount: format_amount(debt.amount),
                })
                .collect(),
            split_warnings: result
                .split_mismatches
                .iter()
                .map(|mismatch| {
                    i18n::split_mismatch(
                        &mismatch.expense_id,
                        format_amount(mismatch.expected),
                        format_amount(mismatch.actual),
                    )
                    .to_string()
                })
                .collect(),
        }
    }

    fn summary_view<'r>(&self, summary: &'r TripSummary) -> SummaryView<'r>
    where
        'a: 'r,
    {
        SummaryView {
            total_spent: format_amount(summary.total_spent),
            expense_count: summary.expense_count,
            average_per_expense: format_amount(summary.average_per_expense),
            total_to_settle: format_amount(summary.total_to_settle),
            by_category: summary
                .by_category
                .iter()
                .map(|(category, amount)| CategoryTotalView {
                    category,
                    amount: format_amount(*amount),
                })
                .collect(),
            by_payer: summary
                .by_payer
                .iter()
                .map(|(payer, amount)| PayerTotalView {
                    participant_id: payer.as_str(),
                    name: self.label(payer),
                    amount: format_amount(*amount),
                })
                .collect(),
        }
    }

    pub fn render_json(&self, result: &SettlementResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.view(result))
    }

    pub fn render_text(&self, result: &SettlementResult) -> String {
        let view = self.view(result);
        let mut out = String::new();

        let _ = writeln!(out, "{}", i18n::BALANCES_HEADING);
        let mut balances = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers([
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::CONSUMED),
                Cow::Borrowed(i18n::BALANCE),
            ]);
        for (row, balance) in view.balances.iter().zip(&result.balances) {
            let sign = if balance.balance.round_cents() > Money::ZERO {
                "+"
            } else {
                ""
            };
            balances = balances.row([
                Cow::Borrowed(&*row.name),
                Cow::Borrowed(row.paid.as_str()),
                Cow::Borrowed(row.consumed.as_str()),
                Cow::Owned(format!("{sign}{}", row.balance)),
            ]);
        }
        out.push_str(&balances.build());

        let summary = &view.summary;
        let _ = writeln!(
            out,
            "{}: {}",
            i18n::TOTAL_SPENT,
            self.with_currency(&summary.total_spent)
        );
        let _ = writeln!(out, "{}: {}", i18n::EXPENSE_COUNT, summary.expense_count);
        let _ = writeln!(
            out,
            "{}: {}",
            i18n::AVERAGE_PER_EXPENSE,
            self.with_currency(&summary.average_per_expense)
        );
        out.push('\n');

        if !summary.by_category.is_empty() {
            let _ = writeln!(out, "{}", i18n::SPENDING_HEADING);
            let mut categories = TextTableBuilder::new()
                .alignments(&[Alignment::Left, Alignment::Right])
                .headers([Cow::Borrowed(i18n::CATEGORY), Cow::Borrowed(i18n::AMOUNT)]);
            for total in &summary.by_category {
                categories = categories.row([
                    Cow::Borrowed(total.category),
                    Cow::Owned(self.with_currency(&total.amount)),
                ]);
            }
            out.push_str(&categories.build());

            // A single payer adds nothing over the total.
            if summary.by_payer.len() > 1 {
                out.push('\n');
                let mut payers = TextTableBuilder::new()
                    .alignments(&[Alignment::Left, Alignment::Right])
                    .headers([Cow::Borrowed(i18n::PAYER), Cow::Borrowed(i18n::AMOUNT)]);
                for total in &summary.by_payer {
                    payers = payers.row([
                        Cow::Borrowed(&*total.name),
                        Cow::Owned(self.with_currency(&total.amount)),
                    ]);
                }
                out.push_str(&payers.build());
            }
            out.push('\n');
        }

        let _ = writeln!(out, "{}", i18n::TRANSFERS_HEADING);
        if view.transfers.is_empty() {
            let _ = writeln!(out, "{}", i18n::ALL_SETTLED);
        } else {
            let mut transfers = TextTableBuilder::new()
                .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
                .headers([
                    Cow::Borrowed(i18n::FROM),
                    Cow::Borrowed(i18n::TO),
                    Cow::Borrowed(i18n::AMOUNT),
                ]);
            for transfer in &view.transfers {
                transfers = transfers.row([
                    Cow::Borrowed(&*transfer.from_name),
                    Cow::Borrowed(&*transfer.to_name),
                    Cow::Owned(self.with_currency(&transfer.amount)),
                ]);
            }
            out.push_str(&transfers.build());
            let _ = writeln!(
                out,
                "{}: {}",
                i18n::TOTAL_TO_SETTLE,
                self.with_currency(&summary.total_to_settle)
            );
        }

        if !view.split_warnings.is_empty() {
            out.push('\n');
            let _ = writeln!(out, "{}", i18n::WARNINGS_HEADING);
            for warning in &view.split_warnings {
                let _ = writeln!(out, "- {warning}");
            }
        }

        out
    }

    fn label<'r>(&self, participant_id: &'r ParticipantId) -> Cow<'r, str>
    where
        'a: 'r,
    {
        match self.directory.display_name(participant_id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Borrowed(participant_id.as_str()),
        }
    }

    fn with_currency(&self, amount: &str) -> String {
        match self.currency {
            Some(currency) => format!("{amount} {currency}"),
            None => amount.to_string(),
        }
    }
}

fn format_amount(amount: Money) -> String {
    let rounded = amount.round_cents();
    // Keeps tiny negatives from printing as "-0.00".
    let rounded = if rounded == Money::ZERO {
        Money::ZERO
    } else {
        rounded
    };
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tripsettle_application::{SettlementService, SplitPolicy, TripSnapshot};
    use tripsettle_domain::{DEFAULT_CATEGORY, Expense, ExpenseSplit, Participant};

    fn sample_trip() -> TripSnapshot {
        let participants = vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob"),
            Participant::new("c", "Carol"),
        ];
        let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id.clone()).collect();
        TripSnapshot::new(
            participants,
            vec![
                Expense::even("hotel", "a", Money::from_i64(90), &ids),
                Expense::even("museum", "b", Money::from_i64(30), &ids),
            ],
        )
    }

    fn settle(snapshot: &TripSnapshot) -> SettlementResult {
        SettlementService::new(snapshot, SplitPolicy::PassThrough)
            .settle_snapshot(snapshot)
            .expect("sample trip should settle")
    }

    #[test]
    fn text_report_lists_balances_and_transfers() {
        let snapshot = sample_trip();
        let result = settle(&snapshot);
        let presenter = SettlementPresenter::new(&snapshot.participants, Some("EUR"));

        let text = presenter.render_text(&result);

        assert!(text.contains("Alice"));
        assert!(text.contains("+50.00"));
        assert!(text.contains("-40.00"));
        assert!(text.contains("40.00 EUR"));
        assert!(text.contains(&format!("{}: 120.00 EUR", i18n::TOTAL_SPENT)));
        assert!(text.contains(&format!("{}: 2", i18n::EXPENSE_COUNT)));
        assert!(text.contains(&format!("{}: 60.00 EUR", i18n::AVERAGE_PER_EXPENSE)));
        assert!(text.contains(&format!("{}: 50.00 EUR", i18n::TOTAL_TO_SETTLE)));
        assert!(text.contains(i18n::PAYER));
        assert!(
            text.lines()
                .any(|line| line.starts_with(DEFAULT_CATEGORY) && line.ends_with("120.00 EUR"))
        );
        assert!(!text.contains(i18n::ALL_SETTLED));
    }

    #[test]
    fn single_payer_omits_payer_breakdown() {
        let participants = vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")];
        let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id.clone()).collect();
        let snapshot = TripSnapshot::new(
            participants,
            vec![Expense::even("hotel", "a", Money::from_i64(80), &ids).with_category("lodging")],
        );
        let result = settle(&snapshot);
        let presenter = SettlementPresenter::new(&snapshot.participants, None);

        let text = presenter.render_text(&result);

        assert!(text.contains("lodging"));
        assert!(!text.contains(i18n::PAYER));
    }

    #[test]
    fn sub_cent_balances_render_unsigned() {
        let snapshot = TripSnapshot::new(
            vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")],
            vec![Expense::new(
                "gum",
                "a",
                Money::new(4, 3),
                vec![ExpenseSplit::new("b", Money::new(4, 3))],
            )],
        );
        let result = settle(&snapshot);
        let presenter = SettlementPresenter::new(&snapshot.participants, None);

        let text = presenter.render_text(&result);

        assert!(!text.contains("+0.00"));
        assert!(!text.contains("-0.00"));
        assert!(text.contains(i18n::ALL_SETTLED));
    }

    #[test]
    fn text_report_for_settled_trip() {
        let snapshot = TripSnapshot::new(vec![Participant::new("a", "Alice")], Vec::new());
        let result = settle(&snapshot);
        let presenter = SettlementPresenter::new(&snapshot.participants, None);

        let text = presenter.render_text(&result);

        assert!(text.contains(i18n::ALL_SETTLED));
    }

    #[test]
    fn falls_back_to_participant_id_without_display_name() {
        let snapshot = sample_trip();
        let result = settle(&snapshot);
        let directory: HashMap<ParticipantId, String> =
            HashMap::from([(ParticipantId::from("a"), "Alice".to_string())]);
        let presenter = SettlementPresenter::new(&directory, None);

        let view = presenter.view(&result);

        assert_eq!(view.transfers[0].from_name, "c");
        assert_eq!(view.transfers[0].to_name, "Alice");
    }

    #[test]
    fn json_report_uses_two_decimal_strings() {
        let mut snapshot = sample_trip();
        snapshot.expenses.push(Expense::new(
            "snacks",
            "c",
            Money::new(1000, 2),
            vec![ExpenseSplit::new("a", Money::new(500, 2))],
        ));
        let result = settle(&snapshot);
        let presenter = SettlementPresenter::new(&snapshot.participants, Some("EUR"));

        let json = presenter.render_json(&result).expect("view should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["currency"], "EUR");
        assert_eq!(value["summary"]["totalSpent"], "130.00");
        assert_eq!(value["summary"]["expenseCount"], 3);
        assert_eq!(value["summary"]["totalToSettle"], "40.00");
        assert_eq!(value["summary"]["byPayer"][2]["name"], "Carol");
        assert_eq!(value["summary"]["byCategory"][0]["category"], DEFAULT_CATEGORY);
        assert_eq!(value["transfers"][0]["from"], "c");
        assert_eq!(value["transfers"][0]["amount"], "30.00");
        assert_eq!(value["splitWarnings"].as_array().map(Vec::len), Some(1));
    }
}
