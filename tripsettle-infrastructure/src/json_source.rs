use rust_decimal::Decimal;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tripsettle_application::{TripSnapshot, TripSource, TripSourceError};
use tripsettle_domain::{Expense, ExpenseSplit, Money, Participant, SplitType};

/// Reads a trip snapshot from a JSON document.
///
/// Keys are camelCase. The older traveler-based export (`travelers`,
/// `paidBy`, `travelerId`, `actualAmount`) is accepted as well.
pub struct JsonTripSource {
    origin: Origin,
}

enum Origin {
    File(PathBuf),
    Inline(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripDocument {
    name: Option<String>,
    currency: Option<String>,
    #[serde(alias = "travelers", default)]
    participants: Vec<ParticipantDocument>,
    #[serde(default)]
    expenses: Vec<ExpenseDocument>,
}

#[derive(Deserialize)]
struct ParticipantDocument {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseDocument {
    id: String,
    #[serde(alias = "paidBy")]
    payer_id: String,
    amount: Decimal,
    #[serde(default)]
    split_type: SplitTypeDocument,
    #[serde(default)]
    splits: Vec<SplitDocument>,
    description: Option<String>,
    category: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SplitDocument {
    #[serde(alias = "travelerId")]
    participant_id: String,
    #[serde(alias = "actualAmount")]
    amount: Decimal,
}

#[derive(Clone, Copy, Default, Deserialize)]
enum SplitTypeDocument {
    #[serde(rename = "EQUAL", alias = "equal")]
    Equal,
    #[serde(rename = "PERCENTAGE", alias = "percentage")]
    Percentage,
    #[default]
    #[serde(rename = "EXACT", alias = "exact", alias = "fixed")]
    Exact,
}

impl JsonTripSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            origin: Origin::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_json(content: impl Into<String>) -> Self {
        Self {
            origin: Origin::Inline(content.into()),
        }
    }

    fn read(&self) -> Result<String, TripSourceError> {
        match &self.origin {
            Origin::File(path) => {
                tracing::debug!(path = %path.display(), "Reading trip snapshot");
                Ok(fs::read_to_string(path)?)
            }
            Origin::Inline(content) => Ok(content.clone()),
        }
    }
}

impl TripSource for JsonTripSource {
    fn load(&self) -> Result<TripSnapshot, TripSourceError> {
        parse_snapshot(&self.read()?)
    }
}

pub fn parse_snapshot(content: &str) -> Result<TripSnapshot, TripSourceError> {
    let document: TripDocument = serde_json::from_str(content)
        .map_err(|err| TripSourceError::Malformed(err.to_string()))?;

    let participants = document
        .participants
        .into_iter()
        .map(|participant| {
            if participant.id.trim().is_empty() {
                return Err(TripSourceError::Invalid(
                    "participant id must not be empty".to_string(),
                ));
            }
            Ok(Participant::new(participant.id, participant.name))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let expenses = document
        .expenses
        .into_iter()
        .map(into_expense)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TripSnapshot {
        name: document.name,
        currency: document.currency,
        participants,
        expenses,
    })
}

fn into_expense(document: ExpenseDocument) -> Result<Expense, TripSourceError> {
    let amount = non_negative(document.amount, || {
        format!("expense '{}' has a negative amount", document.id)
    })?;

    let splits = document
        .splits
        .into_iter()
        .map(|split| {
            let share = non_negative(split.amount, || {
                format!(
                    "expense '{}' has a negative split for '{}'",
                    document.id, split.participant_id
                )
            })?;
            Ok(ExpenseSplit::new(split.participant_id, share))
        })
        .collect::<Result<Vec<_>, TripSourceError>>()?;

    let mut expense = Expense::new(document.id, document.payer_id, amount, splits)
        .with_split_type(document.split_type.into());
    if let Some(description) = document.description {
        expense = expense.with_description(description);
    }
    if let Some(category) = document.category {
        expense = expense.with_category(category);
    }
    Ok(expense)
}

fn non_negative(
    value: Decimal,
    describe: impl FnOnce() -> String,
) -> Result<Money, TripSourceError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(TripSourceError::Invalid(describe()))
    } else {
        Ok(Money::from_decimal(value))
    }
}

impl From<SplitTypeDocument> for SplitType {
    fn from(value: SplitTypeDocument) -> Self {
        match value {
            SplitTypeDocument::Equal => SplitType::Equal,
            SplitTypeDocument::Percentage => SplitType::Percentage,
            SplitTypeDocument::Exact => SplitType::Exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tripsettle_domain::ParticipantId;

    const TRIP: &str = r#"{
        "name": "Lisbon",
        "currency": "EUR",
        "participants": [
            {"id": "a", "name": "Alice"},
            {"id": "b", "name": "Bob"}
        ],
        "expenses": [
            {
                "id": "e1",
                "tripId": "t1",
                "payerId": "a",
                "amount": 12.5,
                "splitType": "EQUAL",
                "date": "2024-05-01",
                "description": "Pastéis",
                "category": "food",
                "splits": [
                    {"participantId": "a", "amount": "6.25"},
                    {"participantId": "b", "amount": 6.25}
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_trip_document() {
        let snapshot = JsonTripSource::from_json(TRIP)
            .load()
            .expect("trip should parse");

        assert_eq!(snapshot.name.as_deref(), Some("Lisbon"));
        assert_eq!(snapshot.currency.as_deref(), Some("EUR"));
        assert_eq!(
            snapshot.participants,
            vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")]
        );

        let expense = &snapshot.expenses[0];
        assert_eq!(expense.payer_id, ParticipantId::from("a"));
        assert_eq!(expense.amount, Money::new(1250, 2));
        assert_eq!(expense.split_type, SplitType::Equal);
        assert_eq!(expense.description.as_deref(), Some("Pastéis"));
        assert_eq!(expense.category.as_deref(), Some("food"));
        assert_eq!(expense.split_total(), expense.amount);
    }

    #[test]
    fn accepts_traveler_export_layout() {
        let content = r#"{
            "travelers": [{"id": "t1", "name": "Ana"}, {"id": "t2", "name": "Rui"}],
            "expenses": [{
                "id": "x",
                "paidBy": "t1",
                "amount": 40,
                "splitType": "fixed",
                "splits": [
                    {"travelerId": "t1", "actualAmount": 10},
                    {"travelerId": "t2", "actualAmount": 30}
                ]
            }]
        }"#;

        let snapshot = parse_snapshot(content).expect("export should parse");

        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.expenses[0].split_type, SplitType::Exact);
        assert_eq!(snapshot.expenses[0].description, None);
        assert_eq!(snapshot.expenses[0].category, None);
        assert_eq!(
            snapshot.expenses[0].splits[1],
            ExpenseSplit::new("t2", Money::from_i64(30))
        );
    }

    #[rstest]
    #[case::negative_amount(
        r#"{"participants": [], "expenses": [{"id": "e1", "payerId": "a", "amount": -5}]}"#
    )]
    #[case::negative_split(
        r#"{"participants": [], "expenses": [{"id": "e1", "payerId": "a", "amount": 5,
            "splits": [{"participantId": "a", "amount": -1}]}]}"#
    )]
    #[case::blank_participant_id(r#"{"participants": [{"id": " ", "name": "x"}]}"#)]
    fn rejects_invalid_values(#[case] content: &str) {
        let err = parse_snapshot(content).expect_err("invalid trip should be rejected");
        assert!(matches!(err, TripSourceError::Invalid(_)), "{err}");
    }

    #[rstest]
    #[case::not_json("participants: []")]
    #[case::missing_payer(r#"{"expenses": [{"id": "e1", "amount": 5}]}"#)]
    #[case::unknown_split_type(
        r#"{"expenses": [{"id": "e1", "payerId": "a", "amount": 5, "splitType": "SHARES"}]}"#
    )]
    fn rejects_malformed_documents(#[case] content: &str) {
        let err = parse_snapshot(content).expect_err("malformed trip should be rejected");
        assert!(matches!(err, TripSourceError::Malformed(_)), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonTripSource::from_path("/nonexistent/tripsettle/trip.json")
            .load()
            .expect_err("missing file should fail");
        assert!(matches!(err, TripSourceError::Io(_)));
    }
}
