//! Turn order calculation
//!
//! Each description row is `name, initiative[, secondary]`. Participants act
//! in descending initiative; equal initiatives fall back to the secondary
//! value (usually dexterity), then to the order rows appear in the file.

use crate::error::EncounterError;
use crate::tabular::SourceRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub name: String,
    pub initiative: i64,
    /// Tie-break value, 0 when the column is missing or empty
    pub secondary: i64,
}

impl ParticipantRecord {
    /// Parse one row. `row` is the 1-based file line used in error messages.
    pub fn from_fields<S: AsRef<str>>(row: usize, fields: &[S]) -> Result<Self, EncounterError> {
        let malformed = |reason: String| EncounterError::MalformedRecord { row, reason };

        let [name, initiative, rest @ ..] = fields else {
            return Err(malformed(format!(
                "expected at least 2 fields, found {}",
                fields.len()
            )));
        };

        let initiative = initiative.as_ref().trim();
        let initiative = initiative
            .parse::<i64>()
            .map_err(|_| malformed(format!("initiative '{initiative}' is not an integer")))?;

        let secondary = match rest.first().map(|f| f.as_ref().trim()) {
            None | Some("") => 0,
            Some(value) => value
                .parse::<i64>()
                .map_err(|_| malformed(format!("tie-break '{value}' is not an integer")))?,
        };

        Ok(Self {
            name: name.as_ref().trim().to_string(),
            initiative,
            secondary,
        })
    }
}

/// Participant names in the order they act.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOrder(Vec<String>);

impl TurnOrder {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for TurnOrder {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

/// Sort parsed records into turn order.
///
/// `sort_by` is stable, so records equal on both keys keep their input order.
pub fn order_records(mut records: Vec<ParticipantRecord>) -> TurnOrder {
    records.sort_by(|a, b| {
        b.initiative
            .cmp(&a.initiative)
            .then_with(|| b.secondary.cmp(&a.secondary))
    });
    TurnOrder(records.into_iter().map(|r| r.name).collect())
}

/// Parse every row and compute the turn order.
///
/// Aborts on the first malformed row; no participant is ever dropped.
pub fn compute_order(rows: &[SourceRow]) -> Result<TurnOrder, EncounterError> {
    let records = rows
        .iter()
        .map(|row| ParticipantRecord::from_fields(row.line, row.fields.as_slice()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(order_records(records))
}
