//! Truth tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One input → output pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTableRow<'a> {
    /// Input label.
    pub input: &'a str,
    /// Output label.
    pub output: &'a str,
}

impl fmt::Display for TruthTableRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}

/// Append-only table of rows in basis-state enumeration order.
///
/// Serialized as parallel arrays, `{"input": [..], "output": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTruthTable")]
pub struct TruthTable {
    input: Vec<String>,
    output: Vec<String>,
}

#[derive(Deserialize)]
struct RawTruthTable {
    input: Vec<String>,
    output: Vec<String>,
}

impl TryFrom<RawTruthTable> for TruthTable {
    type Error = String;

    fn try_from(raw: RawTruthTable) -> Result<Self, Self::Error> {
        if raw.input.len() != raw.output.len() {
            return Err(format!(
                "truth table has {} inputs but {} outputs",
                raw.input.len(),
                raw.output.len()
            ));
        }
        Ok(Self {
            input: raw.input,
            output: raw.output,
        })
    }
}

impl TruthTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table with room for `rows` rows.
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            input: Vec::with_capacity(rows),
            output: Vec::with_capacity(rows),
        }
    }

    /// Append a row.
    pub fn push(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.input.push(input.into());
        self.output.push(output.into());
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Input labels in row order.
    pub fn inputs(&self) -> &[String] {
        &self.input
    }

    /// Output labels in row order.
    pub fn outputs(&self) -> &[String] {
        &self.output
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<TruthTableRow<'_>> {
        Some(TruthTableRow {
            input: self.input.get(index)?,
            output: self.output.get(index)?,
        })
    }

    /// Rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = TruthTableRow<'_>> + '_ {
        self.input
            .iter()
            .zip(&self.output)
            .map(|(input, output)| TruthTableRow { input, output })
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut table = TruthTable::new();
        table.push("0", "1");
        table.push("1", "0");

        assert_eq!(table.len(), 2);
        assert_eq!(table.inputs(), ["0", "1"]);
        assert_eq!(table.outputs(), ["1", "0"]);
        assert_eq!(
            table.row(1),
            Some(TruthTableRow {
                input: "1",
                output: "0"
            })
        );
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_serializes_as_parallel_arrays() {
        let mut table = TruthTable::with_capacity(1);
        table.push("01", "11");
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!({"input": ["01"], "output": ["11"]}));

        let back: TruthTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_rejects_ragged_json() {
        let json = serde_json::json!({"input": ["0", "1"], "output": ["0"]});
        assert!(serde_json::from_value::<TruthTable>(json).is_err());
    }

    #[test]
    fn test_display() {
        let mut table = TruthTable::new();
        table.push("0", "0");
        assert_eq!(table.to_string(), "0 -> 0\n");
    }
}
