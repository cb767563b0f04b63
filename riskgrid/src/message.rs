//! Inbound render envelopes.
//!
//! The host posts messages of the form
//!
//! ```json
//! {
//!   "type": "ui_component_render",
//!   "source": "agentos",
//!   "payload": { "columns": [{"key": "...", "label": "..."}], "rows": [{...}] }
//! }
//! ```
//!
//! Anything else is rejected with an [`EnvelopeError`].

use serde_json::Value;

use crate::error::EnvelopeError;
use crate::model::{CellValue, Column, Dataset, Row};

pub const MESSAGE_TYPE: &str = "ui_component_render";
pub const MESSAGE_SOURCE: &str = "agentos";

pub fn parse_envelope_str(text: &str) -> Result<Dataset, EnvelopeError> {
    let value: Value = serde_json::from_str(text)?;
    parse_envelope(&value)
}

pub fn parse_envelope(message: &Value) -> Result<Dataset, EnvelopeError> {
    let field = |name: &str| message.get(name).and_then(Value::as_str);

    if field("type") != Some(MESSAGE_TYPE) {
        return Err(EnvelopeError::WrongType(field("type").map(str::to_string)));
    }
    if field("source") != Some(MESSAGE_SOURCE) {
        return Err(EnvelopeError::WrongSource(
            field("source").map(str::to_string),
        ));
    }

    let payload = message
        .get("payload")
        .filter(|p| p.is_object())
        .ok_or(EnvelopeError::MissingPayload)?;

    let columns = payload
        .get("columns")
        .and_then(Value::as_array)
        .ok_or(EnvelopeError::MissingColumns)?;
    if columns.is_empty() {
        return Err(EnvelopeError::EmptyColumns);
    }
    let columns = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            serde_json::from_value::<Column>(column.clone())
                .map_err(|_| EnvelopeError::InvalidColumn { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = payload
        .get("rows")
        .and_then(Value::as_array)
        .ok_or(EnvelopeError::MissingRows)?
        .iter()
        .enumerate()
        .map(|(index, row)| {
            row.as_object()
                .map(|cells| {
                    cells
                        .iter()
                        .map(|(key, value)| (key.clone(), CellValue::from(value.clone())))
                        .collect::<Row>()
                })
                .ok_or(EnvelopeError::InvalidRow { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_well_formed_envelope() {
        let dataset = parse_envelope(&json!({
            "type": "ui_component_render",
            "source": "agentos",
            "payload": {
                "columns": [{"key": "severity", "label": "Severity"}],
                "rows": [{"severity": "4"}, {"severity": 2, "extra": null}]
            }
        }))
        .unwrap();

        assert_eq!(dataset.columns, vec![Column::new("severity", "Severity")]);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[1].get("severity"), &CellValue::Number(2.0));
    }

    #[test]
    fn test_rejects_wrong_source() {
        let err = parse_envelope(&json!({
            "type": "ui_component_render",
            "source": "someone-else",
            "payload": {"columns": [{"key": "a", "label": "A"}], "rows": []}
        }))
        .unwrap_err();
        assert!(matches!(err, EnvelopeError::WrongSource(Some(s)) if s == "someone-else"));
    }

    #[test]
    fn test_rejects_empty_columns() {
        let err = parse_envelope(&json!({
            "type": "ui_component_render",
            "source": "agentos",
            "payload": {"columns": [], "rows": []}
        }))
        .unwrap_err();
        assert!(matches!(err, EnvelopeError::EmptyColumns));
    }

    #[test]
    fn test_rejects_missing_rows() {
        let err = parse_envelope(&json!({
            "type": "ui_component_render",
            "source": "agentos",
            "payload": {"columns": [{"key": "a", "label": "A"}]}
        }))
        .unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingRows));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            parse_envelope_str("not json"),
            Err(EnvelopeError::Decode(_))
        ));
    }
}
