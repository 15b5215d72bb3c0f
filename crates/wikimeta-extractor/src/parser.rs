//! Parse query result bindings into typed rows

use crate::error::ExtractorError;
use crate::types::{Cell, ResultRow};
use wikimeta_domain::Binding;

/// Column holding the property display name
pub const COL_PROPERTY_LABEL: &str = "propertyLabel";
/// Column holding the raw value
pub const COL_VALUE: &str = "value";
/// Column holding the resolved value label
pub const COL_VALUE_LABEL: &str = "valueLabel";
/// Column holding the value datatype
pub const COL_VALUE_TYPE: &str = "valueType";
/// Column holding the normalized quantity
pub const COL_NORMALIZED_VALUE: &str = "normalizedValue";
/// Column holding the entity description
pub const COL_DESCRIPTION: &str = "description";

/// Validate and convert every binding
///
/// A row missing `propertyLabel` or `value` makes the whole result invalid.
pub fn parse_bindings(bindings: Vec<Binding>) -> Result<Vec<ResultRow>, ExtractorError> {
    bindings
        .into_iter()
        .enumerate()
        .map(|(idx, binding)| parse_binding(idx, binding))
        .collect()
}

/// Convert a single binding
fn parse_binding(row: usize, mut binding: Binding) -> Result<ResultRow, ExtractorError> {
    let mut take = |column: &str| -> Cell { binding.remove(column).map(|c| c.value).into() };

    let property_label = match take(COL_PROPERTY_LABEL) {
        Cell::Present(value) => value,
        Cell::Absent => return Err(ExtractorError::MalformedRow { row, column: COL_PROPERTY_LABEL }),
    };
    let value = match take(COL_VALUE) {
        Cell::Present(value) => value,
        Cell::Absent => return Err(ExtractorError::MalformedRow { row, column: COL_VALUE }),
    };

    Ok(ResultRow {
        property_label,
        value,
        value_label: take(COL_VALUE_LABEL),
        value_type: take(COL_VALUE_TYPE),
        normalized_value: take(COL_NORMALIZED_VALUE),
        description: take(COL_DESCRIPTION),
    })
}
