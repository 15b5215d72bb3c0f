//! Row and result types for extraction

use wikimeta_domain::PropertyMapping;

/// A single result cell: either bound to a lexical value or absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// The variable was bound
    Present(String),
    /// The variable was unbound in this row
    Absent,
}

impl Cell {
    /// Borrow the value if present
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Cell::Present(value) => Some(value),
            Cell::Absent => None,
        }
    }

    /// Whether the cell is bound
    pub fn is_present(&self) -> bool {
        matches!(self, Cell::Present(_))
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Absent, Cell::Present)
    }
}

/// One validated row of the property query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Display name of the property
    pub property_label: String,

    /// Raw value (entity URI or literal)
    pub value: String,

    /// Resolved label of the value
    pub value_label: Cell,

    /// Datatype URI of the value
    pub value_type: Cell,

    /// Quantity normalized to SI units
    pub normalized_value: Cell,

    /// Description of the queried entity
    pub description: Cell,
}

impl ResultRow {
    /// Row with only the required columns bound
    pub fn new(property_label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_label: property_label.into(),
            value: value.into(),
            value_label: Cell::Absent,
            value_type: Cell::Absent,
            normalized_value: Cell::Absent,
            description: Cell::Absent,
        }
    }
}

/// Result of extracting one entity
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Filtered, normalized properties
    pub properties: PropertyMapping,

    /// First entity description seen in the result rows
    pub description: Option<String>,

    /// Rows received from the endpoint
    pub rows_total: usize,

    /// Rows dropped by filtering or value resolution
    pub rows_dropped: usize,
}
