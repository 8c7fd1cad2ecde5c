//! Table configuration types (Functional Core - pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
}

impl AttributeType {
    /// DynamoDB's short type descriptor.
    pub fn descriptor(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Key attribute names in schema order (partition first).
    pub fn key_names(&self) -> Vec<String> {
        std::iter::once(&self.partition_key)
            .chain(self.sort_key.as_ref())
            .map(|key| key.name.clone())
            .collect()
    }
}

/// Returns the canonical table configuration for pieces.
/// This is a pure function - no I/O.
pub fn pieces_table_config() -> TableConfig {
    let schema = pieces::repository::key_schema();

    TableConfig {
        table_name: "Pieces".to_string(),
        partition_key: KeyAttribute {
            name: schema.partition_key.to_string(),
            attribute_type: AttributeType::String,
        },
        sort_key: schema.sort_key.map(|name| KeyAttribute {
            name: name.to_string(),
            attribute_type: AttributeType::Number,
        }),
        billing_mode: BillingMode::PayPerRequest,
    }
}
