//! Shared types between frontend and backend
//!
//! These types are used by both:
//! - the axum catalog server (native Rust)
//! - the Dioxus dashboard (WASM)
//!
//! Serializable with serde for JSON over HTTP. Field names are camelCase on
//! the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Server-assigned product identity
pub type ProductId = i64;

/// Server-assigned parameter identity
pub type ParameterId = i64;

/// Server-assigned value row identity
pub type ValueRowId = i64;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Products & Parameters
// ============================================================================

/// Declared type of a parameter. Advisory only: values are free text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
}

impl DataType {
    pub const ALL: [DataType; 4] = [
        DataType::String,
        DataType::Number,
        DataType::Boolean,
        DataType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Number => "Number",
            DataType::Boolean => "Boolean",
            DataType::Date => "Date",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataType(pub String);

impl fmt::Display for UnknownDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown data type '{}'", self.0)
    }
}

impl std::error::Error for UnknownDataType {}

impl FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDataType(s.to_string()))
    }
}

/// Persisted parameter of a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: ParameterId,
    pub parameter_name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub range: String,
}

impl Parameter {
    pub fn to_draft(&self) -> ParameterDraft {
        ParameterDraft {
            id: Some(self.id),
            parameter_name: self.parameter_name.clone(),
            data_type: self.data_type,
            range: self.range.clone(),
        }
    }
}

/// Parameter as edited in a form; `id` is absent until the server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ParameterId>,
    pub parameter_name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub range: String,
}

/// Product with its ordered parameter list.
///
/// Parameter order is insertion order and decides which column of a value
/// row each parameter maps to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Product {
    pub fn parameter(&self, parameter_id: ParameterId) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == parameter_id)
    }
}

/// POST /login/products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDraft>,
}

/// PUT /login/products/{id}/parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDraft>,
}

/// Body of the single-parameter add and update calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRequest {
    pub parameter_name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub range: String,
}

impl From<&ParameterDraft> for ParameterRequest {
    fn from(draft: &ParameterDraft) -> Self {
        Self {
            parameter_name: draft.parameter_name.clone(),
            data_type: draft.data_type,
            range: draft.range.clone(),
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// One column of a value row as submitted. The row name is repeated on
/// every entry of the batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    pub name: String,
    pub parameter_id: ParameterId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

/// POST /login/products/{id}/values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveValuesRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub values: Vec<ValueEntry>,
}

/// One persisted cell of a value row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedCell {
    pub parameter_id: ParameterId,
    pub parameter_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

/// Persisted named value row: one cell per parameter, in parameter order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValueRow {
    pub id: ValueRowId,
    pub name: String,
    #[serde(default)]
    pub cells: Vec<SavedCell>,
}

impl ValueRow {
    pub fn value_for(&self, parameter_id: ParameterId) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.parameter_id == parameter_id)
            .map(|c| c.value.as_str())
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /login/authenticate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub token_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}

impl LoginResponse {
    pub fn accepted(token_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            token_id: Some(token_id.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token_id: None,
        }
    }
}
