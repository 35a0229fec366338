//! Configurable response shaping.

use serde_json::{Map, Value};

use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;
use tokenward_entity::token::TokenRecord;

/// Ordered JSON object returned by login, verify and refresh.
pub type ResponsePayload = Map<String, Value>;

const IDENTITY_PREFIX: &str = "identity.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Record(String),
    Identity(String),
}

/// Builds response payloads from a validated, ordered list of field names.
///
/// Record fields are named directly (`access_token`); identity attributes
/// use the `identity.<attr>` form. Keys in the payload are the configured
/// names.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    fields: Vec<(String, Field)>,
}

impl ResponseBuilder {
    /// Validate the configured field names.
    pub fn new(names: &[String]) -> AppResult<Self> {
        let fields = names
            .iter()
            .map(|name| Ok((name.clone(), Self::parse(name)?)))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self { fields })
    }

    fn parse(name: &str) -> AppResult<Field> {
        if let Some(attr) = name.strip_prefix(IDENTITY_PREFIX) {
            if Identity::ATTRIBUTES.contains(&attr) {
                return Ok(Field::Identity(attr.to_string()));
            }
        } else if TokenRecord::FIELDS.contains(&name) {
            return Ok(Field::Record(name.to_string()));
        }
        Err(AppError::configuration(format!(
            "Unknown field '{name}' in token.response_fields"
        )))
    }

    /// Assemble the payload for a record and its owner.
    pub fn build(&self, record: &TokenRecord, identity: &Identity) -> ResponsePayload {
        self.fields
            .iter()
            .filter_map(|(key, field)| {
                let value = match field {
                    Field::Record(name) => record.field(name),
                    Field::Identity(attr) => identity.attribute(attr),
                };
                value.map(|v| (key.clone(), v))
            })
            .collect()
    }
}
