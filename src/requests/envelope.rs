use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use super::error::{RequestError, RequestResult};

/// Response wrapper every API endpoint answers with.
///
/// The server leaves out empty fields, so all three are optional on the wire.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Envelope {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub err: Option<String>,
}

/// Any JSON value, read the way the browser reads a condition:
/// `null`, `false`, `0` and `""` are false, everything else true.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

impl Envelope {
    pub fn parse(text: &str) -> RequestResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Payload of a successful envelope, or the server's message as a rejection.
    pub fn into_data<D: DeserializeOwned>(self) -> RequestResult<D> {
        if !self.success {
            return Err(RequestError::Rejected(self.err.unwrap_or_default()));
        }
        Ok(serde_json::from_value(self.data)?)
    }
}
