//! Data layer payload
//!
//! A [`DataLayerObject`] is what gets pushed to an analytics sink: a flat JSON
//! object with a handful of reserved control keys and a bag of additional
//! analytics fields.
//!
//! # Reserved keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `event` | Event name, drives queue ordering |
//! | `ecommerce` | Transaction / product sub-object, `null` clears the sink slot |
//! | `content_name` | Optional content label, never emitted when absent |
//! | `page_type` | Logical page type, stamped from the page context when absent |
//! | `page_type_id` | Logical page id, stamped from the page context when absent |
//!
//! The field bag never holds a reserved key, so spreading it into the
//! dispatched object cannot shadow the control fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PayloadError, PayloadResult};

pub const EVENT_KEY: &str = "event";
pub const ECOMMERCE_KEY: &str = "ecommerce";
pub const CONTENT_NAME_KEY: &str = "content_name";
pub const PAGE_TYPE_KEY: &str = "page_type";
pub const PAGE_TYPE_ID_KEY: &str = "page_type_id";

/// Keys that live in dedicated fields and may not appear in the field bag
pub const RESERVED_KEYS: [&str; 5] = [
    EVENT_KEY,
    ECOMMERCE_KEY,
    CONTENT_NAME_KEY,
    PAGE_TYPE_KEY,
    PAGE_TYPE_ID_KEY,
];

/// Returns true if `key` is one of [`RESERVED_KEYS`]
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Analytics payload pushed to the data layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DataLayerObject {
    pub event: Option<String>,
    /// `None` = key absent, `Some(Value::Null)` = clearing signal
    pub ecommerce: Option<Value>,
    pub content_name: Option<String>,
    pub page_type: Option<String>,
    pub page_type_id: Option<String>,
    fields: Map<String, Value>,
}

impl DataLayerObject {
    /// Empty payload without an event name
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload carrying only an event name
    pub fn event(name: impl Into<String>) -> Self {
        Self {
            event: Some(name.into()),
            ..Self::default()
        }
    }

    /// `{ "ecommerce": null }`, resets the sink's retained ecommerce slot
    pub fn clear_ecommerce() -> Self {
        Self {
            ecommerce: Some(Value::Null),
            ..Self::default()
        }
    }

    pub fn with_ecommerce(mut self, ecommerce: Value) -> Self {
        self.ecommerce = Some(ecommerce);
        self
    }

    /// Serialize a typed ecommerce section into the payload
    pub fn with_ecommerce_of<T: Serialize>(self, ecommerce: &T) -> PayloadResult<Self> {
        let value = serde_json::to_value(ecommerce)
            .map_err(|e| PayloadError::Serialization(e.to_string()))?;
        Ok(self.with_ecommerce(value))
    }

    pub fn with_content_name(mut self, content_name: impl Into<String>) -> Self {
        self.content_name = Some(content_name.into());
        self
    }

    pub fn with_page(mut self, page_type: impl Into<String>, page_type_id: impl Into<String>) -> Self {
        self.page_type = Some(page_type.into());
        self.page_type_id = Some(page_type_id.into());
        self
    }

    /// Builder form of [`Self::insert_field`]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> PayloadResult<Self> {
        self.insert_field(key, value)?;
        Ok(self)
    }

    /// Insert an additional analytics field, returning the previous value
    pub fn insert_field(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> PayloadResult<Option<Value>> {
        let key = key.into();
        if is_reserved_key(&key) {
            return Err(PayloadError::ReservedKey(key));
        }
        Ok(self.fields.insert(key, value.into()))
    }

    /// Merge every entry of `fields` into the bag, rejecting reserved keys
    pub fn extend_fields(&mut self, fields: Map<String, Value>) -> PayloadResult<()> {
        if let Some(key) = fields.keys().find(|k| is_reserved_key(k)) {
            return Err(PayloadError::ReservedKey(key.clone()));
        }
        self.fields.extend(fields);
        Ok(())
    }

    /// Merge a serializable struct's fields into the bag
    pub fn with_fields_of<T: Serialize>(mut self, fields: &T) -> PayloadResult<Self> {
        match serde_json::to_value(fields).map_err(|e| PayloadError::Serialization(e.to_string()))? {
            Value::Object(map) => {
                self.extend_fields(map)?;
                Ok(self)
            }
            _ => Err(PayloadError::NotAnObject),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// True when the payload carries a non-null ecommerce section
    pub fn has_ecommerce(&self) -> bool {
        matches!(&self.ecommerce, Some(v) if !v.is_null())
    }

    /// True when the payload carries the `ecommerce` key at all (null
    /// included), except for the bare reset object itself
    pub fn has_ecommerce_key(&self) -> bool {
        self.ecommerce.is_some() && !self.is_clear_signal()
    }

    /// True for the bare `{ "ecommerce": null }` reset object
    pub fn is_clear_signal(&self) -> bool {
        matches!(self.ecommerce, Some(Value::Null))
            && self.event.is_none()
            && self.content_name.is_none()
            && self.page_type.is_none()
            && self.page_type_id.is_none()
            && self.fields.is_empty()
    }

    /// Flatten into a single JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.clone().into())
    }
}

fn take_string(
    map: &mut Map<String, Value>,
    key: &'static str,
) -> PayloadResult<Option<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(PayloadError::InvalidField {
            field: key,
            expected: "a string",
        }),
    }
}

/// Page ids are often numeric (category ids), accept both
fn take_string_or_number(
    map: &mut Map<String, Value>,
    key: &'static str,
) -> PayloadResult<Option<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(PayloadError::InvalidField {
            field: key,
            expected: "a string or number",
        }),
    }
}

impl TryFrom<Map<String, Value>> for DataLayerObject {
    type Error = PayloadError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let event = take_string(&mut map, EVENT_KEY)?;
        // null is kept: it is the clearing signal, distinct from absence
        let ecommerce = map.remove(ECOMMERCE_KEY);
        let content_name = take_string(&mut map, CONTENT_NAME_KEY)?;
        let page_type = take_string(&mut map, PAGE_TYPE_KEY)?;
        let page_type_id = take_string_or_number(&mut map, PAGE_TYPE_ID_KEY)?;

        Ok(Self {
            event,
            ecommerce,
            content_name,
            page_type,
            page_type_id,
            fields: map,
        })
    }
}

impl TryFrom<Value> for DataLayerObject {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::try_from(map),
            _ => Err(PayloadError::NotAnObject),
        }
    }
}

impl From<DataLayerObject> for Map<String, Value> {
    fn from(obj: DataLayerObject) -> Self {
        let mut map = obj.fields;
        if let Some(event) = obj.event {
            map.insert(EVENT_KEY.into(), Value::String(event));
        }
        if let Some(ecommerce) = obj.ecommerce {
            map.insert(ECOMMERCE_KEY.into(), ecommerce);
        }
        if let Some(content_name) = obj.content_name {
            map.insert(CONTENT_NAME_KEY.into(), Value::String(content_name));
        }
        if let Some(page_type) = obj.page_type {
            map.insert(PAGE_TYPE_KEY.into(), Value::String(page_type));
        }
        if let Some(page_type_id) = obj.page_type_id {
            map.insert(PAGE_TYPE_ID_KEY.into(), Value::String(page_type_id));
        }
        map
    }
}
