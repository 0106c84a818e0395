use crate::query::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Document identifier, read from `objectID` (or `_id`) in JSON.
pub type DocumentId = String;

/// The closed set of facet kinds. The kind decides how a raw filter value
/// is parsed and which comparison the compiled predicate uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetType {
    #[default]
    Text,
    Integer,
    Float,
    Date,
    Distance,
}

impl FacetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetType::Text => "text",
            FacetType::Integer => "integer",
            FacetType::Float => "float",
            FacetType::Date => "date",
            FacetType::Distance => "distance",
        }
    }
}

impl std::fmt::Display for FacetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured facet.
///
/// `name` is the query-string parameter the facet listens on; `field_key` is
/// the document field it filters, or a comma-joined list of fields for
/// multi-key facets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetDefinition {
    pub name: String,
    #[serde(default)]
    pub field_key: String,
    #[serde(default)]
    pub facet_type: FacetType,
    /// Per-facet date pattern. Takes precedence over the field lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<String>,
}

impl FacetDefinition {
    pub fn new(name: impl Into<String>, field_key: impl Into<String>, facet_type: FacetType) -> Self {
        FacetDefinition {
            name: name.into(),
            field_key: field_key.into(),
            facet_type,
            date_format: None,
            distance_unit: None,
        }
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn with_distance_unit(mut self, unit: impl Into<String>) -> Self {
        self.distance_unit = Some(unit.into());
        self
    }

    pub fn is_multi_key(&self) -> bool {
        self.field_key.contains(',')
    }

    /// Sub-keys of a multi-key facet, trimmed. Empty entries are kept so
    /// that positions still line up with the `/`-joined values.
    pub fn field_keys(&self) -> Vec<&str> {
        self.field_key.split(',').map(str::trim).collect()
    }
}

/// One active query-string parameter, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFilter {
    pub facet_key: String,
    pub raw_value: String,
}

impl RawFilter {
    pub fn new(facet_key: impl Into<String>, raw_value: impl Into<String>) -> Self {
        RawFilter {
            facet_key: facet_key.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// Read access to document fields, used when evaluating predicates.
///
/// Every accessor returns all values of a (possibly multi-valued) field. A
/// predicate accepts the document when any value satisfies it.
pub trait FieldAccessor {
    fn text_values(&self, field: &str) -> Vec<String>;
    fn integer_values(&self, field: &str) -> Vec<i64>;
    fn float_values(&self, field: &str) -> Vec<f64>;
    fn locations(&self, field: &str) -> Vec<Coordinates>;
}

/// A document with an ID and a set of named fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: HashMap<String, FieldValue>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Parse a [`Document`] from a JSON object.
    ///
    /// Accepts either `"objectID"` or `"_id"` as the document identifier. All
    /// other fields are converted to [`FieldValue`]s; nulls and booleans are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FacetError::Json`] if the value is not a JSON object
    /// or carries no identifier.
    pub fn from_json(json: &serde_json::Value) -> crate::error::Result<Self> {
        use crate::error::FacetError;

        let obj = json
            .as_object()
            .ok_or_else(|| FacetError::Json("Expected JSON object".to_string()))?;

        let id = obj
            .get("_id")
            .or_else(|| obj.get("objectID"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| FacetError::Json("Missing objectID".to_string()))?
            .to_string();

        let mut fields = HashMap::new();
        for (key, val) in obj {
            if key == "_id" || key == "objectID" {
                continue;
            }
            if let Some(field_value) = json_value_to_field_value(val) {
                fields.insert(key.clone(), field_value);
            }
        }

        Ok(Document { id, fields })
    }
}

pub fn json_value_to_field_value(val: &serde_json::Value) -> Option<FieldValue> {
    match val {
        serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(FieldValue::Integer(i))
            } else {
                n.as_f64().map(FieldValue::Float)
            }
        }
        serde_json::Value::Array(arr) => {
            let items: Vec<FieldValue> = arr.iter().filter_map(json_value_to_field_value).collect();
            if items.is_empty() {
                None
            } else {
                Some(FieldValue::Array(items))
            }
        }
        serde_json::Value::Object(obj) => {
            let mut nested = HashMap::new();
            for (k, v) in obj {
                if let Some(field_val) = json_value_to_field_value(v) {
                    nested.insert(k.clone(), field_val);
                }
            }
            if nested.is_empty() {
                None
            } else {
                Some(FieldValue::Object(nested))
            }
        }
        serde_json::Value::Null => None,
        serde_json::Value::Bool(_) => None,
    }
}

/// A dynamically-typed field value stored in a [`Document`].
///
/// Dates are stored as already-formatted strings ([`FieldValue::Text`]),
/// the same way the search index keeps them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Object(HashMap<String, FieldValue>),
    Array(Vec<FieldValue>),
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn as_location(&self) -> Option<Coordinates> {
        match self {
            FieldValue::Object(map) => {
                let lat = map.get("lat")?.as_float()?;
                let lng = map.get("lng")?.as_float()?;
                Some(Coordinates::new(lat, lng))
            }
            _ => None,
        }
    }

    fn flatten<'a>(&'a self, out: &mut Vec<&'a FieldValue>) {
        match self {
            FieldValue::Array(items) => items.iter().for_each(|i| i.flatten(out)),
            other => out.push(other),
        }
    }
}

impl Document {
    fn values(&self, field: &str) -> Vec<&FieldValue> {
        let mut out = Vec::new();
        if let Some(v) = self.fields.get(field) {
            v.flatten(&mut out);
        }
        out
    }
}

impl FieldAccessor for Document {
    /// Text view of a field. Numbers render with their default formatting,
    /// objects have no text view.
    fn text_values(&self, field: &str) -> Vec<String> {
        self.values(field)
            .into_iter()
            .filter_map(|v| match v {
                FieldValue::Text(s) => Some(s.clone()),
                FieldValue::Integer(i) => Some(i.to_string()),
                FieldValue::Float(f) => Some(f.to_string()),
                _ => None,
            })
            .collect()
    }

    fn integer_values(&self, field: &str) -> Vec<i64> {
        self.values(field)
            .into_iter()
            .filter_map(|v| match v {
                FieldValue::Integer(i) => Some(*i),
                FieldValue::Text(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect()
    }

    fn float_values(&self, field: &str) -> Vec<f64> {
        self.values(field)
            .into_iter()
            .filter_map(|v| match v {
                FieldValue::Text(s) => s.trim().parse().ok(),
                other => other.as_float(),
            })
            .collect()
    }

    fn locations(&self, field: &str) -> Vec<Coordinates> {
        self.values(field)
            .into_iter()
            .filter_map(FieldValue::as_location)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- FacetDefinition ---

    #[test]
    fn definition_deserializes_camel_case() {
        let json = serde_json::json!({
            "name": "published",
            "fieldKey": "published_date",
            "facetType": "date",
            "dateFormat": "yyyyMMdd"
        });
        let def: FacetDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(def.name, "published");
        assert_eq!(def.field_key, "published_date");
        assert_eq!(def.facet_type, FacetType::Date);
        assert_eq!(def.date_format.as_deref(), Some("yyyyMMdd"));
        assert!(def.distance_unit.is_none());
    }

    #[test]
    fn definition_type_defaults_to_text() {
        let json = serde_json::json!({"name": "color", "fieldKey": "color"});
        let def: FacetDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(def.facet_type, FacetType::Text);
    }

    #[test]
    fn multi_key_detection() {
        let single = FacetDefinition::new("geo", "lat", FacetType::Float);
        let multi = FacetDefinition::new("geo", "lat, lon", FacetType::Float);
        assert!(!single.is_multi_key());
        assert!(multi.is_multi_key());
        assert_eq!(multi.field_keys(), vec!["lat", "lon"]);
    }

    #[test]
    fn field_keys_keep_empty_positions() {
        let def = FacetDefinition::new("x", "a,,b", FacetType::Text);
        assert_eq!(def.field_keys(), vec!["a", "", "b"]);
    }

    #[test]
    fn facet_type_display() {
        assert_eq!(FacetType::Distance.to_string(), "distance");
    }

    // --- Document::from_json ---

    #[test]
    fn from_json_with_object_id() {
        let json = serde_json::json!({"objectID": "abc", "title": "Hello"});
        let doc = Document::from_json(&json).unwrap();
        assert_eq!(doc.id, "abc");
        assert_eq!(doc.fields["title"], FieldValue::Text("Hello".to_string()));
    }

    #[test]
    fn from_json_missing_id_errors() {
        let json = serde_json::json!({"title": "No ID"});
        assert!(Document::from_json(&json).is_err());
    }

    #[test]
    fn from_json_not_object_errors() {
        let json = serde_json::json!("just a string");
        assert!(Document::from_json(&json).is_err());
    }

    #[test]
    fn from_json_null_and_bool_skipped() {
        let json =
            serde_json::json!({"objectID": "1", "active": true, "deleted": null, "name": "ok"});
        let doc = Document::from_json(&json).unwrap();
        assert!(!doc.fields.contains_key("active"));
        assert!(!doc.fields.contains_key("deleted"));
        assert!(doc.fields.contains_key("name"));
    }

    // --- FieldAccessor ---

    #[test]
    fn text_values_render_numbers() {
        let doc = Document::new("1")
            .with_field("n", FieldValue::Integer(10))
            .with_field("f", FieldValue::Float(2.5));
        assert_eq!(doc.text_values("n"), vec!["10".to_string()]);
        assert_eq!(doc.text_values("f"), vec!["2.5".to_string()]);
    }

    #[test]
    fn arrays_are_flattened() {
        let doc = Document::new("1").with_field(
            "tags",
            FieldValue::Array(vec![
                FieldValue::Text("a".into()),
                FieldValue::Array(vec![FieldValue::Text("b".into())]),
            ]),
        );
        assert_eq!(doc.text_values("tags"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn missing_field_has_no_values() {
        let doc = Document::new("1");
        assert!(doc.text_values("nope").is_empty());
        assert!(doc.integer_values("nope").is_empty());
        assert!(doc.locations("nope").is_empty());
    }

    #[test]
    fn integer_values_parse_numeric_text() {
        let doc = Document::new("1").with_field("n", FieldValue::Text(" 42 ".into()));
        assert_eq!(doc.integer_values("n"), vec![42]);
    }

    #[test]
    fn float_values_accept_integers() {
        let doc = Document::new("1").with_field("n", FieldValue::Integer(3));
        assert_eq!(doc.float_values("n"), vec![3.0]);
    }

    #[test]
    fn locations_from_lat_lng_objects() {
        let json = serde_json::json!({
            "objectID": "1",
            "location": [{"lat": 52.37, "lng": 4.89}, {"lat": 48, "lng": 2}]
        });
        let doc = Document::from_json(&json).unwrap();
        let locs = doc.locations("location");
        assert_eq!(locs.len(), 2);
        assert_eq!(locs[0], Coordinates::new(52.37, 4.89));
        assert_eq!(locs[1], Coordinates::new(48.0, 2.0));
    }
}
