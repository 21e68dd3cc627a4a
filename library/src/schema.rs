//! Declared input/output schemas of node types.
//!
//! The host describes every field as `[type, options]` or `[[choices...], options]`.
//! That shape is parsed once into [`FieldConfig`] and never re-inspected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GraphError;
use crate::model::{Size, WidgetValue};

/// Link type tag reported for enumerated fields.
pub const COMBO_TYPE: &str = "COMBO";

/// Declared configuration of one input field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfig {
    /// A typed field such as `INT`, `FLOAT`, `STRING` or `LATENT`.
    Scalar {
        type_tag: String,
        #[serde(default)]
        options: Map<String, Value>,
    },
    /// A field restricted to an enumerated list of literals.
    Choice { values: Vec<String> },
}

impl FieldConfig {
    pub fn scalar(type_tag: &str) -> Self {
        FieldConfig::Scalar {
            type_tag: type_tag.to_string(),
            options: Map::new(),
        }
    }

    /// Scalar with options taken from a JSON object. Non-object values are ignored.
    pub fn scalar_with(type_tag: &str, options: Value) -> Self {
        FieldConfig::Scalar {
            type_tag: type_tag.to_string(),
            options: match options {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    pub fn choice<S: AsRef<str>>(values: &[S]) -> Self {
        FieldConfig::Choice {
            values: values.iter().map(|v| v.as_ref().to_string()).collect(),
        }
    }

    /// Parse the host's `[type, options]` wire shape.
    pub fn from_json(field: &str, value: &Value) -> Result<Self, GraphError> {
        let items = value
            .as_array()
            .ok_or_else(|| GraphError::schema(field, "expected [type, options]"))?;
        let head = items
            .first()
            .ok_or_else(|| GraphError::schema(field, "missing type tag"))?;
        let options = items
            .get(1)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        match head {
            Value::String(type_tag) => Ok(FieldConfig::Scalar {
                type_tag: type_tag.clone(),
                options,
            }),
            Value::Array(values) => Ok(FieldConfig::Choice {
                values: values
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            }),
            _ => Err(GraphError::schema(field, "type tag must be a string or a list")),
        }
    }

    /// Declared type tag; `COMBO` for choice fields.
    pub fn type_tag(&self) -> &str {
        match self {
            FieldConfig::Scalar { type_tag, .. } => type_tag,
            FieldConfig::Choice { .. } => COMBO_TYPE,
        }
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        match self {
            FieldConfig::Scalar { options, .. } => options.get(key),
            FieldConfig::Choice { .. } => None,
        }
    }

    pub fn default_value(&self) -> Option<WidgetValue> {
        match self {
            FieldConfig::Scalar { options, .. } => options.get("default").map(WidgetValue::from),
            FieldConfig::Choice { values } => values.first().map(|v| WidgetValue::from(v.as_str())),
        }
    }
}

/// Declared inputs of a node type, partitioned into required and optional fields.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct InputSchema {
    pub required: Vec<(String, FieldConfig)>,
    #[serde(default)]
    pub optional: Vec<(String, FieldConfig)>,
}

impl InputSchema {
    pub fn required_field(&self, name: &str) -> Option<&FieldConfig> {
        self.required.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn optional_field(&self, name: &str) -> Option<&FieldConfig> {
        self.optional.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Required fields take precedence over optional ones.
    pub fn lookup(&self, name: &str) -> Option<&FieldConfig> {
        self.required_field(name).or_else(|| self.optional_field(name))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(|(n, c)| (n.as_str(), c))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OutputDefinition {
    pub name: String,
    pub data_type: String,
}

impl OutputDefinition {
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
        }
    }
}

/// Definition of a node type, registered in the `NodeTypeRegistry`.
///
/// Node instances are `Node` structs whose `type_id` references one of these.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeTypeDefinition {
    /// Unique type identifier (e.g. "EmptyLatentImage")
    pub type_id: String,
    /// Human-readable name
    pub display_name: String,
    /// Slash separated menu category (e.g. "image/upscaling")
    pub category: String,
    pub description: String,
    pub input: InputSchema,
    pub outputs: Vec<OutputDefinition>,
    /// Size applied to new instances instead of the computed one
    pub default_size: Option<Size>,
}

impl NodeTypeDefinition {
    pub fn new(type_id: &str, display_name: &str, category: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            display_name: display_name.to_string(),
            category: category.to_string(),
            description: String::new(),
            input: InputSchema::default(),
            outputs: Vec::new(),
            default_size: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_required(mut self, fields: Vec<(&str, FieldConfig)>) -> Self {
        self.input.required = fields.into_iter().map(|(n, c)| (n.to_string(), c)).collect();
        self
    }

    pub fn with_optional(mut self, fields: Vec<(&str, FieldConfig)>) -> Self {
        self.input.optional = fields.into_iter().map(|(n, c)| (n.to_string(), c)).collect();
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<OutputDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = Some(size);
        self
    }

    /// Build a definition from the host's object-info JSON for one node type.
    pub fn from_object_info(type_id: &str, info: &Value) -> Result<Self, GraphError> {
        let text = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);

        let mut def = NodeTypeDefinition::new(
            type_id,
            &text("display_name").unwrap_or_else(|| type_id.to_string()),
            &text("category").unwrap_or_default(),
        );
        def.description = text("description").unwrap_or_default();
        def.input.required = parse_fields(info.pointer("/input/required"))?;
        def.input.optional = parse_fields(info.pointer("/input/optional"))?;

        let types = info.get("output").and_then(Value::as_array);
        let names = info.get("output_name").and_then(Value::as_array);
        if let Some(types) = types {
            for (i, ty) in types.iter().enumerate() {
                let data_type = match ty {
                    Value::String(s) => s.clone(),
                    Value::Array(_) => COMBO_TYPE.to_string(),
                    other => other.to_string(),
                };
                let name = names
                    .and_then(|n| n.get(i))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| data_type.clone());
                def.outputs.push(OutputDefinition { name, data_type });
            }
        }
        Ok(def)
    }
}

fn parse_fields(section: Option<&Value>) -> Result<Vec<(String, FieldConfig)>, GraphError> {
    let Some(Value::Object(fields)) = section else {
        return Ok(Vec::new());
    };
    fields
        .iter()
        .map(|(name, value)| Ok((name.clone(), FieldConfig::from_json(name, value)?)))
        .collect()
}
