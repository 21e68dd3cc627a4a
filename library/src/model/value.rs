use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Value held by an inline widget.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(untagged)]
pub enum WidgetValue {
    Integer(i64),
    Number(OrderedFloat<f64>),
    String(String),
    Boolean(bool),
    Array(Vec<WidgetValue>),
}

impl WidgetValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            WidgetValue::Number(n) => Some(n.into_inner()),
            WidgetValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WidgetValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            WidgetValue::Integer(i) => serde_json::Value::from(*i),
            WidgetValue::Number(n) => serde_json::Value::from(n.into_inner()),
            WidgetValue::String(s) => serde_json::Value::from(s.as_str()),
            WidgetValue::Boolean(b) => serde_json::Value::from(*b),
            WidgetValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(WidgetValue::to_json).collect())
            }
        }
    }
}

impl From<f64> for WidgetValue {
    fn from(value: f64) -> Self {
        WidgetValue::Number(OrderedFloat(value))
    }
}

impl From<i64> for WidgetValue {
    fn from(value: i64) -> Self {
        WidgetValue::Integer(value)
    }
}

impl From<bool> for WidgetValue {
    fn from(value: bool) -> Self {
        WidgetValue::Boolean(value)
    }
}

impl From<String> for WidgetValue {
    fn from(value: String) -> Self {
        WidgetValue::String(value)
    }
}

impl From<&str> for WidgetValue {
    fn from(value: &str) -> Self {
        WidgetValue::String(value.to_string())
    }
}

impl From<&serde_json::Value> for WidgetValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => WidgetValue::String("null".to_string()),
            serde_json::Value::Bool(b) => WidgetValue::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    WidgetValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    WidgetValue::Integer(u as i64)
                } else {
                    WidgetValue::Number(OrderedFloat(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => WidgetValue::String(s.clone()),
            serde_json::Value::Array(a) => WidgetValue::Array(a.iter().map(Into::into).collect()),
            serde_json::Value::Object(_) => WidgetValue::String(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_integers_stay_integers() {
        let value = WidgetValue::from(&serde_json::json!(512));
        assert_eq!(value, WidgetValue::Integer(512));
        assert_eq!(value.to_json(), serde_json::json!(512));
    }

    #[test]
    fn json_floats_become_numbers() {
        let value = WidgetValue::from(&serde_json::json!(7.5));
        assert_eq!(value.as_number(), Some(7.5));
    }
}
