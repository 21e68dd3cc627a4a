use graph_host::FieldConfig;
use graph_host::schema::COMBO_TYPE;

/// Display and link type derived from a field's declared configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetType {
    pub display_type: String,
    pub link_type: String,
}

/// Enumerated fields only link to slots carrying the identical, identically ordered literal list.
pub fn resolve_widget_type(config: &FieldConfig) -> WidgetType {
    match config {
        FieldConfig::Choice { values } => WidgetType {
            display_type: COMBO_TYPE.to_string(),
            link_type: values.join(","),
        },
        FieldConfig::Scalar { type_tag, .. } => WidgetType {
            display_type: type_tag.clone(),
            link_type: type_tag.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_joins_values() {
        let resolved = resolve_widget_type(&FieldConfig::choice(&["a", "b", "c"]));
        assert_eq!(resolved.display_type, "COMBO");
        assert_eq!(resolved.link_type, "a,b,c");
    }

    #[test]
    fn scalar_passes_through() {
        let resolved = resolve_widget_type(&FieldConfig::scalar("INT"));
        assert_eq!(resolved.display_type, "INT");
        assert_eq!(resolved.link_type, "INT");
    }
}
