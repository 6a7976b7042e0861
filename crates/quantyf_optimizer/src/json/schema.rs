use schemars::schema_for;

use crate::json::types;

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(types::JsonTransportProblem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names_input_sections() {
        let schema: serde_json::Value =
            serde_json::from_str(&generate_json_schema().unwrap()).unwrap();

        let properties = schema["properties"].as_object().unwrap();
        for section in ["nodes", "hubs", "demands", "vehicles", "legs", "params"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
