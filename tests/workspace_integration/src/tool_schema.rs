//! Tool schema validity tests.
//!
//! Every tool in the MCP catalog must carry a name, a description, and a
//! JSON schema describing an object with typed properties.

use serde_json::Value;

/// Validates that a JSON schema has the required structure.
fn validate_json_schema(schema: &Value) -> Result<(), String> {
    let obj = schema
        .as_object()
        .ok_or_else(|| "Schema must be an object".to_string())?;

    if let Some(type_val) = obj.get("type") {
        if type_val != "object" {
            return Err(format!("Expected type 'object', got {:?}", type_val));
        }
    }

    if let Some(properties) = obj.get("properties") {
        if !properties.is_object() {
            return Err("Properties must be an object".to_string());
        }
    }

    Ok(())
}

/// Validates that a tool has required fields.
fn validate_tool(tool: &rmcp::model::Tool) -> Result<(), String> {
    if tool.name.is_empty() {
        return Err("Tool name cannot be empty".to_string());
    }

    if tool.description.is_none() || tool.description.as_ref().unwrap().is_empty() {
        return Err(format!("Tool '{}' must have a description", tool.name));
    }

    if tool.input_schema.is_empty() {
        return Err(format!("Tool '{}' must have an input schema", tool.name));
    }

    let schema_value = serde_json::to_value(&*tool.input_schema)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    validate_json_schema(&schema_value)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatsmith_mcp::tools::{ToolKind, catalog};

    /// Every catalog entry passes structural validation.
    #[test]
    fn test_all_catalog_tools_are_valid() {
        for tool in catalog() {
            validate_tool(&tool).unwrap_or_else(|e| panic!("{e}"));
        }
    }

    /// The catalog advertises exactly the five dispatchable tools, and
    /// every advertised name round-trips through dispatch lookup.
    #[test]
    fn test_catalog_and_dispatch_agree_on_names() {
        let tools = catalog();
        assert_eq!(tools.len(), 5);
        for tool in &tools {
            assert!(
                ToolKind::from_name(tool.name.as_ref()).is_some(),
                "advertised tool '{}' is not dispatchable",
                tool.name
            );
        }
    }

    /// Generation tool schemas expose the API key parameter so clients
    /// can discover it.
    #[test]
    fn test_credentialed_tools_expose_key_parameter() {
        for tool in catalog() {
            let kind = ToolKind::from_name(tool.name.as_ref()).unwrap();
            if !kind.requires_credential() {
                continue;
            }
            let properties = tool
                .input_schema
                .get("properties")
                .and_then(Value::as_object)
                .unwrap_or_else(|| panic!("{} has no properties", tool.name));
            assert!(
                properties.contains_key("elevenlabs_api_key"),
                "{} schema lacks elevenlabs_api_key",
                tool.name
            );
        }
    }

    /// Prompt is the only required music parameter; all tuning knobs
    /// have server-side defaults.
    #[test]
    fn test_music_schema_requires_only_prompt() {
        let tools = catalog();
        let music = tools.iter().find(|t| t.name == "generate_music").unwrap();
        let required = music
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "prompt");
    }

    #[test]
    fn test_json_schema_validation() {
        let valid_schema = serde_json::json!({
            "type": "object",
            "properties": {
                "prompt": { "type": "string" }
            },
            "required": ["prompt"]
        });
        assert!(validate_json_schema(&valid_schema).is_ok());

        let invalid_schema = serde_json::json!({ "type": "string" });
        assert!(validate_json_schema(&invalid_schema).is_err());
    }
}
