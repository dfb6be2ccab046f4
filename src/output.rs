//! Serialization of command results.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::CommandError;

/// Render `value` as pretty JSON, or as YAML when `json` is false
pub fn render<T: Serialize + ?Sized>(json: bool, value: &T) -> Result<String, CommandError> {
    if json {
        serde_json::to_string_pretty(value)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|e| CommandError::Output(e.to_string()))
    } else {
        serde_yml::to_string(value).map_err(|e| CommandError::Output(e.to_string()))
    }
}

/// Print `value` to stdout in the selected format
pub fn print<T: Serialize + ?Sized>(json: bool, value: &T) -> Result<(), CommandError> {
    emit(&render(json, value)?)
}

/// Write already rendered output to stdout
pub fn emit(rendered: &str) -> Result<(), CommandError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| CommandError::Output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_json() {
        let out = render(true, &json!({"name": "EAP", "id": "1"})).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["name"], "EAP");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn renders_yaml_by_default() {
        let out = render(false, &json!({"name": "EAP"})).unwrap();
        assert_eq!(out, "name: EAP\n");
    }

    #[test]
    fn renders_lists() {
        let out = render(false, &vec![json!({"name": "EAP"}), json!({"name": "Quarkus"})]).unwrap();
        assert_eq!(out, "- name: EAP\n- name: Quarkus\n");
    }
}
