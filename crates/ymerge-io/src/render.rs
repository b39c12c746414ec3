//! Rendering the merged mapping as text.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use ymerge_types::{Mapping, Node, Scalar};

use crate::error::{IoError, Result};

/// Output encoding for the merged document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[value(alias = "yml")]
    Yaml,
    Json,
}

/// Serialize `mapping` in the requested format.
///
/// Keys come out in sorted order. The returned text always ends with a
/// newline.
pub fn render(mapping: Mapping, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            let value = serde_yaml::Value::from(Node::Mapping(mapping));
            serde_yaml::to_string(&value).map_err(|e| IoError::Serialize(e.to_string()))
        }
        OutputFormat::Json => {
            let value = json_value(Node::Mapping(mapping))?;
            let mut text =
                serde_json::to_string_pretty(&value).map_err(|e| IoError::Serialize(e.to_string()))?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Write rendered text to `destination`, or to stdout when `None`.
pub fn write_output(text: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => fs::write(path, text).map_err(|error| IoError::Write {
            destination: path.display().to_string(),
            error,
        }),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|error| IoError::Write {
                    destination: "<stdout>".to_string(),
                    error,
                })
        }
    }
}

// JSON object keys are strings, so scalar keys are stringified. Two keys that
// stringify the same (`1` and `"1"`) cannot both be represented.
fn json_value(node: Node) -> Result<serde_json::Value> {
    use serde_json::Value;

    Ok(match node {
        Node::Scalar(Scalar::Null) => Value::Null,
        Node::Scalar(Scalar::Bool(b)) => Value::Bool(b),
        Node::Scalar(Scalar::Int(i)) => {
            if let Ok(small) = i64::try_from(i) {
                Value::from(small)
            } else if let Ok(unsigned) = u64::try_from(i) {
                Value::from(unsigned)
            } else {
                return Err(IoError::Serialize(format!("integer {i} is out of range for JSON")));
            }
        }
        Node::Scalar(Scalar::Float(x)) => serde_json::Number::from_f64(x.get())
            .map(Value::Number)
            .ok_or_else(|| IoError::Serialize(format!("float {x} cannot be represented in JSON")))?,
        Node::Scalar(Scalar::String(s)) => Value::String(s),
        Node::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(json_value)
                .collect::<Result<_>>()?,
        ),
        Node::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let name = key.to_string();
                if object.contains_key(&name) {
                    return Err(IoError::Serialize(format!(
                        "key '{name}' is duplicated after conversion to a JSON string"
                    )));
                }
                object.insert(name, json_value(value)?);
            }
            Value::Object(object)
        }
    })
}
