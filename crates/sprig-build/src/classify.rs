//! Argument Classifier
//!
//! Decides how a value merges into a being-built element. Classification
//! checks in fixed priority order: string, list, attribute map, node;
//! anything else is rejected.

use sprig_dom::{AttrMap, NodeId};

use crate::{BuildError, BuildResult, Value};

/// A builder argument after classification
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Appended as a text child
    Text(String),
    /// Applied as element attributes (last write wins)
    Attrs(AttrMap),
    /// Appended as a child node
    Node(NodeId),
    /// Items applied in order, each classified on its own
    List(Vec<Arg>),
}

/// Classify a dynamic value into an [`Arg`]
pub fn classify(value: Value) -> BuildResult<Arg> {
    match value {
        Value::Text(s) => Ok(Arg::Text(s)),
        Value::List(items) => {
            let args = items.into_iter().map(classify).collect::<BuildResult<Vec<_>>>()?;
            Ok(Arg::List(args))
        }
        Value::Map(entries) => {
            let mut attrs = AttrMap::new();
            for (name, value) in entries {
                let value = attr_value(&name, value)?;
                attrs.set(name, value);
            }
            Ok(Arg::Attrs(attrs))
        }
        Value::Node(id) => Ok(Arg::Node(id)),
        other => Err(BuildError::InvalidArgumentType {
            type_name: other.type_name(),
        }),
    }
}

/// Attribute values must be scalar; non-string scalars take their display form
fn attr_value(name: &str, value: Value) -> BuildResult<String> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(BuildError::InvalidAttributeEntry {
            name: name.to_string(),
            type_name: other.type_name(),
        }),
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<AttrMap> for Arg {
    fn from(attrs: AttrMap) -> Self {
        Arg::Attrs(attrs)
    }
}

impl From<NodeId> for Arg {
    fn from(id: NodeId) -> Self {
        Arg::Node(id)
    }
}

impl From<Vec<Arg>> for Arg {
    fn from(items: Vec<Arg>) -> Self {
        Arg::List(items)
    }
}
