//! Common types shared across tools

use serde_json::Value;

/// JSON-LD objects in document order, flattened out of arrays and `@graph`.
pub type Jsonld = Vec<Value>;
