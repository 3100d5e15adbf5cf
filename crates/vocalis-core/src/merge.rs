//! Deep merge of JSON values with configurable array handling
//!
//! Objects are always merged key by key and scalars from the source always win.
//! What happens when both sides hold an array depends on the [`ArrayStrategy`],
//! which can be set globally and overridden per field name.

use serde_json::Value;
use std::collections::HashMap;

/// How two arrays at the same position are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayStrategy {
    /// Merge element `i` of the source into element `i` of the target,
    /// appending source elements past the end of the target
    #[default]
    ByIndex,
    /// Append all source elements to the target array
    Concat,
    /// Replace the target array with the source array
    Replace,
}

/// Deep merge utility
#[derive(Debug, Clone, Default)]
pub struct DeepMerge {
    arrays: ArrayStrategy,
    fields: HashMap<String, ArrayStrategy>,
}

impl DeepMerge {
    /// Create a merger using `arrays` for every array field
    pub fn new(arrays: ArrayStrategy) -> Self {
        Self {
            arrays,
            fields: HashMap::new(),
        }
    }

    /// Merger that concatenates arrays, used for layering model overrides
    pub fn concat_arrays() -> Self {
        Self::new(ArrayStrategy::Concat)
    }

    /// Merger that merges arrays element-wise, used for platform extensions
    pub fn by_index() -> Self {
        Self::new(ArrayStrategy::ByIndex)
    }

    /// Use `strategy` for arrays stored under the field `name`, at any depth
    pub fn with_field(mut self, name: impl Into<String>, strategy: ArrayStrategy) -> Self {
        self.fields.insert(name.into(), strategy);
        self
    }

    /// Merge `source` into `target` in place
    pub fn merge(&self, target: &mut Value, source: &Value) {
        self.merge_with(target, source, self.arrays);
    }

    /// Merge `source` into `target` and return the result
    pub fn merged(&self, mut target: Value, source: &Value) -> Value {
        self.merge(&mut target, source);
        target
    }

    fn merge_with(&self, target: &mut Value, source: &Value, arrays: ArrayStrategy) {
        match (target, source) {
            (Value::Object(target), Value::Object(source)) => {
                for (key, src) in source {
                    let strategy = self.fields.get(key).copied().unwrap_or(self.arrays);
                    match target.get_mut(key) {
                        Some(existing) => self.merge_with(existing, src, strategy),
                        None => {
                            target.insert(key.clone(), src.clone());
                        }
                    }
                }
            }
            (Value::Array(target), Value::Array(source)) => match arrays {
                ArrayStrategy::Concat => target.extend(source.iter().cloned()),
                ArrayStrategy::Replace => *target = source.clone(),
                ArrayStrategy::ByIndex => {
                    for (i, src) in source.iter().enumerate() {
                        match target.get_mut(i) {
                            Some(existing) => self.merge_with(existing, src, self.arrays),
                            None => target.push(src.clone()),
                        }
                    }
                }
            },
            (target, source) => *target = source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_later_scalar_wins() {
        let merged = DeepMerge::default().merged(
            json!({ "name": "A", "auto": true, "webhookUsed": true }),
            &json!({ "webhookUsed": false, "priority": 250000 }),
        );
        assert_eq!(
            merged,
            json!({ "name": "A", "auto": true, "webhookUsed": false, "priority": 250000 })
        );
    }

    #[test]
    fn test_concat_arrays() {
        let merged = DeepMerge::concat_arrays().merged(
            json!({ "intents": [{ "name": "A" }], "invocation": "one" }),
            &json!({ "intents": [{ "name": "B" }], "invocation": "two" }),
        );
        assert_eq!(
            merged,
            json!({ "intents": [{ "name": "A" }, { "name": "B" }], "invocation": "two" })
        );
    }

    #[test]
    fn test_by_index_merges_elements() {
        let merged = DeepMerge::by_index().merged(
            json!({ "responses": [{ "parameters": [{ "name": "city" }] }] }),
            &json!({ "responses": [{ "resetContexts": true }] }),
        );
        assert_eq!(
            merged,
            json!({ "responses": [{ "parameters": [{ "name": "city" }], "resetContexts": true }] })
        );
    }

    #[test]
    fn test_field_override() {
        let merger = DeepMerge::by_index().with_field("events", ArrayStrategy::Replace);
        let merged = merger.merged(
            json!({ "events": [{ "name": "A" }, { "name": "B" }], "contexts": ["x"] }),
            &json!({ "events": [{ "name": "C" }], "contexts": ["y", "z"] }),
        );
        assert_eq!(
            merged,
            json!({ "events": [{ "name": "C" }], "contexts": ["y", "z"] })
        );
    }

    #[test]
    fn test_mismatched_shapes_overwrite() {
        let merged =
            DeepMerge::concat_arrays().merged(json!({ "a": [1, 2] }), &json!({ "a": { "b": 1 } }));
        assert_eq!(merged, json!({ "a": { "b": 1 } }));
    }
}
