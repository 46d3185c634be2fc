use serde::Serialize;

use crate::error::FormResult;
use crate::map::FormMap;
use crate::value::{FormValue, Scalar};

/// What to do with a field whose value is an object holding a single scalar
/// field, e.g. `{"Wrapper": {"Value": "x"}}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeafObjectPolicy {
    /// Post the inner scalar under the outer field's path: `Wrapper=x`.
    #[default]
    Collapse,
    /// Treat it like any other object: `Wrapper.Value=x`.
    Expand,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    pub leaf_objects: LeafObjectPolicy,
}

impl FlattenOptions {
    pub fn expanded() -> Self {
        Self {
            leaf_objects: LeafObjectPolicy::Expand,
        }
    }
}

/// Flatten `value` with the default options.
pub fn flatten(value: &FormValue) -> FormMap {
    flatten_with(value, FlattenOptions::default())
}

/// Flatten `value` into `path -> text` form fields.
///
/// Fields of the root object become top-level keys. Nested objects extend the
/// path with `.name`, sequence elements with `[i]`. Empty objects and empty
/// sequences produce nothing. Leaf-object collapsing only applies to objects
/// reached through a named field; the root and sequence elements are always
/// expanded. A scalar root is posted under the empty key. An empty field
/// name is an empty path segment at every depth, so `{"": {"A": 1}}` yields
/// `.A`.
pub fn flatten_with(value: &FormValue, options: FlattenOptions) -> FormMap {
    let mut flattener = Flattener {
        options,
        out: FormMap::new(),
    };
    match value {
        FormValue::Object(fields) => flattener.fields(fields, None),
        other => flattener.element(other, String::new()),
    }
    flattener.out
}

/// Serialize `value` and flatten it with the default options.
pub fn to_form_map<T: Serialize + ?Sized>(value: &T) -> FormResult<FormMap> {
    Ok(flatten(&FormValue::from_serialize(value)?))
}

struct Flattener {
    options: FlattenOptions,
    out: FormMap,
}

impl Flattener {
    // `prefix` is `None` only for the root object's fields.
    fn fields(&mut self, fields: &[(String, FormValue)], prefix: Option<&str>) {
        for (name, value) in fields {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.clone(),
            };
            self.field(value, path);
        }
    }

    fn field(&mut self, value: &FormValue, path: String) {
        if self.options.leaf_objects == LeafObjectPolicy::Collapse {
            if let Some(scalar) = value.as_leaf_object() {
                self.scalar(scalar, path);
                return;
            }
        }
        self.element(value, path);
    }

    fn element(&mut self, value: &FormValue, path: String) {
        match value {
            FormValue::Scalar(scalar) => self.scalar(scalar, path),
            FormValue::Object(fields) => self.fields(fields, Some(&path)),
            FormValue::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.element(item, format!("{path}[{i}]"));
                }
            }
        }
    }

    fn scalar(&mut self, scalar: &Scalar, path: String) {
        self.out.insert(path, scalar.to_form_text());
    }
}
