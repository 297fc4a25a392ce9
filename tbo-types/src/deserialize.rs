//! The [`Deserializable`] trait, the [`FromWire`] value decoding, and the
//! field primitives every entity decoder is composed from.

use std::fmt;

use serde_json::{Map, Value};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors that can occur while decoding a wire object.
///
/// A missing optional field is never an error. Nested failures propagate
/// unchanged, so the variant always names the innermost type and field.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A required field was absent (or `null`).
    MissingField { ty: &'static str, field: &'static str },
    /// A field was present but held the wrong kind of JSON value.
    InvalidValue { ty: &'static str, field: &'static str, expected: &'static str },
    /// The top-level value handed to the decoder was not a JSON object.
    NotAnObject { ty: &'static str },
    /// A discriminated value carried a tag (or key shape) this crate doesn't know.
    UnknownVariant { ty: &'static str, tag: String },
    /// The input text was not valid JSON.
    Syntax(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { ty, field } => {
                write!(f, "{ty}: missing required field `{field}`")
            }
            Self::InvalidValue { ty, field, expected } => {
                write!(f, "{ty}: field `{field}` is not a valid {expected}")
            }
            Self::NotAnObject { ty } => write!(f, "{ty}: expected a JSON object"),
            Self::UnknownVariant { ty, tag } => write!(f, "{ty}: unknown variant `{tag}`"),
            Self::Syntax(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for decoding.
pub type Result<T> = std::result::Result<T, Error>;

// ─── Field ───────────────────────────────────────────────────────────────────

/// Position of a value inside its parent object, carried for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub ty:   &'static str,
    pub name: &'static str,
}

impl Field {
    pub fn new(ty: &'static str, name: &'static str) -> Self {
        Self { ty, name }
    }

    /// Build an [`Error::InvalidValue`] for this position.
    pub fn invalid(self, expected: &'static str) -> Error {
        Error::InvalidValue { ty: self.ty, field: self.name, expected }
    }
}

// ─── Deserializable ──────────────────────────────────────────────────────────

/// Decode an entity from a Bot API JSON object.
pub trait Deserializable: Sized {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Build `Self` from the fields of `map`.
    fn deserialize(map: &Map<String, Value>) -> Result<Self>;

    /// Convenience: decode from any JSON value, which must be an object.
    fn from_value(value: &Value) -> Result<Self> {
        match value.as_object() {
            Some(map) => Self::deserialize(map),
            None      => Err(Error::NotAnObject { ty: Self::NAME }),
        }
    }

    /// Convenience: parse JSON text and decode it.
    fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::Syntax(e.to_string()))?;
        Self::from_value(&value)
    }
}

/// Decoding of a single field value.
pub trait FromWire: Sized {
    fn from_wire(value: &Value, at: Field) -> Result<Self>;
}

/// Marker for leaf values read by the `*_scalar` primitives.
pub trait Scalar: FromWire {}

// ─── scalars ─────────────────────────────────────────────────────────────────

impl FromWire for bool {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        value.as_bool().ok_or_else(|| at.invalid("boolean"))
    }
}

impl FromWire for i64 {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        value.as_i64().ok_or_else(|| at.invalid("integer"))
    }
}

impl FromWire for i32 {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| at.invalid("32-bit integer"))
    }
}

/// Integers are accepted too: coordinates like `0` arrive without a fraction.
impl FromWire for f64 {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        value.as_f64().ok_or_else(|| at.invalid("number"))
    }
}

impl FromWire for String {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        value.as_str().map(str::to_owned).ok_or_else(|| at.invalid("string"))
    }
}

impl Scalar for bool {}
impl Scalar for i32 {}
impl Scalar for i64 {}
impl Scalar for f64 {}
impl Scalar for String {}

// ─── containers ──────────────────────────────────────────────────────────────

impl<T: FromWire> FromWire for Box<T> {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        T::from_wire(value, at).map(Box::new)
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(value: &Value, at: Field) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| at.invalid("array"))?;
        items.iter().map(|item| T::from_wire(item, at)).collect()
    }
}

/// Decode a nested entity sitting at `at`.
///
/// Used by the generated [`FromWire`] impls: a non-object is reported against
/// the parent field, while failures inside the object keep their own context.
pub fn nested<T: Deserializable>(value: &Value, at: Field) -> Result<T> {
    match value.as_object() {
        Some(map) => T::deserialize(map),
        None      => Err(at.invalid("object")),
    }
}

// ─── Field primitives ────────────────────────────────────────────────────────
//
// `required` and `optional` hold the only presence logic in the crate. The
// typed faces below pin down what shape each field is expected to have.
// A key holding JSON `null` counts as absent.

fn lookup<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name).filter(|v| !v.is_null())
}

/// Decode the field `name` of `ty`, failing if it is absent.
pub fn required<T: FromWire>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<T> {
    match lookup(map, name) {
        Some(v) => T::from_wire(v, Field::new(ty, name)),
        None    => Err(Error::MissingField { ty, field: name }),
    }
}

/// Decode the field `name` of `ty`, mapping absence to `None`.
pub fn optional<T: FromWire>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<Option<T>> {
    lookup(map, name)
        .map(|v| T::from_wire(v, Field::new(ty, name)))
        .transpose()
}

pub fn required_scalar<T: Scalar>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<T> {
    required(map, ty, name)
}

pub fn optional_scalar<T: Scalar>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<Option<T>> {
    optional(map, ty, name)
}

pub fn required_nested<T: FromWire>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<T> {
    required(map, ty, name)
}

pub fn optional_nested<T: FromWire>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<Option<T>> {
    optional(map, ty, name)
}

pub fn required_array<T: FromWire>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<Vec<T>> {
    required(map, ty, name)
}

pub fn optional_array<T: FromWire>(map: &Map<String, Value>, ty: &'static str, name: &'static str) -> Result<Option<Vec<T>>> {
    optional(map, ty, name)
}

pub fn required_array_of_array<T: FromWire>(
    map:  &Map<String, Value>,
    ty:   &'static str,
    name: &'static str,
) -> Result<Vec<Vec<T>>> {
    required(map, ty, name)
}

pub fn optional_array_of_array<T: FromWire>(
    map:  &Map<String, Value>,
    ty:   &'static str,
    name: &'static str,
) -> Result<Option<Vec<Vec<T>>>> {
    optional(map, ty, name)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn required_reports_missing_field() {
        let map = obj(json!({ "a": 1 }));
        let err = required_scalar::<i64>(&map, "Thing", "b").unwrap_err();
        assert_eq!(err, Error::MissingField { ty: "Thing", field: "b" });
    }

    #[test]
    fn null_counts_as_absent() {
        let map = obj(json!({ "a": null }));
        assert_eq!(optional_scalar::<String>(&map, "Thing", "a").unwrap(), None);
        assert!(matches!(
            required_scalar::<String>(&map, "Thing", "a"),
            Err(Error::MissingField { .. })
        ));
    }

    #[test]
    fn wrong_type_is_invalid_value() {
        let map = obj(json!({ "a": "nope" }));
        assert_eq!(
            optional_scalar::<bool>(&map, "Thing", "a").unwrap_err(),
            Error::InvalidValue { ty: "Thing", field: "a", expected: "boolean" }
        );
    }

    #[test]
    fn i32_rejects_out_of_range() {
        let map = obj(json!({ "n": 1u64 << 40 }));
        assert!(required_scalar::<i32>(&map, "Thing", "n").is_err());
        assert_eq!(required_scalar::<i64>(&map, "Thing", "n").unwrap(), 1 << 40);
    }

    #[test]
    fn f64_accepts_integers() {
        let map = obj(json!({ "x": 3 }));
        assert_eq!(required_scalar::<f64>(&map, "Thing", "x").unwrap(), 3.0);
    }

    #[test]
    fn array_of_array_keeps_order() {
        let map = obj(json!({ "rows": [[1, 2], [], [3]] }));
        let rows: Vec<Vec<i64>> = required_array_of_array(&map, "Thing", "rows").unwrap();
        assert_eq!(rows, vec![vec![1, 2], vec![], vec![3]]);
    }
}
