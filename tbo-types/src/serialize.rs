//! The [`Serializable`] trait and the value-level [`ToWire`] encoding.
//!
//! Every entity writes itself into a JSON object. Required fields are always
//! written; optional fields are written only when `Some`, so an absent value
//! never shows up as `null` on the wire.

use serde_json::{Map, Value};

/// Serialize `self` into a Bot API JSON object.
pub trait Serializable {
    /// Appends the fields of `self` to `map`, in declaration order.
    fn serialize(&self, map: &mut Map<String, Value>);

    /// Convenience: allocate a fresh object and serialize into it.
    fn to_value(&self) -> Value {
        let mut map = Map::new();
        self.serialize(&mut map);
        Value::Object(map)
    }

    /// Compact JSON text (no whitespace), as the Bot API expects inside
    /// string-valued request parameters.
    fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Conversion of a single field value into its wire form.
///
/// Implemented for the scalar types, for `Box<T>` and `Vec<T>` (so
/// `Vec<Vec<T>>` encodes arrays of arrays), and for every entity.
pub trait ToWire {
    fn to_wire(&self) -> Value;
}

// ─── scalars ─────────────────────────────────────────────────────────────────

impl ToWire for bool {
    fn to_wire(&self) -> Value { Value::Bool(*self) }
}

impl ToWire for i32 {
    fn to_wire(&self) -> Value { Value::from(*self) }
}

impl ToWire for i64 {
    fn to_wire(&self) -> Value { Value::from(*self) }
}

/// Non-finite floats have no JSON form and encode as `null`.
impl ToWire for f64 {
    fn to_wire(&self) -> Value { Value::from(*self) }
}

impl ToWire for String {
    fn to_wire(&self) -> Value { Value::String(self.clone()) }
}

// ─── containers ──────────────────────────────────────────────────────────────

impl<T: ToWire + ?Sized> ToWire for Box<T> {
    fn to_wire(&self) -> Value { (**self).to_wire() }
}

/// Arrays keep element order; nested `Vec`s keep both levels of order.
impl<T: ToWire> ToWire for Vec<T> {
    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(ToWire::to_wire).collect())
    }
}

/// Writes `value` under `name`.
pub fn put<T: ToWire + ?Sized>(map: &mut Map<String, Value>, name: &str, value: &T) {
    map.insert(name.to_owned(), value.to_wire());
}

/// Writes `value` under `name` only when it is present.
pub fn put_opt<T: ToWire>(map: &mut Map<String, Value>, name: &str, value: &Option<T>) {
    if let Some(v) = value {
        put(map, name, v);
    }
}
