//! Declarative entity tables.
//!
//! Each entity is declared once as a list of fields:
//!
//! ```text
//! presence kind name: Type [= "wire_name"]
//! ```
//!
//! * `presence` is `required` or `optional`.
//! * `kind` is `scalar`, `nested`, `array` or `array_of_array`. `Type` is the
//!   element type, the macro adds the `Vec`/`Option` layers.
//!
//! A struct header of the form `pub struct Name as "tag"` gives the entity a
//! fixed `type` discriminator that is written first and never stored.

macro_rules! wire_struct {
    // ── field type ──
    (@ty required scalar $t:ty) => { $t };
    (@ty required nested $t:ty) => { $t };
    (@ty required array $t:ty) => { Vec<$t> };
    (@ty required array_of_array $t:ty) => { Vec<Vec<$t>> };
    (@ty optional $kind:ident $t:ty) => { Option<wire_struct!(@ty required $kind $t)> };

    // ── wire name ──
    (@wire $field:ident) => { stringify!($field) };
    (@wire $field:ident $wire:literal) => { $wire };

    // ── decode ──
    (@de $map:ident, $ty:expr, required scalar, $w:expr) => {
        $crate::deserialize::required_scalar($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, optional scalar, $w:expr) => {
        $crate::deserialize::optional_scalar($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, required nested, $w:expr) => {
        $crate::deserialize::required_nested($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, optional nested, $w:expr) => {
        $crate::deserialize::optional_nested($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, required array, $w:expr) => {
        $crate::deserialize::required_array($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, optional array, $w:expr) => {
        $crate::deserialize::optional_array($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, required array_of_array, $w:expr) => {
        $crate::deserialize::required_array_of_array($map, $ty, $w)?
    };
    (@de $map:ident, $ty:expr, optional array_of_array, $w:expr) => {
        $crate::deserialize::optional_array_of_array($map, $ty, $w)?
    };

    // ── encode ──
    (@en $map:ident, required, $w:expr, $val:expr) => {
        $crate::serialize::put($map, $w, $val)
    };
    (@en $map:ident, optional, $w:expr, $val:expr) => {
        $crate::serialize::put_opt($map, $w, $val)
    };

    // ── discriminator ──
    (@tag_en $map:ident) => {};
    (@tag_en $map:ident $tag:literal) => {
        $map.insert("type".to_owned(), ::serde_json::Value::from($tag));
    };
    (@tag_de $map:ident, $ty:expr) => {};
    (@tag_de $map:ident, $ty:expr, $tag:literal) => {
        if let Some(found) = $map.get("type") {
            if found.as_str() != Some($tag) {
                return Err($crate::deserialize::Error::InvalidValue {
                    ty: $ty,
                    field: "type",
                    expected: $tag,
                });
            }
        }
    };
    (@tag_impl $name:ident) => {};
    (@tag_impl $name:ident $tag:literal) => {
        impl $crate::Tagged for $name {
            const TYPE: &'static str = $tag;
        }
    };

    // ── entry point ──
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(as $tag:literal)? {
            $(
                $(#[$fmeta:meta])*
                $presence:ident $kind:ident $field:ident : $t:ty $(= $wire:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Default)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: wire_struct!(@ty $presence $kind $t),
            )*
        }

        impl $crate::Serializable for $name {
            fn serialize(&self, map: &mut ::serde_json::Map<String, ::serde_json::Value>) {
                wire_struct!(@tag_en map $($tag)?);
                $(
                    wire_struct!(@en map, $presence, wire_struct!(@wire $field $($wire)?), &self.$field);
                )*
            }
        }

        impl $crate::Deserializable for $name {
            const NAME: &'static str = stringify!($name);

            fn deserialize(
                map: &::serde_json::Map<String, ::serde_json::Value>,
            ) -> $crate::deserialize::Result<Self> {
                wire_struct!(@tag_de map, Self::NAME $(, $tag)?);
                Ok(Self {
                    $(
                        $field: wire_struct!(
                            @de map, Self::NAME, $presence $kind, wire_struct!(@wire $field $($wire)?)
                        ),
                    )*
                })
            }
        }

        impl $crate::ToWire for $name {
            fn to_wire(&self) -> ::serde_json::Value {
                $crate::Serializable::to_value(self)
            }
        }

        impl $crate::FromWire for $name {
            fn from_wire(
                value: &::serde_json::Value,
                at: $crate::deserialize::Field,
            ) -> $crate::deserialize::Result<Self> {
                $crate::deserialize::nested(value, at)
            }
        }

        wire_struct!(@tag_impl $name $($tag)?);
    };
}

/// A sum type over entities that already implement the wire traits.
///
/// Emits the enum, `From` for every case, and the encode side. Decoding is
/// left to the caller because every union tells its cases apart differently.
macro_rules! wire_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($inner:ty) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant($inner), )*
        }

        $(
            impl From<$inner> for $name {
                fn from(x: $inner) -> Self { Self::$variant(x) }
            }
        )*

        impl $crate::Serializable for $name {
            fn serialize(&self, map: &mut ::serde_json::Map<String, ::serde_json::Value>) {
                match self {
                    $( Self::$variant(x) => $crate::Serializable::serialize(x, map), )*
                }
            }
        }

        impl $crate::ToWire for $name {
            fn to_wire(&self) -> ::serde_json::Value {
                $crate::Serializable::to_value(self)
            }
        }

        impl $crate::FromWire for $name {
            fn from_wire(
                value: &::serde_json::Value,
                at: $crate::deserialize::Field,
            ) -> $crate::deserialize::Result<Self> {
                $crate::deserialize::nested(value, at)
            }
        }
    };
}
