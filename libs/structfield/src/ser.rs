//! Field discovery through `serde::Serialize`.
//!
//! Any type whose `Serialize` impl produces a struct can be converted
//! without deriving `Record`. Field names and omission come from serde's
//! own attributes:
//!
//! | tag form            | serde attribute                                        |
//! |---------------------|--------------------------------------------------------|
//! | `"name"`            | `#[serde(rename = "name")]`                            |
//! | `"-"`               | `#[serde(skip)]` / `#[serde(skip_serializing)]`        |
//! | `",omitempty"`      | `#[serde(skip_serializing_if = "structfield::is_empty")]` |
//!
//! `Option`, references and newtype wrappers around a struct are followed.
//! Anything else at the root is a caller bug and panics.

use serde::ser::{self, Impossible, Serialize};

use crate::error::Error;
use crate::mapper::{self, Fields};
use crate::transformer::Transformers;

/// Convert a serializable struct into a map of its top-level fields.
///
/// Same rules as [`transform`](crate::transform).
///
/// # Panics
///
/// If `value` does not serialize as a struct (primitive, sequence, map,
/// enum, `None`).
pub fn transform_serialize<T: Serialize + ?Sized>(value: &T, transformers: &Transformers) -> Result<Fields, Error> {
    match value.serialize(RecordSerializer { transformers }) {
        Ok(fields) => Ok(fields),
        Err(RecordError::NotAStruct(kind)) => {
            panic!("structfield::transform: not a struct or a reference to one (got {kind})")
        }
        Err(RecordError::Failed(e)) => Err(e),
    }
}

#[derive(Debug, thiserror::Error)]
enum RecordError {
    #[error("not a struct: {0}")]
    NotAStruct(&'static str),

    #[error(transparent)]
    Failed(#[from] Error),
}

impl ser::Error for RecordError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        RecordError::Failed(Error::Custom(msg.to_string()))
    }
}

struct RecordSerializer<'a> {
    transformers: &'a Transformers,
}

macro_rules! reject {
    ($($method:ident($($arg:ty),*) => $kind:literal,)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Self::Ok, Self::Error> {
                Err(RecordError::NotAStruct($kind))
            }
        )*
    };
}

impl<'a> ser::Serializer for RecordSerializer<'a> {
    type Ok = Fields;
    type Error = RecordError;

    type SerializeSeq = Impossible<Fields, RecordError>;
    type SerializeTuple = Impossible<Fields, RecordError>;
    type SerializeTupleStruct = Impossible<Fields, RecordError>;
    type SerializeTupleVariant = Impossible<Fields, RecordError>;
    type SerializeMap = Impossible<Fields, RecordError>;
    type SerializeStruct = StructFields<'a>;
    type SerializeStructVariant = Impossible<Fields, RecordError>;

    reject! {
        serialize_bool(bool) => "bool",
        serialize_i8(i8) => "integer",
        serialize_i16(i16) => "integer",
        serialize_i32(i32) => "integer",
        serialize_i64(i64) => "integer",
        serialize_i128(i128) => "integer",
        serialize_u8(u8) => "integer",
        serialize_u16(u16) => "integer",
        serialize_u32(u32) => "integer",
        serialize_u64(u64) => "integer",
        serialize_u128(u128) => "integer",
        serialize_f32(f32) => "float",
        serialize_f64(f64) => "float",
        serialize_char(char) => "char",
        serialize_str(&str) => "string",
        serialize_bytes(&[u8]) => "bytes",
        serialize_none() => "none",
        serialize_unit() => "unit",
        serialize_unit_variant(&'static str, u32, &'static str) => "enum",
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Fields, RecordError> {
        value.serialize(self)
    }

    /// A struct without fields.
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Fields, RecordError> {
        Ok(Fields::new())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Fields, RecordError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Fields, RecordError> {
        Err(RecordError::NotAStruct("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, RecordError> {
        Err(RecordError::NotAStruct("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, RecordError> {
        Err(RecordError::NotAStruct("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, RecordError> {
        Err(RecordError::NotAStruct("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, RecordError> {
        Err(RecordError::NotAStruct("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, RecordError> {
        Err(RecordError::NotAStruct("map"))
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<StructFields<'a>, RecordError> {
        Ok(StructFields {
            record: name,
            kept: Vec::with_capacity(len),
            transformers: self.transformers,
            len,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, RecordError> {
        Err(RecordError::NotAStruct("enum"))
    }
}

/// Encoded fields, transformed only once the whole struct encoded cleanly.
struct StructFields<'a> {
    record: &'static str,
    kept: Vec<(&'static str, serde_json::Value)>,
    transformers: &'a Transformers,
    len: usize,
}

impl ser::SerializeStruct for StructFields<'_> {
    type Ok = Fields;
    type Error = RecordError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<(), RecordError> {
        let value = serde_json::to_value(value).map_err(|e| Error::value(self.record, key, e))?;
        self.kept.push((key, value));
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), RecordError> {
        tracing::trace!(record = self.record, field = key, "skipped by serde");
        Ok(())
    }

    fn end(self) -> Result<Fields, RecordError> {
        tracing::trace!(record = self.record, declared = self.len, kept = self.kept.len(), "record mapped");
        let mut fields = Fields::new();
        for (name, value) in self.kept {
            mapper::put(&mut fields, self.record, name, value, self.transformers);
        }
        Ok(fields)
    }
}
