//! Serializer implementation constructing `quasi::Value`.

use serde::ser;

use quasi::Number;

use crate::error::{Error, Result};
use crate::value::{Entry, List, Value};

pub struct Serializer;

fn unnamed(items: Vec<Value>) -> Value {
    Value::List(List::new(
        items.into_iter().map(|value| Entry::new(None, value)).collect(),
    ))
}

fn named(entries: Vec<Entry>) -> Value {
    Value::List(List::new(entries))
}

fn variant(name: &str, value: Value) -> Value {
    named(vec![Entry::new(Some(name), value)])
}

impl ser::Serializer for Serializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::from)
            .map_err(|_| Error::number_out_of_range(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| Error::number_out_of_range(v))
    }

    fn serialize_char(self, value: char) -> Result<Value> {
        Ok(Value::from(value.to_string()))
    }

    fn serialize_str(self, value: &str) -> Result<Value> {
        Ok(Value::from(value))
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Value> {
        Ok(unnamed(value.iter().copied().map(Value::from).collect()))
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        self.serialize_unit()
    }

    /// Serializes a unit variant as the string of its name.
    fn serialize_unit_variant(
        self,
        _name: &str,
        _variant_index: u32,
        variant: &str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        _name: &str,
        _variant_index: u32,
        name: &str,
        value: &T,
    ) -> Result<Value>
    where
        T: ser::Serialize,
    {
        Ok(variant(name, to_value(value)?))
    }

    /// Serializes `None` as `NULL`.
    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    /// Serializes `Some` as its content.
    fn serialize_some<V: ?Sized>(self, value: &V) -> Result<Value>
    where
        V: ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList {
            items: len.map_or_else(Vec::new, Vec::with_capacity),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _enum: &'static str,
        _idx: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            entries: len.map_or_else(Vec::new, Vec::with_capacity),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeStruct> {
        Ok(SerializeStruct {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _enum: &'static str,
        _idx: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            fields: Vec::with_capacity(len),
        })
    }
}

#[doc(hidden)]
pub struct SerializeList {
    items: Vec<Value>,
}

#[doc(hidden)]
pub struct SerializeTupleVariant {
    name: &'static str,
    items: Vec<Value>,
}

#[doc(hidden)]
pub struct SerializeMap {
    entries: Vec<Entry>,
    next_key: Option<String>,
}

#[doc(hidden)]
pub struct SerializeStruct {
    fields: Vec<Entry>,
}

#[doc(hidden)]
pub struct SerializeStructVariant {
    name: &'static str,
    fields: Vec<Entry>,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized>(&mut self, elem: &T) -> Result<()>
    where
        T: ser::Serialize,
    {
        self.items.push(to_value(elem)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(unnamed(self.items))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<V: ?Sized>(&mut self, value: &V) -> Result<()>
    where
        V: ser::Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<V: ?Sized>(&mut self, value: &V) -> Result<()>
    where
        V: ser::Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<V: ?Sized>(&mut self, v: &V) -> Result<()>
    where
        V: ser::Serialize,
    {
        self.items.push(to_value(v)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(variant(self.name, unnamed(self.items)))
    }
}

// Map keys become entry names, so they have to be strings or something with
// an obvious textual form.
fn key_name(key: Value) -> Result<String> {
    match key {
        Value::String(s) if !s.is_empty() => Ok(s.into()),
        Value::Number(n) if n.is_i64() => Ok(n.to_string()),
        _ => Err(Error::key_must_be_a_name()),
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: ?Sized>(&mut self, key: &T) -> Result<()>
    where
        T: ser::Serialize,
    {
        self.next_key = Some(key_name(to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize,
    {
        let key = self.next_key.take().ok_or_else(|| {
            <Error as ser::Error>::custom("serialize_value called before serialize_key")
        })?;
        self.entries.push(Entry::new(Some(&key), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(named(self.entries))
    }
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<V: ?Sized>(&mut self, field: &'static str, value: &V) -> Result<()>
    where
        V: ser::Serialize,
    {
        self.fields.push(Entry::new(Some(field), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(named(self.fields))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<V: ?Sized>(&mut self, field: &'static str, v: &V) -> Result<()>
    where
        V: ser::Serialize,
    {
        self.fields.push(Entry::new(Some(field), to_value(v)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(variant(self.name, named(self.fields)))
    }
}

/// Convert a `T` into a `quasi::Value`.
///
/// Sequences and tuples become unnamed lists, structs and maps become named
/// lists, `None` and `()` become `NULL`, and enum variants carrying data
/// become a single-entry list named after the variant.
///
/// This conversion can fail if `T`'s implementation of `Serialize` decides to
/// return an error, or if the data has no runtime representation.
///
/// ```rust
/// # use quasi::Value;
/// let val = serde_quasi::to_value("s").unwrap();
/// assert_eq!(val, Value::from("s"));
/// ```
// Taking by value is more friendly to iterator adapters, option and result
// consumers, etc. See <https://github.com/serde-rs/json/pull/149>.
pub fn to_value<T>(value: T) -> Result<Value>
where
    T: ser::Serialize,
{
    value.serialize(Serializer)
}
