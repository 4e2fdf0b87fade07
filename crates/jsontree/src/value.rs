//! JSON value types and accessors.
//!
//! This module defines the [`Value`] enum, which represents any JSON value,
//! together with the accessors used to inspect it. Accessors that read a
//! specific variant return [`AccessError`] instead of panicking when called on
//! the wrong variant or with an out-of-range index.
use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::{BStr, BString, ByteSlice};

use crate::error::AccessError;

/// Ordered array elements.
pub type Array = Vec<Value>;

/// Object members in insertion order. Duplicate keys may coexist.
pub type Object = Vec<(BString, Value)>;

/// A JSON value as defined by [RFC 8259].
///
/// Strings are owned byte sequences: escapes decode to UTF-8, but raw input
/// bytes are kept verbatim, so a string may hold embedded zero bytes or
/// bytes that are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use jsontree::{Value, ValueType};
///
/// let v = jsontree::parse(r#"{"key": [null, true, 2.5]}"#).unwrap();
/// assert_eq!(v.get_type(), ValueType::Object);
/// assert_eq!(v.object_key_at(0).unwrap(), "key");
/// assert_eq!(v.to_string(), r#"{"key":[null,true,2.5]}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any JSON number, stored as a 64-bit float.
    Number(f64),
    /// A decoded string.
    String(BString),
    /// An ordered list of values.
    Array(Array),
    /// An ordered list of key/value members.
    Object(Object),
}

/// The variant held by a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// [`Value::Null`]
    Null,
    /// [`Value::Boolean`]
    Bool,
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        })
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<BString> for Value {
    fn from(v: BString) -> Self {
        Self::String(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<BString>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// The variant currently held.
    #[must_use]
    pub fn get_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Bool,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) => ValueType::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    fn mismatch(&self, expected: ValueType) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.get_type(),
        }
    }

    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is a boolean.
    pub fn get_bool(&self) -> Result<bool, AccessError> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(ValueType::Bool)),
        }
    }

    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is a number.
    pub fn get_number(&self) -> Result<f64, AccessError> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(self.mismatch(ValueType::Number)),
        }
    }

    /// The string payload as bytes. Its length is `get_string()?.len()`.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is a string.
    pub fn get_string(&self) -> Result<&BStr, AccessError> {
        match self {
            Self::String(s) => Ok(s.as_bstr()),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    fn as_array(&self) -> Result<&Array, AccessError> {
        match self {
            Self::Array(a) => Ok(a),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    fn as_object(&self) -> Result<&Object, AccessError> {
        match self {
            Self::Object(o) => Ok(o),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    /// Number of array elements.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is an array.
    pub fn array_size(&self) -> Result<usize, AccessError> {
        self.as_array().map(Vec::len)
    }

    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is an array,
    /// [`AccessError::IndexOutOfRange`] if `index >= array_size()`.
    pub fn array_get(&self, index: usize) -> Result<&Value, AccessError> {
        let a = self.as_array()?;
        a.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: a.len(),
        })
    }

    /// Number of object members, counting duplicate keys separately.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is an object.
    pub fn object_size(&self) -> Result<usize, AccessError> {
        self.as_object().map(Vec::len)
    }

    fn object_member(&self, index: usize) -> Result<&(BString, Value), AccessError> {
        let o = self.as_object()?;
        o.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: o.len(),
        })
    }

    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is an object,
    /// [`AccessError::IndexOutOfRange`] if `index >= object_size()`.
    pub fn object_key_at(&self, index: usize) -> Result<&BStr, AccessError> {
        self.object_member(index).map(|(k, _)| k.as_bstr())
    }

    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is an object,
    /// [`AccessError::IndexOutOfRange`] if `index >= object_size()`.
    pub fn object_value_at(&self, index: usize) -> Result<&Value, AccessError> {
        self.object_member(index).map(|(_, v)| v)
    }

    /// Value of the first member whose key equals `key`.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] unless the value is an object.
    pub fn object_find(&self, key: impl AsRef<[u8]>) -> Result<Option<&Value>, AccessError> {
        let key = key.as_ref();
        Ok(self
            .as_object()?
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v))
    }

    /// Drops the current payload and leaves the value as [`Value::Null`].
    ///
    /// Calling it again on the now-null value is a no-op.
    pub fn release(&mut self) {
        *self = Self::Null;
    }

    /// Replaces the current payload with `null`.
    pub fn set_null(&mut self) {
        self.release();
    }

    /// Replaces the current payload with a boolean.
    pub fn set_bool(&mut self, b: bool) {
        *self = Self::Boolean(b);
    }

    /// Replaces the current payload with a number.
    pub fn set_number(&mut self, n: f64) {
        *self = Self::Number(n);
    }

    /// Replaces the current payload with an owned copy of `bytes`.
    pub fn set_string(&mut self, bytes: impl AsRef<[u8]>) {
        *self = Self::String(BString::from(bytes.as_ref()));
    }
}

impl fmt::Display for Value {
    /// Compact JSON. String bytes that are not valid UTF-8 are shown with
    /// replacement characters; use [`stringify`](crate::stringify) for the
    /// exact bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&crate::stringify(self), f)
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => match core::str::from_utf8(s) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_bytes(s),
            },
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (k, v) in members {
                    match core::str::from_utf8(k) {
                        Ok(key) => map.serialize_entry(key, v)?,
                        Err(_) => map.serialize_entry(k.as_slice(), v)?,
                    }
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use bstr::{BString, ByteSlice};
    use rstest::rstest;

    use super::{Value, ValueType};
    use crate::AccessError;

    #[test]
    fn default_is_null() {
        assert_eq!(Value::default(), Value::Null);
        assert_eq!(Value::default().get_type(), ValueType::Null);
    }

    #[rstest]
    #[case(Value::Null, ValueType::Null)]
    #[case(Value::Boolean(false), ValueType::Bool)]
    #[case(Value::Number(1.0), ValueType::Number)]
    #[case(Value::from("s"), ValueType::String)]
    #[case(Value::Array(vec![]), ValueType::Array)]
    #[case(Value::Object(vec![]), ValueType::Object)]
    fn get_type_matches_variant(#[case] v: Value, #[case] expected: ValueType) {
        assert_eq!(v.get_type(), expected);
    }

    #[test]
    fn wrong_accessor_is_reported() {
        let v = Value::from("text");
        assert_eq!(
            v.get_number(),
            Err(AccessError::TypeMismatch {
                expected: ValueType::Number,
                found: ValueType::String,
            })
        );
        assert!(v.array_size().is_err());
        assert!(v.object_key_at(0).is_err());
        assert!(Value::Null.get_bool().is_err());
    }

    #[test]
    fn set_string_replaces_array_payload() {
        let mut v: Value = vec![Value::from(1.0), Value::from("x")].into();
        v.set_string("abc");
        assert_eq!(v.get_string().unwrap(), "abc");
        v.set_string(b"a\0b");
        assert_eq!(v.get_string().unwrap().len(), 3);
        v.set_number(2.0);
        assert_eq!(v.get_number(), Ok(2.0));
        v.set_bool(true);
        assert_eq!(v.get_bool(), Ok(true));
    }

    #[test]
    fn release_is_idempotent() {
        let mut v: Value = vec![(BString::from("k"), Value::from("v"))].into();
        v.release();
        assert!(v.is_null());
        v.release();
        assert!(v.is_null());
        v.set_null();
        assert!(v.is_null());
    }

    #[test]
    fn string_accessors_borrow_payload() {
        let v: Value = [(BString::from(&b"k\xff"[..]), Value::from(&b"v\0w"[..]))]
            .into_iter()
            .collect();
        assert_eq!(v.object_key_at(0).unwrap().as_bytes(), b"k\xff");
        let s = v.object_value_at(0).unwrap().get_string().unwrap();
        assert_eq!(s.as_bytes(), b"v\0w");
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn array_access() {
        let v: Value = [Value::Null, Value::Boolean(true)].into_iter().collect();
        assert_eq!(v.array_size(), Ok(2));
        assert_eq!(v.array_get(1), Ok(&Value::Boolean(true)));
        assert_eq!(
            v.array_get(2),
            Err(AccessError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn object_access_keeps_order_and_duplicates() {
        let v: Value = [
            ("b", Value::from(1.0)),
            ("a", Value::from(2.0)),
            ("b", Value::from(3.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(v.object_size(), Ok(3));
        assert_eq!(v.object_key_at(0).unwrap(), "b");
        assert_eq!(v.object_key_at(1).unwrap(), "a");
        assert_eq!(v.object_value_at(2), Ok(&Value::Number(3.0)));
        assert_eq!(v.object_find("b"), Ok(Some(&Value::Number(1.0))));
        assert_eq!(v.object_find("z"), Ok(None));
        assert!(v.object_value_at(3).is_err());
    }

    #[test]
    fn display_is_compact_json() {
        let v: Value = [
            ("a", Value::Array(vec![Value::Null, Value::Number(-1.5)])),
            ("b", Value::from("q\"")),
        ]
        .into_iter()
        .collect();
        assert_eq!(v.to_string(), r#"{"a":[null,-1.5],"b":"q\""}"#);
    }

    #[test]
    fn serde_serialize_matches_stringify() {
        let v = crate::parse(r#"{"z":[0.5,2.5,"é",{"k":null}],"a":false}"#).unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), v.to_string());
    }
}
