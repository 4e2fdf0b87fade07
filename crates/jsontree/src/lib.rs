//! A strict JSON parser and compact serializer over an owned value tree.
//!
//! [`parse`] turns a byte buffer into a [`Value`] with a recursive-descent
//! parser; [`stringify`] turns a [`Value`] back into compact JSON. Both reuse
//! a single growable scratch buffer per [`Parser`] / [`Serializer`] for
//! decoded strings and generated output.
//!
//! ```rust
//! use jsontree::{ErrorKind, Value};
//!
//! let v = jsontree::parse(r#" {"b": [1, "𝄞"], "a": null} "#).unwrap();
//! assert_eq!(v.object_key_at(0).unwrap(), "b");
//! assert_eq!(v.object_value_at(0).unwrap().array_get(1).unwrap().get_string().unwrap(), "𝄞");
//! assert_eq!(jsontree::stringify(&v), r#"{"b":[1,"𝄞"],"a":null}"#);
//!
//! assert_eq!(jsontree::parse("[1,]").unwrap_err().kind(), ErrorKind::InvalidValue);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod escape;
mod literal;
mod scratch;

mod error;
mod options;
mod parser;
mod serializer;
mod value;


pub use bstr::{BStr, BString};
pub use error::{AccessError, ErrorKind, ParseError};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use parser::{Parser, parse};
pub use serializer::{Serializer, stringify};
pub use value::{Array, Object, Value, ValueType};
