use crate::{cursor::Cursor, error::ErrorKind, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    /// The literal introduced by `first`, if any.
    pub(crate) fn from_first_byte(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Literal::Null),
            b't' => Some(Literal::True),
            b'f' => Some(Literal::False),
            _ => None,
        }
    }

    fn bytes(self) -> &'static [u8] {
        match self {
            Literal::Null => b"null",
            Literal::True => b"true",
            Literal::False => b"false",
        }
    }

    fn value(self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::True => Value::Boolean(true),
            Literal::False => Value::Boolean(false),
        }
    }

    /// Consumes the literal's exact bytes. A mismatching byte or end of input
    /// part way through is `InvalidValue`.
    pub(crate) fn parse(self, cursor: &mut Cursor<'_>) -> Result<Value, ErrorKind> {
        for &expected in self.bytes() {
            if !cursor.eat(expected) {
                return Err(ErrorKind::InvalidValue);
            }
        }
        Ok(self.value())
    }
}
