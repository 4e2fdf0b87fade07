//! Decoding of `\uXXXX` escape sequences.
//!
//! A high surrogate (`D800..=DBFF`) must be followed immediately by an
//! escaped low surrogate (`DC00..=DFFF`); the pair combines into one code
//! point at or above `U+10000`. Decoded code points are written to the
//! scratch buffer as UTF-8.
use crate::{cursor::Cursor, error::ErrorKind, scratch::Scratch};

const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Reads exactly four hex digits. Any other byte, or end of input, is
/// `InvalidUnicodeHex`.
pub(crate) fn read_hex4(cursor: &mut Cursor<'_>) -> Result<u32, ErrorKind> {
    let mut code = 0u32;
    for _ in 0..4 {
        let digit = cursor
            .peek()
            .and_then(|b| char::from(b).to_digit(16))
            .ok_or(ErrorKind::InvalidUnicodeHex)?;
        cursor.advance();
        code = (code << 4) | digit;
    }
    Ok(code)
}

fn combine_surrogates(high: u32, low: u32) -> u32 {
    (((high - 0xD800) << 10) | (low - 0xDC00)) + 0x10000
}

/// Decodes the code point of a `\u` escape whose `\u` has already been
/// consumed, including the trailing half of a surrogate pair.
pub(crate) fn read_code_point(cursor: &mut Cursor<'_>) -> Result<char, ErrorKind> {
    let code = read_hex4(cursor)?;
    let code = if HIGH_SURROGATES.contains(&code) {
        if !(cursor.eat(b'\\') && cursor.eat(b'u')) {
            return Err(ErrorKind::InvalidUnicodeSurrogate);
        }
        let low = read_hex4(cursor)?;
        if !LOW_SURROGATES.contains(&low) {
            return Err(ErrorKind::InvalidUnicodeSurrogate);
        }
        combine_surrogates(code, low)
    } else {
        code
    };
    // Only an unpaired low surrogate is left without a scalar value.
    char::from_u32(code).ok_or(ErrorKind::InvalidUnicodeHex)
}

/// Appends the UTF-8 encoding of `c`.
pub(crate) fn push_utf8(scratch: &mut Scratch, c: char) {
    let mut buf = [0u8; 4];
    scratch.push_bytes(c.encode_utf8(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn decode(input: &[u8]) -> Result<char, ErrorKind> {
        read_code_point(&mut Cursor::new(input))
    }

    #[test]
    fn basic_decoding() {
        assert_eq!(decode(b"0041"), Ok('A'));
        assert_eq!(decode(b"00e9"), Ok('é'));
        assert_eq!(decode(b"AbCd"), Ok('\u{ABCD}'));
        assert_eq!(decode(b"0000"), Ok('\0'));
    }

    #[test]
    fn surrogate_pair_combines() {
        assert_eq!(decode(br"D834\uDD1E"), Ok('\u{1D11E}'));
        assert_eq!(decode(br"dbff\udfff"), Ok('\u{10FFFF}'));
    }

    #[rstest]
    #[case(b"12", ErrorKind::InvalidUnicodeHex)]
    #[case(b"12G4", ErrorKind::InvalidUnicodeHex)]
    #[case(b"DC00", ErrorKind::InvalidUnicodeHex)]
    #[case(b"D800", ErrorKind::InvalidUnicodeSurrogate)]
    #[case(br"D800\\", ErrorKind::InvalidUnicodeSurrogate)]
    #[case(br"D800\n", ErrorKind::InvalidUnicodeSurrogate)]
    #[case(br"D800\uDBFF", ErrorKind::InvalidUnicodeSurrogate)]
    #[case(br"D800\uE000", ErrorKind::InvalidUnicodeSurrogate)]
    #[case(br"D800\u12", ErrorKind::InvalidUnicodeHex)]
    fn rejects_malformed_escapes(#[case] input: &[u8], #[case] expected: ErrorKind) {
        assert_eq!(decode(input), Err(expected));
    }

    #[test]
    fn writes_utf8() {
        let mut scratch = Scratch::new();
        push_utf8(&mut scratch, '\u{1D11E}');
        push_utf8(&mut scratch, '$');
        assert_eq!(scratch.as_bytes(), b"\xF0\x9D\x84\x9E$");
    }
}
