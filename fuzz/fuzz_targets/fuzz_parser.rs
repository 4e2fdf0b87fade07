#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsontree::{ErrorKind, Parser, ParserOptions, stringify};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // depth-limit selector

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Only the four JSON whitespace bytes plus a few that must be rejected.
static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r", b"\x0b", b"\x0c", "\u{a0}".as_bytes()];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
            prefix += append_value(&mut data[prefix..], size, max_size - prefix);
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace sequences without exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n = rng.random_range(1..=limit.min(8));
        let mut written = 0;
        for _ in 0..n {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn parser(data: &[u8]) {
    let Some((&selector, input)) = data.split_first() else {
        return;
    };

    // Small limits exercise the depth check; the rest use the default.
    let options = match selector & 3 {
        0 => ParserOptions { max_depth: 1 + usize::from(selector >> 2) },
        _ => ParserOptions::default(),
    };
    let mut parser = Parser::new(options);

    match parser.parse(input) {
        Ok(value) => {
            let text = stringify(&value);
            let again = parser
                .parse(&text)
                .expect("serialized output must parse with the same options");
            assert_eq!(again, value, "parse(stringify(v)) differs for {text:?}");
            // Raw non-UTF-8 string bytes are kept here and rejected by serde_json.
            if std::str::from_utf8(input).is_err() {
                return;
            }
            if let Err(e) = serde_json::from_slice::<Value>(input) {
                // serde_json keeps its own, lower, nesting limit.
                assert!(
                    e.to_string().contains("recursion limit"),
                    "accepted a document serde_json rejects ({e}): {:?}",
                    String::from_utf8_lossy(input)
                );
            }
        }
        Err(err) => {
            assert!(err.line >= 1 && err.column >= 1);
            if err.kind() != ErrorKind::MaxDepthExceeded && err.kind() != ErrorKind::NumberTooBig {
                assert!(
                    serde_json::from_slice::<Value>(input).is_err(),
                    "rejected a document serde_json accepts: {err}"
                );
            }
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));
