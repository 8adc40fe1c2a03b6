/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;

use crate::error::{self, Error};

mod finite;

pub(crate) use self::finite::ensure_finite;

/// An application value in the structural value model.
///
/// Supported shapes are null, booleans, numbers (`i64`, `u64` and finite `f64`), strings, arrays
/// and objects with unique string keys, nested arbitrarily.
pub type Value = serde_json::Value;

/// Converts application values to and from the bytes persisted in the backend.
///
/// Implementations must satisfy `deserialize(serialize(v)) == v` for every supported value and
/// must fail with [`ErrorKind::Serialization`](crate::error::ErrorKind::Serialization), never a
/// partial value, when handed bytes they did not produce.
pub trait Codec: Send + Sync + fmt::Debug {
    /// Encode `value` into bytes.
    fn serialize(&self, value: &Value) -> Result<Bytes, Error>;

    /// Decode bytes previously produced by [`Codec::serialize`].
    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error>;
}

/// A cheaply cloneable, shared [`Codec`].
#[derive(Clone, Debug)]
pub struct SharedCodec(Arc<dyn Codec>);

impl SharedCodec {
    /// Wrap `codec` for sharing.
    pub fn new(codec: impl Codec + 'static) -> Self {
        Self(Arc::new(codec))
    }
}

impl Codec for SharedCodec {
    fn serialize(&self, value: &Value) -> Result<Bytes, Error> {
        self.0.serialize(value)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.0.deserialize(bytes)
    }
}

const MAGIC: &[u8; 3] = b"DSV";
const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;

/// The default codec.
///
/// Output is a 4 byte header (`DSV` followed by a format version byte) and the JSON encoding of
/// the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn serialize(&self, value: &Value) -> Result<Bytes, Error> {
        let mut buf = Vec::with_capacity(HEADER_LEN + 64);
        buf.extend_from_slice(MAGIC);
        buf.push(FORMAT_VERSION);
        serde_json::to_writer(&mut buf, value)?;
        Ok(Bytes::from(buf))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        if bytes.len() < HEADER_LEN {
            return Err(error::serialization(format!(
                "truncated header: expected at least {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let (header, body) = bytes.split_at(HEADER_LEN);
        if &header[..MAGIC.len()] != MAGIC {
            return Err(error::serialization("unrecognized serialization format"));
        }

        let version = header[MAGIC.len()];
        if version != FORMAT_VERSION {
            return Err(error::serialization(format!(
                "unsupported format version {version}, expected {FORMAT_VERSION}"
            )));
        }

        Ok(serde_json::from_slice(body)?)
    }
}

type CodecInit = Arc<dyn Fn() -> SharedCodec + Send + Sync>;

/// A codec that is constructed on first use.
///
/// The constructor is injected up front and runs at most once, the first time a value is
/// serialized or deserialized. Clones share the constructed codec.
#[derive(Clone)]
pub struct LazyCodec {
    init: CodecInit,
    codec: Arc<OnceLock<SharedCodec>>,
}

impl LazyCodec {
    /// Create a lazy codec from a constructor.
    pub fn new<F, C>(init: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Codec + 'static,
    {
        Self {
            init: Arc::new(move || SharedCodec::new(init())),
            codec: Arc::new(OnceLock::new()),
        }
    }

    /// Whether the underlying codec has been constructed yet.
    pub fn is_initialized(&self) -> bool {
        self.codec.get().is_some()
    }

    fn codec(&self) -> &SharedCodec {
        self.codec.get_or_init(|| {
            let codec = (self.init)();
            tracing::debug!(?codec, "initialized codec");
            codec
        })
    }
}

impl Default for LazyCodec {
    fn default() -> Self {
        Self::new(|| JsonCodec)
    }
}

impl fmt::Debug for LazyCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyCodec")
            .field("codec", &self.codec.get())
            .finish()
    }
}

impl Codec for LazyCodec {
    fn serialize(&self, value: &Value) -> Result<Bytes, Error> {
        self.codec().serialize(value)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.codec().deserialize(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn assert_round_trip(codec: &impl Codec, value: Value) {
        let bytes = codec.serialize(&value).unwrap();
        assert_eq!(value, codec.deserialize(&bytes).unwrap());
    }

    #[test]
    fn test_round_trip_document() {
        assert_round_trip(&JsonCodec, json!({"id": 42, "tags": ["a", "b"]}));
    }

    #[test]
    fn test_round_trip_value_shapes() {
        let values = vec![
            Value::Null,
            json!(true),
            json!(-17),
            json!(u64::MAX),
            json!(i64::MIN),
            json!(0.1),
            json!(-2.5e300),
            json!(""),
            json!("ünïcødé \u{1F600}"),
            json!([]),
            json!({}),
            json!([1, "two", null, [3.5, {"four": false}]]),
            json!({"a": {"b": {"c": [{"d": null}]}}, "e": []}),
        ];
        for value in values {
            assert_round_trip(&JsonCodec, value);
        }
    }

    #[test]
    fn test_header() {
        let bytes = JsonCodec.serialize(&json!(1)).unwrap();
        assert_eq!(b"DSV\x011", bytes.as_ref());
    }

    #[test]
    fn test_malformed_bytes() {
        let cases: Vec<&[u8]> = vec![
            b"",
            b"DS",
            b"XYZ\x01{}",
            b"DSV\x02{}",
            b"DSV\x01",
            b"DSV\x01{\"id\":",
            b"DSV\x01{} trailing",
            b"DSV\x01\xff\xfe",
        ];
        for bytes in cases {
            let err = JsonCodec.deserialize(bytes).unwrap_err();
            assert_eq!(&ErrorKind::Serialization, err.kind(), "input: {bytes:?}");
        }
    }

    #[test]
    fn test_lazy_codec_constructed_once_on_first_use() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let codec = LazyCodec::new({
            let constructed = constructed.clone();
            move || {
                constructed.fetch_add(1, Ordering::SeqCst);
                JsonCodec
            }
        });
        let clone = codec.clone();

        assert!(!codec.is_initialized());
        assert_eq!(0, constructed.load(Ordering::SeqCst));

        let bytes = codec.serialize(&json!({"k": "v"})).unwrap();
        assert_eq!(json!({"k": "v"}), clone.deserialize(&bytes).unwrap());

        assert!(clone.is_initialized());
        assert_eq!(1, constructed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_shared_codec_delegates() {
        let codec = SharedCodec::new(JsonCodec);
        assert_round_trip(&codec, json!([1, 2, 3]));
    }
}
