//! Codec Module
//!
//! Narrow (de)serialization interface injected into the facade.
//!
//! The facade holds two independent codec instances, one for keys and one
//! for values, and they need not use the same encoding. Key codecs must be
//! deterministic: equal logical keys must encode to equal bytes, otherwise
//! store lookups will never hit.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

// == Codec Trait ==
/// Turns a key or value into wire bytes and back.
///
/// `decode` is never invoked on an absent store slot; callers see absence
/// before any decoding happens. Decoding empty or malformed input is an
/// error, never a fabricated value.
pub trait Codec<T>: Send + Sync {
    /// Encodes a value into bytes.
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decodes bytes back into a value.
    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

// == JSON Codec ==
/// Codec backed by serde_json.
///
/// JSON encoding of strings and integers is deterministic, which makes this
/// codec suitable for keys as well as values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

// == MessagePack Codec ==
/// Codec backed by rmp-serde (MessagePack).
///
/// More compact on the wire than JSON; typically used for values while keys
/// stay JSON for readability in redis-cli.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl<T> Codec<T> for MsgPackCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        rmp_serde::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
