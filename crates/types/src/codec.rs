//! Wire encoding for signed messages.
//!
//! # Wire Format
//!
//! ```text
//! [version: u8][body: SBOR-encoded message]
//! ```
//!
//! The body carries the payload, creation time, and the full signature set.
//! This is the serialized form behind [`SignedMessage::blob`]; transports
//! that need their own framing wrap these bytes, they do not extend them.

use crate::{SignedMessage, VoteSignature};
use sbor::prelude::BasicSbor;
use thiserror::Error;

/// Current wire format version.
pub const WIRE_VERSION: u8 = 1;

/// Errors that can occur during message encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown wire version: {0}")]
    UnknownVersion(u8),

    #[error("message too short")]
    MessageTooShort,

    #[error("SBOR decode error: {0}")]
    SborDecode(String),

    #[error("SBOR encode error: {0}")]
    SborEncode(String),
}

/// Wire-level view of a signed message.
#[derive(BasicSbor)]
struct SignedMessageWire {
    payload: Vec<u8>,
    created_at: u64,
    signatures: Vec<VoteSignature>,
}

/// Encode a message, signatures included, to wire format.
pub fn encode_message(message: &SignedMessage) -> Result<Vec<u8>, CodecError> {
    let wire = SignedMessageWire {
        payload: message.payload().to_vec(),
        created_at: message.created_at(),
        signatures: message.signatures().iter().copied().collect(),
    };
    let body =
        sbor::basic_encode(&wire).map_err(|e| CodecError::SborEncode(format!("{:?}", e)))?;

    let mut bytes = Vec::with_capacity(1 + body.len());
    bytes.push(WIRE_VERSION);
    bytes.extend(body);
    Ok(bytes)
}

/// Decode a wire-format message.
///
/// The decoded message uses the default hash provider; deployments with a
/// substituted provider rebuild via [`SignedMessage::with_hasher`] instead.
/// Signatures pass through the container's dedup on the way in.
pub fn decode_message(bytes: &[u8]) -> Result<SignedMessage, CodecError> {
    let (&version, body) = bytes.split_first().ok_or(CodecError::MessageTooShort)?;
    if version != WIRE_VERSION {
        return Err(CodecError::UnknownVersion(version));
    }

    let wire: SignedMessageWire =
        sbor::basic_decode(body).map_err(|e| CodecError::SborDecode(format!("{:?}", e)))?;

    let mut message = SignedMessage::new(wire.payload, wire.created_at);
    for signature in wire.signatures {
        message.add_signature(signature.signed_data(), signature.public_key());
    }
    Ok(message)
}
