//! Foundation types for the attest voting core.
//!
//! This crate provides the types the quorum logic operates over:
//!
//! - **Primitives**: [`Hash`], cryptographic keys and signatures
//! - **Membership**: [`Peer`] and the per-round [`PeerSet`] snapshot
//! - **Vote container**: [`SignedMessage`] with signature dedup and a
//!   memoized identity hash
//! - **Wire codec**: versioned SBOR encoding behind [`SignedMessage::blob`]
//!
//! # Design Philosophy
//!
//! This crate is self-contained: it depends on no other workspace crate,
//! making it the foundation layer. Keys and signatures are opaque fixed-size
//! blobs here; verifying a signature against a payload is the caller's job,
//! done before a vote ever reaches [`SignedMessage::add_signature`].

mod crypto;
mod hash;
mod message;
mod peer;

pub mod codec;

pub use crypto::{KeyPair, PublicKey, Signature};
pub use hash::{Blake3Hasher, Hash, HashProvider, HexError};
pub use message::{SignedMessage, VoteSignature};
pub use peer::{Peer, PeerSet};
