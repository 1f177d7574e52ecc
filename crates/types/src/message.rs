//! Signed message container for vote collection.
//!
//! A `SignedMessage` carries one candidate outcome (its payload) through a
//! voting round, accumulating signatures from peers as votes arrive over
//! gossip. The container is responsible for exactly three things the quorum
//! logic depends on: deduplicating signatures, keeping payload and creation
//! time immutable, and memoizing the payload's identity hash.
//!
//! Signature verification happens before a vote reaches this container; an
//! attached signature is structural data here, never a proof by itself.

use crate::hash::{Blake3Hasher, Hash, HashProvider};
use crate::{PublicKey, Signature};
use sbor::prelude::BasicSbor;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// One authenticated vote fragment: a signer identity paired with the signed
/// data it produced over the message payload.
///
/// The pair itself is the uniqueness key. Deriving `Ord` on the
/// (public_key, signed_data) field order gives a deterministic composite key,
/// which is what makes `BTreeSet` the dedup structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, BasicSbor)]
pub struct VoteSignature {
    public_key: PublicKey,
    signed_data: Signature,
}

impl VoteSignature {
    /// Pair a signer with its signed data.
    pub fn new(public_key: PublicKey, signed_data: Signature) -> Self {
        VoteSignature {
            public_key,
            signed_data,
        }
    }

    /// The signer's identity key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// The opaque signed data.
    pub fn signed_data(&self) -> Signature {
        self.signed_data
    }
}

/// A payload under vote, with the signatures collected for it so far.
///
/// Payload and creation time are fixed at construction; only the signature
/// set mutates. The identity hash covers the payload alone (never signatures
/// or creation time) and is computed once, on first access, through the
/// injected [`HashProvider`].
///
/// Mutation goes through `&mut self`, so exclusive access is the concurrency
/// guard for the no-duplicate invariant; collectors that share an instance
/// across threads wrap it in a lock. The hash memo is a [`OnceLock`], so
/// shared readers racing the first `hash()` call agree on one value.
pub struct SignedMessage {
    payload: Vec<u8>,
    created_at: u64,
    signatures: BTreeSet<VoteSignature>,
    hasher: Arc<dyn HashProvider>,
    hash: OnceLock<Hash>,
}

impl SignedMessage {
    /// Create a message with the default (blake3) hash provider.
    ///
    /// `created_at` is milliseconds since the Unix epoch, supplied by the
    /// caller; the core never reads a clock.
    pub fn new(payload: Vec<u8>, created_at: u64) -> Self {
        Self::with_hasher(payload, created_at, Arc::new(Blake3Hasher))
    }

    /// Create a message with an explicit hash provider.
    pub fn with_hasher(payload: Vec<u8>, created_at: u64, hasher: Arc<dyn HashProvider>) -> Self {
        SignedMessage {
            payload,
            created_at,
            signatures: BTreeSet::new(),
            hasher,
            hash: OnceLock::new(),
        }
    }

    /// The immutable signable content (everything excluded from signatures).
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Read-only view of the attached signatures.
    pub fn signatures(&self) -> &BTreeSet<VoteSignature> {
        &self.signatures
    }

    /// Number of distinct signatures attached.
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Attach a signature.
    ///
    /// Returns `true` if the (public_key, signed_data) pair was new, `false`
    /// if an identical pair was already present. A duplicate is a normal
    /// outcome under gossip, not an error.
    pub fn add_signature(&mut self, signed_data: Signature, public_key: PublicKey) -> bool {
        let inserted = self
            .signatures
            .insert(VoteSignature::new(public_key, signed_data));
        if !inserted {
            trace!(signer = %public_key, "duplicate signature ignored");
        }
        inserted
    }

    /// Remove all signatures.
    ///
    /// Returns `true` iff the set was non-empty before the call.
    pub fn clear_signatures(&mut self) -> bool {
        let had_signatures = !self.signatures.is_empty();
        self.signatures.clear();
        had_signatures
    }

    /// The message's identity hash: a digest of the payload alone.
    ///
    /// Computed on first access and cached for the instance's lifetime;
    /// repeated calls return the identical value.
    pub fn hash(&self) -> Hash {
        *self
            .hash
            .get_or_init(|| self.hasher.make_hash(&self.payload))
    }

    /// Full serialized form including signatures, in the versioned wire
    /// format. See [`crate::codec`].
    pub fn blob(&self) -> Result<Vec<u8>, crate::codec::CodecError> {
        crate::codec::encode_message(self)
    }
}

// Manual PartialEq - identity hash, signature set, and creation time, per the
// container's equality contract. Payload bytes are covered through the hash.
impl PartialEq for SignedMessage {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
            && self.signatures == other.signatures
            && self.created_at == other.created_at
    }
}

impl Eq for SignedMessage {}

// Manual Clone - OnceLock doesn't implement Clone. An already-computed hash
// is carried over; an unset memo stays unset.
impl Clone for SignedMessage {
    fn clone(&self) -> Self {
        let hash = OnceLock::new();
        if let Some(computed) = self.hash.get() {
            let _ = hash.set(*computed);
        }
        SignedMessage {
            payload: self.payload.clone(),
            created_at: self.created_at,
            signatures: self.signatures.clone(),
            hasher: Arc::clone(&self.hasher),
            hash,
        }
    }
}

// Manual Debug - skip the provider, show the memo only if computed
impl fmt::Debug for SignedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedMessage")
            .field("payload_len", &self.payload.len())
            .field("created_at", &self.created_at)
            .field("signatures", &self.signatures.len())
            .field("hash", &self.hash.get())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SignedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignedMessage(hash={:?}, created_at={}, signers={})",
            self.hash(),
            self.created_at,
            self.signatures.len()
        )
    }
}
