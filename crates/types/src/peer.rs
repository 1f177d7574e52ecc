//! Round membership snapshot.

use crate::PublicKey;
use std::collections::BTreeMap;

/// A consensus participant, identified by its public key.
///
/// Transport addressing, stake, and other attributes live with the membership
/// protocol that produces the snapshot, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    public_key: PublicKey,
}

impl Peer {
    /// Create a peer record for `public_key`.
    pub fn new(public_key: PublicKey) -> Self {
        Peer { public_key }
    }

    /// The peer's identity key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }
}

/// An immutable snapshot of the peers recognized for one voting round.
///
/// Supplied by the membership layer at round start. The voting core only
/// reads it; membership changes produce a new snapshot for a later round.
/// Duplicate public keys in the input collapse to a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerSet {
    peers: BTreeMap<PublicKey, Peer>,
}

impl PeerSet {
    /// Build a snapshot from peer records.
    pub fn new(peers: impl IntoIterator<Item = Peer>) -> Self {
        PeerSet {
            peers: peers
                .into_iter()
                .map(|peer| (peer.public_key(), peer))
                .collect(),
        }
    }

    /// Number of distinct peers in the snapshot.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Whether `public_key` belongs to a recognized peer.
    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.peers.contains_key(public_key)
    }

    /// Iterate the peers in deterministic (key) order.
    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.values()
    }
}

impl FromIterator<Peer> for PeerSet {
    fn from_iter<I: IntoIterator<Item = Peer>>(iter: I) -> Self {
        PeerSet::new(iter)
    }
}
