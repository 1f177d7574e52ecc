//! Supermajority and rejection predicates.
//!
//! Everything here is a pure function over a consistent snapshot of
//! signatures and peers. The caller (the round driver) owns the snapshots
//! and the state they feed; nothing in this module allocates, blocks, or
//! holds state between calls.

use attest_types::{PeerSet, VoteSignature};
use std::collections::BTreeSet;
use tracing::debug;

/// Stateless quorum decision service.
///
/// With `n` peers the protocol tolerates `f = ⌊(n − 1) / 3⌋` Byzantine
/// participants; a candidate is safe to commit once at least
/// `2(n − 1)/3 + 1` recognized peers have signed it, because any two such
/// quorums intersect in at least one honest peer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupermajorityChecker;

impl SupermajorityChecker {
    /// Create a checker.
    pub fn new() -> Self {
        SupermajorityChecker
    }

    /// Whether `current` signers out of `total` peers meet the
    /// supermajority threshold `2(total − 1)/3 + 1`.
    ///
    /// The threshold is evaluated exactly, in rationals. Where `total − 1`
    /// divides by three this is the familiar `2f + 1`; in between it rounds
    /// up, never down, so two peers need both signatures and three peers
    /// need all three.
    ///
    /// `current > total` means more signers than peers exist, which is a
    /// data-integrity violation upstream, never a valid quorum: the answer
    /// is `false`. With `total = 0` the threshold is unreachable, so the
    /// answer is `false` for every `current`. Monotonic non-decreasing in
    /// `current`.
    pub fn check_size(&self, current: usize, total: usize) -> bool {
        if current > total {
            return false;
        }
        // current >= 2(total - 1)/3 + 1, cross-multiplied to stay exact in
        // integers
        3 * current >= 2 * total + 1
    }

    /// Whether every signature belongs to a recognized peer.
    ///
    /// A single unmatched signer fails the whole predicate: a quorum built
    /// from unrecognized identities would let an attacker help saturate the
    /// threshold without controlling any real peer.
    pub fn peers_subset(&self, signatures: &BTreeSet<VoteSignature>, peers: &PeerSet) -> bool {
        for signature in signatures {
            if !peers.contains(&signature.public_key()) {
                debug!(signer = %signature.public_key(), "signature from unrecognized peer");
                return false;
            }
        }
        true
    }

    /// Whether `signatures` constitute a supermajority of `peers`.
    ///
    /// Both conjuncts are required: size alone cannot distinguish
    /// authenticated peer votes from forged ones, and subset-matching alone
    /// cannot guarantee enough distinct votes.
    pub fn has_supermajority(&self, signatures: &BTreeSet<VoteSignature>, peers: &PeerSet) -> bool {
        self.check_size(signatures.len(), peers.len()) && self.peers_subset(signatures, peers)
    }

    /// Whether the round can no longer reach supermajority for its leading
    /// candidate and should be abandoned.
    ///
    /// `frequent` is the vote count of the most popular candidate, `voted`
    /// the number of peers that have voted for any candidate, `all` the peer
    /// count. Even if every peer that has not voted yet were credited to the
    /// leading candidate, the threshold would still be out of reach.
    ///
    /// Callers guarantee `voted <= all` (at most one counted vote per peer);
    /// a violation trips a debug assertion, and in release the subtraction
    /// saturates, degrading to a conservative "no reject".
    pub fn has_reject(&self, frequent: usize, voted: usize, all: usize) -> bool {
        debug_assert!(voted <= all, "voted ({voted}) exceeds peer count ({all})");
        let not_voted = all.saturating_sub(voted);
        !self.check_size(frequent + not_voted, all)
    }
}
