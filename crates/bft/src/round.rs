//! Round transition predicates.
//!
//! The round driver (timers, gossip, leader election) lives outside this
//! workspace; what lives here is the decision of *when* a round's state may
//! move. A round starts collecting votes, commits once its leading candidate
//! gathers a supermajority of recognized signatures, and is rejected once no
//! remaining voting scenario could reach that threshold. Both outcomes are
//! terminal.

use crate::SupermajorityChecker;
use attest_types::{PeerSet, SignedMessage};
use std::fmt;
use tracing::debug;

/// State of a voting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Votes are still being collected.
    Collecting,
    /// The leading candidate reached supermajority. Terminal.
    Committed,
    /// No remaining scenario reaches supermajority. Terminal.
    Rejected,
}

impl RoundPhase {
    /// Whether the round has reached an outcome no further vote can change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Committed | RoundPhase::Rejected)
    }

    /// Re-evaluate the round against the current vote state.
    ///
    /// `leading` is the candidate message with the most signatures, `voted`
    /// the number of peers that have voted for any candidate, `peers` the
    /// round's membership snapshot. Commit is checked before reject.
    /// Terminal phases absorb: stepping `Committed` or `Rejected` returns
    /// the phase unchanged.
    pub fn step(
        self,
        checker: &SupermajorityChecker,
        leading: &SignedMessage,
        voted: usize,
        peers: &PeerSet,
    ) -> RoundPhase {
        if self.is_terminal() {
            return self;
        }

        if checker.has_supermajority(leading.signatures(), peers) {
            debug!(
                candidate = ?leading.hash(),
                signatures = leading.signature_count(),
                peers = peers.len(),
                "round committed"
            );
            return RoundPhase::Committed;
        }

        if checker.has_reject(leading.signature_count(), voted, peers.len()) {
            debug!(
                candidate = ?leading.hash(),
                frequent = leading.signature_count(),
                voted,
                peers = peers.len(),
                "round rejected, threshold unreachable"
            );
            return RoundPhase::Rejected;
        }

        RoundPhase::Collecting
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundPhase::Collecting => "collecting",
            RoundPhase::Committed => "committed",
            RoundPhase::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::{KeyPair, Peer};

    fn committee(n: usize) -> (Vec<KeyPair>, PeerSet) {
        let members: Vec<KeyPair> = (0..n)
            .map(|i| KeyPair::from_seed([i as u8 + 1; 32]))
            .collect();
        let peers = members
            .iter()
            .map(|kp| Peer::new(kp.public_key()))
            .collect();
        (members, peers)
    }

    #[test]
    fn test_collects_until_quorum_then_commits() {
        let checker = SupermajorityChecker::new();
        let (members, peers) = committee(4);
        let mut message = SignedMessage::new(b"candidate".to_vec(), 0);
        let mut phase = RoundPhase::Collecting;

        for (voted, member) in members.iter().take(3).enumerate() {
            assert_eq!(phase, RoundPhase::Collecting);
            message.add_signature(member.sign(b"candidate"), member.public_key());
            phase = phase.step(&checker, &message, voted + 1, &peers);
        }

        assert_eq!(phase, RoundPhase::Committed);
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_rejects_when_threshold_unreachable() {
        let checker = SupermajorityChecker::new();
        let (members, peers) = committee(4);

        // Leading candidate holds 1 vote, 3 peers have voted overall:
        // 1 + (4 - 3) = 2 < 3, no scenario reaches quorum
        let mut leading = SignedMessage::new(b"candidate-a".to_vec(), 0);
        leading.add_signature(members[0].sign(b"candidate-a"), members[0].public_key());

        let phase = RoundPhase::Collecting.step(&checker, &leading, 3, &peers);
        assert_eq!(phase, RoundPhase::Rejected);
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_terminal_phases_absorb() {
        let checker = SupermajorityChecker::new();
        let (members, peers) = committee(4);

        // A message that satisfies the commit predicate
        let mut message = SignedMessage::new(b"candidate".to_vec(), 0);
        for member in &members[..3] {
            message.add_signature(member.sign(b"candidate"), member.public_key());
        }

        assert_eq!(
            RoundPhase::Rejected.step(&checker, &message, 3, &peers),
            RoundPhase::Rejected
        );
        assert_eq!(
            RoundPhase::Committed.step(&checker, &message, 3, &peers),
            RoundPhase::Committed
        );
    }

    #[test]
    fn test_single_peer_round_commits_on_own_vote() {
        let checker = SupermajorityChecker::new();
        let (members, peers) = committee(1);

        let mut message = SignedMessage::new(b"candidate".to_vec(), 0);
        let phase = RoundPhase::Collecting.step(&checker, &message, 0, &peers);
        assert_eq!(phase, RoundPhase::Collecting);

        message.add_signature(members[0].sign(b"candidate"), members[0].public_key());
        let phase = phase.step(&checker, &message, 1, &peers);
        assert_eq!(phase, RoundPhase::Committed);
    }
}
