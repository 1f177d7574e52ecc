//! End-to-end round flows: signed votes collected into a message, driven
//! through the quorum predicates to a terminal outcome.

use attest_bft::{RoundPhase, SupermajorityChecker};
use attest_types::{codec, KeyPair, Peer, PeerSet, SignedMessage};

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

/// Verify-then-attach, the way the round driver handles an incoming vote.
fn cast_vote(message: &mut SignedMessage, voter: &KeyPair) -> bool {
    let digest = message.hash();
    let signature = voter.sign(digest.as_bytes());
    assert!(voter.public_key().verify(digest.as_bytes(), &signature));
    message.add_signature(signature, voter.public_key())
}

#[test]
fn seven_peer_round_commits_at_threshold() {
    let checker = SupermajorityChecker::new();
    let (members, peers) = committee(7);

    let mut message = SignedMessage::new(b"block 42".to_vec(), 1_700_000_000_000);
    let mut phase = RoundPhase::Collecting;

    // f=2, threshold=5: the first four votes leave the round open
    for (voted, member) in members.iter().take(4).enumerate() {
        assert!(cast_vote(&mut message, member));
        phase = phase.step(&checker, &message, voted + 1, &peers);
        assert_eq!(phase, RoundPhase::Collecting);
    }

    assert!(cast_vote(&mut message, &members[4]));
    phase = phase.step(&checker, &message, 5, &peers);
    assert_eq!(phase, RoundPhase::Committed);

    // Late votes change nothing
    assert!(cast_vote(&mut message, &members[5]));
    phase = phase.step(&checker, &message, 6, &peers);
    assert_eq!(phase, RoundPhase::Committed);
}

#[test]
fn duplicate_and_unrecognized_votes_never_reach_quorum() {
    let checker = SupermajorityChecker::new();
    let (members, peers) = committee(4);

    let mut message = SignedMessage::new(b"block 43".to_vec(), 0);

    // Two real votes, one of them replayed
    assert!(cast_vote(&mut message, &members[0]));
    assert!(cast_vote(&mut message, &members[1]));
    assert!(!cast_vote(&mut message, &members[1]));
    assert_eq!(message.signature_count(), 2);

    // An outsider's vote raises the count past the threshold but can never
    // produce a quorum
    let outsider = KeyPair::from_seed([250; 32]);
    assert!(cast_vote(&mut message, &outsider));
    assert_eq!(message.signature_count(), 3);

    let phase = RoundPhase::Collecting.step(&checker, &message, 3, &peers);
    assert_eq!(phase, RoundPhase::Collecting);
}

#[test]
fn split_round_rejects_once_threshold_unreachable() {
    let checker = SupermajorityChecker::new();
    let (members, peers) = committee(4);

    // Votes split 1/1/1 across three candidates; the fourth peer is still
    // outstanding. Leading candidate: 1 + 1 = 2 < 3, hopeless.
    let mut leading = SignedMessage::new(b"candidate-a".to_vec(), 0);
    cast_vote(&mut leading, &members[0]);

    let mut phase = RoundPhase::Collecting;
    phase = phase.step(&checker, &leading, 1, &peers);
    assert_eq!(phase, RoundPhase::Collecting);

    // members[1] and members[2] voted for other candidates
    phase = phase.step(&checker, &leading, 3, &peers);
    assert_eq!(phase, RoundPhase::Rejected);

    // The outcome is sticky even if the last peer's vote arrives late
    cast_vote(&mut leading, &members[3]);
    phase = phase.step(&checker, &leading, 4, &peers);
    assert_eq!(phase, RoundPhase::Rejected);
}

#[test]
fn message_survives_wire_round_trip_mid_round() {
    let checker = SupermajorityChecker::new();
    let (members, peers) = committee(4);

    let mut message = SignedMessage::new(b"block 44".to_vec(), 5);
    cast_vote(&mut message, &members[0]);
    cast_vote(&mut message, &members[1]);

    // Ship the partially signed message and keep collecting on the copy
    let bytes = message.blob().expect("encode");
    let mut received = codec::decode_message(&bytes).expect("decode");
    assert_eq!(received, message);
    assert_eq!(received.hash(), message.hash());

    cast_vote(&mut received, &members[2]);
    let phase = RoundPhase::Collecting.step(&checker, &received, 3, &peers);
    assert_eq!(phase, RoundPhase::Committed);
}
