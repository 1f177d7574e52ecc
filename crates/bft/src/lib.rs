//! Quorum decision core for BFT voting rounds.
//!
//! This crate answers one safety-critical question: given the signatures
//! collected for a candidate outcome and a snapshot of recognized peers, may
//! the round commit — or is the threshold now unreachable, so the round
//! should be abandoned? The vote container itself lives in `attest-types`;
//! transport, timers, and leader election live with the round driver that
//! consumes this crate.
//!
//! # Safety
//!
//! - **Quorum intersection**: with `n` peers and `f = ⌊(n − 1) / 3⌋`
//!   tolerable Byzantine participants, any two sets meeting the
//!   `2(n − 1)/3 + 1` threshold overlap in at least one honest peer, so
//!   conflicting candidates cannot both commit.
//!
//! - **Recognized signers only**: a supermajority counts only signatures
//!   whose keys appear in the round's peer snapshot. One unrecognized
//!   signer invalidates the whole claim, so forged identities can never
//!   help saturate a threshold.
//!
//! # Liveness
//!
//! - **Early rejection**: once even the most optimistic remaining scenario
//!   (every outstanding peer votes for the current leader) cannot reach the
//!   threshold, the round is rejected immediately instead of waiting out
//!   unreachable unanimity.
//!
//! Both outcomes are terminal; [`RoundPhase::step`] never leaves
//! `Committed` or `Rejected`.

mod round;
mod supermajority;

pub use round::RoundPhase;
pub use supermajority::SupermajorityChecker;
