// Copyright 2018 The Exonum Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Confidential account balances over Ristretto255.
//!
//! Every account holds an ElGamal-style commitment to a hidden balance
//! under its own public key instead of a plaintext integer. Deposit and
//! Burn move value between a public, plaintext ledger and a confidential
//! commitment; Transfer and Withdraw move value between commitments, and
//! between a commitment and the public ledger, without ever revealing the
//! amount to anyone but the two parties involved.
//!
//! [`account::Account`] holds the secret-key side of this: its own XOF,
//! secret key and current commitment, and the operations that turn a
//! requested amount into a proof. [`ledger::Ledger`] holds the public
//! side: the map from public key to commitment, and the verifiers that
//! either accept a proof and update that map, or reject it. [`wire`] is
//! the binary framing proofs travel over; [`crypto`] is everything
//! underneath both.
//!
//! The shared generator `G` that every account's public key and every
//! commitment is expressed against is owned by a single process-wide
//! [`crypto::generators::RangeProver`], reachable through [`range_prover`].

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate failure_derive;

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod wire;

use crypto::generators::RangeProver;

lazy_static! {
    /// The process-wide generator set every account and ledger is built
    /// against. All accounts must share the exact same `G`, `H` and
    /// Bulletproofs generator vectors to interoperate, so this is the one
    /// instance the crate hands out.
    pub static ref RANGE_PROVER: RangeProver =
        RangeProver::new(config::Config::default()).expect("default configuration must build a valid generator set");
}

/// Returns the shared generator set backing every [`account::Account`] and
/// [`ledger::Ledger`] constructed without an explicit prover.
pub fn range_prover() -> &'static RangeProver {
    &RANGE_PROVER
}

#[cfg(test)]
mod tests {
    use super::*;
    use account::Account;
    use crypto::transcript::Transcript;
    use ledger::Ledger;
    use sha2::{Digest, Sha256};

    fn seed(bytes: &[u8]) -> [u8; 32] {
        Sha256::digest(bytes).into()
    }

    #[test]
    fn deposit_transfer_withdraw_round_trip_through_the_shared_prover() {
        let prover = range_prover();
        let ledger = Ledger::new(prover);

        let mut alice = Account::init(seed(b"hello"), prover);
        let bob = Account::init(seed(b"world"), prover);

        let comm = alice.deposit(1_000);
        let deposit_proof = alice.gen_deposit_proof(1_000, &comm);
        ledger.register(alice.pk(), comm);
        assert!(ledger.verify_commitment_proof(&alice.pk(), &comm, &deposit_proof));

        let mut transcript = Transcript::new(*b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef");
        let transfer_proof = alice.gen_transfer_proof(&mut transcript, 400, bob.pk()).unwrap();

        let mut verify_transcript =
            Transcript::new(*b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef");
        assert!(ledger
            .verify_transfer_proof(&mut verify_transcript, &alice.pk(), &bob.pk(), &transfer_proof)
            .unwrap());
        assert_eq!(alice.balance(), Some(600));

        let mut withdraw_transcript = Transcript::new([7u8; 64]);
        let withdraw_proof = alice.gen_withdraw_proof(&mut withdraw_transcript, 100).unwrap();
        let mut verify_withdraw_transcript = Transcript::new([7u8; 64]);
        assert!(ledger
            .verify_withdraw_proof(&mut verify_withdraw_transcript, &alice.pk(), 100, &withdraw_proof)
            .unwrap());
        assert_eq!(alice.balance(), Some(500));
    }
}
