// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! An implementation of a password authenticated key exchange (PAKE) built
//! directly from a quantum-resistant key encapsulation mechanism
//!
//! ⚠️ **Warning**: This implementation has not been audited. Use at your own risk!
//!
//! # Overview
//!
//! blind-pake-kem is a protocol between two parties: an initiator and a
//! responder. Each holds an [`Input`] made of a password and a session id.
//! The initiator generates a fresh ML-KEM key pair and sends its encapsulation
//! key *blinded* under the password. The responder unblinds it with its own
//! password, encapsulates a shared secret to the result, and answers with the
//! ciphertext and a key confirmation tag bound to the whole transcript.
//!
//! If both parties used the same [`Input`], they end up with the same
//! [`Output`] and the initiator accepts the tag. Otherwise the initiator
//! rejects, and the responder's [`Output`] is (computationally) uncorrelated
//! with anything the initiator holds. An attacker without the password gets
//! one online guess per run.
//!
//! # Setup
//!
//! The two parties must agree on a [`CipherSuite`], which selects:
//! * a (quantum-resistant) key encapsulation mechanism, and
//! * a [`Blinding`] construction: [`HalfIdealCipher`] or [`TwoFeistel`].
//!
//! [`DefaultCipherSuite`] uses `MlKem768` with [`HalfIdealCipher`]. A custom
//! suite looks like this:
//! ```
//! use blind_pake_kem::CipherSuite;
//! struct Custom;
//! impl CipherSuite for Custom {
//!     type Kem = ml_kem::MlKem1024;
//!     type Blinding = blind_pake_kem::TwoFeistel;
//! }
//! ```
//! See `demos/demo.rs` for a working example.
//!
//! An input is created from a 32-byte password and a 32-byte session id, or
//! from a passphrase of any length:
//!
//! ```
//! use blind_pake_kem::Input;
//! let session_id = [0u8; 32];
//! let input = Input::from_passphrase(b"correct-horse", &session_id)
//!     .expect("Session ids are 32 bytes");
//! ```
//!
//! # Protocol Execution
//!
//! The protocol occurs over three steps, involving two messages between the
//! initiator and responder.
//!
//! ## Initiator Start
//!
//! The initiator begins the protocol by invoking the following with an
//! [`Input`] and a source of randomness:
//! ```
//! # use blind_pake_kem::{DefaultCipherSuite, Input};
//! # let input = Input::from_passphrase(b"correct-horse", &[0u8; 32]).unwrap();
//! use blind_pake_kem::Initiator;
//! use rand_core::OsRng;
//!
//! let mut initiator_rng = OsRng;
//! let (initiator, message_one) =
//!     Initiator::<DefaultCipherSuite>::start(&input, &mut initiator_rng)
//!         .expect("Error with Initiator::start()");
//! let message_one_bytes = message_one.to_bytes();
//! // Send message_one_bytes over the wire to the responder
//! ```
//!
//! The initiator retains the [`Initiator`] object for the
//! [third step](#initiator-finish), and sends the [`MessageOne`] bytes over
//! the wire to the responder.
//!
//! ## Responder
//!
//! Next, the responder invokes the following with an [`Input`], the
//! [`MessageOne`] received from the initiator, and a source of randomness:
//!
//! ```
//! # use blind_pake_kem::{DefaultCipherSuite, Input, Initiator};
//! # use rand_core::OsRng;
//! # let input = Input::from_passphrase(b"correct-horse", &[0u8; 32]).unwrap();
//! # let (initiator, message_one) =
//! #     Initiator::<DefaultCipherSuite>::start(&input, &mut OsRng).unwrap();
//! # let message_one_bytes = message_one.to_bytes();
//! use blind_pake_kem::{MessageOne, Responder};
//!
//! let mut responder_rng = OsRng;
//! let message_one = MessageOne::<DefaultCipherSuite>::from_bytes(&message_one_bytes)
//!     .expect("Error with MessageOne::from_bytes()");
//! let (responder_output, message_two) =
//!     Responder::<DefaultCipherSuite>::respond(&input, &message_one, &mut responder_rng)
//!         .expect("Error with Responder::respond()");
//! let message_two_bytes = message_two.to_bytes();
//! // Send message_two_bytes over the wire to the initiator
//! ```
//!
//! The responder keeps `responder_output` as its session key. It receives
//! no confirmation that the initiator derived the same key.
//!
//! ## Initiator Finish
//!
//! Finally, the initiator invokes the following with the object retained
//! from [the first step](#initiator-start), the [`MessageTwo`] received from
//! the responder, and a source of randomness:
//!
//! ```
//! # use blind_pake_kem::{DefaultCipherSuite, Input, Initiator, MessageOne, Responder};
//! # use rand_core::OsRng;
//! # let input = Input::from_passphrase(b"correct-horse", &[0u8; 32]).unwrap();
//! # let (initiator, message_one) =
//! #     Initiator::<DefaultCipherSuite>::start(&input, &mut OsRng).unwrap();
//! # let message_one_bytes = message_one.to_bytes();
//! # let message_one = MessageOne::<DefaultCipherSuite>::from_bytes(&message_one_bytes).unwrap();
//! # let (responder_output, message_two) =
//! #     Responder::<DefaultCipherSuite>::respond(&input, &message_one, &mut OsRng).unwrap();
//! # let message_two_bytes = message_two.to_bytes();
//! # let mut initiator_rng = OsRng;
//! use blind_pake_kem::MessageTwo;
//!
//! let message_two = MessageTwo::<DefaultCipherSuite>::from_bytes(&message_two_bytes)
//!     .expect("Error with MessageTwo::from_bytes()");
//! let (initiator_output, confirmation) = initiator
//!     .finish_with_status(&message_two, &mut initiator_rng)
//!     .expect("Error with Initiator::finish_with_status()");
//! assert_eq!(confirmation.code(), 0);
//! assert_eq!(initiator_output, responder_output);
//! ```
//!
//! [`Initiator::finish_with_status`] always returns a key: on rejection it is
//! random and [`Confirmation::code`] is `-1`. [`Initiator::finish`] instead
//! maps rejection to [`PakeKemError::AuthenticationFailure`].
//!
//! # Serialization
//!
//! The [`Initiator`] state can be held across a call boundary with
//! [`Initiator::to_bytes`] and [`Initiator::from_bytes`]. The encoding
//! contains the KEM decapsulation key and is returned in a zeroizing buffer.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::doc_markdown, missing_docs, rustdoc::all)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod blind;
mod cipher;
mod ct;
mod errors;
mod hash;
mod messages;
mod params;
mod poly;
mod protocol;
mod sample;

#[cfg(test)]
mod tests {
    mod test_protocol;
    mod test_serialization;
}

pub use blind::{
    Blinding, HalfIdealCipher, HalfIdealCipherKey, Password, PublicKey, SessionId, TwoFeistel,
    TwoFeistelKey,
};
pub use errors::PakeKemError;
pub use messages::{MessageOne, MessageTwo};
pub use params::SYMBYTES;
pub use protocol::{
    CipherSuite, Confirmation, DefaultCipherSuite, Initiator, Input, MlKem1024HalfIdealCipher,
    MlKem1024TwoFeistel, MlKem512HalfIdealCipher, MlKem512TwoFeistel, Output, Responder,
    TwoFeistelCipherSuite,
};
pub use rand_core;
