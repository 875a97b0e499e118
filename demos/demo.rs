// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use blind_pake_kem::rand_core::OsRng;
use blind_pake_kem::DefaultCipherSuite;
use blind_pake_kem::Initiator;
use blind_pake_kem::Input;
use blind_pake_kem::MessageOne;
use blind_pake_kem::MessageTwo;
use blind_pake_kem::Responder;

fn main() {
    let session_id = [0u8; 32];
    let input = Input::from_passphrase(b"correct-horse", &session_id)
        .expect("Error with Input::from_passphrase()");

    let mut initiator_rng = OsRng;
    let mut responder_rng = OsRng;

    let (initiator, message_one) =
        Initiator::<DefaultCipherSuite>::start(&input, &mut initiator_rng)
            .expect("Error with Initiator::start()");

    let initiator_serialized = initiator.to_bytes();
    println!("initiator bytes ({} bytes)", initiator_serialized.len());

    let message_one_serialized = message_one.to_bytes();
    println!(
        "message_one bytes ({} bytes): {:?}",
        message_one_serialized.len(),
        hex::encode(&message_one_serialized)
    );
    let message_one_deserialized =
        MessageOne::<DefaultCipherSuite>::from_bytes(&message_one_serialized)
            .expect("Error with MessageOne::from_bytes()");

    let (responder_output, message_two) = Responder::<DefaultCipherSuite>::respond(
        &input,
        &message_one_deserialized,
        &mut responder_rng,
    )
    .expect("Error with Responder::respond()");

    let message_two_serialized = message_two.to_bytes();
    println!(
        "message_two bytes ({} bytes): {:?}",
        message_two_serialized.len(),
        hex::encode(&message_two_serialized)
    );
    let message_two_deserialized =
        MessageTwo::<DefaultCipherSuite>::from_bytes(&message_two_serialized)
            .expect("Error with MessageTwo::from_bytes()");

    let initiator = Initiator::<DefaultCipherSuite>::from_bytes(&initiator_serialized)
        .expect("Error with Initiator::from_bytes()");
    let (initiator_output, confirmation) = initiator
        .finish_with_status(&message_two_deserialized, &mut initiator_rng)
        .expect("Error with Initiator::finish_with_status()");

    println!("status: {}", confirmation.code());
    println!(
        "initiator_output: ({} bytes): {:?}",
        initiator_output.as_bytes().len(),
        hex::encode(initiator_output.as_bytes())
    );

    assert!(confirmation.is_accepted());
    assert_eq!(initiator_output, responder_output);
}
