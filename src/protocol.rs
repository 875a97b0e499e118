// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The protocol implementation

use crate::blind::{
    split_halves, Blinding, HalfIdealCipher, Password, PublicKey, SessionId, TwoFeistel,
};
use crate::ct;
use crate::errors::{check_length, PakeKemError};
use crate::hash::{hash_g, hash_h};
use crate::messages::{decapsulation_key_len, encapsulation_key_len, MessageOne, MessageTwo};
use crate::params::SYMBYTES;
use core::fmt;
use core::marker::PhantomData;
use kem::{Decapsulate, Encapsulate};
use ml_kem::{Encoded, EncodedSizeUser, KemCore};
use rand_core::{CryptoRng, RngCore};
use subtle::Choice;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

type Result<T> = core::result::Result<T, PakeKemError>;

/// Configures the primitives used in the protocol:
/// * Kem: a (quantum-resistant) key encapsulation mechanism, and
/// * Blinding: the password-keyed transform applied to its encapsulation key.
pub trait CipherSuite {
    /// The key encapsulation mechanism to use
    type Kem: KemCore;
    /// The construction used to blind the encapsulation key
    type Blinding: Blinding;
}

/// The default [`CipherSuite`], based on `MlKem768` and [`HalfIdealCipher`]
#[derive(Debug)]
pub struct DefaultCipherSuite;
impl CipherSuite for DefaultCipherSuite {
    type Kem = ml_kem::MlKem768;
    type Blinding = HalfIdealCipher;
}

/// A [`CipherSuite`] based on `MlKem768` and [`TwoFeistel`]
#[derive(Debug)]
pub struct TwoFeistelCipherSuite;
impl CipherSuite for TwoFeistelCipherSuite {
    type Kem = ml_kem::MlKem768;
    type Blinding = TwoFeistel;
}

/// A [`CipherSuite`] based on `MlKem512` and [`HalfIdealCipher`]
#[derive(Debug)]
pub struct MlKem512HalfIdealCipher;
impl CipherSuite for MlKem512HalfIdealCipher {
    type Kem = ml_kem::MlKem512;
    type Blinding = HalfIdealCipher;
}

/// A [`CipherSuite`] based on `MlKem1024` and [`HalfIdealCipher`]
#[derive(Debug)]
pub struct MlKem1024HalfIdealCipher;
impl CipherSuite for MlKem1024HalfIdealCipher {
    type Kem = ml_kem::MlKem1024;
    type Blinding = HalfIdealCipher;
}

/// A [`CipherSuite`] based on `MlKem512` and [`TwoFeistel`]
#[derive(Debug)]
pub struct MlKem512TwoFeistel;
impl CipherSuite for MlKem512TwoFeistel {
    type Kem = ml_kem::MlKem512;
    type Blinding = TwoFeistel;
}

/// A [`CipherSuite`] based on `MlKem1024` and [`TwoFeistel`]
#[derive(Debug)]
pub struct MlKem1024TwoFeistel;
impl CipherSuite for MlKem1024TwoFeistel {
    type Kem = ml_kem::MlKem1024;
    type Blinding = TwoFeistel;
}

/// The input to the protocol: a 32-byte password and a 32-byte session id
pub struct Input {
    pub(crate) password: Zeroizing<Password>,
    pub(crate) session_id: SessionId,
}

impl Input {
    /// Create a new [`Input`] object from an exact 32-byte password and
    /// 32-byte session id
    pub fn new(password: &[u8], session_id: &[u8]) -> Result<Self> {
        Ok(Self {
            password: Zeroizing::new(to_symbytes(password)?),
            session_id: to_symbytes(session_id)?,
        })
    }

    /// Create a new [`Input`] object from a passphrase of any length, which
    /// is hashed down to the 32-byte password
    pub fn from_passphrase(passphrase: &[u8], session_id: &[u8]) -> Result<Self> {
        Ok(Self {
            password: Zeroizing::new(hash_h(&[passphrase])),
            session_id: to_symbytes(session_id)?,
        })
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

fn to_symbytes(bytes: &[u8]) -> Result<[u8; SYMBYTES]> {
    check_length(SYMBYTES, bytes.len())?;
    let mut out = [0u8; SYMBYTES];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// The output of the protocol: a 32-byte session key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Output([u8; SYMBYTES]);

impl Output {
    /// The session key bytes
    pub fn as_bytes(&self) -> &[u8; SYMBYTES] {
        &self.0
    }
}

impl PartialEq for Output {
    fn eq(&self, other: &Self) -> bool {
        ct::verify(&self.0, &other.0).into()
    }
}

impl Eq for Output {}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Output(..)")
    }
}

/// Whether the initiator accepted the responder's key confirmation tag
#[derive(Clone, Copy, Debug)]
pub struct Confirmation(Choice);

impl Confirmation {
    /// True when the tag matched
    pub fn is_accepted(&self) -> bool {
        self.0.into()
    }

    /// Status code: `0` when the tag matched, `-1` otherwise
    pub fn code(&self) -> i32 {
        i32::from(self.0.unwrap_u8()) - 1
    }
}

/// The main struct for the initiator of the protocol
pub struct Initiator<CS: CipherSuite> {
    /// Wiped on drop by `ml-kem`
    dk: <CS::Kem as KemCore>::DecapsulationKey,
    public_key: Vec<u8>,
    message_one: Vec<u8>,
    session_id: SessionId,
}

impl<CS: CipherSuite> fmt::Debug for Initiator<CS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initiator")
            .field("public_key_len", &self.public_key.len())
            .field("message_one_len", &self.message_one.len())
            .finish_non_exhaustive()
    }
}

impl<CS: CipherSuite> Initiator<CS> {
    /// The first step of the protocol, where the initiator generates a fresh
    /// KEM key pair and sends its encapsulation key blinded under the password
    pub fn start<R: RngCore + CryptoRng>(
        input: &Input,
        rng: &mut R,
    ) -> Result<(Self, MessageOne<CS>)> {
        let (dk, ek) = CS::Kem::generate(rng);
        let public_key = ek.as_bytes().to_vec();

        let blinded_key = CS::Blinding::blind(
            &PublicKey::from_bytes(&public_key)?,
            &input.password,
            &input.session_id,
            rng,
        )?;
        let message_one = MessageOne { blinded_key };
        let message_one_bytes = message_one.to_bytes();
        tracing::debug!(
            public_key_len = public_key.len(),
            message_one_len = message_one_bytes.len(),
            "initiator started"
        );

        Ok((
            Self {
                dk,
                public_key,
                message_one: message_one_bytes,
                session_id: input.session_id,
            },
            message_one,
        ))
    }

    /// The third step of the protocol, where the initiator decapsulates the
    /// responder's ciphertext and checks its key confirmation tag.
    ///
    /// The tag comparison and the selection of the returned key run in
    /// constant time. On rejection the returned [`Output`] is a random key
    /// and the [`Confirmation`] carries the failure.
    pub fn finish_with_status<R: RngCore + CryptoRng>(
        self,
        message_two: &MessageTwo<CS>,
        rng: &mut R,
    ) -> Result<(Output, Confirmation)> {
        let mut shared_secret = self
            .dk
            .decapsulate(&message_two.ct)
            .map_err(|_| PakeKemError::Decapsulation)?;
        let keytag = transcript_hash(
            &shared_secret,
            &self.session_id,
            &self.public_key,
            &self.message_one,
            &message_two.ct,
        );
        shared_secret.as_mut_slice().zeroize();

        let (key, tag) = split_halves(&keytag);
        let accepted = ct::verify(&tag[..], &message_two.tag);

        let mut output = Output([0u8; SYMBYTES]);
        rng.fill_bytes(&mut output.0);
        ct::cmov(&mut output.0, &key[..], accepted);

        Ok((output, Confirmation(accepted)))
    }

    /// Like [`Initiator::finish_with_status`], but returns
    /// [`PakeKemError::AuthenticationFailure`] when the tag does not match
    pub fn finish<R: RngCore + CryptoRng>(
        self,
        message_two: &MessageTwo<CS>,
        rng: &mut R,
    ) -> Result<Output> {
        let (output, confirmation) = self.finish_with_status(message_two, rng)?;
        match confirmation.is_accepted() {
            true => Ok(output),
            false => {
                tracing::debug!("initiator rejected key confirmation");
                Err(PakeKemError::AuthenticationFailure)
            }
        }
    }

    /// Serializes the initiator state as
    /// `dk || public key || session id || message one`
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut dk_bytes = self.dk.as_bytes();
        let mut out = Zeroizing::new(Vec::with_capacity(Self::encoded_len()));
        out.extend_from_slice(&dk_bytes);
        dk_bytes.as_mut_slice().zeroize();
        out.extend_from_slice(&self.public_key);
        out.extend_from_slice(&self.session_id);
        out.extend_from_slice(&self.message_one);
        out
    }

    /// Deserializes the initiator state produced by [`Initiator::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(Self::encoded_len(), bytes.len())?;
        let (dk_bytes, rest) = bytes.split_at(decapsulation_key_len::<CS::Kem>());
        let (public_key, rest) = rest.split_at(encapsulation_key_len::<CS::Kem>());
        let (session_id, message_one) = rest.split_at(SYMBYTES);

        let mut encoded = Encoded::<<CS::Kem as KemCore>::DecapsulationKey>::try_from(dk_bytes)
            .map_err(|_| PakeKemError::Deserialization)?;
        let dk = <CS::Kem as KemCore>::DecapsulationKey::from_bytes(&encoded);
        encoded.as_mut_slice().zeroize();

        Ok(Self {
            dk,
            public_key: public_key.to_vec(),
            message_one: message_one.to_vec(),
            session_id: to_symbytes(session_id)?,
        })
    }

    /// Length of the serialized initiator state for this cipher suite
    pub fn encoded_len() -> usize {
        decapsulation_key_len::<CS::Kem>()
            + encapsulation_key_len::<CS::Kem>()
            + SYMBYTES
            + MessageOne::<CS>::encoded_len()
    }
}

/// The main struct for the responder of the protocol. The responder is
/// stateless: it answers a single message and is done.
#[derive(Debug)]
pub struct Responder<CS: CipherSuite>(PhantomData<CS>);

impl<CS: CipherSuite> Responder<CS> {
    /// The second step of the protocol, where the responder unblinds the
    /// initiator's encapsulation key, encapsulates to it, and commits to the
    /// session key.
    ///
    /// The responder gets no confirmation from the initiator. If the
    /// passwords differ, its output is unrelated to the initiator's.
    pub fn respond<R: RngCore + CryptoRng>(
        input: &Input,
        message_one: &MessageOne<CS>,
        rng: &mut R,
    ) -> Result<(Output, MessageTwo<CS>)> {
        let public_key =
            CS::Blinding::unblind(&message_one.blinded_key, &input.password, &input.session_id)?
                .to_bytes();
        let encoded =
            Encoded::<<CS::Kem as KemCore>::EncapsulationKey>::try_from(&public_key[..])
                .map_err(|_| PakeKemError::Deserialization)?;
        let ek = <CS::Kem as KemCore>::EncapsulationKey::from_bytes(&encoded);

        let (ct, mut shared_secret) = ek
            .encapsulate(rng)
            .map_err(|_| PakeKemError::Encapsulation)?;
        let keytag = transcript_hash(
            &shared_secret,
            &input.session_id,
            &public_key,
            &message_one.to_bytes(),
            &ct,
        );
        shared_secret.as_mut_slice().zeroize();

        let (key, tag) = split_halves(&keytag);
        let mut output = Output([0u8; SYMBYTES]);
        output.0.copy_from_slice(&key[..]);
        tracing::debug!(ciphertext_len = ct.len(), "responder answered");

        Ok((output, MessageTwo { tag: *tag, ct }))
    }
}

/// `G(ss || sid || pk || msg1 || ct)`: the first half is the session key,
/// the second half the confirmation tag
fn transcript_hash(
    shared_secret: &[u8],
    session_id: &SessionId,
    public_key: &[u8],
    message_one: &[u8],
    ciphertext: &[u8],
) -> Zeroizing<[u8; 2 * SYMBYTES]> {
    Zeroizing::new(hash_g(&[
        shared_secret,
        session_id,
        public_key,
        message_one,
        ciphertext,
    ]))
}
