use super::*;

#[test]
fn test_half_ideal_cipher_encoding() {
    let public_key = fresh_key::<MlKem768>();
    let pk_len = public_key.to_bytes().len();
    let blinded =
        HalfIdealCipher::blind(&public_key, &random_symbytes(), &[0u8; SYMBYTES], &mut OsRng)
            .unwrap();

    let bytes = HalfIdealCipher::to_bytes(&blinded);
    assert_eq!(bytes.len(), pk_len);
    assert_eq!(HalfIdealCipher::encoded_len(pk_len), pk_len);
    assert_eq!(&bytes[pk_len - SYMBYTES..], &blinded.seed[..]);
    assert_eq!(HalfIdealCipher::from_bytes(&bytes, pk_len).unwrap(), blinded);
}

#[test]
fn test_two_feistel_encoding() {
    let public_key = fresh_key::<MlKem768>();
    let pk_len = public_key.to_bytes().len();
    let blinded =
        TwoFeistel::blind(&public_key, &random_symbytes(), &[0u8; SYMBYTES], &mut OsRng).unwrap();

    let bytes = TwoFeistel::to_bytes(&blinded);
    assert_eq!(bytes.len(), SYMBYTES + pk_len);
    assert_eq!(TwoFeistel::encoded_len(pk_len), SYMBYTES + pk_len);
    assert_eq!(&bytes[..SYMBYTES], &blinded.nonce[..]);
    assert_eq!(&bytes[SYMBYTES..pk_len], &blinded.vector[..]);
    assert_eq!(TwoFeistel::from_bytes(&bytes, pk_len).unwrap(), blinded);
}

#[test]
fn test_decoding_rejects_wrong_lengths() {
    let pk_len = fresh_key::<MlKem512>().to_bytes().len();

    assert_eq!(
        HalfIdealCipher::from_bytes(&vec![0u8; pk_len - 1], pk_len),
        Err(PakeKemError::InvalidLength {
            expected: pk_len,
            actual: pk_len - 1
        })
    );
    assert_eq!(
        TwoFeistel::from_bytes(&vec![0u8; pk_len], pk_len),
        Err(PakeKemError::InvalidLength {
            expected: pk_len + SYMBYTES,
            actual: pk_len
        })
    );
}
