//! Content decryption (RFC 7518 §5).
//!
//! Ciphertext is decrypted in place. Nothing is returned until the tag or
//! MAC has verified, so callers never observe unauthenticated plaintext.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::{JweError, JweResult};
use crate::jwe::algorithms::ContentEncryptionAlgorithm;

pub(crate) type Aes192Gcm = AesGcm<Aes192, U12>;

/// Authenticated decryption of one JWE payload.
///
/// `aad` is the ASCII of the protected header segment as received.
/// Length mismatches are structural and reported as `MalformedJwe`; every
/// cryptographic failure collapses into `DecryptionFailed`.
pub fn decrypt(
    enc: ContentEncryptionAlgorithm,
    cek: &[u8],
    iv: &[u8],
    aad: &[u8],
    mut ciphertext: Zeroizing<Vec<u8>>,
    tag: &[u8],
) -> JweResult<Zeroizing<Vec<u8>>> {
    if cek.len() != enc.key_len() {
        return Err(JweError::malformed(format!(
            "{enc} requires a {}-byte CEK, got {}",
            enc.key_len(),
            cek.len()
        )));
    }
    if iv.len() != enc.iv_len() {
        return Err(JweError::malformed(format!(
            "{enc} requires a {}-byte IV, got {}",
            enc.iv_len(),
            iv.len()
        )));
    }
    if tag.len() != enc.tag_len() {
        return Err(JweError::malformed(format!(
            "{enc} requires a {}-byte tag, got {}",
            enc.tag_len(),
            tag.len()
        )));
    }

    use ContentEncryptionAlgorithm as Enc;
    let opened = match enc {
        Enc::A128Gcm => gcm_open::<Aes128Gcm>(cek, iv, aad, &mut ciphertext, tag),
        Enc::A192Gcm => gcm_open::<Aes192Gcm>(cek, iv, aad, &mut ciphertext, tag),
        Enc::A256Gcm => gcm_open::<Aes256Gcm>(cek, iv, aad, &mut ciphertext, tag),
        Enc::A128CbcHs256 => cbc_hmac_open::<Hmac<Sha256>, cbc::Decryptor<Aes128>>(
            cek,
            iv,
            aad,
            &mut ciphertext,
            tag,
        ),
        Enc::A192CbcHs384 => cbc_hmac_open::<Hmac<Sha384>, cbc::Decryptor<Aes192>>(
            cek,
            iv,
            aad,
            &mut ciphertext,
            tag,
        ),
        Enc::A256CbcHs512 => cbc_hmac_open::<Hmac<Sha512>, cbc::Decryptor<Aes256>>(
            cek,
            iv,
            aad,
            &mut ciphertext,
            tag,
        ),
    };

    match opened {
        Ok(()) => Ok(ciphertext),
        Err(step) => {
            tracing::debug!(%enc, step, "Content decryption failed");
            Err(JweError::DecryptionFailed)
        }
    }
}

/// AES-GCM open with a detached tag. Also used for `A*GCMKW` key unwrap.
///
/// IV and tag lengths must already be 12 and 16 bytes.
pub(crate) fn gcm_open<C>(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    buffer: &mut Vec<u8>,
    tag: &[u8],
) -> Result<(), &'static str>
where
    C: AeadInPlace + KeyInit,
{
    let cipher = C::new_from_slice(key).map_err(|_| "gcm key length")?;
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(iv),
            aad,
            buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| "gcm tag")
}

/// AES-CBC + HMAC composite (RFC 7518 §5.2.2.2).
///
/// The first half of the CEK is the MAC key, the second half the AES key.
/// The MAC covers `aad || iv || ciphertext || AL` where AL is the AAD
/// length in bits as a 64-bit big-endian integer. CBC runs only after the
/// truncated MAC verified in constant time.
fn cbc_hmac_open<M, C>(
    cek: &[u8],
    iv: &[u8],
    aad: &[u8],
    buffer: &mut Vec<u8>,
    tag: &[u8],
) -> Result<(), &'static str>
where
    M: Mac + KeyInit,
    C: KeyIvInit + BlockDecryptMut,
{
    let (mac_key, enc_key) = cek.split_at(cek.len() / 2);
    let aad_bits = (aad.len() as u64).wrapping_mul(8).to_be_bytes();

    let mut mac = <M as Mac>::new_from_slice(mac_key).map_err(|_| "hmac key length")?;
    mac.update(aad);
    mac.update(iv);
    mac.update(buffer);
    mac.update(&aad_bits);
    mac.verify_truncated_left(tag).map_err(|_| "hmac tag")?;

    let plaintext_len = C::new_from_slices(enc_key, iv)
        .map_err(|_| "cbc key length")?
        .decrypt_padded_mut::<Pkcs7>(buffer)
        .map_err(|_| "cbc padding")?
        .len();
    buffer.truncate(plaintext_len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwe::base64url;

    // RFC 7516 Appendix B: A128CBC-HS256 with a fixed CEK.
    const B_CEK: [u8; 32] = [
        4, 211, 31, 197, 84, 157, 252, 254, 11, 100, 157, 250, 63, 170, 106, 206, 107, 124, 212,
        45, 111, 107, 9, 219, 200, 177, 0, 240, 143, 156, 44, 207,
    ];
    const B_IV: [u8; 16] = [
        3, 22, 60, 12, 43, 67, 104, 105, 108, 108, 105, 99, 111, 116, 104, 101,
    ];
    const B_AAD: &str = "eyJhbGciOiJBMTI4S1ciLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0";
    const B_CIPHERTEXT: &str = "KDlTtXchhZTGufMYmOYGS4HffxPSUrfmqCHXaI9wOGY";
    const B_TAG: &str = "U0m_YmjN04DJvceFICbCVQ";

    fn b_vector() -> (Zeroizing<Vec<u8>>, Vec<u8>) {
        (
            Zeroizing::new(base64url::decode(B_CIPHERTEXT).unwrap()),
            base64url::decode(B_TAG).unwrap(),
        )
    }

    #[test]
    fn test_cbc_hmac_known_answer() {
        let (ciphertext, tag) = b_vector();
        let plaintext = decrypt(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &B_CEK,
            &B_IV,
            B_AAD.as_bytes(),
            ciphertext,
            &tag,
        )
        .unwrap();
        assert_eq!(plaintext.as_slice(), b"Live long and prosper.");
    }

    #[test]
    fn test_cbc_hmac_rejects_tampering() {
        let (mut ciphertext, tag) = b_vector();
        ciphertext[0] ^= 1;
        let err = decrypt(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &B_CEK,
            &B_IV,
            B_AAD.as_bytes(),
            ciphertext,
            &tag,
        )
        .unwrap_err();
        assert_eq!(err, JweError::DecryptionFailed);

        let (ciphertext, tag) = b_vector();
        let err = decrypt(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &B_CEK,
            &B_IV,
            b"eyJhbGciOiJkaXIifQ",
            ciphertext,
            &tag,
        )
        .unwrap_err();
        assert_eq!(err, JweError::DecryptionFailed);
    }

    #[test]
    fn test_length_checks_are_structural() {
        let (ciphertext, tag) = b_vector();
        let err = decrypt(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &B_CEK[..16],
            &B_IV,
            B_AAD.as_bytes(),
            ciphertext,
            &tag,
        )
        .unwrap_err();
        assert!(matches!(err, JweError::MalformedJwe(_)));

        let (ciphertext, tag) = b_vector();
        let err = decrypt(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &B_CEK,
            &B_IV[..12],
            B_AAD.as_bytes(),
            ciphertext,
            &tag,
        )
        .unwrap_err();
        assert!(matches!(err, JweError::MalformedJwe(_)));

        let (ciphertext, tag) = b_vector();
        let err = decrypt(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &B_CEK,
            &B_IV,
            B_AAD.as_bytes(),
            ciphertext,
            &tag[..8],
        )
        .unwrap_err();
        assert!(matches!(err, JweError::MalformedJwe(_)));
    }

    #[test]
    fn test_gcm_round_trip_through_aead() {
        use aes_gcm::aead::Aead;

        let key = [7u8; 24];
        let iv = [9u8; 12];
        let aad = b"header";
        let sealed = Aes192Gcm::new_from_slice(&key)
            .unwrap()
            .encrypt(
                GenericArray::from_slice(&iv),
                aes_gcm::aead::Payload {
                    msg: b"{\"messages\":[]}",
                    aad,
                },
            )
            .unwrap();
        let (ciphertext, tag) = sealed.split_at(sealed.len() - 16);

        let plaintext = decrypt(
            ContentEncryptionAlgorithm::A192Gcm,
            &key,
            &iv,
            aad,
            Zeroizing::new(ciphertext.to_vec()),
            tag,
        )
        .unwrap();
        assert_eq!(plaintext.as_slice(), b"{\"messages\":[]}");

        let mut bad_tag = tag.to_vec();
        bad_tag[15] ^= 0x80;
        let err = decrypt(
            ContentEncryptionAlgorithm::A192Gcm,
            &key,
            &iv,
            aad,
            Zeroizing::new(ciphertext.to_vec()),
            &bad_tag,
        )
        .unwrap_err();
        assert_eq!(err, JweError::DecryptionFailed);
    }
}
