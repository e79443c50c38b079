//! Test helpers: fixed vectors plus a minimal JWE *encryptor*.
//!
//! The encryptor is written directly against the RustCrypto primitives and
//! shares no code with the decryption pipeline, so a round trip through both
//! checks the pipeline against an independent construction.

pub mod fixtures;

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::{BigUint, Oaep, RsaPublicKey};
use serde_json::{Value, json};
use sha2::{Sha256, Sha384, Sha512};
use std::io::Write;

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn unb64(text: &str) -> Vec<u8> {
    URL_SAFE_NO_PAD
        .decode(text)
        .expect("test vector is valid base64url")
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    OsRng.fill_bytes(&mut out);
    out
}

/// `(key length, iv length)` for a content encryption identifier.
fn enc_params(enc: &str) -> (usize, usize) {
    match enc {
        "A128GCM" => (16, 12),
        "A192GCM" => (24, 12),
        "A256GCM" => (32, 12),
        "A128CBC-HS256" => (32, 16),
        "A192CBC-HS384" => (48, 16),
        "A256CBC-HS512" => (64, 16),
        other => panic!("encryptor does not support enc {other}"),
    }
}

fn gcm_seal<C: AeadInPlace + KeyInit>(key: &[u8], iv: &[u8], aad: &[u8], buf: &mut Vec<u8>) -> Vec<u8> {
    C::new_from_slice(key)
        .expect("gcm key")
        .encrypt_in_place_detached(GenericArray::from_slice(iv), aad, buf)
        .expect("gcm seal")
        .to_vec()
}

fn cbc_hmac_seal<M, C>(cek: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> (Vec<u8>, Vec<u8>)
where
    M: Mac + KeyInit,
    C: KeyIvInit + BlockEncryptMut,
{
    let (mac_key, enc_key) = cek.split_at(cek.len() / 2);
    let ciphertext = C::new_from_slices(enc_key, iv)
        .expect("cbc key")
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut mac = <M as Mac>::new_from_slice(mac_key).expect("hmac key");
    mac.update(aad);
    mac.update(iv);
    mac.update(&ciphertext);
    mac.update(&((aad.len() as u64) * 8).to_be_bytes());
    let full = mac.finalize().into_bytes();
    let tag = full[..mac_key.len()].to_vec();
    (ciphertext, tag)
}

/// Encrypt `plaintext` with `cek` under `enc`; returns `(iv, ciphertext, tag)`.
pub fn seal_content(enc: &str, cek: &[u8], aad: &[u8], plaintext: &[u8]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let (key_len, iv_len) = enc_params(enc);
    assert_eq!(cek.len(), key_len, "CEK length for {enc}");
    let iv = random_bytes(iv_len);

    let (ciphertext, tag) = match enc {
        "A128GCM" | "A192GCM" | "A256GCM" => {
            let mut buf = plaintext.to_vec();
            let tag = match enc {
                "A128GCM" => gcm_seal::<Aes128Gcm>(cek, &iv, aad, &mut buf),
                "A192GCM" => gcm_seal::<AesGcm<Aes192, U12>>(cek, &iv, aad, &mut buf),
                _ => gcm_seal::<Aes256Gcm>(cek, &iv, aad, &mut buf),
            };
            (buf, tag)
        }
        "A128CBC-HS256" => {
            cbc_hmac_seal::<Hmac<Sha256>, cbc::Encryptor<Aes128>>(cek, &iv, aad, plaintext)
        }
        "A192CBC-HS384" => {
            cbc_hmac_seal::<Hmac<Sha384>, cbc::Encryptor<Aes192>>(cek, &iv, aad, plaintext)
        }
        _ => cbc_hmac_seal::<Hmac<Sha512>, cbc::Encryptor<Aes256>>(cek, &iv, aad, plaintext),
    };
    (iv, ciphertext, tag)
}

fn header_enc(header: &Value) -> String {
    header
        .get("enc")
        .and_then(Value::as_str)
        .expect("header needs enc")
        .to_string()
}

fn assemble(protected: &str, encrypted_key: &[u8], iv: &[u8], ciphertext: &[u8], tag: &[u8]) -> String {
    format!(
        "{protected}.{}.{}.{}.{}",
        b64(encrypted_key),
        b64(iv),
        b64(ciphertext),
        b64(tag)
    )
}

/// Build a `dir` JWE. `header` must carry `enc`; `alg` is set to `dir`.
pub fn encrypt_dir(cek: &[u8], mut header: Value, plaintext: &[u8]) -> String {
    header["alg"] = json!("dir");
    let enc = header_enc(&header);
    let protected = b64(header.to_string().as_bytes());
    let (iv, ciphertext, tag) = seal_content(&enc, cek, protected.as_bytes(), plaintext);
    assemble(&protected, &[], &iv, &ciphertext, &tag)
}

/// Public half of an RSA JWK.
pub fn rsa_public_key(jwk: &str) -> RsaPublicKey {
    let jwk: Value = serde_json::from_str(jwk).expect("jwk json");
    let field = |name: &str| BigUint::from_bytes_be(&unb64(jwk[name].as_str().expect("rsa field")));
    RsaPublicKey::new(field("n"), field("e")).expect("rsa public key")
}

/// Build an `RSA-OAEP-256` JWE for the public half of `jwk`.
/// `header` must carry `enc`; `alg` is set to `RSA-OAEP-256`.
pub fn encrypt_rsa_oaep_256(jwk: &str, mut header: Value, plaintext: &[u8]) -> String {
    header["alg"] = json!("RSA-OAEP-256");
    let enc = header_enc(&header);
    let cek = random_bytes(enc_params(&enc).0);
    let encrypted_key = rsa_public_key(jwk)
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &cek)
        .expect("rsa-oaep encrypt");
    let protected = b64(header.to_string().as_bytes());
    let (iv, ciphertext, tag) = seal_content(&enc, &cek, protected.as_bytes(), plaintext);
    assemble(&protected, &encrypted_key, &iv, &ciphertext, &tag)
}

/// An `oct` JWK holding `key`.
pub fn oct_jwk(key: &[u8]) -> Value {
    json!({"kty": "oct", "k": b64(key)})
}

/// Raw DEFLATE (RFC 1951), as used by `zip: "DEF"`.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).expect("deflate write");
    encoder.finish().expect("deflate finish")
}

/// Flip the lowest bit of the first byte of segment `index` (1..=4).
pub fn tamper(jwe: &str, index: usize) -> String {
    let mut segments: Vec<String> = jwe.split('.').map(str::to_string).collect();
    let mut bytes = unb64(&segments[index]);
    assert!(!bytes.is_empty(), "segment {index} is empty");
    bytes[0] ^= 1;
    segments[index] = b64(&bytes);
    segments.join(".")
}

/// Replace the protected header of `jwe`, keeping every other segment.
pub fn replace_header(jwe: &str, header: &Value) -> String {
    let (_, rest) = jwe.split_once('.').expect("compact jwe");
    format!("{}.{rest}", b64(header.to_string().as_bytes()))
}
