//! Attachment encryption primitive.
//!
//! AES-256-GCM with a fresh key and nonce per attachment, plus a SHA-256
//! hash of the ciphertext recorded in the reference metadata. The hash is
//! verified before decryption and is never skipped: the media store is
//! untrusted, and this check is the only end-to-end tamper detection the
//! pipeline has.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use deheif_core::{ConvertError, ConvertResult, EncryptedFileInfo};

/// Version tag written into every reference produced here.
pub const SCHEME_VERSION: &str = "v1";

const SHA256_KEY: &str = "sha256";
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Encrypt an attachment with a freshly generated key and nonce. Returns the
/// ciphertext and the metadata a recipient needs to verify and decrypt it.
pub fn encrypt_attachment(plaintext: &[u8]) -> ConvertResult<(Vec<u8>, EncryptedFileInfo)> {
    let key = Aes256Gcm::generate_key(OsRng);
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let cipher = Aes256Gcm::new(&key);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| ConvertError::Transport(format!("attachment encryption failed: {}", e)))?;

    let mut hashes = BTreeMap::new();
    hashes.insert(
        SHA256_KEY.to_string(),
        general_purpose::STANDARD.encode(Sha256::digest(&ciphertext)),
    );

    let info = EncryptedFileInfo {
        key: general_purpose::STANDARD.encode(key),
        iv: general_purpose::STANDARD.encode(nonce),
        hashes,
        version: SCHEME_VERSION.to_string(),
    };

    Ok((ciphertext, info))
}

/// Verify the declared ciphertext hash, then decrypt. Any discrepancy - a
/// missing or mismatched hash, unparseable key material, or an AEAD
/// rejection - surfaces as `IntegrityMismatch`.
pub fn decrypt_attachment(ciphertext: &[u8], file: &EncryptedFileInfo) -> ConvertResult<Vec<u8>> {
    let declared = file
        .hashes
        .get(SHA256_KEY)
        .ok_or(ConvertError::IntegrityMismatch)?;
    let computed = general_purpose::STANDARD.encode(Sha256::digest(ciphertext));
    if computed != *declared {
        return Err(ConvertError::IntegrityMismatch);
    }

    let key_bytes = general_purpose::STANDARD
        .decode(&file.key)
        .map_err(|_| ConvertError::IntegrityMismatch)?;
    if key_bytes.len() != KEY_LEN {
        return Err(ConvertError::IntegrityMismatch);
    }
    let nonce_bytes = general_purpose::STANDARD
        .decode(&file.iv)
        .map_err(|_| ConvertError::IntegrityMismatch)?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(ConvertError::IntegrityMismatch);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
    cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext)
        .map_err(|_| ConvertError::IntegrityMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let plaintext = b"attachment payload bytes";

        let (ciphertext, info) = encrypt_attachment(plaintext).unwrap();
        assert_ne!(ciphertext, plaintext.to_vec());
        assert_eq!(info.version, SCHEME_VERSION);

        let decrypted = decrypt_attachment(&ciphertext, &info).unwrap();
        assert_eq!(decrypted, plaintext.to_vec());
    }

    #[test]
    fn test_fresh_key_and_iv_per_attachment() {
        let (_, first) = encrypt_attachment(b"same bytes").unwrap();
        let (_, second) = encrypt_attachment(b"same bytes").unwrap();

        assert_ne!(first.key, second.key);
        assert_ne!(first.iv, second.iv);
    }

    #[test]
    fn test_tampered_ciphertext_fails_integrity() {
        let (mut ciphertext, info) = encrypt_attachment(b"payload").unwrap();
        ciphertext[0] ^= 0xff;

        let result = decrypt_attachment(&ciphertext, &info);
        assert!(matches!(result, Err(ConvertError::IntegrityMismatch)));
    }

    #[test]
    fn test_wrong_declared_hash_fails_integrity() {
        let (ciphertext, mut info) = encrypt_attachment(b"payload").unwrap();
        info.hashes
            .insert("sha256".to_string(), "bm90IHRoZSBoYXNo".to_string());

        let result = decrypt_attachment(&ciphertext, &info);
        assert!(matches!(result, Err(ConvertError::IntegrityMismatch)));
    }

    #[test]
    fn test_missing_sha256_entry_fails_integrity() {
        let (ciphertext, mut info) = encrypt_attachment(b"payload").unwrap();
        info.hashes.clear();

        let result = decrypt_attachment(&ciphertext, &info);
        assert!(matches!(result, Err(ConvertError::IntegrityMismatch)));
    }

    #[test]
    fn test_garbage_key_material_fails_integrity() {
        let (ciphertext, mut info) = encrypt_attachment(b"payload").unwrap();
        info.key = "!!! not base64 !!!".to_string();

        let result = decrypt_attachment(&ciphertext, &info);
        assert!(matches!(result, Err(ConvertError::IntegrityMismatch)));
    }
}
