use fernet::Fernet;

use secrecy::Secret;

/// Stored ciphertext failed to decrypt, either corrupted or written with a
/// different key.
#[derive(Debug, thiserror::Error)]
#[error("Failed to decrypt stored value")]
pub struct DecryptError;

/// Symmetric cipher for PII fields.
///
/// Contact data (email, phone) is only ever persisted through this; the
/// plaintext never reaches the database. Token format is Fernet, so records
/// written by the previous system remain readable.
#[derive(Clone)]
pub struct Cipher(Fernet);

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Cipher").finish()
    }
}

impl Cipher {
    pub fn new(key: &Secret<String>) -> anyhow::Result<Self> {
        use secrecy::ExposeSecret;

        let fernet = Fernet::new(key.expose_secret())
            .ok_or_else(|| anyhow::anyhow!("PII key is not a valid fernet key"))?;

        Ok(Self(fernet))
    }

    pub fn encrypt(&self, plaintext: &str) -> String {
        self.0.encrypt(plaintext.as_bytes())
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<String, DecryptError> {
        let plaintext = self.0.decrypt(ciphertext).map_err(|_| DecryptError)?;

        String::from_utf8(plaintext).map_err(|_| DecryptError)
    }

    /// Absent input maps to absent output.
    pub fn encrypt_opt(&self, plaintext: Option<&str>) -> Option<String> {
        plaintext.map(|value| self.encrypt(value))
    }

    pub fn decrypt_opt(&self, ciphertext: Option<&str>) -> Result<Option<String>, DecryptError> {
        ciphertext.map(|value| self.decrypt(value)).transpose()
    }
}
