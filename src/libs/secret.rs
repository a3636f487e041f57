//! Account password storage.
//!
//! The password is looked up in this order: an environment variable (when one
//! is configured with [`Secret::with_env`]), the encrypted file in the data
//! directory, and finally an interactive prompt whose answer is written back
//! to the encrypted file. The file holds base64 of AES-256-CBC ciphertext; key
//! and IV are baked in at build time.

use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use dialoguer::{theme::ColorfulTheme, Password};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

#[derive(Clone, Debug)]
pub struct Secret {
    prompt: String,
    secret_file_path: PathBuf,
    env_var: Option<String>,
}

impl Secret {
    /// A secret stored at `secret_file_path`.
    pub fn at(secret_file_path: impl Into<PathBuf>, prompt: &str) -> Self {
        Self {
            prompt: prompt.to_owned(),
            secret_file_path: secret_file_path.into(),
            env_var: None,
        }
    }

    /// Lets a non-empty environment variable take precedence over the store.
    pub fn with_env(self, env_var: &str) -> Self {
        Self {
            env_var: Some(env_var.to_owned()),
            ..self
        }
    }

    pub fn path(&self) -> &Path {
        &self.secret_file_path
    }

    pub fn get_or_prompt(&self) -> Result<String> {
        if let Some(password) = self.from_env() {
            return Ok(password);
        }
        if let Ok(password) = self.load() {
            return Ok(password);
        }
        self.prompt()
    }

    /// Asks for the password and stores it.
    pub fn prompt(&self) -> Result<String> {
        let password = Password::with_theme(&ColorfulTheme::default()).with_prompt(&self.prompt).interact()?;
        self.store(&password)?;
        Ok(password)
    }

    /// Encrypts `password` into the secret file.
    pub fn store(&self, password: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)?;
        let ciphertext = cipher.encrypt_vec(password.as_bytes());

        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.secret_file_path, BASE64_STANDARD.encode(ciphertext))?;
        Ok(())
    }

    /// Decrypts the secret file.
    pub fn load(&self) -> Result<String> {
        let encoded = fs::read_to_string(&self.secret_file_path)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)?;
        let plaintext = cipher.decrypt_vec(&ciphertext)?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Deletes the secret file. A missing file is not an error.
    pub fn forget(&self) -> Result<()> {
        match fs::remove_file(&self.secret_file_path) {
            Err(error) if error.kind() != ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }

    fn from_env(&self) -> Option<String> {
        let name = self.env_var.as_deref()?;
        env::var(name).ok().filter(|value| !value.is_empty())
    }
}
