//! Attendance service client.
//!
//! Two traits sit at the seam between the remote attendance service and the
//! rest of the application:
//!
//! - [`Session`] handles authentication: restoring a cached token, asking for
//!   the password, logging in with limited retries and caching the result.
//! - [`AttendanceSource`] is the fetch interface the pagination loops consume.
//!   Implementations never fail from the caller's point of view; a failed
//!   request is logged and reported as an empty page.
//!
//! [`crosschex::CrossChex`] implements both against CrossChex Cloud.
//!
//! ```rust,no_run
//! use cxshift::api::{crosschex::{CrossChex, CrossChexConfig}, AttendanceSource};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut client = CrossChex::new(&CrossChexConfig::default())?;
//! client.connect().await?;
//! let first_page = client.fetch_workers(1, "").await;
//! # Ok(())
//! # }
//! ```

use crate::libs::messages::Message;
use crate::libs::{data_storage::DataStorage, secret::Secret};
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

pub mod crosschex;

pub use crosschex::{CrossChex, CrossChexConfig, PunchRecord, WorkerRecord};

/// Maximum number of authentication retry attempts before giving up.
const MAX_RETRY_COUNT: i32 = 3;

/// Common session management for API clients.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Authenticates with the stored credentials and returns a session token.
    async fn login(&self) -> Result<String>;

    /// Stores the password used by the next [`Session::login`].
    fn set_credentials(&mut self, password: &str) -> Result<()>;

    /// File name of the session cache inside [`Session::storage`].
    fn session_id_file(&self) -> &str;

    /// Password store for this client.
    fn secret(&self) -> Secret;

    /// Where the session cache lives.
    fn storage(&self) -> DataStorage {
        DataStorage::new()
    }

    fn retry(&self) -> i32;

    fn inc_retry(&mut self);

    /// Returns a usable session token.
    ///
    /// A cached token is returned as is. Otherwise the password is taken from
    /// the secret store (prompting if needed), `login` is attempted, and the
    /// token is cached on success. A failed login prompts again, up to
    /// [`MAX_RETRY_COUNT`] times.
    async fn get_session_id(&mut self) -> Result<String> {
        let session_id_file_path = self.storage().get_path(self.session_id_file())?;

        if let Ok(session_id) = Self::read_session_id(&session_id_file_path) {
            msg_debug!(Message::SessionRestored);
            return Ok(session_id);
        }

        loop {
            // A retry means the stored password was wrong, so ask again
            let password: String = match self.retry() > 0 {
                true => self.secret().prompt()?,
                false => self.secret().get_or_prompt()?,
            };

            self.set_credentials(&password)?;

            match self.login().await {
                Ok(session_id) => {
                    let _ = Self::write_session_id(&session_id_file_path, &session_id);
                    return Ok(session_id);
                }
                Err(error) => {
                    msg_debug!(Message::LoginFailed(error.to_string()));
                    if self.retry() < MAX_RETRY_COUNT {
                        self.inc_retry();
                        continue;
                    }
                    break Err(msg_error_anyhow!(Message::WrongPassword(MAX_RETRY_COUNT)));
                }
            }
        }
    }

    /// Reads a cached token; an empty file counts as no cache.
    fn read_session_id(path: &Path) -> Result<String> {
        let session_id = fs::read_to_string(path)?.trim().to_string();
        if session_id.is_empty() {
            anyhow::bail!("empty session cache");
        }
        Ok(session_id)
    }

    fn write_session_id(path: &Path, session_id: &str) -> Result<()> {
        let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        file.write_all(session_id.as_bytes())?;
        Ok(())
    }

    /// Removes the cached token. A missing cache is not an error.
    fn delete_session_id(&self) -> Result<()> {
        let session_id_file_path = self.storage().get_path(self.session_id_file())?;
        match fs::remove_file(session_id_file_path) {
            Err(error) if error.kind() != ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_count: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_count: u32) -> Self {
        Self { items, page_count }
    }

    /// The result of a failed request: no items and no further pages.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page_count: 0,
        }
    }
}

/// Filter for punch listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchQuery {
    /// Free-text filter; the worker number when fetching one worker's punches.
    pub keyword: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// `0` means every department.
    pub department_id: i64,
}

impl PunchQuery {
    pub fn new(keyword: &str, date_from: NaiveDate, date_to: NaiveDate, department_id: i64) -> Self {
        Self {
            keyword: keyword.to_owned(),
            date_from,
            date_to,
            department_id,
        }
    }

    /// The same range and department narrowed to another keyword.
    pub fn for_keyword(&self, keyword: &str) -> Self {
        Self {
            keyword: keyword.to_owned(),
            ..self.clone()
        }
    }
}

/// Paginated read access to an attendance service.
#[allow(async_fn_in_trait)]
pub trait AttendanceSource {
    async fn fetch_workers(&mut self, page: u32, keyword: &str) -> Page<WorkerRecord>;

    async fn fetch_punches(&mut self, page: u32, query: &PunchQuery) -> Page<PunchRecord>;
}
