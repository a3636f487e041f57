use super::{AttendanceSource, Page, PunchQuery, Session};
use crate::libs::{config::ConfigModule, data_storage::DataStorage, error::CxError, messages::Message, punch::parse_utc_offset, secret::Secret};
use crate::{msg_debug, msg_error, msg_error_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::{env, fmt, time::Duration};

const SESSION_ID_FILE: &str = ".cx_session_id";
const SECRET_FILE: &str = ".cx_secret";
const EMAIL_ENV: &str = "ACCOUNT_EMAIL";
const PASSWORD_ENV: &str = "ACCOUNT_PASSWORD";
const MAX_RECONNECT_COUNT: i32 = 3;
const SUCCESS_CODE: i64 = 200;
const UNAUTHORIZED_CODE: i64 = 401;

const API_VERSION: &str = "2.0";
const X_API_VERSION: &str = "x-api-version";
const X_TOKEN: &str = "x-token";

const USER_LOGIN_URL: &str = "user/login";
const COMPANY_LIST_URL: &str = "company/list";
const COMPANY_SELECT_URL: &str = "company/select";
const EMPLOYEE_GRID_URL: &str = "employee/grid";
const RECORD_GRID_URL: &str = "record/grid";

const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

pub const DEFAULT_API_URL: &str = "https://eu.crosschexcloud.com/api";
pub const DEFAULT_ACCOUNT_NAME: &str = "default";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
pub const DEFAULT_DELAY_SECONDS: u64 = 5;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_UTC_OFFSET: &str = "+02:00";

#[derive(Serialize, Clone, Debug)]
pub struct LoginCredentials {
    email: String,
    password: String,
}

/// Envelope wrapped around every CrossChex response.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(alias = "msg")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn into_data(self) -> Result<T, CxError> {
        if !self.is_success() {
            return Err(CxError::Api {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        self.data.ok_or_else(|| CxError::Api {
            code: self.code,
            message: "response carried no data".to_string(),
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct PageData<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(rename = "pageCount", default)]
    pub page_count: u32,
}

#[derive(Deserialize, Debug)]
struct LoginData {
    token: String,
    company_id: Option<CompanyId>,
}

#[derive(Deserialize, Debug)]
struct TokenData {
    token: String,
}

/// Company identifiers come back as numbers or strings depending on the region.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum CompanyId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompanyId::Number(id) => write!(f, "{}", id),
            CompanyId::Text(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorkerRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub workno: String,
    #[serde(default)]
    pub name: String,
}

/// A raw attendance record.
///
/// Fields other than the three the shift logic needs are kept in `extra` so
/// the record can be written back out unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PunchRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub workno: String,
    #[serde(default)]
    pub name: String,
    pub checktime: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[derive(Serialize, Debug)]
struct EmployeeGridRequest<'a> {
    page: u32,
    #[serde(rename = "perPage")]
    per_page: u32,
    keyword: &'a str,
    order_col: &'static str,
    order_dir: &'static str,
}

impl<'a> EmployeeGridRequest<'a> {
    fn new(page: u32, per_page: u32, keyword: &'a str) -> Self {
        Self {
            page,
            per_page,
            keyword,
            order_col: "workno",
            order_dir: "ASC",
        }
    }
}

#[derive(Serialize, Debug)]
struct RecordGridRequest<'a> {
    page: u32,
    #[serde(rename = "perPage")]
    per_page: u32,
    keyword: &'a str,
    department_id: i64,
    startdate: String,
    enddate: String,
    order_col: &'static str,
    order_dir: &'static str,
}

impl<'a> RecordGridRequest<'a> {
    /// The range covers `date_from` 00:00:00 through `date_to` 23:59:59.
    fn new(page: u32, per_page: u32, query: &'a PunchQuery, offset: FixedOffset) -> Result<Self> {
        let start = local_time(query.date_from, (0, 0, 0), offset)?;
        let end = local_time(query.date_to, (23, 59, 59), offset)?;

        Ok(Self {
            page,
            per_page,
            keyword: &query.keyword,
            department_id: query.department_id,
            startdate: start.format(QUERY_TIME_FORMAT).to_string(),
            enddate: end.format(QUERY_TIME_FORMAT).to_string(),
            order_col: "checktime",
            order_dir: "DESC",
        })
    }
}

fn local_time(date: NaiveDate, (hour, minute, second): (u32, u32, u32), offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    date.and_hms_opt(hour, minute, second)
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .ok_or_else(|| anyhow::anyhow!("{} {:02}:{:02}:{:02} is not a valid time in {}", date, hour, minute, second, offset))
}

/// CrossChex Cloud client.
///
/// Built with [`CrossChex::new`] and initialized once with
/// [`CrossChex::connect`]; every later request reuses the company token.
#[derive(Debug)]
pub struct CrossChex {
    client: Client,
    config: CrossChexConfig,
    offset: FixedOffset,
    storage: DataStorage,
    credentials: Option<LoginCredentials>,
    token: Option<String>,
    retries: i32,
    reconnects: i32,
}

impl Session for CrossChex {
    /// Login, list companies, select the first one.
    async fn login(&self) -> Result<String> {
        let credentials = self.credentials.as_ref().ok_or_else(|| msg_error_anyhow!(Message::CredentialsNotSet))?;

        let login: LoginData = self.decode(self.send(USER_LOGIN_URL, None, credentials).await?).await?.into_data()?;
        msg_info!(Message::TokenCreated(self.config.account_name.clone()));
        if let Some(company_id) = &login.company_id {
            msg_debug!(format!("login company id: {}", company_id));
        }

        let companies: Vec<Company> = self
            .decode(self.send(COMPANY_LIST_URL, Some(&login.token), &serde_json::json!({})).await?)
            .await?
            .into_data()?;
        let company = companies.into_iter().next().ok_or(CxError::NoCompany)?;
        msg_debug!(Message::CompanyListed(company.id.to_string()));

        let selected: TokenData = self
            .decode(self.send(COMPANY_SELECT_URL, Some(&login.token), &serde_json::json!({ "id": company.id })).await?)
            .await?
            .into_data()?;
        msg_debug!(Message::CompanySelected(company.id.to_string()));

        Ok(selected.token)
    }

    fn set_credentials(&mut self, password: &str) -> Result<()> {
        let email = self.config.email();
        if email.is_empty() {
            anyhow::bail!(CxError::MissingConfig("crosschex.email"));
        }
        self.credentials = Some(LoginCredentials {
            email,
            password: password.to_owned(),
        });
        Ok(())
    }

    fn session_id_file(&self) -> &str {
        SESSION_ID_FILE
    }

    fn secret(&self) -> Secret {
        Secret::at(self.storage.base_path().join(SECRET_FILE), &Message::PromptPassword.to_string()).with_env(PASSWORD_ENV)
    }

    fn storage(&self) -> DataStorage {
        self.storage.clone()
    }

    fn retry(&self) -> i32 {
        self.retries
    }

    fn inc_retry(&mut self) {
        self.retries += 1;
    }
}

impl CrossChex {
    pub fn new(config: &CrossChexConfig) -> Result<Self> {
        Self::with_storage(config, DataStorage::new())
    }

    pub fn with_storage(config: &CrossChexConfig, storage: DataStorage) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_seconds)).build()?;
        Ok(Self {
            client,
            offset: config.offset()?,
            config: config.clone(),
            storage,
            credentials: None,
            token: None,
            retries: 0,
            reconnects: 0,
        })
    }

    pub fn config(&self) -> &CrossChexConfig {
        &self.config
    }

    /// UTC offset used for query bounds and offset-less punch times.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    /// Performs the login handshake, or restores a cached session.
    ///
    /// Calling it on a connected client does nothing.
    pub async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }
        let token = self.get_session_id().await?;
        self.token = Some(token);
        Ok(())
    }

    /// Drops the cached session token and the stored password.
    pub fn logout(&mut self) -> Result<()> {
        self.token = None;
        self.delete_session_id()?;
        self.secret().forget()
    }

    pub async fn companies(&mut self) -> Result<Vec<Company>> {
        let response: ApiResponse<Vec<Company>> = self.post(COMPANY_LIST_URL, &serde_json::json!({})).await?;
        Ok(response.into_data()?)
    }

    fn headers(token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(X_API_VERSION, HeaderValue::from_static(API_VERSION));
        if let Some(token) = token {
            headers.insert(X_TOKEN, HeaderValue::from_str(token)?);
        }
        Ok(headers)
    }

    async fn send<B: Serialize + ?Sized>(&self, path: &str, token: Option<&str>, body: &B) -> Result<Response> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), path);
        let response = self.client.post(url).headers(Self::headers(token)?).json(body).send().await?;
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<ApiResponse<T>> {
        Ok(response.error_for_status()?.json::<ApiResponse<T>>().await?)
    }

    /// Authenticated request. An expired token (HTTP 401 or envelope code
    /// 401) triggers a reconnect after the configured delay, a limited number
    /// of times per client.
    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&mut self, path: &str, body: &B) -> Result<ApiResponse<T>> {
        loop {
            let token = self.token.clone().ok_or(CxError::NotConnected)?;
            let response = self.send(path, Some(&token), body).await?;

            let status = response.status();
            let decoded = match status == StatusCode::UNAUTHORIZED {
                true => None,
                false => Some(self.decode::<T>(response).await?),
            };
            let rejected = token_rejected(status, decoded.as_ref().map(|envelope| envelope.code));

            match decoded {
                Some(envelope) if !rejected || self.reconnects >= MAX_RECONNECT_COUNT => return Ok(envelope),
                None if self.reconnects >= MAX_RECONNECT_COUNT => anyhow::bail!("{} rejected the session token", path),
                _ => {
                    self.reconnects += 1;
                    msg_warning!(Message::SessionExpiredRetrying(self.reconnects));
                    self.delete_session_id()?;
                    self.token = None;
                    tokio::time::sleep(Duration::from_secs(self.config.delay_seconds)).await;
                    self.connect().await?;
                }
            }
        }
    }

    async fn fetch_page<B: Serialize, T: DeserializeOwned>(&mut self, path: &str, page: u32, body: &B) -> Page<T> {
        let response = self.post::<B, PageData<T>>(path, body).await;
        page_from_response(path, page, response)
    }
}

/// Whether the service no longer accepts the session token, either by HTTP
/// status or by envelope code.
fn token_rejected(status: StatusCode, envelope_code: Option<i64>) -> bool {
    status == StatusCode::UNAUTHORIZED || envelope_code == Some(UNAUTHORIZED_CODE)
}

/// Turns a page request's outcome into a page. Every failure is logged and
/// yields an empty page, which ends the caller's page loop.
fn page_from_response<T>(resource: &str, page: u32, response: Result<ApiResponse<PageData<T>>>) -> Page<T> {
    let failure = match response.map(ApiResponse::into_data) {
        Ok(Ok(data)) => {
            msg_debug!(Message::PageFetched {
                resource: resource.to_string(),
                page,
                page_count: data.page_count,
            });
            return Page::new(data.list, data.page_count);
        }
        Ok(Err(error)) => error,
        Err(error) => {
            msg_error!(Message::FetchRequestFailed {
                resource: resource.to_string(),
                error: error.to_string(),
            });
            return Page::empty();
        }
    };

    match failure {
        CxError::Api { code, message } => msg_error!(Message::FetchFailed {
            resource: resource.to_string(),
            code,
            message,
        }),
        other => msg_error!(Message::FetchRequestFailed {
            resource: resource.to_string(),
            error: other.to_string(),
        }),
    }
    Page::empty()
}

impl AttendanceSource for CrossChex {
    async fn fetch_workers(&mut self, page: u32, keyword: &str) -> Page<WorkerRecord> {
        let body = EmployeeGridRequest::new(page, self.config.per_page, keyword);
        self.fetch_page(EMPLOYEE_GRID_URL, page, &body).await
    }

    async fn fetch_punches(&mut self, page: u32, query: &PunchQuery) -> Page<PunchRecord> {
        let body = match RecordGridRequest::new(page, self.config.per_page, query, self.offset) {
            Ok(body) => body,
            Err(error) => {
                msg_error!(Message::FetchRequestFailed {
                    resource: RECORD_GRID_URL.to_string(),
                    error: error.to_string(),
                });
                return Page::empty();
            }
        };
        self.fetch_page(RECORD_GRID_URL, page, &body).await
    }
}

fn default_account_name() -> String {
    DEFAULT_ACCOUNT_NAME.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_delay_seconds() -> u64 {
    DEFAULT_DELAY_SECONDS
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_utc_offset() -> String {
    DEFAULT_UTC_OFFSET.to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CrossChexConfig {
    /// Account email; `ACCOUNT_EMAIL` overrides it.
    #[serde(default)]
    pub email: String,
    /// Label used in log lines and default export file names.
    #[serde(default = "default_account_name")]
    pub account_name: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Pause before reconnecting after an expired session.
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Offset of the attendance devices, e.g. `+02:00`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for CrossChexConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            account_name: default_account_name(),
            api_url: default_api_url(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            delay_seconds: DEFAULT_DELAY_SECONDS,
            per_page: DEFAULT_PER_PAGE,
            utc_offset: default_utc_offset(),
        }
    }
}

impl CrossChexConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "crosschex".to_string(),
            name: "CrossChex Cloud".to_string(),
        }
    }

    /// The configured email unless `ACCOUNT_EMAIL` is set.
    pub fn email(&self) -> String {
        env::var(EMAIL_ENV).ok().filter(|email| !email.is_empty()).unwrap_or_else(|| self.email.clone())
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.utc_offset).ok_or_else(|| msg_error_anyhow!(Message::InvalidUtcOffset(self.utc_offset.clone())))
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleCrossChex);
        Ok(Self {
            email: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptEmail.to_string())
                .default(config.email)
                .interact_text()?,
            account_name: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAccountName.to_string())
                .default(config.account_name)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            timeout_seconds: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTimeout.to_string())
                .default(config.timeout_seconds)
                .interact_text()?,
            delay_seconds: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDelay.to_string())
                .default(config.delay_seconds)
                .interact_text()?,
            per_page: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPerPage.to_string())
                .default(config.per_page)
                .interact_text()?,
            utc_offset: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptUtcOffset.to_string())
                .default(config.utc_offset)
                .validate_with(|input: &String| -> Result<(), String> {
                    parse_utc_offset(input).map(|_| ()).ok_or_else(|| Message::InvalidUtcOffset(input.clone()).to_string())
                })
                .interact_text()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> PunchQuery {
        PunchQuery::new(
            "42",
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 22).unwrap(),
            0,
        )
    }

    #[test]
    fn test_record_request_spans_whole_days() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let query = query();
        let body = serde_json::to_value(RecordGridRequest::new(3, 20, &query, offset).unwrap()).unwrap();

        assert_eq!(body["page"], 3);
        assert_eq!(body["perPage"], 20);
        assert_eq!(body["keyword"], "42");
        assert_eq!(body["department_id"], 0);
        assert_eq!(body["startdate"], "2023-06-01T00:00:00+02:00");
        assert_eq!(body["enddate"], "2023-06-22T23:59:59+02:00");
        assert_eq!(body["order_col"], "checktime");
        assert_eq!(body["order_dir"], "DESC");
    }

    #[test]
    fn test_employee_request_orders_by_workno() {
        let body = serde_json::to_value(EmployeeGridRequest::new(1, 20, "ana")).unwrap();
        assert_eq!(body["perPage"], 20);
        assert_eq!(body["keyword"], "ana");
        assert_eq!(body["order_col"], "workno");
        assert_eq!(body["order_dir"], "ASC");
    }

    #[test]
    fn test_headers_carry_api_version_and_token() {
        let headers = CrossChex::headers(Some("jwt")).unwrap();
        assert_eq!(headers.get("x-api-version").unwrap(), "2.0");
        assert_eq!(headers.get("x-token").unwrap(), "jwt");
        assert!(CrossChex::headers(None).unwrap().get("x-token").is_none());
    }

    fn grid_response(raw: &str) -> Result<ApiResponse<PageData<WorkerRecord>>> {
        Ok(serde_json::from_str(raw)?)
    }

    #[test]
    fn test_successful_page_keeps_items_and_count() {
        let response = grid_response(r#"{"code":200,"data":{"list":[{"workno":7,"name":"Ana"}],"pageCount":3}}"#);
        let page = page_from_response(EMPLOYEE_GRID_URL, 1, response);

        assert_eq!(page.page_count, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].workno, "7");
    }

    #[test]
    fn test_error_code_gives_empty_page() {
        let response = grid_response(r#"{"code":500,"msg":"internal error","data":{"list":[{"workno":7}],"pageCount":3}}"#);
        assert_eq!(page_from_response(EMPLOYEE_GRID_URL, 1, response), Page::empty());
    }

    #[test]
    fn test_success_without_data_gives_empty_page() {
        let response = grid_response(r#"{"code":200,"message":"ok"}"#);
        assert_eq!(page_from_response(EMPLOYEE_GRID_URL, 1, response), Page::empty());
    }

    #[test]
    fn test_request_error_gives_empty_page() {
        let response = Err(anyhow::anyhow!("connection reset"));
        assert_eq!(page_from_response::<WorkerRecord>(RECORD_GRID_URL, 2, response), Page::empty());
    }

    #[test]
    fn test_token_rejected_by_status_or_envelope() {
        assert!(token_rejected(StatusCode::UNAUTHORIZED, None));
        assert!(token_rejected(StatusCode::OK, Some(401)));
        assert!(!token_rejected(StatusCode::OK, Some(200)));
        assert!(!token_rejected(StatusCode::OK, Some(500)));
    }

    #[test]
    fn test_login_data_accepts_text_company_id() {
        let response: ApiResponse<LoginData> = serde_json::from_str(r#"{"code":200,"data":{"token":"t1","company_id":"17"}}"#).unwrap();
        let data = response.into_data().unwrap();
        assert_eq!(data.token, "t1");
        assert_eq!(data.company_id, Some(CompanyId::Text("17".to_string())));
    }
}
