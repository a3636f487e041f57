/// Every piece of user-facing text the application prints.
///
/// Variants carry the values that get interpolated into the rendered text;
/// the wording itself lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleCrossChex,
    ConfigModuleShifts,
    CrossChexConfigNotFound,
    InvalidUtcOffset(String),

    // === AUTHENTICATION MESSAGES ===
    WrongPassword(i32), // attempt count
    LoginFailed(String),
    CredentialsNotSet,
    TokenCreated(String),    // account name
    CompanyListed(String),   // company id
    CompanySelected(String), // company id
    SessionRestored,
    SessionExpiredRetrying(i32), // attempt
    LoggedOut,

    // === FETCH MESSAGES ===
    FetchFailed {
        resource: String,
        code: i64,
        message: String,
    },
    FetchRequestFailed {
        resource: String,
        error: String,
    },
    PageFetched {
        resource: String,
        page: u32,
        page_count: u32,
    },
    PunchSkipped {
        workno: String,
        error: String,
    },

    // === SHIFT MESSAGES ===
    EmployeeHeader {
        name: String,
        workno: String,
    },
    MissingPunch,
    NoPunchesForWorker(String), // workno
    NoWorkersFound,
    InvalidDateRange {
        from: String,
        to: String,
    },
    InvalidWindow(i64),
    ShiftsSummary {
        workers: usize,
        shifts: usize,
        orphans: usize,
    },

    // === LISTING MESSAGES ===
    CompaniesHeader,
    NoCompaniesFound,
    WorkersHeader(usize), // count

    // === EXPORT MESSAGES ===
    ExportCompleted {
        rows: usize,
        path: String,
    },
    DownloadCompleted {
        records: usize,
        path: String,
    },
    NothingToExport,

    // === PROMPTS ===
    PromptSelectModules,
    PromptEmail,
    PromptAccountName,
    PromptApiUrl,
    PromptTimeout,
    PromptDelay,
    PromptPerPage,
    PromptUtcOffset,
    PromptWindowHours,
    PromptPassword,
}
