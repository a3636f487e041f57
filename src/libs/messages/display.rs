//! Display implementation for application messages.
//!
//! All message wording is defined here so that commands, the API client and
//! the renderers never build user-facing strings inline.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleCrossChex => "CrossChex Cloud settings".to_string(),
            Message::ConfigModuleShifts => "Shift settings".to_string(),
            Message::CrossChexConfigNotFound => "CrossChex Cloud is not configured. Run `cxshift init` first.".to_string(),
            Message::InvalidUtcOffset(offset) => format!("Invalid UTC offset '{}', expected something like +02:00", offset),

            // === AUTHENTICATION MESSAGES ===
            Message::WrongPassword(count) => format!("You entered the wrong password {} times!", count),
            Message::LoginFailed(reason) => format!("CrossChex login failed: {}", reason),
            Message::CredentialsNotSet => "Credentials not set".to_string(),
            Message::TokenCreated(account) => format!("CrossChex Cloud: user token created: {}", account),
            Message::CompanyListed(id) => format!("CrossChex Cloud: company list: {}", id),
            Message::CompanySelected(id) => format!("CrossChex Cloud: company select: {}", id),
            Message::SessionRestored => "CrossChex Cloud: restored cached session".to_string(),
            Message::SessionExpiredRetrying(attempt) => format!("CrossChex Cloud: session expired, reconnecting (attempt {})", attempt),
            Message::LoggedOut => "Cached session and stored password removed".to_string(),

            // === FETCH MESSAGES ===
            Message::FetchFailed { resource, code, message } => {
                if message.is_empty() {
                    format!("CrossChex Cloud: {} request failed with code {}", resource, code)
                } else {
                    format!("CrossChex Cloud: {} request failed with code {}: {}", resource, code, message)
                }
            }
            Message::FetchRequestFailed { resource, error } => format!("CrossChex Cloud: {} request failed: {}", resource, error),
            Message::PageFetched { resource, page, page_count } => format!("{}: page {} of {}", resource, page, page_count),
            Message::PunchSkipped { workno, error } => format!("Skipping punch for worker {}: {}", workno, error),

            // === SHIFT MESSAGES ===
            Message::EmployeeHeader { name, workno } => format!("Employee: {} | ID: {}", name, workno),
            Message::MissingPunch => "missing punch".to_string(),
            Message::NoPunchesForWorker(workno) => format!("No punches found for worker {}", workno),
            Message::NoWorkersFound => "No workers found".to_string(),
            Message::InvalidDateRange { from, to } => format!("Invalid date range: {} is after {}", from, to),
            Message::InvalidWindow(hours) => format!("Shift window must be a positive number of hours, got {}", hours),
            Message::ShiftsSummary { workers, shifts, orphans } => {
                format!("{} worker(s), {} shift(s), {} missing punch(es)", workers, shifts, orphans)
            }

            // === LISTING MESSAGES ===
            Message::CompaniesHeader => "Companies:".to_string(),
            Message::NoCompaniesFound => "No companies found".to_string(),
            Message::WorkersHeader(count) => format!("Workers ({}):", count),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted { rows, path } => format!("Exported {} row(s) to: {}", rows, path),
            Message::DownloadCompleted { records, path } => format!("Downloaded {} punch record(s) to: {}", records, path),
            Message::NothingToExport => "Nothing to export for the selected range".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptEmail => "Enter your CrossChex account email".to_string(),
            Message::PromptAccountName => "Enter a name for this account".to_string(),
            Message::PromptApiUrl => "Enter the CrossChex API URL".to_string(),
            Message::PromptTimeout => "Request timeout (seconds)".to_string(),
            Message::PromptDelay => "Delay before reconnecting (seconds)".to_string(),
            Message::PromptPerPage => "Records per page".to_string(),
            Message::PromptUtcOffset => "UTC offset of the attendance devices".to_string(),
            Message::PromptWindowHours => "Shift grouping window (hours)".to_string(),
            Message::PromptPassword => "Enter your CrossChex password".to_string(),
        };

        write!(f, "{}", text)
    }
}
