//! HTTP client for the SheetLink backend.
//!
//! All endpoints share one cookie-carrying [`reqwest`] client so the
//! session established at sign-in rides along automatically. Responses
//! funnel through a single status check that turns `401` into
//! [`ApiError::SessionExpired`] and failure envelopes into
//! [`ApiError::Backend`].

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use sheetlink_model::{
    AccountSession, Ack, AuthCodeRequest, FileUploadStatus, HeaderRow, ProfileUpdate,
    SheetConfigRequest, Spreadsheet, SpreadsheetList, UploadKind, Worksheet, WorksheetList,
};

use crate::error::{ApiError, Result};

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://app.sheetlink.io";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "SHEETLINK_API_URL";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the SheetLink backend API.
pub struct ApiClient {
    /// HTTP client with the session cookie store.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_store(true)
            .user_agent(concat!("sheetlink-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// Create a client against `SHEETLINK_API_URL`, or the default URL.
    pub fn from_env() -> Result<Self> {
        let base = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the authoritative account session.
    pub fn fetch_session(&self) -> Result<AccountSession> {
        self.get_json("/api/user")
    }

    /// Save the business profile. Returns the backend's confirmation
    /// message, if any.
    pub fn update_profile(&self, profile: &ProfileUpdate) -> Result<Option<String>> {
        self.post_ack("/api/profile", profile)
    }

    /// Exchange a Google OAuth code for a linked account.
    pub fn complete_google_auth(&self, code: impl Into<String>) -> Result<Option<String>> {
        let request = AuthCodeRequest { code: code.into() };
        self.post_ack("/api/google/complete-auth", &request)
    }

    /// List spreadsheets visible to the linked Google account.
    pub fn list_spreadsheets(&self) -> Result<Vec<Spreadsheet>> {
        let list: SpreadsheetList = self.get_json("/api/spreadsheets")?;
        Ok(list.spreadsheets)
    }

    /// List worksheets within a spreadsheet.
    pub fn list_worksheets(&self, spreadsheet_id: &str) -> Result<Vec<Worksheet>> {
        let list: WorksheetList =
            self.get_json(&format!("/api/spreadsheets/{spreadsheet_id}/worksheets"))?;
        Ok(list.worksheets)
    }

    /// Fetch the header row of a worksheet, in column order.
    pub fn fetch_headers(&self, spreadsheet_id: &str, worksheet_title: &str) -> Result<Vec<String>> {
        debug!("GET /api/spreadsheets/{spreadsheet_id}/headers?worksheet={worksheet_title}");
        let response = self.headers_request(spreadsheet_id, worksheet_title).send()?;
        let row: HeaderRow = Self::check_status(response)?.json()?;
        Ok(row.headers)
    }

    /// Worksheet titles go in the query string; titles with spaces or
    /// symbols must arrive urlencoded.
    fn headers_request(&self, spreadsheet_id: &str, worksheet_title: &str) -> RequestBuilder {
        let path = format!("/api/spreadsheets/{spreadsheet_id}/headers");
        self.client
            .get(self.url(&path))
            .query(&[("worksheet", worksheet_title)])
    }

    /// Save the sheet selection and column mapping.
    pub fn configure_sheet(&self, request: &SheetConfigRequest) -> Result<Option<String>> {
        self.post_ack("/api/sheets/configure", request)
    }

    /// Fetch seed-file upload progress.
    pub fn upload_status(&self) -> Result<FileUploadStatus> {
        self.get_json("/api/uploads/status")
    }

    /// Upload a seed file. The caller reads the file; the client only
    /// ships bytes.
    pub fn upload_file(
        &self,
        kind: UploadKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>> {
        debug!("POST /api/uploads ({kind}, {file_name}, {} bytes)", bytes.len());
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().text("kind", kind.as_str()).part("file", part);
        let response = self
            .client
            .post(self.url("/api/uploads"))
            .multipart(form)
            .send()?;
        Self::ack_from(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {path}");
        let response = self.client.get(self.url(path)).send()?;
        Ok(Self::check_status(response)?.json()?)
    }

    fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<Option<String>> {
        debug!("POST {path}");
        let response = self.client.post(self.url(path)).json(body).send()?;
        Self::ack_from(response)
    }

    /// Reject non-success responses, keeping the backend's explanation
    /// when the body carries one.
    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            let message = response
                .json::<Ack>()
                .ok()
                .and_then(|ack| ack.into_result().err())
                .unwrap_or_else(|| status.to_string());
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Fold an acknowledgement response into a result. A `success: false`
    /// envelope under a 2xx status is still a backend failure.
    fn ack_from(response: Response) -> Result<Option<String>> {
        let status = response.status();
        let response = Self::check_status(response)?;
        let ack: Ack = response.json()?;
        ack.into_result().map_err(|message| ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("https://app.sheetlink.io/").unwrap();
        assert_eq!(client.url("/api/user"), "https://app.sheetlink.io/api/user");
        assert_eq!(client.base_url(), "https://app.sheetlink.io");
    }

    #[test]
    fn test_worksheet_title_is_urlencoded() {
        let client = ApiClient::new("https://app.sheetlink.io").unwrap();
        let request = client
            .headers_request("abc123", "Q1 Sales")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://app.sheetlink.io/api/spreadsheets/abc123/headers?worksheet=Q1+Sales"
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ApiClient::new(DEFAULT_API_URL).is_ok());
    }
}
