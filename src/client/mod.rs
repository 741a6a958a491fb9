use std::time::Duration;
use log::debug;
use reqwest::blocking::Client;
use crate::error::ExportError;

pub(crate) mod token;
pub(crate) mod session;

#[cfg(test)]
pub(crate) mod testing;

/// Header carrying the combined verification token on every authenticated call.
pub(crate) const VERIFICATION_HEADER: &str = "RequestVerificationToken";

/// The minimal HTTP surface the exporter needs. Paths are relative to the backend base url
/// and bodies are returned as text so callers decide how to decode them.
pub(crate) trait Transport {
    fn get_text(&self, path: &str) -> Result<String, ExportError>;

    /// POST to `path` with extra headers and an optional url-encoded form body.
    fn post(&self, path: &str, headers: &[(&str, String)], form: Option<&[(&str, String)]>) -> Result<String, ExportError>;
}

/// Blocking HTTP client with its own cookie jar, shared by every call of one run.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<HttpClient, ExportError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(HttpClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpClient {
    fn get_text(&self, path: &str) -> Result<String, ExportError> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    fn post(&self, path: &str, headers: &[(&str, String)], form: Option<&[(&str, String)]>) -> Result<String, ExportError> {
        debug!("POST {}", path);
        let mut request = self.client.post(self.url(path));
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        if let Some(form) = form {
            request = request.form(form);
        }

        let response = request.send()?.error_for_status()?;
        Ok(response.text()?)
    }
}
