use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use crate::client::Transport;
use crate::error::ExportError;

lazy_static! {
    static ref FORM_TOKEN: Regex = Regex::new(r#"MSRService\.FormToken\s?=\s?"([^"]*)"\s*;"#).unwrap();

    static ref COOKIE_TOKEN: Regex = Regex::new(r#"MSRService\.CookieToken\s?=\s?"([^"]*)"\s*;"#).unwrap();
}

/// The two halves of the anti-forgery token the login page hands out in inline script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VerificationToken {
    pub(crate) form_token: String,
    pub(crate) cookie_token: String,
}

impl VerificationToken {
    /// Value of the `RequestVerificationToken` header, cookie token first.
    pub(crate) fn header_value(&self) -> String {
        format!("{}:{}", self.cookie_token, self.form_token)
    }
}

pub(crate) fn fetch_verification_token<T: Transport>(transport: &T, login_page: &str) -> Result<VerificationToken, ExportError> {
    info!("Fetching verification token from {}", login_page);
    let html = transport.get_text(login_page)?;
    extract_verification_token(&html)
}

pub(crate) fn extract_verification_token(html: &str) -> Result<VerificationToken, ExportError> {
    let form_token = capture(&FORM_TOKEN, html).ok_or(ExportError::TokenNotFound("form token"))?;
    let cookie_token = capture(&COOKIE_TOKEN, html).ok_or(ExportError::TokenNotFound("cookie token"))?;

    Ok(VerificationToken { form_token, cookie_token })
}

fn capture(regex: &Regex, html: &str) -> Option<String> {
    regex.captures(html).map(|c| c[1].to_string())
}
