use log::info;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use crate::client::token::VerificationToken;
use crate::client::{Transport, VERIFICATION_HEADER};
use crate::common::null_as_default;
use crate::error::ExportError;

const LOGIN_PATH: &str = "/msrservice/Login?format=json";

/// Separates a field name from its value inside the login blob.
const NAME_VALUE_SEPARATOR: &str = "r0tn1L";
/// Separates one name/value pair from the next inside the login blob.
const PAIR_SEPARATOR: &str = "L1nt0r";
const CAPTCHA_PLACEHOLDER: &str = "undefined";

/// Marker the backend puts into `Message` when credentials or token are rejected.
const LOGIN_FAILED_MARKER: &str = "Login False";

#[derive(Deserialize, Debug)]
struct LoginResponse {
    #[serde(rename = "Message", default, deserialize_with = "null_as_default")]
    message: String,
}

/// An authenticated session. Owns the transport, whose cookie jar holds the login cookies,
/// and re-attaches the same verification token to every call.
pub(crate) struct AuthSession<T: Transport> {
    transport: T,
    token: VerificationToken,
}

impl<T: Transport> AuthSession<T> {
    pub(crate) fn login(transport: T, token: VerificationToken, email: &str, password: &str) -> Result<AuthSession<T>, ExportError> {
        let session = AuthSession { transport, token };

        let form = [("LoginDataString", login_data_string(email, password))];
        let response: LoginResponse = session.post_json(LOGIN_PATH, Some(&form[..]))?;
        if response.message.contains(LOGIN_FAILED_MARKER) {
            return Err(ExportError::LoginFailed(response.message));
        }

        info!("Logged in successfully");
        Ok(session)
    }

    /// POST with the verification token header and decode the JSON response.
    pub(crate) fn post_json<R: DeserializeOwned>(&self, path: &str, form: Option<&[(&str, String)]>) -> Result<R, ExportError> {
        let headers = [(VERIFICATION_HEADER, self.token.header_value())];
        let body = self.transport.post(path, &headers, form)?;
        serde_json::from_str(&body).map_err(|source| ExportError::Decode { path: path.to_string(), source })
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

/// Serialise the credentials into the single blob the login endpoint parses positionally:
/// `Email`, `Password` and `CaptchaText`, always in that order.
pub(crate) fn login_data_string(email: &str, password: &str) -> String {
    [("Email", email), ("Password", password), ("CaptchaText", CAPTCHA_PLACEHOLDER)]
        .iter()
        .map(|(name, value)| format!("{name}{NAME_VALUE_SEPARATOR}{value}"))
        .collect::<Vec<String>>()
        .join(PAIR_SEPARATOR)
}
