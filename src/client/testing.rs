use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use crate::client::Transport;
use crate::error::ExportError;

/// A request seen by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub(crate) method: &'static str,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) form: Option<Vec<(String, String)>>,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub(crate) fn form_value(&self, name: &str) -> Option<&str> {
        self.form.as_ref()?.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }
}

/// Canned responses keyed by path. Form field `CardNumber` is appended to the key when
/// present, so different cards can get different transaction lists.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: HashMap<String, String>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> FakeTransport {
        FakeTransport::default()
    }

    pub(crate) fn respond(mut self, path: &str, body: &str) -> FakeTransport {
        self.responses.insert(path.to_string(), body.to_string());
        self
    }

    pub(crate) fn respond_for_card(mut self, path: &str, card_number: &str, body: &str) -> FakeTransport {
        self.responses.insert(format!("{path}#{card_number}"), body.to_string());
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn lookup(&self, request: RecordedRequest) -> Result<String, ExportError> {
        let key = match request.form_value("CardNumber") {
            Some(card) => format!("{}#{}", request.path, card),
            None => request.path.clone(),
        };
        self.requests.borrow_mut().push(request);

        let body = self.responses.get(&key).cloned().unwrap_or_else(|| "{}".to_string());
        Ok(body)
    }
}

impl Transport for FakeTransport {
    fn get_text(&self, path: &str) -> Result<String, ExportError> {
        self.lookup(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            headers: vec![],
            form: None,
        })
    }

    fn post(&self, path: &str, headers: &[(&str, String)], form: Option<&[(&str, String)]>) -> Result<String, ExportError> {
        self.lookup(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            headers: headers.iter().map(|(n, v)| (n.to_string(), v.clone())).collect(),
            form: form.map(|f| f.iter().map(|(n, v)| (n.to_string(), v.clone())).collect()),
        })
    }
}

/// Return the content of a file within the test data directory
pub(crate) fn fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixture");
    path.push(filename);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("unable to read fixture {}: {}", path.display(), e))
}
