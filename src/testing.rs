// Test doubles for the backend and the geocoder.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};

use crate::api::{
    ApiResult, Backend,
    models::*,
};
use crate::config::Config;
use crate::controller::{Controller, UiEvent};
use crate::error::ClientError;
use crate::geocoder::Geocoder;
use crate::map_sys::LatLng;


pub fn config() -> Config {
    Config::from_lookup(|_| None).unwrap()
}

// Runs the event and every follow-up request on the calling thread.
pub fn run_inline(controller: &mut Controller, event: UiEvent,
    backend: &dyn Backend, geocoder: &dyn Geocoder) {

    let mut queue: VecDeque<_> = controller.handle(event).into_iter().collect();

    while let Some(task) = queue.pop_front() {
        let completion = task.run(backend, geocoder);
        queue.extend(controller.complete(completion));
    }
}


enum Scripted {
    Json(u16, JsonValue),
    Down,
}


pub struct FakeBackend {
    replies: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, JsonValue)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn script(&self, path: &str, scripted: Scripted) {
        self.replies.lock().unwrap()
            .entry(path.to_owned())
            .or_insert_with(VecDeque::new)
            .push_back(scripted);
    }

    pub fn reply(&self, path: &str, status: u16, body: JsonValue) {
        self.script(path, Scripted::Json(status, body));
    }

    pub fn down(&self, path: &str) {
        self.script(path, Scripted::Down);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|p| *p == path).count()
    }

    pub fn sent(&self, path: &str) -> Vec<JsonValue> {
        self.calls.lock().unwrap().iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn answer<T: DeserializeOwned>(&self, path: &str, sent: JsonValue) -> ApiResult<T> {
        self.calls.lock().unwrap().push((path.to_owned(), sent));

        let next = self.replies.lock().unwrap()
            .get_mut(path)
            .and_then(|queue| queue.pop_front());

        match next {
            Some(Scripted::Json(status, body)) => Ok(Reply::new(status, serde_json::from_value(body)?)),
            Some(Scripted::Down) => Err(ClientError::Transport(format!("{} is down", path))),
            None => Err(ClientError::Transport(format!("no reply scripted for {}", path))),
        }
    }
}

impl Backend for FakeBackend {
    fn register(&self, credentials: &Credentials) -> ApiResult<MessageBody> {
        self.answer("/register", serde_json::to_value(credentials).unwrap())
    }

    fn login(&self, credentials: &Credentials) -> ApiResult<MessageBody> {
        self.answer("/login", serde_json::to_value(credentials).unwrap())
    }

    fn logout(&self) -> ApiResult<MessageBody> {
        self.answer("/logout", JsonValue::Null)
    }

    fn reset_password(&self, reset: &PasswordReset) -> ApiResult<MessageBody> {
        self.answer("/reset-password", serde_json::to_value(reset).unwrap())
    }

    fn verify_identity(&self, documents: &IdentityDocuments) -> ApiResult<VerifyBody> {
        self.answer("/verify-identity", json!({
            "aadhar": documents.aadhar,
            "other_id": documents.other_id,
        }))
    }

    fn report_issue(&self, issue: &NewIssue) -> ApiResult<ReportBody> {
        self.answer("/report-issue", serde_json::to_value(issue).unwrap())
    }

    fn get_issues(&self) -> ApiResult<IssuesBody> {
        self.answer("/get-issues", JsonValue::Null)
    }

    fn upvote_issue(&self, issue_id: i32) -> ApiResult<UpvoteBody> {
        self.answer("/upvote-issue", serde_json::to_value(UpvoteRequest { issue_id }).unwrap())
    }
}


pub struct FakeGeocoder {
    answers: Mutex<VecDeque<Result<Option<String>, ()>>>,
    calls: Mutex<Vec<LatLng>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        FakeGeocoder {
            answers: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(&self, answer: Result<Option<String>, ()>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn calls(&self) -> Vec<LatLng> {
        self.calls.lock().unwrap().clone()
    }
}

impl Geocoder for FakeGeocoder {
    fn reverse(&self, at: LatLng) -> Result<Option<String>, ClientError> {
        self.calls.lock().unwrap().push(at);

        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(address)) => Ok(address),
            Some(Err(())) | None => Err(ClientError::Transport("geocoder offline".into())),
        }
    }
}
