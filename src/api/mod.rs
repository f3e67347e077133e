pub mod models;


use reqwest::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ClientError;

use models::*;


pub type ApiResult<T> = Result<Reply<T>, ClientError>;


pub trait Backend: Send + Sync {
    fn register(&self, credentials: &Credentials) -> ApiResult<MessageBody>;
    fn login(&self, credentials: &Credentials) -> ApiResult<MessageBody>;
    fn logout(&self) -> ApiResult<MessageBody>;
    fn reset_password(&self, reset: &PasswordReset) -> ApiResult<MessageBody>;
    fn verify_identity(&self, documents: &IdentityDocuments) -> ApiResult<VerifyBody>;
    fn report_issue(&self, issue: &NewIssue) -> ApiResult<ReportBody>;
    fn get_issues(&self) -> ApiResult<IssuesBody>;
    fn upvote_issue(&self, issue_id: i32) -> ApiResult<UpvoteBody>;
}


pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        // The backend keeps the login session in a cookie.
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(HttpBackend {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> ApiResult<T> {
        debug!("Request {}", path);

        let mut res = req.send()?;
        let status = res.status().as_u16();
        let text = res.text()?;

        let body = serde_json::from_str::<T>(&text)
            .map_err(|err| ClientError::Parse(format!("{} ({} from {})", err, status, path)))?;

        debug!("Response {} from {}", status, path);

        Ok(Reply::new(status, body))
    }
}

impl Backend for HttpBackend {
    fn register(&self, credentials: &Credentials) -> ApiResult<MessageBody> {
        self.send("/register", self.client.post(&self.url("/register")).json(credentials))
    }

    fn login(&self, credentials: &Credentials) -> ApiResult<MessageBody> {
        self.send("/login", self.client.post(&self.url("/login")).json(credentials))
    }

    fn logout(&self) -> ApiResult<MessageBody> {
        self.send("/logout", self.client.get(&self.url("/logout")))
    }

    fn reset_password(&self, reset: &PasswordReset) -> ApiResult<MessageBody> {
        self.send("/reset-password", self.client.post(&self.url("/reset-password")).json(reset))
    }

    fn verify_identity(&self, documents: &IdentityDocuments) -> ApiResult<VerifyBody> {
        let form = multipart::Form::new()
            .file("aadhar", &documents.aadhar)?
            .file("other_id", &documents.other_id)?;

        self.send("/verify-identity", self.client.post(&self.url("/verify-identity")).multipart(form))
    }

    fn report_issue(&self, issue: &NewIssue) -> ApiResult<ReportBody> {
        self.send("/report-issue", self.client.post(&self.url("/report-issue")).json(issue))
    }

    fn get_issues(&self) -> ApiResult<IssuesBody> {
        self.send("/get-issues", self.client.get(&self.url("/get-issues")))
    }

    fn upvote_issue(&self, issue_id: i32) -> ApiResult<UpvoteBody> {
        self.send("/upvote-issue",
            self.client.post(&self.url("/upvote-issue")).json(&UpvoteRequest { issue_id }))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_onto_base_url() {
        let config = Config::from_lookup(|key| match key {
            "FIXHUB_URL" => Some("http://localhost:5000/".into()),
            _ => None,
        }).unwrap();
        let backend = HttpBackend::new(&config).unwrap();

        assert_eq!(backend.url("/get-issues"), "http://localhost:5000/get-issues");
    }
}
