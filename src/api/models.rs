use std::path::PathBuf;
use serde::{Serialize, Deserialize};


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordReset {
    pub email: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityDocuments {
    pub aadhar: PathBuf,
    pub other_id: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpvoteRequest {
    pub issue_id: i32,
}


#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerifyBody {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl VerifyBody {
    pub fn is_verified(&self) -> bool {
        self.status == "verified"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub issue_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub upvotes: i32,
    #[serde(default)]
    pub upvoted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IssuesBody {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpvoteBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub upvotes: Option<i32>,
}


// A decoded response together with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: u16,
    pub body: T,
}

impl<T> Reply<T> {
    pub fn new(status: u16, body: T) -> Self {
        Reply { status, body }
    }

    pub fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
