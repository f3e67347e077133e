use crate::api::{
    ApiResult, Backend,
    models::*,
};
use crate::error::ClientError;
use crate::geocoder::Geocoder;
use crate::map_sys::LatLng;
use crate::page::{Route, StatusText};
use crate::util;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Register,
    Login,
    Logout,
    ResetPassword,
    Verify,
    Report,
    LoadIssues,
    Upvote(i32),
    ReverseGeocode,
}

impl ActionKind {
    // Each map click must get its own lookup.
    pub fn is_guarded(&self) -> bool {
        *self != ActionKind::ReverseGeocode
    }
}


// Work that has to leave the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Register(Credentials),
    Login(Credentials),
    Logout,
    ResetPassword(PasswordReset),
    Verify(IdentityDocuments),
    Report(NewIssue),
    LoadIssues,
    Upvote(i32),
    ReverseGeocode(LatLng),
}

impl Request {
    pub fn kind(&self) -> ActionKind {
        match self {
            Request::Register(_) => ActionKind::Register,
            Request::Login(_) => ActionKind::Login,
            Request::Logout => ActionKind::Logout,
            Request::ResetPassword(_) => ActionKind::ResetPassword,
            Request::Verify(_) => ActionKind::Verify,
            Request::Report(_) => ActionKind::Report,
            Request::LoadIssues => ActionKind::LoadIssues,
            Request::Upvote(id) => ActionKind::Upvote(*id),
            Request::ReverseGeocode(_) => ActionKind::ReverseGeocode,
        }
    }

    pub fn execute(&self, backend: &dyn Backend, geocoder: &dyn Geocoder) -> Outcome {
        match self {
            Request::Register(c) => Outcome::Register(backend.register(c)),
            Request::Login(c) => Outcome::Login(backend.login(c)),
            Request::Logout => Outcome::Logout(backend.logout()),
            Request::ResetPassword(r) => Outcome::ResetPassword(backend.reset_password(r)),
            Request::Verify(docs) => Outcome::Verify(backend.verify_identity(docs)),
            Request::Report(issue) => Outcome::Report(backend.report_issue(issue)),
            Request::LoadIssues => Outcome::LoadIssues(backend.get_issues()),
            Request::Upvote(id) => Outcome::Upvote(*id, backend.upvote_issue(*id)),
            Request::ReverseGeocode(at) => Outcome::ReverseGeocode(*at, geocoder.reverse(*at)),
        }
    }
}


#[derive(Debug)]
pub enum Outcome {
    Register(ApiResult<MessageBody>),
    Login(ApiResult<MessageBody>),
    Logout(ApiResult<MessageBody>),
    ResetPassword(ApiResult<MessageBody>),
    Verify(ApiResult<VerifyBody>),
    Report(ApiResult<ReportBody>),
    LoadIssues(ApiResult<IssuesBody>),
    Upvote(i32, ApiResult<UpvoteBody>),
    ReverseGeocode(LatLng, Result<Option<String>, ClientError>),
}

impl Outcome {
    pub fn kind(&self) -> ActionKind {
        match self {
            Outcome::Register(_) => ActionKind::Register,
            Outcome::Login(_) => ActionKind::Login,
            Outcome::Logout(_) => ActionKind::Logout,
            Outcome::ResetPassword(_) => ActionKind::ResetPassword,
            Outcome::Verify(_) => ActionKind::Verify,
            Outcome::Report(_) => ActionKind::Report,
            Outcome::LoadIssues(_) => ActionKind::LoadIssues,
            Outcome::Upvote(id, _) => ActionKind::Upvote(*id),
            Outcome::ReverseGeocode(..) => ActionKind::ReverseGeocode,
        }
    }

    pub fn is_failure(&self) -> bool {
        match self {
            Outcome::Register(r) | Outcome::Login(r)
                | Outcome::Logout(r) | Outcome::ResetPassword(r) => r.is_err(),
            Outcome::Verify(r) => r.is_err(),
            Outcome::Report(r) => r.is_err(),
            Outcome::LoadIssues(r) => r.is_err(),
            Outcome::Upvote(_, r) => r.is_err(),
            Outcome::ReverseGeocode(_, r) => r.is_err(),
        }
    }
}


// What a handler asks the controller to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send(Request),
    Alert(String),
    Navigate(Route, Option<StatusText>),
}


// A request bound to the page that started it.
#[derive(Debug)]
pub struct Task {
    pub id: String,
    pub generation: u64,
    pub request: Request,
}

impl Task {
    pub fn new(generation: u64, request: Request) -> Self {
        Task {
            id: util::generate_rand_id(8),
            generation,
            request,
        }
    }

    pub fn run(self, backend: &dyn Backend, geocoder: &dyn Geocoder) -> Completion {
        debug!("Task {} starts {:?}", self.id, self.request.kind());

        let outcome = self.request.execute(backend, geocoder);

        if outcome.is_failure() {
            debug!("Task {} failed", self.id);
        }
        else {
            debug!("Task {} finished", self.id);
        }

        Completion {
            id: self.id,
            generation: self.generation,
            outcome,
        }
    }
}


#[derive(Debug)]
pub struct Completion {
    pub id: String,
    pub generation: u64,
    pub outcome: Outcome,
}
