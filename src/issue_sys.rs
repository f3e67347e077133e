use crate::api::{
    ApiResult,
    models::{IssuesBody, UpvoteBody},
};
use crate::page::{IssueCard, Page, StatusText};
use crate::task::{Effect, Request};


pub const ISSUES_LOADING: &'static str = "Loading issues…";
pub const ISSUES_LOAD_ERROR: &'static str = "Could not load issues.";
pub const NO_ISSUES: &'static str = "No issues reported yet.";
pub const UPVOTE_SERVER_ERROR: &'static str = "Could not record the upvote. Please try again.";


pub fn load_issues(page: &mut Page) -> Vec<Effect> {
    page.issue_status = StatusText::neutral(ISSUES_LOADING);
    vec![Effect::Send(Request::LoadIssues)]
}

// The list is replaced as a whole on every successful load.
pub fn on_issues_loaded(page: &mut Page, result: ApiResult<IssuesBody>) {
    match result {
        Ok(reply) => {
            if reply.is_ok() {
                debug!("Loaded {} issues", reply.body.issues.len());

                page.issues = reply.body.issues.into_iter()
                    .map(IssueCard::new)
                    .collect();
                page.issue_status = if page.issues.is_empty() {
                    StatusText::neutral(NO_ISSUES)
                }
                else {
                    StatusText::empty()
                };
            }
            else {
                warn!("Issue list answered {}", reply.status);
                page.issue_status = StatusText::error(ISSUES_LOAD_ERROR);
            }
        },
        Err(err) => {
            error!("Issue list failed: {}", err);
            page.issue_status = StatusText::error(ISSUES_LOAD_ERROR);
        },
    }
}

pub fn submit_upvote(page: &mut Page, issue_id: i32) -> Vec<Effect> {
    match page.card(issue_id) {
        Some(card) if card.upvote_enabled => vec![Effect::Send(Request::Upvote(issue_id))],
        Some(_) => {
            debug!("Upvote button of {} is disabled", issue_id);
            Vec::new()
        },
        None => {
            warn!("No issue {} in the list", issue_id);
            Vec::new()
        },
    }
}

pub fn on_upvoted(page: &mut Page, issue_id: i32, result: ApiResult<UpvoteBody>) -> Vec<Effect> {
    match result {
        Ok(reply) => {
            if reply.is_ok() {
                match page.card_mut(issue_id) {
                    Some(card) => {
                        if let Some(upvotes) = reply.body.upvotes {
                            card.issue.upvotes = upvotes;
                        }
                        card.issue.upvoted = true;
                        card.upvote_enabled = false;
                    },
                    None => debug!("Issue {} left the list before its upvote finished", issue_id),
                }
            }

            vec![Effect::Alert(reply.body.message)]
        },
        Err(err) => {
            error!("Upvote of {} failed: {}", issue_id, err);
            vec![Effect::Alert(UPVOTE_SERVER_ERROR.into())]
        },
    }
}
