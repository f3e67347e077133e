use crate::api::{
    ApiResult,
    models::{NewIssue, ReportBody},
};
use crate::issue_sys;
use crate::page::{Page, ReportForm};
use crate::state::UiState;
use crate::task::{Effect, Request};
use crate::util;


pub const REPORT_SERVER_ERROR: &'static str = "Could not submit the report. Please try again.";


impl ReportForm {
    pub fn verify_error(&self) -> Option<&'static str> {
        if util::is_blank(&self.title) {
            Some("Please provide a title for the issue.")
        }
        else if util::is_blank(&self.description) {
            Some("Please describe the issue.")
        }
        else if util::is_blank(&self.category) {
            Some("Please choose a category.")
        }
        else {
            None
        }
    }
}


pub fn submit_report(page: &Page, state: &UiState) -> Vec<Effect> {
    if !page.report_form_visible {
        warn!("Report form is hidden until verification succeeds");
        return Vec::new();
    }

    let form = &page.report_form;

    if let Some(err) = form.verify_error() {
        return vec![Effect::Alert(err.into())];
    }

    let at = state.selected().map(|s| s.at);

    vec![Effect::Send(Request::Report(NewIssue {
        title: form.title.trim().to_owned(),
        description: form.description.trim().to_owned(),
        category: form.category.trim().to_owned(),
        location: form.location.trim().to_owned(),
        latitude: at.map(|at| at.lat),
        longitude: at.map(|at| at.lng),
    }))]
}

pub fn on_reported(page: &mut Page, result: ApiResult<ReportBody>) -> Vec<Effect> {
    match result {
        Ok(reply) => {
            if reply.is_ok() {
                info!("Issue {:?} reported", reply.body.issue_id);

                page.report_form.reset();

                let mut effects = vec![Effect::Alert(reply.body.message)];
                effects.extend(issue_sys::load_issues(page));
                effects
            }
            else {
                vec![Effect::Alert(reply.body.message)]
            }
        },
        Err(err) => {
            error!("Report failed: {}", err);
            vec![Effect::Alert(REPORT_SERVER_ERROR.into())]
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Reply;
    use crate::error::ClientError;
    use crate::issue_sys::ISSUES_LOADING;
    use crate::map_sys::LatLng;
    use crate::page::{ReportField, Route, StatusText};

    fn unlocked_page() -> Page {
        let mut page = Page::new(Route::Home, "{z}/{x}/{y}");
        page.report_form_visible = true;
        page.report_form.set(ReportField::Title, "Pothole".into());
        page.report_form.set(ReportField::Description, "Deep pothole near the bus stop".into());
        page.report_form.set(ReportField::Category, "Roads".into());
        page
    }

    #[test]
    fn empty_category_alerts_without_request() {
        let mut page = unlocked_page();
        page.report_form.set(ReportField::Category, "  ".into());

        let effects = submit_report(&page, &UiState::new());
        assert_eq!(effects, vec![Effect::Alert("Please choose a category.".into())]);
    }

    #[test]
    fn hidden_form_sends_nothing() {
        let mut page = unlocked_page();
        page.report_form_visible = false;

        assert!(submit_report(&page, &UiState::new()).is_empty());
    }

    #[test]
    fn coordinates_are_null_without_map_click() {
        let page = unlocked_page();

        match submit_report(&page, &UiState::new()).pop() {
            Some(Effect::Send(Request::Report(issue))) => {
                assert_eq!(issue.latitude, None);
                assert_eq!(issue.longitude, None);
                assert_eq!(issue.location, "");
            },
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn carries_selected_location() {
        let mut page = unlocked_page();
        let mut state = UiState::new();
        state.select_location(LatLng::new(12.9, 77.6));
        page.report_form.set(ReportField::Location, "MG Road".into());

        match submit_report(&page, &state).pop() {
            Some(Effect::Send(Request::Report(issue))) => {
                assert_eq!(issue.latitude, Some(12.9));
                assert_eq!(issue.longitude, Some(77.6));
                assert_eq!(issue.location, "MG Road");
            },
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn success_resets_and_reloads() {
        let mut page = unlocked_page();
        let effects = on_reported(&mut page, Ok(Reply::new(200, ReportBody {
            message: "Issue submitted successfully!".into(),
            issue_id: Some(9),
        })));

        assert_eq!(effects, vec![
            Effect::Alert("Issue submitted successfully!".into()),
            Effect::Send(Request::LoadIssues),
        ]);
        assert_eq!(page.report_form, ReportForm::default());
        assert_eq!(page.issue_status, StatusText::neutral(ISSUES_LOADING));
    }

    #[test]
    fn failure_keeps_form() {
        let mut page = unlocked_page();
        let before = page.report_form.clone();

        let effects = on_reported(&mut page, Ok(Reply::new(400, ReportBody {
            message: "Please provide all required fields!".into(),
            issue_id: None,
        })));
        assert_eq!(effects, vec![Effect::Alert("Please provide all required fields!".into())]);
        assert_eq!(page.report_form, before);

        let effects = on_reported(&mut page, Err(ClientError::Transport("reset".into())));
        assert_eq!(effects, vec![Effect::Alert(REPORT_SERVER_ERROR.into())]);
        assert_eq!(page.report_form, before);
    }
}
