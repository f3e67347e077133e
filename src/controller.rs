use cgmath::Point2;

use crate::api::models::{Credentials, IdentityDocuments, PasswordReset};
use crate::auth_sys;
use crate::config::Config;
use crate::issue_sys;
use crate::map_sys::{self, LatLng};
use crate::nav_sys;
use crate::page::{Page, ReportField, Route, StatusText};
use crate::report_sys;
use crate::state::UiState;
use crate::task::{Completion, Effect, Outcome, Task};
use crate::verify_sys;


#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Navigate(Route),
    DropdownClick,
    DocumentClick { inside_dropdown: bool },
    FaqToggle(usize),
    Register(Credentials),
    Login(Credentials),
    Logout,
    ResetPassword(PasswordReset),
    VerifySubmit(IdentityDocuments),
    ReportInput(ReportField, String),
    ReportSubmit,
    MapClick(LatLng),
    MapTap(Point2<f64>),
    ShowTile,
    ReloadIssues,
    Upvote(i32),
}

impl UiEvent {
    fn needs_hub(&self) -> bool {
        match self {
            UiEvent::Navigate(_)
                | UiEvent::Register(_)
                | UiEvent::Login(_)
                | UiEvent::ResetPassword(_) => false,
            _ => true,
        }
    }
}


pub struct Controller {
    page: Page,
    state: UiState,
    generation: u64,
    alerts: Vec<String>,
    guard_in_flight: bool,
    tile_template: String,
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Controller {
            page: Page::new(Route::Login, &config.tile_url),
            state: UiState::new(),
            generation: 0,
            alerts: Vec::new(),
            guard_in_flight: config.guard_in_flight,
            tile_template: config.tile_url.clone(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    #[cfg(test)]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        self.alerts.drain(..).collect()
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Task> {
        if event.needs_hub() && !self.page.route.shows_hub() {
            warn!("{:?} has no target on {}", event, self.page.route.path());
            return Vec::new();
        }

        let effects = match event {
            UiEvent::Navigate(route) => return self.navigate(route, None),
            UiEvent::DropdownClick => {
                nav_sys::toggle_dropdown(&mut self.page);
                Vec::new()
            },
            UiEvent::DocumentClick { inside_dropdown } => {
                nav_sys::on_document_click(&mut self.page, inside_dropdown);
                Vec::new()
            },
            UiEvent::FaqToggle(index) => {
                nav_sys::toggle_faq(&mut self.page, index);
                Vec::new()
            },
            UiEvent::Register(credentials) => auth_sys::submit_register(&mut self.page, credentials),
            UiEvent::Login(credentials) => auth_sys::submit_login(&mut self.page, credentials),
            UiEvent::Logout => auth_sys::submit_logout(),
            UiEvent::ResetPassword(reset) => auth_sys::submit_reset(&mut self.page, reset),
            UiEvent::VerifySubmit(documents) =>
                verify_sys::submit_verification(&mut self.page, &mut self.state, documents),
            UiEvent::ReportInput(field, value) => {
                self.page.report_form.set(field, value);
                Vec::new()
            },
            UiEvent::ReportSubmit => report_sys::submit_report(&self.page, &self.state),
            UiEvent::MapClick(at) => map_sys::on_map_click(&mut self.page, &mut self.state, at),
            UiEvent::MapTap(point) => map_sys::on_map_tap(&mut self.page, &mut self.state, point),
            UiEvent::ShowTile => map_sys::show_tile(&self.page),
            UiEvent::ReloadIssues => issue_sys::load_issues(&mut self.page),
            UiEvent::Upvote(issue_id) => issue_sys::submit_upvote(&mut self.page, issue_id),
        };

        self.apply(effects)
    }

    pub fn complete(&mut self, completion: Completion) -> Vec<Task> {
        if completion.generation != self.generation {
            debug!("Drop task {} of an unloaded page", completion.id);
            return Vec::new();
        }

        self.state.finish_in_flight(completion.outcome.kind());

        let effects = match completion.outcome {
            Outcome::Register(result) => auth_sys::on_registered(&mut self.page, result),
            Outcome::Login(result) => auth_sys::on_logged_in(&mut self.page, result),
            Outcome::Logout(result) => auth_sys::on_logged_out(&mut self.page, result),
            Outcome::ResetPassword(result) => auth_sys::on_reset(&mut self.page, result),
            Outcome::Verify(result) => {
                verify_sys::on_verification(&mut self.page, &mut self.state, result);
                Vec::new()
            },
            Outcome::Report(result) => report_sys::on_reported(&mut self.page, result),
            Outcome::LoadIssues(result) => {
                issue_sys::on_issues_loaded(&mut self.page, result);
                Vec::new()
            },
            Outcome::Upvote(issue_id, result) => issue_sys::on_upvoted(&mut self.page, issue_id, result),
            Outcome::ReverseGeocode(at, result) => {
                map_sys::on_geocoded(&mut self.page, &mut self.state, at, result);
                Vec::new()
            },
        };

        self.apply(effects)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<Task> {
        let mut tasks = Vec::new();

        for effect in effects {
            match effect {
                Effect::Send(request) => {
                    let kind = request.kind();

                    if self.guard_in_flight && kind.is_guarded() && self.state.is_in_flight(kind) {
                        warn!("{:?} is already in flight", kind);
                        continue;
                    }

                    self.state.mark_in_flight(kind);
                    tasks.push(Task::new(self.generation, request));
                },
                Effect::Alert(message) => {
                    if message.is_empty() {
                        debug!("Skip empty alert");
                    }
                    else {
                        self.alerts.push(message);
                    }
                },
                // Nothing after a navigation belongs to the new page.
                Effect::Navigate(route, flash) => return self.navigate(route, flash),
            }
        }

        tasks
    }

    fn navigate(&mut self, route: Route, flash: Option<StatusText>) -> Vec<Task> {
        info!("Navigate to {}", route.path());

        self.generation += 1;
        self.page = Page::new(route, &self.tile_template);
        self.state = UiState::new();

        if let Some(status) = flash {
            self.page.auth_status = status;
        }

        if route.shows_hub() {
            let effects = issue_sys::load_issues(&mut self.page);
            self.apply(effects)
        }
        else {
            Vec::new()
        }
    }
}
