use std::fmt::Write;

use crate::api::models::Issue;
use crate::map_sys::MapView;


const FAQ_ENTRIES: [(&'static str, &'static str); 4] = [
    ("How do I report an issue?",
        "Verify your identity once, then fill in the report form and pick the spot on the map."),
    ("Why do I need to verify my identity?",
        "Verification keeps reports accountable and filters out spam."),
    ("Can I upvote an issue more than once?",
        "No. Each account can upvote an issue only once."),
    ("How do I know the status of my report?",
        "Every issue in the list shows its current status as the authorities update it."),
];


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    ResetPassword,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::ResetPassword => "/reset-password",
        }
    }

    // Only the home page carries the hub widgets.
    pub fn shows_hub(&self) -> bool {
        *self == Route::Home
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Success,
    Error,
}


#[derive(Debug, Clone, PartialEq)]
pub struct StatusText {
    pub text: String,
    pub tone: Tone,
}

impl StatusText {
    pub fn empty() -> Self {
        Self::neutral("")
    }

    pub fn neutral(text: &str) -> Self {
        StatusText { text: text.to_owned(), tone: Tone::Neutral }
    }

    pub fn success(text: &str) -> Self {
        StatusText { text: text.to_owned(), tone: Tone::Success }
    }

    pub fn error(text: &str) -> Self {
        StatusText { text: text.to_owned(), tone: Tone::Error }
    }

    pub fn from_reply(ok: bool, text: &str) -> Self {
        if ok {
            Self::success(text)
        }
        else {
            Self::error(text)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
    pub expanded: bool,
}

impl FaqItem {
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded { "-" } else { "+" }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Title,
    Description,
    Category,
    Location,
}


#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
}

impl ReportForm {
    pub fn set(&mut self, field: ReportField, value: String) {
        match field {
            ReportField::Title => self.title = value,
            ReportField::Description => self.description = value,
            ReportField::Category => self.category = value,
            ReportField::Location => self.location = value,
        }
    }

    pub fn reset(&mut self) {
        *self = ReportForm::default();
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct IssueCard {
    pub issue: Issue,
    pub upvote_enabled: bool,
}

impl IssueCard {
    pub fn new(issue: Issue) -> Self {
        IssueCard {
            upvote_enabled: !issue.upvoted,
            issue,
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.upvote_enabled { "Upvote" } else { "Already Upvoted" }
    }
}


// The document of one loaded page.
#[derive(Debug, Clone)]
pub struct Page {
    pub route: Route,
    pub dropdown_open: bool,
    pub faq: Vec<FaqItem>,
    pub auth_status: StatusText,
    pub verify_status: StatusText,
    pub verify_form_visible: bool,
    pub report_form_visible: bool,
    pub report_form: ReportForm,
    pub issue_status: StatusText,
    pub issues: Vec<IssueCard>,
    pub map: MapView,
}

impl Page {
    pub fn new(route: Route, tile_template: &str) -> Self {
        Page {
            route,
            dropdown_open: false,
            faq: FAQ_ENTRIES.iter()
                .map(|&(question, answer)| FaqItem { question, answer, expanded: false })
                .collect(),
            auth_status: StatusText::empty(),
            verify_status: StatusText::empty(),
            verify_form_visible: true,
            report_form_visible: false,
            report_form: ReportForm::default(),
            issue_status: StatusText::empty(),
            issues: Vec::new(),
            map: MapView::new(tile_template),
        }
    }

    pub fn card(&self, issue_id: i32) -> Option<&IssueCard> {
        self.issues.iter().find(|c| c.issue.id == issue_id)
    }

    pub fn card_mut(&mut self, issue_id: i32) -> Option<&mut IssueCard> {
        self.issues.iter_mut().find(|c| c.issue.id == issue_id)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "== {} ==", self.route.path());
        write_status(&mut out, "status", &self.auth_status);

        if !self.route.shows_hub() {
            return out;
        }

        let _ = writeln!(out, "[menu] {}", if self.dropdown_open { "open" } else { "closed" });

        if self.verify_form_visible {
            let _ = writeln!(out, "[verify] upload your Aadhaar and a second proof of identity");
        }
        write_status(&mut out, "verify", &self.verify_status);

        if self.report_form_visible {
            let form = &self.report_form;
            let _ = writeln!(out, "[report] title: {}", form.title);
            let _ = writeln!(out, "[report] description: {}", form.description);
            let _ = writeln!(out, "[report] category: {}", form.category);
            let _ = writeln!(out, "[report] location: {}", form.location);
        }

        match self.map.markers().first() {
            Some(marker) => {
                let _ = writeln!(out, "[map] marker at {}", marker.position);
            },
            None => {
                let _ = writeln!(out, "[map] no marker, tile {}", self.map.tile_url(self.map.center));
            },
        }

        write_status(&mut out, "issues", &self.issue_status);
        for card in &self.issues {
            let _ = writeln!(out, "  #{} {} | {} | {} upvotes [{}]",
                card.issue.id, card.issue.title, card.issue.status,
                card.issue.upvotes, card.button_label());
        }

        for (idx, item) in self.faq.iter().enumerate() {
            let _ = writeln!(out, "[faq {}] {} {}", idx + 1, item.toggle_label(), item.question);
            if item.expanded {
                let _ = writeln!(out, "        {}", item.answer);
            }
        }

        out
    }
}


fn write_status(out: &mut String, name: &str, status: &StatusText) {
    if status.is_empty() {
        return;
    }

    let mark = match status.tone {
        Tone::Neutral => "..",
        Tone::Success => "ok",
        Tone::Error => "!!",
    };

    let _ = writeln!(out, "[{}] {} {}", name, mark, status.text);
}
