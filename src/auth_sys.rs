use crate::api::{
    ApiResult,
    models::{Credentials, MessageBody, PasswordReset},
};
use crate::page::{Page, Route, StatusText};
use crate::task::{Effect, Request};


pub const AUTH_SERVER_ERROR: &'static str = "Could not reach the server. Please try again.";
const MIN_PASSWORD_LEN: usize = 6;


fn verify_credentials(email: &str, password: &str) -> Option<&'static str> {
    if email.is_empty() || password.is_empty() {
        Some("Email and password are required.")
    }
    else if email.find('@').is_none() || email.find('.').is_none() {
        Some("Please enter a valid email address.")
    }
    else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters.")
    }
    else {
        None
    }
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Credentials {
            email: email.trim().to_owned(),
            password: password.trim().to_owned(),
        }
    }

    pub fn verify_error(&self) -> Option<&'static str> {
        verify_credentials(&self.email, &self.password)
    }
}

impl PasswordReset {
    pub fn new(email: &str, new_password: &str) -> Self {
        PasswordReset {
            email: email.trim().to_owned(),
            new_password: new_password.trim().to_owned(),
        }
    }

    pub fn verify_error(&self) -> Option<&'static str> {
        verify_credentials(&self.email, &self.new_password)
    }
}


fn reject(page: &mut Page, err: &str) -> Vec<Effect> {
    page.auth_status = StatusText::error(err);
    Vec::new()
}

fn show_transport_error(page: &mut Page, action: &str, err: &dyn std::fmt::Display) {
    error!("{} failed: {}", action, err);
    page.auth_status = StatusText::error(AUTH_SERVER_ERROR);
}


pub fn submit_register(page: &mut Page, credentials: Credentials) -> Vec<Effect> {
    if let Some(err) = credentials.verify_error() {
        return reject(page, err);
    }

    vec![Effect::Send(Request::Register(credentials))]
}

pub fn on_registered(page: &mut Page, result: ApiResult<MessageBody>) -> Vec<Effect> {
    match result {
        Ok(reply) => {
            page.auth_status = StatusText::from_reply(reply.is_ok(), &reply.body.message);
        },
        Err(err) => show_transport_error(page, "Register", &err),
    }

    Vec::new()
}

pub fn submit_login(page: &mut Page, credentials: Credentials) -> Vec<Effect> {
    if let Some(err) = credentials.verify_error() {
        return reject(page, err);
    }

    vec![Effect::Send(Request::Login(credentials))]
}

pub fn on_logged_in(page: &mut Page, result: ApiResult<MessageBody>) -> Vec<Effect> {
    match result {
        Ok(ref reply) if reply.is_ok() => {
            info!("Logged in");
            vec![Effect::Navigate(Route::Home, Some(StatusText::success(&reply.body.message)))]
        },
        Ok(reply) => {
            page.auth_status = StatusText::error(&reply.body.message);
            Vec::new()
        },
        Err(err) => {
            show_transport_error(page, "Login", &err);
            Vec::new()
        },
    }
}

pub fn submit_logout() -> Vec<Effect> {
    vec![Effect::Send(Request::Logout)]
}

// Any answer from the server ends the session on this side.
pub fn on_logged_out(page: &mut Page, result: ApiResult<MessageBody>) -> Vec<Effect> {
    match result {
        Ok(reply) => {
            info!("Logged out ({})", reply.status);
            let flash = StatusText::from_reply(reply.is_ok(), &reply.body.message);
            vec![Effect::Navigate(Route::Login, Some(flash))]
        },
        Err(err) => {
            show_transport_error(page, "Logout", &err);
            Vec::new()
        },
    }
}

pub fn submit_reset(page: &mut Page, reset: PasswordReset) -> Vec<Effect> {
    if let Some(err) = reset.verify_error() {
        return reject(page, err);
    }

    vec![Effect::Send(Request::ResetPassword(reset))]
}

pub fn on_reset(page: &mut Page, result: ApiResult<MessageBody>) -> Vec<Effect> {
    match result {
        Ok(ref reply) if reply.is_ok() => {
            vec![Effect::Navigate(Route::Login, Some(StatusText::success(&reply.body.message)))]
        },
        Ok(reply) => {
            page.auth_status = StatusText::error(&reply.body.message);
            Vec::new()
        },
        Err(err) => {
            show_transport_error(page, "Password reset", &err);
            Vec::new()
        },
    }
}
