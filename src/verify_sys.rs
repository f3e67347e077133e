use crate::api::{
    ApiResult,
    models::{IdentityDocuments, VerifyBody},
};
use crate::error::ClientError;
use crate::page::{Page, StatusText};
use crate::state::{UiState, Verification};
use crate::task::{Effect, Request};


pub const VERIFYING: &'static str = "Verifying…";
pub const VERIFY_SERVER_ERROR: &'static str = "Server error during verification.";
pub const VERIFY_FILE_ERROR: &'static str = "Could not read the identity documents. Please choose them again.";


pub fn submit_verification(page: &mut Page, state: &mut UiState,
    documents: IdentityDocuments) -> Vec<Effect> {

    if state.verification() == Verification::Verified {
        warn!("Already verified");
        return Vec::new();
    }

    state.set_verification(Verification::Verifying);
    page.verify_status = StatusText::neutral(VERIFYING);

    vec![Effect::Send(Request::Verify(documents))]
}

pub fn on_verification(page: &mut Page, state: &mut UiState, result: ApiResult<VerifyBody>) {
    if state.verification() == Verification::Verified {
        debug!("Ignore verification answer after success");
        return;
    }

    match result {
        Ok(reply) => {
            if reply.is_ok() && reply.body.is_verified() {
                info!("Identity verified");

                state.set_verification(Verification::Verified);
                page.verify_status = StatusText::success(&reply.body.message);
                page.verify_form_visible = false;
                page.report_form_visible = true;
            }
            else {
                info!("Identity not verified ({}, {:?})", reply.status, reply.body.status);

                state.set_verification(Verification::Unverified);
                page.verify_status = StatusText::error(&reply.body.message);
                page.verify_form_visible = true;
                page.report_form_visible = false;
            }
        },
        // Unreadable local files never reached the server.
        Err(ClientError::Io(err)) => {
            warn!("Identity documents unreadable: {}", err);

            state.set_verification(Verification::Unverified);
            page.verify_status = StatusText::error(VERIFY_FILE_ERROR);
            page.verify_form_visible = true;
            page.report_form_visible = false;
        },
        Err(err) => {
            error!("Verification failed: {}", err);

            state.set_verification(Verification::Failed);
            page.verify_status = StatusText::error(VERIFY_SERVER_ERROR);
            page.verify_form_visible = true;
            page.report_form_visible = false;
        },
    }
}
