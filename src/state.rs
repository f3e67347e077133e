use std::collections::HashMap;

use crate::map_sys::LatLng;
use crate::task::ActionKind;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Unverified,
    Verifying,
    Verified,
    // The last attempt never got an answer from the server.
    Failed,
}


#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLocation {
    pub at: LatLng,
    pub address: Option<String>,
}


// Everything the handlers share that is not visible on the page.
// Rebuilt from scratch on every navigation.
#[derive(Debug)]
pub struct UiState {
    verification: Verification,
    selected: Option<SelectedLocation>,
    in_flight: HashMap<ActionKind, usize>,
}

impl UiState {
    pub fn new() -> Self {
        UiState {
            verification: Verification::Unverified,
            selected: None,
            in_flight: HashMap::new(),
        }
    }

    pub fn verification(&self) -> Verification {
        self.verification
    }

    pub fn set_verification(&mut self, verification: Verification) {
        self.verification = verification;
    }

    pub fn selected(&self) -> Option<&SelectedLocation> {
        self.selected.as_ref()
    }

    pub fn select_location(&mut self, at: LatLng) {
        self.selected = Some(SelectedLocation {
            at,
            address: None,
        });
    }

    pub fn is_selected(&self, at: LatLng) -> bool {
        self.selected.as_ref().map_or(false, |s| s.at == at)
    }

    pub fn set_address(&mut self, address: String) {
        if let Some(selected) = self.selected.as_mut() {
            selected.address = Some(address);
        }
    }

    pub fn is_in_flight(&self, kind: ActionKind) -> bool {
        self.in_flight.get(&kind).map_or(false, |&cnt| cnt > 0)
    }

    pub fn mark_in_flight(&mut self, kind: ActionKind) {
        *self.in_flight.entry(kind).or_insert(0) += 1;
    }

    pub fn finish_in_flight(&mut self, kind: ActionKind) {
        if let Some(cnt) = self.in_flight.get_mut(&kind) {
            *cnt = cnt.saturating_sub(1);
            if *cnt == 0 {
                self.in_flight.remove(&kind);
            }
        }
    }
}
