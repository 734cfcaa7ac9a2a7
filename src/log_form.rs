use std::collections::BTreeSet;

use crate::{
    error::{missing_fields, ValidationError, MSG_FILL_REQUIRED_FIELDS},
    notify::Notifier,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceLogDraft {
    pub client_name: String,
    pub selected_services: BTreeSet<String>,
    pub note: String,
}

/// A draft that passed validation. The form does not store it anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedVisit {
    pub client_name: String,
    pub services: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug, Default)]
pub struct LogForm {
    draft: ServiceLogDraft,
}

impl LogForm {
    pub fn draft(&self) -> &ServiceLogDraft {
        &self.draft
    }

    pub fn set_client_name(&mut self, client_name: impl Into<String>) {
        self.draft.client_name = client_name.into();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.draft.note = note.into();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.draft.selected_services.contains(name)
    }

    /// Adds `name` when absent, removes it when present.
    pub fn toggle_service(&mut self, name: &str) {
        if !self.draft.selected_services.remove(name) {
            self.draft.selected_services.insert(name.to_string());
        }
    }

    pub fn submit(&mut self, notifier: &mut impl Notifier) -> Result<LoggedVisit, ValidationError> {
        let mut missing = missing_fields(&[("client name", self.draft.client_name.as_str())]);
        if self.draft.selected_services.is_empty() {
            missing.push("services");
        }
        if !missing.is_empty() {
            let err = ValidationError::new(MSG_FILL_REQUIRED_FIELDS, missing);
            notifier.rejected(&err);
            return Err(err);
        }

        let draft = std::mem::take(&mut self.draft);
        let client_name = draft.client_name.trim().to_string();
        let services: Vec<String> = draft.selected_services.into_iter().collect();
        let note = Some(draft.note.trim().to_string()).filter(|note| !note.is_empty());

        notifier.success(
            "Service logged successfully ✨",
            Some(format!("{} service(s) recorded for {}", services.len(), client_name)),
        );

        Ok(LoggedVisit {
            client_name,
            services,
            note,
        })
    }
}
