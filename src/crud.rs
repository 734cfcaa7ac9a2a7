use serde::Deserialize;

use crate::{
    error::{
        missing_fields, ValidationError, MSG_FILL_ALL_FIELDS, MSG_FILL_REQUIRED_FIELDS,
        MSG_PASSWORD_REQUIRED,
    },
    models::{Record, RecordId, ServiceRecord, StaffRecord, StaffStatus},
    notify::Notifier,
    store::Collection,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogMode {
    #[default]
    Closed,
    Create,
    Edit(RecordId),
}

/// Field values behind a create/edit dialog for one record kind.
pub trait EditForm: Default + Clone {
    type Record: Record;

    /// Singular noun used in notifications, e.g. "Service".
    const NOUN: &'static str;

    fn from_record(record: &Self::Record) -> Self;

    fn validate(&self, mode: DialogMode) -> Result<(), ValidationError>;

    fn build(&self, id: RecordId) -> Self::Record;

    /// Overwrites mutable fields only; the id never changes.
    fn apply(&self, record: &mut Self::Record);
}

#[derive(Debug, Clone, Default)]
pub struct Editor<F> {
    mode: DialogMode,
    form: F,
}

impl<F: EditForm> Editor<F> {
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != DialogMode::Closed
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Mirrors user input into the dialog without saving.
    pub fn set_form(&mut self, form: F) {
        self.form = form;
    }

    pub fn open_create_dialog(&mut self) {
        self.form = F::default();
        self.mode = DialogMode::Create;
    }

    pub fn open_edit_dialog(&mut self, record: &F::Record) {
        self.form = F::from_record(record);
        self.mode = DialogMode::Edit(record.id());
    }

    pub fn close(&mut self) {
        self.form = F::default();
        self.mode = DialogMode::Closed;
    }

    /// Validation failures leave both the collection and the dialog as they
    /// were.
    pub fn save(
        &mut self,
        collection: &mut Collection<F::Record>,
        notifier: &mut impl Notifier,
    ) -> Result<Option<RecordId>, ValidationError> {
        if let Err(err) = self.form.validate(self.mode) {
            notifier.rejected(&err);
            return Err(err);
        }

        let saved = match self.mode {
            DialogMode::Closed => None,
            DialogMode::Edit(id) => {
                let form = &self.form;
                if collection.update(id, |record| form.apply(record)) {
                    notifier.success(&format!("{} updated successfully", F::NOUN), None);
                    Some(id)
                } else {
                    notifier.error(&format!("{} no longer exists", F::NOUN), None);
                    None
                }
            }
            DialogMode::Create => {
                let form = &self.form;
                let id = collection.insert_with(|id| form.build(id));
                notifier.success(&format!("{} added successfully", F::NOUN), None);
                Some(id)
            }
        };

        self.close();
        Ok(saved)
    }
}

/// Removing an id that is not present is a silent no-op.
pub fn delete<T: Record>(
    collection: &mut Collection<T>,
    id: RecordId,
    noun: &str,
    notifier: &mut impl Notifier,
) -> bool {
    match collection.remove(id) {
        Some(_) => {
            notifier.success(&format!("{noun} deleted successfully"), None);
            true
        }
        None => {
            log::debug!("{noun} {id} already gone");
            false
        }
    }
}

pub fn toggle_status(
    staff: &mut Collection<StaffRecord>,
    id: RecordId,
    notifier: &mut impl Notifier,
) -> Option<StaffStatus> {
    let mut toggled = None;
    staff.update(id, |record| {
        record.status = record.status.toggled();
        toggled = Some(record.status);
    });
    if toggled.is_some() {
        notifier.success("Staff status updated", None);
    }
    toggled
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

impl EditForm for ServiceForm {
    type Record = ServiceRecord;
    const NOUN: &'static str = "Service";

    fn from_record(record: &ServiceRecord) -> Self {
        Self {
            name: record.name.clone(),
            price: record.price.clone(),
        }
    }

    fn validate(&self, _mode: DialogMode) -> Result<(), ValidationError> {
        let missing = missing_fields(&[
            ("name", self.name.as_str()),
            ("price", self.price.as_str()),
        ]);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(MSG_FILL_ALL_FIELDS, missing))
        }
    }

    fn build(&self, id: RecordId) -> ServiceRecord {
        ServiceRecord {
            id,
            name: self.name.trim().to_string(),
            price: self.price.trim().to_string(),
        }
    }

    fn apply(&self, record: &mut ServiceRecord) {
        record.name = self.name.trim().to_string();
        record.price = self.price.trim().to_string();
    }
}

/// The password is only checked for presence on create and is never stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub password: String,
}

impl EditForm for StaffForm {
    type Record = StaffRecord;
    const NOUN: &'static str = "Staff";

    fn from_record(record: &StaffRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.clone(),
            password: String::new(),
        }
    }

    fn validate(&self, mode: DialogMode) -> Result<(), ValidationError> {
        let missing = missing_fields(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("role", self.role.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(ValidationError::new(MSG_FILL_REQUIRED_FIELDS, missing));
        }
        if mode == DialogMode::Create && self.password.trim().is_empty() {
            return Err(ValidationError::new(MSG_PASSWORD_REQUIRED, vec!["password"]));
        }
        Ok(())
    }

    fn build(&self, id: RecordId) -> StaffRecord {
        StaffRecord {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.trim().to_string(),
            status: StaffStatus::Active,
        }
    }

    fn apply(&self, record: &mut StaffRecord) {
        record.name = self.name.trim().to_string();
        record.email = self.email.trim().to_string();
        record.role = self.role.trim().to_string();
    }
}
