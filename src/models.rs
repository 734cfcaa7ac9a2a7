use serde::Serialize;

pub type RecordId = u32;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Anything stored in an id-keyed collection.
pub trait Record {
    fn id(&self) -> RecordId;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    pub id: RecordId,
    pub name: String,
    pub price: String,
}

impl Record for ServiceRecord {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StaffStatus {
    Active,
    Inactive,
}

impl StaffStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StaffStatus::Active => STATUS_ACTIVE,
            StaffStatus::Inactive => STATUS_INACTIVE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            StaffStatus::Active => StaffStatus::Inactive,
            StaffStatus::Inactive => StaffStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffRecord {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: StaffStatus,
}

impl Record for StaffRecord {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// One rendered visit: who served whom, which services, for how much.
///
/// Services are stored by name. Removing a service from the catalog does not
/// touch historical entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: RecordId,
    pub date: String,
    pub staff: String,
    pub client: String,
    pub services: Vec<String>,
    pub total: String,
    pub note: Option<String>,
}

impl Record for LogEntry {
    fn id(&self) -> RecordId {
        self.id
    }
}
