use crate::models::{LogEntry, Record, RecordId, ServiceRecord, StaffRecord, StaffStatus};

/// Ordered in-memory arena keyed by record id.
///
/// Insertion order is display order. Ids stay unique because a new id is
/// always one past the current maximum.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// `max(id) + 1`, starting at 1 for an empty collection.
    pub fn next_id(&self) -> RecordId {
        self.records
            .iter()
            .map(Record::id)
            .max()
            .map_or(1, |max| max + 1)
    }

    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> RecordId {
        let id = self.next_id();
        self.records.push(build(id));
        id
    }

    /// Returns false when no record has this id.
    pub fn update(&mut self, id: RecordId, apply: impl FnOnce(&mut T)) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                apply(record);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }
}

/// Append-only history of rendered services, read by the admin reports.
#[derive(Debug, Clone, Default)]
pub struct LogStore {
    entries: Collection<LogEntry>,
}

pub struct NewLogEntry {
    pub date: String,
    pub staff: String,
    pub client: String,
    pub services: Vec<String>,
    pub total: String,
    pub note: Option<String>,
}

impl LogStore {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries: Collection::new(entries),
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        self.entries.records()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn append(&mut self, entry: NewLogEntry) -> RecordId {
        let id = self.entries.insert_with(|id| LogEntry {
            id,
            date: entry.date,
            staff: entry.staff,
            client: entry.client,
            services: entry.services,
            total: entry.total,
            note: entry.note,
        });
        log::info!("Log entry {id} recorded");
        id
    }
}

pub fn seed_services() -> Collection<ServiceRecord> {
    let services = [
        ("Nail Polish", "₦8,000"),
        ("Gel Manicure", "₦15,000"),
        ("Pedicure", "₦10,000"),
        ("Lash Extension", "₦25,000"),
        ("Lash Lift", "₦18,000"),
        ("Eyebrow Shaping", "₦5,000"),
        ("Waxing - Full Body", "₦20,000"),
        ("Waxing - Half Body", "₦12,000"),
        ("Facial Treatment", "₦22,000"),
        ("Massage Therapy", "₦30,000"),
    ];

    Collection::new(
        services
            .into_iter()
            .zip(1..)
            .map(|((name, price), id)| ServiceRecord {
                id,
                name: name.to_string(),
                price: price.to_string(),
            })
            .collect(),
    )
}

pub fn seed_staff() -> Collection<StaffRecord> {
    let staff = [
        ("Ada Okonkwo", "ada@glowtrack.com", "Senior Technician", StaffStatus::Active),
        ("Ruth Ezeh", "ruth@glowtrack.com", "Beautician", StaffStatus::Active),
        ("Chioma Nwosu", "chioma@glowtrack.com", "Massage Therapist", StaffStatus::Active),
        ("Grace Adeyemi", "grace@glowtrack.com", "Nail Technician", StaffStatus::Active),
        ("Blessing Okeke", "blessing@glowtrack.com", "Beautician", StaffStatus::Inactive),
    ];

    Collection::new(
        staff
            .into_iter()
            .zip(1..)
            .map(|((name, email, role, status), id)| StaffRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                role: role.to_string(),
                status,
            })
            .collect(),
    )
}

pub fn seed_logs() -> LogStore {
    let logs: [(&str, &str, &str, &[&str], &str); 10] = [
        ("Oct 22, 2025", "Ada Okonkwo", "Mrs. Johnson", &["Nail Polish", "Pedicure"], "₦18,000"),
        ("Oct 22, 2025", "Ruth Ezeh", "Sarah Williams", &["Lash Extension"], "₦25,000"),
        ("Oct 22, 2025", "Chioma Nwosu", "Jessica Brown", &["Facial Treatment", "Massage"], "₦52,000"),
        ("Oct 22, 2025", "Ada Okonkwo", "Emily Davis", &["Gel Manicure"], "₦15,000"),
        ("Oct 22, 2025", "Ruth Ezeh", "Jennifer Wilson", &["Waxing - Full Body"], "₦20,000"),
        ("Oct 21, 2025", "Grace Adeyemi", "Amanda Lee", &["Nail Polish"], "₦8,000"),
        ("Oct 21, 2025", "Chioma Nwosu", "Michelle Taylor", &["Massage Therapy"], "₦30,000"),
        ("Oct 21, 2025", "Ada Okonkwo", "Rebecca Moore", &["Lash Lift", "Eyebrow Shaping"], "₦23,000"),
        ("Oct 20, 2025", "Ruth Ezeh", "Ashley Martin", &["Facial Treatment"], "₦22,000"),
        ("Oct 20, 2025", "Grace Adeyemi", "Sophia Garcia", &["Gel Manicure", "Pedicure"], "₦25,000"),
    ];

    LogStore::new(
        logs.into_iter()
            .zip(1..)
            .map(|((date, staff, client, services, total), id)| LogEntry {
                id,
                date: date.to_string(),
                staff: staff.to_string(),
                client: client.to_string(),
                services: services.iter().map(|s| s.to_string()).collect(),
                total: total.to_string(),
                note: None,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: RecordId, name: &str) -> ServiceRecord {
        ServiceRecord {
            id,
            name: name.to_string(),
            price: "₦1,000".to_string(),
        }
    }

    #[test]
    fn empty_collection_starts_ids_at_one() {
        let mut services: Collection<ServiceRecord> = Collection::default();
        let id = services.insert_with(|id| service(id, "Pedicure"));
        assert_eq!(id, 1);
        assert_eq!(services.records()[0].id, 1);
    }

    #[test]
    fn next_id_follows_current_max_not_length() {
        let services = Collection::new(vec![service(3, "a"), service(7, "b")]);
        assert_eq!(services.next_id(), 8);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut services = seed_services();
        assert!(services.remove(999).is_none());
        assert_eq!(services.len(), 10);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut services = seed_services();
        services.remove(2);
        let ids: Vec<_> = services.records().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn update_reports_missing_record() {
        let mut staff = seed_staff();
        assert!(!staff.update(42, |record| record.name.clear()));
        assert!(staff.update(1, |record| record.role = "Manager".to_string()));
        assert_eq!(staff.get(1).map(|s| s.role.as_str()), Some("Manager"));
    }

    #[test]
    fn log_store_appends_after_samples() {
        let mut logs = seed_logs();
        let id = logs.append(NewLogEntry {
            date: "Oct 22, 2025".to_string(),
            staff: "Ada Okonkwo".to_string(),
            client: "Kemi".to_string(),
            services: vec!["Pedicure".to_string()],
            total: "₦10,000".to_string(),
            note: None,
        });
        assert_eq!(id, 11);
        assert_eq!(logs.entries().last().map(|e| e.client.as_str()), Some("Kemi"));
    }
}
