use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    config::Config,
    models::{ServiceRecord, StaffRecord},
    reports::ReportCalendar,
    session::Sessions,
    store::{seed_logs, seed_services, seed_staff, Collection, LogStore},
};

/// The salon's records, shared by every session.
#[derive(Debug)]
pub struct Salon {
    pub services: Collection<ServiceRecord>,
    pub staff: Collection<StaffRecord>,
    pub logs: LogStore,
}

impl Salon {
    pub fn seeded() -> Self {
        Self {
            services: seed_services(),
            staff: seed_staff(),
            logs: seed_logs(),
        }
    }

    pub fn service_price(&self, name: &str) -> Option<&str> {
        self.services
            .records()
            .iter()
            .find(|service| service.name == name)
            .map(|service| service.price.as_str())
    }
}

/// Lock order: `sessions` before `salon`.
#[derive(Clone)]
pub struct AppState {
    pub salon: Arc<Mutex<Salon>>,
    pub sessions: Arc<Mutex<Sessions>>,
    pub calendar: ReportCalendar,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            salon: Arc::new(Mutex::new(Salon::seeded())),
            sessions: Arc::new(Mutex::new(Sessions::default())),
            calendar: ReportCalendar::new(config.today),
            secure_cookies: config.secure_cookies,
        }
    }
}
