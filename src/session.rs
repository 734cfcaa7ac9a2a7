use std::collections::HashMap;

use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    HttpRequest,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    crud::{Editor, ServiceForm, StaffForm},
    dashboard::DashboardRange,
    log_form::LogForm,
    navigation::{AdminRouter, Trigger, ViewState},
    notify::Toasts,
    reports::LogFilters,
};

pub const SESSION_COOKIE: &str = "glowtrack_session";

/// Lifetime of the session cookie; sessions idle longer are dropped.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Everything one visitor sees: current screen, open dialogs, drafts,
/// filters and pending toasts.
#[derive(Debug, Default)]
pub struct Session {
    pub view: ViewState,
    pub admin: AdminRouter,
    /// Whatever was typed into the login form. Never checked.
    pub identity: Option<String>,
    pub service_editor: Editor<ServiceForm>,
    pub staff_editor: Editor<StaffForm>,
    pub log_form: LogForm,
    pub log_filters: LogFilters,
    pub dashboard_range: DashboardRange,
    pub toasts: Toasts,
}

impl Session {
    /// Leaving a screen discards the state it owned; toasts survive so the
    /// next screen can show them.
    pub fn apply(&mut self, trigger: Trigger) {
        let next = self.view.transition(trigger);
        if next != self.view {
            let toasts = std::mem::take(&mut self.toasts);
            let identity = match trigger {
                Trigger::Logout => None,
                _ => self.identity.take(),
            };
            *self = Session {
                view: next,
                identity,
                toasts,
                ..Session::default()
            };
        }
    }

    pub fn login(&mut self, trigger: Trigger, identity: &str) {
        self.apply(trigger);
        let identity = identity.trim();
        self.identity = (!identity.is_empty()).then(|| identity.to_string());
    }
}

#[derive(Debug)]
struct Tracked {
    session: Session,
    last_seen: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Sessions {
    by_id: HashMap<String, Tracked>,
}

impl Sessions {
    /// Looks up the caller's session, starting a fresh one when the cookie is
    /// missing, unknown or idle past the cookie lifetime. The second value is
    /// the id to set as a cookie when a new session was started.
    pub fn resolve(&mut self, req: &HttpRequest) -> (&mut Session, Option<String>) {
        self.resolve_at(req, Utc::now())
    }

    fn resolve_at(
        &mut self,
        req: &HttpRequest,
        now: DateTime<Utc>,
    ) -> (&mut Session, Option<String>) {
        self.evict_idle(now);

        let known = req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|id| self.by_id.contains_key(id));

        let (id, issued) = match known {
            Some(id) => (id, None),
            None => {
                let id = new_id();
                log::debug!("Starting session {id}");
                (id.clone(), Some(id))
            }
        };
        let tracked = self.by_id.entry(id).or_insert_with(|| Tracked {
            session: Session::default(),
            last_seen: now,
        });
        tracked.last_seen = now;
        (&mut tracked.session, issued)
    }

    fn evict_idle(&mut self, now: DateTime<Utc>) {
        let ttl = chrono::Duration::hours(SESSION_TTL_HOURS);
        let before = self.by_id.len();
        self.by_id.retain(|_, tracked| now - tracked.last_seen <= ttl);
        let evicted = before - self.by_id.len();
        if evicted > 0 {
            log::debug!("Evicted {evicted} idle session(s)");
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn session_cookie(req: &HttpRequest, id: String, force_secure: bool) -> Cookie<'static> {
    let mut builder = Cookie::build(SESSION_COOKIE, id)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(SESSION_TTL_HOURS));
    if force_secure || req.connection_info().scheme() == "https" {
        builder = builder.secure(true);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;
    use crate::navigation::AdminPage;
    use crate::notify::Notifier;

    #[test]
    fn logout_discards_screen_state_but_keeps_toasts() {
        let mut session = Session::default();
        session.login(Trigger::LoginAsAdmin, "admin@glowtrack.com");
        session.admin.select_page(AdminPage::Logs);
        session.service_editor.open_create_dialog();
        session.toasts.success("Service deleted successfully", None);

        session.apply(Trigger::Logout);

        assert_eq!(session.view, ViewState::Landing);
        assert_eq!(session.admin.page(), AdminPage::Dashboard);
        assert!(!session.service_editor.is_open());
        assert!(session.identity.is_none());
        assert_eq!(session.toasts.len(), 1);
    }

    #[test]
    fn login_records_identity_without_checking_it() {
        let mut session = Session::default();
        session.apply(Trigger::OpenStaffLogin);
        session.login(Trigger::LoginAsStaff, "  ada@glowtrack.com ");
        assert_eq!(session.view, ViewState::StaffDashboard);
        assert_eq!(session.identity.as_deref(), Some("ada@glowtrack.com"));

        let mut anonymous = Session::default();
        anonymous.login(Trigger::LoginAsStaff, "");
        assert!(anonymous.view.is_staff());
        assert!(anonymous.identity.is_none());
    }

    #[test]
    fn resolve_reuses_known_cookie_and_replaces_unknown() {
        let mut sessions = Sessions::default();

        let first = TestRequest::default().to_http_request();
        let (_, issued) = sessions.resolve(&first);
        let id = issued.unwrap();

        let again = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, id.clone()))
            .to_http_request();
        let (_, reissued) = sessions.resolve(&again);
        assert!(reissued.is_none());

        let stale = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "forged"))
            .to_http_request();
        let (_, replacement) = sessions.resolve(&stale);
        assert!(replacement.is_some());
        assert_ne!(replacement.as_deref(), Some("forged"));
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn idle_sessions_are_evicted_after_cookie_lifetime() {
        let mut sessions = Sessions::default();
        let start = Utc::now();

        let stale = TestRequest::default().to_http_request();
        let (_, stale_id) = sessions.resolve_at(&stale, start);
        let stale_id = stale_id.unwrap();
        let (_, kept_id) = sessions.resolve_at(&stale, start);
        let kept_id = kept_id.unwrap();

        // Only the second session is used again within the lifetime.
        let later = start + chrono::Duration::hours(SESSION_TTL_HOURS - 1);
        let kept = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, kept_id.clone()))
            .to_http_request();
        let (_, reissued) = sessions.resolve_at(&kept, later);
        assert!(reissued.is_none());

        let past_ttl = start + chrono::Duration::hours(SESSION_TTL_HOURS + 1);
        let returning = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, stale_id.clone()))
            .to_http_request();
        let (session, replacement) = sessions.resolve_at(&returning, past_ttl);
        assert_eq!(session.view, ViewState::Landing);
        assert!(replacement.is_some());
        assert_ne!(replacement.as_deref(), Some(stale_id.as_str()));
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn cookieless_requests_do_not_accumulate_forever() {
        let mut sessions = Sessions::default();
        let start = Utc::now();
        let req = TestRequest::default().to_http_request();
        for _ in 0..1000 {
            sessions.resolve_at(&req, start);
        }
        assert_eq!(sessions.len(), 1000);

        let next_day = start + chrono::Duration::hours(SESSION_TTL_HOURS + 1);
        sessions.resolve_at(&req, next_day);
        assert_eq!(sessions.len(), 1);
    }
}
