/// Top-level screen. Starts at `Landing` and has no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Landing,
    StaffLogin,
    StaffDashboard,
    AdminLogin,
    AdminDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    OpenStaffLogin,
    OpenAdminLogin,
    LoginAsStaff,
    LoginAsAdmin,
    Logout,
}

impl ViewState {
    /// Login triggers are accepted from any state and never look at
    /// credentials: logging in is navigation, not authentication.
    pub fn transition(self, trigger: Trigger) -> ViewState {
        let next = match trigger {
            Trigger::OpenStaffLogin => ViewState::StaffLogin,
            Trigger::OpenAdminLogin => ViewState::AdminLogin,
            Trigger::LoginAsStaff => ViewState::StaffDashboard,
            Trigger::LoginAsAdmin => ViewState::AdminDashboard,
            Trigger::Logout => ViewState::Landing,
        };
        log::debug!("view {:?} --{:?}--> {:?}", self, trigger, next);
        next
    }

    pub fn is_staff(self) -> bool {
        self == ViewState::StaffDashboard
    }

    pub fn is_admin(self) -> bool {
        self == ViewState::AdminDashboard
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminPage {
    #[default]
    Dashboard,
    Services,
    Staff,
    Logs,
    Analytics,
}

impl AdminPage {
    pub const ALL: [AdminPage; 5] = [
        AdminPage::Dashboard,
        AdminPage::Services,
        AdminPage::Staff,
        AdminPage::Logs,
        AdminPage::Analytics,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            AdminPage::Dashboard => "dashboard",
            AdminPage::Services => "services",
            AdminPage::Staff => "staff",
            AdminPage::Logs => "logs",
            AdminPage::Analytics => "analytics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminPage::Dashboard => "Dashboard",
            AdminPage::Services => "Services",
            AdminPage::Staff => "Staff",
            AdminPage::Logs => "Logs",
            AdminPage::Analytics => "Analytics",
        }
    }

    /// Unrecognised input falls back to the dashboard.
    pub fn from_slug(slug: &str) -> AdminPage {
        AdminPage::ALL
            .into_iter()
            .find(|page| page.slug() == slug.trim())
            .unwrap_or_default()
    }
}

/// Sidebar selection inside the admin shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminRouter {
    page: AdminPage,
}

impl AdminRouter {
    pub fn page(&self) -> AdminPage {
        self.page
    }

    pub fn select_page(&mut self, page: AdminPage) {
        self.page = page;
    }
}
