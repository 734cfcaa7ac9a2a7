use actix_web::{cookie::Cookie, web, HttpRequest, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    navigation::{Trigger, ViewState},
    routes::{
        act_and_return,
        admin::{self, AdminScreen},
        staff::{self, StaffLogTemplate},
    },
    session::session_cookie,
    state::AppState,
    templates::{render, toast_views, ToastView},
};

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    toasts: Vec<ToastView>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    toasts: Vec<ToastView>,
    portal: &'static str,
    heading: &'static str,
    subheading: &'static str,
    action: &'static str,
    placeholder: &'static str,
}

impl LoginTemplate {
    fn staff(toasts: Vec<ToastView>) -> Self {
        Self {
            toasts,
            portal: "Spa Portal",
            heading: "Welcome Back",
            subheading: "Sign in to log services for your clients",
            action: "/login/staff",
            placeholder: "Enter your email or phone",
        }
    }

    fn admin(toasts: Vec<ToastView>) -> Self {
        Self {
            toasts,
            portal: "Admin Portal",
            heading: "Admin Access",
            subheading: "Sign in to manage staff, services and reports",
            action: "/login/admin",
            placeholder: "admin@glowtrack.com",
        }
    }
}

/// One variant per top-level screen, built while the locks are held and
/// rendered after they are released.
enum Screen {
    Landing(LandingTemplate),
    Login(LoginTemplate),
    Staff(StaffLogTemplate),
    Admin(AdminScreen),
}

impl Screen {
    fn render(self, cookie: Option<Cookie<'static>>) -> HttpResponse {
        match self {
            Screen::Landing(page) => render(page, cookie),
            Screen::Login(page) => render(page, cookie),
            Screen::Staff(page) => render(page, cookie),
            Screen::Admin(AdminScreen::Dashboard(page)) => render(page, cookie),
            Screen::Admin(AdminScreen::Services(page)) => render(page, cookie),
            Screen::Admin(AdminScreen::Staff(page)) => render(page, cookie),
            Screen::Admin(AdminScreen::Logs(page)) => render(page, cookie),
            Screen::Admin(AdminScreen::Analytics(page)) => render(page, cookie),
        }
    }
}

/// Credentials are captured but never verified.
#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    #[allow(dead_code)]
    password: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/view/staff-login").route(web::post().to(open_staff_login)))
        .service(web::resource("/view/admin-login").route(web::post().to(open_admin_login)))
        .service(web::resource("/view/back").route(web::post().to(back)))
        .service(web::resource("/login/staff").route(web::post().to(login_staff)))
        .service(web::resource("/login/admin").route(web::post().to(login_admin)))
        .service(web::resource("/logout").route(web::post().to(logout)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// The view switch: whatever screen the session is on is rendered here.
async fn index(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let (screen, issued) = {
        let mut sessions = state.sessions.lock();
        let (session, issued) = sessions.resolve(&req);
        let toasts = toast_views(session.toasts.drain());
        let screen = match session.view {
            ViewState::Landing => Screen::Landing(LandingTemplate { toasts }),
            ViewState::StaffLogin => Screen::Login(LoginTemplate::staff(toasts)),
            ViewState::AdminLogin => Screen::Login(LoginTemplate::admin(toasts)),
            ViewState::StaffDashboard => {
                let salon = state.salon.lock();
                Screen::Staff(staff::dashboard_page(session, &salon, toasts))
            }
            ViewState::AdminDashboard => {
                let salon = state.salon.lock();
                Screen::Admin(admin::shell_page(session, &salon, &state.calendar, toasts))
            }
        };
        (screen, issued)
    };

    let cookie = issued.map(|id| session_cookie(&req, id, state.secure_cookies));
    screen.render(cookie)
}

async fn open_staff_login(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    act_and_return(&state, &req, |session, _| session.apply(Trigger::OpenStaffLogin))
}

async fn open_admin_login(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    act_and_return(&state, &req, |session, _| session.apply(Trigger::OpenAdminLogin))
}

async fn back(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    act_and_return(&state, &req, |session, _| session.apply(Trigger::Logout))
}

async fn login_staff(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    act_and_return(&state, &req, |session, _| {
        session.login(Trigger::LoginAsStaff, &form.identifier)
    })
}

async fn login_admin(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    act_and_return(&state, &req, |session, _| {
        session.login(Trigger::LoginAsAdmin, &form.identifier)
    })
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    act_and_return(&state, &req, |session, _| session.apply(Trigger::Logout))
}

#[cfg(test)]
mod tests {
    use actix_web::{cookie::Cookie, http::StatusCode, test, web, App};

    use super::*;
    use crate::{config::Config, routes, session::SESSION_COOKIE};

    fn state() -> AppState {
        AppState::new(&Config::from_lookup(|_| None).unwrap())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(routes::public::configure)
                    .configure(routes::staff::configure)
                    .configure(routes::admin::configure),
            )
            .await
        };
    }

    macro_rules! post {
        ($app:expr, $cookie:expr, $uri:expr) => {{
            let req = test::TestRequest::post()
                .uri($uri)
                .cookie($cookie.clone())
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "POST {}", $uri);
        }};
        ($app:expr, $cookie:expr, $uri:expr, $form:expr) => {{
            let req = test::TestRequest::post()
                .uri($uri)
                .cookie($cookie.clone())
                .set_form($form)
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "POST {}", $uri);
        }};
    }

    macro_rules! page {
        ($app:expr, $cookie:expr) => {{
            let req = test::TestRequest::get()
                .uri("/")
                .cookie($cookie.clone())
                .to_request();
            let body = test::call_and_read_body(&$app, req).await;
            String::from_utf8(body.to_vec()).unwrap()
        }};
    }

    macro_rules! visit {
        ($app:expr) => {{
            let req = test::TestRequest::get().uri("/").to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let cookie: Cookie<'static> = resp
                .response()
                .cookies()
                .find(|cookie| cookie.name() == SESSION_COOKIE)
                .map(|cookie| cookie.into_owned())
                .unwrap();
            cookie
        }};
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body.as_ref(), b"ok");
    }

    #[actix_web::test]
    async fn first_visit_lands_on_portal_choice() {
        let state = state();
        let app = app!(state);
        let cookie = visit!(app);

        let body = page!(app, cookie);
        assert!(body.contains("Staff Portal"));
        assert!(body.contains("Admin Portal"));
        assert_eq!(state.sessions.lock().len(), 1);
    }

    #[actix_web::test]
    async fn login_screens_and_back_navigation() {
        let state = state();
        let app = app!(state);
        let cookie = visit!(app);

        post!(app, cookie, "/view/admin-login");
        let body = page!(app, cookie);
        assert!(body.contains("Admin Access"));
        assert!(body.contains("action=\"/login/admin\""));

        post!(app, cookie, "/view/back");
        assert!(page!(app, cookie).contains("Staff Login"));

        post!(app, cookie, "/view/staff-login");
        let body = page!(app, cookie);
        assert!(body.contains("Welcome Back"));
        assert!(body.contains("action=\"/login/staff\""));
    }

    #[actix_web::test]
    async fn staff_log_submission_reaches_admin_report() {
        let state = state();
        let app = app!(state);
        let staff = visit!(app);

        post!(app, staff, "/view/staff-login");
        post!(
            app,
            staff,
            "/login/staff",
            vec![("identifier", "ada@glowtrack.com"), ("password", "anything")]
        );
        let body = page!(app, staff);
        assert!(body.contains("Log a Service"));
        assert!(body.contains("Ada Okonkwo"));

        post!(
            app,
            staff,
            "/staff/log",
            vec![("client_name", "Mrs. Johnson"), ("note", ""), ("toggle", "Nail Polish")]
        );
        let body = page!(app, staff);
        assert!(body.contains("value=\"Mrs. Johnson\""));
        assert!(body.contains("1 selected"));

        post!(
            app,
            staff,
            "/staff/log",
            vec![("client_name", "Mrs. Johnson"), ("note", "")]
        );
        let body = page!(app, staff);
        assert!(body.contains("Service logged successfully"));
        assert!(body.contains("0 selected"));
        assert!(!body.contains("value=\"Mrs. Johnson\""));

        {
            let salon = state.salon.lock();
            assert_eq!(salon.logs.len(), 11);
            let entry = salon.logs.entries().last().unwrap();
            assert_eq!(entry.staff, "Ada Okonkwo");
            assert_eq!(entry.total, "₦8,000");
        }

        let admin = visit!(app);
        post!(app, admin, "/view/admin-login");
        post!(app, admin, "/login/admin", vec![("identifier", ""), ("password", "")]);
        post!(app, admin, "/admin/page", vec![("page", "logs")]);
        post!(
            app,
            admin,
            "/admin/logs/filter",
            vec![("staff", "Ada Okonkwo"), ("date", "all"), ("category", "all")]
        );
        let body = page!(app, admin);
        assert!(body.contains("Mrs. Johnson"));
        assert!(body.contains("₦64,000"));
    }

    #[actix_web::test]
    async fn toggle_of_unlisted_service_leaves_draft_unchanged() {
        let state = state();
        let app = app!(state);
        let staff = visit!(app);

        post!(app, staff, "/view/staff-login");
        post!(app, staff, "/login/staff", vec![("identifier", "ruth@glowtrack.com")]);
        post!(
            app,
            staff,
            "/staff/log",
            vec![("client_name", "Sarah"), ("note", ""), ("toggle", "Bogus")]
        );

        let body = page!(app, staff);
        assert!(body.contains("0 selected"));
        assert!(!body.contains("Bogus"));

        post!(app, staff, "/staff/log", vec![("client_name", "Sarah"), ("note", "")]);
        assert!(page!(app, staff).contains("toast-error"));
        assert_eq!(state.salon.lock().logs.len(), 10);
    }

    #[actix_web::test]
    async fn empty_staff_submission_is_rejected() {
        let state = state();
        let app = app!(state);
        let staff = visit!(app);

        post!(app, staff, "/view/staff-login");
        post!(app, staff, "/login/staff", vec![("identifier", "grace@glowtrack.com")]);
        post!(app, staff, "/staff/log", vec![("client_name", "  "), ("note", "")]);

        let body = page!(app, staff);
        assert!(body.contains("toast-error"));
        assert_eq!(state.salon.lock().logs.len(), 10);
    }

    #[actix_web::test]
    async fn admin_actions_are_refused_outside_admin_dashboard() {
        let state = state();
        let app = app!(state);
        let visitor = visit!(app);

        post!(app, visitor, "/admin/services/1/delete");
        post!(app, visitor, "/view/staff-login");
        post!(app, visitor, "/login/staff", vec![("identifier", "ruth@glowtrack.com")]);
        post!(app, visitor, "/admin/staff/1/toggle");

        let salon = state.salon.lock();
        assert_eq!(salon.services.len(), 10);
        assert_eq!(
            salon.staff.get(1).map(|member| member.status),
            Some(crate::models::StaffStatus::Active)
        );
    }

    #[actix_web::test]
    async fn new_staff_needs_a_password() {
        let state = state();
        let app = app!(state);
        let admin = visit!(app);

        post!(app, admin, "/view/admin-login");
        post!(app, admin, "/login/admin", vec![("identifier", "admin@glowtrack.com")]);
        post!(app, admin, "/admin/page", vec![("page", "staff")]);
        post!(app, admin, "/admin/staff/new");

        let member = vec![
            ("name", "Tolu Bello"),
            ("email", "tolu@glowtrack.com"),
            ("role", "Lash Technician"),
            ("password", ""),
        ];
        post!(app, admin, "/admin/staff/save", member.clone());
        let body = page!(app, admin);
        assert!(body.contains("Password is required for new staff"));
        assert!(body.contains("Add New Staff Member"));
        assert!(body.contains("value=\"Tolu Bello\""));
        assert_eq!(state.salon.lock().staff.len(), 5);

        let mut member = member;
        member[3] = ("password", "secret");
        post!(app, admin, "/admin/staff/save", member);
        let body = page!(app, admin);
        assert!(body.contains("Staff added successfully"));
        assert!(!body.contains("Add New Staff Member"));

        let salon = state.salon.lock();
        assert_eq!(salon.staff.len(), 6);
        assert_eq!(salon.staff.get(6).map(|m| m.name.as_str()), Some("Tolu Bello"));
    }

    #[actix_web::test]
    async fn logout_resets_admin_screen() {
        let state = state();
        let app = app!(state);
        let admin = visit!(app);

        post!(app, admin, "/view/admin-login");
        post!(app, admin, "/login/admin", vec![("identifier", "admin@glowtrack.com")]);
        post!(app, admin, "/admin/page", vec![("page", "services")]);
        post!(app, admin, "/admin/services/new");
        assert!(page!(app, admin).contains("Add New Service"));

        post!(app, admin, "/logout");
        assert!(page!(app, admin).contains("Staff Portal"));

        post!(app, admin, "/view/admin-login");
        post!(app, admin, "/login/admin", vec![("identifier", "admin@glowtrack.com")]);
        let body = page!(app, admin);
        assert!(body.contains("Services Today"));
        assert!(!body.contains("Add New Service"));
    }
}
