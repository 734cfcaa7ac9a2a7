use std::collections::BTreeSet;

use actix_web::{web, HttpRequest, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    crud::{delete, toggle_status, DialogMode, Editor, EditForm, ServiceForm, StaffForm},
    dashboard::{
        recent_logs, revenue_per_staff, service_mix, services_per_staff, summary_cards,
        top_by_count, top_by_value, Bar, DashboardRange, Performer, RecentLog, Slice, StatCard,
    },
    models::{RecordId, StaffStatus},
    navigation::AdminPage,
    notify::Notifier,
    reports::{
        export_csv, filter_logs, format_naira, summarize, DateBucket, LogFilters,
        ReportCalendar, ServiceCategory, ALL,
    },
    routes::act_and_return,
    session::Session,
    state::{AppState, Salon},
    templates::ToastView,
};

#[derive(Clone, Debug)]
struct NavItem {
    slug: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Clone, Debug)]
struct OptionView {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Clone, Debug)]
struct ServiceRow {
    id: RecordId,
    name: String,
    price: String,
}

#[derive(Clone, Debug)]
struct StaffRow {
    id: RecordId,
    name: String,
    email: String,
    role: String,
    status: &'static str,
    active: bool,
}

#[derive(Clone, Debug)]
struct LogRow {
    date: String,
    staff: String,
    client: String,
    services: Vec<String>,
    total: String,
    note: String,
    has_note: bool,
}

#[derive(Clone, Debug, Default)]
struct DialogView {
    open: bool,
    editing: bool,
    title: String,
    description: String,
    submit_label: String,
}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    toasts: Vec<ToastView>,
    nav: Vec<NavItem>,
    page_label: &'static str,
    admin_identity: String,
    cards: Vec<StatCard>,
    top_count: Vec<Performer>,
    top_value: Vec<Performer>,
    recent: Vec<RecentLog>,
    ranges: Vec<OptionView>,
}

#[derive(Template)]
#[template(path = "admin_services.html")]
pub struct AdminServicesTemplate {
    toasts: Vec<ToastView>,
    nav: Vec<NavItem>,
    page_label: &'static str,
    admin_identity: String,
    services: Vec<ServiceRow>,
    dialog: DialogView,
    form: ServiceForm,
}

#[derive(Template)]
#[template(path = "admin_staff.html")]
pub struct AdminStaffTemplate {
    toasts: Vec<ToastView>,
    nav: Vec<NavItem>,
    page_label: &'static str,
    admin_identity: String,
    staff: Vec<StaffRow>,
    dialog: DialogView,
    form: StaffForm,
}

#[derive(Template)]
#[template(path = "admin_logs.html")]
pub struct AdminLogsTemplate {
    toasts: Vec<ToastView>,
    nav: Vec<NavItem>,
    page_label: &'static str,
    admin_identity: String,
    staff_options: Vec<OptionView>,
    date_options: Vec<OptionView>,
    category_options: Vec<OptionView>,
    rows: Vec<LogRow>,
    count: usize,
    revenue: String,
}

#[derive(Template)]
#[template(path = "admin_analytics.html")]
pub struct AdminAnalyticsTemplate {
    toasts: Vec<ToastView>,
    nav: Vec<NavItem>,
    page_label: &'static str,
    admin_identity: String,
    top_count: Vec<Performer>,
    top_value: Vec<Performer>,
    services_bars: Vec<Bar>,
    revenue_bars: Vec<Bar>,
    mix: Vec<Slice>,
}

pub enum AdminScreen {
    Dashboard(AdminDashboardTemplate),
    Services(AdminServicesTemplate),
    Staff(AdminStaffTemplate),
    Logs(AdminLogsTemplate),
    Analytics(AdminAnalyticsTemplate),
}

#[derive(Deserialize)]
struct PageInput {
    #[serde(default)]
    page: String,
}

#[derive(Deserialize)]
struct RangeInput {
    #[serde(default)]
    range: String,
}

#[derive(Deserialize)]
struct FilterInput {
    #[serde(default)]
    staff: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    category: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(web::resource("/page").route(web::post().to(select_page)))
            .service(web::resource("/dashboard/range").route(web::post().to(select_range)))
            .service(web::resource("/services/new").route(web::post().to(new_service)))
            .service(web::resource("/services/save").route(web::post().to(save_service)))
            .service(web::resource("/services/cancel").route(web::post().to(cancel_service)))
            .service(web::resource("/services/{id}/edit").route(web::post().to(edit_service)))
            .service(web::resource("/services/{id}/delete").route(web::post().to(delete_service)))
            .service(web::resource("/staff/new").route(web::post().to(new_staff)))
            .service(web::resource("/staff/save").route(web::post().to(save_staff)))
            .service(web::resource("/staff/cancel").route(web::post().to(cancel_staff)))
            .service(web::resource("/staff/{id}/edit").route(web::post().to(edit_staff)))
            .service(web::resource("/staff/{id}/delete").route(web::post().to(delete_staff)))
            .service(web::resource("/staff/{id}/toggle").route(web::post().to(toggle_staff)))
            .service(web::resource("/logs/filter").route(web::post().to(filter_report)))
            .service(web::resource("/logs/export").route(web::post().to(export_report))),
    );
}

/// Admin-only actions are ignored unless the session is on the admin
/// dashboard.
fn admin_action(
    state: &web::Data<AppState>,
    req: &HttpRequest,
    action: impl FnOnce(&mut Session, &mut Salon),
) -> HttpResponse {
    act_and_return(state, req, |session, salon| {
        if !session.view.is_admin() {
            log::warn!("Admin action {} refused outside the admin dashboard", req.path());
            return;
        }
        action(session, salon);
    })
}

async fn select_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<PageInput>,
) -> HttpResponse {
    let page = AdminPage::from_slug(&form.page);
    admin_action(&state, &req, |session, _| session.admin.select_page(page))
}

async fn select_range(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<RangeInput>,
) -> HttpResponse {
    let range = DashboardRange::from_slug(&form.range);
    admin_action(&state, &req, |session, _| session.dashboard_range = range)
}

async fn new_service(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    admin_action(&state, &req, |session, _| session.service_editor.open_create_dialog())
}

async fn edit_service(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<RecordId>,
) -> HttpResponse {
    let id = path.into_inner();
    admin_action(&state, &req, |session, salon| match salon.services.get(id) {
        Some(record) => session.service_editor.open_edit_dialog(record),
        None => session.toasts.error("Service no longer exists", None),
    })
}

async fn save_service(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ServiceForm>,
) -> HttpResponse {
    let form = form.into_inner();
    admin_action(&state, &req, |session, salon| {
        if !session.service_editor.is_open() {
            return;
        }
        session.service_editor.set_form(form);
        if let Err(err) = session.service_editor.save(&mut salon.services, &mut session.toasts) {
            log::debug!("Service dialog kept open: {err}");
        }
    })
}

async fn cancel_service(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    admin_action(&state, &req, |session, _| session.service_editor.close())
}

async fn delete_service(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<RecordId>,
) -> HttpResponse {
    let id = path.into_inner();
    admin_action(&state, &req, |session, salon| {
        delete(&mut salon.services, id, ServiceForm::NOUN, &mut session.toasts);
    })
}

async fn new_staff(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    admin_action(&state, &req, |session, _| session.staff_editor.open_create_dialog())
}

async fn edit_staff(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<RecordId>,
) -> HttpResponse {
    let id = path.into_inner();
    admin_action(&state, &req, |session, salon| match salon.staff.get(id) {
        Some(record) => session.staff_editor.open_edit_dialog(record),
        None => session.toasts.error("Staff no longer exists", None),
    })
}

async fn save_staff(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<StaffForm>,
) -> HttpResponse {
    let form = form.into_inner();
    admin_action(&state, &req, |session, salon| {
        if !session.staff_editor.is_open() {
            return;
        }
        session.staff_editor.set_form(form);
        if let Err(err) = session.staff_editor.save(&mut salon.staff, &mut session.toasts) {
            log::debug!("Staff dialog kept open: {err}");
        }
    })
}

async fn cancel_staff(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    admin_action(&state, &req, |session, _| session.staff_editor.close())
}

async fn delete_staff(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<RecordId>,
) -> HttpResponse {
    let id = path.into_inner();
    admin_action(&state, &req, |session, salon| {
        delete(&mut salon.staff, id, StaffForm::NOUN, &mut session.toasts);
    })
}

async fn toggle_staff(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<RecordId>,
) -> HttpResponse {
    let id = path.into_inner();
    admin_action(&state, &req, |session, salon| {
        toggle_status(&mut salon.staff, id, &mut session.toasts);
    })
}

async fn filter_report(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<FilterInput>,
) -> HttpResponse {
    let filters = LogFilters::from_selection(&form.staff, &form.date, &form.category);
    admin_action(&state, &req, |session, _| session.log_filters = filters)
}

async fn export_report(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    admin_action(&state, &req, |session, _| export_csv(&mut session.toasts))
}

pub fn shell_page(
    session: &Session,
    salon: &Salon,
    calendar: &ReportCalendar,
    toasts: Vec<ToastView>,
) -> AdminScreen {
    let page = session.admin.page();
    let nav = AdminPage::ALL
        .into_iter()
        .map(|item| NavItem {
            slug: item.slug(),
            label: item.label(),
            active: item == page,
        })
        .collect();
    let page_label = page.label();
    let admin_identity = session
        .identity
        .clone()
        .unwrap_or_else(|| "admin@glowtrack.com".to_string());

    match page {
        AdminPage::Dashboard => AdminScreen::Dashboard(AdminDashboardTemplate {
            toasts,
            nav,
            page_label,
            admin_identity,
            cards: summary_cards(),
            top_count: top_by_count(),
            top_value: top_by_value(),
            recent: recent_logs(),
            ranges: DashboardRange::OPTIONS
                .into_iter()
                .map(|range| OptionView {
                    value: range.slug().to_string(),
                    label: range.label().to_string(),
                    selected: range == session.dashboard_range,
                })
                .collect(),
        }),
        AdminPage::Services => AdminScreen::Services(AdminServicesTemplate {
            toasts,
            nav,
            page_label,
            admin_identity,
            services: salon
                .services
                .records()
                .iter()
                .map(|service| ServiceRow {
                    id: service.id,
                    name: service.name.clone(),
                    price: service.price.clone(),
                })
                .collect(),
            dialog: dialog_view(&session.service_editor, "service"),
            form: session.service_editor.form().clone(),
        }),
        AdminPage::Staff => AdminScreen::Staff(AdminStaffTemplate {
            toasts,
            nav,
            page_label,
            admin_identity,
            staff: salon
                .staff
                .records()
                .iter()
                .map(|member| StaffRow {
                    id: member.id,
                    name: member.name.clone(),
                    email: member.email.clone(),
                    role: member.role.clone(),
                    status: member.status.as_str(),
                    active: member.status == StaffStatus::Active,
                })
                .collect(),
            dialog: dialog_view(&session.staff_editor, "staff member"),
            form: session.staff_editor.form().clone(),
        }),
        AdminPage::Logs => {
            let filters = &session.log_filters;
            let filtered = filter_logs(salon.logs.entries(), filters, calendar);
            let summary = summarize(&filtered);
            AdminScreen::Logs(AdminLogsTemplate {
                toasts,
                nav,
                page_label,
                admin_identity,
                staff_options: staff_options(salon, filters),
                date_options: DateBucket::OPTIONS
                    .into_iter()
                    .map(|bucket| OptionView {
                        value: bucket.slug().to_string(),
                        label: bucket.label().to_string(),
                        selected: bucket == filters.date,
                    })
                    .collect(),
                category_options: ServiceCategory::OPTIONS
                    .into_iter()
                    .map(|category| OptionView {
                        value: category.slug().to_string(),
                        label: category.label().to_string(),
                        selected: category == filters.category,
                    })
                    .collect(),
                rows: filtered
                    .into_iter()
                    .map(|entry| {
                        let note = entry.note.clone().unwrap_or_default();
                        LogRow {
                            date: entry.date.clone(),
                            staff: entry.staff.clone(),
                            client: entry.client.clone(),
                            services: entry.services.clone(),
                            total: entry.total.clone(),
                            has_note: !note.is_empty(),
                            note,
                        }
                    })
                    .collect(),
                count: summary.count,
                revenue: format_naira(summary.revenue),
            })
        }
        AdminPage::Analytics => AdminScreen::Analytics(AdminAnalyticsTemplate {
            toasts,
            nav,
            page_label,
            admin_identity,
            top_count: top_by_count(),
            top_value: top_by_value(),
            services_bars: services_per_staff(),
            revenue_bars: revenue_per_staff(),
            mix: service_mix(),
        }),
    }
}

fn dialog_view<F: EditForm>(editor: &Editor<F>, noun: &str) -> DialogView {
    let (editing, title, description, submit_label) = match editor.mode() {
        DialogMode::Closed => return DialogView::default(),
        DialogMode::Create => (
            false,
            format!("Add New {}", title_case(noun)),
            format!("Enter the details for the new {noun}"),
            format!("Add {}", F::NOUN),
        ),
        DialogMode::Edit(_) => (
            true,
            format!("Edit {}", title_case(noun)),
            format!("Update the {noun} details below"),
            format!("Update {}", F::NOUN),
        ),
    };
    DialogView {
        open: true,
        editing,
        title,
        description,
        submit_label,
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Directory names first, then any other names found in the log.
fn staff_options(salon: &Salon, filters: &LogFilters) -> Vec<OptionView> {
    let mut names: Vec<String> = salon
        .staff
        .records()
        .iter()
        .map(|member| member.name.clone())
        .collect();
    let known: BTreeSet<String> = names.iter().cloned().collect();
    let extra: BTreeSet<String> = salon
        .logs
        .entries()
        .iter()
        .map(|entry| entry.staff.clone())
        .filter(|name| !known.contains(name))
        .collect();
    names.extend(extra);

    let selected = filters.staff_slug();
    std::iter::once(OptionView {
        value: ALL.to_string(),
        label: "All Staff".to_string(),
        selected: selected == ALL,
    })
    .chain(names.into_iter().map(|name| OptionView {
        selected: name == selected,
        label: name.clone(),
        value: name,
    }))
    .collect()
}
