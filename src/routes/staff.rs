use actix_web::{web, HttpRequest, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    log_form::LoggedVisit,
    reports::{format_naira, parse_price, ReportCalendar},
    routes::act_and_return,
    session::Session,
    state::{AppState, Salon},
    store::NewLogEntry,
    templates::ToastView,
};

#[derive(Clone, Debug)]
struct ServiceChoice {
    name: String,
    price: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "staff_log.html")]
pub struct StaffLogTemplate {
    toasts: Vec<ToastView>,
    staff_name: String,
    client_name: String,
    note: String,
    services: Vec<ServiceChoice>,
    selected_count: usize,
}

#[derive(Deserialize)]
struct LogServiceInput {
    #[serde(default)]
    client_name: String,
    #[serde(default)]
    note: String,
    toggle: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/staff/log").route(web::post().to(log_service)));
}

pub fn dashboard_page(session: &Session, salon: &Salon, toasts: Vec<ToastView>) -> StaffLogTemplate {
    let draft = session.log_form.draft();
    let mut services: Vec<ServiceChoice> = salon
        .services
        .records()
        .iter()
        .map(|service| ServiceChoice {
            name: service.name.clone(),
            price: service.price.clone(),
            selected: session.log_form.is_selected(&service.name),
        })
        .collect();

    // Keep selections visible even if the catalog entry was removed meanwhile.
    for name in &draft.selected_services {
        if salon.service_price(name).is_none() {
            services.push(ServiceChoice {
                name: name.clone(),
                price: String::new(),
                selected: true,
            });
        }
    }

    StaffLogTemplate {
        toasts,
        staff_name: staff_name(salon, session.identity.as_deref()),
        client_name: draft.client_name.clone(),
        note: draft.note.clone(),
        services,
        selected_count: draft.selected_services.len(),
    }
}

/// Every keystroke of the form arrives with the request; a `toggle` value
/// flips one service, anything else is a submit.
async fn log_service(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LogServiceInput>,
) -> HttpResponse {
    let form = form.into_inner();
    let calendar = state.calendar.clone();
    act_and_return(&state, &req, move |session, salon| {
        if !session.view.is_staff() {
            log::warn!("Service log refused outside the staff dashboard");
            return;
        }

        session.log_form.set_client_name(form.client_name);
        session.log_form.set_note(form.note);

        if let Some(name) = form.toggle.filter(|name| !name.trim().is_empty()) {
            if can_toggle(session, salon, &name) {
                session.log_form.toggle_service(&name);
            } else {
                log::warn!("Ignoring toggle of unknown service {name:?}");
            }
            return;
        }

        if let Ok(visit) = session.log_form.submit(&mut session.toasts) {
            record_visit(salon, session.identity.as_deref(), &calendar, visit);
        }
    })
}

/// Appends a submitted visit to the shared log, priced from the current
/// catalog and dated on the report's "today".
pub fn record_visit(
    salon: &mut Salon,
    identity: Option<&str>,
    calendar: &ReportCalendar,
    visit: LoggedVisit,
) {
    let total = price_visit(salon, &visit.services);
    let staff = staff_name(salon, identity);
    salon.logs.append(NewLogEntry {
        date: calendar.today.clone(),
        staff,
        client: visit.client_name,
        services: visit.services,
        total: format_naira(total),
        note: visit.note,
    });
}

/// Services no longer in the catalog are priced at zero, as is any price
/// that would overflow the total.
pub fn price_visit(salon: &Salon, services: &[String]) -> u64 {
    services.iter().fold(0u64, |total, name| {
        let price = salon.service_price(name).and_then(parse_price).unwrap_or(0);
        total.checked_add(price).unwrap_or_else(|| {
            log::warn!("Price of {name:?} overflows the visit total; not counted");
            total
        })
    })
}

/// Only catalog services can be picked; a selection that has since left the
/// catalog can still be cleared.
fn can_toggle(session: &Session, salon: &Salon, name: &str) -> bool {
    salon.service_price(name).is_some() || session.log_form.is_selected(name)
}

/// The staff member whose email was typed at login, else the typed text.
pub fn staff_name(salon: &Salon, identity: Option<&str>) -> String {
    let Some(identity) = identity else {
        return "Staff".to_string();
    };
    salon
        .staff
        .records()
        .iter()
        .find(|member| member.email.eq_ignore_ascii_case(identity))
        .map(|member| member.name.clone())
        .unwrap_or_else(|| identity.to_string())
}
