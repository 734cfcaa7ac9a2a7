pub mod admin;
pub mod public;
pub mod staff;

use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::{
    session::{session_cookie, Session},
    state::{AppState, Salon},
};

/// Runs `action` against the caller's session and the salon records, then
/// redirects to the view switch at `/`.
pub(crate) fn act_and_return(
    state: &web::Data<AppState>,
    req: &HttpRequest,
    action: impl FnOnce(&mut Session, &mut Salon),
) -> HttpResponse {
    let issued = {
        let mut sessions = state.sessions.lock();
        let (session, issued) = sessions.resolve(req);
        let mut salon = state.salon.lock();
        action(session, &mut salon);
        issued
    };
    back_home(state, req, issued)
}

pub(crate) fn back_home(
    state: &web::Data<AppState>,
    req: &HttpRequest,
    issued: Option<String>,
) -> HttpResponse {
    let mut response = HttpResponse::SeeOther();
    response
        .append_header((header::LOCATION, "/"))
        .insert_header((header::CACHE_CONTROL, "no-store"));
    if let Some(id) = issued {
        response.cookie(session_cookie(req, id, state.secure_cookies));
    }
    response.finish()
}
