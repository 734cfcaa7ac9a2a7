use actix_web::{cookie::Cookie, http::header, HttpResponse};
use askama::Template;

use crate::notify::Notification;

#[derive(Clone, Debug)]
pub struct ToastView {
    pub severity: &'static str,
    pub title: String,
    pub detail: String,
    pub has_detail: bool,
}

impl From<Notification> for ToastView {
    fn from(notification: Notification) -> Self {
        let detail = notification.detail.unwrap_or_default();
        Self {
            severity: notification.severity.as_str(),
            title: notification.title,
            has_detail: !detail.is_empty(),
            detail,
        }
    }
}

pub fn toast_views(notifications: Vec<Notification>) -> Vec<ToastView> {
    notifications.into_iter().map(ToastView::from).collect()
}

pub fn render<T: Template>(template: T, cookie: Option<Cookie<'static>>) -> HttpResponse {
    match template.render() {
        Ok(body) => {
            let mut response = HttpResponse::Ok();
            response
                .content_type("text/html; charset=utf-8")
                .insert_header((header::CACHE_CONTROL, "no-store"));
            if let Some(cookie) = cookie {
                response.cookie(cookie);
            }
            response.body(body)
        }
        Err(err) => {
            log::error!("Template render error: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
