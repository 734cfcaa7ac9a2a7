mod config;
mod crud;
mod dashboard;
mod error;
mod log_form;
mod models;
mod navigation;
mod notify;
mod reports;
mod routes;
mod session;
mod state;
mod store;
mod templates;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};

use crate::{config::Config, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);
    let static_dir = config.static_dir.clone();

    let address = config.address();
    log::info!(
        "Starting GlowTrack on http://{address} (reports dated {})",
        state.calendar.today
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", static_dir.clone()).prefer_utf8(true))
            .configure(routes::public::configure)
            .configure(routes::staff::configure)
            .configure(routes::admin::configure)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
