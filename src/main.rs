#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tjm_explorer::{
    configure_services, utils::logging::LoggingHelper, ProviderHandle, SessionManager,
    TjmSettings, VERSION,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = TjmSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    let provider = ProviderHandle::from_settings(&settings.linkedin);
    LoggingHelper::log_linkedin_init(provider.is_available(), &settings.linkedin.redirect_uri);

    println!("✓ Using stateless sessions with encrypted cookies");
    start_server(provider, settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(provider: ProviderHandle, settings: TjmSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    let session_manager = SessionManager::from_settings(&settings);

    // Configure CORS for the explorer frontend
    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(provider.clone()))
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::Data::new(session_manager.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &TjmSettings) {
    println!("Starting TJM Explorer {VERSION} on http://{bind_address}");
    println!();
    println!("LinkedIn endpoints:");
    println!("  GET  /auth/linkedin/sign_in  - Redirect to LinkedIn");
    println!("  GET  /auth/linkedin/callback - LinkedIn callback");
    println!("  GET|POST /auth/linkedin/sign_out - Clear session");
    println!();
    println!("Callback URL registered with LinkedIn:");
    println!("  {}", settings.linkedin.redirect_uri);
    println!("Result redirects land on: {}", settings.application.frontend_root);
    println!();
    println!("System endpoints:");
    println!("  GET  /api/session - Session context and explorer view");
    println!("  GET  /ping        - Health check");
}
