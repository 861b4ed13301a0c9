//! Google sign-in demo server.
//!
//! ```bash
//! export GOOGLE_CLIENT_ID=your-client-id.apps.googleusercontent.com
//! export GOOGLE_CLIENT_SECRET=your-client-secret
//! export GOOGLE_CALLBACK_URL=http://localhost:8080/auth/google/callback
//! export GOOGLE_SCOPE="openid email profile"
//!
//! cargo run -p actix-security-google-test
//! ```

mod handlers;

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use actix_security_google::{GoogleConfig, GoogleStrategy};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let strategy = GoogleConfig::from_env()
        .and_then(GoogleStrategy::new)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    info!("{:?}", strategy);

    let strategy = web::Data::new(strategy);

    info!("listening on http://127.0.0.1:8080");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(strategy.clone())
            .service(handlers::home::index)
            .service(handlers::auth::login)
            .service(handlers::auth::callback)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
