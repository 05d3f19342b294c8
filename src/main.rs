use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web::Data,
    App, HttpServer,
};
use clap::Parser;
use mergington::{
    clients::server::configure,
    database::{
        database::Database,
        options::{DatabaseOptions, SeedSource},
    },
};
use std::{io, time::Duration};

/// 🏫 Mergington Activities, sign students up for (and out of) extracurricular activities
#[derive(Parser, Debug)]
struct Cli {
    /// JSON file with the activity catalog to start from. Defaults to the built in catalog
    #[clap(short, long)]
    seed: Option<std::path::PathBuf>,

    /// Port the http server will run on
    #[clap(short, long, default_value = "8000")]
    port: u16,

    /// Address the http server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Reject signups once an activity reaches its max participants
    #[clap(long)]
    enforce_capacity: bool,

    /// Logs every http request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// How long a request waits on the database before failing with a 503
    #[clap(long, default_value_t = 2000)]
    request_timeout_ms: u64,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let seed = match args.seed {
        Some(path) => SeedSource::File(path),
        None => SeedSource::BuiltIn,
    };

    let database_options = DatabaseOptions::default()
        .set_seed(seed)
        .set_enforce_capacity(args.enforce_capacity)
        .set_request_timeout(Duration::from_millis(args.request_timeout_ms));

    let database = Database::new(database_options)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let request_manager = database.run();

    log::info!(
        "starting HTTP server on http://{}:{}/activities",
        args.address,
        args.port
    );

    let server_request_manager = request_manager.clone();
    let log_http = args.log_http;

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(server_request_manager.clone()))
            .configure(configure)
            .wrap(Cors::permissive())
            .wrap(Condition::new(log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await?;

    // The server has stopped (e.g. Ctrl-C), let the database thread exit
    match request_manager.send_shutdown_request() {
        Ok(shutdown_response) => log::info!("Shutting down server: {}", shutdown_response),
        Err(err) => log::warn!("Database did not acknowledge shutdown: {}", err),
    }

    Ok(())
}
