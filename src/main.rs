use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use axum_prometheus::PrometheusMetricLayer;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use waitlist_ai::config::AppConfig;
use waitlist_ai::error::AppError;
use waitlist_ai::prediction::{
    prediction_router, BookingArchive, Estimate, EstimatorConfig, InMemorySearchLog, JourneyQuery,
    PredictionService, ProbabilityEstimator, TrainNumber, TravelClass,
};
use waitlist_ai::telemetry;

const JOURNEY_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Waitlist Probability Service",
    about = "Estimate railway waitlist confirmation chances over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate one journey and print the result
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Booking-history CSV export backing the estimates
    #[arg(long)]
    history_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Train number as printed on the ticket
    #[arg(long)]
    train: String,
    /// Journey date (DD-MM-YYYY)
    #[arg(long, value_parser = parse_journey_date)]
    journey_date: NaiveDate,
    /// Travel class: 1AC, 2AC, 3AC, or Sleeper
    #[arg(long, value_parser = parse_travel_class)]
    class: TravelClass,
    /// Current waitlist position (0 if already confirmed)
    #[arg(long)]
    waitlist: u32,
    /// Optional booking-history CSV export to estimate against
    #[arg(long)]
    history_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Predict(args) => run_predict(args),
    }
}

fn parse_journey_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), JOURNEY_DATE_FORMAT)
        .map_err(|err| format!("failed to parse '{raw}' as DD-MM-YYYY ({err})"))
}

fn parse_travel_class(raw: &str) -> Result<TravelClass, String> {
    TravelClass::from_str(raw).map_err(|err| err.to_string())
}

fn load_archive(path: Option<&Path>) -> Result<BookingArchive, AppError> {
    match path {
        Some(path) => Ok(BookingArchive::from_csv_path(path)?),
        None => Ok(BookingArchive::default()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.history_csv.take() {
        config.history.csv_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let archive = load_archive(config.history.csv_path.as_deref())?;
    info!(records = archive.len(), "booking history archive loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = Arc::new(PredictionService::new(
        Arc::new(archive),
        Arc::new(InMemorySearchLog::default()),
        EstimatorConfig::default(),
    ));

    let app = prediction_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "waitlist prediction service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        train,
        journey_date,
        class,
        waitlist,
        history_csv,
    } = args;

    let archive = load_archive(history_csv.as_deref())?;
    let estimator = ProbabilityEstimator::new(Arc::new(archive), EstimatorConfig::default());

    let query = JourneyQuery {
        train: TrainNumber(train),
        journey_date,
        class,
        waitlist_position: waitlist,
    };
    let estimate = estimator.estimate(&query);
    render_prediction(&query, &estimate);

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_prediction(query: &JourneyQuery, estimate: &Estimate) {
    println!("Waitlist confirmation outlook");
    println!(
        "Train {} | {} | {}",
        query.train,
        query.class.label(),
        query.journey_date.format(JOURNEY_DATE_FORMAT)
    );
    if query.waitlist_position == 0 {
        println!("Not waitlisted");
    } else {
        println!("Waitlist position: {}", query.waitlist_position);
    }

    println!();
    println!("Confirmation probability: {:.2}%", estimate.percentage);
    println!("Category: {}", estimate.band.label());
    println!("Recommendation: {}", estimate.advice.message());

    println!();
    println!("Breakdown");
    println!(
        "- base rate {:.4} from {}",
        estimate.base_rate,
        estimate.basis.describe()
    );
    println!("- waitlist factor {:.1}", estimate.waitlist_factor);
    println!("- seasonal factor {:.1}", estimate.seasonal_factor);

    if estimate.degraded {
        println!();
        println!("Note: history lookups failed; the estimate fell back to default assumptions.");
    }
}
