//! `attendance-cli` — call the attendance service from the shell.
//!
//! Configuration comes from `.env`/environment ([`ClientConfig::load`]);
//! `--base-url` and `--token` override it. Responses are printed as JSON on
//! stdout, logs go to stderr.

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attendance_client::{
    api::{DateRange, MarkAttendanceRequest, PunchRequest},
    ApiClient, ClientConfig,
};
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    if let Some(base_url) = cli.base_url.clone() {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = cli.token.clone() {
        config = config.with_access_token(token);
    }
    tracing::debug!(
        api_base_url = %config.api_base_url,
        has_token = config.access_token.is_some(),
        timeout = ?config.timeout,
        "Loaded client configuration"
    );

    let client = ApiClient::new(&config)?;

    match &cli.command {
        Command::Session { session_id } => {
            print_json(&client.get_session_attendances(*session_id).await?)
        }
        Command::Mark {
            session_id,
            student_id,
            status,
            manual,
        } => {
            let request = MarkAttendanceRequest {
                student_id: *student_id,
                status: (*status).into(),
                is_manual: manual.then_some(true),
            };
            print_json(&client.mark_attendance(*session_id, &request).await?)
        }
        Command::Student { student_id, range } => print_json(
            &client
                .get_student_attendance(*student_id, &DateRange::from(range))
                .await?,
        ),
        Command::PunchIn(args) => print_json(&client.punch_in(&PunchRequest::from(args)).await?),
        Command::PunchOut(args) => print_json(&client.punch_out(&PunchRequest::from(args)).await?),
        Command::Today => print_json(&client.get_today_punch().await?),
        Command::History { range } => print_json(
            &client
                .get_student_punch_history(&DateRange::from(range))
                .await?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

/// Pretty JSON of a decoded response, in the wire's camelCase field names.
fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
