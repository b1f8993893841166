//! Forwarder binary entry point

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use forwarder::{Forwarder, ForwarderConfig, RealMediaClient, core::prepare_request};
use shared::ContactRecord;
use shared::logging::{init_tracing_with_level, log_error, log_startup, log_success};

/// Exit status telling the caller the record may be resubmitted (EX_TEMPFAIL)
const EXIT_RETRYABLE: u8 = 75;

#[derive(Parser)]
#[command(name = "forwarder")]
#[command(about = "Forward completed contact records for media analytics")]
struct Args {
    /// Contact record JSON file (reads stdin when omitted)
    record: Option<PathBuf>,

    /// Print the synthesized request instead of submitting it
    #[arg(long)]
    dry_run: bool,

    /// Log level, overrides FORWARDER_LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,
}

fn read_record(path: Option<&PathBuf>) -> anyhow::Result<ContactRecord> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading contact record from {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading contact record from stdin")?;
            raw
        }
    };

    Ok(ContactRecord::from_json(&raw)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = ForwarderConfig::from_env().context("loading forwarder configuration")?;
    init_tracing_with_level(args.log_level.as_deref().or(config.log_level.as_deref()));
    log_startup("forwarder", &format!("media forwarder for {}", config.api_url));

    let record = read_record(args.record.as_ref())?;
    let builder = config.request_builder();

    if args.dry_run {
        let request = prepare_request(&builder, &record)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(ExitCode::SUCCESS);
    }

    let client = RealMediaClient::new(
        &config.api_url,
        config.api_token.clone(),
        config.request_timeout_ms,
    )?;
    let forwarder = Forwarder::new(builder, client);

    match forwarder.forward(&record).await {
        Ok(acceptance) => {
            log_success("forwarder", &format!("media {} accepted", acceptance.media_id));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_retryable() => {
            log_error("forwarder", "media submission", &e);
            Ok(ExitCode::from(EXIT_RETRYABLE))
        }
        Err(e) => {
            log_error("forwarder", "media submission", &e);
            Ok(ExitCode::FAILURE)
        }
    }
}
