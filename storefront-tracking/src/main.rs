//! tracking-replay - replay recorded data layer pushes through a Tracker
//!
//! Reads newline-delimited JSON payloads, pushes each one, unloads the page
//! session and prints the resulting dispatch log (memory sink) as NDJSON.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use shared::DataLayerObject;
use storefront_tracking::{
    AnalyticsSink, MemorySink, PageContext, SinkKind, Tracker, TrackingConfig, TrackingSession, build_sink,
    setup_environment,
};

#[derive(Debug, Parser)]
#[command(name = "tracking-replay", about = "Replay data layer pushes through the tracking queue")]
struct Args {
    /// NDJSON file with one payload per line (stdin when omitted)
    input: Option<PathBuf>,

    /// JSON config file; environment variables are used when omitted
    #[arg(long, env = "TRACKING_CONFIG")]
    config: Option<PathBuf>,

    /// Page type used to stamp events without one
    #[arg(long, default_value = "")]
    page_type: String,

    /// Page type id used to stamp events without one
    #[arg(long, default_value = "")]
    page_type_id: String,
}

fn read_payloads(input: Option<&PathBuf>) -> anyhow::Result<Vec<DataLayerObject>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut payloads = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<DataLayerObject>(&line) {
            Ok(payload) => payloads.push(payload),
            Err(e) => tracing::warn!(line = line_no + 1, "Skipping invalid payload: {e}"),
        }
    }
    Ok(payloads)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TrackingConfig::from_json_file(path)?,
        None => TrackingConfig::from_env(),
    };
    config.validate()?;
    setup_environment(&config)?;

    // keep a typed handle on the memory sink to print its log afterwards
    let memory = Arc::new(MemorySink::new());
    let sink: Arc<dyn AnalyticsSink> = match config.sink {
        SinkKind::Memory => memory.clone(),
        _ => build_sink(&config)?,
    };

    let session = Arc::new(TrackingSession::with_sink(&config, sink));
    session.set_page_context(PageContext::new(args.page_type, args.page_type_id));
    let tracker = Tracker::start(session, &config);

    let payloads = read_payloads(args.input.as_ref())?;
    tracing::info!(count = payloads.len(), "Replaying payloads");
    for payload in payloads {
        tracker.push(payload);
    }
    tracker.unload().await;

    if config.sink == SinkKind::Memory {
        for object in memory.dispatched() {
            println!("{}", object.to_json());
        }
    }

    Ok(())
}
