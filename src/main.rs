// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker headless driver
//!
//! Replays a JSON event script (file argument or stdin) against headless
//! surfaces and prints the resulting session as JSON, or as GeoJSON with
//! `--geojson`.

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    services::{load_script, to_geojson_string, Snapshot},
    HeadlessSession,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_json);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let geojson = args.iter().any(|a| a == "--geojson");
    let script_path = args.iter().find(|a| !a.starts_with("--"));

    let raw = match script_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event script {}", path))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read event script from stdin")?;
            buf
        }
    };

    let script = load_script(&raw)?;
    tracing::info!(
        steps = script.len(),
        zoom = config.map_zoom_level,
        "Replaying event script"
    );

    let mut session = HeadlessSession::new(config);
    session.log.start();
    let handled = session.event_loop.run(&mut session.log, script).await;
    tracing::info!(
        handled,
        workouts = session.log.workouts().len(),
        "Event script finished"
    );

    let output = if geojson {
        to_geojson_string(session.log.workouts())?
    } else {
        serde_json::to_string_pretty(&Snapshot::new(&session.log, &session.ui))?
    };
    println!("{}", output);

    Ok(())
}

/// Initialize structured logging on stderr (JSON by default).
fn init_logging(json: bool) {
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let compact_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(json_layer)
        .with(compact_layer)
        .init();
}
