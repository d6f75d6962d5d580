//! # podhelm — container lifecycle console
//!
//! Terminal console for a local varlink container daemon: live listing
//! with resource statistics, filtering, and lifecycle actions with a
//! confirmation flow for deletes.

mod app;
mod event;
mod format;
mod poll;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use podhelm_common::config::PodhelmConfig;
use podhelm_common::constants;
use podhelm_core::Dispatcher;
use podhelm_rpc::VarlinkConnection;
use tokio::sync::mpsc;

use crate::app::{ActionReport, App, AppCommand};
use crate::event::TerminalEvent;
use crate::poll::Snapshot;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = constants::BIN_NAME, version, about = "Container lifecycle console")]
struct Cli {
    /// Varlink address of the container daemon.
    #[arg(long, env = "PODHELM_ADDRESS", default_value = constants::DAEMON_ADDRESS)]
    address: String,

    /// Milliseconds between listing/statistics refreshes.
    #[arg(long, default_value_t = constants::DEFAULT_REFRESH_INTERVAL_MS)]
    refresh_interval_ms: u64,

    /// Show only running containers at startup.
    #[arg(long)]
    running: bool,

    /// Initial text filter against container name or image.
    #[arg(long, default_value = "")]
    filter: String,
}

/// Channels feeding the app loop.
struct Inputs {
    snapshots: mpsc::Receiver<Snapshot>,
    reports: mpsc::Receiver<ActionReport>,
    events: mpsc::Receiver<TerminalEvent>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PodhelmConfig {
        daemon_address: cli.address,
        refresh_interval_ms: cli.refresh_interval_ms,
        only_show_running: cli.running,
    };

    let client = Arc::new(VarlinkConnection::connect(config.socket_path()?).await?);

    let (snapshot_tx, snapshot_rx) = mpsc::channel(4);
    let (report_tx, report_rx) = mpsc::channel(16);
    let _ = tokio::spawn(poll::run(
        Arc::clone(&client),
        Duration::from_millis(config.refresh_interval_ms),
        snapshot_tx,
    ));
    let inputs = Inputs {
        snapshots: snapshot_rx,
        reports: report_rx,
        events: event::spawn_reader(Duration::from_millis(250)),
    };

    let mut app = App::new(config.only_show_running, cli.filter);
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app, &client, &report_tx, inputs).await;
    ratatui::restore();
    result
}

/// Draw/await/apply loop: render the current state, wait for the next
/// message, mutate the app, and execute whatever command fell out.
async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    client: &Arc<VarlinkConnection>,
    report_tx: &mpsc::Sender<ActionReport>,
    mut inputs: Inputs,
) -> anyhow::Result<()> {
    while app.running {
        let _ = terminal.draw(|frame| ui::render(frame, app))?;
        let command = tokio::select! {
            Some(snapshot) = inputs.snapshots.recv() => {
                app.on_snapshot(snapshot);
                None
            }
            Some(report) = inputs.reports.recv() => {
                app.on_report(report);
                None
            }
            Some(event) = inputs.events.recv() => match event {
                TerminalEvent::Key(key) => app.on_key(key),
                TerminalEvent::Resize(_, _) | TerminalEvent::Tick => None,
            },
            else => {
                app.running = false;
                None
            }
        };
        if let Some(command) = command {
            execute(command, client, report_tx);
        }
    }
    Ok(())
}

/// Spawns a dispatch and routes its outcome back to the app loop.
fn execute(
    command: AppCommand,
    client: &Arc<VarlinkConnection>,
    report_tx: &mpsc::Sender<ActionReport>,
) {
    let AppCommand::Dispatch {
        container,
        request,
        verb,
        feeds_delete_flow,
    } = command;
    let dispatcher = Dispatcher::new(Arc::clone(client));
    let report_tx = report_tx.clone();
    let _ = tokio::spawn(async move {
        let outcome = dispatcher.dispatch(&container, &request).await;
        let report = ActionReport {
            target: request.target.clone(),
            names: container.names.clone(),
            verb,
            feeds_delete_flow,
            outcome,
        };
        if report_tx.send(report).await.is_err() {
            tracing::debug!("app loop gone, dropping action report");
        }
    });
}
