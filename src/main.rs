use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{info, level_filters::LevelFilter};

use orderdesk::config::fetch_config;
use orderdesk::form::{OrderForm, OrderSubmission};
use orderdesk::models::catalog::Catalog;
use orderdesk::models::customer::load_customers;
use orderdesk::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use orderdesk::tui::{Action, App, Message, Tui, render, restore_terminal, setup_terminal};
use orderdesk::{OrderDeskError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = fetch_config()?;
    init_tracing(app_config.log_file.as_deref())?;

    let catalog = Arc::new(Catalog::load(&app_config.data.catalog_path)?);
    let customers = match &app_config.data.customers_path {
        Some(path) => load_customers(path)?,
        None => Vec::new(),
    };
    let mut app = App::new(OrderForm::new(catalog, Arc::new(customers)));

    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), app_config.tick_ms);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Quit);
        }
    });

    let outcome = run(&mut terminal, &mut app, &mut rx).await;
    restore_terminal(&mut terminal)?;

    match outcome? {
        Some(submission) => deliver(&submission, app_config.output.as_deref()),
        None => {
            info!("Order entry abandoned");
            Ok(())
        }
    }
}

/// Draws and dispatches messages until the user quits or submits.
async fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<Option<OrderSubmission>> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let Some(message) = rx.recv().await else {
            return Ok(None);
        };
        if let Some(Action::Submit(submission)) = update(app, message) {
            return Ok(Some(submission));
        }
        if app.should_quit {
            return Ok(None);
        }
    }
}

/// Writes the payload to `output`, or to stdout once the screen is restored.
fn deliver(submission: &OrderSubmission, output: Option<&Path>) -> Result<()> {
    let json = submission.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), total = %submission.total_amount, "Order written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Logs go to `log_file` at DEBUG, or to stderr at WARN so they stay off
/// the alternate screen.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                OrderDeskError::Config(format!("cannot open log file {}: {e}", path.display()))
            })?;
            tracing_subscriber::fmt()
                .with_max_level(LevelFilter::DEBUG)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(LevelFilter::WARN)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
