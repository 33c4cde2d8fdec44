use anyhow::{Context, Result};
use clap::Parser;
use nightowl_client::composer::dto::{NotificationKind, ScheduleForm};
use nightowl_client::composer::handler::ScheduleComposer;
use nightowl_client::transport::handler::HttpTransport;
use nightowl_core::schedule::dto::DEFAULT_SLEEP_TIME;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nightowl")]
#[command(about = "Plan a late-night study session around your sleep time")]
struct Cli {
    /// File with one task per line. Reads stdin when omitted and piped.
    tasks_file: Option<PathBuf>,
    /// When you plan to go to sleep
    #[arg(short, long, env = "SLEEP_TIME", default_value = DEFAULT_SLEEP_TIME)]
    sleep_time: String,
    /// Base URL of the schedule server
    #[arg(short, long, env = "BACKEND_URL")]
    backend_url: Option<String>,
    /// Use the sample task list
    #[arg(long)]
    sample: bool,
}

fn read_form(cli: &Cli) -> Result<ScheduleForm> {
    let defaults = ScheduleForm::default();

    let tasks = match &cli.tasks_file {
        _ if cli.sample => defaults.tasks,
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tasks from {}", path.display()))?,
        None if std::io::stdin().is_terminal() => defaults.tasks,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read tasks from stdin")?;
            buffer
        }
    };

    Ok(ScheduleForm {
        tasks,
        sleep_time: cli.sleep_time.clone(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let form = read_form(&cli)?;

    let transport = match &cli.backend_url {
        Some(url) => HttpTransport::new(url),
        None => HttpTransport::from_env(),
    };
    log::info!("Requesting schedule from {}", transport.backend_url());

    let (mut composer, mut handle) = ScheduleComposer::new(transport);
    let outcome = composer.submit_form(&form).await;

    while let Ok(notification) = handle.notifications.try_recv() {
        let icon = notification
            .icon
            .map(|glyph| format!("{} ", glyph))
            .unwrap_or_default();

        match notification.kind {
            NotificationKind::Success => println!("{}{}\n", icon, notification.message),
            NotificationKind::Error => eprintln!("{}{}", icon, notification.message),
        }
    }

    let view = handle.view.borrow().clone();
    print!("{}", view.timeline());

    if outcome.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
