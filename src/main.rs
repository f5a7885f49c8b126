//! vivamon - ViVa coastal weather sample collection daemon.
//!
//! Collects samples from the weather stations along the Swedish coast that
//! Sjöfartsverket exposes through the "Vind och Vatten" (ViVa) service and
//! warehouses them in a local SQLite database.
//!
//! Three modes, selected at startup:
//!   --list        print the upstream station directory and exit
//!   --sync        backfill history for the given stations over a timespan, then exit
//!   (default)     poll the latest samples for the given stations at a fixed cadence
//!
//! Examples:
//!   vivamon_service --list
//!   vivamon_service -v --sync -t 2D 33,34
//!   vivamon_service -v -p 120 33,34

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vivamon_service::daemon::{Daemon, DaemonConfig};
use vivamon_service::db::SampleStore;
use vivamon_service::ingest::VivaClient;
use vivamon_service::ingest::viva::ViVaSoapClient;
use vivamon_service::model::Station;
use vivamon_service::notify::{ExecNotifier, NoopNotifier, Notifier};
use vivamon_service::pidfile::PidFile;

#[derive(Parser, Debug)]
#[command(
    name = "vivamon_service",
    about = "Collect ViVa coastal weather samples into a local database"
)]
struct Args {
    /// Comma-separated station ids to collect, e.g. "33,34". Use --list to
    /// discover ids.
    stations: Option<String>,

    /// List available stations and exit
    #[arg(short = 'l', long)]
    list: bool,

    /// Sync history for the given stations and exit
    #[arg(short = 's', long)]
    sync: bool,

    /// Timespan of history to sync: "<N>D", "<N>H" or "<N>M"
    #[arg(short = 't', long, default_value = "1D")]
    timespan: String,

    /// Poll interval in seconds
    #[arg(short = 'p', long = "poll-rate", default_value_t = 60)]
    poll_rate: u64,

    /// Database file
    #[arg(short = 'f', long, default_value = "vivamon.db")]
    database: PathBuf,

    /// PID file used to refuse concurrent poll-mode instances
    #[arg(short = 'i', long, default_value = "/tmp/vivamon.pid")]
    pidfile: PathBuf,

    /// Callback executable, run with the station name after each stored batch
    #[arg(short = 'c', long)]
    callback: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parses the sync timespan grammar: "<N>D" days, "<N>H" hours, "<N>M" minutes.
fn parse_timespan(raw: &str) -> Result<chrono::Duration, String> {
    if raw.len() < 2 {
        return Err(format!("invalid timespan format \"{}\"", raw));
    }
    let (digits, magnitude) = raw.split_at(raw.len() - 1);
    let value: i64 = digits
        .parse()
        .map_err(|_| format!("invalid timespan format \"{}\"", raw))?;

    match magnitude.to_uppercase().as_str() {
        "D" => Ok(chrono::Duration::days(value)),
        "H" => Ok(chrono::Duration::hours(value)),
        "M" => Ok(chrono::Duration::minutes(value)),
        _ => Err(format!("invalid timespan format \"{}\"", raw)),
    }
}

/// Parses the positional station id list, e.g. "33,34".
fn parse_station_ids(raw: &str) -> Result<Vec<u32>, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid station id \"{}\"", part))
        })
        .collect()
}

fn usage_error(message: &str) -> ! {
    eprintln!("error: {}", message);
    std::process::exit(1);
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vivamon_service={}", default_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_station_list(stations: &[Station]) {
    println!("{:<6} {:<10} {:<10} {:<50}", "ID", "Lon", "Lat", "Name");
    println!("{}", "-".repeat(80));
    for station in stations {
        println!(
            "{:<6} {:<10} {:<10} {:<50}",
            station.id, station.longitude, station.latitude, station.name
        );
    }
}

fn main() {
    // clap's own usage failures should exit 1 like our validation does.
    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });

    init_logging(args.verbose);

    let client = match ViVaSoapClient::new() {
        Ok(client) => client,
        Err(e) => usage_error(&e.to_string()),
    };

    if args.list {
        match client.list_stations() {
            Ok(stations) => print_station_list(&stations),
            Err(e) => {
                eprintln!("error: failed to fetch station list: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Everything past here operates on concrete stations.
    let station_ids = match &args.stations {
        Some(raw) => match parse_station_ids(raw) {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => usage_error("no stations specified"),
            Err(message) => usage_error(&message),
        },
        None => usage_error("no stations specified"),
    };

    let timespan = match parse_timespan(&args.timespan) {
        Ok(timespan) => timespan,
        Err(message) => usage_error(&message),
    };

    let notifier: Box<dyn Notifier> = match &args.callback {
        Some(path) => {
            if !path.is_file() {
                usage_error(&format!("no such callback file '{}'", path.display()));
            }
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let executable = std::fs::metadata(path)
                    .map(|m| m.permissions().mode() & 0o111 != 0)
                    .unwrap_or(false);
                if !executable {
                    usage_error(&format!(
                        "callback file '{}' is not an executable",
                        path.display()
                    ));
                }
            }
            Box::new(ExecNotifier::new(path.clone()))
        }
        None => Box::new(NoopNotifier),
    };

    info!(database = %args.database.display(), "opening sample database");
    let store = match SampleStore::open(&args.database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: failed to open database '{}': {}", args.database.display(), e);
            std::process::exit(1);
        }
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
        }) {
            eprintln!("error: failed to install interrupt handler: {}", e);
            std::process::exit(1);
        }
    }

    let config = DaemonConfig {
        station_ids,
        poll_interval: Duration::from_secs(args.poll_rate),
    };
    let mut daemon = Daemon::new(config, client, notifier, store, shutdown);

    if args.sync {
        let until = chrono::Utc::now();
        let from = until - timespan;
        daemon.sync_history(from, until);
        return;
    }

    // Poll mode: refuse to run alongside another instance.
    let pidfile = match PidFile::create(args.pidfile.clone()) {
        Ok(pidfile) => pidfile,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            usage_error(&format!("{} already exists, exiting", args.pidfile.display()))
        }
        Err(e) => {
            eprintln!(
                "error: failed to create pid file '{}': {}",
                args.pidfile.display(),
                e
            );
            std::process::exit(1);
        }
    };

    daemon.run_poll();
    drop(pidfile);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
