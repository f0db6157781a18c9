use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::{
    fs,
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{self, AtomicBool},
        Arc,
    },
    thread,
    time::Duration,
};

use map_core::*;

mod tcp_server;
mod view_to_string;

use view_to_string::view_update_to_string;

const PROMPT: &str = "\n> ";

#[derive(Parser, Debug)]
#[command(author, version, about = "Shows room cards for rooms hovered on a campus map", long_about = None, rename_all = "kebab-case")]
struct Args {
    #[arg(help = "JSON file of rooms, keyed by room identifier", long = "rooms")]
    rooms_path: PathBuf,

    #[arg(help = "JSON file describing the map (style and SVG source)", long = "map")]
    map_path: PathBuf,

    #[arg(help = "address to accept viewers on over TCP, instead of reading from stdin", long = "serve")]
    serve_addr: Option<String>,

    #[arg(help = "width to assume for the tooltip until it's measured", long = "tooltip-width")]
    tooltip_width: Option<f64>,

    #[arg(help = "height to assume for the tooltip until it's measured", long = "tooltip-height")]
    tooltip_height: Option<f64>,

    #[arg(help = "milliseconds of hover quiet before the tooltip is shown or hidden", long = "settle-delay-ms")]
    settle_delay_ms: Option<u64>,

    #[arg(help = "viewer identity to load room pictures as", long = "identity")]
    identity: Option<u32>,
}

impl Args {
    /// Builds map options from the defaults, overridden by anything provided on the command line.
    fn map_options(&self) -> MapOptions {
        let defaults = MapOptions::default();
        MapOptions {
            tooltip_size: TooltipSize {
                width: self.tooltip_width.unwrap_or(defaults.tooltip_size.width),
                height: self.tooltip_height.unwrap_or(defaults.tooltip_size.height),
            },
            settle_delay: self
                .settle_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    debug!("Arguments: {args:?}");

    let session = load_session(&args)?;
    info!(
        "Loaded map with {} registered rooms",
        session.map().registered_rooms().len()
    );

    if let Some(addr) = args.serve_addr {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(tcp_server::start_server(session, addr));
    }

    run_interactive(&session)
}

/// Loads the rooms and map named in the provided arguments.
fn load_session(args: &Args) -> Result<MapSession> {
    let rooms: RoomCollection = read_json(&args.rooms_path)?;
    let descriptor: MapDescriptor = read_json(&args.map_path)?;
    let map = RoomMap::load(descriptor, &rooms)
        .with_context(|| format!("failed to load map from {}", args.map_path.display()))?;

    Ok(MapSession::new(
        rooms,
        map,
        args.map_options(),
        args.identity.map(ViewerIdentity),
    ))
}

/// Reads and deserializes the JSON file at the provided path.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reads hover input from stdin and renders view updates to stdout until "quit" is entered.
fn run_interactive(session: &MapSession) -> Result<()> {
    let (input_sender, update_receiver) = session.add_viewer("terminal".to_string());

    let quitting = Arc::new(AtomicBool::new(false));
    let quitting_for_thread = Arc::clone(&quitting);

    thread::Builder::new()
        .name("view update receiver".to_string())
        .spawn(move || loop {
            let update = match update_receiver.recv() {
                Ok(x) => x,
                Err(_) => {
                    debug!("View update sender has been dropped");
                    if quitting_for_thread.load(atomic::Ordering::Relaxed) {
                        break;
                    }
                    panic!("Disconnected from map session")
                }
            };
            debug!("Got view update: {update:?}");
            print!("{}{PROMPT}", view_update_to_string(update));
            // a failed flush just means the output shows up late
            let _ = stdout().flush();
        })?;

    let mut input_buf = String::new();
    loop {
        print!("{PROMPT}");
        stdout().flush()?;
        if stdin().read_line(&mut input_buf)? == 0 {
            quitting.store(true, atomic::Ordering::Relaxed);
            return Ok(());
        }
        let input = input_buf.trim();
        debug!("Trimmed input: {input:?}");

        if input == "quit" {
            quitting.store(true, atomic::Ordering::Relaxed);
            println!("ok bye");
            return Ok(());
        }

        input_sender
            .send(input.to_string())
            .context("map session stopped accepting input")?;

        input_buf.clear();
    }
}
