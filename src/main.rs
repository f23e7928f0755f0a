/* 3rd party libraries */
use clap::Arg;
use crossbeam_channel as cbc;
use log::{info, warn};
use std::io;
use std::thread::Builder;

/* Custom libraries */
use shared::ElevatorState;
use simulation::{Command, Console, SimulationDriver};

/* Modules */
mod config;
mod elevator;
mod shared;
mod simulation;

/* Main */
fn main() {
    let matches = clap::Command::new("elevator_sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Single-car elevator simulator driven from the console")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print state snapshots as JSON instead of status lines"),
        )
        .get_matches();

    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let json_output = matches.is_present("json");

    // Load the configuration, the log level comes from it unless RUST_LOG is set
    let config = config::load_config(config_path);
    let level = match &config {
        Ok(config) => config.logging.level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    let config = unwrap_or_exit!(config, format!("Failed to load {}", config_path));

    info!(
        "Simulating {} floors, max load {:.0} kg",
        config.elevator.n_floors, config.elevator.max_load
    );

    // Initialize channels
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (state_tx, state_rx) = cbc::unbounded::<ElevatorState>();

    // Start the console
    let console_thread = Builder::new().name("console".into());
    let _console_handle = unwrap_or_exit!(
        console_thread.spawn(move || Console::new(io::stdin().lock(), command_tx).run()),
        "Failed to start console thread"
    );

    // Start the simulation
    let driver = SimulationDriver::new(&config, command_rx, state_tx);
    let driver_thread = Builder::new().name("simulation".into());
    let driver_handle = unwrap_or_exit!(
        driver_thread.spawn(move || driver.run()),
        "Failed to start simulation thread"
    );

    // Presentation: print every published snapshot until the driver stops
    for state in state_rx.iter() {
        if json_output {
            match serde_json::to_string(&state) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize state: {}", e),
            }
        } else {
            println!("{}", state);
        }
    }

    if driver_handle.join().is_err() {
        log::error!("Simulation thread panicked");
        std::process::exit(1);
    }
}
