use crate::config::Config;
use crate::shared::ElevatorState;
use crate::simulation::{Command, Simulation};
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::Duration;

/**
 * Real-time host loop around a `Simulation`.
 *
 * Every wall-clock tick of `tick_interval` moves virtual time forward by the same amount,
 * so the movement timer fires once per tick while the car is moving. Commands are applied
 * between ticks, one at a time.
 *
 * # Fields
 * - `simulation`:      The scheduled dispatcher.
 * - `tick_interval`:   Wall-clock period of the host tick.
 * - `command_rx`:      Receives console commands.
 * - `state_tx`:        Publishes snapshots to the presentation layer.
 * - `last_published`:  Last snapshot sent, used to suppress unchanged updates.
 */
pub struct SimulationDriver {
    simulation: Simulation,
    tick_interval: Duration,
    command_rx: cbc::Receiver<Command>,
    state_tx: cbc::Sender<ElevatorState>,
    last_published: Option<ElevatorState>,
}

impl SimulationDriver {
    pub fn new(
        config: &Config,
        command_rx: cbc::Receiver<Command>,
        state_tx: cbc::Sender<ElevatorState>,
    ) -> SimulationDriver {
        SimulationDriver {
            simulation: Simulation::new(config),
            tick_interval: Duration::from_millis(config.motion.tick_interval.max(1)),
            command_rx,
            state_tx,
            last_published: None,
        }
    }

    pub fn run(mut self) {
        let ticker = cbc::tick(self.tick_interval);
        let tick_ms = self.tick_interval.as_millis() as u64;
        let mut console_open = true;
        let mut quit_when_settled = false;

        self.publish(true);

        loop {
            let command_rx = if console_open {
                self.command_rx.clone()
            } else {
                cbc::never()
            };

            cbc::select! {
                recv(command_rx) -> command => {
                    match command {
                        Ok(Command::Quit) => {
                            info!("Quit requested");
                            break;
                        }
                        Ok(Command::QuitWhenSettled) => quit_when_settled = true,
                        Ok(command) => {
                            let force = self.handle_command(command);
                            self.publish(force);
                        }
                        Err(_) => {
                            // Console gone, wait for the car to settle
                            console_open = false;
                            quit_when_settled = true;
                        }
                    }
                }
                recv(ticker) -> _ => {
                    self.simulation.advance_time(tick_ms);
                    self.publish(false);
                }
            }

            if quit_when_settled && self.simulation.is_settled() {
                info!("Car settled at floor {}, stopping", self.simulation.dispatcher().current_floor());
                break;
            }
        }
    }

    /// Applies one command. Returns true when a snapshot must be published regardless of changes.
    fn handle_command(&mut self, command: Command) -> bool {
        debug!("Handling {:?}", command);
        match command {
            Command::HallCall(floor) | Command::CabCall(floor) => {
                self.simulation.request_floor(floor)
            }
            Command::SetEnter { floor, count } => self.simulation.set_enter_count(floor, count),
            Command::SetExit { floor, count } => self.simulation.set_exit_count(floor, count),
            Command::Resize(height) => self.simulation.resize_shaft(height),
            Command::Status => return true,
            Command::Quit | Command::QuitWhenSettled => {}
        }
        false
    }

    /// Sends a snapshot when forced or when floor, behaviour or occupancy changed.
    fn publish(&mut self, force: bool) {
        let state = self.simulation.snapshot();
        let changed = match &self.last_published {
            Some(last) => {
                last.floor != state.floor
                    || last.behaviour != state.behaviour
                    || last.passengers != state.passengers
                    || last.pending_stops != state.pending_stops
            }
            None => true,
        };

        if force || changed {
            let _ = self.state_tx.send(state.clone());
            self.last_published = Some(state);
        }
    }
}
