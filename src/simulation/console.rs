use crate::simulation::command::Command;
use crossbeam_channel as cbc;
use log::{error, warn};
use std::io::BufRead;

/**
 * # Console
 * Reads button presses and counter edits from a line-based input and forwards them
 * to the simulation driver.
 *
 * Blank lines and lines starting with `#` are skipped. Malformed lines are logged and
 * dropped. When the input ends the driver is told to quit once the car has settled,
 * so a piped script plays out completely.
 *
 * # Fields
 * - `input`:       Line source, normally locked stdin.
 * - `command_tx`:  Sender for parsed commands.
 */
pub struct Console<R: BufRead> {
    input: R,
    command_tx: cbc::Sender<Command>,
}

impl<R: BufRead> Console<R> {
    pub fn new(input: R, command_tx: cbc::Sender<Command>) -> Console<R> {
        Console { input, command_tx }
    }

    pub fn run(self) {
        for line in self.input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Error reading console input: {}", e);
                    break;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match trimmed.parse::<Command>() {
                Ok(Command::Quit) => {
                    let _ = self.command_tx.send(Command::Quit);
                    return;
                }
                Ok(command) => {
                    if self.command_tx.send(command).is_err() {
                        return;
                    }
                }
                Err(e) => warn!("Ignoring '{}': {}", trimmed, e),
            }
        }

        let _ = self.command_tx.send(Command::QuitWhenSettled);
    }
}
