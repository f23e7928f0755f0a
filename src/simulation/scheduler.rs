use crate::config::Config;
use crate::elevator::{Dispatcher, PassengerCounters, TimerCommand};
use crate::shared::ElevatorState;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Timer {
    Movement,
    ReturnToBase,
}

/**
 * Deterministic event-queue driver for the dispatcher.
 *
 * Owns the dispatcher, the per-floor counters and two virtual timers measured in
 * milliseconds: the periodic movement tick and the single-shot return-to-base timer.
 * Time only moves through `advance_time`, which fires every timer falling due inside
 * the window in due order (movement first on ties).
 *
 * # Fields
 * - `dispatcher`:      The car state machine.
 * - `counters`:        Exit/enter counters read at arrival.
 * - `now`:             Virtual time in ms.
 * - `movement_due`:    Next movement tick, `None` while the tick is stopped.
 * - `return_due`:      Deadline of the return timer, `None` while disarmed.
 * - `tick_interval`:   Period of the movement tick in ms.
 * - `return_dwell`:    Dwell before the return timer fires, in ms.
 */
pub struct Simulation {
    dispatcher: Dispatcher,
    counters: PassengerCounters,
    now: u64,
    movement_due: Option<u64>,
    return_due: Option<u64>,
    tick_interval: u64,
    return_dwell: u64,
}

impl Simulation {
    pub fn new(config: &Config) -> Simulation {
        Simulation {
            dispatcher: Dispatcher::new(&config.elevator, &config.motion),
            counters: PassengerCounters::new(config.elevator.n_floors),
            now: 0,
            movement_due: None,
            return_due: None,
            tick_interval: config.motion.tick_interval.max(1),
            return_dwell: config.motion.return_dwell,
        }
    }

    pub fn request_floor(&mut self, floor: i32) {
        let commands = self.dispatcher.request_floor(floor);
        self.apply(commands);
    }

    pub fn set_exit_count(&mut self, floor: u8, count: u32) {
        self.counters.set_exit_count(floor, count);
    }

    pub fn set_enter_count(&mut self, floor: u8, count: u32) {
        self.counters.set_enter_count(floor, count);
    }

    pub fn resize_shaft(&mut self, shaft_height: f64) {
        self.dispatcher.resize_shaft(shaft_height);
    }

    /// Moves virtual time forward by `elapsed` ms, firing every timer that falls due.
    pub fn advance_time(&mut self, elapsed: u64) {
        let deadline = self.now + elapsed;

        while let Some((due, timer)) = self.next_due(deadline) {
            self.now = due;
            match timer {
                Timer::Movement => {
                    self.movement_due = Some(due + self.tick_interval);
                    let commands = self.dispatcher.advance(&self.counters);
                    self.apply(commands);
                }
                Timer::ReturnToBase => {
                    self.return_due = None;
                    debug!("Return timer fired at {} ms", due);
                    let commands = self.dispatcher.on_return_timer();
                    self.apply(commands);
                }
            }
        }

        self.now = deadline;
    }

    /// True when the car is idle and no timer is pending.
    pub fn is_settled(&self) -> bool {
        !self.dispatcher.is_moving() && self.movement_due.is_none() && self.return_due.is_none()
    }

    pub fn movement_timer_running(&self) -> bool {
        self.movement_due.is_some()
    }

    pub fn return_timer_armed(&self) -> bool {
        self.return_due.is_some()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn snapshot(&self) -> ElevatorState {
        self.dispatcher.snapshot()
    }

    fn next_due(&self, deadline: u64) -> Option<(u64, Timer)> {
        let movement = self
            .movement_due
            .filter(|due| *due <= deadline)
            .map(|due| (due, Timer::Movement));
        let return_to_base = self
            .return_due
            .filter(|due| *due <= deadline)
            .map(|due| (due, Timer::ReturnToBase));

        match (movement, return_to_base) {
            (Some(m), Some(r)) => Some(if r.0 < m.0 { r } else { m }),
            (m, r) => m.or(r),
        }
    }

    fn apply(&mut self, commands: Vec<TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::StartMovement => {
                    self.movement_due = Some(self.now + self.tick_interval)
                }
                TimerCommand::StopMovement => self.movement_due = None,
                TimerCommand::ArmReturn => self.return_due = Some(self.now + self.return_dwell),
                TimerCommand::CancelReturn => self.return_due = None,
            }
        }
    }
}
