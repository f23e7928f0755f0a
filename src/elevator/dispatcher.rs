use crate::config::{ElevatorConfig, MotionConfig};
use crate::elevator::{FloorCounters, FloorGeometry, LoadAccount, RequestQueue};
use crate::shared::{Behaviour, Direction, ElevatorState};
use log::{debug, info, warn};

/// Floor an idle, empty car returns to after the dwell period.
pub const HOME_FLOOR: u8 = 0;

/**
 * Timer changes requested by the dispatcher.
 *
 * The dispatcher owns no clocks. Each state-changing call returns the commands the host
 * must apply, in order:
 * - `StartMovement`:   start (or restart) the periodic movement tick.
 * - `StopMovement`:    stop the movement tick.
 * - `ArmReturn`:       start (or restart) the single-shot return-to-base timer.
 * - `CancelReturn`:    stop the return-to-base timer, the car is leaving.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    StartMovement,
    StopMovement,
    ArmReturn,
    CancelReturn,
}

/**
 * Single-car state machine.
 *
 * The `Dispatcher` is the only mutator of the car. Floor requests are queued in FIFO
 * order and served one leg at a time; the direction of a leg is fixed when the leg
 * starts and is never re-evaluated mid-flight.
 *
 * # Fields
 * - `geometry`:        Floor to position mapping.
 * - `queue`:           Pending stops, in request order.
 * - `load`:            Passenger count and load limit.
 * - `current_floor`:   Last floor the car came to rest at.
 * - `position`:        Vertical offset of the cab, equal to the floor position while idle.
 * - `moving`:          True from the start of a leg until arrival.
 * - `direction`:       Direction of the current leg. Only meaningful while `moving`.
 * - `cab_speed`:       Distance covered per movement tick.
 */
#[derive(Debug, Clone)]
pub struct Dispatcher {
    geometry: FloorGeometry,
    queue: RequestQueue,
    load: LoadAccount,
    current_floor: u8,
    position: f64,
    moving: bool,
    direction: Direction,
    cab_speed: f64,
}

impl Dispatcher {
    pub fn new(elevator: &ElevatorConfig, motion: &MotionConfig) -> Dispatcher {
        let geometry = FloorGeometry::new(elevator.n_floors, motion.shaft_height);
        Dispatcher {
            geometry,
            queue: RequestQueue::new(),
            load: LoadAccount::new(elevator),
            current_floor: HOME_FLOOR,
            position: geometry.floor_to_position(HOME_FLOOR),
            moving: false,
            direction: Direction::Up,
            cab_speed: motion.cab_speed,
        }
    }

    /// Call or cab button pressed for `floor`. Invalid and redundant requests are ignored.
    pub fn request_floor(&mut self, floor: i32) -> Vec<TimerCommand> {
        let floor = match u8::try_from(floor) {
            Ok(f) if f < self.geometry.n_floors() => f,
            _ => {
                debug!("Ignoring request for out-of-range floor {}", floor);
                return Vec::new();
            }
        };

        if !self.enqueue(floor) {
            return Vec::new();
        }

        // A running leg keeps its direction, the new stop waits its turn
        if self.moving {
            return Vec::new();
        }

        let mut commands = Vec::new();
        self.start_leg(floor, &mut commands);
        commands
    }

    /// One movement tick. Moves the cab and arrives once the target is reached or passed.
    pub fn advance(&mut self, counters: &impl FloorCounters) -> Vec<TimerCommand> {
        if !self.moving {
            return Vec::new();
        }

        // Floor 0 has the largest coordinate, so going up decreases the position
        match self.direction {
            Direction::Up => self.position -= self.cab_speed,
            Direction::Down => self.position += self.cab_speed,
        }

        let target_floor = self.target_floor();
        let target = self.geometry.floor_to_position(target_floor);
        debug!(
            "Cab at {:.1}, heading {} to floor {} at {:.1}",
            self.position, self.direction, target_floor, target
        );

        let arrived = match self.direction {
            Direction::Up => self.position <= target,
            Direction::Down => self.position >= target,
        };

        if arrived {
            self.arrive(target_floor, counters)
        } else {
            Vec::new()
        }
    }

    /// Ends the current leg at `floor`, exchanges passengers and decides the next leg.
    pub fn arrive(&mut self, floor: u8, counters: &impl FloorCounters) -> Vec<TimerCommand> {
        self.current_floor = floor;
        self.position = self.geometry.floor_to_position(floor);
        self.moving = false;
        let mut commands = vec![TimerCommand::StopMovement];

        let exited = self.load.disembark(counters.exit_count(floor));
        let entering = counters.enter_count(floor);
        if entering > 0 && !self.load.board(entering) {
            warn!(
                "Boarding refused at floor {}: {} more passengers would exceed the load limit",
                floor, entering
            );
        } else if entering > 0 || exited > 0 {
            info!(
                "Floor {}: {} out, {} in, {} aboard ({:.1} kg)",
                floor,
                exited,
                entering,
                self.load.passenger_count(),
                self.load.load()
            );
        }
        info!("Arrived at floor {}", floor);

        self.queue.pop_if_matches(floor);

        if let Some(next) = self.queue.peek_next() {
            self.start_leg(next, &mut commands);
        } else if self.load.is_empty() && floor != HOME_FLOOR {
            debug!("Car idle and empty at floor {}, arming return timer", floor);
            commands.push(TimerCommand::ArmReturn);
        }

        commands
    }

    /// Return-to-base timer fired. Only an empty car is sent home.
    pub fn on_return_timer(&mut self) -> Vec<TimerCommand> {
        if !self.load.is_empty() {
            debug!("Return timer fired with passengers aboard, staying put");
            return Vec::new();
        }
        info!("Car empty after dwell, requesting floor {}", HOME_FLOOR);
        self.request_floor(HOME_FLOOR as i32)
    }

    /// Recomputes the floor extent for a new shaft height. Non-positive heights are ignored.
    pub fn resize_shaft(&mut self, shaft_height: f64) {
        if !(shaft_height > 0.0) {
            debug!("Ignoring shaft height {}", shaft_height);
            return;
        }
        let old_height = self.geometry.floor_height();
        self.geometry = FloorGeometry::new(self.geometry.n_floors(), shaft_height);
        if self.moving {
            self.position *= self.geometry.floor_height() / old_height;
        } else {
            self.position = self.geometry.floor_to_position(self.current_floor);
        }
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn direction(&self) -> Option<Direction> {
        if self.moving {
            Some(self.direction)
        } else {
            None
        }
    }

    pub fn passenger_count(&self) -> u32 {
        self.load.passenger_count()
    }

    pub fn load(&self) -> f64 {
        self.load.load()
    }

    pub fn is_overloaded(&self) -> bool {
        self.load.is_overloaded()
    }

    pub fn pending_stops(&self) -> Vec<u8> {
        self.queue.to_vec()
    }

    pub fn geometry(&self) -> &FloorGeometry {
        &self.geometry
    }

    pub fn snapshot(&self) -> ElevatorState {
        ElevatorState {
            behaviour: if self.moving {
                Behaviour::Moving
            } else {
                Behaviour::Idle
            },
            floor: self.current_floor,
            direction: self.direction(),
            position: self.position,
            passengers: self.load.passenger_count(),
            load: self.load.load(),
            overloaded: self.load.is_overloaded(),
            pending_stops: self.queue.to_vec(),
        }
    }

    fn enqueue(&mut self, floor: u8) -> bool {
        if self.queue.contains(floor) {
            debug!("Floor {} already queued", floor);
            return false;
        }
        if !self.moving && floor == self.current_floor {
            debug!("Already idle at floor {}", floor);
            return false;
        }
        self.queue.push_back(floor)
    }

    /// The return timer only runs while idle, so every leg disarms it.
    fn start_leg(&mut self, next: u8, commands: &mut Vec<TimerCommand>) {
        self.direction = Direction::towards(self.current_floor, next);
        self.moving = true;
        info!(
            "Leaving floor {} {} towards floor {}",
            self.current_floor, self.direction, next
        );
        commands.push(TimerCommand::CancelReturn);
        commands.push(TimerCommand::StartMovement);
    }

    /// Front of the queue, or the neighbouring floor in the direction of travel.
    fn target_floor(&self) -> u8 {
        self.queue.peek_next().unwrap_or_else(|| match self.direction {
            Direction::Up => (self.current_floor + 1).min(self.geometry.n_floors() - 1),
            Direction::Down => self.current_floor.saturating_sub(1),
        })
    }
}
