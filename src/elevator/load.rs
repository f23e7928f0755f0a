use crate::config::ElevatorConfig;

/**
 * Passenger count of the car and the mass derived from it.
 *
 * Boarding is all-or-nothing: a group that would push the car past `max_load`
 * is refused as a whole, so `passenger_count * avg_weight` never exceeds the cap.
 */
#[derive(Debug, Clone)]
pub struct LoadAccount {
    passenger_count: u32,
    avg_weight: f64,
    max_load: f64,
    epsilon: f64,
}

impl LoadAccount {
    pub fn new(config: &ElevatorConfig) -> LoadAccount {
        LoadAccount {
            passenger_count: 0,
            avg_weight: config.avg_weight,
            max_load: config.max_load,
            epsilon: config.load_epsilon,
        }
    }

    pub fn passenger_count(&self) -> u32 {
        self.passenger_count
    }

    pub fn is_empty(&self) -> bool {
        self.passenger_count == 0
    }

    pub fn load(&self) -> f64 {
        self.passenger_count as f64 * self.avg_weight
    }

    pub fn is_overloaded(&self) -> bool {
        self.load() > self.max_load + self.epsilon
    }

    /// Lets up to `requested` passengers off. Returns how many actually left.
    pub fn disembark(&mut self, requested: u32) -> u32 {
        let actual = requested.min(self.passenger_count);
        self.passenger_count -= actual;
        actual
    }

    /// Admits all `requested` passengers, or none if that would overload the car.
    pub fn board(&mut self, requested: u32) -> bool {
        let total = match self.passenger_count.checked_add(requested) {
            Some(total) => total,
            None => return false,
        };
        if total as f64 * self.avg_weight > self.max_load {
            return false;
        }
        self.passenger_count = total;
        true
    }
}
