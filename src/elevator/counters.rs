/// Per-floor passenger counters, read by the dispatcher at the moment of arrival.
pub trait FloorCounters {
    fn exit_count(&self, floor: u8) -> u32;
    fn enter_count(&self, floor: u8) -> u32;
}

/// Editable counters, one pair per floor. They keep their values after a stop is served.
#[derive(Debug, Clone)]
pub struct PassengerCounters {
    exit: Vec<u32>,
    enter: Vec<u32>,
}

impl PassengerCounters {
    pub fn new(n_floors: u8) -> PassengerCounters {
        PassengerCounters {
            exit: vec![0; n_floors as usize],
            enter: vec![0; n_floors as usize],
        }
    }

    pub fn set_exit_count(&mut self, floor: u8, count: u32) {
        if let Some(slot) = self.exit.get_mut(floor as usize) {
            *slot = count;
        }
    }

    pub fn set_enter_count(&mut self, floor: u8, count: u32) {
        if let Some(slot) = self.enter.get_mut(floor as usize) {
            *slot = count;
        }
    }
}

impl FloorCounters for PassengerCounters {
    fn exit_count(&self, floor: u8) -> u32 {
        self.exit.get(floor as usize).copied().unwrap_or(0)
    }

    fn enter_count(&self, floor: u8) -> u32 {
        self.enter.get(floor as usize).copied().unwrap_or(0)
    }
}
