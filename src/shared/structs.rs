/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` towards `to`. Equal floors count as down.
    pub fn towards(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/**
 * Snapshot of the car polled by the presentation layer.
 *
 * # Fields
 * - `behaviour`:       Idle or moving.
 * - `floor`:           Last floor the car came to rest at.
 * - `direction`:       Direction of the current leg, `None` while idle.
 * - `position`:        Vertical offset of the cab in the shaft.
 * - `passengers`:      Current occupants.
 * - `load`:            Derived mass in kg.
 * - `overloaded`:      Whether `load` exceeds the configured maximum.
 * - `pending_stops`:   Queued floors in service order.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorState {
    pub behaviour: Behaviour,
    pub floor: u8,
    pub direction: Option<Direction>,
    pub position: f64,
    pub passengers: u32,
    pub load: f64,
    pub overloaded: bool,
    #[serde(rename = "pendingStops")]
    pub pending_stops: Vec<u8>,
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Floor {} | ", self.floor)?;
        match (self.behaviour, self.direction) {
            (Behaviour::Moving, Some(direction)) => write!(f, "moving {}", direction)?,
            (Behaviour::Moving, None) => write!(f, "moving")?,
            (Behaviour::Idle, _) => write!(f, "idle")?,
        }
        write!(f, " | Load: {:.1} kg | Persons: {}", self.load, self.passengers)?;
        if self.overloaded {
            write!(f, " | OVERLOAD")?;
        }
        Ok(())
    }
}
