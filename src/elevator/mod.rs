pub mod counters;
pub mod dispatcher;
pub mod geometry;
pub mod load;
pub mod request_queue;
pub mod dispatcher_tests;

pub use counters::{FloorCounters, PassengerCounters};
pub use dispatcher::{Dispatcher, TimerCommand};
pub use geometry::FloorGeometry;
pub use load::LoadAccount;
pub use request_queue::RequestQueue;
