pub mod command;
pub mod console;
pub mod driver;
pub mod scheduler;

pub use command::Command;
pub use console::Console;
pub use driver::SimulationDriver;
pub use scheduler::Simulation;
