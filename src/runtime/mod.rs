pub mod poller;

pub use poller::{Poller, TickReport};
