pub mod channels;

pub use channels::{create_channel, SimEvent};
