use std::sync::mpsc::{channel, Receiver, Sender};

use crate::map::cell::Cell;

/// Notifications the simulation publishes for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Grabbed {
        id: usize,
        resource: Cell,
        remaining: u32,
    },
    Deposited {
        id: usize,
        amount: u32,
        total: u32,
    },
    ReachedStart {
        id: usize,
    },
    ResourceDepleted {
        at: Cell,
    },
    GameOver {
        tick: u64,
        total: u32,
    },
}

/// Creates the simulation-to-host event channel.
pub fn create_channel() -> (Sender<SimEvent>, Receiver<SimEvent>) {
    channel()
}
