#![warn(clippy::all, clippy::pedantic)]

//! Conduit for lane commands from an input producer to the session.
//!
//! The producer is anything that emits one discrete lane value per decision:
//! the bundled keyboard frontend, or an external gesture classifier whose
//! stabilized output changed. The core makes no assumptions about producer
//! timing or confidence. Commands are drained at the top of each scheduler
//! pass, before physics reads the catcher lane; if several arrive between
//! passes, the last one wins.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::trace;

use crate::components::Lane;
use crate::session::GameSession;

pub type CommandSender = Sender<Lane>;
pub type CommandReceiver = Receiver<Lane>;

// Enough headroom that a producer never blocks between scheduler passes.
const COMMAND_BUFFER: usize = 32;

#[must_use]
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    bounded(COMMAND_BUFFER)
}

/// Applies every pending lane command to the session, in arrival order.
pub fn drain_commands(receiver: &CommandReceiver, session: &mut GameSession) {
    while let Ok(lane) = receiver.try_recv() {
        trace!("Lane command: {lane:?}");
        session.on_input_command(lane);
    }
}
