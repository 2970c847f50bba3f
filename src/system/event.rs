//! Command Channel
//!
//! Carries remote commands from the listener task to the control loop.
//! The listener never touches find state itself; it reports what a request
//! asked for and the loop applies it on its next tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use locator_core::http::Command;

/// Multi-producer, single-consumer command channel
static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, 4> = Channel::new();

/// Sends a command to the control loop
pub async fn send(command: Command) {
    COMMAND_CHANNEL.sender().send(command).await;
}

/// Takes the next pending command, if any, without waiting
pub fn try_next() -> Option<Command> {
    COMMAND_CHANNEL.receiver().try_receive().ok()
}
