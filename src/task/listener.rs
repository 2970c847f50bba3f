//! Request Listener Task
//!
//! Owns the server socket for the lifetime of the firmware. The port is
//! bound as soon as the stack has an address and stays bound between
//! exchanges, so a connection attempt always finds a listener rather than
//! racing the control loop's tick.
//!
//! One connection is serviced at a time; commands are forwarded to the
//! control loop over the command channel and the loop applies them on its
//! next tick.

use crate::system::config::{ACCEPT_RETRY_DELAY, HTTP_PORT, SOCKET_TIMEOUT};
use crate::system::{event, listener, status};
use defmt::{info, warn};
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::{with_timeout, Timer};

#[embassy_executor::task]
pub async fn listen(stack: Stack<'static>) {
    let mut rx_buffer = [0u8; 1024];
    let mut tx_buffer = [0u8; 1024];

    stack.wait_config_up().await;
    info!("listening on port {}", HTTP_PORT);

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        match socket.accept(HTTP_PORT).await {
            Err(e) => {
                warn!("accept error: {:?}", e);
                Timer::after(ACCEPT_RETRY_DELAY).await;
            }
            Ok(()) => {
                let status = *status::STATUS.lock().await;
                match listener::serve(&mut socket, status).await {
                    Ok(Some(command)) => event::send(command).await,
                    Ok(None) => {}
                    Err(e) => warn!("connection error: {:?}", e),
                }
                socket.close();
                // Bounded drain so a stuck peer cannot wedge the listener.
                let _ = with_timeout(SOCKET_TIMEOUT, socket.flush()).await;
            }
        }
        socket.abort();
    }
}
