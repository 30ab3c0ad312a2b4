use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds `addr` before any server task is spawned, so a taken port is reported to the caller
/// and port 0 resolves to a concrete port up front.
pub(crate) async fn bind_listener(addr: SocketAddr) -> io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}
