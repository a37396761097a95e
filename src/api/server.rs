//! Explicit server lifecycle: bind, serve, and graceful shutdown.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use super::{AppState, router};

/// A bound but not yet running API server.
///
/// Constructed explicitly and owned by the caller.
pub struct ApiServer {
    listener: TcpListener,
    app: Router,
}

impl ApiServer {
    /// Binds `addr` and prepares the router over `state`.
    ///
    /// Port 0 picks an ephemeral port; read it back with [`ApiServer::local_addr`].
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, state: Arc<AppState>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            app: router(state),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until the process is killed.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that stopped the accept loop.
    pub async fn serve(self) -> io::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serves until `signal` resolves, then drains in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that stopped the accept loop.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!(%addr, "API server listening");
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(signal)
            .await?;
        info!(%addr, "API server stopped");
        Ok(())
    }

    /// Runs the server on a background task.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the bound address cannot be read.
    pub fn spawn(self) -> io::Result<ServerHandle> {
        let addr = self.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(self.serve_with_shutdown(async {
            // A dropped sender also stops the server.
            let _ = rx.await;
        }));
        Ok(ServerHandle {
            addr,
            shutdown: tx,
            task,
        })
    }
}

/// Handle to a server started with [`ApiServer::spawn`].
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signals graceful shutdown and waits for the server task to finish.
    ///
    /// # Errors
    ///
    /// Returns the server's I/O error, or an error if the task panicked.
    pub async fn shutdown(self) -> io::Result<()> {
        let _ = self.shutdown.send(());
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(io::Error::other(e)),
        }
    }
}
