//! Single-instance application session.
//!
//! # Responsibility
//! - Prevent two processes from editing the same ticket file at once.
//!
//! # Invariants
//! - At most one `AppSession` holds a given loopback port.
//! - The guard is released when `release` is called or the value is dropped.
//! - No process-wide state; callers own and pass the session explicitly.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::net::{Ipv4Addr, TcpListener};

#[derive(Debug)]
pub enum SessionError {
    AlreadyRunning { port: u16 },
    Io(io::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRunning { port } => {
                write!(f, "another instance already holds lock port {port}")
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyRunning { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Live application session holding the single-instance lock.
#[derive(Debug)]
pub struct AppSession {
    port: u16,
    _listener: TcpListener,
}

impl AppSession {
    /// Acquires the instance lock by binding `127.0.0.1:port`.
    ///
    /// Port `0` binds an ephemeral port; read it back with [`Self::port`].
    ///
    /// # Errors
    /// - `AlreadyRunning` when the port is held by another session.
    /// - `Io` for any other bind failure.
    pub fn acquire(port: u16) -> Result<Self, SessionError> {
        let listener = match TcpListener::bind((Ipv4Addr::LOCALHOST, port)) {
            Ok(listener) => listener,
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                warn!(
                    "event=session_acquire module=session status=error port={port} error_code=already_running"
                );
                return Err(SessionError::AlreadyRunning { port });
            }
            Err(err) => {
                warn!("event=session_acquire module=session status=error port={port} error={err}");
                return Err(SessionError::Io(err));
            }
        };
        let port = listener.local_addr().map_err(SessionError::Io)?.port();
        info!("event=session_acquire module=session status=ok port={port}");

        Ok(Self {
            port,
            _listener: listener,
        })
    }

    /// Bound lock port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Releases the lock explicitly.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for AppSession {
    fn drop(&mut self) {
        info!(
            "event=session_release module=session status=ok port={}",
            self.port
        );
    }
}
