//! Connectivity checks used to explain translation failures

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};

use crate::shared::settings::ConnectivitySettings;

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// Raw TCP connect to a well-known host. No payload is exchanged.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    pub fn from_settings(settings: &ConnectivitySettings) -> Self {
        Self::new(settings.probe_host.clone(), settings.probe_port, settings.probe_timeout())
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn is_reachable(&self) -> bool {
        let target = (self.host.as_str(), self.port);
        match timeout(self.timeout, TcpStream::connect(target)).await {
            Ok(Ok(stream)) => {
                // Dropping the stream closes the connection
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                log::info!("[Probe] {}:{} unreachable: {}", self.host, self.port, e);
                false
            }
            Err(_) => {
                log::info!("[Probe] {}:{} timed out after {:?}", self.host, self.port, self.timeout);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_reachable_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let probe = TcpProbe::new("127.0.0.1", port, Duration::from_secs(2));
        assert!(probe.is_reachable().await);
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = TcpProbe::new("127.0.0.1", port, Duration::from_secs(2));
        assert!(!probe.is_reachable().await);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_unreachable() {
        let probe = TcpProbe::new("host.invalid", 443, Duration::from_secs(2));
        assert!(!probe.is_reachable().await);
    }
}
