use crate::error::Result;
use crate::http::Transport;
use crate::sandbox::Sandbox;
use crate::types::{ListVmsResponse, RestoreRequest, StartVmRequest};

/// Stateless façade over the Arrakis REST server. Holds the base URL and
/// the shared connection pool; every method is a single blocking request.
#[derive(Debug, Clone)]
pub struct SandboxManager {
    http: Transport,
}

impl SandboxManager {
    /// `base_url` is the server root, e.g. `http://localhost:7000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Transport::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// List all VMs known to the server. Returns an empty vec when none
    /// exist. Fails with [`Error::Unavailable`] when the server cannot be
    /// reached, or [`Error::Api`] on a non-2xx response.
    ///
    /// [`Error::Unavailable`]: crate::Error::Unavailable
    /// [`Error::Api`]: crate::Error::Api
    pub fn list_all(&self) -> Result<Vec<Sandbox>> {
        let resp: ListVmsResponse = self.http.get_json("/v1/vms")?;
        Ok(resp
            .vms
            .into_iter()
            .map(|vm| Sandbox::new(self.http.clone(), vm.name))
            .collect())
    }

    /// Start a new VM and return a handle bound to `name`. The server
    /// rejects collisions with an [`Error::Api`] (e.g. name already taken).
    ///
    /// [`Error::Api`]: crate::Error::Api
    pub fn start_sandbox(&self, name: &str) -> Result<Sandbox> {
        self.http.post_ok("/v1/vms", &StartVmRequest { name })?;
        Ok(Sandbox::new(self.http.clone(), name.to_string()))
    }

    /// Restore a VM from a snapshot taken earlier with
    /// [`Sandbox::snapshot`]. Fails with [`Error::Api`] when the snapshot
    /// ID or name is invalid.
    ///
    /// [`Error::Api`]: crate::Error::Api
    pub fn restore(&self, name: &str, snapshot_id: &str) -> Result<Sandbox> {
        self.http
            .post_ok("/v1/vms/restore", &RestoreRequest { name, snapshot_id })?;
        Ok(Sandbox::new(self.http.clone(), name.to_string()))
    }

    /// Destroy every VM on the server.
    pub fn destroy_all(&self) -> Result<()> {
        self.http.delete("/v1/vms")
    }
}
