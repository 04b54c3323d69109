use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::error::Result;
use crate::http::Transport;
use crate::types::{RunCmdRequest, RunCmdResponse, SnapshotRequest, SnapshotResponse, VmInfo};

/// Lightweight handle naming a remote VM. Holds no remote resource itself;
/// dropping a `Sandbox` leaves the VM running. Cloning is cheap (the
/// transport's pool is shared).
#[derive(Debug, Clone)]
pub struct Sandbox {
    http: Transport,
    name: String,
}

impl Sandbox {
    pub(crate) fn new(http: Transport, name: String) -> Self {
        Self { http, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the server-side details for this VM (status, IP, tap device,
    /// port forwards). Fails with [`Error::Api`] when the VM no longer
    /// exists server-side.
    ///
    /// [`Error::Api`]: crate::Error::Api
    pub fn info(&self) -> Result<VmInfo> {
        self.http.get_json(&format!("/v1/vms/{}", self.name))
    }

    /// Run a shell command inside the VM and return its captured output.
    pub fn run_cmd(&self, cmd: &str) -> Result<String> {
        let resp: RunCmdResponse = self
            .http
            .post_json(&format!("/v1/vms/{}/cmd", self.name), &RunCmdRequest { cmd })?;
        Ok(resp.output)
    }

    /// Snapshot the VM's current state under `tag`. Returns the snapshot ID
    /// to pass to [`SandboxManager::restore`].
    ///
    /// [`SandboxManager::restore`]: crate::SandboxManager::restore
    pub fn snapshot(&self, tag: &str) -> Result<String> {
        let resp: SnapshotResponse = self.http.post_json(
            &format!("/v1/vms/{}/snapshots", self.name),
            &SnapshotRequest { snapshot_id: tag },
        )?;
        Ok(resp.snapshot_id)
    }

    /// Destroy the remote VM. Whether a repeated delete is a no-op is up to
    /// the server.
    pub fn destroy(&self) -> Result<()> {
        self.http.delete(&format!("/v1/vms/{}", self.name))
    }

    /// Convert into a guard that destroys the VM when dropped.
    pub fn scoped(self) -> ScopedSandbox {
        ScopedSandbox {
            inner: self,
            armed: true,
        }
    }
}

/// Drop guard around a [`Sandbox`]: the VM is destroyed on every exit path
/// out of the owning scope (normal, early return, panic), exactly once.
///
/// Drop cannot surface errors, so a failed destroy is only logged; call
/// [`ScopedSandbox::destroy`] instead when the caller needs the result.
#[derive(Debug)]
pub struct ScopedSandbox {
    inner: Sandbox,
    armed: bool,
}

impl ScopedSandbox {
    /// Tear the VM down now, disarming the guard. Unlike dropping, this
    /// surfaces the server's answer.
    pub fn destroy(mut self) -> Result<()> {
        self.armed = false;
        self.inner.destroy()
    }

    /// Disarm the guard and hand back a plain handle; the VM keeps running.
    pub fn into_inner(mut self) -> Sandbox {
        self.armed = false;
        self.inner.clone()
    }
}

impl Deref for ScopedSandbox {
    type Target = Sandbox;

    fn deref(&self) -> &Sandbox {
        &self.inner
    }
}

impl DerefMut for ScopedSandbox {
    fn deref_mut(&mut self) -> &mut Sandbox {
        &mut self.inner
    }
}

impl Drop for ScopedSandbox {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(e) = self.inner.destroy() {
            warn!(vm = %self.inner.name, "scoped destroy failed: {e}");
        }
    }
}
