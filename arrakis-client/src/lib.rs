//! Blocking client SDK for the Arrakis sandbox-VM REST server.
//!
//! All VM lifecycle logic lives in the external server; this crate is the
//! request/response mapping plus lifecycle-shaped convenience methods:
//!
//! ```no_run
//! use arrakis_client::SandboxManager;
//!
//! # fn main() -> arrakis_client::Result<()> {
//! let manager = SandboxManager::new("http://localhost:7000");
//! let sandbox = manager.start_sandbox("example-vm")?.scoped();
//! let output = sandbox.run_cmd("echo hello")?;
//! println!("{output}");
//! // VM is destroyed when `sandbox` goes out of scope.
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
mod manager;
mod sandbox;
mod types;

pub use error::{Error, Result};
pub use manager::SandboxManager;
pub use sandbox::{Sandbox, ScopedSandbox};
pub use types::{PortForward, VmInfo};
