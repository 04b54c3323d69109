//! Arrakis SDK cookbook - runnable examples against a live Arrakis server.
//!
//! Demonstrates the core client workflows: listing and starting VMs,
//! lifecycle management, snapshot/restore, and scoped auto-cleanup. Each
//! example runs under a standardized error handler so one failure doesn't
//! stop the rest.

use std::thread;
use std::time::Duration;

use arrakis_client::{Error, SandboxManager};
use clap::Parser;

// TODO: Remove once the server exposes a boot-readiness signal.
const VM_START_WAIT: Duration = Duration::from_secs(3);

const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "cookbook", version)]
struct Cli {
    /// Base URL of the Arrakis REST server
    #[arg(long, env = "ARRAKIS_URL", default_value = "http://localhost:7000")]
    base_url: String,
}

fn main() {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let manager = SandboxManager::new(&cli.base_url);

    println!("Arrakis SDK Cookbook");
    println!("====================");
    println!("Make sure the Arrakis server is running at {}", cli.base_url);

    println!("\nRunning Basic Usage Example...");
    run_example(&manager, basic_usage_example);

    println!("\nRunning VM Management Example...");
    run_example(&manager, vm_management_example);

    println!("\nRunning Snapshot Example...");
    run_example(&manager, snapshot_example);

    println!("\nRunning Scoped Cleanup Example...");
    run_example(&manager, scoped_cleanup_example);

    println!("\nAll examples completed.");
}

/// Run one example with standardized error handling: API errors print the
/// server's message, transport errors add a reachability hint. Either way
/// the cookbook moves on to the next example.
fn run_example(
    manager: &SandboxManager,
    example: fn(&SandboxManager) -> arrakis_client::Result<()>,
) {
    match example(manager) {
        Ok(()) => {}
        Err(Error::Api { message, .. }) => {
            println!("{RED}API error: {message}{RESET}");
        }
        Err(e) => {
            println!("{RED}Error: {e}{RESET}");
            println!(
                "{RED}Make sure the Arrakis server is running and accessible at {}{RESET}",
                manager.base_url()
            );
        }
    }
}

/// Basic usage: list existing VMs, start one if none exist.
fn basic_usage_example(manager: &SandboxManager) -> arrakis_client::Result<()> {
    println!("=== Basic Usage Example ===");

    println!("Listing all VMs:");
    let sandboxes = manager.list_all()?;
    for sandbox in &sandboxes {
        println!("  - {}", sandbox.name());
    }

    if sandboxes.is_empty() {
        println!("Starting a new VM...");
        let sandbox = manager.start_sandbox("example-vm")?;
        println!("Started VM: {}", sandbox.name());

        println!("Waiting for VM to initialize...");
        thread::sleep(VM_START_WAIT);
    }

    Ok(())
}

/// VM lifecycle: start, inspect details and port forwards, destroy.
fn vm_management_example(manager: &SandboxManager) -> arrakis_client::Result<()> {
    println!("=== VM Management Example ===");

    println!("Starting a new VM...");
    let sandbox = manager.start_sandbox("lifecycle-example")?;
    println!("Started VM: {}", sandbox.name());

    println!("Waiting for VM to initialize...");
    thread::sleep(VM_START_WAIT);

    println!("Getting VM details:");
    let details = sandbox.info()?;
    println!("  Status: {}", details.status.as_deref().unwrap_or("-"));
    println!("  IP: {}", details.ip.as_deref().unwrap_or("-"));
    println!(
        "  Tap Device: {}",
        details.tap_device_name.as_deref().unwrap_or("-")
    );

    if !details.port_forwards.is_empty() {
        println!("  Port Forwards:");
        for pf in &details.port_forwards {
            println!(
                "    Host:{} -> Guest:{} ({})",
                pf.host_port, pf.guest_port, pf.description
            );
        }
    }

    println!("Destroying the VM...");
    sandbox.destroy()?;
    println!("VM destroyed");

    Ok(())
}

/// Snapshot workflow: mutate state, snapshot, mutate again, destroy,
/// restore from the snapshot and verify the pre-snapshot state came back.
fn snapshot_example(manager: &SandboxManager) -> arrakis_client::Result<()> {
    println!("=== Snapshot Example ===");

    println!("Starting a test VM for snapshots...");
    let sandbox = manager.start_sandbox("snapshot-example")?;

    println!("Waiting for VM to initialize...");
    thread::sleep(VM_START_WAIT);

    println!("Modifying VM state before snapshot...");
    let output = sandbox.run_cmd("echo 'test data before snapshot' > /tmp/testfile")?;
    println!("Command output: {output}");

    println!("Creating a snapshot...");
    let snapshot_id = sandbox.snapshot("initial-state")?;
    println!("Created snapshot with ID: {snapshot_id}");

    println!("Modifying VM state after snapshot...");
    let output = sandbox.run_cmd("echo 'test data after snapshot' > /tmp/testfile")?;
    println!("Command output: {output}");

    println!("Verifying file was created...");
    let output = sandbox.run_cmd("cat /tmp/testfile")?;
    println!("File content: {output}");

    println!("Destroying the sandbox...");
    sandbox.destroy()?;

    println!("Restoring from snapshot...");
    let sandbox = manager.restore("snapshot-example", &snapshot_id)?;
    println!("Snapshot restored");

    println!("Verifying file state after restore...");
    let output = sandbox.run_cmd("cat /tmp/testfile")?;
    if output == "test data before snapshot\n" {
        println!("File content is correct after restore (as expected)");
    } else {
        println!("Unexpected content after restore: {output}");
    }

    println!("Cleaning up...");
    sandbox.destroy()?;
    println!("VM destroyed");

    Ok(())
}

/// Scoped cleanup: the guard destroys the VM on every exit path out of the
/// block, including the error returns above it.
fn scoped_cleanup_example(manager: &SandboxManager) -> arrakis_client::Result<()> {
    println!("=== Scoped Cleanup Example ===");

    println!("Starting a VM with a scoped guard (auto-destroys when done)...");
    {
        let sandbox = manager.start_sandbox("auto-cleanup-example")?.scoped();
        println!("Started VM: {}", sandbox.name());

        println!("Waiting for VM to initialize...");
        thread::sleep(VM_START_WAIT);

        println!("Running commands in the VM...");
        let output = sandbox.run_cmd("echo 'Hello from the scoped sandbox'")?;
        println!("Command output: {output}");

        println!("Leaving scope - VM will be destroyed automatically");
    }

    println!("VM has been destroyed automatically");
    Ok(())
}
