use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ListVmsResponse {
    #[serde(default)]
    pub vms: Vec<VmSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VmSummary {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Start / restore
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct StartVmRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RestoreRequest<'a> {
    pub name: &'a str,
    pub snapshot_id: &'a str,
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// Server-side details for a single VM.
///
/// The server omits fields it has no value for (a VM that is still booting
/// has no IP yet), so everything except `port_forwards` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct VmInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub tap_device_name: Option<String>,
    #[serde(default)]
    pub port_forwards: Vec<PortForward>,
}

/// A host-to-guest port mapping configured for a VM.
#[derive(Debug, Clone, Deserialize)]
pub struct PortForward {
    pub host_port: u16,
    pub guest_port: u16,
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct RunCmdRequest<'a> {
    pub cmd: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunCmdResponse {
    #[serde(default)]
    pub output: String,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct SnapshotRequest<'a> {
    pub snapshot_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotResponse {
    pub snapshot_id: String,
}

// ---------------------------------------------------------------------------
// Error body
// ---------------------------------------------------------------------------

/// Non-2xx responses carry `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vm_info_full() {
        let json = r#"{
            "status": "RUNNING",
            "ip": "10.20.1.2/24",
            "tap_device_name": "tap-snap0",
            "port_forwards": [
                {"host_port": 8080, "guest_port": 80, "description": "http"}
            ]
        }"#;
        let info: VmInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.status.as_deref(), Some("RUNNING"));
        assert_eq!(info.ip.as_deref(), Some("10.20.1.2/24"));
        assert_eq!(info.tap_device_name.as_deref(), Some("tap-snap0"));
        assert_eq!(info.port_forwards.len(), 1);
        assert_eq!(info.port_forwards[0].host_port, 8080);
        assert_eq!(info.port_forwards[0].guest_port, 80);
        assert_eq!(info.port_forwards[0].description, "http");
    }

    #[test]
    fn parse_vm_info_sparse() {
        // A VM that hasn't finished booting reports only its status.
        let info: VmInfo = serde_json::from_str(r#"{"status": "STARTING"}"#).unwrap();
        assert_eq!(info.status.as_deref(), Some("STARTING"));
        assert!(info.ip.is_none());
        assert!(info.port_forwards.is_empty());
    }

    #[test]
    fn parse_list_response_empty() {
        let resp: ListVmsResponse = serde_json::from_str(r#"{"vms": []}"#).unwrap();
        assert!(resp.vms.is_empty());
    }

    #[test]
    fn parse_list_response_missing_vms_field() {
        let resp: ListVmsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.vms.is_empty());
    }

    #[test]
    fn parse_error_body() {
        let json = r#"{"error": {"message": "vm not found"}}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.message, "vm not found");
    }

    #[test]
    fn serialize_restore_request() {
        let req = RestoreRequest {
            name: "example-vm",
            snapshot_id: "snap-1",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "example-vm", "snapshot_id": "snap-1"})
        );
    }
}
