//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data. Entities
//! are built from the same JSON shapes the API returns so they exercise
//! the real deserializers.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{Event, Instance, Volume};

const CREATED: &str = "2024-01-01T00:01:01";

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data the default mock server starts with.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub instances: Vec<Instance>,
    pub volumes: Vec<Volume>,
    pub events: Vec<Event>,
}

fn build<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture JSON matches the model")
}

impl Fixtures {
    // =========================================================================
    // Instance Fixtures
    // =========================================================================

    /// A running `g6-standard-1` instance.
    pub fn instance(id: u64, label: &str, region: &str) -> Instance {
        build(json!({
            "id": id,
            "label": label,
            "status": "running",
            "region": region,
            "type": "g6-standard-1",
            "image": "linode/debian12",
            "group": "",
            "ipv4": [format!("203.0.113.{}", id % 250)],
            "ipv6": "2600:3c03::f03c:91ff:fe24:3a2f/128",
            "hypervisor": "kvm",
            "specs": {"disk": 51200, "memory": 2048, "vcpus": 1, "gpus": 0, "transfer": 2000},
            "alerts": {"cpu": 90, "io": 10000, "network_in": 10, "network_out": 10, "transfer_quota": 80},
            "backups": {
                "enabled": false,
                "available": false,
                "schedule": {"day": null, "window": null},
                "last_successful": null
            },
            "watchdog_enabled": true,
            "tags": [],
            "created": CREATED,
            "updated": CREATED
        }))
    }

    /// An instance in a given status.
    pub fn instance_with_status(id: u64, label: &str, status: &str) -> Instance {
        let mut value = serde_json::to_value(Self::instance(id, label, "us-east"))
            .expect("instance serializes");
        value["status"] = json!(status);
        build(value)
    }

    // =========================================================================
    // Volume Fixtures
    // =========================================================================

    /// An active 20 GB volume, attached when `linode_id` is set.
    pub fn volume(id: u64, label: &str, region: &str, linode_id: Option<u64>) -> Volume {
        build(json!({
            "id": id,
            "label": label,
            "status": "active",
            "region": region,
            "size": 20,
            "linode_id": linode_id,
            "linode_label": null,
            "filesystem_path": format!("/dev/disk/by-id/scsi-0Linode_Volume_{label}"),
            "hardware_type": "nvme",
            "encryption": "disabled",
            "tags": [],
            "created": CREATED,
            "updated": CREATED
        }))
    }

    // =========================================================================
    // Event Fixtures
    // =========================================================================

    /// A finished event about one entity.
    pub fn finished_event(
        id: u64,
        action: &str,
        entity_id: u64,
        entity_type: &str,
        label: &str,
    ) -> Event {
        build(json!({
            "id": id,
            "action": action,
            "status": "finished",
            "username": "mock-user",
            "entity": {
                "id": entity_id,
                "label": label,
                "type": entity_type,
                "url": format!("/v4/{}/{}", entity_url_segment(entity_type), entity_id)
            },
            "percent_complete": 100,
            "rate": null,
            "read": false,
            "seen": false,
            "time_remaining": null,
            "duration": 1.0,
            "message": null,
            "created": CREATED
        }))
    }

    /// An event still in progress with a clock-style `time_remaining`.
    pub fn started_event(id: u64, action: &str, entity_id: u64, label: &str) -> Event {
        build(json!({
            "id": id,
            "action": action,
            "status": "started",
            "entity": {"id": entity_id, "label": label, "type": "linode"},
            "percent_complete": 40,
            "time_remaining": "0:01:30",
            "created": CREATED
        }))
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Three instances, one attached and one detached volume, two events.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            instances: vec![
                Self::instance(101, "web-1", "us-east"),
                Self::instance(102, "web-2", "us-east"),
                Self::instance_with_status(103, "worker-1", "offline"),
            ],
            volumes: vec![
                Self::volume(201, "pg-data", "us-east", Some(101)),
                Self::volume(202, "scratch", "us-east", None),
            ],
            events: vec![
                Self::finished_event(301, "linode_boot", 101, "linode", "web-1"),
                Self::started_event(302, "linode_resize", 102, "web-2"),
            ],
        }
    }
}

fn entity_url_segment(entity_type: &str) -> &str {
    match entity_type {
        "linode" => "linode/instances",
        "volume" => "volumes",
        other => other,
    }
}
