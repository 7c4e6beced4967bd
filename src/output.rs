//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Event, Firewall, Image, Instance, LinodeType, LkeCluster, Region, Volume};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl PrettyPrint for Instance {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Instance: {} ({})", self.label, self.id));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!("Region:         {}", self.region));

        if let Some(ref plan) = self.instance_type {
            lines.push(format!("Type:           {}", plan));
        }

        if let Some(ref image) = self.image {
            lines.push(format!("Image:          {}", image));
        }

        if !self.ipv4.is_empty() {
            lines.push(format!("IPv4:           {}", self.ipv4.join(", ")));
        }

        if let Some(ref specs) = self.specs {
            lines.push(format!(
                "Specs:          {} vCPU, {} MB RAM, {} MB disk",
                specs.vcpus, specs.memory, specs.disk
            ));
        }

        if let Some(ref created) = self.created {
            lines.push(format!("Created:        {}", time(created)));
        }

        if !self.tags.is_empty() {
            lines.push(format!("Tags:           {}", self.tags.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Volume {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Volume: {} ({})", self.label, self.id));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!("Region:         {}", self.region));
        lines.push(format!("Size:           {} GB", self.size));

        match self.linode_id {
            Some(id) => lines.push(format!("Attached to:    {}", id)),
            None => lines.push("Attached to:    -".to_string()),
        }

        if !self.filesystem_path.is_empty() {
            lines.push(format!("Path:           {}", self.filesystem_path));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Firewall {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Firewall: {} ({})", self.label, self.id));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!(
            "Inbound:        {} rules, policy {}",
            self.rules.inbound.len(),
            self.rules.inbound_policy
        ));
        lines.push(format!(
            "Outbound:       {} rules, policy {}",
            self.rules.outbound.len(),
            self.rules.outbound_policy
        ));
        lines.join("\n")
    }
}

impl PrettyPrint for LkeCluster {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("LKE Cluster: {} ({})", self.label, self.id));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!("Region:         {}", self.region));
        lines.push(format!("Kubernetes:     {}", self.k8s_version));
        if self.control_plane.high_availability {
            lines.push("Control Plane:  high availability".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Event {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Event #{}", self.id));
        lines.push(format!("Action:         {}", self.action));
        lines.push(format!("Status:         {:?}", self.status));

        if let Some(ref entity) = self.entity {
            lines.push(format!(
                "Entity:         {} {}",
                entity.entity_type,
                entity.label.as_deref().unwrap_or("-")
            ));
        }

        if let Some(pct) = self.percent_complete {
            lines.push(format!("Progress:       {}%", pct));
        }

        if let Some(secs) = self.time_remaining {
            lines.push(format!("Remaining:      {}s", secs));
        }

        if let Some(ref created) = self.created {
            lines.push(format!("Created:        {}", time(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Region {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Region: {}", self.id));
        lines.push(format!("Label:          {}", self.label));
        lines.push(format!("Country:        {}", self.country));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!("Capabilities:   {}", self.capabilities.join(", ")));
        lines.join("\n")
    }
}

impl PrettyPrint for LinodeType {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Type: {}", self.id));
        lines.push(format!("Label:          {}", self.label));
        lines.push(format!("Class:          {}", self.class));
        lines.push(format!(
            "Specs:          {} vCPU, {} MB RAM, {} MB disk",
            self.vcpus, self.memory, self.disk
        ));
        lines.push(format!(
            "Price:          ${:.2}/mo (${:.3}/hr)",
            self.price.monthly, self.price.hourly
        ));
        lines.join("\n")
    }
}

impl PrettyPrint for Image {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Image: {}", self.id));
        lines.push(format!("Label:          {}", self.label));
        lines.push(format!("Status:         {:?}", self.status));
        lines.push(format!("Size:           {} MB", self.size));

        if let Some(ref vendor) = self.vendor {
            lines.push(format!("Vendor:         {}", vendor));
        }

        if self.deprecated {
            lines.push("Deprecated:     yes".to_string());
        }

        if let Some(ref eol) = self.eol {
            lines.push(format!("End of life:    {}", time(eol)));
        }

        lines.join("\n")
    }
}
