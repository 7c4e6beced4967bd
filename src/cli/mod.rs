//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the linodeapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Linode API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "linodeapi", about = "Linode API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Config profile to read instead of the LINODE_TOKEN environment.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Numeric ID, or slug for regions, types and images.
        id: String,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed). All pages are fetched when omitted.
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        page_size: Option<u32>,

        /// Raw X-Filter JSON, e.g. '{"region": "us-east"}'.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// Numeric ID, or slug for images.
        id: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A compute instance.
    #[value(alias = "instances", alias = "linode")]
    Instance,
    /// A block storage volume.
    #[value(alias = "volumes")]
    Volume,
    /// A cloud firewall.
    #[value(alias = "firewalls")]
    Firewall,
    /// A Kubernetes cluster.
    #[value(alias = "lke-clusters", alias = "lke")]
    LkeCluster,
    /// A data center region.
    #[value(alias = "regions")]
    Region,
    /// An instance plan.
    #[value(alias = "types")]
    Type,
    /// An account event.
    #[value(alias = "events")]
    Event,
    /// A disk image.
    #[value(alias = "images")]
    Image,
}

impl Entity {
    /// Whether entities of this type are addressed by a numeric ID.
    pub fn has_numeric_id(self) -> bool {
        !matches!(self, Self::Region | Self::Type | Self::Image)
    }

    /// Whether the API allows deleting entities of this type.
    pub fn is_deletable(self) -> bool {
        matches!(
            self,
            Self::Instance | Self::Volume | Self::Firewall | Self::LkeCluster | Self::Image
        )
    }
}
