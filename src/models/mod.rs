//! Linode API model types.

mod account;
mod databases;
mod events;
mod firewalls;
mod images;
mod instances;
mod lke;
mod monitor;
mod nodebalancers;
mod object_storage;
mod profile;
mod regions;
mod types;
mod volumes;
mod vpcs;

pub use account::*;
pub use databases::*;
pub use events::*;
pub use firewalls::*;
pub use images::*;
pub use instances::*;
pub use lke::*;
pub use monitor::*;
pub use nodebalancers::*;
pub use object_storage::*;
pub use profile::*;
pub use regions::*;
pub use types::*;
pub use volumes::*;
pub use vpcs::*;
