//! Polling helpers that wait for a resource to reach a state.
//!
//! Each helper re-fetches the resource every
//! [`LinodeClient::poll_interval`] until the condition holds or `timeout`
//! elapses. API errors end the wait immediately.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use linodeapi::{boot_instance, wait_for_instance_status, InstanceStatus, LinodeClient};
//!
//! # fn main() -> linodeapi::Result<()> {
//! tokio_test::block_on(async {
//!     let client = LinodeClient::from_env()?;
//!     boot_instance(&client, 123, None).await?;
//!     let instance =
//!         wait_for_instance_status(&client, 123, InstanceStatus::Running, Duration::from_secs(300))
//!             .await?;
//!     println!("{} is up", instance.label);
//!     Ok::<_, linodeapi::LinodeError>(())
//! })
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::client::LinodeClient;
use crate::error::{LinodeError, Result};
use crate::models::{
    Event, EventStatus, Instance, InstanceStatus, LkeCluster, LkeClusterStatus, Volume,
    VolumeStatus,
};
use crate::traits::Get;

async fn poll_until<T, F, Fut, P>(
    client: &LinodeClient,
    what: String,
    timeout: Duration,
    mut fetch: F,
    done: P,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();
    let mut ticker = tokio::time::interval(client.poll_interval().max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let polling = async {
        loop {
            ticker.tick().await;
            let value = fetch().await?;
            if done(&value) {
                return Ok(value);
            }
            tracing::debug!(what = %what, elapsed_ms = start.elapsed().as_millis() as u64, "still waiting");
        }
    };

    match tokio::time::timeout(timeout, polling).await {
        Ok(result) => result,
        Err(_) => Err(LinodeError::Timeout {
            what,
            elapsed: start.elapsed(),
        }),
    }
}

/// Wait until an instance reports `status`.
#[tracing::instrument(skip(client))]
pub async fn wait_for_instance_status(
    client: &LinodeClient,
    id: u64,
    status: InstanceStatus,
    timeout: Duration,
) -> Result<Instance> {
    poll_until(
        client,
        format!("instance {id} to be {status:?}"),
        timeout,
        || Instance::get(client, id),
        |instance| instance.status == status,
    )
    .await
}

/// Wait until a volume reports `status`.
#[tracing::instrument(skip(client))]
pub async fn wait_for_volume_status(
    client: &LinodeClient,
    id: u64,
    status: VolumeStatus,
    timeout: Duration,
) -> Result<Volume> {
    poll_until(
        client,
        format!("volume {id} to be {status:?}"),
        timeout,
        || Volume::get(client, id),
        |volume| volume.status == status,
    )
    .await
}

/// Wait until a volume is attached to `linode_id`, or detached when `None`.
#[tracing::instrument(skip(client))]
pub async fn wait_for_volume_linode_id(
    client: &LinodeClient,
    id: u64,
    linode_id: Option<u64>,
    timeout: Duration,
) -> Result<Volume> {
    poll_until(
        client,
        format!("volume {id} to have linode_id {linode_id:?}"),
        timeout,
        || Volume::get(client, id),
        |volume| volume.linode_id == linode_id,
    )
    .await
}

/// Wait until an LKE cluster reports `status`.
#[tracing::instrument(skip(client))]
pub async fn wait_for_lke_cluster_status(
    client: &LinodeClient,
    id: u64,
    status: LkeClusterStatus,
    timeout: Duration,
) -> Result<LkeCluster> {
    poll_until(
        client,
        format!("LKE cluster {id} to be {status:?}"),
        timeout,
        || LkeCluster::get(client, id),
        |cluster| cluster.status == status,
    )
    .await
}

/// Wait until an event finishes.
///
/// # Errors
///
/// Returns [`LinodeError::EventFailed`] when the event ends as `failed`.
#[tracing::instrument(skip(client))]
pub async fn wait_for_event_finished(
    client: &LinodeClient,
    id: u64,
    timeout: Duration,
) -> Result<Event> {
    let event = poll_until(
        client,
        format!("event {id} to finish"),
        timeout,
        || Event::get(client, id),
        |event| event.status.is_terminal(),
    )
    .await?;

    if event.status == EventStatus::Failed {
        return Err(LinodeError::EventFailed {
            id,
            action: event.action,
        });
    }
    Ok(event)
}
