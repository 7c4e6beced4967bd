//! Linode API CLI binary.
//!
//! A command-line interface for interacting with the Linode API.

use clap::Parser;
use linodeapi::cli::{Cli, Command, Entity};
use linodeapi::output::PrettyPrint;
use linodeapi::{
    Delete, Event, Firewall, Get, Image, Instance, LinodeClient, LinodeError, LinodeType, List,
    ListOptions, LkeCluster, LoadConfigOptions, Page, Region, Volume,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match &cli.profile {
        Some(profile) => LinodeClient::from_config(&LoadConfigOptions::profile(profile.as_str())),
        None => LinodeClient::from_env(),
    };
    let client = match client {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set LINODE_TOKEN or configure a profile in ~/.config/linode");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &LinodeClient, cli: Cli) -> linodeapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List {
            entity,
            page,
            page_size,
            filter,
        } => {
            let opts = list_options(page, page_size, filter)?;
            handle_list(client, entity, &opts, cli.json).await
        }
        Command::Delete { entity, id } => handle_delete(client, entity, &id).await,
    }
}

fn parse_id(entity: Entity, id: &str) -> linodeapi::Result<u64> {
    id.parse()
        .map_err(|_| LinodeError::InvalidInput(format!("{entity:?} IDs are numeric, got '{id}'")))
}

fn list_options(
    page: Option<u32>,
    page_size: Option<u32>,
    filter: Option<String>,
) -> linodeapi::Result<ListOptions> {
    if let Some(ref raw) = filter {
        serde_json::from_str::<serde_json::Value>(raw)
            .map_err(|e| LinodeError::InvalidInput(format!("--filter is not valid JSON: {e}")))?;
    }
    Ok(ListOptions {
        page,
        page_size,
        filter,
    })
}

async fn handle_get(
    client: &LinodeClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> linodeapi::Result<()> {
    match entity {
        Entity::Instance => {
            let instance = Instance::get(client, parse_id(entity, id)?).await?;
            output_single(&instance, json)
        }
        Entity::Volume => {
            let volume = Volume::get(client, parse_id(entity, id)?).await?;
            output_single(&volume, json)
        }
        Entity::Firewall => {
            let firewall = Firewall::get(client, parse_id(entity, id)?).await?;
            output_single(&firewall, json)
        }
        Entity::LkeCluster => {
            let cluster = LkeCluster::get(client, parse_id(entity, id)?).await?;
            output_single(&cluster, json)
        }
        Entity::Event => {
            let event = Event::get(client, parse_id(entity, id)?).await?;
            output_single(&event, json)
        }
        Entity::Region => {
            let region = Region::get(client, id.to_string()).await?;
            output_single(&region, json)
        }
        Entity::Type => {
            let plan = LinodeType::get(client, id.to_string()).await?;
            output_single(&plan, json)
        }
        Entity::Image => {
            let image = Image::get(client, id.to_string()).await?;
            output_single(&image, json)
        }
    }
}

async fn handle_list(
    client: &LinodeClient,
    entity: Entity,
    opts: &ListOptions,
    json: bool,
) -> linodeapi::Result<()> {
    match entity {
        Entity::Instance => list_entity::<Instance, _, _>(client, opts, json, |x: &Instance| InstanceRow::from(x)).await,
        Entity::Volume => list_entity::<Volume, _, _>(client, opts, json, |x: &Volume| VolumeRow::from(x)).await,
        Entity::Firewall => list_entity::<Firewall, _, _>(client, opts, json, |x: &Firewall| FirewallRow::from(x)).await,
        Entity::LkeCluster => {
            list_entity::<LkeCluster, _, _>(client, opts, json, |x: &LkeCluster| LkeClusterRow::from(x)).await
        }
        Entity::Region => list_entity::<Region, _, _>(client, opts, json, |x: &Region| RegionRow::from(x)).await,
        Entity::Type => list_entity::<LinodeType, _, _>(client, opts, json, |x: &LinodeType| TypeRow::from(x)).await,
        Entity::Event => list_entity::<Event, _, _>(client, opts, json, |x: &Event| EventRow::from(x)).await,
        Entity::Image => list_entity::<Image, _, _>(client, opts, json, |x: &Image| ImageRow::from(x)).await,
    }
}

async fn handle_delete(client: &LinodeClient, entity: Entity, id: &str) -> linodeapi::Result<()> {
    match entity {
        Entity::Instance => Instance::delete(client, parse_id(entity, id)?).await?,
        Entity::Volume => Volume::delete(client, parse_id(entity, id)?).await?,
        Entity::Firewall => Firewall::delete(client, parse_id(entity, id)?).await?,
        Entity::LkeCluster => LkeCluster::delete(client, parse_id(entity, id)?).await?,
        Entity::Image => Image::delete(client, id.to_string()).await?,
        Entity::Region | Entity::Type | Entity::Event => {
            return Err(LinodeError::InvalidInput(format!(
                "{entity:?} entities cannot be deleted"
            )));
        }
    }
    eprintln!("Deleted {entity:?} {id}");
    Ok(())
}

/// Fetch one page when `--page` is given, otherwise every page.
async fn list_entity<T, R, F>(
    client: &LinodeClient,
    opts: &ListOptions,
    json: bool,
    to_row: F,
) -> linodeapi::Result<()>
where
    T: List<Parent = ()> + Serialize + DeserializeOwned,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if opts.requested_page().is_some() {
        let page = T::list_page(client, &(), opts).await?;
        output_page(&page, json, to_row)
    } else {
        let items = T::list_all(client, &(), Some(opts)).await?;
        output_all(&items, json, to_row)
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> linodeapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> linodeapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.data)?);
    } else {
        let rows: Vec<R> = page.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!(
            "\nPage {}/{} ({} total items)",
            page.page, page.pages, page.results
        );
    }
    Ok(())
}

fn output_all<T, R, F>(items: &[T], json: bool, to_row: F) -> linodeapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct InstanceRow {
    id: u64,
    label: String,
    region: String,
    #[tabled(rename = "type")]
    plan: String,
    status: String,
    ipv4: String,
}

impl From<&Instance> for InstanceRow {
    fn from(i: &Instance) -> Self {
        Self {
            id: i.id,
            label: i.label.clone(),
            region: i.region.clone(),
            plan: i.instance_type.clone().unwrap_or_default(),
            status: format!("{:?}", i.status).to_lowercase(),
            ipv4: i.primary_ipv4().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Tabled)]
struct VolumeRow {
    id: u64,
    label: String,
    region: String,
    size: String,
    status: String,
    linode: String,
}

impl From<&Volume> for VolumeRow {
    fn from(v: &Volume) -> Self {
        Self {
            id: v.id,
            label: v.label.clone(),
            region: v.region.clone(),
            size: format!("{} GB", v.size),
            status: format!("{:?}", v.status).to_lowercase(),
            linode: v.linode_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct FirewallRow {
    id: u64,
    label: String,
    status: String,
    rules: String,
}

impl From<&Firewall> for FirewallRow {
    fn from(f: &Firewall) -> Self {
        Self {
            id: f.id,
            label: f.label.clone(),
            status: format!("{:?}", f.status).to_lowercase(),
            rules: format!(
                "{} in / {} out",
                f.rules.inbound.len(),
                f.rules.outbound.len()
            ),
        }
    }
}

#[derive(Tabled)]
struct LkeClusterRow {
    id: u64,
    label: String,
    region: String,
    version: String,
    status: String,
}

impl From<&LkeCluster> for LkeClusterRow {
    fn from(c: &LkeCluster) -> Self {
        Self {
            id: c.id,
            label: c.label.clone(),
            region: c.region.clone(),
            version: c.k8s_version.clone(),
            status: format!("{:?}", c.status).to_lowercase(),
        }
    }
}

#[derive(Tabled)]
struct RegionRow {
    id: String,
    label: String,
    country: String,
    status: String,
}

impl From<&Region> for RegionRow {
    fn from(r: &Region) -> Self {
        Self {
            id: r.id.clone(),
            label: r.label.clone(),
            country: r.country.clone(),
            status: format!("{:?}", r.status).to_lowercase(),
        }
    }
}

#[derive(Tabled)]
struct TypeRow {
    id: String,
    class: String,
    vcpus: u32,
    memory: String,
    monthly: String,
}

impl From<&LinodeType> for TypeRow {
    fn from(t: &LinodeType) -> Self {
        Self {
            id: t.id.clone(),
            class: t.class.clone(),
            vcpus: t.vcpus,
            memory: format!("{} MB", t.memory),
            monthly: format!("${:.2}", t.price.monthly),
        }
    }
}

#[derive(Tabled)]
struct EventRow {
    id: u64,
    action: String,
    status: String,
    entity: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            id: e.id,
            action: e.action.clone(),
            status: format!("{:?}", e.status).to_lowercase(),
            entity: e
                .entity
                .as_ref()
                .and_then(|en| en.label.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ImageRow {
    id: String,
    label: String,
    vendor: String,
    size: String,
}

impl From<&Image> for ImageRow {
    fn from(i: &Image) -> Self {
        Self {
            id: i.id.clone(),
            label: i.label.clone(),
            vendor: i.vendor.clone().unwrap_or_default(),
            size: format!("{} MB", i.size),
        }
    }
}
