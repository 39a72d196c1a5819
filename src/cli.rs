use clap::{ArgAction, Parser, Subcommand};

use crate::monitor::host::{InterfaceType, NewHost};
use crate::monitor::import::ImportFormat;
use crate::monitor::Monitor;
use crate::prelude::*;

#[derive(Parser, Clone)]
#[clap(name = "zabctl", version, about = "Manage monitoring server inventory")]
pub struct CliOpts {
    /// Monitoring server, a bare hostname gets http:// prefixed
    #[clap(short, long, env = "ZABBIX_SERVER")]
    pub server: Option<String>,
    #[clap(short, long, action = ArgAction::SetTrue)]
    pub debug: Option<bool>,
    #[command(subcommand)]
    pub resource: Resource,
}

#[derive(Subcommand, Clone)]
pub enum Resource {
    /// Manage host groups
    #[clap(subcommand)]
    Hostgroup(HostGroupAction),
    /// Manage hosts
    #[clap(subcommand)]
    Host(HostAction),
    /// Manage templates
    #[clap(subcommand)]
    Template(TemplateAction),
}

#[derive(Subcommand, Clone)]
pub enum HostGroupAction {
    /// Add a host group
    Add { name: String },
    /// Get host group details
    Get { name: String },
    /// Delete a host group
    Delete { name: String },
    /// List host groups
    List,
}

#[derive(Subcommand, Clone)]
pub enum HostAction {
    /// Add a host
    Add(HostOpts),
    /// Get host details
    Get { name: String },
    /// Get a host's id
    Id { name: String },
    /// Delete a host
    Delete { name: String },
    /// List hosts
    List,
    /// Update a host
    Update(HostOpts),
    /// Disable monitoring for a host
    Disable { name: String },
    /// Enable monitoring for a host
    Enable { name: String },
}

#[derive(Subcommand, Clone)]
pub enum TemplateAction {
    /// Add a template
    Add(TemplateOpts),
    /// Get template details
    Get { name: String },
    /// Get a template's id
    Id { name: String },
    /// Delete a template
    Delete { name: String },
    /// List templates
    List,
    /// Update a template
    Update(TemplateOpts),
    /// Import a template configuration file
    Import(ImportOpts),
}

#[derive(Parser, Clone, Default)]
pub struct HostOpts {
    /// Name of the host
    #[clap(long)]
    pub name: String,
    /// Host IP address
    #[clap(long)]
    pub ip: Option<String>,
    /// Host DNS name
    #[clap(long)]
    pub dns_name: Option<String>,
    /// Host groups to attach the host to
    #[clap(long, num_args(1..))]
    pub hostgroups: Vec<String>,
    /// Templates to link
    #[clap(long, num_args(1..))]
    pub templates: Vec<String>,
    /// Type of the primary interface
    #[clap(long, value_enum)]
    pub interface_type: Option<InterfaceType>,
}

impl HostOpts {
    /// Everything except the name/group controls passes through to the call
    /// params verbatim.
    fn passthrough(&self) -> Map<String, Value> {
        let mut extra = Map::new();
        if let Some(ip) = &self.ip {
            extra.insert("ip".to_string(), json!(ip));
        }
        if let Some(dns_name) = &self.dns_name {
            extra.insert("dns_name".to_string(), json!(dns_name));
        }
        if !self.templates.is_empty() {
            extra.insert("templates".to_string(), json!(self.templates));
        }
        if let Some(interface_type) = self.interface_type {
            extra.insert("interface_type".to_string(), json!(interface_type));
        }
        extra
    }
}

#[derive(Parser, Clone, Default)]
pub struct TemplateOpts {
    /// Name of the template
    #[clap(long)]
    pub name: String,
    /// Host groups to attach the template to
    #[clap(long, num_args(1..))]
    pub hostgroups: Vec<String>,
    /// Templates to link
    #[clap(long, num_args(1..))]
    pub templates: Vec<String>,
    /// Hosts to link the template to
    #[clap(long, num_args(1..))]
    pub hosts: Vec<String>,
}

#[derive(Parser, Clone)]
pub struct ImportOpts {
    /// Path to the template configuration file
    #[clap(value_parser = file_as_string)]
    pub config: String,
}

/// Read the whole file during argument parsing so a bad path is a usage
/// error before anything touches the network.
fn file_as_string(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("The file {path} can't be read: {err}"))
}

fn some_names(names: &[String]) -> Option<&[String]> {
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

impl CliOpts {
    pub fn debug(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    /// Run the selected action against the managers and hand back the raw
    /// result for printing.
    pub async fn dispatch(&self, monitor: &Monitor) -> Result<Value, Error> {
        match &self.resource {
            Resource::Hostgroup(action) => match action {
                HostGroupAction::Add { name } => monitor.hostgroup.add(name).await,
                HostGroupAction::Get { name } => {
                    Ok(Value::Array(monitor.hostgroup.get(name).await?))
                }
                HostGroupAction::Delete { name } => monitor.hostgroup.delete(name).await,
                HostGroupAction::List => monitor.hostgroup.list().await,
            },
            Resource::Host(action) => match action {
                HostAction::Add(opts) => {
                    let mut extra = Map::new();
                    if !opts.templates.is_empty() {
                        extra.insert("templates".to_string(), json!(opts.templates));
                    }
                    monitor
                        .host
                        .add(NewHost {
                            name: opts.name.clone(),
                            ip: opts.ip.clone(),
                            dns_name: opts.dns_name.clone(),
                            hostgroups: opts.hostgroups.clone(),
                            interface_type: opts.interface_type.unwrap_or_default(),
                            extra,
                            ..Default::default()
                        })
                        .await
                }
                HostAction::Get { name } => Ok(Value::Array(monitor.host.get(name).await?)),
                HostAction::Id { name } => Ok(json!(monitor.host.get_id(name).await?)),
                HostAction::Delete { name } => monitor.host.delete(name).await,
                HostAction::List => Ok(Value::Array(monitor.host.search(json!({})).await?)),
                HostAction::Update(opts) => {
                    monitor
                        .host
                        .update(
                            &opts.name,
                            some_names(&opts.hostgroups),
                            None,
                            opts.passthrough(),
                        )
                        .await
                }
                HostAction::Disable { name } => monitor.host.disable(name).await,
                HostAction::Enable { name } => monitor.host.enable(name).await,
            },
            Resource::Template(action) => match action {
                TemplateAction::Add(opts) => {
                    monitor
                        .template
                        .add(
                            &opts.name,
                            some_names(&opts.hostgroups),
                            some_names(&opts.hosts),
                            some_names(&opts.templates),
                        )
                        .await
                }
                TemplateAction::Get { name } => Ok(Value::Array(monitor.template.get(name).await?)),
                TemplateAction::Id { name } => Ok(json!(monitor.template.get_id(name).await?)),
                TemplateAction::Delete { name } => monitor.template.delete(name).await,
                TemplateAction::List => {
                    Ok(Value::Array(monitor.template.search(json!({})).await?))
                }
                TemplateAction::Update(opts) => {
                    monitor
                        .template
                        .update(
                            &opts.name,
                            some_names(&opts.hostgroups),
                            some_names(&opts.hosts),
                            some_names(&opts.templates),
                        )
                        .await
                }
                TemplateAction::Import(opts) => {
                    monitor.template.import(&opts.config, ImportFormat::Xml).await
                }
            },
        }
    }
}

/// Falsy results (a missing id, a refused add, a no-op toggle) exit non-zero
pub fn is_falsy(result: &Value) -> bool {
    matches!(result, Value::Null | Value::Bool(false))
}
