//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Deployment, ResourceGroup, StorageAccount, Subscription, VirtualMachine};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(kind: &str, name: &str) -> Vec<String> {
    let title = format!("{kind}: {name}");
    let divider = "─".repeat(title.len().max(30));
    vec![title, divider]
}

impl PrettyPrint for Subscription {
    fn pretty_print(&self) -> String {
        let mut lines = header("Subscription", &self.display_name);
        lines.push(format!("Id:             {}", self.subscription_id));

        if let Some(ref state) = self.state {
            lines.push(format!("State:          {}", state));
        }

        if let Some(ref tenant) = self.tenant_id {
            lines.push(format!("Tenant:         {}", tenant));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ResourceGroup {
    fn pretty_print(&self) -> String {
        let mut lines = header("Resource Group", &self.name);
        lines.push(format!("Location:       {}", self.location));

        if let Some(state) = self.provisioning_state() {
            lines.push(format!("State:          {}", state));
        }

        for (key, value) in &self.tags {
            lines.push(format!("Tag:            {key}={value}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for VirtualMachine {
    fn pretty_print(&self) -> String {
        let mut lines = header("Virtual Machine", &self.name);
        lines.push(format!("Location:       {}", self.location));

        if let Some(group) = self.resource_group() {
            lines.push(format!("Resource Group: {}", group));
        }

        if let Some(size) = self.vm_size() {
            lines.push(format!("Size:           {}", size));
        }

        if let Some(state) = self.provisioning_state() {
            lines.push(format!("State:          {}", state));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for StorageAccount {
    fn pretty_print(&self) -> String {
        let mut lines = header("Storage Account", &self.name);
        lines.push(format!("Location:       {}", self.location));

        if let Some(ref sku) = self.sku {
            lines.push(format!("Sku:            {}", sku.name));
        }

        if let Some(ref kind) = self.kind {
            lines.push(format!("Kind:           {}", kind));
        }

        if let Some(blob) = self.blob_endpoint() {
            lines.push(format!("Blob Endpoint:  {}", blob));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Deployment {
    fn pretty_print(&self) -> String {
        let mut lines = header("Deployment", &self.name);

        if let Some(ref properties) = self.properties {
            if let Some(ref state) = properties.provisioning_state {
                lines.push(format!("State:          {}", state));
            }
            if let Some(mode) = properties.mode {
                lines.push(format!("Mode:           {:?}", mode));
            }
            if let Some(ref timestamp) = properties.timestamp {
                lines.push(format!("Timestamp:      {}", timestamp));
            }
        }

        lines.join("\n")
    }
}
