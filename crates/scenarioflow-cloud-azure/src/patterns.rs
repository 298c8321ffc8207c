//! Patterns for recognising Azure CLI commands and resource identifiers

use regex::Regex;
use std::sync::LazyLock;

/// Matches a command line that invokes the Azure CLI
pub static AZ_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^|[\s;&|(])az\s+\S").expect("az command pattern should compile")
});

/// Matches an ARM resource ID and captures its resource group
pub static RESOURCE_GROUP_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/subscriptions/[^/\s]+/resourceGroups/([^/\s\x22']+)")
        .expect("resource group pattern should compile")
});

/// Whether the command invokes `az`
pub fn is_az_command(command: &str) -> bool {
    AZ_COMMAND.is_match(command)
}

/// First resource group named by a resource ID in the text
pub fn find_resource_group_name(text: &str) -> Option<String> {
    RESOURCE_GROUP_ID
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
