//! Client lookup over the parsed configuration
//!
//! Responsibilities:
//! - Discovery: collect every client email across link-capable inbounds
//! - Lookup: resolve one email to its client + inbound context
//!
//! Only vless, vmess and trojan inbounds are considered; everything else in
//! the document is skipped without error.

use std::collections::BTreeSet;

use crate::config::{Client, Config, StreamSettings};
use crate::error::{Error, Result};

/// Protocols a share link can be generated for
pub const LINK_PROTOCOLS: [&str; 3] = ["vless", "vmess", "trojan"];

/// Everything one encode call needs, borrowed from the config
///
/// Assembled by [`find_by_email`] for exactly one matched client; has no
/// identity beyond a single link-generation call.
#[derive(Debug, Clone, Copy)]
pub struct ClientContext<'a> {
    /// The matched client account
    pub client: &'a Client,
    /// Protocol of the inbound the client was found in
    pub protocol: &'a str,
    /// Port of that inbound
    pub port: u16,
    /// Transport settings of that inbound
    pub transport: &'a StreamSettings,
}

fn is_link_protocol(protocol: &str) -> bool {
    LINK_PROTOCOLS.contains(&protocol)
}

/// Collect all client emails found in the configuration
///
/// Deduplicated and returned in lexicographic order. Clients without an
/// email (or with an empty one) are skipped. An empty or clientless
/// document yields an empty list, never an error.
pub fn list_emails(config: &Config) -> Vec<String> {
    let mut emails = BTreeSet::new();
    for inbound in &config.inbounds {
        if !is_link_protocol(&inbound.protocol) {
            continue;
        }
        for client in &inbound.settings.clients {
            if let Some(email) = client.email() {
                emails.insert(email.to_string());
            }
        }
    }
    emails.into_iter().collect()
}

/// Find a client by email and return its full context
///
/// Inbounds and their client lists are scanned in document order; the first
/// match wins, so duplicate emails resolve to the earliest occurrence.
pub fn find_by_email<'a>(config: &'a Config, email: &str) -> Result<ClientContext<'a>> {
    for inbound in &config.inbounds {
        if !is_link_protocol(&inbound.protocol) {
            continue;
        }
        for client in &inbound.settings.clients {
            if client.email() == Some(email) {
                return Ok(ClientContext {
                    client,
                    protocol: &inbound.protocol,
                    port: inbound.port,
                    transport: &inbound.stream_settings,
                });
            }
        }
    }
    Err(Error::ClientNotFound(email.to_string()))
}
