//! Configuration module for xraylink
//!
//! Reads Xray/V2Ray-style JSON server configs. Only the `inbounds` tree is
//! modeled; unknown keys anywhere in the document are ignored.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration structure
///
/// The document is loaded once and held read-only; nothing here is ever
/// written back to disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Inbound configurations
    #[serde(default)]
    pub inbounds: Vec<Inbound>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigNotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

/// Inbound configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inbound {
    /// Protocol tag (vless, vmess, trojan, or anything else - skipped)
    #[serde(default)]
    pub protocol: String,

    /// Listen port
    #[serde(default)]
    pub port: u16,

    /// Transport configuration
    #[serde(default, rename = "streamSettings")]
    pub stream_settings: StreamSettings,

    /// Protocol-specific settings (only `clients` is read)
    #[serde(default)]
    pub settings: InboundSettings,
}

/// Inbound settings (protocol-specific)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundSettings {
    /// Client accounts attached to this inbound
    #[serde(default)]
    pub clients: Vec<Client>,
}

/// Client account within an inbound
///
/// Which fields are meaningful depends on the inbound's protocol: `id` for
/// vless/vmess, `password` for trojan, `alter_id` for vmess, `flow` for vless.
/// `id` is kept as a plain string; no UUID validation is performed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Client {
    /// Human-chosen client identifier, expected unique but not enforced
    #[serde(default)]
    pub email: Option<String>,

    /// User UUID (vless/vmess)
    #[serde(default)]
    pub id: Option<String>,

    /// Password (trojan)
    #[serde(default)]
    pub password: Option<String>,

    /// Alter ID (legacy vmess, should be 0 for AEAD)
    #[serde(default, rename = "alterId")]
    pub alter_id: u32,

    /// Flow control (vless)
    #[serde(default)]
    pub flow: Option<String>,
}

impl Client {
    /// Email, treating a present-but-empty string as absent
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

/// Transport configuration (`streamSettings`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamSettings {
    /// Network type (e.g. "tcp", "ws", "grpc")
    #[serde(default)]
    pub network: Option<String>,

    /// Security layer (e.g. "none", "tls", "xtls")
    #[serde(default)]
    pub security: Option<String>,

    /// TLS settings
    #[serde(default, rename = "tlsSettings")]
    pub tls_settings: Option<SecuritySettings>,

    /// XTLS settings
    #[serde(default, rename = "xtlsSettings")]
    pub xtls_settings: Option<SecuritySettings>,

    /// WebSocket settings
    #[serde(default, rename = "wsSettings")]
    pub ws_settings: Option<WsSettings>,

    /// gRPC settings
    #[serde(default, rename = "grpcSettings")]
    pub grpc_settings: Option<GrpcSettings>,
}

impl StreamSettings {
    /// Resolve the `"{security}Settings"` block matching the active security
    /// layer. Only tls and xtls carry one.
    pub fn security_settings(&self) -> Option<&SecuritySettings> {
        match self.security.as_deref() {
            Some("tls") => self.tls_settings.as_ref(),
            Some("xtls") => self.xtls_settings.as_ref(),
            _ => None,
        }
    }
}

/// TLS/XTLS settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecuritySettings {
    /// Server name for SNI
    #[serde(default, rename = "serverName")]
    pub server_name: Option<String>,

    /// TLS fingerprint
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// WebSocket transport settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WsSettings {
    /// WebSocket path
    #[serde(default)]
    pub path: Option<String>,

    /// Custom headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl WsSettings {
    /// The Host header, if configured (exact-case key)
    pub fn host(&self) -> Option<&str> {
        self.headers.get("Host").map(String::as_str)
    }
}

/// gRPC transport settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrpcSettings {
    /// gRPC service name
    #[serde(default, rename = "serviceName")]
    pub service_name: Option<String>,
}
