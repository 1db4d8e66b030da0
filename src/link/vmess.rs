//! vmess:// link encoder

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::locator::ClientContext;

use super::LinkEncoder;

/// Encoder for `vmess://{base64}` links
///
/// The payload is a JSON object serialized with sorted keys and compact
/// separators, then Base64-encoded (standard alphabet, with padding).
/// Consumers compare and deduplicate links byte-for-byte, so the
/// serialization is part of the contract, not an implementation detail.
#[derive(Debug)]
pub struct VmessEncoder;

impl LinkEncoder for VmessEncoder {
    fn scheme(&self) -> &'static str {
        "vmess"
    }

    fn encode(&self, ctx: &ClientContext<'_>, server_address: &str) -> Result<String> {
        let client = ctx.client;
        let transport = ctx.transport;

        let id = client
            .id
            .as_deref()
            .ok_or_else(|| Error::Encoding("vmess client has no id".to_string()))?;

        let network = transport.network.as_deref();
        let tls = match transport.security.as_deref() {
            Some(security @ ("tls" | "xtls")) => security,
            _ => "none",
        };

        // BTreeMap keys serialize in sorted order; serde_json emits compact
        // separators by default.
        let mut payload: BTreeMap<&'static str, Value> = BTreeMap::new();
        payload.insert("v", Value::from("2"));
        payload.insert("ps", Value::from(client.email().unwrap_or_default()));
        payload.insert("add", Value::from(server_address));
        payload.insert("port", Value::from(ctx.port.to_string()));
        payload.insert("id", Value::from(id));
        payload.insert("aid", Value::from(client.alter_id.to_string()));
        payload.insert("net", network.map(Value::from).unwrap_or(Value::Null));
        payload.insert("type", Value::from("none"));
        payload.insert("tls", Value::from(tls));

        match network {
            Some("ws") => {
                let ws = transport.ws_settings.as_ref();
                let path = ws
                    .and_then(|ws| ws.path.clone())
                    .unwrap_or_else(|| "/".to_string());
                let host = ws
                    .and_then(|ws| ws.host())
                    .unwrap_or(server_address)
                    .to_string();
                payload.insert("path", Value::from(path));
                payload.insert("host", Value::from(host));
            }
            Some("grpc") => {
                // Unlike ws there is no default here: an unset serviceName is
                // carried through as null.
                let service_name = transport
                    .grpc_settings
                    .as_ref()
                    .and_then(|grpc| grpc.service_name.clone());
                payload.insert("path", service_name.map(Value::from).unwrap_or(Value::Null));
            }
            _ => {}
        }

        let json = serde_json::to_string(&payload).map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(format!("vmess://{}", STANDARD.encode(json)))
    }
}
