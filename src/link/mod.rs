//! Share Link Encoders
//!
//! Responsibilities:
//! - One encoder per protocol behind the [`LinkEncoder`] trait
//! - Shared query-string assembly and percent-encoding rules
//!
//! Each encoder is a pure function from client context + server address to a
//! canonical URL string. Parameter names and ordering follow the de facto
//! link dialect of each protocol's client ecosystem; consumers silently
//! ignore or mis-route links that rename or reorder them.

mod trojan;
mod vless;
mod vmess;

pub use trojan::TrojanEncoder;
pub use vless::VlessEncoder;
pub use vmess::VmessEncoder;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

use crate::config::StreamSettings;
use crate::error::{Error, Result};
use crate::locator::ClientContext;

/// Unified share link encoder trait
///
/// Implemented once per protocol and dispatched by the protocol tag the
/// locator reports.
pub trait LinkEncoder: std::fmt::Debug {
    /// URL scheme this encoder produces (without `://`)
    fn scheme(&self) -> &'static str;

    /// Encode a client context into a share URL
    fn encode(&self, ctx: &ClientContext<'_>, server_address: &str) -> Result<String>;
}

/// Create the encoder matching an inbound protocol tag
pub fn encoder_for(protocol: &str) -> Result<Box<dyn LinkEncoder>> {
    match protocol {
        "vless" => Ok(Box::new(VlessEncoder)),
        "vmess" => Ok(Box::new(VmessEncoder)),
        "trojan" => Ok(Box::new(TrojanEncoder)),
        other => Err(Error::UnsupportedProtocol(other.to_string())),
    }
}

/// Characters escaped in the URL fragment: everything outside the unreserved
/// set, except `/` which stays literal. Space becomes `%20` here, unlike in
/// the query string.
const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a remark (the client email) for use as the URL fragment
fn encode_fragment(remark: &str) -> String {
    utf8_percent_encode(remark, FRAGMENT).to_string()
}

/// Ordered query parameter list
///
/// Insertion order survives serialization; values are escaped per
/// `application/x-www-form-urlencoded` (space -> `+`, `/` -> `%2F`).
#[derive(Debug, Default)]
struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    fn new() -> Self {
        Self::default()
    }

    /// Append a parameter unconditionally
    fn append(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    /// Append only when the value is present and non-empty
    fn append_opt(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            if !value.is_empty() {
                self.pairs.push((key, value.to_string()));
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Append `sni`/`fp` from the active `{security}Settings` block.
/// Only tls and xtls carry one; anything else is a no-op.
fn append_security_params(params: &mut QueryParams, transport: &StreamSettings) {
    if let Some(settings) = transport.security_settings() {
        params.append_opt("sni", settings.server_name.as_deref());
        params.append_opt("fp", settings.fingerprint.as_deref());
    }
}

/// Append the network-specific parameters shared by vless and trojan:
/// `path`/`host` for ws, `serviceName` for grpc.
fn append_network_params(params: &mut QueryParams, transport: &StreamSettings) {
    match transport.network.as_deref() {
        Some("ws") => {
            if let Some(ws) = &transport.ws_settings {
                params.append_opt("path", ws.path.as_deref());
                params.append_opt("host", ws.host());
            }
        }
        Some("grpc") => {
            if let Some(grpc) = &transport.grpc_settings {
                params.append_opt("serviceName", grpc.service_name.as_deref());
            }
        }
        _ => {}
    }
}

/// Assemble a `{scheme}://{userinfo}@{address}:{port}?{query}#{fragment}`
/// URL. The `?` is omitted entirely when no parameters were produced; the
/// `#` is always appended, even for an empty remark.
fn assemble(
    scheme: &str,
    user_info: &str,
    server_address: &str,
    port: u16,
    params: &QueryParams,
    remark: &str,
) -> String {
    let mut url = format!("{}://{}@{}:{}", scheme, user_info, server_address, port);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.encode());
    }
    url.push('#');
    url.push_str(&encode_fragment(remark));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_dispatch() {
        assert_eq!(encoder_for("vless").unwrap().scheme(), "vless");
        assert_eq!(encoder_for("vmess").unwrap().scheme(), "vmess");
        assert_eq!(encoder_for("trojan").unwrap().scheme(), "trojan");
    }

    #[test]
    fn test_encoder_dispatch_unsupported() {
        let err = encoder_for("shadowsocks").unwrap_err();
        assert!(matches!(err, Error::UnsupportedProtocol(_)));
    }

    #[test]
    fn test_fragment_encoding() {
        assert_eq!(encode_fragment("alice"), "alice");
        assert_eq!(encode_fragment("a b#c"), "a%20b%23c");
        // '/' stays literal in fragments
        assert_eq!(encode_fragment("team/alice"), "team/alice");
    }

    #[test]
    fn test_query_params_order_and_escaping() {
        let mut params = QueryParams::new();
        params.append("type", "ws");
        params.append_opt("path", Some("/ray path"));
        params.append_opt("host", None);
        params.append_opt("sni", Some(""));
        assert_eq!(params.encode(), "type=ws&path=%2Fray+path");
    }

    #[test]
    fn test_assemble_without_params() {
        let params = QueryParams::new();
        let url = assemble("trojan", "pw", "1.2.3.4", 8443, &params, "bob");
        assert_eq!(url, "trojan://pw@1.2.3.4:8443#bob");
    }
}
