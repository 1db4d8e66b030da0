//! trojan:// link encoder

use crate::error::{Error, Result};
use crate::locator::ClientContext;

use super::{append_network_params, append_security_params, assemble, LinkEncoder, QueryParams};

/// Encoder for `trojan://{password}@{address}:{port}?{query}#{remark}` links
#[derive(Debug)]
pub struct TrojanEncoder;

impl LinkEncoder for TrojanEncoder {
    fn scheme(&self) -> &'static str {
        "trojan"
    }

    fn encode(&self, ctx: &ClientContext<'_>, server_address: &str) -> Result<String> {
        let password = ctx
            .client
            .password
            .as_deref()
            .ok_or_else(|| Error::Encoding("trojan client has no password".to_string()))?;

        let transport = ctx.transport;
        let mut params = QueryParams::new();

        // Unlike vless, security leads and `type` is only emitted when the
        // network field is actually set.
        if let Some(security @ ("tls" | "xtls")) = transport.security.as_deref() {
            params.append("security", security);
            append_security_params(&mut params, transport);
        }
        params.append_opt("type", transport.network.as_deref());
        append_network_params(&mut params, transport);

        let remark = ctx.client.email().unwrap_or_default();
        Ok(assemble(self.scheme(), password, server_address, ctx.port, &params, remark))
    }
}
