//! vless:// link encoder

use crate::error::{Error, Result};
use crate::locator::ClientContext;

use super::{append_network_params, append_security_params, assemble, LinkEncoder, QueryParams};

/// Encoder for `vless://{id}@{address}:{port}?{query}#{remark}` links
#[derive(Debug)]
pub struct VlessEncoder;

impl LinkEncoder for VlessEncoder {
    fn scheme(&self) -> &'static str {
        "vless"
    }

    fn encode(&self, ctx: &ClientContext<'_>, server_address: &str) -> Result<String> {
        let id = ctx
            .client
            .id
            .as_deref()
            .ok_or_else(|| Error::Encoding("vless client has no id".to_string()))?;

        let transport = ctx.transport;
        let mut params = QueryParams::new();

        // `type` mirrors the stored network field even when unset
        params.append("type", transport.network.clone().unwrap_or_default());
        if let Some(security) = transport.security.as_deref() {
            if !security.is_empty() && security != "none" {
                params.append("security", security);
            }
        }
        params.append_opt("flow", ctx.client.flow.as_deref());
        append_security_params(&mut params, transport);
        append_network_params(&mut params, transport);

        let remark = ctx.client.email().unwrap_or_default();
        Ok(assemble(self.scheme(), id, server_address, ctx.port, &params, remark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::locator::find_by_email;

    fn encode(config_json: &str, email: &str, server: &str) -> Result<String> {
        let config = Config::from_json(config_json).unwrap();
        let ctx = find_by_email(&config, email).unwrap();
        VlessEncoder.encode(&ctx, server)
    }

    #[test]
    fn test_ws_tls_link() {
        // ws+tls inbound with sni, path and Host header all set
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 443,
            "streamSettings": {
                "network": "ws",
                "security": "tls",
                "tlsSettings": {"serverName": "example.com"},
                "wsSettings": {"path": "/ray", "headers": {"Host": "example.com"}}
            },
            "settings": {"clients": [
                {"id": "11111111-1111-1111-1111-111111111111", "email": "alice"}
            ]}
        }]}"#;
        let url = encode(json, "alice", "1.2.3.4").unwrap();
        assert_eq!(
            url,
            "vless://11111111-1111-1111-1111-111111111111@1.2.3.4:443\
             ?type=ws&security=tls&sni=example.com&path=%2Fray&host=example.com#alice"
        );
    }

    #[test]
    fn test_plain_tcp_link_omits_security() {
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 10086,
            "streamSettings": {"network": "tcp", "security": "none"},
            "settings": {"clients": [{"id": "uuid-1", "email": "bob"}]}
        }]}"#;
        let url = encode(json, "bob", "example.org").unwrap();
        assert_eq!(url, "vless://uuid-1@example.org:10086?type=tcp#bob");
    }

    #[test]
    fn test_flow_and_xtls_params() {
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 443,
            "streamSettings": {
                "network": "tcp",
                "security": "xtls",
                "xtlsSettings": {"serverName": "cdn.example.com", "fingerprint": "chrome"}
            },
            "settings": {"clients": [
                {"id": "uuid-2", "email": "carol", "flow": "xtls-rprx-direct"}
            ]}
        }]}"#;
        let url = encode(json, "carol", "5.6.7.8").unwrap();
        assert_eq!(
            url,
            "vless://uuid-2@5.6.7.8:443\
             ?type=tcp&security=xtls&flow=xtls-rprx-direct&sni=cdn.example.com&fp=chrome#carol"
        );
    }

    #[test]
    fn test_grpc_service_name() {
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 2083,
            "streamSettings": {
                "network": "grpc",
                "security": "tls",
                "tlsSettings": {"serverName": "grpc.example.com"},
                "grpcSettings": {"serviceName": "TunService"}
            },
            "settings": {"clients": [{"id": "uuid-3", "email": "dave"}]}
        }]}"#;
        let url = encode(json, "dave", "grpc.example.com").unwrap();
        assert_eq!(
            url,
            "vless://uuid-3@grpc.example.com:2083\
             ?type=grpc&security=tls&sni=grpc.example.com&serviceName=TunService#dave"
        );
    }

    #[test]
    fn test_type_param_present_when_network_unset() {
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 80,
            "settings": {"clients": [{"id": "uuid-4", "email": "erin"}]}
        }]}"#;
        let url = encode(json, "erin", "1.1.1.1").unwrap();
        assert_eq!(url, "vless://uuid-4@1.1.1.1:80?type=#erin");
    }

    #[test]
    fn test_fragment_round_trips_through_url_parse() {
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 443,
            "settings": {"clients": [{"id": "uuid-5", "email": "team lead #1"}]}
        }]}"#;
        let url = encode(json, "team lead #1", "1.2.3.4").unwrap();
        let parsed = url::Url::parse(&url).unwrap();
        let fragment = parsed.fragment().unwrap();
        let decoded = percent_encoding::percent_decode_str(fragment)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, "team lead #1");
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let json = r#"{"inbounds": [{
            "protocol": "vless",
            "port": 443,
            "settings": {"clients": [{"email": "noid"}]}
        }]}"#;
        let err = encode(json, "noid", "1.2.3.4").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
