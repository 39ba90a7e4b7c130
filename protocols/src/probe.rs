use std::borrow::Cow;
use std::collections::BTreeMap;

use uuid::Uuid;

const SOAP_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
const SOAP_ENCODING_NS: &str = "http://www.w3.org/2003/05/soap-encoding";
const ADDRESSING_NS: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";
const DISCOVERY_NS: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery";

const PROBE_ACTION: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery/Probe";
const DISCOVERY_TO: &str = "urn:schemas-xmlsoap-org:ws:2005:04:discovery";
const ANONYMOUS_ROLE: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

/// Device type every ONVIF camera and encoder answers to.
pub const NETWORK_VIDEO_TRANSMITTER: &str = "dn:NetworkVideoTransmitter";
pub const ONVIF_NETWORK_PREFIX: &str = "dn";
pub const ONVIF_NETWORK_NS: &str = "http://www.onvif.org/ver10/network/wsdl";

/// What a probe asks for.
///
/// `types` are qualified names whose prefixes must be bound in `namespaces`,
/// otherwise compliant devices ignore the probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeFilter {
    pub types: Vec<String>,
    pub scopes: Vec<String>,
    pub namespaces: BTreeMap<String, String>,
}

impl ProbeFilter {
    /// `dn:NetworkVideoTransmitter` with `dn` bound to the ONVIF network schema.
    pub fn network_video_transmitter() -> Self {
        Self {
            types: vec![NETWORK_VIDEO_TRANSMITTER.to_string()],
            scopes: Vec::new(),
            namespaces: BTreeMap::from([(
                ONVIF_NETWORK_PREFIX.to_string(),
                ONVIF_NETWORK_NS.to_string(),
            )]),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }
}

/// A rendered probe and the message id devices will echo in `RelatesTo`.
#[derive(Debug, Clone)]
pub struct Probe {
    pub message_id: Uuid,
    pub body: String,
}

impl Probe {
    /// Renders a probe with a fresh v4 message id.
    pub fn new(filter: &ProbeFilter) -> Self {
        let message_id = Uuid::new_v4();
        Self {
            message_id,
            body: build_probe(&message_id, filter),
        }
    }
}

/// Renders the SOAP 1.2 `Probe` envelope for `filter`.
pub fn build_probe(message_id: &Uuid, filter: &ProbeFilter) -> String {
    let mut body = String::new();

    if !filter.types.is_empty() {
        let bindings: String = filter
            .namespaces
            .iter()
            .map(|(prefix, uri)| format!(r#" xmlns:{}="{}""#, prefix, escape(uri)))
            .collect();
        body.push_str(&format!(
            r#"<d:Types xmlns:d="{DISCOVERY_NS}"{bindings}>{}</d:Types>"#,
            escape(&filter.types.join(" "))
        ));
    }

    if !filter.scopes.is_empty() {
        body.push_str(&format!(
            r#"<d:Scopes xmlns:d="{DISCOVERY_NS}">{}</d:Scopes>"#,
            escape(&filter.scopes.join(" "))
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soap-env:Envelope xmlns:soap-env="{env}" xmlns:soap-enc="{enc}" xmlns:a="{addr}">"#,
            r#"<soap-env:Header>"#,
            r#"<a:Action mustUnderstand="1">{action}</a:Action>"#,
            r#"<a:MessageID>uuid:{id}</a:MessageID>"#,
            r#"<a:ReplyTo><a:Address>{anon}</a:Address></a:ReplyTo>"#,
            r#"<a:To mustUnderstand="1">{to}</a:To>"#,
            r#"</soap-env:Header>"#,
            r#"<soap-env:Body>"#,
            r#"<Probe xmlns="{disc}">{body}</Probe>"#,
            r#"</soap-env:Body>"#,
            r#"</soap-env:Envelope>"#,
        ),
        env = SOAP_ENVELOPE_NS,
        enc = SOAP_ENCODING_NS,
        addr = ADDRESSING_NS,
        action = PROBE_ACTION,
        id = message_id.hyphenated(),
        anon = ANONYMOUS_ROLE,
        to = DISCOVERY_TO,
        disc = DISCOVERY_NS,
        body = body,
    )
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
