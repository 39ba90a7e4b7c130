//! Reads a WS-Discovery `ProbeMatches` reply into a [`HostRecord`].
//!
//! Elements are matched by local name along
//! `Envelope/Body/ProbeMatches/ProbeMatch`, so vendors that pick odd namespace
//! prefixes still parse. When a reply lists several `XAddrs` or `Scopes`
//! elements the last usable one wins.

use std::sync::OnceLock;

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use nvtscout_common::error::ParseError;
use nvtscout_common::network::host::{Endpoint, HostRecord};

const XADDRS_PATH: &[&str] = &["Body", "ProbeMatches", "ProbeMatch", "XAddrs"];
const SCOPES_PATH: &[&str] = &["Body", "ProbeMatches", "ProbeMatch", "Scopes"];

const NAME_SCOPE_PATTERN: &str = r"onvif://www\.onvif\.org/name/[A-Za-z0-9-]+";

static NAME_SCOPE: OnceLock<Regex> = OnceLock::new();

fn name_scope() -> &'static Regex {
    NAME_SCOPE.get_or_init(|| Regex::new(NAME_SCOPE_PATTERN).expect("name scope pattern is valid"))
}

/// Parses one reply body.
///
/// Only malformed XML is an error. A missing port or name is logged and the
/// record keeps `0` or an empty string.
pub fn parse(body: &str) -> Result<HostRecord, ParseError> {
    let (record, warnings) = read(body)?;
    for warning in &warnings {
        debug!(url = record.reachable_address(), "{warning}");
    }
    Ok(record)
}

fn read(body: &str) -> Result<(HostRecord, Vec<ParseError>), ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc: Document = Document::parse_with_options(body, options)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;
    let root: Node = doc.root_element();
    let mut warnings: Vec<ParseError> = Vec::new();

    let endpoint: Endpoint = find_path(root, XADDRS_PATH)
        .into_iter()
        .filter_map(|xaddrs| first_authority(xaddrs.text().unwrap_or_default()))
        .fold(None, |_, authority| Some(split_authority(authority)))
        .map(|(endpoint, port_ok)| {
            if !port_ok {
                warnings.push(ParseError::InvalidPort(endpoint.address().to_string()));
            }
            endpoint
        })
        .unwrap_or_default();

    let name: Option<String> = find_path(root, SCOPES_PATH)
        .into_iter()
        .filter_map(|scopes| scope_name(scopes.text().unwrap_or_default()))
        .fold(None, |_, name| Some(name));

    if name.is_none() {
        warnings.push(ParseError::NoNameScope);
    }

    Ok((HostRecord::new(endpoint, name.unwrap_or_default()), warnings))
}

/// Children of `node` reached by following `path` one local name at a time.
fn find_path<'a, 'input>(node: Node<'a, 'input>, path: &[&str]) -> Vec<Node<'a, 'input>> {
    path.iter().fold(vec![node], |nodes, name| {
        nodes
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|c| c.is_element() && c.tag_name().name() == *name)
            .collect()
    })
}

/// `host:port` of the first URI in a whitespace separated `XAddrs` list.
fn first_authority(xaddrs: &str) -> Option<&str> {
    let uri: &str = xaddrs.split_whitespace().next()?;
    // "http://192.168.1.50:80/onvif/device_service" -> ["http:", "", "192.168.1.50:80", ...]
    uri.split('/').nth(2).filter(|authority| !authority.is_empty())
}

/// Splits an authority into ip and port. The flag is false when the port was
/// missing or not a number, in which case the port is `0`.
fn split_authority(authority: &str) -> (Endpoint, bool) {
    let (ip, port) = match authority.strip_prefix('[') {
        Some(rest) => match rest.split_once(']') {
            Some((ip, tail)) => (ip, tail.strip_prefix(':')),
            None => (authority, None),
        },
        None => match authority.split_once(':') {
            Some((ip, port)) => (ip, Some(port)),
            None => (authority, None),
        },
    };

    match port.and_then(|p| p.parse::<u16>().ok()) {
        Some(port) => (Endpoint::new(authority, ip, port), true),
        None => (Endpoint::new(authority, ip, 0), false),
    }
}

fn scope_name(scopes: &str) -> Option<String> {
    let found = name_scope().find(scopes)?;
    found.as_str().rsplit('/').next().map(str::to_string)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
