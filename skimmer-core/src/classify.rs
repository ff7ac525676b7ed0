// Syntactic host classification. No DNS lookups happen here: a hostname
// that resolves to a private address is still Public.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Hostname suffixes that only exist on a local network
pub const PRIVATE_ZONE_SUFFIXES: &[&str] = &[".local"];

/// Which side of the network boundary a target host lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostClass {
    Private,
    Public,
}

impl HostClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostClass::Private => "private",
            HostClass::Public => "public",
        }
    }
}

impl fmt::Display for HostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a target URL string. `None` when it does not parse or has no
/// host; reporting that is left to the caller.
pub fn classify(target: &str) -> Option<HostClass> {
    Url::parse(target).ok().as_ref().and_then(classify_url)
}

/// Classify a parsed URL. `None` when the URL has no host at all.
pub fn classify_url(url: &Url) -> Option<HostClass> {
    let class = match url.host()? {
        Host::Domain(domain) => classify_host(domain),
        Host::Ipv4(ip) => classify_ipv4(ip),
        Host::Ipv6(ip) => classify_ipv6(ip),
    };
    Some(class)
}

/// Classify a bare host string: a hostname, an IPv4 literal, or an IPv6
/// literal with or without brackets.
pub fn classify_host(host: &str) -> HostClass {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let bare = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = bare.parse::<IpAddr>() {
        return match ip {
            IpAddr::V4(v4) => classify_ipv4(v4),
            IpAddr::V6(v6) => classify_ipv6(v6),
        };
    }

    if host == "localhost" {
        return HostClass::Private;
    }

    if PRIVATE_ZONE_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
    {
        return HostClass::Private;
    }

    HostClass::Public
}

// 10/8, 172.16/12 and 192.168/16 are exactly `is_private`
fn classify_ipv4(ip: Ipv4Addr) -> HostClass {
    if ip.is_loopback() || ip.is_private() {
        HostClass::Private
    } else {
        HostClass::Public
    }
}

fn classify_ipv6(ip: Ipv6Addr) -> HostClass {
    if ip.is_loopback() {
        return HostClass::Private;
    }
    match ip.to_ipv4_mapped() {
        Some(v4) => classify_ipv4(v4),
        None => HostClass::Public,
    }
}
