// Tests for host classification

use skimmer_core::classify::{HostClass, classify_host, classify_url};
use url::Url;

fn class_of(url: &str) -> Option<HostClass> {
    classify_url(&Url::parse(url).unwrap())
}

// ============================================================================
// Private hosts
// ============================================================================

#[test]
fn test_localhost_is_private() {
    assert_eq!(class_of("http://localhost:3000"), Some(HostClass::Private));
    assert_eq!(classify_host("localhost"), HostClass::Private);
}

#[test]
fn test_loopback_ips_are_private() {
    assert_eq!(class_of("http://127.0.0.1:8080/"), Some(HostClass::Private));
    assert_eq!(class_of("http://127.10.20.30/"), Some(HostClass::Private));
    assert_eq!(class_of("http://[::1]:8080/"), Some(HostClass::Private));
}

#[test]
fn test_local_zone_is_private() {
    assert_eq!(class_of("http://myapp.local"), Some(HostClass::Private));
    assert_eq!(class_of("https://printer.office.local/status"), Some(HostClass::Private));
}

#[test]
fn test_ten_slash_eight_is_private() {
    for host in ["10.0.0.1", "10.1.2.3", "10.255.255.255"] {
        assert_eq!(classify_host(host), HostClass::Private, "{}", host);
    }
    assert_eq!(class_of("http://10.1.2.3:8000"), Some(HostClass::Private));
}

#[test]
fn test_172_16_slash_12_is_private() {
    for second in 16..=31 {
        let host = format!("172.{}.0.1", second);
        assert_eq!(classify_host(&host), HostClass::Private, "{}", host);
    }
}

#[test]
fn test_192_168_slash_16_is_private() {
    assert_eq!(class_of("http://192.168.1.1/test"), Some(HostClass::Private));
    assert_eq!(classify_host("192.168.255.254"), HostClass::Private);
}

// ============================================================================
// Public hosts
// ============================================================================

#[test]
fn test_internet_hostnames_are_public() {
    assert_eq!(class_of("https://google.com"), Some(HostClass::Public));
    assert_eq!(class_of("https://example.com/page"), Some(HostClass::Public));
}

#[test]
fn test_172_outside_range_is_public() {
    assert_eq!(classify_host("172.15.0.1"), HostClass::Public);
    assert_eq!(classify_host("172.32.0.1"), HostClass::Public);
}

#[test]
fn test_public_ips() {
    for host in ["8.8.8.8", "1.1.1.1", "11.0.0.1", "192.169.0.1", "169.254.1.1"] {
        assert_eq!(classify_host(host), HostClass::Public, "{}", host);
    }
    assert_eq!(class_of("http://[2001:db8::1]/"), Some(HostClass::Public));
}

#[test]
fn test_lookalike_names_are_public() {
    assert_eq!(classify_host("localhost.example.com"), HostClass::Public);
    assert_eq!(classify_host("local"), HostClass::Public);
    assert_eq!(classify_host("notlocal"), HostClass::Public);
    assert_eq!(classify_host("10.example.com"), HostClass::Public);
}

#[test]
fn test_classification_is_syntactic() {
    // hostname is never resolved, whatever it points at
    assert_eq!(class_of("http://internal-service:8080"), Some(HostClass::Public));
}

#[test]
fn test_display() {
    assert_eq!(HostClass::Private.to_string(), "private");
    assert_eq!(HostClass::Public.to_string(), "public");
}
