use std::net::SocketAddr;

use axum::{extract::ConnectInfo, http::Request};

/// Identity used when no address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Determines the network identity of the caller.
///
/// Prefers `X-Forwarded-For`, then `X-Real-IP` (both set by the reverse proxy), then the
/// socket peer address recorded by `ConnectInfo`.
///
/// Without a trusted hop count the first `X-Forwarded-For` entry is used. With `n`
/// trusted proxies, the entry `n` places from the right is used, the last one a client
/// cannot forge. Zero trusted hops ignores both headers.
///
/// # Arguments
/// - `req` - Incoming request
/// - `trusted_hops` - Number of reverse proxies appending to `X-Forwarded-For`
///
/// # Returns
/// - `String` - Client address, or `"unknown"` when nothing is available
pub fn client_ip<B>(req: &Request<B>, trusted_hops: Option<usize>) -> String {
    if trusted_hops == Some(0) {
        return peer_ip(req);
    }

    let headers = req.headers();

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| forwarded_hop(value, trusted_hops));
    if let Some(ip) = forwarded {
        return ip;
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    peer_ip(req)
}

fn forwarded_hop(value: &str, trusted_hops: Option<usize>) -> Option<String> {
    let hops: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .collect();

    let index = match trusted_hops {
        Some(trusted) => hops.len().saturating_sub(trusted),
        None => 0,
    };

    hops.get(index).map(|hop| hop.to_string())
}

fn peer_ip<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn uses_first_forwarded_hop() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "10.0.0.2")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_ip(&req, None), "203.0.113.7");
    }

    #[test]
    fn uses_rightmost_untrusted_hop() {
        let req = Request::builder()
            .header("x-forwarded-for", "10.9.9.9, 203.0.113.7, 172.16.0.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_ip(&req, Some(1)), "172.16.0.1");
        assert_eq!(client_ip(&req, Some(2)), "203.0.113.7");
    }

    #[test]
    fn rotating_leftmost_hop_keeps_identity_with_trusted_proxy() {
        let spoofed = |first: &str| {
            Request::builder()
                .header("x-forwarded-for", format!("{}, 198.51.100.30", first))
                .body(Body::empty())
                .unwrap()
        };

        assert_eq!(client_ip(&spoofed("1.1.1.1"), Some(1)), "198.51.100.30");
        assert_eq!(client_ip(&spoofed("2.2.2.2"), Some(1)), "198.51.100.30");
    }

    #[test]
    fn short_forwarded_chain_uses_first_hop() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_ip(&req, Some(3)), "203.0.113.7");
    }

    #[test]
    fn zero_trusted_hops_uses_peer_address() {
        let mut req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .header("x-real-ip", "203.0.113.8")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 9], 4444))));

        assert_eq!(client_ip(&req, Some(0)), "192.0.2.9");
    }

    #[test]
    fn falls_back_to_real_ip() {
        let req = Request::builder()
            .header("x-real-ip", "198.51.100.4")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_ip(&req, None), "198.51.100.4");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 5555))));

        assert_eq!(client_ip(&req, None), "192.0.2.1");
    }

    #[test]
    fn unknown_without_any_source() {
        let req = Request::builder().body(Body::empty()).unwrap();

        assert_eq!(client_ip(&req, None), UNKNOWN_CLIENT);
    }
}
