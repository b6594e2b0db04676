use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

const DEFAULT_PORT: u16 = 8080;

/// Reads `BIND_HOST` and `PORT`, falling back to `0.0.0.0:8080`.
pub fn resolve_bind_addr() -> SocketAddr {
    bind_addr_from(env::var("BIND_HOST").ok(), env::var("PORT").ok())
}

fn bind_addr_from(host: Option<String>, port: Option<String>) -> SocketAddr {
    let host = host
        .and_then(|value| value.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = port
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    SocketAddr::new(host, port)
}
