use std::fmt::Write;
use std::net::IpAddr;

/// Name to query for the PTR record of `ip`.
///
/// IPv4 maps to `in-addr.arpa.` with the octets reversed; IPv6 maps to
/// `ip6.arpa.` with all 32 nibbles reversed.
pub fn reverse_pointer_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa.")
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(73);
            for byte in v6.octets().iter().rev() {
                let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
            }
            name.push_str("ip6.arpa.");
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_reverse_name() {
        let ip: IpAddr = "192.0.2.10".parse().unwrap();
        assert_eq!(reverse_pointer_name(ip), "10.2.0.192.in-addr.arpa.");
    }

    #[test]
    fn test_ipv6_reverse_name() {
        let ip: IpAddr = "2001:db8::567:89ab".parse().unwrap();
        assert_eq!(
            reverse_pointer_name(ip),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."
        );
    }
}
