//! Proxy model definitions
//!
//! Contains the normalized node representation every parser produces and
//! every generator consumes.

use std::fmt;

/// Represents the type of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    VMess,
    Vless,
    Trojan,
    Shadowsocks,
}

impl ProxyType {
    /// URI scheme used by share links of this type.
    pub fn scheme(self) -> &'static str {
        match self {
            ProxyType::VMess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Shadowsocks => "ss",
        }
    }

    /// Value of the `type` key in a Clash proxy entry.
    pub fn clash_type(self) -> &'static str {
        self.scheme()
    }

    /// Value of the `protocol` key in a V2Ray outbound.
    pub fn v2ray_protocol(self) -> &'static str {
        match self {
            ProxyType::VMess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Shadowsocks => "shadowsocks",
        }
    }

    pub fn from_clash_type(kind: &str) -> Option<Self> {
        match kind {
            "vmess" => Some(ProxyType::VMess),
            "vless" => Some(ProxyType::Vless),
            "trojan" => Some(ProxyType::Trojan),
            "ss" => Some(ProxyType::Shadowsocks),
            _ => None,
        }
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProxyType::VMess => "VMess",
            ProxyType::Vless => "Vless",
            ProxyType::Trojan => "Trojan",
            ProxyType::Shadowsocks => "SS",
        };
        f.write_str(name)
    }
}

/// Protocol specific fields. The variant decides the proxy type, so a node
/// can never carry a cipher method while claiming to be vless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyExtra {
    VMess { alter_id: u16, security: String },
    Vless { security: String },
    Trojan { security: String },
    Shadowsocks { method: String },
}

/// Represents a proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    /// Display name from the source, empty when none was given.
    pub remark: String,
    pub hostname: String,
    pub port: u16,
    /// UUID for vmess/vless, password for trojan/shadowsocks.
    pub identity: String,
    pub extra: ProxyExtra,
}

impl Proxy {
    pub fn vmess_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        user_id: &str,
        alter_id: u16,
        security: &str,
    ) -> Self {
        Proxy {
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            identity: user_id.to_string(),
            extra: ProxyExtra::VMess {
                alter_id,
                security: security.to_string(),
            },
        }
    }

    pub fn vless_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        user_id: &str,
        security: &str,
    ) -> Self {
        Proxy {
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            identity: user_id.to_string(),
            extra: ProxyExtra::Vless {
                security: security.to_string(),
            },
        }
    }

    pub fn trojan_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        password: &str,
        security: &str,
    ) -> Self {
        Proxy {
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            identity: password.to_string(),
            extra: ProxyExtra::Trojan {
                security: security.to_string(),
            },
        }
    }

    pub fn ss_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        password: &str,
        method: &str,
    ) -> Self {
        Proxy {
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            identity: password.to_string(),
            extra: ProxyExtra::Shadowsocks {
                method: method.to_string(),
            },
        }
    }

    pub fn proxy_type(&self) -> ProxyType {
        match self.extra {
            ProxyExtra::VMess { .. } => ProxyType::VMess,
            ProxyExtra::Vless { .. } => ProxyType::Vless,
            ProxyExtra::Trojan { .. } => ProxyType::Trojan,
            ProxyExtra::Shadowsocks { .. } => ProxyType::Shadowsocks,
        }
    }

    /// Name used in generated configs: the remark, or `host (port)` when the
    /// source did not name the node.
    pub fn display_name(&self) -> String {
        if self.remark.is_empty() {
            format!("{} ({})", self.hostname, self.port)
        } else {
            self.remark.clone()
        }
    }

    /// Transport security mode for vmess/vless/trojan. Shadowsocks has none.
    pub fn security(&self) -> Option<&str> {
        match &self.extra {
            ProxyExtra::VMess { security, .. }
            | ProxyExtra::Vless { security }
            | ProxyExtra::Trojan { security } => Some(security),
            ProxyExtra::Shadowsocks { .. } => None,
        }
    }

    /// Whether the node's link-level security mode implies TLS on the wire.
    /// For vmess the security field is the body cipher, not TLS.
    pub fn tls_secure(&self) -> bool {
        match &self.extra {
            ProxyExtra::Vless { security } | ProxyExtra::Trojan { security } => {
                security == "tls" || security == "reality"
            }
            _ => false,
        }
    }
}
