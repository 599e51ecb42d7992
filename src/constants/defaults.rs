//! Default values applied when a link or structured entry omits a field.
//!
//! Every optional field read by the parsers resolves through one of these
//! constants, so "what does a missing `scy` mean" has exactly one answer.

/// Port used by vmess, vless and trojan when the source has none.
pub const DEFAULT_PORT: u16 = 443;

/// Address used for a vmess link whose JSON carries no (or an empty) `add`.
pub const PLACEHOLDER_ADDRESS: &str = "example.com";

/// Identity used when a vmess link or Clash vmess entry has no id.
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

pub const DEFAULT_ALTER_ID: u16 = 0;
pub const DEFAULT_VMESS_SECURITY: &str = "auto";
pub const DEFAULT_VLESS_SECURITY: &str = "none";
pub const DEFAULT_TROJAN_SECURITY: &str = "tls";

/// Name of the selector group generated into the Clash output.
pub const DEFAULT_GROUP_NAME: &str = "PROXY";

/// Seconds before a subscription fetch is abandoned.
pub const DEFAULT_FETCH_TIMEOUT: u64 = 10;
pub const DEFAULT_CONCUR_THREADS: usize = 4;
pub const DEFAULT_USER_AGENT: &str = "submerge";

pub const PREF_PATH: &str = "pref.toml";
pub const DEFAULT_SOURCE_LIST: &str = "sources.txt";
pub const DEFAULT_CLASH_TEMPLATE: &str = "sub_template.yaml";
pub const DEFAULT_CLASH_OUTPUT: &str = "sub.yaml";
pub const DEFAULT_V2RAY_TEMPLATE: &str = "v2ray_template.json";
pub const DEFAULT_V2RAY_OUTPUT: &str = "v2ray.json";
pub const DEFAULT_RAW_URI_OUTPUT: &str = "raw_uris.txt";
pub const DEFAULT_SUBSCRIPTION_OUTPUT: &str = "sub.txt";
