pub mod download_cache;
pub mod hashing;

pub const FILTER_SPEC: &str = "debug,rustls=info,ureq=info";
