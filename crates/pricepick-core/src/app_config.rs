use std::net::SocketAddr;

/// Immutable application configuration, loaded once at startup and passed
/// explicitly to the components that need it.
#[derive(Clone)]
pub struct AppConfig {
    pub naver_client_id: String,
    pub naver_client_secret: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub search_timeout_secs: u64,
    /// Listings with item price + shipping at or below this value are
    /// treated as accessory/part matches and excluded from ranking.
    pub min_total_price: i64,
    /// Normalized search keywords are truncated to this many characters.
    pub query_max_chars: usize,
    /// Marketing terms stripped from raw product names before searching.
    pub query_stop_terms: Vec<String>,
    /// Static affiliate URL returned as `coupang_link` on every hit.
    pub affiliate_link: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("naver_client_id", &"[redacted]")
            .field("naver_client_secret", &"[redacted]")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("min_total_price", &self.min_total_price)
            .field("query_max_chars", &self.query_max_chars)
            .field("query_stop_terms", &self.query_stop_terms)
            .field("affiliate_link", &self.affiliate_link)
            .finish()
    }
}
