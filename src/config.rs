/// Purchase endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.bingwasokoni.lore/api/purchases.php";
/// Account identifier sent as `user_id` when none is configured.
pub const DEFAULT_USER_ID: u64 = 1798;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub user_id: u64,
}

impl Config {
    pub fn new(endpoint: impl Into<String>, user_id: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_id,
        }
    }
}
