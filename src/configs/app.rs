use std::sync::LazyLock;

use crate::utils::env::parse_env;

pub struct AppConfig {
    pub env: String,
    pub data_file: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn is_local(&self) -> bool {
        self.env.eq_ignore_ascii_case("local")
    }
}

pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| AppConfig {
    env: parse_env("APP_ENV", "development"),
    data_file: parse_env("DATA_FILE", "data/users.json"),
    bind_addr: parse_env("BIND_ADDR", "0.0.0.0:8080"),
});
