//! Default values for configuration

/// Default bind address
pub fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

/// Default listening port (same port the front end expects)
pub fn default_server_port() -> u16 {
    3000
}

/// Default maximum JSON request body (64 KiB)
pub fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Default SQLite pool size
pub fn default_max_connections() -> u32 {
    5
}

/// Default database file name inside the base directory
pub fn default_database_file() -> String {
    "database.db".to_string()
}

/// Default: load the built-in sample data into an empty database
pub fn default_seed_enabled() -> bool {
    true
}
