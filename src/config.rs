lazy_static::lazy_static! {
    pub static ref API_URL: String = std::env::var("API_URL").unwrap_or_else(|_| String::from("localhost:5900"));

    /// Key mixed into every argon2 hash, must match the one used when the
    /// stored hashes were produced
    pub static ref SECRET_KEY: String = std::env::var("SECRET_KEY").unwrap_or_else(|_| "0123".repeat(8));

    /// Shared HS256 secret of the token issuer
    pub static ref JWT_SECRET_KEY: String = std::env::var("JWT_SECRET_KEY").unwrap_or_else(|_| String::from("secure jwt secret"));
}

pub const DEFAULT_LOG_FILTER: &str = "info,actix_web=info,actix_server=info";

/// Reads `DATABASE_URL`, it has no default
pub fn database_url() -> Result<String, std::env::VarError> {
    std::env::var("DATABASE_URL")
}

/// Names of the secrets still running on their built-in development value
pub fn secrets_using_defaults() -> Vec<&'static str> {
    ["SECRET_KEY", "JWT_SECRET_KEY"]
        .into_iter()
        .filter(|name| std::env::var(name).is_err())
        .collect()
}
