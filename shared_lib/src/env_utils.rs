use std::env;

use tracing::error;

const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Libsql,
    Memory,
}

pub fn get_host_uri() -> String {
    match env::var("HOST") {
        Ok(host) if host.starts_with("http://") || host.starts_with("https://") => host,
        Ok(host) => format!("https://{host}"),
        _ => format!("http://localhost:{}", get_port()),
    }
}

pub fn get_port() -> u16 {
    let default_port: u16 = 8080;

    let port = match env::var("PORT") {
        Ok(port) => port,
        _ => default_port.to_string(),
    };
    let port: u16 = match port.parse::<_>() {
        Ok(port) => port,
        _ => {
            error!("Failed to parse PORT env var, using default");
            default_port
        }
    };

    port
}

pub fn get_store_backend() -> StoreBackend {
    match env::var("STORE_BACKEND") {
        Ok(backend) => match backend.to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "libsql" => StoreBackend::Libsql,
            other => {
                error!("Unknown STORE_BACKEND '{}', using libsql", other);
                StoreBackend::Libsql
            }
        },
        _ => StoreBackend::Libsql,
    }
}

pub fn get_local_db_path() -> String {
    env::var("LIBSQL_LOCAL_DB_PATH").unwrap_or("webhooks.db".to_string())
}

/// Remote primary url and auth token, only when both are configured.
pub fn get_libsql_remote() -> Option<(String, String)> {
    let url = env::var("LIBSQL_CLIENT_URL").ok()?;
    let token = env::var("LIBSQL_CLIENT_TOKEN").ok()?;
    Some((url, token))
}

pub fn get_max_body_bytes() -> usize {
    match env::var("MAX_BODY_BYTES") {
        Ok(limit) => match limit.parse::<usize>() {
            Ok(limit) => limit,
            _ => {
                error!("Failed to parse MAX_BODY_BYTES env var, using default");
                DEFAULT_MAX_BODY_BYTES
            }
        },
        _ => DEFAULT_MAX_BODY_BYTES,
    }
}

pub fn get_require_json_object() -> bool {
    match env::var("REQUIRE_JSON_OBJECT") {
        Ok(flag) => parse_flag(&flag),
        _ => false,
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
