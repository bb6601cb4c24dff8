use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the catalog server listens on
    pub port: u16,
    /// SQLite database URL (`sqlite:./path.db` or `sqlite::memory:`)
    pub database_url: String,
    /// Insert the default users and sample product into an empty database
    pub seed: bool,
    /// Origin allowed by CORS; any origin when unset
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env_parse("CATALOG_PORT", 8080)?,
            database_url: env_str("CATALOG_DATABASE_URL", "sqlite:./data/catalog.db"),
            seed: env_flag("CATALOG_SEED", true),
            allowed_origin: std::env::var("CATALOG_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        Err(_) => Ok(default),
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Resolve the Dioxus dashboard dist directory.
///
/// If `FRONTEND_DIST` is set, that value is used as-is. Otherwise resolve
/// from the workspace root so this works whether the server is launched from
/// the repository root or from `catalog-server/`.
pub fn frontend_dist_from_env() -> String {
    if let Ok(path) = std::env::var("FRONTEND_DIST") {
        return path;
    }

    let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    workspace_root
        .join("target/dx/dashboard-ui/debug/web/public")
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_accepts_zero_and_false_as_off() {
        assert!(!parse_flag("0"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" false "));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
    }
}
