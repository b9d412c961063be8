use crate::app_config::{AcquisitionMode, AppConfig, Environment, TemplateVersion};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => match raw.as_str() {
                "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
                "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
                _ => Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("expected a boolean, got \"{raw}\""),
                }),
            },
        }
    };

    let env = parse_environment(&or_default("RESTOCK_ENV", "development"));
    let bind_addr = parse_addr("RESTOCK_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("RESTOCK_LOG_LEVEL", "info");
    let store_origin = or_default("RESTOCK_STORE_ORIGIN", "https://usgstore.com.au");
    let template = parse_template(&or_default("RESTOCK_TEMPLATE", "carousel_v1"))?;
    let acquisition = parse_acquisition(&or_default("RESTOCK_ACQUISITION", "static"))?;
    let upload_dir = PathBuf::from(or_default("RESTOCK_UPLOAD_DIR", "static/uploads"));

    let scraper_timeout_secs = parse_u64("RESTOCK_SCRAPER_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "RESTOCK_SCRAPER_USER_AGENT",
        "restock/0.1 (catalog-relisting)",
    );
    let scraper_max_retries = parse_u32("RESTOCK_SCRAPER_MAX_RETRIES", "5")?;
    let scraper_backoff_base_secs = parse_u64("RESTOCK_SCRAPER_BACKOFF_BASE_SECS", "1")?;

    let collection_timeout_secs = parse_u64("RESTOCK_COLLECTION_TIMEOUT_SECS", "10")?;
    let collection_max_retries = parse_u32("RESTOCK_COLLECTION_MAX_RETRIES", "3")?;
    let collect_stop_after_first = parse_bool("RESTOCK_COLLECT_STOP_AFTER_FIRST", true)?;

    let render_wait_secs = parse_u64("RESTOCK_RENDER_WAIT_SECS", "10")?;

    let shopify_store = lookup("RESTOCK_SHOPIFY_STORE").ok();
    let shopify_api_key = lookup("RESTOCK_SHOPIFY_API_KEY").ok();
    let shopify_password = lookup("RESTOCK_SHOPIFY_PASSWORD").ok();
    let shopify_default_price = or_default("RESTOCK_SHOPIFY_DEFAULT_PRICE", "199.99");

    // Missing catalog credentials are tolerated for local iteration (the
    // publish route reports itself unconfigured), but production startup
    // must fail fast.
    if env == Environment::Production {
        for (var, value) in [
            ("RESTOCK_SHOPIFY_STORE", &shopify_store),
            ("RESTOCK_SHOPIFY_API_KEY", &shopify_api_key),
            ("RESTOCK_SHOPIFY_PASSWORD", &shopify_password),
        ] {
            if value.is_none() {
                return Err(ConfigError::MissingEnvVar(var.to_string()));
            }
        }
    }

    let shipping_weight = or_default("RESTOCK_SHIPPING_WEIGHT", "1 kg");
    let shipping_policy = or_default(
        "RESTOCK_SHIPPING_POLICY",
        "Standard shipping in 5-7 business days.",
    );
    let returns_policy = or_default(
        "RESTOCK_RETURNS_POLICY",
        "Returns accepted within 30 days.",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        store_origin,
        template,
        acquisition,
        upload_dir,
        scraper_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_backoff_base_secs,
        collection_timeout_secs,
        collection_max_retries,
        collect_stop_after_first,
        render_wait_secs,
        shopify_store,
        shopify_api_key,
        shopify_password,
        shopify_default_price,
        shipping_weight,
        shipping_policy,
        returns_policy,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_template(s: &str) -> Result<TemplateVersion, ConfigError> {
    match s {
        "carousel_v1" => Ok(TemplateVersion::CarouselV1),
        "thumbnail_v2" => Ok(TemplateVersion::ThumbnailV2),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RESTOCK_TEMPLATE".to_string(),
            reason: format!("expected carousel_v1 or thumbnail_v2, got \"{other}\""),
        }),
    }
}

fn parse_acquisition(s: &str) -> Result<AcquisitionMode, ConfigError> {
    match s {
        "static" => Ok(AcquisitionMode::Static),
        "rendered" => Ok(AcquisitionMode::Rendered),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RESTOCK_ACQUISITION".to_string(),
            reason: format!("expected static or rendered, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.store_origin, "https://usgstore.com.au");
        assert_eq!(cfg.template, TemplateVersion::CarouselV1);
        assert_eq!(cfg.acquisition, AcquisitionMode::Static);
        assert_eq!(cfg.scraper_timeout_secs, 30);
        assert_eq!(cfg.scraper_max_retries, 5);
        assert_eq!(cfg.scraper_backoff_base_secs, 1);
        assert_eq!(cfg.collection_timeout_secs, 10);
        assert_eq!(cfg.collection_max_retries, 3);
        assert!(cfg.collect_stop_after_first);
        assert!(cfg.shopify_store.is_none());
        assert_eq!(cfg.shopify_default_price, "199.99");
        assert_eq!(cfg.shipping_weight, "1 kg");
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESTOCK_BIND_ADDR"),
            "expected InvalidEnvVar(RESTOCK_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_parses_template_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_TEMPLATE", "thumbnail_v2");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.template, TemplateVersion::ThumbnailV2);
    }

    #[test]
    fn build_app_config_rejects_unknown_template() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_TEMPLATE", "mystery_v9");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESTOCK_TEMPLATE"),
            "expected InvalidEnvVar(RESTOCK_TEMPLATE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_parses_acquisition_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_ACQUISITION", "rendered");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.acquisition, AcquisitionMode::Rendered);
    }

    #[test]
    fn build_app_config_rejects_unknown_acquisition() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_ACQUISITION", "psychic");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESTOCK_ACQUISITION"
        ));
    }

    #[test]
    fn build_app_config_parses_stop_after_first_flag() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_COLLECT_STOP_AFTER_FIRST", "false");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert!(!cfg.collect_stop_after_first);
    }

    #[test]
    fn build_app_config_rejects_non_boolean_flag() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_COLLECT_STOP_AFTER_FIRST", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "RESTOCK_COLLECT_STOP_AFTER_FIRST"
        ));
    }

    #[test]
    fn production_requires_catalog_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_ENV", "production");
        map.insert("RESTOCK_SHOPIFY_STORE", "my-store");
        map.insert("RESTOCK_SHOPIFY_API_KEY", "key");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "RESTOCK_SHOPIFY_PASSWORD"),
            "expected MissingEnvVar(RESTOCK_SHOPIFY_PASSWORD), got: {result:?}"
        );
    }

    #[test]
    fn production_succeeds_with_all_catalog_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_ENV", "production");
        map.insert("RESTOCK_SHOPIFY_STORE", "my-store");
        map.insert("RESTOCK_SHOPIFY_API_KEY", "key");
        map.insert("RESTOCK_SHOPIFY_PASSWORD", "pass");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.env, Environment::Production);
    }

    #[test]
    fn build_app_config_reads_shopify_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_SHOPIFY_STORE", "my-store");
        map.insert("RESTOCK_SHOPIFY_API_KEY", "key");
        map.insert("RESTOCK_SHOPIFY_PASSWORD", "pass");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.shopify_store.as_deref(), Some("my-store"));
        assert_eq!(cfg.shopify_api_key.as_deref(), Some("key"));
        assert_eq!(cfg.shopify_password.as_deref(), Some("pass"));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("RESTOCK_SHOPIFY_API_KEY", "super-secret");
        map.insert("RESTOCK_SHOPIFY_PASSWORD", "hunter2");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        let debugged = format!("{cfg:?}");
        assert!(!debugged.contains("super-secret"));
        assert!(!debugged.contains("hunter2"));
        assert!(debugged.contains("[redacted]"));
    }
}
