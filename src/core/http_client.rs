use std::time::Duration;

use crate::models::settings::{AppSettings, ProxySettings};

/// Mobile browser UA; several aggregators refuse requests without one.
pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; Mobile) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.210 Mobile Safari/537.36";

pub fn proxy_url(proxy: &ProxySettings) -> Option<String> {
    if !proxy.enabled || proxy.host.is_empty() {
        return None;
    }
    let scheme = match proxy.proxy_type.as_str() {
        "socks5" => "socks5",
        "https" => "https",
        _ => "http",
    };
    if !proxy.username.is_empty() {
        Some(format!(
            "{}://{}:{}@{}:{}",
            scheme, proxy.username, proxy.password, proxy.host, proxy.port
        ))
    } else {
        Some(format!("{}://{}:{}", scheme, proxy.host, proxy.port))
    }
}

pub fn apply_proxy(
    builder: reqwest::ClientBuilder,
    proxy: &ProxySettings,
) -> reqwest::ClientBuilder {
    let Some(url) = proxy_url(proxy) else {
        return builder;
    };
    match reqwest::Proxy::all(&url) {
        Ok(p) => builder.proxy(p),
        Err(e) => {
            tracing::warn!("Invalid proxy URL: {}", e);
            builder
        }
    }
}

/// Shared client for metadata lookups and transfers. No overall request
/// timeout: transfers may run as long as the body keeps flowing, while
/// metadata calls set their own per-request timeout.
pub fn build_client(settings: &AppSettings) -> anyhow::Result<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(15));
    let client = apply_proxy(builder, &settings.proxy).build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_proxy_has_no_url() {
        let proxy = ProxySettings {
            host: "127.0.0.1".into(),
            ..Default::default()
        };
        assert_eq!(proxy_url(&proxy), None);
    }

    #[test]
    fn proxy_url_with_credentials() {
        let proxy = ProxySettings {
            enabled: true,
            proxy_type: "socks5".into(),
            host: "10.0.0.2".into(),
            port: 1080,
            username: "u".into(),
            password: "p".into(),
        };
        assert_eq!(proxy_url(&proxy).as_deref(), Some("socks5://u:p@10.0.0.2:1080"));
    }

    #[test]
    fn unknown_proxy_type_falls_back_to_http() {
        let proxy = ProxySettings {
            enabled: true,
            proxy_type: "ftp".into(),
            host: "proxy.local".into(),
            ..Default::default()
        };
        assert_eq!(proxy_url(&proxy).as_deref(), Some("http://proxy.local:8080"));
    }

    #[test]
    fn default_settings_build_a_client() {
        assert!(build_client(&AppSettings::default()).is_ok());
    }
}
