use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_URL: &str = "https://uppamed.vercel.app";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(alias = "NEXT_PUBLIC_API_URL", alias = "API_URL")]
    pub api_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn build_time_base_url() -> Option<String> {
    option_env!("NEXT_PUBLIC_API_URL").and_then(normalize_base_url)
}

fn cache_base_url(value: String) -> String {
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{normalize_base_url, RuntimeConfig};

    fn read_global(global: &str, keys: &[&str]) -> Option<String> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &global.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        keys.iter()
            .filter_map(|key| js_sys::Reflect::get(&obj, &(*key).into()).ok())
            .filter(|v| !v.is_undefined() && !v.is_null())
            .find_map(|v| v.as_string())
            .and_then(|v| normalize_base_url(&v))
    }

    // window.__UPPAMED_ENV (env.js) takes precedence over window.__UPPAMED_CONFIG.
    pub fn snapshot_from_globals() -> Option<String> {
        read_global("__UPPAMED_ENV", &["NEXT_PUBLIC_API_URL", "api_url"])
            .or_else(|| read_global("__UPPAMED_CONFIG", &["api_url", "NEXT_PUBLIC_API_URL"]))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(existing) = browser::snapshot_from_globals() {
            return cache_base_url(existing);
        }
        if let Some(url) = browser::fetch_runtime_config()
            .await
            .and_then(|cfg| cfg.api_url)
            .and_then(|url| normalize_base_url(&url))
        {
            return cache_base_url(url);
        }
    }
    if let Some(url) = build_time_base_url() {
        return cache_base_url(url);
    }
    cache_base_url(DEFAULT_API_URL.to_string())
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("API base URL: {}", url);
}
