use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Backend location, resolved once per client construction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        Self {
            api_url: resolve_api_url(runtime_api_url(), option_env!("API_BASE_URL")),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime override injected by the hosting page as `window.ENV`.
///
/// Both `API_URL` and `api_url` are accepted; the upper-case form wins.
fn runtime_api_url() -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    ["API_URL", "api_url"].iter().find_map(|key| {
        js_sys::Reflect::get(&env, &(*key).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}

/// Runtime value first, then the build-time `API_BASE_URL`, then the local default.
pub(crate) fn resolve_api_url(runtime: Option<String>, build_time: Option<&str>) -> String {
    let chosen = runtime
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            build_time
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    chosen.trim().trim_end_matches('/').to_string()
}
