use std::path::PathBuf;

const CONFIG_DOCUMENT: &str = "wtwitch/config.json";
const CACHE_DOCUMENT: &str = "wtwitch/subscription-cache.json";

/// Location of wtwitch's own `config.json`, resolved from the process
/// environment on every call.
pub fn wtwitch_config_file() -> PathBuf {
    config_file_from(env_var)
}

/// Location of wtwitch's `subscription-cache.json`, resolved from the
/// process environment on every call.
pub fn wtwitch_cache_file() -> PathBuf {
    cache_file_from(env_var)
}

/// `$APPDATA`, else `$XDG_CONFIG_HOME`, else `$HOME/.config`.
pub fn config_file_from(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let base = env("APPDATA")
        .or_else(|| env("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| home_from(&env).join(".config"));
    base.join(CONFIG_DOCUMENT)
}

/// `$LOCALAPPDATA`, else `$XDG_CACHE_HOME`, else `$HOME/.cache`.
pub fn cache_file_from(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let base = env("LOCALAPPDATA")
        .or_else(|| env("XDG_CACHE_HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| home_from(&env).join(".cache"));
    base.join(CACHE_DOCUMENT)
}

fn home_from(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    env("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

// Unset and empty are treated alike, as XDG does.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Directory holding the front-end's own `config.toml`.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wtw")
}

#[cfg(unix)]
fn wtwitch_binary_names() -> &'static [&'static str] {
    &["wtwitch"]
}

#[cfg(windows)]
fn wtwitch_binary_names() -> &'static [&'static str] {
    &["wtwitch.exe", "wtwitch.sh", "wtwitch"]
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for name in names {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

/// Find the wtwitch executable.
///
/// Searches in order:
/// 1. WTWITCH_PATH environment variable
/// 2. PATH
pub fn find_wtwitch_binary() -> Option<PathBuf> {
    if let Some(path) = env_var("WTWITCH_PATH") {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }

    find_on_path(wtwitch_binary_names())
}

/// Binary name used when nothing was found; lets the OS report the launch error.
pub fn wtwitch_fallback_name() -> PathBuf {
    PathBuf::from(wtwitch_binary_names()[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn config_prefers_appdata() {
        let env = env_of(&[("APPDATA", "/win/roaming"), ("XDG_CONFIG_HOME", "/xdg")]);
        assert_eq!(
            config_file_from(env),
            PathBuf::from("/win/roaming/wtwitch/config.json")
        );
    }

    #[test]
    fn config_falls_back_to_xdg_then_home() {
        let env = env_of(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")]);
        assert_eq!(config_file_from(env), PathBuf::from("/xdg/wtwitch/config.json"));

        let env = env_of(&[("HOME", "/home/u")]);
        assert_eq!(
            config_file_from(env),
            PathBuf::from("/home/u/.config/wtwitch/config.json")
        );
    }

    #[test]
    fn cache_uses_xdg_cache_home() {
        let env = env_of(&[("XDG_CACHE_HOME", "/xdg-cache"), ("XDG_CONFIG_HOME", "/xdg")]);
        assert_eq!(
            cache_file_from(env),
            PathBuf::from("/xdg-cache/wtwitch/subscription-cache.json")
        );

        let env = env_of(&[("LOCALAPPDATA", "/win/local"), ("HOME", "/home/u")]);
        assert_eq!(
            cache_file_from(env),
            PathBuf::from("/win/local/wtwitch/subscription-cache.json")
        );

        let env = env_of(&[("HOME", "/home/u")]);
        assert_eq!(
            cache_file_from(env),
            PathBuf::from("/home/u/.cache/wtwitch/subscription-cache.json")
        );
    }
}
