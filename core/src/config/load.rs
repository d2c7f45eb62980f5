use std::path::Path;

use super::types::AppConfig;

const CONFIG_FILE: &str = "doxbuild.toml";

/// Load configuration from `./doxbuild.toml` when present, otherwise fall
/// back to defaults. Environment variables take priority over the file.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let local_config = Path::new(CONFIG_FILE);

    let mut cfg: AppConfig = if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    if let Ok(v) = std::env::var("DOXBUILD_COMPILER_BIN") {
        if !v.trim().is_empty() {
            cfg.build.compiler_bin = v;
        }
    }
    if let Ok(v) = std::env::var("DOXBUILD_MAX_WORKERS") {
        if let Ok(n) = v.trim().parse::<usize>() {
            if n > 0 {
                cfg.build.max_workers = n;
            }
        }
    }
    if let Ok(v) = std::env::var("DOXBUILD_LOG_DIR") {
        if !v.trim().is_empty() {
            cfg.logging.file = true;
            cfg.logging.directory = Some(v);
        }
    }

    Ok(cfg)
}
