mod manager;

pub use manager::{
    ApiKeys, ConfigFile, ConfigManager, DefaultsConfig, ResolveOptions, ResolvedConfig,
    SessionState, load_resolved, resolve_config,
};
