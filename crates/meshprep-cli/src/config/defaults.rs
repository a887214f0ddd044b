use meshprep::engine::config::{NamingConvention, RadiiConfig, ResolveOptions};

/// Built-in values used when neither the command line nor the config file sets one.
pub struct DefaultsConfig {
    pub resolve: ResolveOptions,
    pub radii: RadiiConfig,
    pub naming: NamingConvention,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            radii: RadiiConfig::default(),
            naming: NamingConvention::default(),
        }
    }
}
