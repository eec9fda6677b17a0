//! # Config Commands

use tracing::debug;

use crate::state::{AppState, ConfigState};

/// Gets the effective configuration (defaults, file, and environment
/// merged).
pub fn get_config(state: &AppState) -> ConfigState {
    debug!("get_config command");
    state.config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticCatalog;
    use crate::commands::test_support::state_with;

    #[tokio::test]
    async fn test_get_config_returns_effective_values() {
        let state = state_with(StaticCatalog::default()).await;

        let config = get_config(&state);

        assert_eq!(config, ConfigState::default());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["tax_rate_bps"], 1000);
        assert!(json.get("database_path").is_none());
    }
}
