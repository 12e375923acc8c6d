//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Record failed documents and continue with the rest of a batch.
    #[serde(default)]
    pub keep_going: bool,

    /// Descend into sub-directories when the input is a directory.
    #[serde(default)]
    pub recursive: bool,
}
