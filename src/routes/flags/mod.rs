pub mod routes;

use serde::Serialize;

use crate::flags::FeatureFlag;

// MODELS

#[derive(Debug, Serialize)]
pub struct FlagStateResponse {
    pub name: String,
    pub known: bool,
    pub enabled: bool,
}

// HELPER FUNCTIONS

/// Unknown names are reported as disabled rather than rejected.
pub fn flag_state(name: &str, lookup: impl Fn(FeatureFlag) -> bool) -> FlagStateResponse {
    match FeatureFlag::from_key(name) {
        Some(flag) => FlagStateResponse {
            name: name.to_string(),
            known: true,
            enabled: lookup(flag),
        },
        None => FlagStateResponse {
            name: name.to_string(),
            known: false,
            enabled: false,
        },
    }
}
