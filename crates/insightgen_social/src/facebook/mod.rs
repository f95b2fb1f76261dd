//! Facebook Graph API integration.

mod graph;
mod json_models;

pub use graph::{
    DEFAULT_GRAPH_BASE_URL, DEFAULT_GRAPH_VERSION, GraphApiClient, GraphApiSettings,
    GraphApiSettingsBuilder,
};
