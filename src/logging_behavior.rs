//! # Logging Behaviors
//!
//! The behaviors the native SDK can log, and the identifiers its settings
//! store knows them by. Enable or disable them through
//! [`Settings`](crate::Settings).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logging behavior used by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoggingBehavior {
    /// Include access tokens in logging
    #[serde(rename = "include_access_tokens")]
    AccessTokens,

    /// Log performance characteristics
    #[serde(rename = "perf_characteristics")]
    PerformanceCharacteristics,

    /// Log app event interactions
    #[serde(rename = "app_events")]
    AppEvents,

    /// Log informational occurrences
    #[serde(rename = "informational")]
    Informational,

    /// Log cache errors
    #[serde(rename = "cache_errors")]
    CacheErrors,

    /// Log errors from SDK UI controls
    #[serde(rename = "ui_control_errors")]
    UiControlErrors,

    /// Log debug warnings from API responses, e.g. when fields were requested
    /// without the permission to read them
    #[serde(rename = "graph_api_debug_warning")]
    GraphApiDebugWarning,

    /// Log info-level notices from API responses, e.g. upcoming deprecations
    ///
    /// The lowest severity; enabling it logs everything the warning tier does.
    #[serde(rename = "graph_api_debug_info")]
    GraphApiDebugInfo,

    /// Log errors from SDK network requests
    #[serde(rename = "network_requests")]
    NetworkRequests,

    /// Log errors likely to be preventable by the developer. Enabled by default.
    #[serde(rename = "developer_errors")]
    DeveloperErrors,
}

impl LoggingBehavior {
    /// Every behavior, in declaration order
    pub const ALL: [LoggingBehavior; 10] = [
        LoggingBehavior::AccessTokens,
        LoggingBehavior::PerformanceCharacteristics,
        LoggingBehavior::AppEvents,
        LoggingBehavior::Informational,
        LoggingBehavior::CacheErrors,
        LoggingBehavior::UiControlErrors,
        LoggingBehavior::GraphApiDebugWarning,
        LoggingBehavior::GraphApiDebugInfo,
        LoggingBehavior::NetworkRequests,
        LoggingBehavior::DeveloperErrors,
    ];

    /// Identifier used by the settings store
    pub fn as_sdk_str(&self) -> &'static str {
        match self {
            LoggingBehavior::AccessTokens => "include_access_tokens",
            LoggingBehavior::PerformanceCharacteristics => "perf_characteristics",
            LoggingBehavior::AppEvents => "app_events",
            LoggingBehavior::Informational => "informational",
            LoggingBehavior::CacheErrors => "cache_errors",
            LoggingBehavior::UiControlErrors => "ui_control_errors",
            LoggingBehavior::GraphApiDebugWarning => "graph_api_debug_warning",
            LoggingBehavior::GraphApiDebugInfo => "graph_api_debug_info",
            LoggingBehavior::NetworkRequests => "network_requests",
            LoggingBehavior::DeveloperErrors => "developer_errors",
        }
    }

    /// Look up a behavior by its settings store identifier
    ///
    /// Unknown identifiers give `None`; stores may carry behaviors this crate
    /// doesn't know about.
    pub fn from_sdk_str(value: &str) -> Option<Self> {
        match value {
            "include_access_tokens" => Some(LoggingBehavior::AccessTokens),
            "perf_characteristics" => Some(LoggingBehavior::PerformanceCharacteristics),
            "app_events" => Some(LoggingBehavior::AppEvents),
            "informational" => Some(LoggingBehavior::Informational),
            "cache_errors" => Some(LoggingBehavior::CacheErrors),
            "ui_control_errors" => Some(LoggingBehavior::UiControlErrors),
            "graph_api_debug_warning" => Some(LoggingBehavior::GraphApiDebugWarning),
            "graph_api_debug_info" => Some(LoggingBehavior::GraphApiDebugInfo),
            "network_requests" => Some(LoggingBehavior::NetworkRequests),
            "developer_errors" => Some(LoggingBehavior::DeveloperErrors),
            _ => None,
        }
    }
}

impl fmt::Display for LoggingBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sdk_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
