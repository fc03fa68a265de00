//! Network URL constants for the Perpex SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.perpex.exchange";

/// Local development stack (default port of the dev matching service).
pub const LOCAL_API_URL: &str = "http://localhost:3001";
