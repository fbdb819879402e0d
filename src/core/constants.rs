//! Constants used throughout meli-deploy.
//!
//! Centralizes key names, file names and the deployment defaults.

/// Environment variables file name (.env).
pub const ENV_FILE: &str = ".env";

/// Optional project configuration file.
pub const CONFIG_FILE: &str = "meli-deploy.toml";

/// Service account credentials. Must hold valid JSON.
pub const CREDENTIALS_KEY: &str = "GOOGLE_CREDENTIALS";

/// MongoDB connection string.
pub const DATABASE_URI_KEY: &str = "URI_BD_GUATEVER";

/// MercadoLibre application client id.
pub const CLIENT_ID_KEY: &str = "MELI_CLIENT_ID";

/// Keys that must be present before anything is deployed, in check order.
pub const REQUIRED_KEYS: &[&str] = &[CREDENTIALS_KEY, DATABASE_URI_KEY, CLIENT_ID_KEY];

/// Keys the function reads but whose absence only warrants a warning.
pub const RECOMMENDED_KEYS: &[&str] = &["MELI_CLIENT_SECRET", "MELI_USER_ID"];

/// Default deploy tool binary.
pub const GCLOUD_BIN: &str = "gcloud";

/// Deployed function name.
pub const FUNCTION_NAME: &str = "meli";

/// Cloud Functions runtime identifier.
pub const RUNTIME: &str = "nodejs22";

/// Deployment region.
pub const REGION: &str = "us-central1";

/// Function timeout, passed to the service (not a local process timeout).
pub const TIMEOUT: &str = "540s";

/// Function memory limit.
pub const MEMORY: &str = "512MB";

/// GCP project hosting the function, used to build its URL.
pub const URL_PROJECT: &str = "intranet-guatever";

/// Temp artifact file name prefix.
pub const ARTIFACT_PREFIX: &str = "meli-env-";

/// Temp artifact file name suffix.
pub const ARTIFACT_SUFFIX: &str = ".yaml";

/// HTTP endpoints exposed by the deployed function.
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/api/orders/export-sales", "export sales to Google Sheets"),
    ("POST", "/api/orders/export-visits", "export visits to Google Sheets"),
    ("POST", "/api/notifications", "receive MercadoLibre notifications"),
    ("POST", "/api/orders/process-pending", "process pending orders"),
    ("POST", "/api/products/update-costs", "update product costs"),
];

/// Public URL of a function deployed with an HTTP trigger.
pub fn function_url(region: &str, project: &str, name: &str) -> String {
    format!("https://{}-{}.cloudfunctions.net/{}", region, project, name)
}
