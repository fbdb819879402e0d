//! Test fixtures and constants.

/// The three required keys with valid values.
pub const SCENARIO_ENV: &str = "GOOGLE_CREDENTIALS={\"a\":1}\nURI_BD_GUATEVER=mongodb://x\nMELI_CLIENT_ID=abc123\n";

/// Artifact expected for [`SCENARIO_ENV`].
pub const SCENARIO_ARTIFACT: &str =
    "GOOGLE_CREDENTIALS: '{\"a\":1}'\nURI_BD_GUATEVER: 'mongodb://x'\nMELI_CLIENT_ID: 'abc123'\n";

/// Scenario env without the client id.
pub const MISSING_CLIENT_ID_ENV: &str = "GOOGLE_CREDENTIALS={\"a\":1}\nURI_BD_GUATEVER=mongodb://x\n";

/// Scenario env with malformed credentials.
pub const INVALID_JSON_ENV: &str =
    "GOOGLE_CREDENTIALS={\"a\":\nURI_BD_GUATEVER=mongodb://x\nMELI_CLIENT_ID=abc123\n";

/// .env with edge cases.
pub const COMPLEX_ENV: &str = r#"
# Service account
GOOGLE_CREDENTIALS={"type":"service_account","private_key":"-----BEGIN KEY-----\nabc\n-----END KEY-----\n"}

URI_BD_GUATEVER=mongodb+srv://user:p@ss@cluster/db?retryWrites=true&w=majority
MELI_CLIENT_ID=abc123
THIS LINE IS IGNORED
GREETING=it's here
"#;

/// Describe output with all required keys configured.
pub const DESCRIBE_HEALTHY: &str = r#"{
  "name": "projects/intranet-guatever/locations/us-central1/functions/meli",
  "state": "ACTIVE",
  "serviceConfig": {
    "availableMemory": "512M",
    "environmentVariables": {
      "GOOGLE_CREDENTIALS": "{\"a\":1}",
      "URI_BD_GUATEVER": "mongodb://x",
      "MELI_CLIENT_ID": "abc123"
    }
  }
}"#;

/// Describe output missing the client id and with broken credentials.
pub const DESCRIBE_UNHEALTHY: &str = r#"{
  "serviceConfig": {
    "environmentVariables": {
      "GOOGLE_CREDENTIALS": "{broken",
      "URI_BD_GUATEVER": "mongodb://x"
    }
  }
}"#;
