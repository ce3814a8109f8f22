use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TjmSettings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    pub cookies: CookieSettings,
    pub logging: LoggingSettings,
    pub linkedin: LinkedInSettings,
    pub view: ViewSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
    /// Page the browser lands on after the callback, with `auth=...` appended
    pub frontend_root: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub session_secret: String,
    /// How long a LinkedIn classification stays valid in the session cookie
    pub session_duration_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieSettings {
    pub secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInSettings {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub profile_endpoint: String,
    /// Space separated scopes, must match the LinkedIn app registration
    pub scope: String,
    /// Callback URL, must match the LinkedIn app registration exactly
    pub redirect_uri: String,

    // Direct values (can be overridden by environment variables)
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    // Environment variable names for overrides
    pub client_id_env: Option<String>,
    pub client_secret_env: Option<String>,

    pub request_timeout_seconds: u64,
}

/// Filters the explorer view can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    Role,
    Experience,
    Industry,
    Location,
    #[serde(alias = "company_size")]
    CompanySize,
}

/// One parameterised explorer view instead of a component per feature set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct ViewSettings {
    pub show_pagination: bool,
    pub show_auth_gate: bool,
    pub page_size: usize,
    pub filters: Vec<FilterKind>,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
            frontend_root: "/".to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_secret: String::new(), // Generated at load time if empty
            session_duration_hours: 24,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self { secure: true }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for LinkedInSettings {
    fn default() -> Self {
        Self {
            authorization_endpoint: "https://www.linkedin.com/oauth/v2/authorization".to_string(),
            token_endpoint: "https://www.linkedin.com/oauth/v2/accessToken".to_string(),
            profile_endpoint: "https://api.linkedin.com/v2/me".to_string(),
            scope: "r_liteprofile r_basicprofile".to_string(),
            redirect_uri: "http://localhost:8080/auth/linkedin/callback".to_string(),
            client_id: None,
            client_secret: None,
            client_id_env: Some("LINKEDIN_CLIENT_ID".to_string()),
            client_secret_env: Some("LINKEDIN_CLIENT_SECRET".to_string()),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_pagination: true,
            show_auth_gate: true,
            page_size: 10,
            filters: vec![
                FilterKind::Role,
                FilterKind::Experience,
                FilterKind::Industry,
                FilterKind::Location,
                FilterKind::CompanySize,
            ],
        }
    }
}

impl TjmSettings {
    /// Load settings from configuration files and environment variables,
    /// then initialize the logger with the resulting level
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - Logger initialization fails
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_env_file();

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(settings.logging.level.as_str()),
        )
        .try_init()?;

        Ok(settings)
    }

    /// Load base settings from TOML file(s) or use defaults
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (applied separately afterwards)
    /// 2. Settings.toml in `TJM_SECRETS_DIR`
    /// 3. Settings.toml in the current directory
    /// 4. Defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or parsed
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        if let Some(root_settings) = Self::read_settings_file(Path::new("Settings.toml"))? {
            println!("✓ Loaded base settings from Settings.toml");
            settings = root_settings;
        }

        if let Ok(secrets_dir) = std::env::var("TJM_SECRETS_DIR") {
            let secrets_path = Path::new(&secrets_dir).join("Settings.toml");
            if let Some(secrets_settings) = Self::read_settings_file(&secrets_path)? {
                println!("✓ Overriding settings from {}", secrets_path.display());
                settings = secrets_settings;
            } else {
                println!(
                    "ℹ TJM_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a settings file, `Ok(None)` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn read_settings_file(path: &Path) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(None);
        }
        let toml_content = fs::read_to_string(path)?;
        Ok(Some(basic_toml::from_str(&toml_content)?))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_session_env_overrides(&mut settings.session);
        Self::apply_cookie_env_overrides(&mut settings.cookies);
        Self::apply_logging_env_overrides(&mut settings.logging);
        Self::apply_linkedin_env_overrides(&mut settings.linkedin);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
        if let Ok(frontend_root) = std::env::var("FRONTEND_ROOT") {
            app_settings.frontend_root = frontend_root;
        }
    }

    /// Apply environment overrides for session settings
    pub fn apply_session_env_overrides(session_settings: &mut SessionSettings) {
        if let Ok(value_str) = std::env::var("SESSION_DURATION_HOURS") {
            if let Ok(value) = value_str.parse::<u64>() {
                session_settings.session_duration_hours = value;
            }
        }

        let env_secret_set = std::env::var("SESSION_SECRET").is_ok_and(|secret| {
            if secret.is_empty() {
                false
            } else {
                session_settings.session_secret = secret;
                true
            }
        });

        if !env_secret_set && session_settings.session_secret.is_empty() {
            session_settings.session_secret = Self::generate_random_session_secret();
            Self::warn_about_generated_secret();
        }
    }

    /// 32 random bytes, base64 encoded
    fn generate_random_session_secret() -> String {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        general_purpose::STANDARD.encode(secret)
    }

    fn warn_about_generated_secret() {
        eprintln!("⚠️  WARNING: Using auto-generated session secret");
        eprintln!("🔒 For production use, set the SESSION_SECRET environment variable");
        eprintln!("   or configure session_secret in Settings.toml");
        eprintln!("💡 Sessions are invalidated on each restart unless explicitly configured");
    }

    fn apply_cookie_env_overrides(cookie_settings: &mut CookieSettings) {
        if let Ok(cookie_secure_str) = std::env::var("COOKIE_SECURE") {
            if let Ok(cookie_secure) = cookie_secure_str.parse::<bool>() {
                cookie_settings.secure = cookie_secure;
            }
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    fn apply_linkedin_env_overrides(linkedin_settings: &mut LinkedInSettings) {
        if let Ok(redirect_uri) = std::env::var("LINKEDIN_REDIRECT_URI") {
            linkedin_settings.redirect_uri = redirect_uri;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if line.trim_start().starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl LinkedInSettings {
    /// Get the client ID, checking environment variable first, then falling back to direct value
    #[must_use]
    pub fn get_client_id(&self) -> Option<String> {
        Self::resolve(self.client_id_env.as_deref(), self.client_id.as_ref())
    }

    /// Get the client secret, checking environment variable first, then falling back to direct value
    #[must_use]
    pub fn get_client_secret(&self) -> Option<String> {
        Self::resolve(self.client_secret_env.as_deref(), self.client_secret.as_ref())
    }

    /// Both credentials are available
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.get_client_id().is_some() && self.get_client_secret().is_some()
    }

    fn resolve(env_var: Option<&str>, direct: Option<&String>) -> Option<String> {
        if let Some(env_var) = env_var {
            if let Ok(value) = std::env::var(env_var) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
        direct.filter(|value| !value.is_empty()).cloned()
    }
}
