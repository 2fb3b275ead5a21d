//! Server configuration.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use logdash_core::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::ServerError;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Deployment environment. Controls whether error detail reaches clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Error responses carry the underlying error text.
    Development,
    /// Error responses carry only a generic message.
    #[default]
    Production,
}

impl Environment {
    /// Returns true for [`Environment::Development`].
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ServerError::Config(format!(
                "unknown environment {other:?}, expected development or production"
            ))),
        }
    }
}

/// Configuration for the log API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Deployment environment.
    pub environment: Environment,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
    /// HS256 secret for bearer tokens. `None` disables authentication.
    pub auth_secret: Option<String>,
    /// Page size when the request has no `limit`.
    pub default_page_size: u32,
    /// Upper bound for a requested `limit`.
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            environment: Environment::default(),
            cors_origins: Vec::new(),
            auth_secret: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the deployment environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    /// Require bearer tokens signed with `secret`.
    #[must_use]
    pub fn with_auth_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth_secret = Some(secret.into());
        self
    }

    /// Set the default and maximum page sizes.
    #[must_use]
    pub const fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    /// Page size policy for the filter builder.
    #[must_use]
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size.clamp(1, self.max_page_size.max(1)),
            max_page_size: self.max_page_size.max(1),
        }
    }

    /// Checks the configuration for values the server cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] for a zero page size or an empty secret.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ServerError::Config("page sizes must be at least 1".to_string()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ServerError::Config(format!(
                "default page size {} exceeds maximum {}",
                self.default_page_size, self.max_page_size
            )));
        }
        if self.auth_secret.as_deref().is_some_and(str::is_empty) {
            return Err(ServerError::Config("auth secret must not be empty".to_string()));
        }
        Ok(())
    }
}
