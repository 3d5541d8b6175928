use anyhow::{Result, bail};

const DEFAULT_PROVIDER: &str = "Microsoft.JET.OLEDB.4.0";

/// Explicit connection configuration handed to a driver's [`Executor`]
/// implementation. There is no ambient global equivalent; each store gets
/// its own value.
///
/// [`Executor`]: crate::Executor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectConfig {
    database_path: String,
    provider: String,
}

impl ConnectConfig {
    /// Create a configuration pointing at a database file. The path must be
    /// the full path to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is blank.
    pub fn new(database_path: impl Into<String>) -> Result<Self> {
        let database_path = database_path.into();
        if database_path.trim().is_empty() {
            bail!("database path cannot be blank");
        }
        Ok(Self { database_path, provider: DEFAULT_PROVIDER.to_string() })
    }

    /// Override the OLE DB provider string.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// The configured database file path.
    #[must_use]
    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    /// The configured provider string.
    #[must_use]
    pub fn provider(&self) -> &str {
        if self.provider.trim().is_empty() { DEFAULT_PROVIDER } else { &self.provider }
    }

    /// The provider connection string for this configuration.
    #[must_use]
    pub fn connection_string(&self) -> String {
        format!("Provider={};data source={};", self.provider(), self.database_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_provider() {
        let config = ConnectConfig::new("/data/app.mdb").unwrap();
        assert_eq!(config.provider(), "Microsoft.JET.OLEDB.4.0");
        assert_eq!(
            config.connection_string(),
            "Provider=Microsoft.JET.OLEDB.4.0;data source=/data/app.mdb;"
        );
    }

    #[test]
    fn provider_override() {
        let config = ConnectConfig::new("/data/app.accdb")
            .unwrap()
            .with_provider("Microsoft.ACE.OLEDB.12.0");
        assert_eq!(config.provider(), "Microsoft.ACE.OLEDB.12.0");
    }

    #[test]
    fn blank_provider_falls_back() {
        let config = ConnectConfig::new("/data/app.mdb").unwrap().with_provider("  ");
        assert_eq!(config.provider(), "Microsoft.JET.OLEDB.4.0");
    }

    #[test]
    fn blank_path_rejected() {
        assert!(ConnectConfig::new("  ").is_err());
    }
}
