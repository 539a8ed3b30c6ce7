use std::fmt;
use std::str::FromStr;

/// Per-device credential issued by `/register`, sent as the `appkey` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey {
    key: String,
}

impl AccessKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Creates a new instance of `AccessKey` from the `TTDATA_APPKEY` environment variable.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let key = std::env::var("TTDATA_APPKEY")?;
        Ok(Self::new(key))
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl FromStr for AccessKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err("Access key cannot be empty".to_string())
        } else {
            Ok(Self::new(s))
        }
    }
}

impl From<AccessKey> for String {
    fn from(val: AccessKey) -> Self {
        val.key
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

// Keep keys out of debug output.
impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKey").field("key", &"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!("".parse::<AccessKey>().is_err());
        assert!("   ".parse::<AccessKey>().is_err());
    }

    #[test]
    fn debug_output_hides_key() {
        let key: AccessKey = "secret-key".parse().unwrap();
        assert_eq!(key.as_str(), "secret-key");
        assert!(!format!("{key:?}").contains("secret-key"));
    }
}
