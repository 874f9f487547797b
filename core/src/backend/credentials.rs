use crate::config::TOKEN_ENV;

/// Source of the bearer credential attached to backend requests. Never refreshed here.
pub trait CredentialSource {
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(TOKEN_ENV)
    }
}

impl CredentialSource for EnvToken {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_static_token_is_no_token() {
        assert_eq!(StaticToken(String::new()).bearer_token(), None);
        assert_eq!(
            StaticToken("t0k".to_string()).bearer_token().as_deref(),
            Some("t0k")
        );
    }

    #[test]
    fn unset_env_var_is_no_token() {
        let src = EnvToken::new("CONTENT_CORE_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(src.bearer_token(), None);
    }
}
