//! GitHub access token lookup.
//!
//! The token is read from the environment, or prompted for with hidden input
//! when the variable is unset. It is resolved on first use and kept for the
//! rest of the process.

use crate::error::{FactoryError, Result};
use std::cell::OnceCell;
use std::fmt;

/// Default environment variable holding the token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const PROMPT: &str = "GitHub personal access token: ";

type ReadToken = Box<dyn Fn() -> Result<String>>;

/// Lazily resolved, memoized access token.
pub struct TokenProvider {
    read: ReadToken,
    token: OnceCell<String>,
}

impl TokenProvider {
    /// Read the token from `var`, prompting on the terminal if it is unset or empty.
    pub fn from_env(var: impl Into<String>) -> Self {
        let var = var.into();
        Self::from_fn(move || {
            read_token(
                &var,
                |name| std::env::var(name).ok(),
                || rpassword::prompt_password(PROMPT),
            )
        })
    }

    /// Use a fixed token.
    #[cfg(test)]
    pub fn fixed(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::from_fn(move || Ok(token.clone()))
    }

    pub(crate) fn from_fn(read: impl Fn() -> Result<String> + 'static) -> Self {
        Self {
            read: Box::new(read),
            token: OnceCell::new(),
        }
    }

    /// The token, resolving it on first call.
    pub fn get(&self) -> Result<&str> {
        if let Some(token) = self.token.get() {
            return Ok(token);
        }
        let token = (self.read)()?;
        Ok(self.token.get_or_init(|| token))
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("resolved", &self.token.get().is_some())
            .finish()
    }
}

fn read_token(
    var: &str,
    lookup: impl Fn(&str) -> Option<String>,
    prompt: impl FnOnce() -> std::io::Result<String>,
) -> Result<String> {
    if let Some(token) = lookup(var).filter(|token| !token.is_empty()) {
        eprintln!("Using environment variable {}", var);
        return Ok(token);
    }

    let token = prompt()
        .map_err(|e| FactoryError::UserError(format!("error reading GitHub token: {}", e)))?;
    let token = token.trim();
    if token.is_empty() {
        return Err(FactoryError::UserError(format!(
            "no GitHub token provided. Set {} or enter a token when prompted.",
            var
        )));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn env_token_wins_over_prompt() {
        let token = read_token(
            "GITHUB_TOKEN",
            |_| Some("ghp_test123ToKeN".to_string()),
            || panic!("should not prompt"),
        )
        .unwrap();
        assert_eq!(token, "ghp_test123ToKeN");
    }

    #[test]
    fn empty_env_falls_back_to_prompt() {
        let token = read_token(
            "GITHUB_TOKEN",
            |_| Some(String::new()),
            || Ok("ghp_prompted\n".to_string()),
        )
        .unwrap();
        assert_eq!(token, "ghp_prompted");
    }

    #[test]
    fn empty_prompt_is_user_error() {
        let err = read_token("MY_TOKEN", |_| None, || Ok("  ".to_string())).unwrap_err();
        assert!(matches!(err, FactoryError::UserError(_)));
        assert!(err.to_string().contains("MY_TOKEN"));
    }

    #[test]
    fn token_is_read_once() {
        let reads = Rc::new(Cell::new(0));
        let counter = Rc::clone(&reads);
        let provider = TokenProvider::from_fn(move || {
            counter.set(counter.get() + 1);
            Ok("ghp_once".to_string())
        });

        assert_eq!(provider.get().unwrap(), "ghp_once");
        assert_eq!(provider.get().unwrap(), "ghp_once");
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn failed_read_is_retried_on_next_use() {
        let reads = Rc::new(Cell::new(0));
        let counter = Rc::clone(&reads);
        let provider = TokenProvider::from_fn(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                Err(FactoryError::UserError("no token".to_string()))
            } else {
                Ok("ghp_second".to_string())
            }
        });

        assert!(provider.get().is_err());
        assert_eq!(provider.get().unwrap(), "ghp_second");
    }

    #[test]
    fn debug_does_not_leak_token() {
        let provider = TokenProvider::fixed("ghp_secret");
        provider.get().unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("resolved: true"));
    }
}
