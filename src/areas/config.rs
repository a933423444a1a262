//! Repository configuration
//!
//! Values can come from the environment (`BIT_DEFAULT_BRANCH`,
//! `BIT_LOG_LIMIT`, `BIT_MIN_PREFIX`) and are then overridden by command-line
//! flags.

use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use derive_new::new;

pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_LOG_LIMIT: usize = 10;
/// Shortest abbreviated id accepted by prefix lookups
pub const MIN_PREFIX_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RepositoryConfig {
    default_branch: BranchName,
    log_limit: usize,
    min_prefix_len: usize,
}

impl RepositoryConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the built-in defaults; set but invalid
    /// ones are reported as errors.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(branch) = std::env::var("BIT_DEFAULT_BRANCH") {
            config.default_branch =
                BranchName::try_parse(branch).context("BIT_DEFAULT_BRANCH is not a valid branch name")?;
        }
        if let Ok(limit) = std::env::var("BIT_LOG_LIMIT") {
            config.log_limit = limit
                .parse()
                .with_context(|| format!("BIT_LOG_LIMIT is not a number: {limit}"))?;
        }
        if let Ok(min_prefix) = std::env::var("BIT_MIN_PREFIX") {
            config.min_prefix_len = Self::parse_min_prefix(&min_prefix)?;
        }

        Ok(config)
    }

    /// A prefix length of 0 would let the empty string match every commit
    fn parse_min_prefix(min_prefix: &str) -> anyhow::Result<usize> {
        let min_prefix_len = min_prefix
            .parse::<usize>()
            .with_context(|| format!("BIT_MIN_PREFIX is not a number: {min_prefix}"))?;
        if min_prefix_len == 0 {
            anyhow::bail!("BIT_MIN_PREFIX must be at least 1, got {min_prefix}");
        }

        Ok(min_prefix_len)
    }

    pub fn default_branch(&self) -> &BranchName {
        &self.default_branch
    }

    pub fn log_limit(&self) -> usize {
        self.log_limit
    }

    pub fn min_prefix_len(&self) -> usize {
        self.min_prefix_len
    }

    pub fn with_default_branch(mut self, default_branch: BranchName) -> Self {
        self.default_branch = default_branch;
        self
    }

    pub fn with_log_limit(mut self, log_limit: usize) -> Self {
        self.log_limit = log_limit;
        self
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            default_branch: BranchName::try_parse(DEFAULT_BRANCH.to_string())
                .unwrap_or_else(|_| unreachable!("default branch name is valid")),
            log_limit: DEFAULT_LOG_LIMIT,
            min_prefix_len: MIN_PREFIX_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("4", 4)]
    #[case("12", 12)]
    fn accepts_positive_prefix_lengths(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(RepositoryConfig::parse_min_prefix(input).unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("four")]
    #[case("")]
    fn rejects_unusable_prefix_lengths(#[case] input: &str) {
        let error = RepositoryConfig::parse_min_prefix(input).unwrap_err();

        assert!(error.to_string().contains("BIT_MIN_PREFIX"));
    }
}
