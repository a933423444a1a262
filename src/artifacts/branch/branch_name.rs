use crate::artifacts::branch::{HEAD_REF_NAME, INVALID_BRANCH_NAME_REGEX, REF_ALIASES};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Validated name of a branch, tag or remote-tracking ref
///
/// Follows git's ref-name rules: no leading dot or slash, no `..`, no
/// trailing `.lock`, no control characters, spaces or `~^:?*[\`. The names
/// `HEAD` and `@` are reserved for the current checkout position.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("branch name cannot be empty");
        }

        if name == HEAD_REF_NAME || REF_ALIASES.contains_key(name.as_str()) {
            anyhow::bail!("'{}' is a reserved name", name);
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid branch name: {}", name);
        } else {
            Ok(Self(name))
        }
    }

    pub fn is_default_branch(&self) -> bool {
        self.0 == "master" || self.0 == "main"
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BranchName {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("master")]
    #[case("feature/login")]
    #[case("fix-123")]
    #[case("v1.0")]
    fn accepts_valid_names(#[case] name: &str) {
        assert!(BranchName::try_parse(name.to_string()).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("a..b")]
    #[case("/lead")]
    #[case("trail/")]
    #[case("branch.lock")]
    #[case("has space")]
    #[case("tilde~1")]
    #[case("caret^")]
    #[case("colon:name")]
    #[case("HEAD")]
    #[case("@")]
    fn rejects_invalid_names(#[case] name: &str) {
        assert!(BranchName::try_parse(name.to_string()).is_err());
    }
}
