use std::collections::HashSet;

/// Role name granting deletion rights over every post.
pub const ADMIN_ROLE: &str = "admin";

/// The user on whose behalf a request runs.
///
/// Built by the transport layer and passed explicitly into each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    /// Raw bearer token, forwarded to the identity subsystem.
    pub credentials: Option<String>,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, credentials: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            credentials,
        }
    }
}

/// Set of role names, normalised to lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roles(HashSet<String>);

impl Roles {
    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(&role.to_lowercase())
    }

    pub fn is_admin(&self) -> bool {
        self.contains(ADMIN_ROLE)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Roles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|r| r.as_ref().to_lowercase()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_matching_ignores_case() {
        for role in ["admin", "Admin", "ADMIN", "aDmIn"] {
            let roles: Roles = ["user", role].into_iter().collect();
            assert!(roles.is_admin(), "{role} should be admin");
        }
    }

    #[test]
    fn test_admin_is_not_substring_match() {
        let roles: Roles = ["administrator", "user", "sysadmin"].into_iter().collect();
        assert!(!roles.is_admin());
        assert_eq!(roles.len(), 3);
    }
}
