//! Well-known role name constants.
//!
//! Roles arrive in the JWT `role` claim; the user store that issues them is
//! owned by another service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_AUTHOR: &str = "author";

/// Roles allowed to modify any content item regardless of authorship.
pub const CONTENT_MANAGER_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether `role` may modify content it did not author.
pub fn is_content_manager(role: &str) -> bool {
    CONTENT_MANAGER_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_editor_manage_content() {
        assert!(is_content_manager("admin"));
        assert!(is_content_manager("editor"));
    }

    #[test]
    fn author_is_not_a_manager() {
        assert!(!is_content_manager(ROLE_AUTHOR));
        assert!(!is_content_manager("Admin"));
    }
}
