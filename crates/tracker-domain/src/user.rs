//! Users, Roles and Page Access

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    /// Anything the backend sends that is not `admin`
    #[default]
    #[serde(other)]
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Employee => "employee",
        }
    }
}

/// Modules a user can be granted in `systemAccess`
pub const MODULES: [&str; 3] = ["documents", "subscriptions", "loans"];

/// Screens reachable from the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Dashboard,
    Documents,
    Subscriptions,
    Renewals,
    Loans,
    Master,
    History,
    Settings,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::Documents,
        Page::Subscriptions,
        Page::Renewals,
        Page::Loans,
        Page::Master,
        Page::History,
        Page::Settings,
    ];

    /// Key used in `pageAccess`
    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Documents => "documents",
            Page::Subscriptions => "subscriptions",
            Page::Renewals => "renewals",
            Page::Loans => "loans",
            Page::Master => "master",
            Page::History => "history",
            Page::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Documents => "Documents",
            Page::Subscriptions => "Subscriptions",
            Page::Renewals => "Renewals",
            Page::Loans => "Loans",
            Page::Master => "Master Data",
            Page::History => "History",
            Page::Settings => "Settings",
        }
    }

    /// Module in `systemAccess` the page belongs to
    pub fn module(&self) -> Option<&'static str> {
        match self {
            Page::Documents | Page::Master | Page::History => Some("documents"),
            Page::Subscriptions | Page::Renewals => Some("subscriptions"),
            Page::Loans => Some("loans"),
            Page::Dashboard | Page::Settings => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub system_access: Vec<String>,
    #[serde(default)]
    pub page_access: Vec<String>,
}

fn contains_key(list: &[String], key: &str) -> bool {
    list.iter().any(|v| v.trim().eq_ignore_ascii_case(key))
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Admins see everything. Settings is admin-only. The dashboard is always open.
    /// Other pages need both the page and its module enabled.
    pub fn can_access(&self, page: Page) -> bool {
        if self.is_admin() {
            return true;
        }
        match page {
            Page::Settings => false,
            Page::Dashboard => true,
            _ => {
                contains_key(&self.page_access, page.key())
                    && page
                        .module()
                        .map(|m| contains_key(&self.system_access, m))
                        .unwrap_or(true)
            }
        }
    }

    pub fn accessible_pages(&self) -> Vec<Page> {
        Page::ALL.into_iter().filter(|p| self.can_access(*p)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of the create/edit user form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: UserRole,
    pub department: String,
    pub system_access: Vec<String>,
    pub page_access: Vec<String>,
}

impl UserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: None,
            role: user.role,
            department: user.department.clone(),
            system_access: user.system_access.clone(),
            page_access: user.page_access.clone(),
        }
    }

    /// `creating` requires a password
    pub fn validate(&self, creating: bool) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::InvalidInput("username is required".into()));
        }
        let has_password = self.password.as_deref().map(|p| !p.is_empty()).unwrap_or(false);
        if creating && !has_password {
            return Err(DomainError::InvalidInput("password is required".into()));
        }
        Ok(())
    }

    pub fn toggle_page(&mut self, page: Page) {
        toggle(&mut self.page_access, page.key());
    }

    pub fn toggle_module(&mut self, module: &str) {
        toggle(&mut self.system_access, module);
    }
}

fn toggle(list: &mut Vec<String>, key: &str) {
    if contains_key(list, key) {
        list.retain(|v| !v.trim().eq_ignore_ascii_case(key));
    } else {
        list.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(pages: &[&str], modules: &[&str]) -> User {
        User {
            id: 2,
            username: "meera".into(),
            role: UserRole::Employee,
            department: "Accounts".into(),
            system_access: modules.iter().map(|s| s.to_string()).collect(),
            page_access: pages.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let mut admin = employee(&[], &[]);
        admin.role = UserRole::Admin;
        assert_eq!(admin.accessible_pages(), Page::ALL.to_vec());
    }

    #[test]
    fn test_employee_access() {
        let user = employee(&["Documents", "loans", "settings"], &["documents"]);
        assert!(user.can_access(Page::Dashboard));
        assert!(user.can_access(Page::Documents));
        // Page enabled but module is not
        assert!(!user.can_access(Page::Loans));
        // Settings stays admin-only
        assert!(!user.can_access(Page::Settings));
        assert_eq!(user.accessible_pages(), vec![Page::Dashboard, Page::Documents]);
    }

    #[test]
    fn test_unknown_role_is_employee() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"x","role":"manager","systemAccess":["loans"],"pageAccess":["loans"]}"#,
        )
        .unwrap();
        assert_eq!(user.role, UserRole::Employee);
        assert!(user.can_access(Page::Loans));
    }

    #[test]
    fn test_draft_toggle_and_validate() {
        let mut draft = UserDraft { username: "ravi".into(), ..Default::default() };
        assert!(draft.validate(false).is_ok());
        assert!(draft.validate(true).is_err());
        draft.password = Some("s3cret".into());
        assert!(draft.validate(true).is_ok());

        draft.toggle_page(Page::Loans);
        assert_eq!(draft.page_access, vec!["loans"]);
        draft.toggle_page(Page::Loans);
        assert!(draft.page_access.is_empty());
    }
}
