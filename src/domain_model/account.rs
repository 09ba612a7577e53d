use super::roster;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(UserId)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Representative,
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Administrator => "administrator",
            Role::Representative => "representative",
            Role::Viewer => "viewer",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Role {
    type Err = super::status::UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Role::Administrator),
            "representative" => Ok(Role::Representative),
            "viewer" => Ok(Role::Viewer),
            other => Err(super::status::UnknownLabel(other.to_string())),
        }
    }
}

/// Visibility scope, passed explicitly into every repository query and
/// aggregation entry point. Representative accounts are pinned to a single
/// portfolio; everyone else sees the whole book.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Scope {
    All,
    Representative(String),
}

impl Scope {
    pub fn allows(&self, representative: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Representative(own) => own == representative,
        }
    }

    /// The representatives a caller may see in per-representative reports:
    /// the single scoped name, or the full fixed roster.
    pub fn visible_roster(&self) -> Vec<String> {
        match self {
            Scope::All => roster::representatives()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Scope::Representative(own) => vec![own.clone()],
        }
    }
}

/// The authenticated caller, resolved from a verified token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub scope: Scope,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Whether this caller may create or amend a debt owned by
    /// `representative`. Viewers never write.
    pub fn may_write(&self, representative: &str) -> bool {
        match self.role {
            Role::Administrator => true,
            Role::Representative => self.scope.allows(representative),
            Role::Viewer => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub rep_scope: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl AccountRecord {
    pub fn scope(&self) -> Scope {
        match (&self.role, &self.rep_scope) {
            (Role::Representative, Some(rep)) => Scope::Representative(rep.clone()),
            // A representative row with no stored scope pins to the empty
            // name, which matches no portfolio, rather than widening to All.
            (Role::Representative, None) => Scope::Representative(String::new()),
            _ => Scope::All,
        }
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            user_id: self.user_id,
            username: self.username.clone(),
            role: self.role,
            scope: self.scope(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_accounts_see_only_their_portfolio() {
        let scope = Scope::Representative("YAYA CAMARA".to_string());
        assert!(scope.allows("YAYA CAMARA"));
        assert!(!scope.allows("ISSA DIAKITE"));
        assert_eq!(scope.visible_roster(), vec!["YAYA CAMARA".to_string()]);
    }

    #[test]
    fn unscoped_roster_is_the_full_fixed_roster() {
        let names = Scope::All.visible_roster();
        assert_eq!(names.len(), roster::representatives().len());
        assert!(names.iter().any(|n| n == "DIDIER DEMBELE"));
    }

    #[test]
    fn representative_without_stored_scope_sees_no_portfolio() {
        let record = AccountRecord {
            user_id: UserId(uuid::Uuid::nil()),
            username: "dembele".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Representative,
            rep_scope: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            last_login: None,
        };
        let scope = record.scope();
        assert_ne!(scope, Scope::All);
        assert!(!scope.allows("YAYA CAMARA"));
        assert!(!record.current_user().may_write("YAYA CAMARA"));
    }

    #[test]
    fn viewers_never_write() {
        let viewer = CurrentUser {
            user_id: UserId(uuid::Uuid::nil()),
            username: "lecteur".to_string(),
            role: Role::Viewer,
            scope: Scope::All,
        };
        assert!(!viewer.may_write("YAYA CAMARA"));
        assert!(!viewer.is_admin());
    }
}
