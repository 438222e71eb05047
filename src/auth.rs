//! Role based capability checks.
//!
//! Credentials and sessions live upstream; by the time a request gets here
//! the caller is already known as an [`Actor`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Superadmin,
}

impl Role {
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

/// What the action targets. Reviews carry their author so ownership can be
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Restaurant,
    Review { owner_id: &'a str },
}

pub fn has_capability(actor: &Actor, action: Action, resource: Resource<'_>) -> bool {
    match (resource, action) {
        (Resource::Restaurant, _) => actor.role.is_elevated(),
        (Resource::Review { .. }, Action::Create) => true,
        (Resource::Review { owner_id }, Action::Update | Action::Delete) => {
            owner_id == actor.user_id || actor.role.is_elevated()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str, role: Role) -> Actor {
        Actor {
            user_id: id.into(),
            role,
        }
    }

    #[test]
    fn only_elevated_roles_manage_restaurants() {
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(!has_capability(&actor("u", Role::User), action, Resource::Restaurant));
            assert!(has_capability(&actor("a", Role::Admin), action, Resource::Restaurant));
            assert!(has_capability(&actor("s", Role::Superadmin), action, Resource::Restaurant));
        }
    }

    #[test]
    fn anyone_can_write_a_review() {
        let review = Resource::Review { owner_id: "someone" };
        assert!(has_capability(&actor("u", Role::User), Action::Create, review));
    }

    #[test]
    fn review_changes_need_ownership_or_elevation() {
        let review = Resource::Review { owner_id: "owner" };
        for action in [Action::Update, Action::Delete] {
            assert!(has_capability(&actor("owner", Role::User), action, review));
            assert!(!has_capability(&actor("other", Role::User), action, review));
            assert!(has_capability(&actor("other", Role::Admin), action, review));
        }
    }

    #[test]
    fn parses_roles() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("superadmin".parse::<Role>(), Ok(Role::Superadmin));
        assert!("root".parse::<Role>().is_err());
    }
}
