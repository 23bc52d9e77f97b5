//! Roles and the capability table.
//!
//! Access control is a static `(Role, Action) -> bool` lookup. Role names
//! on the wire are `Admin`, `Editor` and `Viewer`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == name)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{name}'. Must be one of: Admin, Editor, Viewer"
                ))
            })
    }

    /// Whether this role may perform `action`.
    pub fn can(self, action: Action) -> bool {
        is_allowed(self, action)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateUsers,
    UpdateUsers,
    DeleteUsers,
    ViewUsers,
    CreateTopics,
    UpdateTopics,
    DeleteTopics,
    ViewTopics,
    ViewTopicVersions,
    CreateResources,
    UpdateResources,
    DeleteResources,
    ViewResources,
    AccessShortestPath,
    AccessTopicTree,
}

impl Action {
    pub const ALL: [Action; 15] = [
        Action::CreateUsers,
        Action::UpdateUsers,
        Action::DeleteUsers,
        Action::ViewUsers,
        Action::CreateTopics,
        Action::UpdateTopics,
        Action::DeleteTopics,
        Action::ViewTopics,
        Action::ViewTopicVersions,
        Action::CreateResources,
        Action::UpdateResources,
        Action::DeleteResources,
        Action::ViewResources,
        Action::AccessShortestPath,
        Action::AccessTopicTree,
    ];

    /// Upper snake case name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::CreateUsers => "CREATE_USERS",
            Action::UpdateUsers => "UPDATE_USERS",
            Action::DeleteUsers => "DELETE_USERS",
            Action::ViewUsers => "VIEW_USERS",
            Action::CreateTopics => "CREATE_TOPICS",
            Action::UpdateTopics => "UPDATE_TOPICS",
            Action::DeleteTopics => "DELETE_TOPICS",
            Action::ViewTopics => "VIEW_TOPICS",
            Action::ViewTopicVersions => "VIEW_TOPIC_VERSIONS",
            Action::CreateResources => "CREATE_RESOURCES",
            Action::UpdateResources => "UPDATE_RESOURCES",
            Action::DeleteResources => "DELETE_RESOURCES",
            Action::ViewResources => "VIEW_RESOURCES",
            Action::AccessShortestPath => "ACCESS_SHORTEST_PATH",
            Action::AccessTopicTree => "ACCESS_TOPIC_TREE",
        }
    }

    fn is_user_management(self) -> bool {
        matches!(
            self,
            Action::CreateUsers | Action::UpdateUsers | Action::DeleteUsers | Action::ViewUsers
        )
    }
}

/// The capability table.
///
/// - `Admin`: everything.
/// - `Editor`: everything except user management.
/// - `Viewer`: read-only topics, versions and resources, plus tree and
///   shortest-path queries.
pub fn is_allowed(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::Editor => !action.is_user_management(),
        Role::Viewer => matches!(
            action,
            Action::ViewTopics
                | Action::ViewTopicVersions
                | Action::ViewResources
                | Action::AccessShortestPath
                | Action::AccessTopicTree
        ),
    }
}

// ---------------------------------------------------------------------------
// Capability summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrudPermissions {
    pub create: bool,
    pub view: bool,
    pub update: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicPermissions {
    #[serde(flatten)]
    pub crud: CrudPermissions,
    pub view_versions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvancedPermissions {
    pub shortest_path: bool,
    pub topic_tree: bool,
}

/// Grouped view of everything a role can do, returned by the permission
/// check endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionSummary {
    pub users: CrudPermissions,
    pub topics: TopicPermissions,
    pub resources: CrudPermissions,
    pub advanced: AdvancedPermissions,
}

impl PermissionSummary {
    pub fn for_role(role: Role) -> Self {
        let crud = |create, view, update, delete| CrudPermissions {
            create: role.can(create),
            view: role.can(view),
            update: role.can(update),
            delete: role.can(delete),
        };
        Self {
            users: crud(
                Action::CreateUsers,
                Action::ViewUsers,
                Action::UpdateUsers,
                Action::DeleteUsers,
            ),
            topics: TopicPermissions {
                crud: crud(
                    Action::CreateTopics,
                    Action::ViewTopics,
                    Action::UpdateTopics,
                    Action::DeleteTopics,
                ),
                view_versions: role.can(Action::ViewTopicVersions),
            },
            resources: crud(
                Action::CreateResources,
                Action::ViewResources,
                Action::UpdateResources,
                Action::DeleteResources,
            ),
            advanced: AdvancedPermissions {
                shortest_path: role.can(Action::AccessShortestPath),
                topic_tree: role.can(Action::AccessTopicTree),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_do_everything() {
        assert!(Action::ALL.iter().all(|a| Role::Admin.can(*a)));
    }

    #[test]
    fn editor_cannot_manage_users() {
        for action in Action::ALL {
            assert_eq!(
                Role::Editor.can(action),
                !action.as_str().ends_with("_USERS"),
                "{}",
                action.as_str()
            );
        }
    }

    #[test]
    fn viewer_allowed_set_is_exact() {
        let allowed: Vec<&str> = Action::ALL
            .into_iter()
            .filter(|a| Role::Viewer.can(*a))
            .map(Action::as_str)
            .collect();
        assert_eq!(
            allowed,
            vec![
                "VIEW_TOPICS",
                "VIEW_TOPIC_VERSIONS",
                "VIEW_RESOURCES",
                "ACCESS_SHORTEST_PATH",
                "ACCESS_TOPIC_TREE",
            ]
        );
    }

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_name("admin").is_err());
    }

    #[test]
    fn role_serializes_as_pascal_case() {
        assert_eq!(serde_json::to_value(Role::Editor).unwrap(), "Editor");
    }

    #[test]
    fn viewer_summary() {
        let summary = PermissionSummary::for_role(Role::Viewer);
        assert!(!summary.users.view);
        assert!(summary.topics.crud.view);
        assert!(!summary.topics.crud.create);
        assert!(summary.topics.view_versions);
        assert!(summary.advanced.shortest_path);
    }

    #[test]
    fn summary_serializes_grouped_flags() {
        let json = serde_json::to_value(PermissionSummary::for_role(Role::Editor)).unwrap();
        assert_eq!(json["users"]["create"], false);
        assert_eq!(json["topics"]["create"], true);
        assert_eq!(json["topics"]["view_versions"], true);
        assert_eq!(json["advanced"]["topic_tree"], true);
    }
}
