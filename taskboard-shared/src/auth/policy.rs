/// Role-based authorization policy
///
/// Pure decision functions mapping `(role, actor id)` to visibility scopes
/// and allowed write actions. Nothing in this module touches the database
/// or any other side effect; handlers evaluate the policy first, then query
/// the store with the resulting scope.
///
/// # Access-control matrix
///
/// | Role     | Projects visible      | Tasks visible                | Create project | Create task |
/// |----------|-----------------------|------------------------------|----------------|-------------|
/// | Admin    | all                   | all                          | yes            | yes         |
/// | Manager  | own (`manager_id`)    | tasks of own projects        | yes            | yes         |
/// | Employee | none                  | tasks assigned to them       | no             | no          |
///
/// Every match here is exhaustive over [`Role`]; a new role variant fails
/// compilation until each decision names it explicitly.

use uuid::Uuid;

use crate::models::user::Role;

/// Which projects an actor may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    /// Every project
    All,

    /// Projects whose `manager_id` equals the actor
    ManagedBy(Uuid),

    /// No projects surfaced
    None,
}

/// Which tasks an actor may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Every task
    All,

    /// Tasks belonging to projects managed by the actor
    ManagedBy(Uuid),

    /// Tasks assigned to the actor
    AssignedTo(Uuid),
}

/// Returns the project visibility scope for an actor
pub fn project_scope(role: Role, actor_id: Uuid) -> ProjectScope {
    match role {
        Role::Admin => ProjectScope::All,
        Role::Manager => ProjectScope::ManagedBy(actor_id),
        Role::Employee => ProjectScope::None,
    }
}

/// Returns the task visibility scope for an actor
pub fn task_scope(role: Role, actor_id: Uuid) -> TaskScope {
    match role {
        Role::Admin => TaskScope::All,
        Role::Manager => TaskScope::ManagedBy(actor_id),
        Role::Employee => TaskScope::AssignedTo(actor_id),
    }
}

/// Whether the role may create projects
pub fn can_create_project(role: Role) -> bool {
    match role {
        Role::Admin | Role::Manager => true,
        Role::Employee => false,
    }
}

/// Whether the role may create tasks
///
/// The original system only hid the task-creation link from employees
/// while leaving the route itself open. That gap is closed: the check is
/// enforced server-side for every role on every route.
pub fn can_create_task(role: Role) -> bool {
    match role {
        Role::Admin | Role::Manager => true,
        Role::Employee => false,
    }
}

/// The `manager_id` a newly created project receives
///
/// Managers own what they create; admin-created projects have no manager.
pub fn manager_on_create(role: Role, actor_id: Uuid) -> Option<Uuid> {
    match role {
        Role::Admin => None,
        Role::Manager => Some(actor_id),
        Role::Employee => None,
    }
}

/// Whether the role may be chosen at self-registration
///
/// Employee and Manager may be self-assigned, matching the original
/// registration form. Admin accounts are provisioned out of band and
/// rejected here.
pub fn registrable_role(role: Role) -> bool {
    match role {
        Role::Employee | Role::Manager => true,
        Role::Admin => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_scope_per_role() {
        let actor = Uuid::new_v4();

        assert_eq!(project_scope(Role::Admin, actor), ProjectScope::All);
        assert_eq!(
            project_scope(Role::Manager, actor),
            ProjectScope::ManagedBy(actor)
        );
        assert_eq!(project_scope(Role::Employee, actor), ProjectScope::None);
    }

    #[test]
    fn test_task_scope_per_role() {
        let actor = Uuid::new_v4();

        assert_eq!(task_scope(Role::Admin, actor), TaskScope::All);
        assert_eq!(task_scope(Role::Manager, actor), TaskScope::ManagedBy(actor));
        assert_eq!(
            task_scope(Role::Employee, actor),
            TaskScope::AssignedTo(actor)
        );
    }

    #[test]
    fn test_task_scope_is_actor_specific() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_ne!(task_scope(Role::Manager, a), task_scope(Role::Manager, b));
        assert_ne!(task_scope(Role::Employee, a), task_scope(Role::Employee, b));
    }

    #[test]
    fn test_create_permissions() {
        assert!(can_create_project(Role::Admin));
        assert!(can_create_project(Role::Manager));
        assert!(!can_create_project(Role::Employee));

        assert!(can_create_task(Role::Admin));
        assert!(can_create_task(Role::Manager));
        assert!(!can_create_task(Role::Employee));
    }

    #[test]
    fn test_manager_on_create() {
        let actor = Uuid::new_v4();

        assert_eq!(manager_on_create(Role::Admin, actor), None);
        assert_eq!(manager_on_create(Role::Manager, actor), Some(actor));
        assert_eq!(manager_on_create(Role::Employee, actor), None);
    }

    #[test]
    fn test_registrable_roles() {
        assert!(registrable_role(Role::Employee));
        assert!(registrable_role(Role::Manager));
        assert!(!registrable_role(Role::Admin));
    }
}
