// src/services/permissions.rs
//
// Motor de permissões: funções puras sobre os conjuntos fechados de
// cargos e permissões. Nada aqui toca no banco.

use crate::models::rbac::{Action, Permission, Resource, Role};

use Permission::*;

const ADMINISTRADOR: &[Permission] = &Permission::ALL;

const GESTOR: &[Permission] = &[
    ViewDashboard,
    ViewAnalytics,
    ViewCalendar,
    ViewBookings,
    EditBookings,
    DeleteBookings,
    ViewAdventures,
    EditAdventures,
    DeleteAdventures,
    ViewAgencies,
    EditAgencies,
    ViewStaff,
];

const GUIA: &[Permission] = &[ViewCalendar, ViewBookings, EditBookings, ViewAdventures];

const CONDUTOR: &[Permission] = &[ViewCalendar, ViewBookings];

// Páginas do painel e a permissão que cada uma exige
const PAGE_PERMISSIONS: &[(&str, Permission)] = &[
    ("/", ViewDashboard),
    ("/bookings", ViewBookings),
    ("/calendar", ViewCalendar),
    ("/adventures", ViewAdventures),
    ("/staff", ViewStaff),
    ("/agencies", ViewAgencies),
    ("/analytics", ViewAnalytics),
];

// Ordem de prioridade das páginas iniciais
const LANDING_PAGES: &[&str] = &["/", "/bookings", "/calendar"];

pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Administrador => ADMINISTRADOR,
        Role::Gestor => GESTOR,
        Role::Guia => GUIA,
        Role::Condutor => CONDUTOR,
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

/// Remove query string e barra final: "/staff/?x=1" -> "/staff".
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

pub fn page_permission(path: &str) -> Option<Permission> {
    let path = normalize_path(path);
    PAGE_PERMISSIONS
        .iter()
        .find(|(page, _)| *page == path)
        .map(|(_, perm)| *perm)
}

/// Páginas fora do mapa são liberadas.
pub fn can_access_page(role: Role, path: &str) -> bool {
    match page_permission(path) {
        Some(perm) => has_permission(role, perm),
        None => true,
    }
}

pub fn can_delete(role: Role, resource: Option<Resource>) -> bool {
    if has_permission(role, DeleteAny) {
        return true;
    }
    resource
        .and_then(|r| Permission::compose(Action::Delete, r))
        .is_some_and(|perm| has_permission(role, perm))
}

pub fn can_edit(role: Role, resource: Resource) -> bool {
    Permission::compose(Action::Edit, resource).is_some_and(|perm| has_permission(role, perm))
}

pub fn can_view(role: Role, resource: Resource) -> bool {
    Permission::compose(Action::View, resource).is_some_and(|perm| has_permission(role, perm))
}

/// Primeira página inicial acessível ao cargo.
pub fn default_path(role: Role) -> &'static str {
    LANDING_PAGES
        .iter()
        .copied()
        .find(|page| can_access_page(role, page))
        .unwrap_or("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_non_empty_permission_set() {
        for role in Role::ALL {
            assert!(!role_permissions(role).is_empty(), "{} sem permissões", role);
        }
    }

    #[test]
    fn has_permission_matches_set_membership() {
        for role in Role::ALL {
            let set = role_permissions(role);
            for perm in Permission::ALL {
                assert_eq!(has_permission(role, perm), set.contains(&perm), "{} / {:?}", role, perm);
            }
        }
    }

    #[test]
    fn only_administrador_holds_delete_any() {
        assert!(has_permission(Role::Administrador, DeleteAny));
        assert!(!has_permission(Role::Gestor, DeleteAny));
        assert!(!has_permission(Role::Guia, DeleteAny));
        assert!(!has_permission(Role::Condutor, DeleteAny));
    }

    #[test]
    fn unmapped_pages_are_allowed() {
        for role in Role::ALL {
            assert!(can_access_page(role, "/profile"));
            assert!(can_access_page(role, "/bookings/123"));
        }
    }

    #[test]
    fn condutor_cannot_open_staff_but_can_open_bookings() {
        assert!(!can_access_page(Role::Condutor, "/staff"));
        assert!(can_access_page(Role::Condutor, "/bookings"));
    }

    #[test]
    fn paths_are_normalized_before_lookup() {
        assert!(!can_access_page(Role::Condutor, "/staff/"));
        assert!(!can_access_page(Role::Condutor, "/staff?tab=guias"));
        assert_eq!(page_permission(""), Some(ViewDashboard));
    }

    #[test]
    fn delete_any_short_circuits() {
        assert!(can_delete(Role::Administrador, None));
        assert!(can_delete(Role::Administrador, Some(Resource::Staff)));
        assert!(!can_delete(Role::Gestor, None));
        assert!(can_delete(Role::Gestor, Some(Resource::Bookings)));
        assert!(!can_delete(Role::Gestor, Some(Resource::Agencies)));
        assert!(!can_delete(Role::Guia, Some(Resource::Bookings)));
    }

    #[test]
    fn edit_and_view_compose_the_permission_name() {
        assert_eq!(Permission::compose(Action::Edit, Resource::Bookings), Some(EditBookings));
        assert!(can_edit(Role::Guia, Resource::Bookings));
        assert!(!can_edit(Role::Guia, Resource::Adventures));
        assert!(can_view(Role::Guia, Resource::Adventures));
        assert!(!can_view(Role::Condutor, Resource::Agencies));
        assert!(can_view(Role::Gestor, Resource::Staff));
        assert!(!can_edit(Role::Gestor, Resource::Staff));
    }

    #[test]
    fn default_path_follows_landing_priority() {
        assert_eq!(default_path(Role::Administrador), "/");
        assert_eq!(default_path(Role::Gestor), "/");
        assert_eq!(default_path(Role::Guia), "/bookings");
        assert_eq!(default_path(Role::Condutor), "/bookings");
    }

    #[test]
    fn hierarchy_is_totally_ordered() {
        assert!(Role::Administrador.outranks_or_equals(Role::Gestor));
        assert!(Role::Gestor.outranks_or_equals(Role::Gestor));
        assert!(!Role::Guia.outranks_or_equals(Role::Gestor));
        assert!(Role::Guia.level() > Role::Condutor.level());
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("gestor".parse::<Role>(), Ok(Role::Gestor));
        assert_eq!(" Condutor ".parse::<Role>(), Ok(Role::Condutor));
        assert!("Motorista".parse::<Role>().is_err());
    }
}
