// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::{
        auth::AppUser,
        rbac::{Permission, Resource, Role},
    },
    services::permissions,
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn permission() -> Permission;

    fn allows(role: Role) -> bool {
        permissions::has_permission(role, Self::permission())
    }
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();

        // A. Usuário resolvido pelo auth_guard
        let user = parts
            .extensions
            .get::<AppUser>()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale))?;

        // B. Verifica o cargo contra a tabela estática
        let required = T::permission();
        if !T::allows(user.role) {
            tracing::debug!("⛔ {} ({}) sem '{}'", user.email, user.role, required.slug());
            return Err(AppError::Forbidden(required.slug().to_string()).to_api_error(&locale));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission_marker {
    ($name:ident, $perm:expr) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn permission() -> Permission {
                $perm
            }
        }
    };
    ($name:ident, $perm:expr, $check:expr) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn permission() -> Permission {
                $perm
            }
            fn allows(role: Role) -> bool {
                $check(role)
            }
        }
    };
}

// Páginas
permission_marker!(PermViewDashboard, Permission::ViewDashboard);
permission_marker!(PermViewAnalytics, Permission::ViewAnalytics);
permission_marker!(PermViewCalendar, Permission::ViewCalendar);

// Recursos
permission_marker!(PermViewBookings, Permission::ViewBookings, |r| permissions::can_view(r, Resource::Bookings));
permission_marker!(PermEditBookings, Permission::EditBookings, |r| permissions::can_edit(r, Resource::Bookings));
permission_marker!(PermViewAdventures, Permission::ViewAdventures, |r| permissions::can_view(r, Resource::Adventures));
permission_marker!(PermEditAdventures, Permission::EditAdventures, |r| permissions::can_edit(r, Resource::Adventures));
permission_marker!(PermViewStaff, Permission::ViewStaff, |r| permissions::can_view(r, Resource::Staff));
permission_marker!(PermEditStaff, Permission::EditStaff, |r| permissions::can_edit(r, Resource::Staff));
permission_marker!(PermViewAgencies, Permission::ViewAgencies, |r| permissions::can_view(r, Resource::Agencies));
permission_marker!(PermEditAgencies, Permission::EditAgencies, |r| permissions::can_edit(r, Resource::Agencies));

// Exclusões também aceitam o "delete_any"
permission_marker!(PermDeleteBookings, Permission::DeleteBookings, |r| permissions::can_delete(r, Some(Resource::Bookings)));
permission_marker!(PermDeleteAdventures, Permission::DeleteAdventures, |r| permissions::can_delete(r, Some(Resource::Adventures)));
permission_marker!(PermDeleteStaff, Permission::DeleteStaff, |r| permissions::can_delete(r, Some(Resource::Staff)));
permission_marker!(PermDeleteAgencies, Permission::DeleteAgencies, |r| permissions::can_delete(r, Some(Resource::Agencies)));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_follow_the_role_matrix() {
        assert!(PermViewAnalytics::allows(Role::Gestor));
        assert!(!PermViewAnalytics::allows(Role::Guia));
        assert!(PermEditBookings::allows(Role::Guia));
        assert!(!PermEditBookings::allows(Role::Condutor));
    }

    #[test]
    fn delete_markers_accept_delete_any() {
        assert!(PermDeleteStaff::allows(Role::Administrador));
        assert!(!PermDeleteStaff::allows(Role::Gestor));
        assert!(PermDeleteBookings::allows(Role::Gestor));
        assert!(!PermDeleteAgencies::allows(Role::Gestor));
    }
}
