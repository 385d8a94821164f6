// src/models/rbac.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---
// 1. Role (Cargo da equipe)
// ---
// Conjunto fechado. A hierarquia numérica define quem "manda" em quem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "staff_role")]
pub enum Role {
    Administrador,
    Gestor,
    Guia,
    Condutor,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Administrador, Role::Gestor, Role::Guia, Role::Condutor];

    /// Nível hierárquico: 4 > 3 > 2 > 1.
    pub fn level(self) -> u8 {
        match self {
            Role::Administrador => 4,
            Role::Gestor => 3,
            Role::Guia => 2,
            Role::Condutor => 1,
        }
    }

    pub fn outranks_or_equals(self, other: Role) -> bool {
        self.level() >= other.level()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Gestor => "Gestor",
            Role::Guia => "Guia",
            Role::Condutor => "Condutor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Cargo desconhecido: {}", s))
    }
}

// ---
// 2. Resource / Action
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Bookings,
    Adventures,
    Staff,
    Agencies,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Bookings => "bookings",
            Resource::Adventures => "adventures",
            Resource::Staff => "staff",
            Resource::Agencies => "agencies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

// ---
// 3. Permission (Capacidade atômica)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewAnalytics,
    ViewCalendar,
    ViewBookings,
    EditBookings,
    DeleteBookings,
    ViewAdventures,
    EditAdventures,
    DeleteAdventures,
    ViewStaff,
    EditStaff,
    DeleteStaff,
    ViewAgencies,
    EditAgencies,
    DeleteAgencies,
    DeleteAny,
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ViewDashboard,
        Permission::ViewAnalytics,
        Permission::ViewCalendar,
        Permission::ViewBookings,
        Permission::EditBookings,
        Permission::DeleteBookings,
        Permission::ViewAdventures,
        Permission::EditAdventures,
        Permission::DeleteAdventures,
        Permission::ViewStaff,
        Permission::EditStaff,
        Permission::DeleteStaff,
        Permission::ViewAgencies,
        Permission::EditAgencies,
        Permission::DeleteAgencies,
        Permission::DeleteAny,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ViewCalendar => "view_calendar",
            Permission::ViewBookings => "view_bookings",
            Permission::EditBookings => "edit_bookings",
            Permission::DeleteBookings => "delete_bookings",
            Permission::ViewAdventures => "view_adventures",
            Permission::EditAdventures => "edit_adventures",
            Permission::DeleteAdventures => "delete_adventures",
            Permission::ViewStaff => "view_staff",
            Permission::EditStaff => "edit_staff",
            Permission::DeleteStaff => "delete_staff",
            Permission::ViewAgencies => "view_agencies",
            Permission::EditAgencies => "edit_agencies",
            Permission::DeleteAgencies => "delete_agencies",
            Permission::DeleteAny => "delete_any",
        }
    }

    /// Monta a permissão a partir de "ação_recurso" (ex: "edit_bookings").
    pub fn compose(action: Action, resource: Resource) -> Option<Permission> {
        format!("{}_{}", action.as_str(), resource.as_str()).parse().ok()
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| format!("Permissão desconhecida: {}", s))
    }
}

// ---
// 4. Respostas da API
// ---
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissions {
    pub role: Role,
    pub level: u8,
    pub permissions: Vec<Permission>,
    pub default_path: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageAccess {
    #[schema(example = "/staff")]
    pub path: String,
    pub allowed: bool,
    #[schema(example = "/bookings")]
    pub redirect_to: Option<String>,
}
