//! What the current session is allowed to do.
//!
//! Derived once per session and handed to every command; nothing re-derives
//! it from the raw role.

use crate::models::Role;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_cut: bool,
    pub can_delete: bool,
    pub can_manage_products: bool,
    pub can_manage_users: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        can_create: false,
        can_edit: false,
        can_cut: false,
        can_delete: false,
        can_manage_products: false,
        can_manage_users: false,
    };

    pub const ALL: Capabilities = Capabilities {
        can_create: true,
        can_edit: true,
        can_cut: true,
        can_delete: true,
        can_manage_products: true,
        can_manage_users: true,
    };

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::ALL,
            Role::User => Self::NONE,
        }
    }

    pub fn for_session(session: Option<&Session>) -> Self {
        session.map_or(Self::NONE, |s| Self::for_role(s.role))
    }
}
