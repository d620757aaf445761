use serde::{Deserialize, Serialize};

use musicshop_core::{DomainError, DomainResult};

use crate::Permission;

static ADMIN_PERMISSIONS: [Permission; 1] = [Permission::WILDCARD];

static SHOP_EMPLOYEE_PERMISSIONS: [Permission; 4] = [
    Permission::INVENTORY_READ,
    Permission::INVENTORY_WRITE,
    Permission::ORDERS_PROCESS,
    Permission::WORKLOG_TRACK,
];

static ACCOUNTANT_PERMISSIONS: [Permission; 3] = [
    Permission::INVENTORY_READ,
    Permission::REPORTS_VIEW,
    Permission::WORKLOG_TRACK,
];

/// Staff role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    ShopEmployee,
    Accountant,
}

impl Role {
    /// Map the 1-based selection shown when creating a user.
    pub fn from_menu_choice(choice: u32) -> DomainResult<Self> {
        match choice {
            1 => Ok(Role::Admin),
            2 => Ok(Role::ShopEmployee),
            3 => Ok(Role::Accountant),
            _ => Err(DomainError::validation("invalid role selection")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::ShopEmployee => "SHOP_EMPLOYEE",
            Role::Accountant => "ACCOUNTANT",
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => &ADMIN_PERMISSIONS,
            Role::ShopEmployee => &SHOP_EMPLOYEE_PERMISSIONS,
            Role::Accountant => &ACCOUNTANT_PERMISSIONS,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
