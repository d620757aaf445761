use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque dotted strings (e.g. "inventory.write"). The
/// wildcard `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));
    pub const INVENTORY_READ: Permission = Permission(Cow::Borrowed("inventory.read"));
    pub const INVENTORY_WRITE: Permission = Permission(Cow::Borrowed("inventory.write"));
    pub const ORDERS_PROCESS: Permission = Permission(Cow::Borrowed("orders.process"));
    pub const REPORTS_VIEW: Permission = Permission(Cow::Borrowed("reports.view"));
    pub const USERS_MANAGE: Permission = Permission(Cow::Borrowed("users.manage"));
    pub const WORKLOG_TRACK: Permission = Permission(Cow::Borrowed("worklog.track"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
