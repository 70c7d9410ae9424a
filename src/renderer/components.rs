use std::fmt;

use crate::graph::{Access, ScopeKind};

/// Access level as spelled for the reflection runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTag {
    Private,
    Protected,
    Public,
}

impl AccessTag {
    /// Access of members and bases written without an access specifier.
    pub fn default_for(kind: ScopeKind) -> AccessTag {
        match kind {
            ScopeKind::Class => AccessTag::Private,
            ScopeKind::Struct | ScopeKind::Union | ScopeKind::Namespace => AccessTag::Public,
        }
    }

    pub fn from_access(access: Access, value_for_none: AccessTag) -> AccessTag {
        match access {
            Access::None => value_for_none,
            Access::Private => AccessTag::Private,
            Access::Protected => AccessTag::Protected,
            Access::Public => AccessTag::Public,
        }
    }
}

impl fmt::Display for AccessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessTag::Private => write!(f, "Neat::Access::Private"),
            AccessTag::Protected => write!(f, "Neat::Access::Protected"),
            AccessTag::Public => write!(f, "Neat::Access::Public"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub owner: String,
    pub field_type: String,
    pub name: String,
    pub access: AccessTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    pub owner: String,
    pub name: String,
    pub return_type: String,
    /// Comma separated parameter types, empty for a parameterless method.
    pub parameter_types: String,
    pub access: AccessTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEntry {
    pub base_type: String,
    pub access: AccessTag,
}

/// Everything registered for one exported class or struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistration {
    pub name: String,
    pub bases: Vec<BaseEntry>,
    pub fields: Vec<FieldEntry>,
    pub methods: Vec<MethodEntry>,
}
