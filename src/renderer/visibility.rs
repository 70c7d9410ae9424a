use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::graph::*;
use crate::renderer::types::TypeRenderer;

/// `Neat::reflect_private_members`, the friend function that opts a type into
/// private member reflection, and the spelling its type must have.
pub const PRIVATE_ACCESS_NAMESPACE: &str = "Neat";
pub const PRIVATE_ACCESS_FUNCTION: &str = "reflect_private_members";
pub const PRIVATE_ACCESS_SIGNATURE: &str = "void ()";

/// True for exactly `Neat::reflect_private_members`.
pub fn is_private_access_sentinel(qualified_name: &str) -> bool {
    qualified_name
        .strip_prefix(PRIVATE_ACCESS_NAMESPACE)
        .and_then(|rest| rest.strip_prefix("::"))
        == Some(PRIVATE_ACCESS_FUNCTION)
}

/// Decides what the generated code may see: which declarations are exported
/// from the module and which members are accessible to it.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityChecker<'a> {
    types: TypeRenderer<'a>,
}

impl<'a> VisibilityChecker<'a> {
    pub fn new(graph: &'a ModuleGraph) -> Self {
        Self {
            types: TypeRenderer::new(graph),
        }
    }

    pub fn is_type_exported(&self, ty: TypeIndex) -> Result<bool> {
        let graph = self.types.graph;
        match ty.sort {
            TypeSort::Fundamental | TypeSort::Pointer => Ok(true),
            TypeSort::Designated => self.is_decl_exported(graph.designated_type(ty)?.decl),
            TypeSort::Method => {
                let method = graph.method_type(ty)?;
                let source_exported = match method.source {
                    Some(source) => self.is_type_exported(source)?,
                    None => true,
                };
                Ok(source_exported && self.is_type_exported(method.target)?)
            }
            TypeSort::Tuple => {
                for element in &graph.tuple_type(ty)?.elements {
                    if !self.is_type_exported(*element)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            other => bail!(
                "Unexpected type while checking if the type was exported. Type sort: {:?}",
                other
            ),
        }
    }

    pub fn is_decl_exported(&self, decl: DeclIndex) -> Result<bool> {
        let graph = self.types.graph;
        let specifiers = match decl.sort {
            DeclSort::Scope => graph.scope(decl)?.specifiers,
            DeclSort::Enumeration => graph.enumeration(decl)?.specifiers,
            other => bail!(
                "Unexpected declaration while checking if the declaration was exported. Declaration sort: {:?}",
                other
            ),
        };
        Ok(!specifiers.contains(BasicSpecifiers::NON_EXPORTED))
    }

    /// True when `scope` befriends `void Neat::reflect_private_members()`.
    pub fn reflects_private_members(&self, scope: DeclIndex) -> Result<bool> {
        let graph = self.types.graph;

        for friend in graph.friends_of(scope) {
            let entity = graph
                .friend(*friend)
                .with_context(|| format!("While reading the friends of {}", scope))?
                .entity;

            match entity.sort {
                ExprSort::NamedDecl => {
                    let named = graph.decl_expression(entity)?;
                    let friend_name = self
                        .types
                        .qualified_name(named.resolution)
                        .with_context(|| format!("While reading the friends of {}", scope))?;
                    let friend_type = self
                        .types
                        .render_full_typename(named.ty)
                        .with_context(|| format!("While reading the friends of {}", scope))?;

                    if is_private_access_sentinel(&friend_name) && friend_type == PRIVATE_ACCESS_SIGNATURE {
                        debug!(%scope, "private members are reflected");
                        return Ok(true);
                    }
                }
                ExprSort::TemplateId => {
                    warn!(%scope, "template-id friends are not supported yet, skipping");
                }
                other => {
                    warn!(%scope, "unexpected expression sort {:?} in friend declaration", other);
                }
            }
        }

        Ok(false)
    }
}

/// A member is emitted when it is public, or when the generator was granted
/// access to the private members of its class.
pub fn is_member_publicly_accessible(access: Access, reflect_private_members: bool) -> bool {
    access == Access::Public || reflect_private_members
}
