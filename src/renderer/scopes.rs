//! Qualified names: the enclosing-scope prefix of a declaration and the simple
//! name it is referred to by.

use anyhow::{bail, Context, Result};

use crate::graph::*;
use crate::renderer::types::TypeRenderer;

/// Scope chains longer than this can only come from a cyclic graph.
const MAX_SCOPE_DEPTH: usize = 4096;

impl<'a> TypeRenderer<'a> {
    /// The enclosing scope of `decl`, `None` at global scope.
    pub fn home_scope(&self, decl: DeclIndex) -> Result<Option<DeclIndex>> {
        let graph = self.graph;
        let home_scope = match decl.sort {
            DeclSort::Variable => graph.variable(decl)?.home_scope,
            DeclSort::Field => graph.field(decl)?.home_scope,
            DeclSort::Scope => graph.scope(decl)?.home_scope,
            DeclSort::Intrinsic => graph.intrinsic(decl)?.home_scope,
            DeclSort::Enumeration => graph.enumeration(decl)?.home_scope,
            DeclSort::Alias => graph.alias(decl)?.home_scope,
            DeclSort::Template => graph.template(decl)?.home_scope,
            DeclSort::Concept => graph.concept(decl)?.home_scope,
            DeclSort::Function => graph.function(decl)?.home_scope,
            DeclSort::Method => graph.method(decl)?.home_scope,
            DeclSort::Constructor => graph.constructor(decl)?.home_scope,
            DeclSort::Destructor => graph.destructor(decl)?.home_scope,
            DeclSort::UsingDeclaration => graph.using_declaration(decl)?.home_scope,

            // Not supported yet
            DeclSort::Bitfield
            | DeclSort::PartialSpecialization
            | DeclSort::Reference
            | DeclSort::InheritedConstructor

            // No home scope to speak of
            | DeclSort::Parameter
            | DeclSort::VendorExtension
            | DeclSort::Enumerator
            | DeclSort::Temploid
            | DeclSort::ExplicitSpecialization
            | DeclSort::ExplicitInstantiation
            | DeclSort::UsingDirective
            | DeclSort::Friend
            | DeclSort::Expansion
            | DeclSort::DeductionGuide
            | DeclSort::Barren
            | DeclSort::Tuple
            | DeclSort::SyntaxTree
            | DeclSort::Property
            | DeclSort::OutputSegment => {
                bail!("Cannot get the home scope for a declaration of sort {:?}", decl.sort)
            }
        };
        Ok(home_scope)
    }

    /// Enclosing-scope prefix of `decl`, ending in `::` unless it is empty.
    ///
    /// The chain of home scopes is walked upwards without recursion, so deep
    /// nesting cannot exhaust the stack.
    pub fn render_namespace(&self, decl: DeclIndex) -> Result<String> {
        let mut segments = Vec::new();
        let mut current = self
            .home_scope(decl)
            .with_context(|| format!("While rendering the namespace of {}", decl))?;

        while let Some(scope) = current {
            if segments.len() >= MAX_SCOPE_DEPTH {
                bail!("The home scope chain of {} does not reach the global scope", decl);
            }
            let name = self
                .render_referred_declaration(scope)
                .with_context(|| format!("While rendering the namespace of {}", decl))?;
            segments.push(name);
            current = self
                .home_scope(scope)
                .with_context(|| format!("While rendering the namespace of {}", decl))?;
        }

        let mut rendered = String::new();
        for segment in segments.iter().rev().filter(|segment| !segment.is_empty()) {
            rendered.push_str(segment);
            rendered.push_str("::");
        }
        Ok(rendered)
    }

    /// Fully qualified name of `decl`.
    pub fn qualified_name(&self, decl: DeclIndex) -> Result<String> {
        Ok(self.render_namespace(decl)? + &self.render_referred_declaration(decl)?)
    }

    /// Simple name of a declaration designated by a type or a scope link.
    pub fn render_referred_declaration(&self, decl: DeclIndex) -> Result<String> {
        let graph = self.graph;
        match decl.sort {
            DeclSort::Parameter => Ok(graph.get_string(graph.parameter(decl)?.name)?.to_string()),
            DeclSort::Scope => self.user_type_name(graph.scope(decl)?.name),
            DeclSort::Template => self.user_type_name(graph.template(decl)?.name),
            DeclSort::Function => self.user_type_name(graph.function(decl)?.name),
            DeclSort::Enumeration => {
                Ok(graph.get_string(graph.enumeration(decl)?.name)?.to_string())
            }
            other => bail!(
                "Unsupported declaration sort {:?} while resolving the name of {}",
                other,
                decl
            ),
        }
    }

    /// Text of an identifier. Operator, conversion and other special names
    /// have no plain spelling yet.
    pub fn user_type_name(&self, name: NameIndex) -> Result<String> {
        match name.sort {
            NameSort::Identifier => Ok(self.graph.get_string(TextOffset(name.index))?.to_string()),
            other => Ok(format!("<UNSUPPORTED_NAME {:?}>", other)),
        }
    }
}
