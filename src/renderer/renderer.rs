use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::graph::*;
use crate::renderer::components::*;
use crate::renderer::template::render_translation_unit;
use crate::renderer::traits::*;
use crate::renderer::types::TypeRenderer;
use crate::renderer::visibility::{is_member_publicly_accessible, VisibilityChecker};

/// Walks one module graph and collects the registrations of its exported
/// classes and structs. Constructed per module and consumed by `generate`.
pub struct CodeGenerator<'a> {
    graph: &'a ModuleGraph,
    types: TypeRenderer<'a>,
    visibility: VisibilityChecker<'a>,
    context: RenderContext,
    registrations: Vec<TypeRegistration>,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(graph: &'a ModuleGraph, context: RenderContext) -> Self {
        Self {
            graph,
            types: TypeRenderer::new(graph),
            visibility: VisibilityChecker::new(graph),
            context,
            registrations: Vec::new(),
        }
    }

    /// Render the output for the whole module in the configured format.
    pub fn generate(mut self) -> Result<String> {
        if self.graph.unit.sort != UnitSort::Primary {
            bail!(
                "Only primary module interface units are supported, '{}' is a {:?} unit",
                self.graph.unit_name(),
                self.graph.unit.sort
            );
        }

        self.scan_global_scope()
            .with_context(|| format!("While scanning module '{}'", self.graph.unit_name()))?;

        debug!(
            module = self.graph.unit_name(),
            types = self.registrations.len(),
            "scanned module"
        );

        let code = self.render_registrations(&self.context.with_depth(0));
        match self.context.format {
            OutputFormat::Cpp => Ok(render_translation_unit(self.graph.unit_name(), &code)),
            OutputFormat::Registrations => Ok(code),
        }
    }

    pub fn registrations(&self) -> &[TypeRegistration] {
        &self.registrations
    }

    pub fn render_registrations(&self, context: &RenderContext) -> String {
        self.registrations
            .iter()
            .map(|registration| registration.render(context))
            .collect()
    }

    pub fn scan_global_scope(&mut self) -> Result<()> {
        let graph = self.graph;
        let members = graph.global_scope_members()?;
        self.scan_members(members)
    }

    fn scan_members(&mut self, members: &[DeclIndex]) -> Result<()> {
        for decl in members {
            if decl.sort == DeclSort::Scope {
                self.scan_scope(*decl)?;
            }
        }
        Ok(())
    }

    fn scan_scope(&mut self, decl: DeclIndex) -> Result<()> {
        let graph = self.graph;
        let scope = graph.scope(decl)?;
        match scope.kind {
            ScopeKind::Class | ScopeKind::Struct => {
                if let Some(registration) = self.render_type(decl)? {
                    self.registrations.push(registration);
                }
            }
            // TODO: register unions once the runtime can describe them
            ScopeKind::Union => {}
            ScopeKind::Namespace => {
                if let Some(members) = scope.members {
                    let members = graph.scope_members(members)?;
                    self.scan_members(members).with_context(|| {
                        format!("While scanning namespace {}", self.describe(decl))
                    })?;
                }
            }
        }
        Ok(())
    }

    fn describe(&self, decl: DeclIndex) -> String {
        self.types
            .qualified_name(decl)
            .unwrap_or_else(|_| decl.to_string())
    }

    /// Registration of a class or struct, `None` when it is not exported.
    pub fn render_type(&self, decl: DeclIndex) -> Result<Option<TypeRegistration>> {
        if !self.visibility.is_decl_exported(decl)? {
            return Ok(None);
        }

        let scope = self.graph.scope(decl)?;
        let type_name = self
            .types
            .qualified_name(decl)
            .with_context(|| format!("While rendering the name of {}", decl))?;

        let reflect_privates = self.context.show_private
            || self
                .visibility
                .reflects_private_members(decl)
                .with_context(|| format!("While rendering type '{}'", type_name))?;

        debug!(%type_name, reflect_privates, "rendering type");

        let (fields, methods) = self
            .render_members(&type_name, scope, reflect_privates)
            .with_context(|| format!("While rendering the members of '{}'", type_name))?;
        let bases = self
            .render_bases(scope)
            .with_context(|| format!("While rendering the bases of '{}'", type_name))?;

        Ok(Some(TypeRegistration {
            name: type_name,
            bases,
            fields,
            methods,
        }))
    }

    pub fn render_members(
        &self,
        type_name: &str,
        scope: &ScopeDecl,
        reflect_private_members: bool,
    ) -> Result<(Vec<FieldEntry>, Vec<MethodEntry>)> {
        let mut fields = Vec::new();
        let mut methods = Vec::new();

        let Some(members) = scope.members else {
            return Ok((fields, methods));
        };
        let default_access = AccessTag::default_for(scope.kind);

        for decl in self.graph.scope_members(members)? {
            match decl.sort {
                DeclSort::Field => {
                    let field = self.graph.field(*decl)?;
                    let name = self.graph.get_string(field.name)?;
                    if !is_member_publicly_accessible(field.access, reflect_private_members) {
                        continue;
                    }

                    let field_type = self
                        .types
                        .render_full_typename(field.ty)
                        .with_context(|| format!("While rendering the type of field '{}'", name))?;

                    fields.push(FieldEntry {
                        owner: type_name.to_string(),
                        field_type,
                        name: name.to_string(),
                        access: AccessTag::from_access(field.access, default_access),
                    });
                }
                DeclSort::Method => {
                    let method = self.graph.method(*decl)?;
                    let name = self.types.user_type_name(method.name)?;
                    if !is_member_publicly_accessible(method.access, reflect_private_members) {
                        continue;
                    }

                    let entry = self
                        .render_method(type_name, &name, method, default_access)
                        .with_context(|| format!("While rendering method '{}'", name))?;
                    methods.push(entry);
                }
                _ => {}
            }
        }

        Ok((fields, methods))
    }

    fn render_method(
        &self,
        type_name: &str,
        name: &str,
        method: &MethodDecl,
        default_access: AccessTag,
    ) -> Result<MethodEntry> {
        if method.ty.sort != TypeSort::Method {
            bail!("Expected a method type but got {}", method.ty);
        }
        let signature = self.graph.method_type(method.ty)?;

        Ok(MethodEntry {
            owner: type_name.to_string(),
            name: name.to_string(),
            return_type: self
                .types
                .render_full_typename(signature.target)
                .context("While rendering the return type")?,
            parameter_types: self.types.render_parameters(signature)?,
            access: AccessTag::from_access(method.access, default_access),
        })
    }

    pub fn render_bases(&self, scope: &ScopeDecl) -> Result<Vec<BaseEntry>> {
        let default_access = AccessTag::default_for(scope.kind);

        let Some(base) = scope.base else {
            return Ok(Vec::new());
        };

        match base.sort {
            TypeSort::Base => Ok(vec![self.render_base(base, default_access)?]),
            TypeSort::Tuple => {
                let tuple = self.graph.tuple_type(base)?;
                tuple
                    .elements
                    .iter()
                    .map(|element| match element.sort {
                        TypeSort::Base => self.render_base(*element, default_access),
                        other => bail!("Unexpected {:?} type in a list of base classes", other),
                    })
                    .collect()
            }
            other => bail!("Unexpected base class type sort {:?}", other),
        }
    }

    fn render_base(&self, base: TypeIndex, default_access: AccessTag) -> Result<BaseEntry> {
        let base_type = self.graph.base_type(base)?;
        Ok(BaseEntry {
            base_type: self
                .types
                .render_full_typename(base_type.ty)
                .with_context(|| format!("While rendering base class {}", base))?,
            access: AccessTag::from_access(base_type.access, default_access),
        })
    }
}
