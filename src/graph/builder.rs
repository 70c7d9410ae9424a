use std::collections::HashMap;

use crate::graph::module::ModuleGraph;
use crate::graph::types::*;
use crate::renderer::visibility::{PRIVATE_ACCESS_FUNCTION, PRIVATE_ACCESS_NAMESPACE};

/// Incrementally assembles a [`ModuleGraph`] in memory.
///
/// Scopes created through the builder get their own member list and are
/// appended to the member list of their parent (the global scope when the
/// parent is `None`), in creation order.
pub struct ModuleGraphBuilder {
    graph: ModuleGraph,
    interned: HashMap<String, TextOffset>,
    private_access_sentinel: Option<DeclIndex>,
}

fn next_index<T>(table: &[T]) -> u32 {
    table.len() as u32
}

impl ModuleGraphBuilder {
    pub fn new(unit_name: &str) -> Self {
        let mut graph = ModuleGraph::default();
        graph.unit.name = unit_name.to_string();
        graph.global_scope = 0;
        graph.scope_members.push(Vec::new());

        Self {
            graph,
            interned: HashMap::new(),
            private_access_sentinel: None,
        }
    }

    pub fn unit_sort(&mut self, sort: UnitSort) -> &mut Self {
        self.graph.unit.sort = sort;
        self
    }

    pub fn intern(&mut self, text: &str) -> TextOffset {
        if let Some(offset) = self.interned.get(text) {
            return *offset;
        }
        let offset = TextOffset(next_index(&self.graph.strings));
        self.graph.strings.push(text.to_string());
        self.interned.insert(text.to_string(), offset);
        offset
    }

    pub fn identifier(&mut self, text: &str) -> NameIndex {
        NameIndex::identifier(self.intern(text))
    }

    // Types

    pub fn fundamental(&mut self, basis: TypeBasis) -> TypeIndex {
        self.fundamental_with(basis, TypePrecision::Default, TypeSign::Plain)
    }

    pub fn fundamental_with(
        &mut self,
        basis: TypeBasis,
        precision: TypePrecision,
        sign: TypeSign,
    ) -> TypeIndex {
        let index = next_index(&self.graph.fundamental_types);
        self.graph.fundamental_types.push(FundamentalType {
            basis,
            precision,
            sign,
        });
        TypeIndex::new(TypeSort::Fundamental, index)
    }

    pub fn designated(&mut self, decl: DeclIndex) -> TypeIndex {
        let index = next_index(&self.graph.designated_types);
        self.graph.designated_types.push(DesignatedType { decl });
        TypeIndex::new(TypeSort::Designated, index)
    }

    pub fn pointer(&mut self, pointee: TypeIndex) -> TypeIndex {
        let index = next_index(&self.graph.pointer_types);
        self.graph.pointer_types.push(PointerType { pointee });
        TypeIndex::new(TypeSort::Pointer, index)
    }

    pub fn lvalue_reference(&mut self, referee: TypeIndex) -> TypeIndex {
        let index = next_index(&self.graph.lvalue_references);
        self.graph.lvalue_references.push(ReferenceType { referee });
        TypeIndex::new(TypeSort::LvalueReference, index)
    }

    pub fn rvalue_reference(&mut self, referee: TypeIndex) -> TypeIndex {
        let index = next_index(&self.graph.rvalue_references);
        self.graph.rvalue_references.push(ReferenceType { referee });
        TypeIndex::new(TypeSort::RvalueReference, index)
    }

    pub fn qualified(&mut self, unqualified: TypeIndex, qualifiers: Qualifiers) -> TypeIndex {
        let index = next_index(&self.graph.qualified_types);
        self.graph.qualified_types.push(QualifiedType {
            unqualified,
            qualifiers,
        });
        TypeIndex::new(TypeSort::Qualified, index)
    }

    pub fn base(&mut self, ty: TypeIndex, access: Access) -> TypeIndex {
        let index = next_index(&self.graph.base_types);
        self.graph.base_types.push(BaseType { ty, access });
        TypeIndex::new(TypeSort::Base, index)
    }

    pub fn placeholder(&mut self, elaboration: Option<TypeIndex>) -> TypeIndex {
        let index = next_index(&self.graph.placeholder_types);
        self.graph
            .placeholder_types
            .push(PlaceholderType { elaboration });
        TypeIndex::new(TypeSort::Placeholder, index)
    }

    pub fn tuple(&mut self, elements: Vec<TypeIndex>) -> TypeIndex {
        let index = next_index(&self.graph.tuple_types);
        self.graph.tuple_types.push(TupleType { elements });
        TypeIndex::new(TypeSort::Tuple, index)
    }

    pub fn function_type(&mut self, target: TypeIndex, source: Option<TypeIndex>) -> TypeIndex {
        let index = next_index(&self.graph.function_types);
        self.graph
            .function_types
            .push(SignatureType { target, source });
        TypeIndex::new(TypeSort::Function, index)
    }

    pub fn method_type(&mut self, target: TypeIndex, source: Option<TypeIndex>) -> TypeIndex {
        let index = next_index(&self.graph.method_types);
        self.graph.method_types.push(SignatureType { target, source });
        TypeIndex::new(TypeSort::Method, index)
    }

    /// A reference of a sort with no backing table; the renderer never looks
    /// these up.
    pub fn opaque_type(&mut self, sort: TypeSort) -> TypeIndex {
        TypeIndex::new(sort, 0)
    }

    // Declarations

    fn push_member(&mut self, parent: Option<DeclIndex>, decl: DeclIndex) {
        let members = match parent {
            Some(parent) => self
                .graph
                .scopes
                .get(parent.index as usize)
                .and_then(|scope| scope.members),
            None => Some(self.graph.global_scope),
        };
        if let Some(members) = members {
            self.graph.scope_members[members as usize].push(decl);
        }
    }

    pub fn scope(&mut self, parent: Option<DeclIndex>, name: &str, kind: ScopeKind) -> DeclIndex {
        let name = self.identifier(name);
        let members = next_index(&self.graph.scope_members);
        self.graph.scope_members.push(Vec::new());

        let decl = DeclIndex::new(DeclSort::Scope, next_index(&self.graph.scopes));
        self.graph.scopes.push(ScopeDecl {
            name,
            kind,
            home_scope: parent,
            base: None,
            members: Some(members),
            specifiers: BasicSpecifiers::CXX,
        });
        self.push_member(parent, decl);
        decl
    }

    pub fn namespace(&mut self, parent: Option<DeclIndex>, name: &str) -> DeclIndex {
        self.scope(parent, name, ScopeKind::Namespace)
    }

    pub fn class(&mut self, parent: Option<DeclIndex>, name: &str) -> DeclIndex {
        self.scope(parent, name, ScopeKind::Class)
    }

    pub fn structure(&mut self, parent: Option<DeclIndex>, name: &str) -> DeclIndex {
        self.scope(parent, name, ScopeKind::Struct)
    }

    pub fn set_base(&mut self, scope: DeclIndex, base: TypeIndex) -> &mut Self {
        if let Some(scope) = self.graph.scopes.get_mut(scope.index as usize) {
            scope.base = Some(base);
        }
        self
    }

    pub fn set_exported(&mut self, decl: DeclIndex, exported: bool) -> &mut Self {
        let specifiers = match decl.sort {
            DeclSort::Scope => self
                .graph
                .scopes
                .get_mut(decl.index as usize)
                .map(|scope| &mut scope.specifiers),
            DeclSort::Enumeration => self
                .graph
                .enumerations
                .get_mut(decl.index as usize)
                .map(|enumeration| &mut enumeration.specifiers),
            _ => None,
        };
        if let Some(specifiers) = specifiers {
            let bits = specifiers.0 & !BasicSpecifiers::NON_EXPORTED.0;
            *specifiers = if exported {
                BasicSpecifiers(bits)
            } else {
                BasicSpecifiers(bits | BasicSpecifiers::NON_EXPORTED.0)
            };
        }
        self
    }

    pub fn field(&mut self, owner: DeclIndex, name: &str, ty: TypeIndex, access: Access) -> DeclIndex {
        let name = self.intern(name);
        let decl = DeclIndex::new(DeclSort::Field, next_index(&self.graph.fields));
        self.graph.fields.push(FieldDecl {
            name,
            ty,
            access,
            home_scope: Some(owner),
        });
        self.push_member(Some(owner), decl);
        decl
    }

    pub fn method(&mut self, owner: DeclIndex, name: &str, ty: TypeIndex, access: Access) -> DeclIndex {
        let name = self.identifier(name);
        let decl = DeclIndex::new(DeclSort::Method, next_index(&self.graph.methods));
        self.graph.methods.push(MethodDecl {
            name,
            ty,
            access,
            home_scope: Some(owner),
        });
        self.push_member(Some(owner), decl);
        decl
    }

    pub fn function(&mut self, parent: Option<DeclIndex>, name: &str, ty: TypeIndex) -> DeclIndex {
        let name = self.identifier(name);
        let decl = DeclIndex::new(DeclSort::Function, next_index(&self.graph.functions));
        self.graph.functions.push(FunctionDecl {
            name,
            ty,
            home_scope: parent,
        });
        self.push_member(parent, decl);
        decl
    }

    pub fn variable(&mut self, parent: Option<DeclIndex>, name: &str, ty: TypeIndex) -> DeclIndex {
        let name = self.identifier(name);
        let decl = DeclIndex::new(DeclSort::Variable, next_index(&self.graph.variables));
        self.graph.variables.push(VariableDecl {
            name,
            ty,
            home_scope: parent,
        });
        self.push_member(parent, decl);
        decl
    }

    pub fn enumeration(&mut self, parent: Option<DeclIndex>, name: &str) -> DeclIndex {
        let name = self.intern(name);
        let decl = DeclIndex::new(DeclSort::Enumeration, next_index(&self.graph.enumerations));
        self.graph.enumerations.push(EnumerationDecl {
            name,
            home_scope: parent,
            specifiers: BasicSpecifiers::CXX,
        });
        self.push_member(parent, decl);
        decl
    }

    pub fn template(&mut self, parent: Option<DeclIndex>, name: &str) -> DeclIndex {
        let name = self.identifier(name);
        let decl = DeclIndex::new(DeclSort::Template, next_index(&self.graph.templates));
        self.graph.templates.push(AnchoredDecl {
            name,
            home_scope: parent,
        });
        self.push_member(parent, decl);
        decl
    }

    pub fn alias(&mut self, parent: Option<DeclIndex>, name: &str) -> DeclIndex {
        let name = self.identifier(name);
        let decl = DeclIndex::new(DeclSort::Alias, next_index(&self.graph.aliases));
        self.graph.aliases.push(AnchoredDecl {
            name,
            home_scope: parent,
        });
        self.push_member(parent, decl);
        decl
    }

    /// Template parameters and function parameters live outside any member
    /// list.
    pub fn parameter(&mut self, name: &str, ty: TypeIndex) -> DeclIndex {
        let name = self.intern(name);
        let decl = DeclIndex::new(DeclSort::Parameter, next_index(&self.graph.parameters));
        self.graph.parameters.push(ParameterDecl { name, ty });
        decl
    }

    // Friends

    fn push_friend(&mut self, scope: DeclIndex, entity: ExprIndex) -> DeclIndex {
        let friend = DeclIndex::new(DeclSort::Friend, next_index(&self.graph.friends));
        self.graph.friends.push(FriendDecl { entity });

        match self
            .graph
            .friendships
            .iter_mut()
            .find(|friendship| friendship.scope == scope)
        {
            Some(friendship) => friendship.friends.push(friend),
            None => self.graph.friendships.push(Friendship {
                scope,
                friends: vec![friend],
            }),
        }
        friend
    }

    /// Declare `function` a friend of `scope` through a named-declaration
    /// expression of type `ty`.
    pub fn friend_declaration(&mut self, scope: DeclIndex, resolution: DeclIndex, ty: TypeIndex) -> DeclIndex {
        let expr = ExprIndex::new(ExprSort::NamedDecl, next_index(&self.graph.decl_expressions));
        self.graph
            .decl_expressions
            .push(NamedDeclExpr { resolution, ty });
        self.push_friend(scope, expr)
    }

    /// Declare a friend whose entity is an expression of another sort, such
    /// as a template-id.
    pub fn friend_expression(&mut self, scope: DeclIndex, sort: ExprSort) -> DeclIndex {
        self.push_friend(scope, ExprIndex::new(sort, 0))
    }

    /// The `void Neat::reflect_private_members()` declaration, created on
    /// first use.
    pub fn private_access_sentinel(&mut self) -> DeclIndex {
        if let Some(sentinel) = self.private_access_sentinel {
            return sentinel;
        }
        let namespace = self.namespace(None, PRIVATE_ACCESS_NAMESPACE);
        let void = self.fundamental(TypeBasis::Void);
        let signature = self.function_type(void, None);
        let sentinel = self.function(Some(namespace), PRIVATE_ACCESS_FUNCTION, signature);
        self.private_access_sentinel = Some(sentinel);
        sentinel
    }

    /// Make `scope` befriend the private access sentinel.
    pub fn grant_private_access(&mut self, scope: DeclIndex) -> DeclIndex {
        let sentinel = self.private_access_sentinel();
        let signature = self.graph.functions[sentinel.index as usize].ty;
        self.friend_declaration(scope, sentinel, signature)
    }

    pub fn build(self) -> ModuleGraph {
        self.graph
    }
}
