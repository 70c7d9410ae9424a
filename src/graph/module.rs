use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::graph::types::*;

/// Decoded module interface graph: flat tables of declarations, types and
/// names, addressed by tagged `(sort, index)` references.
///
/// Only the sorts the renderer can follow have a table. A reference whose
/// sort has no table here is either rendered as unsupported or rejected by the
/// caller before any lookup happens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleGraph {
    pub unit: UnitDescriptor,
    /// Row of `scope_members` holding the global scope.
    #[serde(default)]
    pub global_scope: u32,
    #[serde(default)]
    pub strings: Vec<String>,
    #[serde(default)]
    pub scope_members: Vec<Vec<DeclIndex>>,

    #[serde(default)]
    pub scopes: Vec<ScopeDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    #[serde(default)]
    pub enumerations: Vec<EnumerationDecl>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub templates: Vec<AnchoredDecl>,
    #[serde(default)]
    pub intrinsics: Vec<AnchoredDecl>,
    #[serde(default)]
    pub aliases: Vec<AnchoredDecl>,
    #[serde(default)]
    pub concepts: Vec<AnchoredDecl>,
    #[serde(default)]
    pub constructors: Vec<AnchoredDecl>,
    #[serde(default)]
    pub destructors: Vec<AnchoredDecl>,
    #[serde(default)]
    pub using_declarations: Vec<AnchoredDecl>,
    #[serde(default)]
    pub friends: Vec<FriendDecl>,

    #[serde(default)]
    pub fundamental_types: Vec<FundamentalType>,
    #[serde(default)]
    pub designated_types: Vec<DesignatedType>,
    #[serde(default)]
    pub pointer_types: Vec<PointerType>,
    #[serde(default)]
    pub lvalue_references: Vec<ReferenceType>,
    #[serde(default)]
    pub rvalue_references: Vec<ReferenceType>,
    #[serde(default)]
    pub qualified_types: Vec<QualifiedType>,
    #[serde(default)]
    pub base_types: Vec<BaseType>,
    #[serde(default)]
    pub placeholder_types: Vec<PlaceholderType>,
    #[serde(default)]
    pub tuple_types: Vec<TupleType>,
    #[serde(default)]
    pub function_types: Vec<SignatureType>,
    #[serde(default)]
    pub method_types: Vec<SignatureType>,

    #[serde(default)]
    pub decl_expressions: Vec<NamedDeclExpr>,
    #[serde(default)]
    pub friendships: Vec<Friendship>,
}

fn decl_row<'a, T>(table: &'a [T], decl: DeclIndex, expected: DeclSort) -> Result<&'a T> {
    if decl.sort != expected {
        bail!("Expected a {:?} declaration but got {}", expected, decl);
    }
    table.get(decl.index as usize).ok_or_else(|| {
        anyhow!(
            "Declaration {} is out of range ({} {:?} declarations in the module)",
            decl,
            table.len(),
            expected
        )
    })
}

fn type_row<'a, T>(table: &'a [T], ty: TypeIndex, expected: TypeSort) -> Result<&'a T> {
    if ty.sort != expected {
        bail!("Expected a {:?} type but got {}", expected, ty);
    }
    table.get(ty.index as usize).ok_or_else(|| {
        anyhow!(
            "Type {} is out of range ({} {:?} types in the module)",
            ty,
            table.len(),
            expected
        )
    })
}

impl ModuleGraph {
    /// Parse a graph from its JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse module graph JSON")
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("Failed to parse module graph JSON")
    }

    /// Load a graph from disk. `*.zst` files are decompressed first.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open module graph: {}", path.display()))?;

        let is_compressed = path.extension().is_some_and(|ext| ext == "zst");
        if is_compressed {
            let bytes = zstd::stream::decode_all(BufReader::new(file))
                .with_context(|| format!("Failed to decompress module graph: {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse module graph: {}", path.display()))
        } else {
            Self::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse module graph: {}", path.display()))
        }
    }

    pub fn unit_name(&self) -> &str {
        &self.unit.name
    }

    pub fn get_string(&self, offset: TextOffset) -> Result<&str> {
        self.strings
            .get(offset.0 as usize)
            .map(String::as_str)
            .ok_or_else(|| {
                anyhow!(
                    "Text offset {} is out of range ({} strings in the module)",
                    offset.0,
                    self.strings.len()
                )
            })
    }

    pub fn scope_members(&self, members: u32) -> Result<&[DeclIndex]> {
        self.scope_members
            .get(members as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("Member list {} is out of range", members))
    }

    pub fn global_scope_members(&self) -> Result<&[DeclIndex]> {
        self.scope_members(self.global_scope)
            .context("While looking up the global scope")
    }

    /// Friend declarations of a class scope, empty when it has none.
    pub fn friends_of(&self, scope: DeclIndex) -> &[DeclIndex] {
        self.friendships
            .iter()
            .find(|friendship| friendship.scope == scope)
            .map(|friendship| friendship.friends.as_slice())
            .unwrap_or(&[])
    }

    pub fn scope(&self, decl: DeclIndex) -> Result<&ScopeDecl> {
        decl_row(&self.scopes, decl, DeclSort::Scope)
    }

    pub fn field(&self, decl: DeclIndex) -> Result<&FieldDecl> {
        decl_row(&self.fields, decl, DeclSort::Field)
    }

    pub fn method(&self, decl: DeclIndex) -> Result<&MethodDecl> {
        decl_row(&self.methods, decl, DeclSort::Method)
    }

    pub fn function(&self, decl: DeclIndex) -> Result<&FunctionDecl> {
        decl_row(&self.functions, decl, DeclSort::Function)
    }

    pub fn variable(&self, decl: DeclIndex) -> Result<&VariableDecl> {
        decl_row(&self.variables, decl, DeclSort::Variable)
    }

    pub fn enumeration(&self, decl: DeclIndex) -> Result<&EnumerationDecl> {
        decl_row(&self.enumerations, decl, DeclSort::Enumeration)
    }

    pub fn parameter(&self, decl: DeclIndex) -> Result<&ParameterDecl> {
        decl_row(&self.parameters, decl, DeclSort::Parameter)
    }

    pub fn template(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.templates, decl, DeclSort::Template)
    }

    pub fn intrinsic(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.intrinsics, decl, DeclSort::Intrinsic)
    }

    pub fn alias(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.aliases, decl, DeclSort::Alias)
    }

    pub fn concept(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.concepts, decl, DeclSort::Concept)
    }

    pub fn constructor(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.constructors, decl, DeclSort::Constructor)
    }

    pub fn destructor(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.destructors, decl, DeclSort::Destructor)
    }

    pub fn using_declaration(&self, decl: DeclIndex) -> Result<&AnchoredDecl> {
        decl_row(&self.using_declarations, decl, DeclSort::UsingDeclaration)
    }

    pub fn friend(&self, decl: DeclIndex) -> Result<&FriendDecl> {
        decl_row(&self.friends, decl, DeclSort::Friend)
    }

    pub fn decl_expression(&self, expr: ExprIndex) -> Result<&NamedDeclExpr> {
        if expr.sort != ExprSort::NamedDecl {
            bail!("Expected a NamedDecl expression but got {}", expr);
        }
        self.decl_expressions
            .get(expr.index as usize)
            .ok_or_else(|| anyhow!("Expression {} is out of range", expr))
    }

    pub fn fundamental_type(&self, ty: TypeIndex) -> Result<&FundamentalType> {
        type_row(&self.fundamental_types, ty, TypeSort::Fundamental)
    }

    pub fn designated_type(&self, ty: TypeIndex) -> Result<&DesignatedType> {
        type_row(&self.designated_types, ty, TypeSort::Designated)
    }

    pub fn pointer_type(&self, ty: TypeIndex) -> Result<&PointerType> {
        type_row(&self.pointer_types, ty, TypeSort::Pointer)
    }

    pub fn lvalue_reference(&self, ty: TypeIndex) -> Result<&ReferenceType> {
        type_row(&self.lvalue_references, ty, TypeSort::LvalueReference)
    }

    pub fn rvalue_reference(&self, ty: TypeIndex) -> Result<&ReferenceType> {
        type_row(&self.rvalue_references, ty, TypeSort::RvalueReference)
    }

    pub fn qualified_type(&self, ty: TypeIndex) -> Result<&QualifiedType> {
        type_row(&self.qualified_types, ty, TypeSort::Qualified)
    }

    pub fn base_type(&self, ty: TypeIndex) -> Result<&BaseType> {
        type_row(&self.base_types, ty, TypeSort::Base)
    }

    pub fn placeholder_type(&self, ty: TypeIndex) -> Result<&PlaceholderType> {
        type_row(&self.placeholder_types, ty, TypeSort::Placeholder)
    }

    pub fn tuple_type(&self, ty: TypeIndex) -> Result<&TupleType> {
        type_row(&self.tuple_types, ty, TypeSort::Tuple)
    }

    pub fn function_type(&self, ty: TypeIndex) -> Result<&SignatureType> {
        type_row(&self.function_types, ty, TypeSort::Function)
    }

    pub fn method_type(&self, ty: TypeIndex) -> Result<&SignatureType> {
        type_row(&self.method_types, ty, TypeSort::Method)
    }
}
