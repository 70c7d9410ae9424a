use serde::{Deserialize, Serialize};
use std::fmt;

// Tagged references into the module graph tables

/// Sort of a declaration reference. Every sort the interface format knows is
/// listed so that matches over it stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclSort {
    VendorExtension,
    Enumerator,
    Variable,
    Parameter,
    Field,
    Bitfield,
    Scope,
    Enumeration,
    Alias,
    Temploid,
    Template,
    PartialSpecialization,
    ExplicitSpecialization,
    ExplicitInstantiation,
    Concept,
    Function,
    Method,
    Constructor,
    InheritedConstructor,
    Destructor,
    Reference,
    UsingDeclaration,
    UsingDirective,
    Friend,
    Expansion,
    DeductionGuide,
    Barren,
    Tuple,
    SyntaxTree,
    Intrinsic,
    Property,
    OutputSegment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSort {
    VendorExtension,
    Fundamental,
    Designated,
    Tor,
    Syntactic,
    Expansion,
    Pointer,
    PointerToMember,
    LvalueReference,
    RvalueReference,
    Function,
    Method,
    Array,
    Typename,
    Qualified,
    Base,
    Decltype,
    Placeholder,
    Tuple,
    Forall,
    Unaligned,
    SyntaxTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprSort {
    VendorExtension,
    Empty,
    Literal,
    Lambda,
    Type,
    NamedDecl,
    UnresolvedId,
    TemplateId,
    UnqualifiedId,
    SimpleIdentifier,
    Pointer,
    QualifiedName,
    Path,
    Read,
    Monad,
    Dyad,
    Triad,
    String,
    Temporary,
    Call,
    MemberInitializer,
    MemberAccess,
    InheritancePath,
    InitializerList,
    Cast,
    Condition,
    ExpressionList,
    SizeofType,
    Alignof,
    Label,
    Typeid,
    DestructorCall,
    SyntaxTree,
    FunctionString,
    CompoundString,
    StringSequence,
    Initializer,
    Requires,
    UnaryFold,
    BinaryFold,
    HierarchyConversion,
    ProductTypeValue,
    SumTypeValue,
    PackedTemplateArguments,
    Tuple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameSort {
    Identifier,
    Operator,
    Conversion,
    Literal,
    Template,
    Specialization,
    SourceFile,
    Guide,
}

/// Reference to a declaration: which table (`sort`) and the row in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclIndex {
    pub sort: DeclSort,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIndex {
    pub sort: TypeSort,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprIndex {
    pub sort: ExprSort,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameIndex {
    pub sort: NameSort,
    pub index: u32,
}

/// Position of an interned string in the module's string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextOffset(pub u32);

impl DeclIndex {
    pub fn new(sort: DeclSort, index: u32) -> Self {
        Self { sort, index }
    }
}

impl TypeIndex {
    pub fn new(sort: TypeSort, index: u32) -> Self {
        Self { sort, index }
    }
}

impl ExprIndex {
    pub fn new(sort: ExprSort, index: u32) -> Self {
        Self { sort, index }
    }
}

impl NameIndex {
    pub fn identifier(offset: TextOffset) -> Self {
        Self {
            sort: NameSort::Identifier,
            index: offset.0,
        }
    }
}

impl fmt::Display for DeclIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.sort, self.index)
    }
}

impl fmt::Display for TypeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.sort, self.index)
    }
}

impl fmt::Display for ExprIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.sort, self.index)
    }
}

// Attributes

/// Member access as stored in the graph. `None` means no access was written,
/// which only happens on direct class/struct members and bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Access {
    #[default]
    None,
    Private,
    Protected,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeKind {
    Class,
    Struct,
    Union,
    Namespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeBasis {
    Void,
    Bool,
    Char,
    #[serde(rename = "Wchar_t")]
    WcharT,
    Int,
    Float,
    Double,
    Nullptr,
    Ellipsis,
    SegmentType,
    Class,
    Struct,
    Union,
    Enum,
    Typename,
    Namespace,
    Interface,
    Function,
    Empty,
    VariableTemplate,
    Concept,
    Auto,
    DecltypeAuto,
    Overload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypePrecision {
    #[default]
    Default,
    Short,
    Long,
    Bit8,
    Bit16,
    Bit32,
    Bit64,
    Bit128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeSign {
    #[default]
    Plain,
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSort {
    Source,
    #[default]
    Primary,
    Partition,
    Header,
    ExportedTU,
}

/// cv-qualifier bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qualifiers(pub u8);

impl Qualifiers {
    pub const NONE: Qualifiers = Qualifiers(0);
    pub const CONST: Qualifiers = Qualifiers(1 << 0);
    pub const VOLATILE: Qualifiers = Qualifiers(1 << 1);
    pub const RESTRICT: Qualifiers = Qualifiers(1 << 2);

    pub fn contains(self, other: Qualifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Qualifiers) -> Qualifiers {
        Qualifiers(self.0 | other.0)
    }
}

/// Declaration specifier bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasicSpecifiers(pub u8);

impl BasicSpecifiers {
    pub const CXX: BasicSpecifiers = BasicSpecifiers(0);
    pub const C: BasicSpecifiers = BasicSpecifiers(1 << 0);
    pub const INTERNAL: BasicSpecifiers = BasicSpecifiers(1 << 1);
    pub const VAGUE: BasicSpecifiers = BasicSpecifiers(1 << 2);
    pub const EXTERNAL: BasicSpecifiers = BasicSpecifiers(1 << 3);
    pub const DEPRECATED: BasicSpecifiers = BasicSpecifiers(1 << 4);
    pub const INITIALIZED_IN_CLASS: BasicSpecifiers = BasicSpecifiers(1 << 5);
    pub const NON_EXPORTED: BasicSpecifiers = BasicSpecifiers(1 << 6);
    pub const IS_MEMBER_OF_GLOBAL_MODULE: BasicSpecifiers = BasicSpecifiers(1 << 7);

    pub fn contains(self, other: BasicSpecifiers) -> bool {
        self.0 & other.0 == other.0
    }
}

// Declaration records

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub name: String,
    #[serde(default)]
    pub sort: UnitSort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeDecl {
    pub name: NameIndex,
    pub kind: ScopeKind,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
    /// Null, a single `Base` type or a `Tuple` of them.
    #[serde(default)]
    pub base: Option<TypeIndex>,
    /// Row in `scope_members`, absent for incomplete scopes.
    #[serde(default)]
    pub members: Option<u32>,
    #[serde(default)]
    pub specifiers: BasicSpecifiers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: TextOffset,
    #[serde(rename = "type")]
    pub ty: TypeIndex,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: NameIndex,
    #[serde(rename = "type")]
    pub ty: TypeIndex,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: NameIndex,
    #[serde(rename = "type")]
    pub ty: TypeIndex,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: NameIndex,
    #[serde(rename = "type")]
    pub ty: TypeIndex,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationDecl {
    pub name: TextOffset,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
    #[serde(default)]
    pub specifiers: BasicSpecifiers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: TextOffset,
    #[serde(rename = "type")]
    pub ty: TypeIndex,
}

/// Record shape shared by the declaration sorts that only matter here as
/// links in a home-scope chain (templates, aliases, concepts, intrinsics,
/// constructors, destructors, using-declarations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchoredDecl {
    pub name: NameIndex,
    #[serde(default)]
    pub home_scope: Option<DeclIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendDecl {
    pub entity: ExprIndex,
}

/// Expression naming a resolved declaration, as found in friend entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedDeclExpr {
    pub resolution: DeclIndex,
    #[serde(rename = "type")]
    pub ty: TypeIndex,
}

/// Friend declarations attached to a class or struct scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub scope: DeclIndex,
    pub friends: Vec<DeclIndex>,
}

// Type records

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundamentalType {
    pub basis: TypeBasis,
    #[serde(default)]
    pub precision: TypePrecision,
    #[serde(default)]
    pub sign: TypeSign,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignatedType {
    pub decl: DeclIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerType {
    pub pointee: TypeIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceType {
    pub referee: TypeIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualifiedType {
    pub unqualified: TypeIndex,
    pub qualifiers: Qualifiers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseType {
    #[serde(rename = "type")]
    pub ty: TypeIndex,
    #[serde(default)]
    pub access: Access,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderType {
    /// The deduced type. Always present in a fully analysed module.
    #[serde(default)]
    pub elaboration: Option<TypeIndex>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TupleType {
    pub elements: Vec<TypeIndex>,
}

/// Shared by function and method types: `target` is the return type and
/// `source` the parameter list (a single type or a tuple).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureType {
    pub target: TypeIndex,
    #[serde(default)]
    pub source: Option<TypeIndex>,
}
