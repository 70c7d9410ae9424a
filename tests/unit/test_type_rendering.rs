use neatgen::{
    Access, ModuleGraphBuilder, Qualifiers, TypeBasis, TypePrecision, TypeRenderer, TypeSign,
    TypeSort,
};

#[test]
fn test_sized_integers() {
    let mut builder = ModuleGraphBuilder::new("M");
    let unsigned_short = builder.fundamental_with(TypeBasis::Int, TypePrecision::Short, TypeSign::Unsigned);
    let long_long = builder.fundamental_with(TypeBasis::Int, TypePrecision::Bit64, TypeSign::Plain);
    let unsigned_long_long = builder.fundamental_with(TypeBasis::Int, TypePrecision::Bit64, TypeSign::Unsigned);
    let unsigned_long = builder.fundamental_with(TypeBasis::Int, TypePrecision::Long, TypeSign::Unsigned);
    let long_double = builder.fundamental_with(TypeBasis::Double, TypePrecision::Long, TypeSign::Plain);
    let signed_int = builder.fundamental_with(TypeBasis::Int, TypePrecision::Default, TypeSign::Signed);
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    // short and long long replace the sign as well as the basis
    assert_eq!(types.render_full_typename(unsigned_short).unwrap(), "short");
    assert_eq!(types.render_full_typename(long_long).unwrap(), "long long");
    assert_eq!(types.render_full_typename(unsigned_long_long).unwrap(), "long long");
    assert_eq!(types.render_full_typename(unsigned_long).unwrap(), "unsigned long int");
    assert_eq!(types.render_full_typename(long_double).unwrap(), "long double");
    assert_eq!(types.render_full_typename(signed_int).unwrap(), "int");
}

#[test]
fn test_character_types() {
    let mut builder = ModuleGraphBuilder::new("M");
    let char8 = builder.fundamental_with(TypeBasis::Char, TypePrecision::Bit8, TypeSign::Plain);
    let char16 = builder.fundamental_with(TypeBasis::Char, TypePrecision::Bit16, TypeSign::Plain);
    let char32 = builder.fundamental_with(TypeBasis::Char, TypePrecision::Bit32, TypeSign::Plain);
    let signed_char = builder.fundamental_with(TypeBasis::Char, TypePrecision::Default, TypeSign::Signed);
    let wide = builder.fundamental(TypeBasis::WcharT);
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(char8).unwrap(), "char8_t");
    assert_eq!(types.render_full_typename(char16).unwrap(), "char16_t");
    assert_eq!(types.render_full_typename(char32).unwrap(), "char32_t");
    assert_eq!(types.render_full_typename(signed_char).unwrap(), "char");
    assert_eq!(types.render_full_typename(wide).unwrap(), "wchar_t");
}

#[test]
fn test_pointers_and_references() {
    let mut builder = ModuleGraphBuilder::new("M");
    let int = builder.fundamental(TypeBasis::Int);
    let pointer = builder.pointer(int);
    let pointer_to_pointer = builder.pointer(pointer);
    let lvalue = builder.lvalue_reference(int);
    let rvalue = builder.rvalue_reference(int);
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(pointer).unwrap(), "int*");
    assert_eq!(types.render_full_typename(pointer_to_pointer).unwrap(), "int**");
    assert_eq!(types.render_full_typename(lvalue).unwrap(), "int&");
    assert_eq!(types.render_full_typename(rvalue).unwrap(), "int&&");
}

#[test]
fn test_qualified_types() {
    let mut builder = ModuleGraphBuilder::new("M");
    let char_type = builder.fundamental(TypeBasis::Char);
    let const_char = builder.qualified(char_type, Qualifiers::CONST);
    let string = builder.pointer(const_char);
    let const_string = builder.qualified(string, Qualifiers::CONST);
    let cv = builder.qualified(char_type, Qualifiers::CONST.union(Qualifiers::VOLATILE));
    let restricted = builder.qualified(string, Qualifiers::RESTRICT);
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(const_char).unwrap(), "const char");
    assert_eq!(types.render_full_typename(string).unwrap(), "const char*");
    assert_eq!(types.render_full_typename(const_string).unwrap(), "const char* const");
    assert_eq!(types.render_full_typename(cv).unwrap(), "const volatile char");
    assert_eq!(types.render_full_typename(restricted).unwrap(), "const char*");
}

#[test]
fn test_designated_types_are_qualified() {
    let mut builder = ModuleGraphBuilder::new("M");
    let outer = builder.namespace(None, "outer");
    let inner = builder.namespace(Some(outer), "inner");
    let widget = builder.class(Some(inner), "Widget");
    let color = builder.enumeration(Some(outer), "Color");
    let widget_type = builder.designated(widget);
    let color_type = builder.designated(color);
    let widget_ref = builder.lvalue_reference(widget_type);
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(widget_type).unwrap(), "outer::inner::Widget");
    assert_eq!(types.render_full_typename(color_type).unwrap(), "outer::Color");
    assert_eq!(types.render_full_typename(widget_ref).unwrap(), "outer::inner::Widget&");
}

#[test]
fn test_signatures() {
    let mut builder = ModuleGraphBuilder::new("M");
    let void = builder.fundamental(TypeBasis::Void);
    let int = builder.fundamental(TypeBasis::Int);
    let double = builder.fundamental(TypeBasis::Double);
    let pair = builder.tuple(vec![int, double]);
    let no_params = builder.function_type(void, None);
    let one_param = builder.function_type(int, Some(double));
    let two_params = builder.method_type(void, Some(pair));
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(no_params).unwrap(), "void ()");
    assert_eq!(types.render_full_typename(one_param).unwrap(), "int (double)");
    assert_eq!(types.render_full_typename(two_params).unwrap(), "void (int, double)");
    assert_eq!(types.render_full_typename(pair).unwrap(), "int, double");
}

#[test]
fn test_base_and_placeholder_render_their_inner_type() {
    let mut builder = ModuleGraphBuilder::new("M");
    let parent = builder.structure(None, "Parent");
    let parent_type = builder.designated(parent);
    let base = builder.base(parent_type, Access::Protected);
    let int = builder.fundamental(TypeBasis::Int);
    let deduced = builder.placeholder(Some(int));
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(base).unwrap(), "Parent");
    assert_eq!(types.render_full_typename(deduced).unwrap(), "int");
}

#[test]
fn test_unsupported_sorts_render_as_markers() {
    let mut builder = ModuleGraphBuilder::new("M");
    let array = builder.opaque_type(TypeSort::Array);
    let member_pointer = builder.opaque_type(TypeSort::PointerToMember);
    let typename = builder.opaque_type(TypeSort::Typename);
    let pointer_to_array = builder.pointer(array);
    let nullptr = builder.fundamental(TypeBasis::Nullptr);
    let huge = builder.fundamental_with(TypeBasis::Int, TypePrecision::Bit128, TypeSign::Plain);
    let graph = builder.build();
    let types = TypeRenderer::new(&graph);

    assert_eq!(types.render_full_typename(array).unwrap(), "<UNSUPPORTED_TYPE Array>");
    assert_eq!(
        types.render_full_typename(member_pointer).unwrap(),
        "<UNSUPPORTED_TYPE PointerToMember>"
    );
    assert_eq!(types.render_full_typename(typename).unwrap(), "<UNSUPPORTED_TYPE Typename>");
    assert_eq!(
        types.render_full_typename(pointer_to_array).unwrap(),
        "<UNSUPPORTED_TYPE Array>*"
    );
    assert_eq!(
        types.render_full_typename(nullptr).unwrap(),
        "<UNEXPECTED_FUNDAMENTAL_TYPE Nullptr>"
    );
    assert_eq!(types.render_full_typename(huge).unwrap(), "<UNEXPECTED_BITNESS Bit128>");
}
