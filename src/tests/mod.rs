#[cfg(test)]
mod rendering_tests {
    use crate::{
        AccessTag, BaseEntry, CodeGenerator, FieldEntry, MethodEntry, ModuleGraph,
        ModuleGraphBuilder, OutputFormat, Render, RenderContext, TypeRegistration,
    };
    use crate::graph::{Access, ExprSort, TypeBasis, TypeSort, UnitSort};

    fn registrations(graph: &ModuleGraph) -> Vec<TypeRegistration> {
        registrations_with(graph, RenderContext::new())
    }

    fn registrations_with(graph: &ModuleGraph, context: RenderContext) -> Vec<TypeRegistration> {
        let mut generator = CodeGenerator::new(graph, context);
        generator.scan_global_scope().unwrap();
        generator.registrations().to_vec()
    }

    /// struct S { int x; private: double y; }
    fn struct_with_private_field(grant_access: bool) -> ModuleGraph {
        let mut builder = ModuleGraphBuilder::new("Shapes");
        let s = builder.structure(None, "S");
        let int = builder.fundamental(TypeBasis::Int);
        let double = builder.fundamental(TypeBasis::Double);
        builder.field(s, "x", int, Access::Public);
        builder.field(s, "y", double, Access::Private);
        if grant_access {
            builder.grant_private_access(s);
        }
        builder.build()
    }

    #[test]
    fn test_private_field_is_omitted_without_sentinel() {
        let graph = struct_with_private_field(false);
        let types = registrations(&graph);

        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "S");
        assert_eq!(
            types[0].fields,
            vec![FieldEntry {
                owner: "S".to_string(),
                field_type: "int".to_string(),
                name: "x".to_string(),
                access: AccessTag::Public,
            }]
        );

        let rendered = types[0].render(&RenderContext::new());
        assert!(rendered.contains(r#"Field::create<S, int, &S::x>("x", Neat::Access::Public)"#));
        assert!(!rendered.contains("&S::y"));
    }

    #[test]
    fn test_private_field_is_reflected_with_sentinel() {
        let graph = struct_with_private_field(true);
        let types = registrations(&graph);

        assert_eq!(types.len(), 1);
        let fields = &types[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "x");
        assert_eq!(fields[0].access, AccessTag::Public);
        assert_eq!(fields[1].name, "y");
        assert_eq!(fields[1].field_type, "double");
        assert_eq!(fields[1].access, AccessTag::Private);
    }

    #[test]
    fn test_show_private_overrides_missing_sentinel() {
        let graph = struct_with_private_field(false);
        let types = registrations_with(&graph, RenderContext::new().with_show_private(true));
        assert_eq!(types[0].fields.len(), 2);
    }

    #[test]
    fn test_class_with_public_base_and_method() {
        let mut builder = ModuleGraphBuilder::new("Numbers");
        let a = builder.structure(None, "A");
        let b = builder.class(None, "B");
        let a_type = builder.designated(a);
        let base = builder.base(a_type, Access::Public);
        builder.set_base(b, base);
        let int = builder.fundamental(TypeBasis::Int);
        let get_42 = builder.method_type(int, None);
        builder.method(b, "get_42", get_42, Access::Public);
        let graph = builder.build();

        let types = registrations(&graph);
        assert_eq!(types.len(), 2);

        let class_b = &types[1];
        assert_eq!(class_b.name, "B");
        assert_eq!(
            class_b.bases,
            vec![BaseEntry {
                base_type: "A".to_string(),
                access: AccessTag::Public,
            }]
        );
        assert_eq!(
            class_b.methods,
            vec![MethodEntry {
                owner: "B".to_string(),
                name: "get_42".to_string(),
                return_type: "int".to_string(),
                parameter_types: String::new(),
                access: AccessTag::Public,
            }]
        );
        assert!(class_b
            .render(&RenderContext::new())
            .contains(r#"Method::create<&B::get_42, B, int>("get_42", Neat::Access::Public)"#));
    }

    #[test]
    fn test_unspecified_base_access_follows_container() {
        let mut builder = ModuleGraphBuilder::new("Bases");
        let a = builder.structure(None, "A");
        let a_type = builder.designated(a);
        let class_base = builder.base(a_type, Access::None);
        let struct_base = builder.base(a_type, Access::None);
        let c = builder.class(None, "C");
        builder.set_base(c, class_base);
        let s = builder.structure(None, "S");
        builder.set_base(s, struct_base);
        let graph = builder.build();

        let types = registrations(&graph);
        assert_eq!(types[1].bases[0].access, AccessTag::Private);
        assert_eq!(types[2].bases[0].access, AccessTag::Public);
    }

    #[test]
    fn test_tuple_of_bases() {
        let mut builder = ModuleGraphBuilder::new("Bases");
        let a = builder.structure(None, "A");
        let b = builder.structure(None, "B");
        let a_type = builder.designated(a);
        let b_type = builder.designated(b);
        let a_base = builder.base(a_type, Access::Public);
        let b_base = builder.base(b_type, Access::Protected);
        let bases = builder.tuple(vec![a_base, b_base]);
        let c = builder.structure(None, "C");
        builder.set_base(c, bases);
        let graph = builder.build();

        let types = registrations(&graph);
        let bases: Vec<_> = types[2]
            .bases
            .iter()
            .map(|base| (base.base_type.as_str(), base.access))
            .collect();
        assert_eq!(bases, vec![("A", AccessTag::Public), ("B", AccessTag::Protected)]);
    }

    #[test]
    fn test_unsupported_parameter_type_is_marked() {
        let mut builder = ModuleGraphBuilder::new("Buffers");
        let buffer = builder.structure(None, "Buffer");
        let void = builder.fundamental(TypeBasis::Void);
        let int = builder.fundamental(TypeBasis::Int);
        let array = builder.opaque_type(TypeSort::Array);
        let parameters = builder.tuple(vec![array, int]);
        let fill = builder.method_type(void, Some(parameters));
        builder.method(buffer, "fill", fill, Access::Public);
        let graph = builder.build();

        let types = registrations(&graph);
        assert_eq!(
            types[0].methods[0].parameter_types,
            "<UNSUPPORTED_TYPE Array>, int"
        );
    }

    #[test]
    fn test_namespaces_qualify_type_names() {
        let mut builder = ModuleGraphBuilder::new("Game");
        let game = builder.namespace(None, "game");
        let detail = builder.namespace(Some(game), "detail");
        let player = builder.structure(Some(detail), "Player");
        let int = builder.fundamental(TypeBasis::Int);
        builder.field(player, "health", int, Access::Public);
        let graph = builder.build();

        let types = registrations(&graph);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "game::detail::Player");
        assert_eq!(types[0].fields[0].owner, "game::detail::Player");
    }

    #[test]
    fn test_unions_and_non_exported_types_are_skipped() {
        let mut builder = ModuleGraphBuilder::new("Skips");
        builder.scope(None, "Bits", crate::graph::ScopeKind::Union);
        let hidden = builder.structure(None, "Hidden");
        builder.set_exported(hidden, false);
        builder.structure(None, "Visible");
        let graph = builder.build();

        let names: Vec<_> = registrations(&graph).into_iter().map(|ty| ty.name).collect();
        assert_eq!(names, vec!["Visible".to_string()]);
    }

    #[test]
    fn test_sentinel_with_parameters_does_not_grant_access() {
        let mut builder = ModuleGraphBuilder::new("Shapes");
        let s = builder.structure(None, "S");
        let double = builder.fundamental(TypeBasis::Double);
        builder.field(s, "y", double, Access::Private);

        let neat = builder.namespace(None, "Neat");
        let void = builder.fundamental(TypeBasis::Void);
        let int = builder.fundamental(TypeBasis::Int);
        let takes_int = builder.function_type(void, Some(int));
        let impostor = builder.function(Some(neat), "reflect_private_members", takes_int);
        builder.friend_declaration(s, impostor, takes_int);
        let graph = builder.build();

        let types = registrations(&graph);
        assert!(types[0].fields.is_empty());
    }

    #[test]
    fn test_template_id_friend_is_skipped() {
        let mut builder = ModuleGraphBuilder::new("Shapes");
        let s = builder.structure(None, "S");
        let double = builder.fundamental(TypeBasis::Double);
        builder.field(s, "y", double, Access::Private);
        builder.friend_expression(s, ExprSort::TemplateId);
        builder.grant_private_access(s);
        let graph = builder.build();

        let types = registrations(&graph);
        assert_eq!(types[0].fields.len(), 1);
    }

    #[test]
    fn test_unspecified_member_access_is_private_to_the_generator() {
        let mut builder = ModuleGraphBuilder::new("Defaults");
        let c = builder.class(None, "C");
        let int = builder.fundamental(TypeBasis::Int);
        builder.field(c, "value", int, Access::None);
        let graph = builder.build();
        assert!(registrations(&graph)[0].fields.is_empty());

        let types = registrations_with(&graph, RenderContext::new().with_show_private(true));
        assert_eq!(types[0].fields[0].access, AccessTag::Private);
    }

    #[test]
    fn test_method_with_function_type_fails() {
        let mut builder = ModuleGraphBuilder::new("Broken");
        let s = builder.structure(None, "S");
        let void = builder.fundamental(TypeBasis::Void);
        let not_a_method = builder.function_type(void, None);
        builder.method(s, "run", not_a_method, Access::Public);
        let graph = builder.build();

        let mut generator = CodeGenerator::new(&graph, RenderContext::new());
        let err = generator.scan_global_scope().unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Expected a method type"));
        assert!(message.contains("While rendering method 'run'"));
        assert!(message.contains("While rendering the members of 'S'"));
    }

    #[test]
    fn test_base_list_with_non_base_element_fails() {
        let mut builder = ModuleGraphBuilder::new("Broken");
        let int = builder.fundamental(TypeBasis::Int);
        let bases = builder.tuple(vec![int]);
        let s = builder.structure(None, "S");
        builder.set_base(s, bases);
        let graph = builder.build();

        let mut generator = CodeGenerator::new(&graph, RenderContext::new());
        let err = generator.scan_global_scope().unwrap_err();
        assert!(format!("{:#}", err).contains("Unexpected Fundamental type in a list of base classes"));
    }

    #[test]
    fn test_partition_units_are_rejected() {
        let mut builder = ModuleGraphBuilder::new("Game:Part");
        builder.unit_sort(UnitSort::Partition);
        let graph = builder.build();

        let err = CodeGenerator::new(&graph, RenderContext::new())
            .generate()
            .unwrap_err();
        assert!(err.to_string().contains("Only primary module interface units"));
    }

    #[test]
    fn test_generate_wraps_registrations() {
        let graph = struct_with_private_field(false);

        let unit = CodeGenerator::new(&graph, RenderContext::new())
            .generate()
            .unwrap();
        assert!(unit.contains("import Shapes;"));
        assert!(unit.contains("\t\tadd_type({ \"S\", get_id<S>(),\n"));

        let mut context = RenderContext::new();
        context.format = OutputFormat::Registrations;
        let code = CodeGenerator::new(&graph, context).generate().unwrap();
        assert!(code.starts_with("add_type({ \"S\", get_id<S>(),\n"));
        assert!(!code.contains("import"));
    }

    #[test]
    fn test_builder_sentinel_is_recognised() {
        let mut builder = ModuleGraphBuilder::new("Shapes");
        let sentinel = builder.private_access_sentinel();
        let graph = builder.build();

        let types = crate::TypeRenderer::new(&graph);
        let name = types.qualified_name(sentinel).unwrap();
        assert!(crate::is_private_access_sentinel(&name), "{}", name);

        let signature = graph.function(sentinel).unwrap().ty;
        assert_eq!(
            types.render_full_typename(signature).unwrap(),
            crate::PRIVATE_ACCESS_SIGNATURE
        );
    }

    #[test]
    fn test_root_reexports_both_types_modules() {
        // Items from graph::types and renderer::types resolve at the root
        let graph = ModuleGraphBuilder::new("M").build();
        let renderer: crate::TypeRenderer = crate::renderer::types::TypeRenderer::new(&graph);
        let sort: crate::TypeSort = crate::graph::types::TypeSort::Array;
        assert_eq!(crate::unsupported_type(sort), "<UNSUPPORTED_TYPE Array>");
        assert!(renderer.render_namespace(crate::DeclIndex::new(crate::DeclSort::Parameter, 0)).is_err());
    }
}
