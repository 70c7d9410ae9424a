//! Spelling of types.
//!
//! Every type reference renders to the text a C++ compiler would accept for
//! it. Sorts the generator does not understand yet do not abort the
//! conversion: they render as a marked placeholder such as
//! `<UNSUPPORTED_TYPE Array>` so the gap is visible in the generated file.

use anyhow::{bail, Context, Result};

use crate::graph::*;

/// Pure pretty-printer over a module graph. Also resolves scope names, see
/// `scopes.rs`.
#[derive(Debug, Clone, Copy)]
pub struct TypeRenderer<'a> {
    pub(crate) graph: &'a ModuleGraph,
}

pub fn unsupported_type(sort: TypeSort) -> String {
    format!("<UNSUPPORTED_TYPE {:?}>", sort)
}

impl<'a> TypeRenderer<'a> {
    pub fn new(graph: &'a ModuleGraph) -> Self {
        Self { graph }
    }

    pub fn render_full_typename(&self, ty: TypeIndex) -> Result<String> {
        let graph = self.graph;
        match ty.sort {
            TypeSort::Fundamental => Ok(self.render_fundamental(graph.fundamental_type(ty)?)),
            TypeSort::Designated => {
                let designated = graph.designated_type(ty)?;
                let namespace = self.render_namespace(designated.decl)?;
                let name = self.render_referred_declaration(designated.decl)?;
                Ok(namespace + &name)
            }
            TypeSort::Pointer => {
                let pointee = graph.pointer_type(ty)?.pointee;
                Ok(self.render_inner(pointee, ty)? + "*")
            }
            TypeSort::LvalueReference => {
                let referee = graph.lvalue_reference(ty)?.referee;
                Ok(self.render_inner(referee, ty)? + "&")
            }
            TypeSort::RvalueReference => {
                let referee = graph.rvalue_reference(ty)?.referee;
                Ok(self.render_inner(referee, ty)? + "&&")
            }
            TypeSort::Qualified => {
                let qualified = graph.qualified_type(ty)?;
                let inner = self.render_inner(qualified.unqualified, ty)?;
                // cv-qualifiers of a pointer belong after the `*`
                if qualified.unqualified.sort == TypeSort::Pointer {
                    Ok(inner + &render_qualifiers_suffix(qualified.qualifiers))
                } else {
                    Ok(render_qualifiers(qualified.qualifiers) + &inner)
                }
            }
            // Only the type name, access is the caller's business
            TypeSort::Base => self.render_inner(graph.base_type(ty)?.ty, ty),
            TypeSort::Placeholder => match graph.placeholder_type(ty)?.elaboration {
                Some(elaboration) => self.render_inner(elaboration, ty),
                None => bail!(
                    "Placeholder type {} has no deduced type, the module was not fully analysed",
                    ty
                ),
            },
            TypeSort::Tuple => self.render_tuple(graph.tuple_type(ty)?),
            TypeSort::Function => self.render_signature(graph.function_type(ty)?),
            TypeSort::Method => self.render_signature(graph.method_type(ty)?),

            TypeSort::Expansion
            | TypeSort::PointerToMember
            | TypeSort::Array
            | TypeSort::Typename
            | TypeSort::Decltype
            | TypeSort::Forall
            | TypeSort::Unaligned
            | TypeSort::VendorExtension
            | TypeSort::Tor
            | TypeSort::Syntactic
            | TypeSort::SyntaxTree => Ok(unsupported_type(ty.sort)),
        }
    }

    fn render_inner(&self, inner: TypeIndex, outer: TypeIndex) -> Result<String> {
        self.render_full_typename(inner)
            .with_context(|| format!("While rendering the type name of {}", outer))
    }

    pub fn render_fundamental(&self, ty: &FundamentalType) -> String {
        let mut rendered = String::with_capacity(16);

        // `signed` is never spelled out
        if ty.sign == TypeSign::Unsigned {
            rendered.push_str("unsigned ");
        }

        match ty.precision {
            TypePrecision::Default => {}
            // The override words replace the whole spelling, sign included
            TypePrecision::Short => return "short".to_string(),
            TypePrecision::Long => rendered.push_str("long "),
            TypePrecision::Bit64 => return "long long".to_string(),
            TypePrecision::Bit8 | TypePrecision::Bit16 | TypePrecision::Bit32
                if ty.basis == TypeBasis::Char =>
            {
                return match ty.precision {
                    TypePrecision::Bit8 => "char8_t",
                    TypePrecision::Bit16 => "char16_t",
                    _ => "char32_t",
                }
                .to_string();
            }
            TypePrecision::Bit8 | TypePrecision::Bit16 | TypePrecision::Bit32 => {}
            TypePrecision::Bit128 => {
                return format!("<UNEXPECTED_BITNESS {:?}>", ty.precision);
            }
        }

        match ty.basis {
            TypeBasis::Void => rendered.push_str("void"),
            TypeBasis::Bool => rendered.push_str("bool"),
            TypeBasis::Char => rendered.push_str("char"),
            TypeBasis::WcharT => rendered.push_str("wchar_t"),
            TypeBasis::Int => rendered.push_str("int"),
            TypeBasis::Float => rendered.push_str("float"),
            TypeBasis::Double => rendered.push_str("double"),
            other => rendered.push_str(&format!("<UNEXPECTED_FUNDAMENTAL_TYPE {:?}>", other)),
        }

        rendered
    }

    pub fn render_tuple(&self, tuple: &TupleType) -> Result<String> {
        let rendered: Vec<String> = tuple
            .elements
            .iter()
            .enumerate()
            .map(|(position, element)| {
                self.render_full_typename(*element)
                    .with_context(|| format!("While rendering tuple element {}", position))
            })
            .collect::<Result<_>>()?;
        Ok(rendered.join(", "))
    }

    /// `"<return> (<params>)"`, the spelling of function and method types.
    pub fn render_signature(&self, signature: &SignatureType) -> Result<String> {
        let return_type = self
            .render_full_typename(signature.target)
            .context("While rendering a return type")?;
        let parameter_types = self.render_parameters(signature)?;
        Ok(format!("{} ({})", return_type, parameter_types))
    }

    /// Parameter list of a signature, empty when it takes no parameters.
    pub fn render_parameters(&self, signature: &SignatureType) -> Result<String> {
        match signature.source {
            Some(source) => self
                .render_full_typename(source)
                .context("While rendering parameter types"),
            None => Ok(String::new()),
        }
    }
}

pub fn render_qualifiers(qualifiers: Qualifiers) -> String {
    let mut rendered = String::with_capacity("const volatile ".len());
    if qualifiers.contains(Qualifiers::CONST) {
        rendered.push_str("const ");
    }
    if qualifiers.contains(Qualifiers::VOLATILE) {
        rendered.push_str("volatile ");
    }
    // restrict has no spelling in the generated code
    rendered
}

fn render_qualifiers_suffix(qualifiers: Qualifiers) -> String {
    let mut rendered = String::new();
    if qualifiers.contains(Qualifiers::CONST) {
        rendered.push_str(" const");
    }
    if qualifiers.contains(Qualifiers::VOLATILE) {
        rendered.push_str(" volatile");
    }
    rendered
}
