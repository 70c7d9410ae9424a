/// Wrap the rendered registrations into the translation unit compiled next to
/// the module. Registration runs from a static initialiser, inside the
/// `Neat::reflect_private_members` friend so private members are reachable.
pub fn render_translation_unit(module_name: &str, registrations: &str) -> String {
    let body: Vec<String> = registrations
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("\t\t{}", line)
            }
        })
        .collect();

    format!(
        r#"// ================================================================================
//                      AUTO GENERATED REFLECTION DATA FILE
//                             Generated by: neatgen
//
//       Don't modify this file, it will be overwritten when a change is made.
// ================================================================================

#include "Neat/Reflection.h"
#include "Neat/TemplateTypeId.h"

import {0};


namespace Neat
{{
	static void reflect_private_members()
	{{
{1}
	}}

	namespace Detail
	{{
		struct Register{{ Register(){{ Neat::reflect_private_members(); }} }};
		static Register neat_reflection_data_initialiser{{ }};
	}}
}}
"#,
        module_name,
        body.join("\n")
    )
}
