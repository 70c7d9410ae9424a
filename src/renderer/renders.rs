use crate::renderer::components::*;
use crate::renderer::traits::*;

impl Render for FieldEntry {
    fn render(&self, _context: &RenderContext) -> String {
        format!(
            r#"Field::create<{0}, {1}, &{0}::{2}>("{2}", {3})"#,
            self.owner, self.field_type, self.name, self.access
        )
    }
}

impl Render for MethodEntry {
    fn render(&self, _context: &RenderContext) -> String {
        let mut template_arguments = format!("&{0}::{1}, {0}, {2}", self.owner, self.name, self.return_type);

        // No separator for parameterless methods
        if !self.parameter_types.is_empty() {
            template_arguments.push_str(", ");
            template_arguments.push_str(&self.parameter_types);
        }

        format!(
            r#"Method::create<{}>("{}", {})"#,
            template_arguments, self.name, self.access
        )
    }
}

impl Render for BaseEntry {
    fn render(&self, _context: &RenderContext) -> String {
        format!("BaseClass{{ get_id<{}>(), {} }}", self.base_type, self.access)
    }
}

/// Brace-enclosed, comma separated list of rendered entries.
pub fn render_entry_list<T: Render>(entries: &[T], context: &RenderContext) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let rendered: Vec<String> = entries.iter().map(|entry| entry.render(context)).collect();
    format!("{{ {} }}", rendered.join(", "))
}

impl Render for TypeRegistration {
    fn render(&self, context: &RenderContext) -> String {
        let indent = context.indent();
        let inner = context.with_depth(context.depth + 1).indent();

        let mut output = String::new();
        output.push_str(&format!(
            "{}add_type({{ \"{}\", get_id<{}>(),\n",
            indent, self.name, self.name
        ));
        output.push_str(&format!("{}{},\n", inner, render_entry_list(&self.bases, context)));
        output.push_str(&format!("{}{},\n", inner, render_entry_list(&self.fields, context)));
        output.push_str(&format!("{}{}\n", inner, render_entry_list(&self.methods, context)));
        output.push_str(&format!("{}}});\n", indent));
        output
    }
}
