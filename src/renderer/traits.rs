/// Configuration context for rendering operations
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub depth: usize,
    /// Reflect private members of every exported type, whether or not it
    /// befriends the private access sentinel.
    pub show_private: bool,
    pub format: OutputFormat,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            show_private: false,
            format: OutputFormat::Cpp,
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            show_private: self.show_private,
            format: self.format,
        }
    }

    pub fn with_show_private(&self, show_private: bool) -> Self {
        Self {
            depth: self.depth,
            show_private,
            format: self.format,
        }
    }

    pub fn indent(&self) -> String {
        self.format.indent_unit().repeat(self.depth)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A C++ translation unit registering the types with the reflection runtime.
    Cpp,
    /// Only the `add_type` registrations, without the surrounding unit.
    Registrations,
}

impl OutputFormat {
    pub fn indent_unit(&self) -> &'static str {
        "\t"
    }
}

/// Core rendering trait for registration entries
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}
