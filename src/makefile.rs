use std::io::Write;
use tracing::debug;

/// The template the binary ships with.
pub const MAKEFILE_TEMPLATE: &str = include_str!("../templates/Makefile.tmpl");

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("line {line}: unknown placeholder `{name}`")]
    UnknownPlaceholder { line: usize, name: String },
    #[error("line {line}: unterminated placeholder")]
    Unterminated { line: usize },
}

/// Values substituted into the template.
#[derive(Debug, Clone)]
pub struct MakefileVars<'a> {
    /// Name the tool was invoked as, so the Makefile can call back into it
    pub executable: &'a str,
    pub default_regex: &'a str,
}

impl MakefileVars<'_> {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "Executable" => Some(self.executable),
            "DefaultRegex" => Some(self.default_regex),
            _ => None,
        }
    }
}

/// Renders `{{ .Name }}` placeholders in a Makefile template.
#[derive(Debug, Clone, Copy)]
pub struct Makefile<'t> {
    template: &'t str,
}

impl<'t> Makefile<'t> {
    pub const fn new(template: &'t str) -> Self {
        Self { template }
    }

    pub fn render(&self, vars: &MakefileVars) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;
        let mut line = 1;

        while let Some(start) = rest.find("{{") {
            let (text, tail) = rest.split_at(start);
            out.push_str(text);
            line += text.matches('\n').count();

            let Some(end) = tail.find("}}") else {
                return Err(TemplateError::Unterminated { line });
            };
            let inner = &tail[2..end];
            if inner.contains('\n') {
                return Err(TemplateError::Unterminated { line });
            }

            let name = inner.trim();
            let name = name.strip_prefix('.').unwrap_or(name);
            let value = vars
                .get(name)
                .ok_or_else(|| TemplateError::UnknownPlaceholder {
                    line,
                    name: name.into(),
                })?;
            out.push_str(value);

            rest = &tail[end + 2..];
        }
        out.push_str(rest);

        debug!(bytes = out.len(), "rendered makefile");
        Ok(out)
    }

    pub fn write_to(&self, vars: &MakefileVars, mut out: impl Write) -> Result<(), crate::Error> {
        let rendered = self.render(vars)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
