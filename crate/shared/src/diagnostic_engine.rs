use colored::Colorize;
use minic_error::{ErrorCode, LineInfo};
use minic_ir::SourceLocation;

/// A renderable diagnostic collected from a pipeline run
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Name of the stage that produced the failure
    pub stage: String,
    /// The structured error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Source position, when the failure refers to one
    pub location: Option<SourceLocation>,
}

/// Collects diagnostics and renders them to stderr with source context
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    file_name: Option<String>,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        DiagnosticEngine::new()
    }
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            file_name: None,
        }
    }

    pub fn set_file_name(&mut self, file_name: String) {
        self.file_name = Some(file_name);
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Renders every collected diagnostic, with a source excerpt and caret
    /// when the diagnostic carries a position.
    pub fn report_all(&self, source: &str) {
        let line_info = LineInfo::new(source);
        for diagnostic in &self.diagnostics {
            self.report_diagnostic(diagnostic, &line_info);
        }
        self.report_summary();
    }

    fn report_diagnostic(&self, diagnostic: &Diagnostic, line_info: &LineInfo) {
        eprintln!(
            "{} {} {}: {}",
            "error".red().bold(),
            diagnostic.code.to_string().bold(),
            diagnostic.stage,
            diagnostic.message
        );

        let Some(location) = diagnostic.location else {
            eprintln!();
            return;
        };

        let file_name = self.file_name.as_deref().unwrap_or("<input>");
        eprintln!(
            "  {} {}:{}:{}",
            "-->".yellow(),
            file_name,
            location.line,
            location.column
        );

        if let Some(line_text) = line_info.get_line_text(location.line) {
            let line_num_str = format!("{}", location.line);
            let indent = " ".repeat(line_num_str.len() + 1);
            let pipe = "|".yellow();

            eprintln!("{indent}{}", pipe);
            eprintln!("{} {} {}", line_num_str.yellow(), pipe, line_text);

            let marker =
                " ".repeat(location.column.saturating_sub(1)) + &"^".bold().red().to_string();
            eprintln!("{indent}{} {}", pipe, marker);
        }
        eprintln!();
    }

    fn report_summary(&self) {
        let count = self.diagnostics.len();
        if count > 0 {
            let noun = if count == 1 { "error" } else { "errors" };
            eprintln!(
                "Compilation finished with {}",
                format!("{} {}", count, noun).red()
            );
        }
    }
}
