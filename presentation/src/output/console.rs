//! Console output formatter for search results

use colored::Colorize;
use serde_json::Value;
use tavily_domain::{OutputFormat, SearchOutput, ToolResult};

/// Formats search results and tool results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI colors for everything formatted afterwards
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format a search output in the requested format
    pub fn format_output(output: &SearchOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// Format a search output as a numbered listing
    pub fn format(output: &SearchOutput) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "{} {}\n",
            "Search:".cyan().bold(),
            output.query
        ));
        text.push_str(&format!("{}\n", "-".repeat(60).cyan()));

        if output.is_empty() {
            text.push_str(&format!("{}\n", "No results found.".yellow()));
            return text;
        }

        for (index, result) in output.results.iter().enumerate() {
            text.push_str(&format!(
                "\n{} {} {}\n",
                format!("{:>2}.", index + 1).bold(),
                result.title.bold(),
                format!("[{:.2}]", result.score).dimmed()
            ));
            text.push_str(&format!("    {}\n", result.url.blue().underline()));
            if !result.content.is_empty() {
                text.push_str(&Self::indent(&result.content, "    "));
                text.push('\n');
            }
        }

        text.push_str(&format!(
            "\n{}\n",
            format!("{} result(s)", output.total_results).dimmed()
        ));

        text
    }

    /// Format a search output as JSON
    pub fn format_json(output: &SearchOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a tool result as JSON, the way a framework would receive it
    pub fn format_tool_result(result: &ToolResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format tool schemas as a JSON array
    pub fn format_schema(schemas: &[Value]) -> String {
        serde_json::to_string_pretty(schemas).unwrap_or_else(|_| "[]".to_string())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
