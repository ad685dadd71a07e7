// VDB - Visual Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Plain-text rendering of session views.

use std::fmt::Write;

use vdb_common::types::{render_value_truncated, ComplexityReport, StepEvent};
use vdb_engine::{ComplexitySource, ExecutionStatistics, SessionView, ViewNode};

use crate::config::DisplayConfig;

const GRAY: &str = "90";
const CYAN: &str = "36";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";
const BOLD: &str = "1";

/// ANSI styling, or none at all
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    /// A palette that colors when `color` is set
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

/// Renders views with one palette and display settings
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    display: DisplayConfig,
}

impl Renderer {
    /// Create a renderer
    pub fn new(palette: Palette, display: DisplayConfig) -> Self {
        Self { palette, display }
    }

    fn value(&self, value: &serde_json::Value) -> String {
        render_value_truncated(value, self.display.max_value_width)
    }

    /// Call tree with box-drawing connectors
    pub fn tree(&self, root: Option<&ViewNode>) -> String {
        let mut out = String::new();
        match root {
            None => {
                out.push_str(&self.palette.paint(GRAY, "(no calls to show)"));
                out.push('\n');
            }
            Some(root) => self.tree_node(&mut out, root, "", None),
        }
        out
    }

    /// `last` is `None` for the root, which gets no connector
    fn tree_node(&self, out: &mut String, node: &ViewNode, prefix: &str, last: Option<bool>) {
        let connector = match last {
            None => "",
            Some(true) => "└── ",
            Some(false) => "├── ",
        };
        let label = if node.current {
            self.palette.paint(BOLD, &format!("▶ {}", node.label))
        } else if node.active {
            self.palette.paint(YELLOW, &node.label)
        } else if node.is_synthetic_root() {
            self.palette.paint(GRAY, &node.label)
        } else {
            node.label.clone()
        };
        let branch = self.palette.paint(GRAY, &format!("{prefix}{connector}"));
        let _ = write!(out, "{branch}{label}");
        if let Some(value) = &node.return_value {
            let returned = format!("→ {}", self.value(value));
            let _ = write!(out, " {}", self.palette.paint(GREEN, &returned));
        }
        out.push('\n');

        let child_prefix = match last {
            None => String::new(),
            Some(true) => format!("{prefix}    "),
            Some(false) => format!("{prefix}│   "),
        };
        for (i, child) in node.children.iter().enumerate() {
            self.tree_node(out, child, &child_prefix, Some(i + 1 == node.children.len()));
        }
    }

    /// One-line summary of the cursor position
    pub fn status(&self, view: &SessionView) -> String {
        let Some(step) = &view.step else {
            return self.palette.paint(GRAY, "empty trace");
        };
        let position = format!("step #{} of {}", step.index.unwrap_or_default(), view.total_steps);
        let line = step.line.map_or_else(|| "no line".to_string(), |line| format!("line {line}"));
        format!(
            "{} {} {} [{}] ({})",
            self.palette.paint(CYAN, &position),
            self.palette.paint(BOLD, &step.function),
            line,
            step.event_type,
            view.mode
        )
    }

    /// Variables, call stack and output of the step under the cursor
    pub fn inspect(&self, view: &SessionView) -> String {
        let mut out = self.status(view);
        out.push('\n');
        let Some(step) = &view.step else { return out };

        self.step_details(&mut out, step);

        if !view.active_path.is_empty() {
            let path: Vec<&str> = view.active_path.iter().map(|id| id.as_str()).collect();
            let heading = self.palette.paint(CYAN, "Active path:");
            let _ = writeln!(out, "{heading} {}", path.join(" ← "));
        }
        out
    }

    fn step_details(&self, out: &mut String, step: &StepEvent) {
        let _ = writeln!(out, "{}", self.palette.paint(CYAN, "Variables:"));
        if step.variables.is_empty() {
            let _ = writeln!(out, "  {}", self.palette.paint(GRAY, "(none)"));
        }
        for (name, value) in &step.variables {
            let _ = writeln!(out, "  {name} = {}", self.value(value));
        }

        if let Some(value) = &step.return_value {
            let heading = self.palette.paint(CYAN, "Returned:");
            let _ = writeln!(out, "{heading} {}", self.value(value));
        }

        if self.display.show_call_stack && !step.call_stack.is_empty() {
            let _ = writeln!(out, "{}", self.palette.paint(CYAN, "Call stack:"));
            for frame in &step.call_stack {
                match frame.line {
                    Some(line) => {
                        let _ = writeln!(out, "  {} (line {line})", frame.function);
                    }
                    None => {
                        let _ = writeln!(out, "  {}", frame.function);
                    }
                }
            }
        }

        if let Some(output) = step.output.as_deref().filter(|text| !text.is_empty()) {
            let _ = writeln!(out, "{}", self.palette.paint(CYAN, "Output:"));
            for line in output.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }

        if step.is_exception() {
            let message = step.error_message.as_deref().unwrap_or("exception raised");
            let _ = writeln!(out, "{} {message}", self.palette.paint(RED, "Error:"));
        }
    }

    /// Complexity report of the run
    pub fn complexity(&self, report: &ComplexityReport, source: ComplexitySource) -> String {
        let mut out = String::new();
        let origin = match source {
            ComplexitySource::External => "reported by tracer",
            ComplexitySource::Heuristic => "heuristic",
        };
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        self.field(&mut out, "Time:", format!("{} ({origin})", report.time));
        self.field(&mut out, "Space:", &report.space);
        self.field(&mut out, "Recursion:", yes_no(report.has_recursion));
        self.field(&mut out, "Loops:", yes_no(report.has_loops));
        for detail in &report.loop_details {
            let kind = detail.kind.map_or_else(|| "loop".to_string(), |kind| kind.to_string());
            let line = detail.line.trim();
            let _ = writeln!(out, "  [{kind}] {line} (nesting {})", detail.nesting_level);
        }
        out
    }

    /// Execution statistics of the run
    pub fn statistics(&self, stats: &ExecutionStatistics) -> String {
        let mut out = String::new();
        self.field(&mut out, "Total steps:", stats.total_steps);
        self.field(&mut out, "Max depth:", stats.max_depth);
        self.field(&mut out, "Exceptions:", stats.exception_count);

        let _ = writeln!(out, "{}", self.palette.paint(CYAN, "Steps per function:"));
        for entry in &stats.function_steps {
            let _ = writeln!(out, "  {:<20} {}", entry.function, entry.count);
        }
        let _ = writeln!(out, "{}", self.palette.paint(CYAN, "Calls per function:"));
        for entry in &stats.function_calls {
            let _ = writeln!(out, "  {:<20} {}", entry.function, entry.count);
        }

        self.field(&mut out, "Return values:", stats.return_count());
        for entry in &stats.returns {
            let value = self.value(&entry.value);
            let _ = writeln!(out, "  #{:<5} {} → {value}", entry.step, entry.function);
        }

        if !stats.depth_series.is_empty() {
            self.field(&mut out, "Depth:", sparkline(&stats.depth_series));
        }
        out
    }

    /// `heading value` on its own line
    fn field(&self, out: &mut String, heading: &str, value: impl std::fmt::Display) {
        let _ = writeln!(out, "{} {value}", self.palette.paint(CYAN, heading));
    }
}

/// Depth-over-time as a row of block characters
pub fn sparkline(series: &[(usize, usize)]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let max = series.iter().map(|&(_, depth)| depth).max().unwrap_or(0);
    series
        .iter()
        .map(|&(_, depth)| if max == 0 { BARS[0] } else { BARS[depth * (BARS.len() - 1) / max] })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vdb_common::types::CallId;
    use vdb_engine::{ActivePath, ViewMode};

    fn node(id: &str, label: &str, children: Vec<ViewNode>) -> ViewNode {
        ViewNode {
            id: Some(CallId::from(id)),
            function: label.to_string(),
            label: label.to_string(),
            return_value: None,
            active: false,
            current: false,
            children,
        }
    }

    fn plain() -> Renderer {
        Renderer::new(Palette::new(false), DisplayConfig::default())
    }

    #[test]
    fn test_tree_connectors() {
        let mut leaf = node("3", "fact(1)", Vec::new());
        leaf.return_value = Some(json!(1));
        leaf.current = true;
        let root = node(
            "1",
            "main()",
            vec![node("2", "fact(2)", vec![leaf]), node("4", "show()", Vec::new())],
        );

        let text = plain().tree(Some(&root));
        assert_eq!(text, "main()\n├── fact(2)\n│   └── ▶ fact(1) → 1\n└── show()\n");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(plain().tree(None), "(no calls to show)\n");
    }

    #[test]
    fn test_color_only_when_enabled() {
        let root = node("1", "main()", Vec::new());
        let colored = Renderer::new(Palette::new(true), DisplayConfig::default());
        assert!(!plain().tree(Some(&root)).contains('\x1b'));
        let mut active = root;
        active.active = true;
        assert!(colored.tree(Some(&active)).contains("\x1b[33m"));
    }

    #[test]
    fn test_inspect_step() {
        let step = StepEvent::new("fact", vdb_common::types::EventType::Step)
            .with_call("f")
            .with_line(4)
            .with_variable("n", json!(3));
        let mut step = step;
        step.index = Some(2);
        step.output = Some("hi\n".to_string());
        let view = SessionView {
            cursor: Some(2),
            total_steps: 5,
            mode: ViewMode::Stepwise,
            step: Some(step),
            active_path: ActivePath::default(),
            tree: None,
        };

        let text = plain().inspect(&view);
        assert!(text.starts_with("step #2 of 5 fact line 4 [step] (stepwise)\n"));
        assert!(text.contains("  n = 3\n"));
        assert!(text.contains("Output:\n  hi\n"));
    }

    #[test]
    fn test_complexity_trims_loop_lines() {
        let report = ComplexityReport {
            has_loops: true,
            loop_details: vec![vdb_common::types::LoopDetail {
                line: "    for x in xs:".to_string(),
                nesting_level: 2,
                kind: Some(vdb_common::types::LoopKind::For),
            }],
            ..ComplexityReport::default()
        };

        let text = plain().complexity(&report, ComplexitySource::Heuristic);
        assert!(text.contains("Loops: yes\n  [for] for x in xs: (nesting 2)\n"));
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[(0, 0), (1, 2), (2, 4)]), "▁▄█");
        assert_eq!(sparkline(&[(0, 0), (1, 0)]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }
}
