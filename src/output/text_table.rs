use super::table::{BpmnStep, MinimalStep};

/// A row that can be rendered by [`render_step_table`].
pub trait TableRow {
    fn action(&self) -> &str;
    fn role(&self) -> &str {
        ""
    }
}

impl TableRow for BpmnStep {
    fn action(&self) -> &str {
        &self.action
    }
    fn role(&self) -> &str {
        &self.role
    }
}

impl TableRow for MinimalStep {
    fn action(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone)]
pub struct TextTableOptions {
    pub with_role_header: bool,
    pub step_header: String,
    pub role_header: String,
}

impl Default for TextTableOptions {
    fn default() -> Self {
        Self {
            with_role_header: true,
            step_header: "Step".to_string(),
            role_header: "Role".to_string(),
        }
    }
}

/// Renders steps as an aligned plain-text table, one numbered row per step.
pub fn render_step_table<R: TableRow>(steps: &[R], options: &TextTableOptions) -> String {
    if steps.is_empty() {
        return format!("{} | {}\n", options.step_header, options.role_header);
    }

    let rows: Vec<(String, &str, &str)> = steps
        .iter()
        .enumerate()
        .map(|(i, s)| ((i + 1).to_string(), s.action().trim(), s.role().trim()))
        .collect();

    let width = |s: &str| s.chars().count();
    let w_step = rows
        .iter()
        .map(|r| width(&r.0))
        .chain([width(&options.step_header)])
        .max()
        .unwrap_or(0);
    let w_act = rows.iter().map(|r| width(r.1)).chain([3]).max().unwrap_or(3);
    let w_role = rows
        .iter()
        .map(|r| width(r.2))
        .chain([width(&options.role_header)])
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    if options.with_role_header {
        lines.push(format!(
            "{:<w_step$} | {:<w_role$}",
            options.step_header, options.role_header
        ));
    }
    for (step, action, role) in &rows {
        if options.with_role_header {
            lines.push(format!(
                "{:<w_step$} {:<w_act$} | {:<w_role$}",
                format!("{}.", step),
                action,
                role
            ));
        } else {
            lines.push(format!("{}. {}", step, action));
        }
    }
    format!("{}\n", lines.join("\n").trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bpmn(action: &str, role: &str) -> BpmnStep {
        BpmnStep {
            step: 0,
            action: action.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let rows: Vec<BpmnStep> = vec![];
        assert_eq!(
            render_step_table(&rows, &TextTableOptions::default()),
            "Step | Role\n"
        );
    }

    #[test]
    fn test_aligned_rows() {
        let rows = vec![bpmn("Fill form", "Clerk"), bpmn("Sign", "")];
        let text = render_step_table(&rows, &TextTableOptions::default());
        assert_eq!(
            text,
            "Step | Role \n1.   Fill form | Clerk\n2.   Sign      |\n"
        );
    }

    #[test]
    fn test_plain_rows_without_header() {
        let rows = vec![bpmn(" Fill form ", "")];
        let options = TextTableOptions {
            with_role_header: false,
            ..Default::default()
        };
        assert_eq!(render_step_table(&rows, &options), "1. Fill form\n");
    }
}
