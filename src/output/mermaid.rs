use indexmap::IndexMap;
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

static NON_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]+").expect("valid identifier regex"));
/// `(condition) label`
static CONDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([^)]+)\)\s*(.*)$").expect("valid condition regex"));

const MAX_KEY_LEN: usize = 30;

/// Converts a chain description such as `Start -> Check -> (yes) Ship; Check -> (no) Stop`
/// into a Mermaid `flowchart TD`.
///
/// Segments are separated by `;` and steps by `->`. A `(condition)` prefix on a step
/// labels the edge leading into it.
pub fn text_to_mermaid(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "flowchart TD\n  A[Empty]".to_string();
    }

    let mut nodes: IndexMap<String, String> = IndexMap::new();
    let mut edges: Vec<(String, String, String)> = Vec::new();

    for segment in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let chain: Vec<(&str, &str)> = segment
            .split("->")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(split_condition)
            .collect();

        for ((_, from), (condition, to)) in chain.iter().tuple_windows() {
            let a = node_key(&mut nodes, from);
            let b = node_key(&mut nodes, to);
            edges.push((a, b, condition.to_string()));
        }
    }

    let mut out = vec!["flowchart TD".to_string()];
    for (key, label) in &nodes {
        out.push(format!("  {}[{}]", key, escape(label)));
    }
    for (a, b, condition) in &edges {
        if condition.is_empty() {
            out.push(format!("  {} --> {}", a, b));
        } else {
            out.push(format!("  {} -- {} --> {}", a, escape(condition), b));
        }
    }
    out.join("\n")
}

fn split_condition(step: &str) -> (&str, &str) {
    match CONDITION.captures(step) {
        Some(caps) => {
            let condition = caps.get(1).map_or("", |m| m.as_str().trim());
            let label = caps.get(2).map_or("", |m| m.as_str().trim());
            (condition, label)
        }
        None => ("", step),
    }
}

/// First label seen for a key wins.
fn node_key(nodes: &mut IndexMap<String, String>, label: &str) -> String {
    let replaced = NON_IDENT.replace_all(label.trim(), "_");
    let truncated: String = replaced.chars().take(MAX_KEY_LEN).collect();
    let key = match truncated.trim_matches('_') {
        "" => "N".to_string(),
        k => k.to_string(),
    };
    nodes
        .entry(key.clone())
        .or_insert_with(|| label.trim().to_string());
    key
}

fn escape(s: &str) -> String {
    s.replace('[', "(").replace(']', ")")
}
