//! Formatting for navigations and route listings

use colored::*;
use serde::Serialize;
use viewroute_core::{Error, NavigationOutcome, Router};

/// One row of the route listing
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    /// Route name
    pub name: String,
    /// Path pattern
    pub path: String,
    /// Browser href for static paths (includes the base)
    pub href: Option<String>,
    /// Component the route loads, when declared in its metadata
    pub component: Option<String>,
    /// Whether this is the fallback for unknown paths
    pub fallback: bool,
    /// Whether the component has already been loaded
    pub loaded: bool,
}

/// Summaries for every record in the router's table, in match order
pub fn route_summaries(router: &Router) -> Vec<RouteSummary> {
    let table = router.table();
    let fallback = table.fallback().map(|record| record.name.clone());

    table
        .records()
        .iter()
        .map(|record| RouteSummary {
            name: record.name.to_string(),
            path: record.path.to_string(),
            href: record
                .path
                .is_static()
                .then(|| router.options().base.href(record.path.as_str())),
            component: record.meta.get("component").cloned(),
            fallback: fallback.as_ref() == Some(&record.name),
            loaded: router.load_count(record.name.as_str()).unwrap_or(0) > 0,
        })
        .collect()
}

/// Route table as aligned text
pub fn format_routes(router: &Router) -> String {
    let summaries = route_summaries(router);
    let path_width = summaries.iter().map(|s| s.path.len()).max().unwrap_or(0);
    let name_width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);

    let mut lines = vec![format!("{} (base {})", "Routes".bold(), router.options().base)];
    for summary in summaries {
        let mut line = format!(
            "  {:<path_width$}  {:<name_width$}  {}",
            summary.path,
            summary.name.cyan(),
            summary.component.as_deref().unwrap_or("-"),
        );
        if summary.fallback {
            line.push_str(&format!("  {}", "(fallback)".dimmed()));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Result of navigating to `target`
pub fn format_outcome(target: &str, outcome: &NavigationOutcome) -> String {
    match outcome {
        NavigationOutcome::Committed(navigation) => {
            let location = &navigation.location;
            let title = location
                .meta
                .get("title")
                .map(String::as_str)
                .unwrap_or(location.name.as_str());
            format!(
                "{} {} {}\n{}\n\n{}",
                "→".green(),
                location.href.bold(),
                format!("[{}]", location.name).cyan(),
                title.bold().underline(),
                navigation.render()
            )
        }
        NavigationOutcome::Duplicated(location) => format!(
            "{} already at {} [{}]",
            "•".yellow(),
            location.full_path,
            location.name
        ),
        NavigationOutcome::Superseded => format!(
            "{} navigation to {} was superseded by a newer one",
            "•".yellow(),
            target
        ),
    }
}

/// Failed navigation to `target`
pub fn format_error(target: &str, err: &Error) -> String {
    format!("{} {}: {}", "✗".red(), target, err.to_string().red())
}
