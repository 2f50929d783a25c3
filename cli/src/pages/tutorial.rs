//! Step-by-step tutorial page

use viewroute_core::{RouteLocation, View};

const STEPS: [&str; 3] = [
    "Open a page by typing its path, e.g. /authorisation",
    "Use `back` and `forward` to move through your history",
    "Type `routes` to see every page the app knows about",
];

/// Tutorial page; the `step` query selects the current step (1-based)
#[derive(Debug, Default)]
pub struct TutorialView;

impl TutorialView {
    fn current_step(location: &RouteLocation) -> usize {
        location
            .query_value("step")
            .and_then(|step| step.parse::<usize>().ok())
            .map(|step| step.clamp(1, STEPS.len()))
            .unwrap_or(1)
    }
}

impl View for TutorialView {
    fn name(&self) -> &str {
        "TutorialView"
    }

    fn render(&self, location: &RouteLocation) -> String {
        let current = Self::current_step(location);
        let mut lines = vec![format!("Tutorial ({}/{})", current, STEPS.len()), String::new()];

        for (idx, step) in STEPS.iter().enumerate() {
            let marker = if idx + 1 == current { "►" } else { " " };
            lines.push(format!("{} {}. {}", marker, idx + 1, step));
        }

        if current < STEPS.len() {
            lines.push(String::new());
            lines.push(format!("  Next: /tutorial?step={}", current + 1));
        }

        lines.join("\n")
    }
}
