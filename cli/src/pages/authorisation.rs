//! Sign-in page

use viewroute_core::{RouteLocation, View};

/// Sign-in page, optionally remembering where to return afterwards
#[derive(Debug, Default)]
pub struct AuthorisationView;

impl View for AuthorisationView {
    fn name(&self) -> &str {
        "AuthorisationView"
    }

    fn render(&self, location: &RouteLocation) -> String {
        let mut lines = vec![
            "Authorisation".to_string(),
            String::new(),
            "  Sign in with your account to continue.".to_string(),
        ];

        if let Some(redirect) = location.query_value("redirect") {
            lines.push(format!("  You will be returned to {} afterwards.", redirect));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewroute_core::{Router, RouterOptions};

    #[test]
    fn test_redirect_hint() {
        let router = Router::new(crate::routes::app_table().unwrap(), RouterOptions::default());
        let location = router.resolve("/authorisation?redirect=/tutorial").unwrap();

        let page = AuthorisationView.render(&location);
        assert!(page.contains("returned to /tutorial"));

        let plain = router.resolve("/authorisation").unwrap();
        assert!(!AuthorisationView.render(&plain).contains("returned to"));
    }
}
