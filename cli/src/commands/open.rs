//! One-shot navigation command

use crate::output::{format_error, format_outcome};
use anyhow::{bail, Result};
use tracing::info;
use viewroute_core::RouterHandle;

/// Navigate to each target in order, printing every page or error
pub async fn open_command(router: RouterHandle, targets: Vec<String>) -> Result<()> {
    info!(count = targets.len(), "Opening targets");

    let mut failures = 0;
    for (idx, target) in targets.iter().enumerate() {
        if idx > 0 {
            println!();
        }

        match router.push(target).await {
            Ok(outcome) => println!("{}", format_outcome(target, &outcome)),
            Err(err) => {
                failures += 1;
                eprintln!("{}", format_error(target, &err));
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} navigation(s) failed", failures, targets.len());
    }

    Ok(())
}
