//! Route table listing command

use crate::output::{format_routes, route_summaries};
use anyhow::Result;
use tracing::info;
use viewroute_core::RouterHandle;

/// Print the route table
pub async fn routes_command(router: RouterHandle, json: bool) -> Result<()> {
    info!("Listing routes");

    if json {
        println!("{}", serde_json::to_string_pretty(&route_summaries(&router))?);
    } else {
        println!("{}", format_routes(&router));
    }

    Ok(())
}
