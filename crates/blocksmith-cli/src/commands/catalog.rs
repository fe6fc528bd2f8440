use blocksmith_core::{Config, Priority};
use clap::Args;
use serde_json::{json, Map, Value};

use super::{print_json, CommandResult};

#[derive(Args)]
pub struct CatalogArgs {
    /// Show a single tier; unknown names show the fallback tier
    #[arg(long)]
    tier: Option<String>,
}

pub fn run(args: CatalogArgs) -> CommandResult {
    let catalog = Config::load_or_default().catalog()?;

    if let Some(tier) = args.tier {
        return print_json(&json!({
            "tier": tier,
            "blocks": catalog.blocks_for_name(&tier),
        }));
    }

    let mut tiers = Map::new();
    for tier in Priority::ALL {
        tiers.insert(tier.to_string(), serde_json::to_value(catalog.blocks_for(tier))?);
    }
    print_json(&Value::Object(tiers))
}
