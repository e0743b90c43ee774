use super::{format_sol, Context};
use crate::error::CliResult;
use serde::Serialize;

#[derive(Serialize)]
struct CampaignView {
    address: String,
    owner: String,
    name: String,
    description: String,
    amount_raised: u64,
}

pub async fn execute(ctx: &Context, json: bool) -> CliResult<()> {
    let snapshot = ctx.run(ctx.client.list_campaigns()).await?;

    if json {
        let views: Vec<CampaignView> = snapshot
            .campaigns()
            .iter()
            .map(|c| CampaignView {
                address: c.address.to_string(),
                owner: c.owner.to_string(),
                name: c.name.clone(),
                description: c.description.clone(),
                amount_raised: c.amount_raised,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("No campaigns found");
        return Ok(());
    }

    println!("📋 {} campaign(s):", snapshot.len());
    for (i, campaign) in snapshot.campaigns().iter().enumerate() {
        println!("   {}. {} ({})", i + 1, campaign.name, campaign.address);
        println!("      Owner: {}", campaign.owner);
        if !campaign.description.is_empty() {
            println!("      {}", campaign.description);
        }
        println!("      Raised: {}", format_sol(campaign.amount_raised));
    }
    Ok(())
}
