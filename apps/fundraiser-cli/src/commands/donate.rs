use super::{explain, format_sol, parse_address, Context};
use crate::error::{CliError, CliResult};

pub async fn execute(ctx: &Context, campaign: String, lamports: u64) -> CliResult<()> {
    let address = parse_address(&campaign)?;
    println!("💸 Donating {} to {}...", format_sol(lamports), address);
    ctx.connect().await?;

    match ctx.run(ctx.client.donate(&address, lamports)).await {
        Ok(receipt) => {
            println!("✅ Donation confirmed: {}", receipt.signature);
            match receipt.campaign {
                Some(c) => println!("   {} has raised {}", c.name, format_sol(c.amount_raised)),
                None => println!("   (Campaign totals unavailable; run `list` to refresh)"),
            }
            Ok(())
        }
        Err(CliError::Client(e)) => {
            println!("❌ Donation failed: {}", e);
            if let Some(hint) = explain(&e) {
                println!("   {}", hint);
            }
            Err(e.into())
        }
        Err(e) => Err(e),
    }
}
