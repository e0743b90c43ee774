use super::{explain, format_sol, parse_address, Context};
use crate::error::{CliError, CliResult};

pub async fn execute(ctx: &Context, campaign: String, lamports: u64) -> CliResult<()> {
    let address = parse_address(&campaign)?;
    println!("🏦 Withdrawing {} from {}...", format_sol(lamports), address);
    ctx.connect().await?;

    match ctx.run(ctx.client.withdraw(&address, lamports)).await {
        Ok(receipt) => {
            println!("✅ Withdrawal confirmed: {}", receipt.signature);
            if let Some(c) = receipt.campaign {
                println!("   {} now holds {}", c.name, format_sol(c.amount_raised));
            }
            Ok(())
        }
        Err(CliError::Client(e)) => {
            println!("❌ Withdrawal failed: {}", e);
            if let Some(hint) = explain(&e) {
                println!("   {}", hint);
            }
            Err(e.into())
        }
        Err(e) => Err(e),
    }
}
