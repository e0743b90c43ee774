use super::{explain, Context};
use crate::error::{CliError, CliResult};

pub async fn execute(ctx: &Context, name: String, description: String) -> CliResult<()> {
    println!("🚀 Creating campaign {:?}...", name);
    ctx.connect().await?;

    match ctx.run(ctx.client.create_campaign(&name, &description)).await {
        Ok(created) => {
            println!("✅ Campaign created: {}", created.address);
            println!("   Signature: {}", created.signature);
            Ok(())
        }
        Err(CliError::Client(e)) => {
            println!("❌ Failed to create campaign: {}", e);
            if let Some(hint) = explain(&e) {
                println!("   {}", hint);
            }
            Err(e.into())
        }
        Err(e) => Err(e),
    }
}
