use super::Context;
use crate::error::CliResult;

pub async fn execute(ctx: &Context) -> CliResult<()> {
    let identity = ctx.connect().await?;
    println!("{}", identity);
    Ok(())
}
