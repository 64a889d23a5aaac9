use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{command::Context, error::CommandError, registry::CommandRegistry};

/// Feeds `input` to the registry line by line until end of input.
///
/// Each line is dispatched to completion before the next is read. Unknown
/// commands and rejected arguments do not end the session; only I/O errors do.
pub async fn run<R>(registry: &CommandRegistry, input: R, ctx: &mut Context<'_>) -> Result<(), CommandError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        registry.dispatch(&line, ctx).await?;
        ctx.out.flush()?;
    }
    tracing::debug!("end of input, session finished");
    Ok(())
}
