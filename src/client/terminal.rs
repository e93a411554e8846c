use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::chat_client::ChatTransport;
use crate::core::chat::{ChatSession, Role};

const WELCOME: &str = "Welcome! Ask me anything about the documents in your Google Drive.";

/// Runs an interactive chat until `input` is exhausted.
///
/// Each non-blank line (Enter) is one send. Returns the finished session.
pub async fn run_terminal<T, R, W>(
    transport: &T,
    input: R,
    mut output: W,
) -> std::io::Result<ChatSession>
where
    T: ChatTransport + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = ChatSession::new();
    let mut lines = input.lines();

    output.write_all(format!("{}\n\n", WELCOME).as_bytes()).await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let Some(message) = session.begin_send(&line) else {
            continue;
        };

        output.write_all(b"Thinking...\n").await?;
        output.flush().await?;

        let outcome = transport.send(&message).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "Chat request failed");
        }
        session.finish_send(outcome);

        if let Some(reply) = session.messages().last().filter(|m| m.role == Role::Assistant) {
            output
                .write_all(format!("{}\n\n", reply.text).as_bytes())
                .await?;
        }
    }

    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(session)
}
