//! Interactive read-eval-print loop.

use std::io::{self, BufRead, Write};

use runtime::{Chatbot, LlmBackend, ToolInvoker};

const PROMPT: &str = "You: ";

/// Run the chat loop until `exit` (any casing) or end of input.
///
/// Blank lines re-prompt without contacting anything. Only the line
/// terminator is stripped before a line is routed.
pub async fn run<B, T, R, W>(bot: &Chatbot<B, T>, mut input: R, output: &mut W) -> io::Result<()>
where
    B: LlmBackend,
    T: ToolInvoker,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        // Blocking read on purpose; only one turn is ever in flight.
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let text = line.trim_end_matches(['\n', '\r']);
        if text.eq_ignore_ascii_case("exit") {
            break;
        }
        if text.trim().is_empty() {
            continue;
        }

        let turn = bot.respond(text).await;
        writeln!(output, "Bot: {}", turn.output)?;
    }

    writeln!(output, "Goodbye!")?;
    output.flush()
}
