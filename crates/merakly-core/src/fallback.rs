// ── Fallback responder ──
//
// Queries no tool rule matched go to the language model under a fixed
// persona. The answer is passed through untouched.

use tracing::info;

use crate::error::CoreError;
use crate::gateway::Completer;

/// Wrap a query in the expert persona instruction.
pub fn persona_prompt(query: &str) -> String {
    format!("You are a Cisco Meraki expert. Answer this: {query}")
}

pub async fn respond<C: Completer>(completer: &C, query: &str) -> Result<String, CoreError> {
    info!("no tool matched, asking the language model");
    completer.complete(&persona_prompt(query)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_query_verbatim() {
        assert_eq!(
            persona_prompt("tell me about EAP-TLS"),
            "You are a Cisco Meraki expert. Answer this: tell me about EAP-TLS"
        );
    }
}
