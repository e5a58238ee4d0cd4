use crate::domain::TicketStatus;

/// Prints the canonical form of `input`, or the canonicalizer's error.
pub fn cmd_status(input: &str) -> anyhow::Result<()> {
    match TicketStatus::canonicalize(Some(input)) {
        Ok(status) => {
            println!("{input:?} => {} ({})", status.display_name(), status.identifier());
            Ok(())
        }
        Err(e) => anyhow::bail!(e),
    }
}
