use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_tickets(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let tickets = state.ticket_service.list().await?;

    if tickets.is_empty() {
        println!("No tickets yet.");
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<10} {:<10} {}",
        "ID", "STATUS", "PRIORITY", "CATEGORY", "TITLE"
    );
    println!("{:-<70}", "");

    for ticket in tickets {
        println!(
            "{:<5} {:<12} {:<10} {:<10} {}",
            ticket.id,
            ticket.status.display_name(),
            ticket.priority.name,
            ticket.category.name,
            ticket.title
        );
    }

    Ok(())
}
