use colored::Colorize;
use rowkeep::api::{CmdMessage, MessageLevel};
use rowkeep::error::Status;
use rowkeep::model::Contact;
use rowkeep::script::StepOutcome;

const STEP_WIDTH: usize = 24;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn status_label(status: Status) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        Status::NoError => label.green(),
        Status::RecordNotFound => label.yellow(),
        _ => label.red(),
    }
}

pub(crate) fn print_contact(contact: &Contact) {
    let marker = if contact.active { " " } else { "x" };
    let name = if contact.active {
        contact.name.bold()
    } else {
        contact.name.dimmed()
    };
    if contact.email.is_empty() {
        println!("[{}] {:>4}  {}", marker, contact.id.to_string().yellow(), name);
    } else {
        println!(
            "[{}] {:>4}  {} <{}>",
            marker,
            contact.id.to_string().yellow(),
            name,
            contact.email
        );
    }
}

pub(crate) fn print_contacts(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("{}", "No records.".dimmed());
        return;
    }
    for contact in contacts {
        print_contact(contact);
    }
}

pub(crate) fn print_outcomes(outcomes: &[StepOutcome]) {
    for (i, outcome) in outcomes.iter().enumerate() {
        let mut line = format!(
            "{:>3}. {:<width$} {}",
            i + 1,
            outcome.step,
            status_label(outcome.status),
            width = STEP_WIDTH
        );
        if let Some(record) = &outcome.record {
            line.push_str(&format!("  -> {} {}", record.id, record.name));
        }
        if let Some(position) = outcome.position {
            line.push_str(&format!("  -> position {}", position));
        }
        if let Some(exists) = outcome.exists {
            line.push_str(&format!("  -> {}", exists));
        }
        println!("{}", line);
    }
}
