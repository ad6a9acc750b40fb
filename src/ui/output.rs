use crate::resource::{Resource, Status};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::BOOKS, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::FILE, label.style(theme().dim.clone()), value);
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn empty(label: &str) {
    println!("{} {}", Icons::EMPTY, label.style(theme().muted.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Planned => "○",
        Status::InProgress => "◐",
        Status::Completed => "●",
    }
}

/// One-line summary of a resource: `[3] ● Rust Book (book)`
pub fn resource_line(resource: &Resource) {
    println!(
        "[{}] {} {} {}",
        resource.id,
        status_icon(resource.status),
        resource.title.bold(),
        format!("({})", resource.kind).style(theme().muted.clone()),
    );
}

/// Multi-line detail block for a resource
pub fn resource_card(resource: &Resource) {
    resource_line(resource);
    println!("    Status: {}", resource.status);
    if !resource.tags.is_empty() {
        println!("    {} Tags: {}", Icons::TAG, resource.tags.join(", "));
    }
    if !resource.concepts.is_empty() {
        println!("    {} Concepts: {}", Icons::BRAIN, resource.concepts.join(", "));
    }
    if let Some(url) = &resource.url {
        println!("    {} {}", Icons::LINK, dim(url));
    }
    if !resource.notes.is_empty() {
        println!("    {} {}", Icons::PENCIL, dim(&resource.notes));
    }
    println!(
        "    Added: {}",
        dim(&resource.created_at.format("%Y-%m-%d %H:%M").to_string())
    );
}
