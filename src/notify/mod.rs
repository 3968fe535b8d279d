//! Best-effort email notifications about todo mutations.
//!
//! A [`Notifier`] never blocks the caller and never reports failure; delivery
//! happens on a detached task and errors end up in the log.

mod sendgrid;

use std::sync::Arc;

use crate::config::Config;
use crate::domain::todo::{Priority, Todo, TodoId};

pub use sendgrid::{NotifyError, SendGridNotifier};

/// What happened to a todo, as told to the mailbox owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Created { content: String },
    Updated { content: String, priority: Priority, completed: bool },
    Deleted { id: TodoId },
}

impl Notification {
    pub fn created(todo: &Todo) -> Self {
        Notification::Created { content: todo.content.clone() }
    }

    pub fn updated(todo: &Todo) -> Self {
        Notification::Updated { content: todo.content.clone(), priority: todo.priority, completed: todo.completed }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            Notification::Created { .. } => "new todo just created",
            Notification::Updated { .. } => "todo just updated",
            Notification::Deleted { .. } => "Todo just deleted",
        }
    }

    pub fn plain_text(&self) -> String {
        match self {
            Notification::Created { content } => content.clone(),
            Notification::Updated { content, priority, completed } => format!(
                "{content} with {} priority as {}",
                priority.label(),
                if *completed { "Completed" } else { "Not completed" }
            ),
            Notification::Deleted { id } => format!("todo #{id} just deleted. Please, check your list!"),
        }
    }

    pub fn html(&self) -> String {
        format!("<strong>{}</strong>", html_escape::encode_text(&self.plain_text()))
    }
}

pub trait Notifier: Send + Sync + 'static {
    /// Hands the notification off. Must return immediately.
    fn notify(&self, notification: Notification);
}

/// Used when no API key or no destination address is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(subject = notification.subject(), "notifications disabled, skipping");
    }
}

pub fn notifier_from_config(config: &Config) -> Arc<dyn Notifier> {
    match SendGridNotifier::from_config(config) {
        Ok(Some(sendgrid)) => {
            tracing::info!(to = %sendgrid.recipient(), "email notifications enabled");
            Arc::new(sendgrid)
        }
        Ok(None) => Arc::new(DisabledNotifier),
        Err(e) => {
            tracing::error!(error = %e, "email notifications disabled");
            Arc::new(DisabledNotifier)
        }
    }
}
