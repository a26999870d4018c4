//! Static page forms. Nothing here is sent anywhere.

use super::Reply;
use crate::notifications::Notification;

/// Contact form input.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Acknowledge a contact message.
pub fn contact(form: &ContactForm) -> Reply {
    tracing::info!(
        name = %form.name,
        email = %form.email,
        length = form.message.len(),
        "Contact message received"
    );
    Reply::notify(Notification::success(
        "Message sent successfully! We will get back to you soon.",
    ))
}

/// Acknowledge a newsletter signup. An empty email is ignored.
pub fn subscribe(email: &str) -> Reply {
    if email.trim().is_empty() {
        return Reply::default();
    }
    tracing::info!(email, "Newsletter signup");
    Reply::notify(Notification::success(
        "Thank you for subscribing to our newsletter!",
    ))
}

/// Placeholder for the "read more" buttons.
pub fn read_more() -> Reply {
    Reply::notify(Notification::success(
        "Read more functionality would show more details here",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_ignores_empty_email() {
        assert_eq!(subscribe(""), Reply::default());
        assert_eq!(subscribe("   "), Reply::default());
    }

    #[test]
    fn test_subscribe() {
        let reply = subscribe("reader@example.com");
        assert_eq!(
            reply.notifications[0].message,
            "Thank you for subscribing to our newsletter!"
        );
    }

    #[test]
    fn test_contact_always_succeeds() {
        let reply = contact(&ContactForm::default());
        assert!(!reply.notifications[0].is_error());
    }
}
