//! User-facing terminal messages: a `(action, details)` pair rendered
//! through the `show_message!` macro.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Highlight,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub action: String,
    pub details: String,
}

impl Message {
    pub fn new(action: String, details: String) -> Message {
        Message { action, details }
    }
}

macro_rules! show_message {
    ($message_type:expr, $message:expr) => {{
        let message_type: $crate::cli::display::MessageType = $message_type;
        let message: $crate::cli::display::Message = $message;
        match message_type {
            $crate::cli::display::MessageType::Error => {
                eprintln!("{} {}", message.action, message.details)
            }
            _ => println!("{} {}", message.action, message.details),
        }
    }};
}
