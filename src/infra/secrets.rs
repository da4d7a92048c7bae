use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 4] = ["password", "passwd", "secret", "token"];

/// Replaces every whitespace-separated chunk that names a credential.
///
/// A marker on its own (`password: hunter2`) also hides the chunk after it.
pub fn redact_text(input: &str) -> String {
    let mut hide_next = false;

    input
        .split_whitespace()
        .map(|chunk| {
            let lowered = chunk.to_ascii_lowercase();
            let sensitive = SENSITIVE_MARKERS
                .iter()
                .any(|marker| lowered.contains(marker));

            let redact = sensitive || hide_next;
            hide_next = sensitive && !chunk.contains('=');

            if redact {
                REDACTED.to_owned()
            } else {
                chunk.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        match panic_info.location() {
            Some(location) => eprintln!(
                "chatterm panic: {} at {}:{}",
                scrubbed,
                location.file(),
                location.line()
            ),
            None => eprintln!("chatterm panic: {scrubbed}"),
        }
    }));
}
