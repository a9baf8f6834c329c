//! Sound and desktop notification dispatch.
//! Calls are fire-and-forget; failures are ignored.

#[cfg(target_os = "macos")]
use std::process::Command;

pub trait Notifier {
    fn play_sound(&mut self);
    fn show_notification(&mut self, title: &str, body: &str);
}

/// osascript/afplay on macOS, the terminal bell elsewhere
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn play_sound(&mut self) {
        #[cfg(target_os = "macos")]
        {
            let _ = Command::new("afplay")
                .arg("/System/Library/Sounds/Glass.aiff")
                .spawn();
        }

        #[cfg(not(target_os = "macos"))]
        {
            use std::io::Write;
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }

    fn show_notification(&mut self, title: &str, body: &str) {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "Nudge - {}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );

            let _ = Command::new("osascript").arg("-e").arg(&script).output();
        }

        #[cfg(not(target_os = "macos"))]
        {
            // No-op on other platforms
            let _ = (title, body);
        }
    }
}

/// Does nothing; used when notifications are unwanted
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play_sound(&mut self) {}
    fn show_notification(&mut self, _title: &str, _body: &str) {}
}
