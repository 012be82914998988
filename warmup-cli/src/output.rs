//! Terminal rendering helpers

use colored::*;
use warmup_core::domain::instance::{ConnectionState, Instance, QrCode};
use warmup_core::domain::poll::{PollProgress, PollState};
use warmup_core::domain::warmup::{WarmupSession, WarmupStatus};

/// Colorize an instance connection state for display
pub fn colorize_connection(state: &ConnectionState) -> ColoredString {
    let text = state.to_string();
    match state {
        ConnectionState::Open => text.green(),
        ConnectionState::Connecting => text.yellow(),
        ConnectionState::Closed => text.red(),
        ConnectionState::Unknown(_) => text.dimmed(),
    }
}

/// Colorize a warm-up status for display
pub fn colorize_warmup(status: &WarmupStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        WarmupStatus::Active => text.green(),
        WarmupStatus::Paused => text.yellow(),
        WarmupStatus::Stopped => text.red(),
        WarmupStatus::Unknown(_) => text.dimmed(),
    }
}

/// Colorize a poll state for display
pub fn colorize_poll_state(state: PollState) -> ColoredString {
    let text = state.to_string();
    match state {
        PollState::Pending => text.cyan(),
        PollState::Succeeded => text.green(),
        PollState::Failed => text.red(),
        PollState::TimedOut => text.red(),
        PollState::Cancelled => text.dimmed(),
    }
}

/// Print an instance summary line
pub fn print_instance_summary(instance: &Instance) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        instance.name.bold(),
        colorize_connection(&instance.state)
    );
    if let Some(profile) = &instance.profile_name {
        println!("    Profile: {}", profile.dimmed());
    }
    if let Some(jid) = &instance.owner_jid {
        println!("    Owner:   {}", jid.dimmed());
    }
}

/// Print the QR payload returned by a connect request
pub fn print_qr_code(name: &str, qr: &QrCode) {
    println!("{}", format!("Pairing instance {}:", name).bold());
    if let Some(code) = &qr.code {
        println!("  QR code:      {}", code);
    }
    if let Some(pairing) = &qr.pairing_code {
        println!("  Pairing code: {}", pairing.cyan().bold());
    }
    if qr.base64.is_some() {
        println!("  {}", "A rendered QR image is available from the backend.".dimmed());
    }
    println!();
}

/// Print warm-up session details
pub fn print_warmup_session(session: &WarmupSession) {
    println!("{}", "Warm-up:".bold());
    println!("  ID:            {}", session.id.cyan());
    println!("  Status:        {}", colorize_warmup(&session.status));
    println!("  Instances:     {}", session.instances.join(", "));
    println!("  Messages sent: {}", session.messages_sent);
    if let Some(started) = session.started_at {
        println!("  Started:       {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
}

/// Render "attempt k of N" feedback for a snapshot
pub fn progress_line(progress: &PollProgress, detail: &str) -> String {
    format!(
        "{} attempt {} of {}: {}",
        "…".dimmed(),
        progress.attempt,
        progress.max_attempts,
        detail
    )
}
