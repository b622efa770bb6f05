//! Rendering of engine events as user-facing output

use cfddns_core::EngineEvent;

/// Render an event as output text, if it is user-facing
///
/// Returned text may span several lines.
pub fn render_event(event: &EngineEvent) -> Option<String> {
    match event {
        EngineEvent::UpdateSkipped {
            family, address, ..
        } => Some(format!(
            "DNS record {} matches the WAN {}, no update needed.",
            address,
            family.label()
        )),
        EngineEvent::UpdateSucceeded {
            family, address, ..
        } => Some(format!("Updated {} successfully!\n{}", family, address)),
        EngineEvent::DryRunCompleted {
            family, address, ..
        } => Some(format!("[dry-run] Would update {} to {}", family, address)),
        _ => None,
    }
}
