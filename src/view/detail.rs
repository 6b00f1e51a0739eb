use crate::controller::{DetailPanel, FieldShape, RelatedDisplay, SlotState};
use crate::model::{Resource, ResourceKind, REL_SELF};

use super::shared::cell;

const LABEL_WIDTH: usize = 18;

fn nested_row(kind: ResourceKind, r: &Resource) -> String {
    let status_or_type = match kind {
        ResourceKind::Applications => r.text("type"),
        _ => r.text("status"),
    };
    format!(
        "{} {} {} {}",
        cell(&r.text("id"), 14),
        cell(&r.text("name"), 24),
        cell(&r.text("version"), 10),
        status_or_type,
    )
    .trim_end()
    .to_string()
}

/// Single-value line of a related slot; nothing while pending or empty.
fn related_field_line(panel: &DetailPanel, rel: &str, label: &str, key: &str) -> Option<String> {
    let label = format!("{}:", label);
    if let Some(SlotState::Failed(msg)) = panel.slot_state(rel) {
        return Some(format!("{}failed to load ({})", cell(&label, LABEL_WIDTH), msg));
    }
    panel
        .related(rel)
        .first()
        .map(|item| format!("{}{}", cell(&label, LABEL_WIDTH), item.text(key)))
}

/// Text lines of an expanded row's detail panel.
///
/// The first line is always the close control. Related sections with no
/// resolved items print nothing.
pub fn detail_lines(panel: &DetailPanel) -> Vec<String> {
    let spec = panel.spec();
    let mut lines = vec!["[x] close (Esc)".to_string()];

    match (panel.resource(), panel.slot_state(REL_SELF)) {
        (Some(resource), _) => {
            for field in spec.fields {
                let label = format!("{}:", field.label);
                match field.shape {
                    FieldShape::Text => {
                        lines.push(format!("{}{}", cell(&label, LABEL_WIDTH), resource.text(field.key)));
                    }
                    FieldShape::List => {
                        lines.push(label);
                        for value in resource.list(field.key) {
                            lines.push(format!("  • {}", value));
                        }
                    }
                }
                for related in spec.related {
                    if let RelatedDisplay::Field { key, after } = related.display {
                        if after == field.key {
                            lines.extend(related_field_line(panel, related.rel, related.label, key));
                        }
                    }
                }
            }
        }
        (None, Some(SlotState::Failed(msg))) => lines.push(format!("Details unavailable: {}", msg)),
        (None, Some(SlotState::Pending)) => lines.push("Loading...".to_string()),
        (None, _) => {}
    }

    for related in spec.related {
        if let RelatedDisplay::Field { key, .. } = related.display {
            // Inlined among the fields once the resource itself is known.
            if panel.resource().is_none() {
                lines.extend(related_field_line(panel, related.rel, related.label, key));
            }
            continue;
        }
        let items = panel.related(related.rel);
        let label = format!("{}:", related.label);
        if let Some(SlotState::Failed(msg)) = panel.slot_state(related.rel) {
            lines.push(format!("{}failed to load ({})", cell(&label, LABEL_WIDTH), msg));
            continue;
        }
        if items.is_empty() {
            continue;
        }
        if let RelatedDisplay::Table(kind) = related.display {
            lines.push(label);
            for item in items {
                lines.push(format!("  {}", nested_row(kind, item)));
            }
        }
    }

    if panel.is_loading() && panel.resource().is_some() {
        lines.push("Loading related resources...".to_string());
    }
    lines
}
