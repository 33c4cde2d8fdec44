use nightowl_core::schedule::dto::ScheduleEntry;
use std::time::Duration;

use super::dto::{EnergyStyle, Side, TimelineItem, TimelineView};

pub const SKELETON_COUNT: usize = 4;
pub const REVEAL_STEP: Duration = Duration::from_millis(100);
pub const EMPTY_MESSAGE: &str = "Your optimized timeline will appear here";

/// Loading wins over everything, then the empty state, then the entries in
/// the order they were given.
pub fn render_timeline(schedule: &[ScheduleEntry], is_loading: bool) -> TimelineView {
    if is_loading {
        return TimelineView::Skeleton {
            placeholders: SKELETON_COUNT,
        };
    }

    if schedule.is_empty() {
        return TimelineView::Empty {
            message: EMPTY_MESSAGE,
        };
    }

    TimelineView::Populated(
        schedule
            .iter()
            .enumerate()
            .map(|(index, entry)| render_item(index, entry))
            .collect(),
    )
}

fn render_item(index: usize, entry: &ScheduleEntry) -> TimelineItem {
    let energy = entry.energy();

    let side = if index % 2 == 0 { Side::Left } else { Side::Right };

    let badge_label = if entry.energy_level.trim().is_empty() {
        energy.to_string()
    } else {
        entry.energy_level.trim().to_string()
    };

    TimelineItem {
        index,
        side,
        start_time: entry.start_time.clone(),
        label: entry.task_id.clone(),
        explanation: entry.explanation.clone(),
        energy,
        badge: format!("{} Energy", badge_label),
        style: EnergyStyle::from(energy),
        reveal_delay: REVEAL_STEP * index as u32,
    }
}
