use nightowl_core::schedule::dto::EnergyLevel;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Zap,
    Brain,
    Moon,
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyStyle {
    pub glyph: Glyph,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub index: usize,
    pub side: Side,
    pub start_time: String,
    pub label: String,
    pub explanation: String,
    pub energy: EnergyLevel,
    /// Badge text, built from the raw label so unknown levels stay visible.
    pub badge: String,
    pub style: EnergyStyle,
    pub reveal_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineView {
    Skeleton { placeholders: usize },
    Empty { message: &'static str },
    Populated(Vec<TimelineItem>),
}

impl From<EnergyLevel> for EnergyStyle {
    fn from(energy: EnergyLevel) -> Self {
        match energy {
            EnergyLevel::High => EnergyStyle {
                glyph: Glyph::Zap,
                color: "amber",
            },
            EnergyLevel::Medium => EnergyStyle {
                glyph: Glyph::Brain,
                color: "indigo",
            },
            EnergyLevel::Low => EnergyStyle {
                glyph: Glyph::Moon,
                color: "purple",
            },
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Glyph::Zap => write!(f, "⚡"),
            Glyph::Brain => write!(f, "🧠"),
            Glyph::Moon => write!(f, "🌙"),
            Glyph::Clock => write!(f, "🕒"),
        }
    }
}

impl TimelineView {
    pub fn items(&self) -> &[TimelineItem] {
        match self {
            TimelineView::Populated(items) => items,
            _ => &[],
        }
    }
}

impl fmt::Display for TimelineView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineView::Skeleton { placeholders } => {
                for _ in 0..*placeholders {
                    writeln!(f, "░░░░░░░░  ▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒")?;
                }
                Ok(())
            }
            TimelineView::Empty { message } => writeln!(f, "{} {}", Glyph::Clock, message),
            TimelineView::Populated(items) => {
                for item in items {
                    let indent = match item.side {
                        Side::Left => "",
                        Side::Right => "        ",
                    };

                    writeln!(
                        f,
                        "{}{:>8}  {} {}  [{}]",
                        indent, item.start_time, item.style.glyph, item.label, item.badge
                    )?;

                    if !item.explanation.is_empty() {
                        writeln!(f, "{}          {}", indent, item.explanation)?;
                    }
                }
                Ok(())
            }
        }
    }
}
