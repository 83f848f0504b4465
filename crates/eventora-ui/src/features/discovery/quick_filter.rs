//! Quick category chips.

use eventora_api_models::EventCategory;

/// One curated chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuickFilterChip {
    /// Category applied when the chip is active.
    pub category: EventCategory,
    /// Chip title.
    pub title: &'static str,
    /// Short description under the title.
    pub description: &'static str,
}

/// Chips in display order.
pub const QUICK_FILTER_CHIPS: [QuickFilterChip; 4] = [
    QuickFilterChip {
        category: EventCategory::Business,
        title: "Trending tech",
        description: "Product, SaaS, growth",
    },
    QuickFilterChip {
        category: EventCategory::Culture,
        title: "Culture & arts",
        description: "Museums, theatre, pop-ups",
    },
    QuickFilterChip {
        category: EventCategory::Sports,
        title: "Wellness & sports",
        description: "Outdoor runs, community yoga",
    },
    QuickFilterChip {
        category: EventCategory::Community,
        title: "Community impact",
        description: "Non-profits & local drives",
    },
];

/// Exclusive selection over [`QUICK_FILTER_CHIPS`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuickFilterSelector {
    active: Option<EventCategory>,
}

impl QuickFilterSelector {
    /// Active category, if any.
    #[must_use]
    pub const fn active(self) -> Option<EventCategory> {
        self.active
    }

    /// Whether `category` is the active chip.
    #[must_use]
    pub fn is_active(self, category: EventCategory) -> bool {
        self.active == Some(category)
    }

    /// Select `category`, or clear it when it is already active.
    pub fn toggle(&mut self, category: EventCategory) -> Option<EventCategory> {
        self.active = if self.is_active(category) {
            None
        } else {
            Some(category)
        };
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_exclusive_and_self_clearing() {
        let mut selector = QuickFilterSelector::default();
        assert_eq!(selector.toggle(EventCategory::Sports), Some(EventCategory::Sports));
        assert_eq!(selector.toggle(EventCategory::Culture), Some(EventCategory::Culture));
        assert!(!selector.is_active(EventCategory::Sports));
        assert_eq!(selector.toggle(EventCategory::Culture), None);
        assert_eq!(selector.active(), None);
    }

    #[test]
    fn chips_keep_display_order() {
        let order: Vec<_> = QUICK_FILTER_CHIPS.iter().map(|chip| chip.category).collect();
        assert_eq!(
            order,
            vec![
                EventCategory::Business,
                EventCategory::Culture,
                EventCategory::Sports,
                EventCategory::Community,
            ]
        );
    }
}
