// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::render::nav::ACTIVE_CLASS;
use crate::render::Element;

/// Owner of the "which entry is active" marker.
///
/// [`ActiveMarker::set_active`] is the only mutator. It runs read-all, clear-all, set-one over the
/// nav controls in one call, so at most one control carries the active class at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveMarker {
    current: Option<usize>,
}

impl ActiveMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element index of the active control inside the nav mount.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Marks `control` active and every other control inactive.
    ///
    /// Returns `false` and leaves the nav untouched if `control` does not exist.
    pub fn set_active(&mut self, nav: &mut Element, control: usize) -> bool {
        if nav.child_element(control).is_none() {
            return false;
        }

        for (i, element) in nav.child_elements_mut().enumerate() {
            if i == control {
                element.add_class(ACTIVE_CLASS);
            } else {
                element.remove_class(ACTIVE_CLASS);
            }
        }
        self.current = Some(control);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::ActiveMarker;
    use crate::model::fixtures::three_entries;
    use crate::render::nav::ACTIVE_CLASS;
    use crate::render::{build_nav, Element};

    fn nav() -> Element {
        let mut nav = Element::new("nav");
        for control in build_nav(&three_entries()) {
            nav.push(control);
        }
        nav
    }

    fn active_controls(nav: &Element) -> Vec<usize> {
        nav.child_elements()
            .enumerate()
            .filter(|(_, control)| control.has_class(ACTIVE_CLASS))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn last_activation_wins() {
        let mut nav = nav();
        let mut marker = ActiveMarker::new();

        assert!(marker.set_active(&mut nav, 0));
        assert!(marker.set_active(&mut nav, 2));

        assert_eq!(marker.current(), Some(2));
        assert_eq!(active_controls(&nav), [2]);
    }

    #[test]
    fn unknown_control_leaves_state_unchanged() {
        let mut nav = nav();
        let mut marker = ActiveMarker::new();
        marker.set_active(&mut nav, 1);

        assert!(!marker.set_active(&mut nav, 9));
        assert_eq!(marker.current(), Some(1));
        assert_eq!(active_controls(&nav), [1]);
    }

    #[test]
    fn stray_active_classes_are_cleared() {
        let mut nav = nav();
        for control in nav.child_elements_mut() {
            control.add_class(ACTIVE_CLASS);
        }
        let mut marker = ActiveMarker::new();
        marker.set_active(&mut nav, 1);
        assert_eq!(active_controls(&nav), [1]);
    }
}
