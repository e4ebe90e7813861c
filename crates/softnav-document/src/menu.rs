//! Collapsible site navigation menu
//!
//! Lives in the persistent shell, outside the content root.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Escape closes the menu; every other key is ignored
    pub fn handle_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    /// A click anywhere outside both the menu and its toggle closes it.
    /// A click on a link inside the menu closes it too.
    pub fn handle_click(&mut self, inside_menu: bool, inside_toggle: bool, on_link: bool) {
        if !self.open {
            return;
        }
        if (inside_menu && on_link) || (!inside_menu && !inside_toggle) {
            self.close();
        }
    }

    /// `aria-expanded` value for the toggle button
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Marker class applied to the body while open
    pub fn body_class(&self) -> Option<&'static str> {
        self.open.then_some("nav-open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_escape() {
        let mut menu = NavMenu::new();
        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.body_class(), Some("nav-open"));

        menu.handle_key("Enter");
        assert!(menu.is_open());
        menu.handle_key("Escape");
        assert!(!menu.is_open());
        assert_eq!(menu.body_class(), None);
    }

    #[test]
    fn test_click_handling() {
        let mut menu = NavMenu::new();
        menu.toggle();

        // Clicking the toggle itself is handled by toggle(), not here
        menu.handle_click(false, true, false);
        assert!(menu.is_open());

        // Non-link click inside the menu keeps it open
        menu.handle_click(true, false, false);
        assert!(menu.is_open());

        menu.handle_click(true, false, true);
        assert!(!menu.is_open());

        menu.toggle();
        menu.handle_click(false, false, false);
        assert!(!menu.is_open());
    }
}
