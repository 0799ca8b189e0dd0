//! Overflow menu state owned by an adaptive toolbar.

/// Open/closed state of the overflow panel plus the highlighted entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowMenu {
    open: bool,
    highlighted: usize,
}

impl OverflowMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = 0;
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1) % len;
    }

    pub fn highlight_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.highlighted = if self.highlighted == 0 {
            len - 1
        } else {
            self.highlighted - 1
        };
    }

    /// Keep the highlight inside a menu that shrank to `len` entries.
    pub(crate) fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.close();
        } else if self.highlighted >= len {
            self.highlighted = len - 1;
        }
    }
}

/// The close capability handed to whatever is rendered inside the menu.
#[derive(Debug)]
pub struct MenuHandle<'a> {
    menu: &'a mut OverflowMenu,
}

impl<'a> MenuHandle<'a> {
    pub(crate) fn new(menu: &'a mut OverflowMenu) -> Self {
        Self { menu }
    }

    pub fn close(self) {
        self.menu.close();
    }

    pub fn highlight_next(&mut self, len: usize) {
        self.menu.highlight_next(len);
    }

    pub fn highlight_previous(&mut self, len: usize) {
        self.menu.highlight_previous(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_wraps_both_ways() {
        let mut menu = OverflowMenu::default();
        menu.open();
        menu.highlight_previous(3);
        assert_eq!(menu.highlighted(), 2);
        menu.highlight_next(3);
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn clamping_to_empty_closes() {
        let mut menu = OverflowMenu::default();
        menu.open();
        menu.clamp(0);
        assert!(!menu.is_open());
    }

    #[test]
    fn handle_close_consumes_capability() {
        let mut menu = OverflowMenu::default();
        menu.open();
        MenuHandle::new(&mut menu).close();
        assert!(!menu.is_open());
    }
}
