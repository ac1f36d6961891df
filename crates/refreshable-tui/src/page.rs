use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Local};
use refreshable_core::{OnRefreshListener, ScrollHost};
use tracing::info;

/// Number of generated lines per page load
const PAGE_LINES: usize = 120;

/// Demo content standing in for the loaded document
#[derive(Debug, Clone)]
pub struct Page {
    lines: Vec<String>,
    reloads: u32,
    loaded_at: DateTime<Local>,
}

impl Page {
    /// Generate the page as it looks after `reloads` reloads
    pub fn load(reloads: u32) -> Self {
        let loaded_at = Local::now();
        let mut lines = Vec::with_capacity(PAGE_LINES + 2);
        lines.push(format!(
            "Loaded {} (reload #{})",
            loaded_at.format("%H:%M:%S"),
            reloads
        ));
        lines.push(String::new());
        lines.extend((1..=PAGE_LINES).map(|i| {
            format!(
                "{:>3}. Pull down from the top to refresh this page [{}]",
                i,
                (i as u32).wrapping_mul(31).wrapping_add(reloads * 7) % 1000
            )
        }));

        Self {
            lines,
            reloads,
            loaded_at,
        }
    }

    /// Replace the content with a fresh load
    pub fn reload(&mut self) {
        *self = Self::load(self.reloads + 1);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}

/// Refresh listener that reloads the shared page
pub struct PageReloader {
    page: Rc<RefCell<Page>>,
}

impl PageReloader {
    pub fn new(page: Rc<RefCell<Page>>) -> Self {
        Self { page }
    }
}

impl OnRefreshListener for PageReloader {
    fn on_refresh(&self, view: &dyn ScrollHost) {
        let mut page = self.page.borrow_mut();
        page.reload();
        info!(
            reloads = page.reloads(),
            offset_y = view.content_offset_y(),
            "Page reloaded"
        );
    }
}
