//! Application pages
//!
//! Exactly one page is mounted at a time. Each page owns its habitat
//! viewport (and the designer its parameter store); switching pages
//! unmounts the old one.

pub mod designer;
pub mod home;

pub use designer::DesignerPage;
pub use home::HomePage;

use crate::habitat::HabitatViewport;
use crate::settings::StartPage;

/// Page identifiers used for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    Home,
    Designer,
}

impl PageId {
    pub fn title(&self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::Designer => "Designer",
        }
    }
}

impl From<StartPage> for PageId {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Home => PageId::Home,
            StartPage::Designer => PageId::Designer,
        }
    }
}

/// Actions a page asks the app to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Navigate(PageId),
}

/// The mounted page
pub enum Page {
    Home(HomePage),
    Designer(DesignerPage),
}

impl Page {
    /// Mount a page, creating its viewport on `device`
    pub fn mount(id: PageId, device: &wgpu::Device) -> Self {
        tracing::info!(page = id.title(), "Mounting page");
        match id {
            PageId::Home => Page::Home(HomePage::new(device)),
            PageId::Designer => Page::Designer(DesignerPage::new(device)),
        }
    }

    pub fn id(&self) -> PageId {
        match self {
            Page::Home(_) => PageId::Home,
            Page::Designer(_) => PageId::Designer,
        }
    }

    /// Lay out the page below the menu bar
    pub fn show(&mut self, ctx: &egui::Context) -> Vec<PageAction> {
        match self {
            Page::Home(page) => page.show(ctx),
            Page::Designer(page) => page.show(ctx),
        }
    }

    pub fn viewport_mut(&mut self) -> &mut HabitatViewport {
        match self {
            Page::Home(page) => page.viewport_mut(),
            Page::Designer(page) => page.viewport_mut(),
        }
    }

    /// Release the page's viewport resources
    pub fn unmount(self, egui_renderer: &mut egui_wgpu::Renderer) {
        let id = self.id();
        match self {
            Page::Home(page) => page.unmount(egui_renderer),
            Page::Designer(page) => page.unmount(egui_renderer),
        }
        tracing::info!(page = id.title(), "Unmounted page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_page_mapping() {
        assert_eq!(PageId::from(StartPage::Home), PageId::Home);
        assert_eq!(PageId::from(StartPage::Designer), PageId::Designer);
    }
}
