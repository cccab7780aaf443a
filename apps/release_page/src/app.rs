//! The page component: heading, click counter and release version.

use herald::prelude::*;

use crate::release::ReleaseVersion;

pub const HEADING: &str = "Everything Has Now Changed!";
pub const VERSION_LABEL: &str = "RELEASE VERSION:";
/// `id` of the element the page is rendered into and mounted on.
pub const ROOT_ID: &str = "app";

/// Root component of the release page.
///
/// Clones share the counter, so a clone handed to the mount stays in sync
/// with the one it came from.
#[derive(Debug, Clone)]
pub struct App {
    count: Signal<u32>,
    release: ReleaseVersion,
}

impl App {
    pub fn new(release: ReleaseVersion) -> Self {
        Self {
            count: signal!(0),
            release,
        }
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }

    pub fn count_signal(&self) -> &Signal<u32> {
        &self.count
    }

    pub fn release(&self) -> &ReleaseVersion {
        &self.release
    }

    pub fn increment(&self) {
        increment(&self.count);
    }
}

// Saturates so the count never wraps back to zero.
fn increment(count: &Signal<u32>) {
    count.update(|count| *count = count.saturating_add(1));
}

impl View for App {
    fn render(&self) -> Html {
        let count = &self.count;
        let on_click = action!(count => { increment(&count); });

        Html::new().child(Element::new("h1").text(HEADING)).child(
            Element::new("div")
                .attr("class", "card")
                .child(
                    Element::new("button")
                        .attr("type", "button")
                        .on_action("click", on_click)
                        .text(format!("count is {}", self.count)),
                )
                .child(Element::new("p").text(VERSION_LABEL))
                .child(Element::new("p").text(self.release.version())),
        )
    }
}
