use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::views::Dashboard;

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logging unavailable: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "LL97 Emissions" }
        // Same theme the desktop build embeds; no separate web asset to keep in sync.
        document::Style { "{ui::THEME_CSS}" }

        Dashboard {}
    }
}
