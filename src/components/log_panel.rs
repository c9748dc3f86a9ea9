//! Log Panel Component
//!
//! Shows the most recent buffered log lines on demand.

use leptos::prelude::*;
use rolling_logger::RollingLogger;

/// Lines shown when the panel opens
const SHOWN_LINES: usize = 40;

#[component]
pub fn LogPanel(logger: RollingLogger) -> impl IntoView {
    let logger = StoredValue::new(logger);
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let toggle = move |_| {
        let now_open = !open.get_untracked();
        if now_open {
            let recent = logger.with_value(|l| l.recent());
            let skip = recent.len().saturating_sub(SHOWN_LINES);
            set_lines.set(recent.into_iter().skip(skip).collect());
        }
        set_open.set(now_open);
    };

    view! {
        <div class="log-panel">
            <button type="button" class="log-toggle" on:click=toggle>
                {move || if open.get() { "Hide log" } else { "Show log" }}
            </button>
            <Show when=move || open.get()>
                <pre class="log-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </div>
    }
}
