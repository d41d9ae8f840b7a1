use indicatif::{ProgressBar, ProgressStyle};
use ureq::{Agent, AgentBuilder};

pub fn agent() -> Agent {
    AgentBuilder::new()
        .user_agent(concat!("listings/", env!("CARGO_PKG_VERSION")))
        .build()
}

pub fn progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {pos}/{len} {percent}% ({eta_precise})")
            .expect("hardcoded"),
    )
}
