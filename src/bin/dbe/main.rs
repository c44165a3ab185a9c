//! dbe - live bass enhancer demo
//!
//! Run with: cargo run --bin dbe

mod app;
mod source;
mod ui;

use app::Demo;
use dbe::{CentreFrequency, HpfSelect};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Demo::new()
        .effect_level(9)
        .centre(CentreFrequency::Hz55)
        .hpf(HpfSelect::Off)
        .run()
}
