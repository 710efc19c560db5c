mod command;
mod config;
mod display;
mod high_score;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
