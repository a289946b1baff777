use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = context_coder::cli::parse();
    app::run(args)
}
