use clap::Parser;
use relm4::prelude::*;
use reticle_gtk::config;
use reticle_gtk::gui::app::{AppInit, AppModel};
use reticle_gtk::sys::runtime;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reticle", version, about, long_about = None)]
struct Cli {
    /// Read options from this file instead of the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the custom cursor even on touch or mobile devices
    #[arg(long)]
    force: bool,

    /// Write the default config file and exit
    #[arg(long)]
    write_default: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.write_default {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    // clap owns argv; GTK gets none of it
    let app = RelmApp::new("org.reticle.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        force: cli.force,
        rx,
    });
    Ok(())
}
