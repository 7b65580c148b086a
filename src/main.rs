use std::path::Path;

use clap::{Arg, Command};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("creature-login")
        .about("Animated creature login screen")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("no-entrance")
                .long("no-entrance")
                .takes_value(false)
                .help("Skip the entrance animation"),
        )
        .get_matches();

    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = match creature_login::load_config(Path::new(config_path)) {
        Ok(config) => {
            println!("Read configuration from {config_path}");
            config
        }
        Err(error) => {
            println!("{error}; using defaults");
            creature_login::Config::default()
        }
    };

    if matches.is_present("no-entrance") {
        config.animation.entrance = false;
    }

    creature_login::run_app(&config);
    Ok(())
}
