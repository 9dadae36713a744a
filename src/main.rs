use bootsign::cmd::{BootSignConfig, CalcHCmd, Cmd, CryptCmd, KeyCmd, SignCmd};
use bootsign::log_error;
use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use std::path::PathBuf;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("BOOTSIGN_VERSION_INFO");
    let app = Command::new("bootsign")
        .version(version)
        .long_version(format!("{version} ({})", env!("BOOTSIGN_GIT_INFO")))
        .about("rsa signing for secure boot images")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .required(false)
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("config file path, default `~/.bootsign.json`"),
        )
        .subcommand(SignCmd::cmd())
        .subcommand(CryptCmd::cmd())
        .subcommand(CalcHCmd::cmd())
        .subcommand(KeyCmd::cmd())
        .get_matches();

    let config = app.get_one::<PathBuf>("config").map(|p| p.as_path());
    if log_error(BootSignConfig::config_with_file(config)).is_none() {
        std::process::exit(1);
    }

    if let Some((s, m)) = app.subcommand() {
        let res = match s {
            SignCmd::NAME => SignCmd.run(m),
            CryptCmd::NAME => CryptCmd.run(m),
            CalcHCmd::NAME => CalcHCmd.run(m),
            KeyCmd::NAME => KeyCmd.run(m),
            name => Err(anyhow::anyhow!("unsupport for {name}")),
        };

        if log_error(res).is_none() {
            std::process::exit(1);
        }
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
    }
}
