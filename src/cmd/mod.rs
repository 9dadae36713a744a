use crate::error::BootSignError;
use asym::{HashAlgorithm, PkcsScheme, PublicKey};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fmt::Write;
use std::fs::OpenOptions;
use std::io::Write as IOWrite;
use std::path::{Path, PathBuf};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

mod config;
pub use config::BootSignConfig;

mod pwd;

mod sign;
pub use sign::SignCmd;

mod crypt;
pub use crypt::CryptCmd;

mod hparam;
pub use hparam::CalcHCmd;

mod key;
pub use key::KeyCmd;

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .required(false)
        .action(ArgAction::Set)
        .value_parser(value_parser!(PathBuf))
        .help("to specify the output file path, print hex to stdout if not specified")
}

fn path_arg(name: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .short(short)
        .action(ArgAction::Set)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn write_to_file_or_stdout(m: &ArgMatches, data: &[u8]) -> anyhow::Result<()> {
    match m.get_one::<PathBuf>("output") {
        Some(p) => {
            let mut f = OpenOptions::new().create_new(true).write(true).open(p)?;
            f.write_all(data)?;
            log::info!("`{}` bytes written to `{}`", data.len(), p.display());
        }
        None => {
            let mut s = String::with_capacity(data.len() * 2);
            for x in data {
                s.write_fmt(format_args!("{:02x}", x))?;
            }
            println!("{}", s);
        }
    }
    Ok(())
}

fn read_public_key(path: &Path) -> anyhow::Result<PublicKey> {
    let data = std::fs::read(path)?;
    serde_json::from_slice(data.as_slice()).map_err(|e| {
        BootSignError::InvalidPublicKeyFile {
            path: path.display().to_string(),
            msg: e.to_string(),
        }
        .into()
    })
}

/// `pss`, `pkcs1v15`, or the numeric selector `0x01` / `0x02`
fn parse_scheme(s: &str) -> anyhow::Result<PkcsScheme> {
    let num = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => Some(u32::from_str_radix(hex, 16)?),
        None if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() => Some(s.parse::<u32>()?),
        None => None,
    };

    match num {
        Some(x) => Ok(PkcsScheme::try_from(x)?),
        None => s.parse::<PkcsScheme>().map_err(anyhow::Error::msg),
    }
}

/// `--scheme`/`--hash` from the command line, falling back to the configuration
fn scheme_and_hash(m: &ArgMatches) -> anyhow::Result<(PkcsScheme, HashAlgorithm)> {
    let config = BootSignConfig::config()?;
    let scheme = m
        .get_one::<String>("scheme")
        .map(String::as_str)
        .unwrap_or(config.scheme.as_str());
    let hash = m
        .get_one::<String>("hash")
        .map(String::as_str)
        .unwrap_or(config.hash.as_str());

    Ok((
        parse_scheme(scheme)?,
        hash.parse::<HashAlgorithm>().map_err(anyhow::Error::msg)?,
    ))
}
