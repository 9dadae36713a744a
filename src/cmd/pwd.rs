use crate::error::BootSignError;
use asym::Passphrase;
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use std::path::PathBuf;
use zeroize::{Zeroize, Zeroizing};

pub fn pwd_arg() -> Arg {
    Arg::new("pwd-file")
        .long("pwd-file")
        .required(false)
        .action(ArgAction::Set)
        .value_parser(value_parser!(PathBuf))
        .help("read the passphrase from the first line of the file instead of the terminal")
}

/// `confirm`: prompt twice, used when a new container is sealed
pub fn passphrase(m: &ArgMatches, confirm: bool) -> anyhow::Result<Passphrase> {
    let pwd = match m.get_one::<PathBuf>("pwd-file") {
        Some(p) => {
            let data = Zeroizing::new(std::fs::read(p)?);
            first_line(data.as_slice())
        }
        None => read_from_stdio(confirm)?,
    };

    anyhow::ensure!(!pwd.is_empty(), BootSignError::EmptyPassword);
    Ok(pwd)
}

fn first_line(data: &[u8]) -> Passphrase {
    let line = data.split(|&x| x == b'\n').next().unwrap_or_default();
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Passphrase::from(line.to_vec())
}

fn read_from_stdio(confirm: bool) -> anyhow::Result<Passphrase> {
    let passwd1 = Passphrase::from(rpassword::prompt_password("Input password: ")?);
    if confirm {
        let mut passwd2 = rpassword::prompt_password("Input again: ")?;
        let same = passwd1.as_bytes() == passwd2.as_bytes();
        passwd2.zeroize();
        anyhow::ensure!(same, BootSignError::PasswordMismatch);
    }

    Ok(passwd1)
}
