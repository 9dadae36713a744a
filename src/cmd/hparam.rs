use crate::cmd::{path_arg, read_public_key, Cmd};
use asym::derive_h;
use clap::{ArgGroup, ArgMatches, Command};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub struct CalcHCmd;

impl CalcHCmd {
    /// H parameter of the public key file, or of the raw modulus file bytes as
    /// they are, leading zeros included
    fn h_parameter(m: &ArgMatches) -> anyhow::Result<Vec<u8>> {
        if let Some(p) = m.get_one::<PathBuf>("pub") {
            let pk = read_public_key(p)?;
            log::debug!("H parameter of `{}` bits modulus", pk.bits());
            return Ok(pk.h_parameter());
        }

        match m.get_one::<PathBuf>("modulus") {
            Some(p) => {
                let n = std::fs::read(p)?;
                anyhow::ensure!(!n.is_empty(), "the modulus file `{}` is empty", p.display());
                log::debug!("H parameter of `{}` bytes modulus", n.len());
                Ok(derive_h(n.as_slice()))
            }
            None => anyhow::bail!("need to specify the public key or the modulus file"),
        }
    }
}

impl Cmd for CalcHCmd {
    const NAME: &'static str = "calc-h";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("H parameter of the public modulus, uppercase hex digits with a trailing 0x00")
            .arg(path_arg("pub", 'p', "public key file path"))
            .arg(path_arg("modulus", 'm', "raw big-endian modulus file path"))
            .group(
                ArgGroup::new("input")
                    .args(["pub", "modulus"])
                    .required(true),
            )
            .arg(path_arg(
                "output",
                'o',
                "write the H parameter, terminator included, to the file",
            ))
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let h = Self::h_parameter(m)?;

        match m.get_one::<PathBuf>("output") {
            Some(p) => {
                let mut f = OpenOptions::new().create_new(true).write(true).open(p)?;
                f.write_all(h.as_slice())?;
            }
            None => {
                // without the terminator
                println!("{}", String::from_utf8_lossy(&h[..(h.len() - 1)]));
            }
        }
        Ok(())
    }
}
