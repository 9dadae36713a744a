use crate::cmd::pwd::{passphrase, pwd_arg};
use crate::cmd::{path_arg, BootSignConfig, Cmd};
use asym::{load, load_record, KdfParams, OsEntropy, SealedKey};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use zeroize::Zeroizing;

pub struct KeyCmd;

struct SealCmd;

struct PubCmd;

impl Cmd for KeyCmd {
    const NAME: &'static str = "key";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("sealed key management")
            .subcommand(SealCmd::cmd())
            .subcommand(PubCmd::cmd())
            .subcommand_required(true)
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        match m.subcommand() {
            Some((SealCmd::NAME, m)) => SealCmd.run(m),
            Some((PubCmd::NAME, m)) => PubCmd.run(m),
            Some((other, _m)) => anyhow::bail!("not support the `{other}` key command"),
            None => anyhow::bail!("need to specify the key command"),
        }
    }
}

fn cost_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::Set)
        .required(false)
        .value_parser(value_parser!(u32))
        .help(help)
}

impl SealCmd {
    fn kdf(m: &ArgMatches) -> anyhow::Result<KdfParams> {
        let kdf = BootSignConfig::config()?.kdf;
        Ok(KdfParams::new(
            m.get_one::<u32>("mem").copied().unwrap_or(kdf.m_cost),
            m.get_one::<u32>("round").copied().unwrap_or(kdf.t_cost),
            m.get_one::<u32>("par").copied().unwrap_or(kdf.p_cost),
        ))
    }
}

impl Cmd for SealCmd {
    const NAME: &'static str = "seal";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("seal a plaintext json key record into a passphrase protected container")
            .arg(
                path_arg(
                    "record",
                    'r',
                    "plaintext key record, json `{n, e, d, p, q, dp, dq, qinv}` in hex",
                )
                .required(true),
            )
            .arg(path_arg("output", 'o', "sealed key file path").required(true))
            .arg(cost_arg("mem", "argon2id memory size in kibibytes"))
            .arg(cost_arg("round", "argon2id iteration times"))
            .arg(cost_arg("par", "argon2id parallelism"))
            .arg(pwd_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (Some(record), Some(out)) = (
            m.get_one::<PathBuf>("record"),
            m.get_one::<PathBuf>("output"),
        ) else {
            anyhow::bail!("need to specify the key record and the output path");
        };

        let record = Zeroizing::new(std::fs::read(record)?);
        // refuse to seal a record the loader would reject
        let key = load_record(record.as_slice())?;
        let bits = key.public_key().bits();
        drop(key);

        let kdf = Self::kdf(m)?;
        let pwd = passphrase(m, true)?;
        let sealed = SealedKey::seal(record.as_slice(), &pwd, kdf, &OsEntropy::default())?;

        let mut f = OpenOptions::new().create_new(true).write(true).open(out)?;
        f.write_all(sealed.to_bytes().as_slice())?;
        log::info!("`{bits}` bits key sealed to `{}`", out.display());
        Ok(())
    }
}

impl Cmd for PubCmd {
    const NAME: &'static str = "pub";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("export the public key json of a sealed key")
            .arg(path_arg("key", 'k', "sealed private key file path").required(true))
            .arg(path_arg(
                "output",
                'o',
                "public key json file path, print to stdout if not specified",
            ))
            .arg(pwd_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let Some(key) = m.get_one::<PathBuf>("key") else {
            anyhow::bail!("need to specify the sealed key");
        };
        let container = std::fs::read(key)?;
        let pwd = passphrase(m, false)?;
        let pk = load(container.as_slice(), &pwd)?.public_key().clone();
        let json = serde_json::to_string_pretty(&pk)?;

        match m.get_one::<PathBuf>("output") {
            Some(p) => {
                let mut f = OpenOptions::new().create_new(true).write(true).open(p)?;
                f.write_all(json.as_bytes())?;
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
