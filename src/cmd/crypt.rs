use crate::cmd::pwd::{passphrase, pwd_arg};
use crate::cmd::{output_arg, path_arg, read_public_key, write_to_file_or_stdout, Cmd};
use asym::{OsEntropy, RsaEngine};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use zeroize::Zeroizing;

pub struct CryptCmd;

impl Cmd for CryptCmd {
    const NAME: &'static str = "crypt";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("rsa pkcs1v15 encryption of one block")
            .arg(path_arg("file", 'f', "the message or cipher block file path").required(true))
            .arg(
                Arg::new("decrypt")
                    .long("decrypt")
                    .short('d')
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .requires("key")
                    .help("decrypt the cipher block with the sealed key"),
            )
            .arg(path_arg("key", 'k', "sealed private key file path"))
            .arg(
                path_arg("pub", 'p', "public key file path to encrypt")
                    .required_unless_present("decrypt"),
            )
            .arg(output_arg())
            .arg(pwd_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let Some(f) = m.get_one::<PathBuf>("file") else {
            anyhow::bail!("need to specify the input file");
        };
        let data = Zeroizing::new(std::fs::read(f)?);
        let engine = RsaEngine::<OsEntropy>::default();

        if m.get_flag("decrypt") {
            let Some(key) = m.get_one::<PathBuf>("key") else {
                anyhow::bail!("need to specify the sealed key to decrypt");
            };
            let container = std::fs::read(key)?;
            let pwd = passphrase(m, false)?;
            let msg = Zeroizing::new(engine.decrypt_with_container(
                container.as_slice(),
                &pwd,
                data.as_slice(),
            )?);
            return write_to_file_or_stdout(m, msg.as_slice());
        }

        let Some(pk) = m.get_one::<PathBuf>("pub") else {
            anyhow::bail!("need to specify the public key to encrypt");
        };
        let pk = read_public_key(pk)?;
        let c = engine.encrypt(&pk, data.as_slice())?;
        write_to_file_or_stdout(m, c.as_slice())
    }
}
