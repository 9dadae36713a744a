use crate::cmd::pwd::{passphrase, pwd_arg};
use crate::cmd::{output_arg, path_arg, read_public_key, scheme_and_hash, write_to_file_or_stdout, Cmd};
use crate::error::BootSignError;
use asym::{HashAlgorithm, OsEntropy, RsaEngine};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub struct SignCmd;

impl SignCmd {
    fn digest(m: &ArgMatches, hash: HashAlgorithm) -> anyhow::Result<Vec<u8>> {
        let Some(f) = m.get_one::<PathBuf>("file") else {
            anyhow::bail!("need to specify the message file");
        };
        let data = std::fs::read(f)?;

        if !m.get_flag("digest") {
            return Ok(hash.digest(data.as_slice()));
        }

        if data.len() != hash.output_len() {
            anyhow::bail!(BootSignError::InvalidDigestFile {
                hash: hash.to_string(),
                need: hash.output_len(),
                real: data.len(),
            });
        }
        Ok(data)
    }
}

impl Cmd for SignCmd {
    const NAME: &'static str = "sign";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("rsa signer, pkcs1v15 or pss over the message digest")
            .arg(path_arg("key", 'k', "sealed private key file path").required_unless_present("verify"))
            .arg(path_arg("file", 'f', "the message file path").required(true))
            .arg(
                Arg::new("digest")
                    .long("digest")
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .help("the message file already holds the digest"),
            )
            .arg(
                path_arg("verify", 'v', "the signature file path, verify instead of sign")
                    .requires("pub"),
            )
            .arg(path_arg("pub", 'p', "public key file path, json `{\"n\": \"<hex>\", \"e\": \"<hex>\"}`"))
            .arg(
                Arg::new("scheme")
                    .long("scheme")
                    .short('s')
                    .action(ArgAction::Set)
                    .required(false)
                    .help("`pss`, `pkcs1v15` or the selector value `0x01`/`0x02`"),
            )
            .arg(
                Arg::new("hash")
                    .long("hash")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("`sha256`, `sha384` or `sha512`"),
            )
            .arg(output_arg())
            .arg(pwd_arg())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (scheme, hash) = scheme_and_hash(m)?;
        let digest = Self::digest(m, hash)?;
        let engine = RsaEngine::<OsEntropy>::default();

        if let Some(sig) = m.get_one::<PathBuf>("verify") {
            let Some(pk) = m.get_one::<PathBuf>("pub") else {
                anyhow::bail!("need to specify the public key to verify");
            };
            let pk = read_public_key(pk)?;
            let sig = std::fs::read(sig)?;

            anyhow::ensure!(
                engine.verify(scheme, hash, digest.as_slice(), &pk, sig.as_slice())?,
                BootSignError::ValidateFailed
            );
            println!("Validation success.");
            return Ok(());
        }

        let Some(key) = m.get_one::<PathBuf>("key") else {
            anyhow::bail!("need to specify the sealed key to sign");
        };
        let container = std::fs::read(key)?;
        let pwd = passphrase(m, false)?;

        let sig =
            engine.sign_with_container(scheme, hash, digest.as_slice(), container.as_slice(), &pwd)?;
        log::debug!("{scheme}/{hash} signature of `{}` bytes", sig.len());

        write_to_file_or_stdout(m, sig.as_slice())
    }
}
