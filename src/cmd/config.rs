use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use asym::{HashAlgorithm, KdfParams, PkcsScheme};
use config::Config;
use serde::{Deserialize, Serialize};

static CONFIG: OnceLock<BootSignConfig> = OnceLock::new();

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BootSignConfig {
    // argon2id costs of newly sealed keys
    pub kdf: KdfParams,

    // default pkcs scheme, `pss` or `pkcs1v15`
    pub scheme: String,

    // default digest algorithm
    pub hash: String,
}

impl Default for BootSignConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            scheme: PkcsScheme::Pkcs1Pss.to_string(),
            hash: HashAlgorithm::Sha256.to_string(),
        }
    }
}

impl BootSignConfig {
    pub const FILE_NAME: &'static str = ".bootsign.json";

    pub fn config() -> anyhow::Result<&'static Self> {
        Self::config_with_file(None)
    }

    /// The first successful call fixes the configuration for the whole process.
    pub fn config_with_file(f: Option<&Path>) -> anyhow::Result<&'static Self> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }

        let config = Self::load(f)?;
        Ok(CONFIG.get_or_init(|| config))
    }

    /// defaults -> config file -> `BOOTSIGN__*` environment variables
    fn load(f: Option<&Path>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&BootSignConfig::default())?;
        let mut config = Config::builder().add_source(default_config);

        let (file, required) = match f {
            Some(f) => (Some(f.to_path_buf()), true),
            None => (Self::home_file(), false),
        };
        if let Some(file) = file {
            config = config.add_source(config::File::from(file).required(required));
        }

        let config = config
            .add_source(
                config::Environment::with_prefix("BOOTSIGN")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;
        let bootsign: BootSignConfig = config.try_deserialize()?;

        log::trace!("{:?}", bootsign);

        Ok(bootsign)
    }

    fn home_file() -> Option<PathBuf> {
        home::home_dir().map(|mut path| {
            path.push(Self::FILE_NAME);
            path
        })
    }
}
