use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::scene_core::config::DEFAULT_CONFIG_PATH;

#[derive(Clone, Debug)]
pub struct LaunchArgs {
    pub config_path: PathBuf,
    /// Overrides `mesh_path` from the config file when set.
    pub mesh_path: Option<PathBuf>,
}

impl Default for LaunchArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            mesh_path: None,
        }
    }
}

impl LaunchArgs {
    pub fn from_env_args() -> Result<Self> {
        Self::from_iter(
            std::env::args_os().skip(1),
            std::env::var_os("DAYCYCLE_MESH"),
        )
    }

    fn from_iter<I>(args: I, env_mesh: Option<OsString>) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut parsed = Self::default();

        if let Some(mesh) = env_mesh.filter(|v| !v.is_empty()) {
            parsed.mesh_path = Some(PathBuf::from(mesh));
        }

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg_str = arg.to_string_lossy();
            match arg_str.as_ref() {
                "--mesh" => {
                    let Some(value) = iter.next() else {
                        return Err(anyhow!("--mesh requires a value"));
                    };
                    parsed.mesh_path = Some(PathBuf::from(value));
                }
                "--config" => {
                    let Some(value) = iter.next() else {
                        return Err(anyhow!("--config requires a value"));
                    };
                    parsed.config_path = PathBuf::from(value);
                }
                _ => {
                    log::warn!("ignoring unknown argument {arg_str}");
                }
            }
        }

        Ok(parsed)
    }
}
