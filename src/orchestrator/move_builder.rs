use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::error::BuildError;

pub const DEFAULT_BUILDER_BIN: &str = "initiad";

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum CommandType {
    Build,
    Test,
}

/// Compiles and unit tests a Move package by driving the chain binary's `move` subcommands.
#[derive(Clone, Debug)]
pub struct MoveBuilder {
    pub package_path: PathBuf,
    /// executable providing `move build` / `move test`
    pub binary: String,
    pub skip_fetch_latest_git_deps: bool,
    pub dev_mode: bool,
    pub test_mode: bool,
}

impl MoveBuilder {
    /// Builder for the package at `package_path`, using `MOVE_BUILDER_BIN` when it is set.
    pub fn new<P: Into<PathBuf>>(package_path: P) -> Self {
        Self {
            package_path: package_path.into(),
            binary: std::env::var("MOVE_BUILDER_BIN")
                .unwrap_or_else(|_| DEFAULT_BUILDER_BIN.to_string()),
            skip_fetch_latest_git_deps: true,
            dev_mode: false,
            test_mode: false,
        }
    }

    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn build(&self) -> Result<(), BuildError> {
        info!("Building move package {:?}", self.package_path);
        self.exec(CommandType::Build)
    }

    pub fn test(&self) -> Result<(), BuildError> {
        info!("Testing move package {:?}", self.package_path);
        self.exec(CommandType::Test)
    }

    /// Path of a compiled module inside the package build directory.
    pub fn bytecode_path(&self, package_name: &str, module_name: &str) -> PathBuf {
        self.package_path
            .join("build")
            .join(package_name)
            .join("bytecode_modules")
            .join(format!("{}.mv", module_name))
    }

    /// Reads a module produced by [Self::build()].
    pub fn bytecode_module(
        &self,
        package_name: &str,
        module_name: &str,
    ) -> Result<Vec<u8>, BuildError> {
        let path = self.bytecode_path(package_name, module_name);
        fs::read(&path).map_err(|e| BuildError::ModuleRead { path, source: e })
    }

    pub fn args(&self, cmd_type: CommandType) -> Vec<String> {
        let sub = match cmd_type {
            CommandType::Build => "build",
            CommandType::Test => "test",
        };

        let mut args = vec![
            "move".to_string(),
            sub.to_string(),
            "--path".to_string(),
            path_arg(&self.package_path),
        ];
        if self.skip_fetch_latest_git_deps {
            args.push("--skip-fetch-latest-git-deps".to_string());
        }
        if self.dev_mode {
            args.push("--dev".to_string());
        }
        if self.test_mode && cmd_type == CommandType::Build {
            args.push("--test".to_string());
        }
        args
    }

    fn exec(&self, cmd_type: CommandType) -> Result<(), BuildError> {
        let args = self.args(cmd_type);

        let res = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| BuildError::Spawn {
                binary: self.binary.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&res.stdout);
        if !stdout.trim().is_empty() {
            info!("{}", stdout.trim_end());
        }

        if !res.status.success() {
            error!("{}", String::from_utf8_lossy(&res.stderr));
            return Err(BuildError::Failed {
                command: format!("{} {}", self.binary, args.join(" ")),
                status: res.status.to_string(),
            });
        }

        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
