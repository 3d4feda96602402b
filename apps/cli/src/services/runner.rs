//! Launches the external bundler against a generated profile.

use dojo_domain::config::RunnerConfig;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

#[dojo_derive::dojo_error]
pub enum RunnerError {
    #[error("Runner is misconfigured{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Failed to start the bundler{}: {source}", format_context(.context))]
    Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error(
        "Bundler '{program}' exited with {}{}",
        exit_code(.code.as_ref()),
        format_context(.context)
    )]
    Failed { program: String, code: Option<i32>, context: Option<Cow<'static, str>> },
}

fn exit_code(code: Option<&i32>) -> Cow<'static, str> {
    code.map_or(Cow::Borrowed("no exit code"), |c| Cow::Owned(format!("status {c}")))
}

/// Program and arguments of one bundler run:
/// `<program> <args...> --profile <path> --release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl BuildCommand {
    /// # Errors
    /// Returns [`RunnerError::Config`] for an empty program and
    /// [`RunnerError::Spawn`] if the profile path cannot be made absolute.
    pub fn new(config: &RunnerConfig, profile: &Path) -> Result<Self, RunnerError> {
        if config.program.trim().is_empty() {
            return Err(RunnerError::Config {
                message: "runner.program must not be empty".into(),
                context: None,
            });
        }

        // The bundler may run elsewhere, so the profile is passed absolute.
        let profile = if config.working_dir.is_some() {
            std::path::absolute(profile)
                .context(format!("Failed to resolve {}", profile.display()))?
        } else {
            profile.to_path_buf()
        };

        let mut args = config.args.clone();
        args.push("--profile".to_owned());
        args.push(profile.display().to_string());
        args.push("--release".to_owned());

        Ok(Self { program: config.program.clone(), args, working_dir: config.working_dir.clone() })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the bundler with inherited output streams and waits for it.
    ///
    /// # Errors
    /// Returns [`RunnerError::Spawn`] if the process cannot start and
    /// [`RunnerError::Failed`] if it exits unsuccessfully.
    pub fn run(&self) -> Result<(), RunnerError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        info!("Running {} {}", self.program, self.args.join(" "));
        let status = command.status().context(format!("Failed to execute {}", self.program))?;
        debug!(%status, "Bundler finished");

        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::Failed {
                program: self.program.clone(),
                code: status.code(),
                context: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_invocation() {
        let command =
            BuildCommand::new(&RunnerConfig::default(), Path::new("build.profile.js")).unwrap();
        assert_eq!(command.program(), "node");
        assert_eq!(command.args(), [
            "dojo/dojo.js",
            "load=build",
            "--profile",
            "build.profile.js",
            "--release"
        ]);
    }

    #[test]
    fn test_working_dir_makes_the_profile_absolute() {
        let config =
            RunnerConfig { working_dir: Some("../dojo-src".into()), ..RunnerConfig::default() };
        let command = BuildCommand::new(&config, Path::new("build.profile.js")).unwrap();
        assert!(Path::new(&command.args()[3]).is_absolute());
    }

    #[test]
    fn test_empty_program_is_rejected() {
        let config = RunnerConfig { program: " ".into(), ..RunnerConfig::default() };
        let err = BuildCommand::new(&config, Path::new("p.js")).unwrap_err();
        assert!(matches!(err, RunnerError::Config { .. }));
    }

    #[test]
    fn test_missing_program_fails_to_spawn() {
        let config = RunnerConfig {
            program: "dojo-builder-no-such-program".into(),
            args: vec![],
            working_dir: None,
        };
        let err = BuildCommand::new(&config, Path::new("p.js")).unwrap().run().unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        let ok = RunnerConfig { program: "true".into(), args: vec![], working_dir: None };
        assert!(BuildCommand::new(&ok, Path::new("p.js")).unwrap().run().is_ok());

        let failing = RunnerConfig { program: "false".into(), args: vec![], working_dir: None };
        let err = BuildCommand::new(&failing, Path::new("p.js")).unwrap().run().unwrap_err();
        assert!(matches!(err, RunnerError::Failed { code: Some(1), .. }));
        assert_eq!(err.to_string(), "Bundler 'false' exited with status 1");
    }
}
