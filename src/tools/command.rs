use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::{AnnotateError, Stage};

/// A configured external program: the executable plus any leading arguments,
/// e.g. `magick convert` for ImageMagick 7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProgram {
    program: String,
    leading: Vec<String>,
}

impl ToolProgram {
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            leading: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command(&self) -> ToolCommand {
        ToolCommand {
            program: OsString::from(&self.program),
            args: self.leading.iter().map(OsString::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Run to completion and return stdout. A non-zero exit becomes a
    /// collaborator failure for `stage` carrying the tool's stderr.
    pub fn run(&self, stage: Stage) -> Result<Vec<u8>, AnnotateError> {
        info!("{}: {}", stage, self);
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|err| self.spawn_error(stage, err))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.program_name(), output.status)
            } else {
                format!("{}: {}", self.program_name(), stderr)
            };
            return Err(AnnotateError::collaborator(stage, message));
        }
        Ok(output.stdout)
    }

    fn spawn_error(&self, stage: Stage, err: io::Error) -> AnnotateError {
        let message = if err.kind() == io::ErrorKind::NotFound {
            format!("{} not found (is it installed?)", self.program_name())
        } else {
            format!("failed to run {}: {}", self.program_name(), err)
        };
        AnnotateError::collaborator(stage, message)
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(value: &OsStr) -> String {
    let value = value.to_string_lossy();
    let plain = !value.is_empty()
        && value.chars().all(|ch| {
            ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '+' | '=' | ',' | '#' | '%')
        });
    if plain {
        value.into_owned()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

pub(crate) fn coder_path(coder: &str, path: &Path) -> OsString {
    let mut target = OsString::from(coder);
    target.push(":");
    target.push(path.as_os_str());
    target
}
