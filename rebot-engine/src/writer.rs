// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writing processed results.
//!
//! Writers never modify the result, so writing the same result twice produces identical files.
//! Instead of logging, [`ResultWriter`] reports each file it writes through a callback as an
//! [`ArtifactEvent`].

mod output;
mod xunit;

use crate::{config::CompiledSettings, errors::WriteOutputError, model::ExecutionResult};
use camino::Utf8Path;
use std::{fmt, io::Write};

/// The kind of file written by a [`ResultWriter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ArtifactKind {
    /// The processed result, in the same JSON format as the inputs.
    Output,

    /// An xUnit-compatible XML report.
    XUnit,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::XUnit => write!(f, "xunit"),
        }
    }
}

/// Emitted by [`ResultWriter`] after a file has been written.
#[derive(Clone, Copy, Debug)]
pub struct ArtifactEvent<'a> {
    /// The kind of file.
    pub kind: ArtifactKind,

    /// The path the file was written to.
    pub path: &'a Utf8Path,
}

/// Serializes results to files.
pub struct ResultWriter<'a> {
    callback: Box<dyn FnMut(ArtifactEvent<'_>) + 'a>,
}

impl<'a> ResultWriter<'a> {
    /// Creates a new writer, calling `callback` after each file is written.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(ArtifactEvent<'_>) + 'a,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Writes every output configured in `settings`.
    pub fn write_all(
        &mut self,
        result: &ExecutionResult,
        settings: &CompiledSettings,
    ) -> Result<(), WriteOutputError> {
        if let Some(path) = settings.output() {
            self.write_output(result, path)?;
        }
        if let Some(path) = settings.xunit() {
            self.write_xunit(result, path)?;
        }
        Ok(())
    }

    /// Writes `result` to `path` in the JSON result format.
    pub fn write_output(
        &mut self,
        result: &ExecutionResult,
        path: &Utf8Path,
    ) -> Result<(), WriteOutputError> {
        write_atomic(path, |file| output::write(result, file))?;
        (self.callback)(ArtifactEvent {
            kind: ArtifactKind::Output,
            path,
        });
        Ok(())
    }

    /// Writes an xUnit report for `result` to `path`.
    pub fn write_xunit(
        &mut self,
        result: &ExecutionResult,
        path: &Utf8Path,
    ) -> Result<(), WriteOutputError> {
        let mut buf = Vec::new();
        xunit::report(result)
            .serialize(&mut buf)
            .map_err(|error| WriteOutputError::XUnit {
                path: path.to_path_buf(),
                error,
            })?;
        write_atomic(path, |file| file.write_all(&buf))?;
        (self.callback)(ArtifactEvent {
            kind: ArtifactKind::XUnit,
            path,
        });
        Ok(())
    }
}

impl fmt::Debug for ResultWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultWriter").finish_non_exhaustive()
    }
}

fn write_atomic<F>(path: &Utf8Path, f: F) -> Result<(), WriteOutputError>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<()>,
{
    if let Some(dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|error| WriteOutputError::CreateDir {
            path: dir.to_path_buf(),
            error,
        })?;
    }
    atomicwrites::AtomicFile::new(path, atomicwrites::AllowOverwrite)
        .write(f)
        .map_err(|error| WriteOutputError::Fs {
            path: path.to_path_buf(),
            error,
        })
}
