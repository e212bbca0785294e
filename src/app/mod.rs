use crate::domain::{
    ColourPair, GetColoursError, Palette, ShellExports, get_colours, short_hostname,
};
use crate::infra::{
    HostnameError, MACHINE_ID_PATH, MachineIdError, is_superuser, read_machine_id,
    system_hostname,
};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportsError {
    #[error(transparent)]
    Hostname(#[from] HostnameError),

    #[error(transparent)]
    MachineId(#[from] MachineIdError),

    #[error(transparent)]
    Colours(#[from] GetColoursError),
}

/// Seed material for a regular user's prompt colours.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostContext {
    pub hostname: String,
    pub tiebreaker: String,
}

impl HostContext {
    pub fn detect(hostname: Option<String>) -> Result<Self, ExportsError> {
        Self::detect_with_machine_id(hostname, Path::new(MACHINE_ID_PATH))
    }

    fn detect_with_machine_id(
        hostname: Option<String>,
        machine_id_path: &Path,
    ) -> Result<Self, ExportsError> {
        let hostname = match hostname {
            Some(hostname) => hostname,
            None => system_hostname()?,
        };
        let tiebreaker = read_machine_id(machine_id_path)?;
        Ok(Self {
            hostname,
            tiebreaker,
        })
    }

    pub fn seed(&self) -> &str {
        short_hostname(&self.hostname)
    }

    pub fn colours(&self, palette: &Palette) -> Result<ColourPair, GetColoursError> {
        get_colours(palette, self.seed(), &self.tiebreaker)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Identity {
    Superuser,
    User(HostContext),
}

impl Identity {
    /// The superuser check comes first so a broken hostname never hides it.
    pub fn detect(hostname: Option<String>) -> Result<Self, ExportsError> {
        if is_superuser() {
            return Ok(Self::Superuser);
        }
        Ok(Self::User(HostContext::detect(hostname)?))
    }
}

pub fn exports_for(
    palette: &Palette,
    identity: &Identity,
) -> Result<ShellExports, GetColoursError> {
    match identity {
        Identity::Superuser => Ok(ShellExports::SUPERUSER),
        Identity::User(host) => Ok(ShellExports::from_pair(&host.colours(palette)?)),
    }
}

/// Maps any failure on the way to a pair onto white on black.
pub fn exports_or_fallback(
    palette: &Palette,
    identity: Result<Identity, ExportsError>,
) -> ShellExports {
    let result = identity
        .and_then(|identity| exports_for(palette, &identity).map_err(ExportsError::from));

    result.unwrap_or_else(|error| {
        tracing::warn!("{error}; using fallback colours");
        ShellExports::FALLBACK
    })
}

/// Exports for the current process. Never fails: the output is sourced into
/// a shell prompt.
pub fn resolve_exports(palette: &Palette, hostname: Option<String>) -> ShellExports {
    exports_or_fallback(palette, Identity::detect(hostname))
}
